//! Services whose backend is unavailable

use std::collections::BTreeSet;

use async_trait::async_trait;
use univote::models::election::{Election, NewElection};
use univote::models::notification::Notification;
use univote::models::request::{
    ElectionRequest, ElectionRequestForm, RequestDecision, RequestReceipt, VoteReceipt,
};
use univote::models::user::User;
use univote::repositories::seed;
use univote::services::{ElectionFilter, ElectionService, NotificationService};
use univote::{Result, UniVoteError};

/// Election service that fails every call
#[derive(Debug, Default)]
pub struct FailingElectionService;

fn unavailable<T>() -> Result<T> {
    Err(UniVoteError::Service("election backend unavailable".to_string()))
}

#[async_trait]
impl ElectionService for FailingElectionService {
    async fn list_elections(&self, _filter: ElectionFilter) -> Result<Vec<Election>> {
        unavailable()
    }

    async fn get_election(&self, _election_id: &str) -> Result<Election> {
        unavailable()
    }

    async fn cast_vote(&self, _election_id: &str, _candidate_id: &str, _user_id: &str) -> Result<VoteReceipt> {
        unavailable()
    }

    async fn request_election(&self, _form: &ElectionRequestForm, _requester: &User) -> Result<RequestReceipt> {
        unavailable()
    }

    async fn list_pending_requests(&self) -> Result<Vec<ElectionRequest>> {
        unavailable()
    }

    async fn resolve_request(&self, _request_id: &str, _decision: RequestDecision) -> Result<()> {
        unavailable()
    }

    async fn create_election(&self, _election: NewElection) -> Result<Election> {
        unavailable()
    }
}

/// Notification service that serves the demo feed but cannot store read state
#[derive(Debug, Default)]
pub struct FailingNotificationService;

#[async_trait]
impl NotificationService for FailingNotificationService {
    async fn list_notifications(&self, _user_id: &str) -> Result<Vec<Notification>> {
        Ok(seed::demo_notifications(crate::helpers::test_now()))
    }

    async fn mark_read(&self, _ids: &BTreeSet<String>) -> Result<()> {
        Err(UniVoteError::Service("notification backend unavailable".to_string()))
    }
}
