//! Election service implementation
//!
//! Election listing, ballot casting, the election request queue and admin
//! election management. The in-memory implementation serialises every mutation
//! through one write lock, so a vote updates the candidate count and the
//! election total as a single step even with concurrent voters.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveTime, TimeZone, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::models::election::{Candidate, Election, ElectionStatus, NewElection};
use crate::models::request::{
    ElectionRequest, ElectionRequestForm, ReceiptStatus, RequestDecision, RequestReceipt, RequestStatus,
    VoteReceipt,
};
use crate::models::user::User;
use crate::repositories::{seed, ElectionRepository, RequestQueue};
use crate::utils::errors::{Result, UniVoteError, VoteError};
use crate::utils::helpers::{generate_uuid, Clock};
use crate::workflows::request::validate_request;

/// Election list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElectionFilter {
    pub status: Option<ElectionStatus>,
    pub department: Option<String>,
}

impl ElectionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn status(status: ElectionStatus) -> Self {
        Self {
            status: Some(status),
            department: None,
        }
    }

    pub fn matches(&self, election: &Election) -> bool {
        self.status.map_or(true, |s| election.status == s)
            && self
                .department
                .as_ref()
                .map_or(true, |d| &election.department == d)
    }
}

/// Election seam consumed by the dashboards and workflows
#[async_trait]
pub trait ElectionService: Send + Sync {
    async fn list_elections(&self, filter: ElectionFilter) -> Result<Vec<Election>>;

    async fn get_election(&self, election_id: &str) -> Result<Election>;

    async fn cast_vote(&self, election_id: &str, candidate_id: &str, user_id: &str) -> Result<VoteReceipt>;

    async fn request_election(&self, form: &ElectionRequestForm, requester: &User) -> Result<RequestReceipt>;

    async fn list_pending_requests(&self) -> Result<Vec<ElectionRequest>>;

    async fn resolve_request(&self, request_id: &str, decision: RequestDecision) -> Result<()>;

    async fn create_election(&self, election: NewElection) -> Result<Election>;
}

#[derive(Debug, Default)]
struct ElectionState {
    elections: ElectionRepository,
    requests: RequestQueue,
    ballots: HashSet<(String, String)>,
}

/// In-memory election backend
#[derive(Debug)]
pub struct InMemoryElectionService {
    state: RwLock<ElectionState>,
    clock: Arc<dyn Clock>,
    election_departments: Vec<String>,
    default_university: String,
    latency: Duration,
}

impl InMemoryElectionService {
    pub fn new(settings: &Settings, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(ElectionState::default()),
            clock,
            election_departments: settings.app.election_departments.clone(),
            default_university: settings.app.default_university.clone(),
            latency: settings.timing.mock_latency(),
        }
    }

    /// Service preloaded with the demo elections and pending requests
    pub fn with_demo_data(settings: &Settings, clock: Arc<dyn Clock>) -> Self {
        let anchor = clock.now();
        let mut service = Self::new(settings, clock);
        service.state = RwLock::new(ElectionState {
            elections: ElectionRepository::from_elections(seed::demo_elections(anchor)),
            requests: RequestQueue::new(seed::demo_requests(anchor)),
            ballots: HashSet::new(),
        });
        service
    }

    pub fn with_elections(settings: &Settings, clock: Arc<dyn Clock>, elections: Vec<Election>) -> Self {
        let mut service = Self::new(settings, clock);
        service.state = RwLock::new(ElectionState {
            elections: ElectionRepository::from_elections(elections),
            ..ElectionState::default()
        });
        service
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Sum of all election totals
    pub async fn total_votes(&self) -> u64 {
        self.state.read().await.elections.sum_total_votes()
    }
}

#[async_trait]
impl ElectionService for InMemoryElectionService {
    async fn list_elections(&self, filter: ElectionFilter) -> Result<Vec<Election>> {
        self.simulate_latency().await;

        let state = self.state.read().await;
        let elections: Vec<Election> = state
            .elections
            .all()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        debug!(count = elections.len(), status = ?filter.status, "Listed elections");
        Ok(elections)
    }

    async fn get_election(&self, election_id: &str) -> Result<Election> {
        self.simulate_latency().await;
        Ok(self.state.read().await.elections.get(election_id)?.clone())
    }

    async fn cast_vote(&self, election_id: &str, candidate_id: &str, user_id: &str) -> Result<VoteReceipt> {
        self.simulate_latency().await;

        // No await below this point: the whole check-and-increment happens under one lock.
        let mut state = self.state.write().await;
        let now = self.clock.now();

        let election = state.elections.get(election_id)?;
        if election.status != ElectionStatus::Active {
            return Err(VoteError::NotActive.into());
        }
        if election.end_date <= now {
            return Err(VoteError::Closed.into());
        }
        if election.candidate(candidate_id).is_none() {
            return Err(VoteError::UnknownCandidate(candidate_id.to_string()).into());
        }

        let ballot_key = (election_id.to_string(), user_id.to_string());
        if state.ballots.contains(&ballot_key) {
            warn!(user_id = user_id, election_id = election_id, "Duplicate ballot rejected");
            return Err(VoteError::AlreadyVoted.into());
        }

        let (election, candidate): (&Election, &Candidate) = state.elections.record_vote(election_id, candidate_id)?;
        let receipt = VoteReceipt {
            election_id: election.id.clone(),
            election_name: election.name.clone(),
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            timestamp: now,
            status: ReceiptStatus::Confirmed,
        };
        state.ballots.insert(ballot_key);

        Ok(receipt)
    }

    async fn request_election(&self, form: &ElectionRequestForm, requester: &User) -> Result<RequestReceipt> {
        self.simulate_latency().await;

        let errors = validate_request(form, self.clock.today(), &self.election_departments);
        if !errors.is_empty() {
            return Err(UniVoteError::InvalidRequest(errors));
        }

        let now = self.clock.now();
        let request = ElectionRequest {
            id: generate_uuid(),
            name: form.name.clone(),
            requester: requester.username.clone(),
            department: form.department.clone(),
            reason: form.reason.clone(),
            submitted_date: now.date_naive(),
            start_date: Some(form.start_date),
            end_date: Some(form.end_date),
            status: RequestStatus::Pending,
        };
        let receipt = RequestReceipt {
            request_id: request.id.clone(),
            name: request.name.clone(),
            department: request.department.clone(),
            start_date: form.start_date,
            end_date: form.end_date,
            submitted_at: now,
        };

        self.state.write().await.requests.push(request);
        info!(request_id = %receipt.request_id, requester = %requester.username, "Election request queued");
        Ok(receipt)
    }

    async fn list_pending_requests(&self) -> Result<Vec<ElectionRequest>> {
        self.simulate_latency().await;
        Ok(self
            .state
            .read()
            .await
            .requests
            .pending()
            .into_iter()
            .cloned()
            .collect())
    }

    async fn resolve_request(&self, request_id: &str, decision: RequestDecision) -> Result<()> {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let request = state.requests.resolve(request_id, decision)?;

        if decision == RequestDecision::Approve {
            let today = self.clock.today();
            let start = request.start_date.unwrap_or(today);
            let end = request.end_date.unwrap_or(start + chrono::Duration::days(7));
            state.elections.insert(Election {
                id: generate_uuid(),
                name: request.name.clone(),
                description: request.reason.clone(),
                start_date: Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN)),
                end_date: Utc.from_utc_datetime(&end.and_time(NaiveTime::MIN)),
                university: self.default_university.clone(),
                department: request.department.clone(),
                status: ElectionStatus::Pending,
                total_votes: 0,
                candidates: Vec::new(),
            });
        }

        info!(request_id = request_id, decision = ?decision, "Election request resolved");
        Ok(())
    }

    async fn create_election(&self, election: NewElection) -> Result<Election> {
        self.simulate_latency().await;

        let form = election.validated()?;
        let created = Election {
            id: generate_uuid(),
            name: form.name,
            description: form.description,
            start_date: form.start_date,
            end_date: form.end_date,
            university: form.university,
            department: form.department,
            status: ElectionStatus::Pending,
            total_votes: 0,
            candidates: form
                .candidates
                .into_iter()
                .map(|c| Candidate {
                    id: generate_uuid(),
                    name: c.name,
                    manifesto: c.manifesto,
                    votes: 0,
                    avatar: c.avatar.filter(|a| !a.is_empty()),
                })
                .collect(),
        };

        self.state.write().await.elections.insert(created.clone());
        info!(election_id = %created.id, "Election created");
        Ok(created)
    }
}
