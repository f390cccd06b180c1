//! Admin journey integration tests
//!
//! The request queue from submission by a student to an admin decision, and
//! admin-only election management.

use assert_matches::assert_matches;
use univote::models::election::ElectionStatus;
use univote::models::request::RequestDecision;
use univote::services::{ElectionFilter, ElectionService};
use univote::{Screen, UniVoteError};

use crate::helpers::{new_election, valid_request_form};
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_student_request_reaches_admin_queue_and_is_approved() {
    let ctx = setup_integration_test();

    let mut student = ctx.signed_in("student1").await;
    student.navigate(Screen::RequestElection, None).unwrap();
    let form = valid_request_form();
    {
        let workflow = student.request_workflow_mut().unwrap();
        workflow.set_name(form.name.clone()).unwrap();
        workflow.set_department(form.department.clone()).unwrap();
        workflow.set_reason(form.reason.clone()).unwrap();
        workflow.set_dates(form.start_date, form.end_date).unwrap();
    }
    let receipt = student.submit_request().await.unwrap();
    student.logout();

    let mut admin = ctx.signed_in("admin1").await;
    let pending = admin.pending_requests().await.unwrap();
    assert_eq!(pending.len(), 3);
    assert_eq!(pending[2].id, receipt.request_id);
    assert_eq!(pending[2].requester, "student1");

    admin
        .resolve_request(&receipt.request_id, RequestDecision::Approve)
        .await
        .unwrap();

    let summary = admin.dashboard().await.unwrap();
    assert_eq!(summary.pending_requests.len(), 2);
    assert_eq!(summary.pending.len(), 1);
    assert_eq!(summary.pending[0].election.name, "Debate Society Captain");
    assert_eq!(summary.pending[0].election.start_date.date_naive(), form.start_date);
}

#[tokio::test]
async fn test_rejected_request_leaves_queue_without_election() {
    let ctx = setup_integration_test();
    let mut admin = ctx.signed_in("admin1").await;

    admin.resolve_request("2", RequestDecision::Reject).await.unwrap();

    let pending = admin.pending_requests().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "1");
    let pending_elections = ctx
        .elections
        .list_elections(ElectionFilter::status(ElectionStatus::Pending))
        .await
        .unwrap();
    assert!(pending_elections.is_empty());
}

#[tokio::test]
async fn test_resolving_twice_is_an_error_with_banner() {
    let ctx = setup_integration_test();
    let mut admin = ctx.signed_in("admin1").await;

    admin.resolve_request("1", RequestDecision::Approve).await.unwrap();
    let result = admin.resolve_request("1", RequestDecision::Reject).await;

    assert_matches!(result, Err(UniVoteError::RequestNotFound { .. }));
    assert_eq!(admin.banner().map(|b| b.screen), Some(Screen::AdminDashboard));
}

#[tokio::test]
async fn test_admin_creates_pending_election() {
    let ctx = setup_integration_test();
    let mut admin = ctx.signed_in("admin1").await;

    let created = admin.create_election(new_election("Physics Society Chair")).await.unwrap();

    assert_eq!(created.status, ElectionStatus::Pending);
    assert_eq!(created.candidates.len(), 1);
    assert_eq!(created.total_votes, 0);
    assert_eq!(admin.dashboard().await.unwrap().pending.len(), 1);
}

#[tokio::test]
async fn test_invalid_new_election_is_refused_locally() {
    let ctx = setup_integration_test();
    let mut admin = ctx.signed_in("admin1").await;

    let mut election = new_election("Physics Society Chair");
    election.end_date = election.start_date;

    assert_matches!(
        admin.create_election(election).await,
        Err(UniVoteError::InvalidElection(_))
    );
    assert!(admin.banner().is_none());
}

#[tokio::test]
async fn test_students_cannot_manage_elections() {
    let ctx = setup_integration_test();
    let mut student = ctx.signed_in("student1").await;

    assert_matches!(
        student.create_election(new_election("Sneaky Election")).await,
        Err(UniVoteError::PermissionDenied(_))
    );
    assert_matches!(
        student.pending_requests().await,
        Err(UniVoteError::PermissionDenied(_))
    );
    assert_matches!(
        student.navigate(Screen::AdminDashboard, None),
        Err(UniVoteError::Navigation(_))
    );
}
