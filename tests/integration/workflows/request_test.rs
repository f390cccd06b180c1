//! Election request form workflow tests

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Duration;
use univote::models::request::RequestField;
use univote::workflows::RequestState;
use univote::{Screen, UniVoteError};

use crate::helpers::{today, valid_request_form, FailingElectionService};
use crate::integration::{setup_integration_test, setup_slow_election_test};

fn fill_valid_form(client: &mut univote::VotingClient) {
    let form = valid_request_form();
    let workflow = client.request_workflow_mut().unwrap();
    workflow.set_name(form.name).unwrap();
    workflow.set_department(form.department).unwrap();
    workflow.set_reason(form.reason).unwrap();
    workflow.set_dates(form.start_date, form.end_date).unwrap();
}

#[tokio::test]
async fn test_form_opens_prefilled_for_requester() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::RequestElection, None).unwrap();

    let form = client.request_workflow().unwrap().form();
    assert_eq!(form.university, "University of California");
    assert_eq!(form.department, "Computer Science");
    assert_eq!(form.start_date, today());
    assert_eq!(form.end_date, today());
}

#[tokio::test]
async fn test_short_reason_blocks_submission() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::RequestElection, None).unwrap();
    fill_valid_form(&mut client);
    client.request_workflow_mut().unwrap().set_reason("Too short!").unwrap();

    let result = client.submit_request().await;

    assert_matches!(result, Err(UniVoteError::InvalidRequest(ref errors)) if errors.len() == 1);
    let workflow = client.request_workflow().unwrap();
    assert_eq!(
        workflow.errors().get(RequestField::Reason),
        Some("Please provide a more detailed reason (minimum 20 characters)")
    );
    assert_eq!(workflow.state(), &RequestState::Editing);
    assert!(client.banner().is_none());
}

#[tokio::test]
async fn test_receipt_echoes_form() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::RequestElection, None).unwrap();
    fill_valid_form(&mut client);

    let receipt = client.submit_request().await.unwrap();

    assert_eq!(receipt.name, "Debate Society Captain");
    assert_eq!(receipt.department, "Liberal Arts");
    assert_eq!(receipt.start_date, today() + Duration::days(1));
    assert_eq!(receipt.end_date, today() + Duration::days(8));
    assert_matches!(client.request_workflow().unwrap().state(), RequestState::Submitted(_));
    assert_matches!(
        client.request_workflow_mut().unwrap().set_name("Another name"),
        Err(UniVoteError::InvalidElection(_))
    );
}

#[tokio::test]
async fn test_service_failure_shows_banner_and_keeps_form_editable() {
    let ctx = setup_integration_test();
    let mut client = ctx.client_with_elections(Arc::new(FailingElectionService));
    client.login("student1", "password").await.unwrap();
    client.navigate(Screen::RequestElection, None).unwrap();
    fill_valid_form(&mut client);

    let result = client.submit_request().await;

    assert_matches!(result, Err(UniVoteError::Service(_)));
    let banner = client.banner().unwrap();
    assert_eq!(banner.screen, Screen::RequestElection);
    assert_eq!(banner.message, "Something went wrong. Please try again.");
    assert_eq!(client.request_workflow().unwrap().state(), &RequestState::Editing);

    client.go_home().unwrap();
    assert!(client.banner().is_none());
}

#[tokio::test]
async fn test_form_state_is_dropped_on_leave() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::RequestElection, None).unwrap();
    client.request_workflow_mut().unwrap().set_name("Half-typed name").unwrap();

    client.go_home().unwrap();
    assert!(client.request_workflow().is_none());

    client.navigate(Screen::RequestElection, None).unwrap();
    assert!(client.request_workflow().unwrap().form().name.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_submission_leaves_form_editable() {
    let ctx = setup_slow_election_test(2_000, 10_000);
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::RequestElection, None).unwrap();
    fill_valid_form(&mut client);

    let abandoned =
        tokio::time::timeout(std::time::Duration::from_millis(500), client.submit_request()).await;

    assert!(abandoned.is_err());
    assert_eq!(client.request_workflow().unwrap().state(), &RequestState::Editing);
    assert!(client.request_workflow_mut().unwrap().set_reason("The chess club needs a captain this semester").is_ok());

    let receipt = client.submit_request().await.unwrap();
    assert_eq!(receipt.name, "Debate Society Captain");
}
