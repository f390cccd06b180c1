//! Student journey integration tests
//!
//! Sign in, browse the dashboard, vote and come back.

use assert_matches::assert_matches;
use univote::models::user::UserRole;
use univote::services::ElectionService;
use univote::utils::errors::{NavigationError, VoteError};
use univote::workflows::VoteState;
use univote::{Screen, UniVoteError};

use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_admin_username_lands_on_admin_dashboard() {
    let ctx = setup_integration_test();
    let mut client = ctx.client();

    let user = client.login("admin1", "x").await.expect("login should succeed");

    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(client.current_screen(), Screen::AdminDashboard);
}

#[tokio::test]
async fn test_login_with_missing_password_stays_on_auth() {
    let ctx = setup_integration_test();
    let mut client = ctx.client();

    let result = client.login("student1", "").await;

    assert_matches!(result, Err(UniVoteError::Auth(_)));
    assert_eq!(client.current_screen(), Screen::Auth);
    assert!(client.current_user().is_none());
}

#[tokio::test]
async fn test_student_votes_and_tally_moves_together() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    assert_eq!(client.current_screen(), Screen::StudentDashboard);

    let summary = client.dashboard().await.unwrap();
    let active_id = summary.active[0].election.id.clone();
    assert_eq!(
        summary.active[0].leader.as_ref().map(|c| c.name.as_str()),
        Some("Sarah Johnson")
    );

    client.open_election(&active_id).await.unwrap();
    assert_eq!(client.current_screen(), Screen::Voting);
    assert_eq!(
        client.vote_workflow().unwrap().time_remaining(client.now()).to_string(),
        "3d 0h 0m"
    );

    client.select_candidate("2").unwrap();
    let receipt = client.submit_vote().await.unwrap();
    assert_eq!(receipt.candidate_name, "Mike Chen");
    assert_eq!(receipt.election_name, "Student Council President 2024");

    let election = ctx.elections.get_election(&active_id).await.unwrap();
    assert_eq!(election.candidates[1].votes, 601);
    assert_eq!(election.total_votes, 1251);
    assert!(election.is_consistent());
}

#[tokio::test]
async fn test_submit_without_selection_produces_no_receipt() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.open_election("1").await.unwrap();

    let result = client.submit_vote().await;

    assert_matches!(result, Err(UniVoteError::Vote(VoteError::NoSelection)));
    let workflow = client.vote_workflow().unwrap();
    assert!(workflow.receipt().is_none());
    assert_eq!(workflow.state(), &VoteState::Rejected(VoteError::NoSelection));
    assert!(client.banner().is_none());
    assert_eq!(ctx.elections.total_votes().await, 1700);
}

#[tokio::test]
async fn test_second_ballot_is_refused_with_banner() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;

    client.open_election("1").await.unwrap();
    client.select_candidate("1").unwrap();
    client.submit_vote().await.unwrap();

    client.go_home().unwrap();
    client.navigate(Screen::Voting, None).unwrap();
    client.select_candidate("2").unwrap();

    let result = client.submit_vote().await;
    assert_matches!(result, Err(UniVoteError::Vote(VoteError::AlreadyVoted)));
    assert_eq!(client.banner().map(|b| b.screen), Some(Screen::Voting));
    assert_eq!(ctx.elections.total_votes().await, 1701);
}

#[tokio::test]
async fn test_second_ballot_after_signing_in_again_is_refused() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    let first_id = client.current_user().unwrap().id.clone();

    client.open_election("1").await.unwrap();
    client.select_candidate("1").unwrap();
    client.submit_vote().await.unwrap();
    assert_eq!(ctx.elections.total_votes().await, 1701);

    client.logout();
    client.login("student1", "password").await.unwrap();
    assert_eq!(client.current_user().unwrap().id, first_id);

    client.open_election("1").await.unwrap();
    client.select_candidate("2").unwrap();

    assert_matches!(
        client.submit_vote().await,
        Err(UniVoteError::Vote(VoteError::AlreadyVoted))
    );
    assert_eq!(ctx.elections.total_votes().await, 1701);
}

#[tokio::test]
async fn test_completed_election_refuses_votes() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;

    client.open_election("2").await.unwrap();
    client.select_candidate("3").unwrap();

    assert_matches!(
        client.submit_vote().await,
        Err(UniVoteError::Vote(VoteError::Closed))
    );
}

#[tokio::test]
async fn test_voting_screen_needs_an_election() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;

    assert_matches!(
        client.navigate(Screen::Voting, None),
        Err(UniVoteError::Navigation(NavigationError::NoElectionSelected))
    );
    assert_eq!(client.current_screen(), Screen::StudentDashboard);
}

#[tokio::test]
async fn test_logout_from_any_screen() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.open_election("1").await.unwrap();

    client.navigate(Screen::Auth, None).unwrap();

    assert_eq!(client.current_screen(), Screen::Auth);
    assert!(client.current_user().is_none());
    assert!(client.context().selected_election.is_none());
    assert!(client.vote_workflow().is_none());
    assert_matches!(
        client.navigate(Screen::StudentDashboard, None),
        Err(UniVoteError::Navigation(NavigationError::NotAuthenticated))
    );
}
