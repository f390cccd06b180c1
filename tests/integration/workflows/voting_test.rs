//! Voting screen workflow tests
//!
//! Countdown lifetime, service deadlines and cancellation. Timer tests run on
//! a paused tokio clock.

use std::time::Duration;

use assert_matches::assert_matches;
use univote::models::election::Election;
use univote::repositories::seed;
use univote::utils::errors::VoteError;
use univote::workflows::{TimeRemaining, VoteState};
use univote::{Screen, UniVoteError};

use crate::helpers::test_now;
use crate::integration::{setup_integration_test, setup_slow_election_test};

/// The open demo election, taken straight from the seed so a slow service is not involved
fn active_election() -> Election {
    seed::demo_elections(test_now()).remove(0)
}

#[tokio::test(start_paused = true)]
async fn test_countdown_refreshes_while_screen_is_open() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.open_election("1").await.unwrap();

    let mut countdown = client.vote_workflow().unwrap().countdown().unwrap().clone();
    assert_eq!(countdown.current().to_string(), "3d 0h 0m");

    ctx.clock.advance(chrono::Duration::minutes(61));
    let refreshed = countdown.changed().await;

    assert_eq!(refreshed.map(|r| r.to_string()), Some("2d 22h 59m".to_string()));
    assert_eq!(
        client.vote_workflow().unwrap().time_remaining(client.now()).to_string(),
        "2d 22h 59m"
    );
}

#[tokio::test(start_paused = true)]
async fn test_countdown_stops_when_screen_is_left() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.open_election("1").await.unwrap();

    let mut countdown = client.vote_workflow().unwrap().countdown().unwrap().clone();
    assert!(countdown.is_running());

    client.go_home().unwrap();

    assert_eq!(countdown.changed().await, None);
    assert!(!countdown.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_countdown_reaches_voting_ended() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.open_election("1").await.unwrap();
    client.select_candidate("1").unwrap();

    let mut countdown = client.vote_workflow().unwrap().countdown().unwrap().clone();
    ctx.clock.advance(chrono::Duration::days(3));

    assert_eq!(countdown.changed().await, Some(TimeRemaining::Ended));
    assert_matches!(
        client.submit_vote().await,
        Err(UniVoteError::Vote(VoteError::Closed))
    );
}

#[tokio::test(start_paused = true)]
async fn test_slow_vote_times_out_and_returns_to_selecting() {
    let ctx = setup_slow_election_test(20_000, 10_000);
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::Voting, Some(active_election())).unwrap();
    client.select_candidate("2").unwrap();

    let result = client.submit_vote().await;

    assert_matches!(result, Err(UniVoteError::Timeout { after_ms: 10_000, .. }));
    let workflow = client.vote_workflow().unwrap();
    assert_eq!(workflow.state(), &VoteState::Selecting);
    assert_eq!(workflow.selected_candidate().map(|c| c.id.as_str()), Some("2"));

    let banner = client.banner().unwrap();
    assert_eq!(banner.screen, Screen::Voting);
    assert_eq!(banner.message, "The server took too long to respond. Please try again.");
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_vote_is_discarded() {
    let ctx = setup_slow_election_test(5_000, 10_000);
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::Voting, Some(active_election())).unwrap();
    client.select_candidate("1").unwrap();

    let canceller = client.canceller();
    let cancel = async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        canceller.cancel()
    };
    let (result, cancelled) = tokio::join!(client.submit_vote(), cancel);

    assert_matches!(result, Err(UniVoteError::Cancelled { .. }));
    assert_eq!(cancelled, 1);
    assert!(client.banner().is_none());
    assert_eq!(client.vote_workflow().unwrap().state(), &VoteState::Selecting);
    assert_eq!(ctx.elections.total_votes().await, 1700);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_vote_can_be_resubmitted() {
    let ctx = setup_slow_election_test(2_000, 10_000);
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::Voting, Some(active_election())).unwrap();
    client.select_candidate("2").unwrap();

    let abandoned = tokio::time::timeout(Duration::from_millis(500), client.submit_vote()).await;

    assert!(abandoned.is_err());
    assert_eq!(client.vote_workflow().unwrap().state(), &VoteState::Selecting);
    assert_eq!(client.canceller().cancel(), 0);
    assert_eq!(ctx.elections.total_votes().await, 1700);

    let receipt = client.submit_vote().await.unwrap();
    assert_eq!(receipt.candidate_name, "Mike Chen");
    assert_eq!(ctx.elections.total_votes().await, 1701);
}
