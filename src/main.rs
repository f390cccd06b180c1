//! UniVote demo
//!
//! Runs a scripted student and admin session against the in-memory services.

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;
use tracing::{info, warn};

use univote::{
    config::Settings,
    models::request::RequestDecision,
    utils::{helpers::{format_election_date, format_request_date}, logging, SystemClock},
    Screen, VotingClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file appender on exit
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", univote::info());

    let mut client = VotingClient::in_memory(settings, Arc::new(SystemClock));

    student_session(&mut client).await?;
    admin_session(&mut client).await?;

    info!("Demo finished");
    Ok(())
}

async fn student_session(client: &mut VotingClient) -> anyhow::Result<()> {
    let user = client.login("student1", "password").await?;
    info!(username = %user.username, role = %user.role, "Signed in");

    let summary = client.dashboard().await?;
    info!(
        active = summary.active.len(),
        completed = summary.completed.len(),
        unread = summary.unread_notifications,
        "Dashboard loaded"
    );

    let Some(election_id) = summary.active.first().map(|o| o.election.id.clone()) else {
        warn!("No active election to vote in");
        return Ok(());
    };

    client.open_election(&election_id).await?;
    if let Some(workflow) = client.vote_workflow() {
        let election = workflow.election();
        info!(
            election = %election.name,
            ends = %format_election_date(election.end_date),
            time_left = %workflow.time_remaining(client.now()),
            "Voting screen open"
        );
        for candidate in &election.candidates {
            info!(candidate = %candidate.name, share = election.vote_percentage(candidate), "Candidate");
        }
    }

    client.select_candidate("2")?;
    let receipt = client.submit_vote().await?;
    info!(candidate = %receipt.candidate_name, election = %receipt.election_name, "Vote confirmed");

    client.go_home()?;
    client.navigate(Screen::RequestElection, None)?;
    let today = client.now().date_naive();
    {
        let form = client.request_workflow_mut()?;
        form.set_name("Sustainability Committee Chair")?;
        form.set_reason("The committee was formed this term and has no elected chair yet")?;
        form.set_dates(today + Duration::days(7), today + Duration::days(14))?;
    }
    let request = client.submit_request().await?;
    info!(
        request_id = %request.request_id,
        from = %format_request_date(request.start_date),
        to = %format_request_date(request.end_date),
        "Election request submitted"
    );

    client.logout();
    Ok(())
}

async fn admin_session(client: &mut VotingClient) -> anyhow::Result<()> {
    client.login("admin1", "password").await?;

    let pending = client.pending_requests().await?;
    info!(count = pending.len(), "Pending election requests");

    if let Some(request) = pending.last() {
        client.resolve_request(&request.id, RequestDecision::Approve).await?;
        info!(name = %request.name, "Request approved");
    }

    let summary = client.dashboard().await?;
    info!(
        pending_elections = summary.pending.len(),
        pending_requests = summary.pending_requests.len(),
        total_votes = summary.total_votes,
        "Admin dashboard loaded"
    );

    client.logout();
    Ok(())
}
