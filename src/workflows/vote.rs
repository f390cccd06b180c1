//! Vote submission workflow
//!
//! `Selecting -> Submitting -> Confirmed`, with `Rejected` reachable from
//! `Selecting` when nothing is selected or the election has closed. A failed or
//! cancelled submission returns to `Selecting` with the selection kept.

use std::fmt;

use chrono::{DateTime, Utc};

use super::countdown::Countdown;
use crate::models::election::{Candidate, Election};
use crate::models::request::VoteReceipt;
use crate::utils::errors::{Result, UniVoteError, VoteError};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Time left until an election closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    Open { days: i64, hours: i64, minutes: i64 },
    Ended,
}

impl TimeRemaining {
    /// Whole days, hours and minutes between `now` and `end`; `Ended` once `end <= now`
    pub fn compute(now: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let seconds = end.signed_duration_since(now).num_seconds();
        if end <= now {
            return TimeRemaining::Ended;
        }

        TimeRemaining::Open {
            days: seconds / DAY,
            hours: (seconds % DAY) / HOUR,
            minutes: (seconds % HOUR) / MINUTE,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, TimeRemaining::Ended)
    }

    /// Remaining whole minutes, zero once ended
    pub fn total_minutes(&self) -> i64 {
        match self {
            TimeRemaining::Open { days, hours, minutes } => days * 24 * 60 + hours * 60 + minutes,
            TimeRemaining::Ended => 0,
        }
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeRemaining::Ended => f.write_str("Voting ended"),
            TimeRemaining::Open { days, hours, minutes } if days > 0 => {
                write!(f, "{}d {}h {}m", days, hours, minutes)
            }
            TimeRemaining::Open { hours, minutes, .. } if hours > 0 => write!(f, "{}h {}m", hours, minutes),
            TimeRemaining::Open { minutes, .. } => write!(f, "{}m", minutes),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoteState {
    Selecting,
    Submitting,
    Confirmed(VoteReceipt),
    Rejected(VoteError),
}

/// View state of the voting screen
#[derive(Debug)]
pub struct VoteWorkflow {
    election: Election,
    selected: Option<String>,
    state: VoteState,
    countdown: Option<Countdown>,
}

impl VoteWorkflow {
    pub fn new(election: Election) -> Self {
        Self {
            election,
            selected: None,
            state: VoteState::Selecting,
            countdown: None,
        }
    }

    pub fn election(&self) -> &Election {
        &self.election
    }

    pub fn state(&self) -> &VoteState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == VoteState::Submitting
    }

    pub fn attach_countdown(&mut self, countdown: Countdown) {
        self.countdown = Some(countdown);
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Countdown shown on the screen; recomputed from `now` when no countdown task is attached
    pub fn time_remaining(&self, now: DateTime<Utc>) -> TimeRemaining {
        match &self.countdown {
            Some(countdown) => countdown.current(),
            None => TimeRemaining::compute(now, self.election.end_date),
        }
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.selected
            .as_deref()
            .and_then(|id| self.election.candidate(id))
    }

    /// Pick a candidate. Allowed until a submission starts or is confirmed.
    pub fn select_candidate(&mut self, candidate_id: &str) -> Result<()> {
        match self.state {
            VoteState::Submitting => return Err(self.in_progress()),
            VoteState::Confirmed(_) => return Err(VoteError::AlreadyVoted.into()),
            _ => {}
        }
        if self.election.candidate(candidate_id).is_none() {
            return Err(VoteError::UnknownCandidate(candidate_id.to_string()).into());
        }

        self.selected = Some(candidate_id.to_string());
        self.state = VoteState::Selecting;
        Ok(())
    }

    /// Check the ballot and enter `Submitting`. Returns the candidate to send.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Result<String> {
        match self.state {
            VoteState::Submitting => return Err(self.in_progress()),
            VoteState::Confirmed(_) => return Err(VoteError::AlreadyVoted.into()),
            _ => {}
        }

        let candidate_id = match &self.selected {
            Some(id) => id.clone(),
            None => return Err(self.reject(VoteError::NoSelection)),
        };
        if self.time_remaining(now).is_ended() {
            return Err(self.reject(VoteError::Closed));
        }

        self.state = VoteState::Submitting;
        Ok(candidate_id)
    }

    /// Accept the service's receipt
    pub fn complete(&mut self, receipt: VoteReceipt) {
        self.state = VoteState::Confirmed(receipt);
    }

    /// Leave `Submitting` after a failed call. Ballot rejections are kept as `Rejected`;
    /// anything else returns to `Selecting` so the user can try again.
    pub fn fail(&mut self, error: &UniVoteError) {
        self.state = match error {
            UniVoteError::Vote(reason) => VoteState::Rejected(reason.clone()),
            _ => VoteState::Selecting,
        };
    }

    pub fn receipt(&self) -> Option<&VoteReceipt> {
        match &self.state {
            VoteState::Confirmed(receipt) => Some(receipt),
            _ => None,
        }
    }

    fn reject(&mut self, reason: VoteError) -> UniVoteError {
        self.state = VoteState::Rejected(reason.clone());
        reason.into()
    }

    fn in_progress(&self) -> UniVoteError {
        UniVoteError::SubmissionInProgress {
            workflow: "vote".to_string(),
        }
    }
}
