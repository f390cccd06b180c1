//! Election and candidate models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{UniVoteError, VoteError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionStatus {
    Pending,
    Active,
    Completed,
}

impl ElectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectionStatus::Pending => "pending",
            ElectionStatus::Active => "active",
            ElectionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ElectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElectionStatus {
    type Err = UniVoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ElectionStatus::Pending),
            "active" => Ok(ElectionStatus::Active),
            "completed" => Ok(ElectionStatus::Completed),
            other => Err(UniVoteError::InvalidElection(format!("Unknown status: {}", other))),
        }
    }
}

/// A contestant, owned by exactly one election
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub manifesto: String,
    pub votes: u64,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub university: String,
    pub department: String,
    pub status: ElectionStatus,
    pub total_votes: u64,
    pub candidates: Vec<Candidate>,
}

impl Election {
    pub fn candidate(&self, candidate_id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == candidate_id)
    }

    /// Sum of the candidates' counts
    pub fn tallied_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.votes).sum()
    }

    /// `total_votes == sum(candidate.votes)`
    pub fn is_consistent(&self) -> bool {
        self.total_votes == self.tallied_votes()
    }

    /// Make `total_votes` agree with the candidate counts, which are authoritative
    pub fn reconcile_totals(&mut self) -> bool {
        let tallied = self.tallied_votes();
        let changed = tallied != self.total_votes;
        self.total_votes = tallied;
        changed
    }

    /// Candidate with the highest count. Ties go to the earliest candidate in list order.
    pub fn leading_candidate(&self) -> Option<&Candidate> {
        self.candidates
            .iter()
            .fold(None, |best: Option<&Candidate>, current| match best {
                Some(prev) if prev.votes >= current.votes => Some(prev),
                _ => Some(current),
            })
    }

    /// Share of the total in percent, rounded to one decimal place. Zero when no votes were cast.
    pub fn vote_percentage(&self, candidate: &Candidate) -> f64 {
        if self.total_votes == 0 {
            return 0.0;
        }
        let raw = candidate.votes as f64 / self.total_votes as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }

    /// Turnout towards `target`, capped at 100
    pub fn participation_progress(&self, target: u64) -> f64 {
        if target == 0 {
            return 100.0;
        }
        (self.total_votes as f64 / target as f64 * 100.0).min(100.0)
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ElectionStatus::Active && self.end_date > now
    }

    /// Record one ballot. Candidate count and election total move together.
    pub fn record_vote(&mut self, candidate_id: &str) -> Result<&Candidate, VoteError> {
        let index = self
            .candidates
            .iter()
            .position(|c| c.id == candidate_id)
            .ok_or_else(|| VoteError::UnknownCandidate(candidate_id.to_string()))?;

        self.candidates[index].votes += 1;
        self.total_votes += 1;
        Ok(&self.candidates[index])
    }
}

/// Candidate row of the admin "create election" form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub manifesto: String,
    pub avatar: Option<String>,
}

/// Admin "create election" form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewElection {
    pub name: String,
    pub description: String,
    pub university: String,
    pub department: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub candidates: Vec<NewCandidate>,
}

impl NewElection {
    /// Checks the form and drops blank candidate rows
    pub fn validated(mut self) -> Result<Self, UniVoteError> {
        if self.name.trim().is_empty() {
            return Err(UniVoteError::InvalidElection("Election name is required".to_string()));
        }
        if self.end_date <= self.start_date {
            return Err(UniVoteError::InvalidElection(
                "End date must be after start date".to_string(),
            ));
        }

        self.candidates.retain(|c| !c.name.trim().is_empty());
        if self.candidates.is_empty() {
            return Err(UniVoteError::InvalidElection(
                "At least one candidate is required".to_string(),
            ));
        }

        Ok(self)
    }
}
