//! Election repository implementation

use crate::models::election::{Candidate, Election, ElectionStatus};
use crate::utils::errors::{Result, UniVoteError, VoteError};

/// Insertion-ordered election collection. Exclusive owner of election and candidate records.
#[derive(Debug, Clone, Default)]
pub struct ElectionRepository {
    elections: Vec<Election>,
}

impl ElectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing records, reconciling each election's total with its candidates
    pub fn from_elections(elections: Vec<Election>) -> Self {
        let mut repository = Self::new();
        for election in elections {
            repository.insert(election);
        }
        repository
    }

    /// Add an election. Candidate counts are authoritative, so the total is recomputed.
    pub fn insert(&mut self, mut election: Election) {
        if election.reconcile_totals() {
            tracing::warn!(
                election_id = %election.id,
                total_votes = election.total_votes,
                "Election total disagreed with candidate counts and was reconciled"
            );
        }
        self.elections.push(election);
    }

    pub fn all(&self) -> &[Election] {
        &self.elections
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Election> {
        self.elections.iter().find(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Result<&Election> {
        self.find_by_id(id).ok_or_else(|| UniVoteError::ElectionNotFound {
            election_id: id.to_string(),
        })
    }

    /// Stable filter, preserves insertion order
    pub fn list_by_status(&self, status: ElectionStatus) -> Vec<&Election> {
        self.elections.iter().filter(|e| e.status == status).collect()
    }

    pub fn sum_total_votes(&self) -> u64 {
        self.elections.iter().map(|e| e.total_votes).sum()
    }

    /// Candidate with the most votes in the given election
    pub fn leading_candidate(&self, election_id: &str) -> Result<Option<&Candidate>> {
        Ok(self.get(election_id)?.leading_candidate())
    }

    /// Increment one candidate and the election total in a single update
    pub fn record_vote(&mut self, election_id: &str, candidate_id: &str) -> Result<(&Election, &Candidate)> {
        let index = self
            .elections
            .iter()
            .position(|e| e.id == election_id)
            .ok_or_else(|| UniVoteError::ElectionNotFound {
                election_id: election_id.to_string(),
            })?;

        self.elections[index].record_vote(candidate_id)?;

        let election = &self.elections[index];
        let candidate = election
            .candidate(candidate_id)
            .ok_or_else(|| VoteError::UnknownCandidate(candidate_id.to_string()))?;
        Ok((election, candidate))
    }

    pub fn len(&self) -> usize {
        self.elections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elections.is_empty()
    }
}
