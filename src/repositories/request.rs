//! Pending election request queue

use crate::models::request::{ElectionRequest, RequestDecision, RequestStatus};
use crate::utils::errors::{Result, UniVoteError};

#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    requests: Vec<ElectionRequest>,
}

impl RequestQueue {
    pub fn new(requests: Vec<ElectionRequest>) -> Self {
        Self { requests }
    }

    pub fn push(&mut self, request: ElectionRequest) {
        self.requests.push(request);
    }

    /// Requests still awaiting a decision, in queue order
    pub fn pending(&self) -> Vec<&ElectionRequest> {
        self.requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .collect()
    }

    /// Record an admin decision and take the request out of the queue.
    /// Only pending requests can be resolved.
    pub fn resolve(&mut self, request_id: &str, decision: RequestDecision) -> Result<ElectionRequest> {
        let index = self
            .requests
            .iter()
            .position(|r| r.id == request_id && r.status == RequestStatus::Pending)
            .ok_or_else(|| UniVoteError::RequestNotFound {
                request_id: request_id.to_string(),
            })?;

        let mut request = self.requests.remove(index);
        request.status = match decision {
            RequestDecision::Approve => RequestStatus::Approved,
            RequestDecision::Reject => RequestStatus::Rejected,
        };
        Ok(request)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
