//! Election request model
//!
//! Requests are proposed elections waiting in the admin approval queue.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fields of the request form that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RequestField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "department")]
    Department,
    #[serde(rename = "reason")]
    Reason,
    #[serde(rename = "startDate")]
    StartDate,
    #[serde(rename = "endDate")]
    EndDate,
}

impl RequestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::Name => "name",
            RequestField::Department => "department",
            RequestField::Reason => "reason",
            RequestField::StartDate => "startDate",
            RequestField::EndDate => "endDate",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to message. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<RequestField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: RequestField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: RequestField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: RequestField) {
        self.0.remove(&field);
    }

    pub fn contains(&self, field: RequestField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = RequestField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Draft of the "request an election" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRequestForm {
    pub name: String,
    pub university: String,
    pub department: String,
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ElectionRequestForm {
    /// Blank form prefilled the way the screen opens: requester's university and department, both dates today
    pub fn for_requester(university: &str, department: &str, today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            university: university.to_string(),
            department: department.to_string(),
            reason: String::new(),
            start_date: today,
            end_date: today,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Approve,
    Reject,
}

/// Entry in the admin approval queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRequest {
    pub id: String,
    pub name: String,
    pub requester: String,
    pub department: String,
    pub reason: String,
    pub submitted_date: NaiveDate,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: RequestStatus,
}

/// Confirmation echoed back after a request is queued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestReceipt {
    pub request_id: String,
    pub name: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Confirmed,
}

/// Confirmation of an accepted ballot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub election_id: String,
    pub election_name: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub timestamp: DateTime<Utc>,
    pub status: ReceiptStatus,
}
