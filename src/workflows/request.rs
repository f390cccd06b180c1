//! Election request workflow
//!
//! Field rules for the "request an election" form and the form's view state.
//! The same [`validate_request`] runs on the client before submission and in
//! the election service on receipt.

use chrono::NaiveDate;

use crate::models::request::{ElectionRequestForm, FieldErrors, RequestField, RequestReceipt};
use crate::utils::errors::{Result, UniVoteError};

pub const MIN_NAME_CHARS: usize = 5;
pub const MIN_REASON_CHARS: usize = 20;

/// Check every field rule. An empty mapping means the form is valid.
pub fn validate_request(form: &ElectionRequestForm, today: NaiveDate, departments: &[String]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        errors.insert(RequestField::Name, "Election name is required");
    } else if form.name.chars().count() < MIN_NAME_CHARS {
        errors.insert(RequestField::Name, "Election name must be at least 5 characters");
    }

    if form.department.trim().is_empty() {
        errors.insert(RequestField::Department, "Please select a department");
    } else if !departments.iter().any(|d| d == &form.department) {
        errors.insert(RequestField::Department, "Please select a valid department");
    }

    if form.reason.trim().is_empty() {
        errors.insert(RequestField::Reason, "Reason for election is required");
    } else if form.reason.chars().count() < MIN_REASON_CHARS {
        errors.insert(
            RequestField::Reason,
            "Please provide a more detailed reason (minimum 20 characters)",
        );
    }

    if form.start_date < today {
        errors.insert(RequestField::StartDate, "Start date cannot be in the past");
    }

    if form.end_date <= form.start_date {
        errors.insert(RequestField::EndDate, "End date must be after start date");
    }

    errors
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Editing,
    Submitting,
    Submitted(RequestReceipt),
}

/// View state of the request form screen
#[derive(Debug, Clone)]
pub struct RequestWorkflow {
    form: ElectionRequestForm,
    errors: FieldErrors,
    state: RequestState,
}

impl RequestWorkflow {
    pub fn new(form: ElectionRequestForm) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            state: RequestState::Editing,
        }
    }

    pub fn form(&self) -> &ElectionRequestForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == RequestState::Submitting
    }

    pub fn receipt(&self) -> Option<&RequestReceipt> {
        match &self.state {
            RequestState::Submitted(receipt) => Some(receipt),
            _ => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.form.name = name.into();
        self.errors.clear_field(RequestField::Name);
        Ok(())
    }

    pub fn set_department(&mut self, department: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.form.department = department.into();
        self.errors.clear_field(RequestField::Department);
        Ok(())
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.form.reason = reason.into();
        self.errors.clear_field(RequestField::Reason);
        Ok(())
    }

    /// Changing either date clears both date errors
    pub fn set_dates(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
        self.ensure_editable()?;
        self.form.start_date = start_date;
        self.form.end_date = end_date;
        self.errors.clear_field(RequestField::StartDate);
        self.errors.clear_field(RequestField::EndDate);
        Ok(())
    }

    /// Validate and enter `Submitting`. On failure the errors are kept for display.
    pub fn begin_submit(&mut self, today: NaiveDate, departments: &[String]) -> Result<ElectionRequestForm> {
        self.ensure_editable()?;

        self.errors = validate_request(&self.form, today, departments);
        if !self.errors.is_empty() {
            return Err(UniVoteError::InvalidRequest(self.errors.clone()));
        }

        self.state = RequestState::Submitting;
        Ok(self.form.clone())
    }

    pub fn complete(&mut self, receipt: RequestReceipt) {
        self.state = RequestState::Submitted(receipt);
    }

    /// Back to editing after a failed submission. Field errors reported by the service are shown.
    pub fn fail(&mut self, error: &UniVoteError) {
        if let UniVoteError::InvalidRequest(errors) = error {
            self.errors = errors.clone();
        }
        self.state = RequestState::Editing;
    }

    fn ensure_editable(&self) -> Result<()> {
        match self.state {
            RequestState::Editing => Ok(()),
            RequestState::Submitting => Err(UniVoteError::SubmissionInProgress {
                workflow: "election request".to_string(),
            }),
            RequestState::Submitted(_) => Err(UniVoteError::InvalidElection(
                "Request has already been submitted".to_string(),
            )),
        }
    }
}
