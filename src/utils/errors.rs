//! Error handling for UniVote
//!
//! This module defines the error types used throughout the crate and the
//! classification used to decide how a failure is surfaced to the user.

use thiserror::Error;

use crate::models::request::FieldErrors;

/// Main error type for UniVote operations
#[derive(Error, Debug)]
pub enum UniVoteError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Vote rejected: {0}")]
    Vote(#[from] VoteError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Election request is invalid: {0}")]
    InvalidRequest(FieldErrors),

    #[error("Invalid election: {0}")]
    InvalidElection(String),

    #[error("Election not found: {election_id}")]
    ElectionNotFound { election_id: String },

    #[error("Election request not found: {request_id}")]
    RequestNotFound { request_id: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{operation} timed out after {after_ms}ms")]
    Timeout { operation: String, after_ms: u64 },

    #[error("{operation} was cancelled")]
    Cancelled { operation: String },

    #[error("A {workflow} submission is already in progress")]
    SubmissionInProgress { workflow: String },

    #[error("Service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Login failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter username and password")]
    MissingFields,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Role claim rejected: {0}")]
    InvalidClaim(String),
}

/// Registration form failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please fill in all fields")]
    MissingFields,
}

/// Ballot failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("No candidate selected")]
    NoSelection,

    #[error("Voting ended")]
    Closed,

    #[error("Election is not open for voting")]
    NotActive,

    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("A vote has already been recorded for this user")]
    AlreadyVoted,
}

/// Screen transition failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Invalid screen transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("No election selected for the voting screen")]
    NoElectionSelected,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Dashboard {requested} does not match the signed-in role")]
    WrongDashboard { requested: String },

    #[error("Action is only available on the {expected} screen")]
    NotOnScreen { expected: String },
}

/// Result type alias for UniVote operations
pub type Result<T> = std::result::Result<T, UniVoteError>;

impl UniVoteError {
    /// Check if the user can retry or correct the failed action
    pub fn is_recoverable(&self) -> bool {
        match self {
            UniVoteError::Auth(_) => true,
            UniVoteError::Validation(_) => true,
            UniVoteError::Vote(VoteError::Closed) => false,
            UniVoteError::Vote(VoteError::NotActive) => false,
            UniVoteError::Vote(VoteError::AlreadyVoted) => false,
            UniVoteError::Vote(_) => true,
            UniVoteError::Navigation(_) => true,
            UniVoteError::InvalidRequest(_) => true,
            UniVoteError::InvalidElection(_) => true,
            UniVoteError::ElectionNotFound { .. } => false,
            UniVoteError::RequestNotFound { .. } => false,
            UniVoteError::PermissionDenied(_) => false,
            UniVoteError::Timeout { .. } => true,
            UniVoteError::Cancelled { .. } => true,
            UniVoteError::SubmissionInProgress { .. } => true,
            UniVoteError::Service(_) => true,
            UniVoteError::Config(_) => false,
            UniVoteError::ConfigLoad(_) => false,
            UniVoteError::Toml(_) => false,
            UniVoteError::Token(_) => false,
            UniVoteError::Serialization(_) => false,
            UniVoteError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            UniVoteError::Config(_) | UniVoteError::ConfigLoad(_) | UniVoteError::Toml(_) => {
                ErrorSeverity::Critical
            }
            UniVoteError::Auth(_)
            | UniVoteError::PermissionDenied(_)
            | UniVoteError::Token(_)
            | UniVoteError::Timeout { .. } => ErrorSeverity::Warning,
            UniVoteError::Validation(_)
            | UniVoteError::Vote(_)
            | UniVoteError::InvalidRequest(_)
            | UniVoteError::InvalidElection(_)
            | UniVoteError::Cancelled { .. }
            | UniVoteError::SubmissionInProgress { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether the error belongs next to a form field rather than in a banner
    pub fn is_field_level(&self) -> bool {
        matches!(
            self,
            UniVoteError::InvalidRequest(_) | UniVoteError::Validation(_) | UniVoteError::Vote(VoteError::NoSelection)
        )
    }

    /// Text shown to the user on the screen that started the operation
    pub fn user_message(&self) -> String {
        match self {
            UniVoteError::Auth(e) => e.to_string(),
            UniVoteError::Validation(e) => e.to_string(),
            UniVoteError::Vote(e) => e.to_string(),
            UniVoteError::InvalidRequest(_) => "Please correct the highlighted fields".to_string(),
            UniVoteError::Timeout { .. } => "The server took too long to respond. Please try again.".to_string(),
            UniVoteError::Service(_) => "Something went wrong. Please try again.".to_string(),
            UniVoteError::PermissionDenied(_) => "You are not allowed to do that".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
