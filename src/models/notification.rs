//! Notification model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::errors::UniVoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Election,
    Result,
    General,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Election => "election",
            NotificationKind::Result => "result",
            NotificationKind::General => "general",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Notification list filter: `all`, `unread`, or a notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Kind(NotificationKind),
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !notification.read,
            NotificationFilter::Kind(kind) => notification.kind == *kind,
        }
    }
}

impl fmt::Display for NotificationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationFilter::All => f.write_str("all"),
            NotificationFilter::Unread => f.write_str("unread"),
            NotificationFilter::Kind(kind) => f.write_str(kind.as_str()),
        }
    }
}

impl FromStr for NotificationFilter {
    type Err = UniVoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(NotificationFilter::All),
            "unread" => Ok(NotificationFilter::Unread),
            "election" => Ok(NotificationFilter::Kind(NotificationKind::Election)),
            "result" => Ok(NotificationFilter::Kind(NotificationKind::Result)),
            "general" => Ok(NotificationFilter::Kind(NotificationKind::General)),
            other => Err(UniVoteError::Service(format!("Unknown notification filter: {}", other))),
        }
    }
}
