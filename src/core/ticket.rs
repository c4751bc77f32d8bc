use super::{CategoryId, UserId};
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

super::uuid_id!(
    /// Identifier of a ticket
    TicketId
);

/// Maximum length of a ticket title
pub const MAX_TITLE_LEN: usize = 200;

/// Lifecycle status of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| HelpdeskError::validation("Invalid status."))
    }
}

/// Urgency of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| {
                HelpdeskError::validation(format!(
                    "Invalid priority: {s}. Must be one of: LOW, MEDIUM, HIGH, CRITICAL"
                ))
            })
    }
}

/// A helpdesk ticket
///
/// `created_by` is fixed at creation to the requesting identity. `status`
/// and `assigned_to` only change through the assignment and transition
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub category: CategoryId,
    pub status: Status,
    pub priority: Priority,
    pub created_by: UserId,
    pub assigned_to: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Create an OPEN, unassigned ticket owned by `created_by`
    #[must_use]
    pub fn new(
        title: String,
        description: String,
        category: CategoryId,
        priority: Priority,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TicketId::new(),
            title,
            description,
            category,
            status: Status::Open,
            priority,
            created_by,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Trim and validate a ticket title
pub fn normalize_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(HelpdeskError::validation("Ticket title cannot be empty."));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(HelpdeskError::validation(format!(
            "Ticket title cannot exceed {MAX_TITLE_LEN} characters."
        )));
    }
    Ok(title.to_string())
}

/// Trim and validate a ticket description
pub fn normalize_description(description: &str) -> Result<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(HelpdeskError::validation(
            "Ticket description cannot be empty.",
        ));
    }
    Ok(description.to_string())
}
