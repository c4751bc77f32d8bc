use super::{TicketId, UserId};
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

super::uuid_id!(
    /// Identifier of a comment
    CommentId
);

/// An immutable remark on a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub ticket: TicketId,
    pub author: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment, trimming the body and rejecting empty text
    pub fn new(ticket: TicketId, author: UserId, body: &str) -> Result<Self> {
        let body = body.trim();
        if body.is_empty() {
            return Err(HelpdeskError::validation("Comment cannot be empty."));
        }

        Ok(Self {
            id: CommentId::new(),
            ticket,
            author,
            body: body.to_string(),
            created_at: Utc::now(),
        })
    }
}
