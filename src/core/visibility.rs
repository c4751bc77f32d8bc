//! Visibility filter
//!
//! Decides which tickets an identity may list or fetch. Tickets outside the
//! scope are reported as not found, never as forbidden.

use super::{Identity, Role, Ticket, UserId};

/// Set of tickets visible to one identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every ticket
    All,
    /// Unassigned tickets plus those assigned to the given user
    UnassignedOrAssignedTo(UserId),
    /// Tickets created by the given user
    CreatedBy(UserId),
}

impl Scope {
    #[must_use]
    pub const fn for_identity(identity: &Identity) -> Self {
        if identity.is_superuser {
            return Self::All;
        }

        match identity.role {
            Role::Admin => Self::All,
            Role::Agent => Self::UnassignedOrAssignedTo(identity.id),
            Role::Client => Self::CreatedBy(identity.id),
        }
    }

    #[must_use]
    pub fn contains(&self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::UnassignedOrAssignedTo(user) => {
                ticket.assigned_to.is_none_or(|assignee| assignee == *user)
            },
            Self::CreatedBy(user) => ticket.created_by == *user,
        }
    }
}

/// Whether `identity` may see `ticket`
#[must_use]
pub fn can_view(identity: &Identity, ticket: &Ticket) -> bool {
    Scope::for_identity(identity).contains(ticket)
}
