//! Authorization gate
//!
//! Classifies an identity relative to one ticket. Every mutating operation
//! decides allow/deny from this classification.

use super::{Identity, Role, Ticket};

/// How an identity relates to a specific ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAccess {
    /// Superuser or ADMIN role
    AdminLike,
    /// AGENT role, ticket unassigned or held by this agent
    Agent,
    /// CLIENT role and creator of the ticket
    ClientOwner,
    /// Neither of the above: a CLIENT who did not create the ticket, or an
    /// AGENT looking at a ticket another agent holds
    Outsider,
}

impl TicketAccess {
    #[must_use]
    pub fn classify(identity: &Identity, ticket: &Ticket) -> Self {
        if identity.is_superuser {
            return Self::AdminLike;
        }

        match identity.role {
            Role::Admin => Self::AdminLike,
            Role::Agent if ticket.assigned_to.is_none_or(|a| a == identity.id) => Self::Agent,
            Role::Agent => Self::Outsider,
            Role::Client if ticket.created_by == identity.id => Self::ClientOwner,
            Role::Client => Self::Outsider,
        }
    }
}
