//! Status transition machine
//!
//! ```text
//! OPEN        -> IN_PROGRESS | CLOSED
//! IN_PROGRESS -> RESOLVED    | CLOSED
//! RESOLVED    -> CLOSED      | IN_PROGRESS
//! CLOSED      -> (terminal)
//! ```
//!
//! The edge check runs before the role check, for every role.

use super::{Identity, Status, Ticket, TicketAccess};
use crate::error::{HelpdeskError, Result};

impl Status {
    /// Statuses reachable in one step from `self`
    #[must_use]
    pub const fn next_statuses(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::InProgress, Self::Closed],
            Self::InProgress => &[Self::Resolved, Self::Closed],
            Self::Resolved => &[Self::Closed, Self::InProgress],
            Self::Closed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next_statuses().contains(&target)
    }
}

/// Decide whether `identity` may move `ticket` to `target`
pub fn authorize(identity: &Identity, ticket: &Ticket, target: Status) -> Result<()> {
    if !ticket.status.can_transition_to(target) {
        return Err(HelpdeskError::validation("Invalid status transition."));
    }

    match TicketAccess::classify(identity, ticket) {
        TicketAccess::AdminLike | TicketAccess::Agent => Ok(()),
        TicketAccess::ClientOwner if target == Status::Closed => Ok(()),
        TicketAccess::ClientOwner => Err(HelpdeskError::forbidden(
            "Clients can only close their own tickets.",
        )),
        TicketAccess::Outsider => Err(HelpdeskError::forbidden("Not allowed.")),
    }
}

/// Validate and apply a status change in place
pub fn apply(ticket: &mut Ticket, identity: &Identity, target: Status) -> Result<()> {
    authorize(identity, ticket, target)?;
    ticket.status = target;
    Ok(())
}
