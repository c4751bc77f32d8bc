//! Assignment protocol
//!
//! An agent or admin claims a ticket that is unassigned or already theirs.
//! Claiming an OPEN ticket moves it to IN_PROGRESS.

use super::{Identity, Status, Ticket};
use crate::error::{HelpdeskError, Result};

/// Check that `identity` may claim tickets at all
pub fn authorize(identity: &Identity) -> Result<()> {
    if identity.is_staff() {
        Ok(())
    } else {
        Err(HelpdeskError::forbidden("Only agents can assign tickets."))
    }
}

/// Assign `ticket` to `identity`
///
/// Must run against the freshest stored copy of the ticket, inside the same
/// write that persists the result. Re-claiming a ticket already held by the
/// same identity succeeds and leaves it unchanged.
pub fn claim(ticket: &mut Ticket, identity: &Identity) -> Result<()> {
    authorize(identity)?;

    if ticket
        .assigned_to
        .is_some_and(|assignee| assignee != identity.id)
    {
        return Err(HelpdeskError::conflict("Ticket is already assigned."));
    }

    ticket.assigned_to = Some(identity.id);
    if ticket.status == Status::Open {
        ticket.status = Status::InProgress;
    }

    Ok(())
}
