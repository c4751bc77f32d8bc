//! Operation handlers
//!
//! One function per operation. Each takes the caller's [`Identity`]
//! explicitly; there is no ambient "current user". Transports (the HTTP API,
//! the CLI) deserialize their input into the request types defined here and
//! hand the result back to the caller unchanged.
//!
//! [`Identity`]: crate::core::Identity

pub mod categories;
pub mod comments;
pub mod tickets;

use crate::core::{Identity, Ticket, TicketId, visibility};
use crate::error::{HelpdeskError, Result};
use crate::storage::{FileStorage, TicketRepository};
use std::path::Path;

pub use categories::{CategoryPatchRequest, CategoryRequest};
pub use comments::CreateCommentRequest;
pub use tickets::{ChangeStatusRequest, CreateTicketRequest, UpdateTicketRequest};

/// Common context for all handler operations
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub storage: FileStorage,
}

impl HandlerContext {
    /// Create a new handler context over an existing storage handle
    #[must_use]
    pub const fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    /// Open the storage rooted at `path`, failing if it was never initialized
    pub fn open(path: &Path) -> Result<Self> {
        let storage = FileStorage::new(path);
        if !storage.is_initialized() {
            return Err(HelpdeskError::StorageNotInitialized(path.to_path_buf()));
        }
        Ok(Self { storage })
    }

    /// Get storage reference
    #[must_use]
    pub const fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Load a ticket the identity is allowed to see
    ///
    /// Tickets outside the identity's visibility scope are reported as not
    /// found.
    pub fn visible_ticket(&self, identity: &Identity, id: &TicketId) -> Result<Ticket> {
        let ticket = self.storage.load_ticket(id)?;
        ensure_visible(identity, &ticket)?;
        Ok(ticket)
    }
}

/// Fail with NOT_FOUND when `ticket` is outside `identity`'s scope
pub(crate) fn ensure_visible(identity: &Identity, ticket: &Ticket) -> Result<()> {
    if visibility::can_view(identity, ticket) {
        Ok(())
    } else {
        tracing::debug!(
            "Ticket {} hidden from user {} ({})",
            ticket.id.short(),
            identity.id.short(),
            identity.role
        );
        Err(HelpdeskError::not_found("Ticket", ticket.id))
    }
}
