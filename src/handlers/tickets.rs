//! Ticket operations: list, fetch, create, update, assign, change status

use super::{HandlerContext, ensure_visible};
use crate::core::ticket::{normalize_description, normalize_title};
use crate::core::{
    CategoryId, Identity, Priority, Status, Ticket, TicketId, assignment, transition, visibility,
};
use crate::error::{HelpdeskError, Result};
use crate::storage::TicketRepository;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Fields accepted when creating a ticket
///
/// Anything else in the payload (`created_by`, `status`, `assigned_to`, ...)
/// is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub priority: Option<String>,
}

/// Fields accepted when updating a ticket
///
/// `status` and `assigned_to` are captured only to reject them: those fields
/// change through their dedicated operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<Value>,
    pub assigned_to: Option<Value>,
}

/// Body of a status change request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangeStatusRequest {
    pub status: Option<Value>,
}

impl ChangeStatusRequest {
    #[must_use]
    pub fn new(status: Status) -> Self {
        Self {
            status: Some(Value::String(status.as_str().to_string())),
        }
    }

    /// Parse the requested status; anything but a known value is invalid
    pub fn target(&self) -> Result<Status> {
        self.status
            .as_ref()
            .and_then(Value::as_str)
            .ok_or_else(|| HelpdeskError::validation("Invalid status."))?
            .parse()
    }
}

fn parse_category(raw: &str) -> Result<CategoryId> {
    CategoryId::parse_str(raw.trim())
        .map_err(|_| HelpdeskError::validation(format!("Invalid category reference: {raw}")))
}

/// List every ticket visible to `identity`, oldest first
pub fn list_tickets(ctx: &HandlerContext, identity: &Identity) -> Result<Vec<Ticket>> {
    let scope = visibility::Scope::for_identity(identity);
    ctx.storage.find_tickets(|ticket| scope.contains(ticket))
}

/// Fetch one ticket within `identity`'s visibility scope
pub fn get_ticket(ctx: &HandlerContext, identity: &Identity, id: &TicketId) -> Result<Ticket> {
    ctx.visible_ticket(identity, id)
}

/// Create a ticket owned by `identity`
pub fn create_ticket(
    ctx: &HandlerContext,
    identity: &Identity,
    request: CreateTicketRequest,
) -> Result<Ticket> {
    let title = normalize_title(&request.title)?;
    let description = normalize_description(&request.description)?;
    let category = request
        .category
        .as_deref()
        .ok_or_else(|| HelpdeskError::validation("Ticket category is required."))
        .and_then(parse_category)?;
    let priority = request
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?
        .unwrap_or_default();

    let ticket = Ticket::new(title, description, category, priority, identity.id);
    ctx.storage.insert_ticket(&ticket)?;

    info!(
        "Ticket {} created by {} ({})",
        ticket.id.short(),
        identity.id.short(),
        identity.role
    );
    Ok(ticket)
}

/// Update the descriptive fields of a visible ticket
pub fn update_ticket(
    ctx: &HandlerContext,
    identity: &Identity,
    id: &TicketId,
    request: UpdateTicketRequest,
) -> Result<Ticket> {
    ctx.visible_ticket(identity, id)?;

    if request.status.is_some() {
        return Err(HelpdeskError::validation(
            "status can only change through change_status.",
        ));
    }
    if request.assigned_to.is_some() {
        return Err(HelpdeskError::validation(
            "assignment can only change through assign_to_me.",
        ));
    }

    let title = request.title.as_deref().map(normalize_title).transpose()?;
    let description = request
        .description
        .as_deref()
        .map(normalize_description)
        .transpose()?;
    let category = request.category.as_deref().map(parse_category).transpose()?;
    let priority = request
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?;

    let ticket = ctx.storage.update_ticket(id, |ticket| {
        ensure_visible(identity, ticket)?;
        if let Some(title) = title {
            ticket.title = title;
        }
        if let Some(description) = description {
            ticket.description = description;
        }
        if let Some(category) = category {
            ticket.category = category;
        }
        if let Some(priority) = priority {
            ticket.priority = priority;
        }
        Ok(())
    })?;

    info!("Ticket {} updated by {}", ticket.id.short(), identity.id.short());
    Ok(ticket)
}

/// Claim a ticket for `identity`
///
/// The ticket is looked up outside the visibility scope: an agent asking for
/// a ticket another agent holds gets a conflict, not a miss. Clients are
/// refused before anything else. The conflict check runs against the stored
/// ticket inside the write, so of two agents racing for the same unassigned
/// ticket only one succeeds.
pub fn assign_to_me(ctx: &HandlerContext, identity: &Identity, id: &TicketId) -> Result<Ticket> {
    let ticket = ctx
        .storage
        .load_ticket(id)
        .and_then(|_| assignment::authorize(identity))
        .and_then(|()| ctx.storage.update_ticket(id, |ticket| assignment::claim(ticket, identity)))
        .inspect_err(|e| {
            warn!(
                "Assignment of ticket {} to {} refused: {e}",
                id.short(),
                identity.id.short()
            );
        })?;

    info!(
        "Ticket {} assigned to {} (status {})",
        ticket.id.short(),
        identity.id.short(),
        ticket.status
    );
    Ok(ticket)
}

/// Move a ticket to a new status
///
/// Order of checks: existence (NOT_FOUND), status value (VALIDATION), edge
/// validity (VALIDATION), role (FORBIDDEN). Identities outside the ticket's
/// scope are refused by the role check.
pub fn change_status(
    ctx: &HandlerContext,
    identity: &Identity,
    id: &TicketId,
    request: &ChangeStatusRequest,
) -> Result<Ticket> {
    let current = ctx.storage.load_ticket(id)?;
    let target = request.target()?;

    let ticket = ctx
        .storage
        .update_ticket(id, |ticket| transition::apply(ticket, identity, target))
        .inspect_err(|e| {
            warn!(
                "Status change {} -> {target} on ticket {} refused for {}: {e}",
                current.status,
                id.short(),
                identity.id.short()
            );
        })?;

    info!(
        "Ticket {} moved {} -> {} by {}",
        ticket.id.short(),
        current.status,
        ticket.status,
        identity.id.short()
    );
    Ok(ticket)
}
