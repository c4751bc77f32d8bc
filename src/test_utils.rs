//! Test utilities for the helpdesk
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::core::{Category, Identity, Role, Ticket, UserId};
use crate::handlers::{CreateTicketRequest, HandlerContext, tickets};
use crate::storage::{CategoryRepository, FileStorage};
use tempfile::TempDir;

/// Test fixture: initialized storage in a temporary directory with one
/// category ready for tickets
pub struct TestDesk {
    pub temp_dir: TempDir,
    pub ctx: HandlerContext,
    pub category: Category,
}

impl TestDesk {
    /// Create a new test desk with initialized storage
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = FileStorage::new(temp_dir.path().join(".helpdesk"));
        storage.init().expect("Failed to initialize storage");

        let category = Category::new("General").expect("Invalid category");
        storage
            .insert_category(&category)
            .expect("Failed to save category");

        Self {
            temp_dir,
            ctx: HandlerContext::new(storage),
            category,
        }
    }

    pub fn client() -> Identity {
        Identity::new(UserId::new(), Role::Client)
    }

    pub fn agent() -> Identity {
        Identity::new(UserId::new(), Role::Agent)
    }

    pub fn admin() -> Identity {
        Identity::new(UserId::new(), Role::Admin)
    }

    /// Build a valid create request in the fixture category
    pub fn ticket_request(&self, title: &str) -> CreateTicketRequest {
        CreateTicketRequest {
            title: title.to_string(),
            description: format!("Description for {title}"),
            category: Some(self.category.id.to_string()),
            priority: None,
        }
    }

    /// Create and save a ticket as `identity`
    pub fn create_ticket(&self, identity: &Identity, title: &str) -> Ticket {
        tickets::create_ticket(&self.ctx, identity, self.ticket_request(title))
            .expect("Failed to create ticket")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::TicketRepository;

    #[test]
    fn test_desk_creation() {
        let desk = TestDesk::new();
        assert!(desk.ctx.storage().is_initialized());
        assert!(desk.temp_dir.path().join(".helpdesk").exists());
    }

    #[test]
    fn test_desk_create_ticket() {
        let desk = TestDesk::new();
        let client = TestDesk::client();
        let ticket = desk.create_ticket(&client, "Fix login bug");

        let tickets = desk.ctx.storage().load_all_tickets().unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id, ticket.id);
        assert_eq!(ticket.category, desk.category.id);
    }
}
