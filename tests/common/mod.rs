//! Shared fixtures for integration tests

#![allow(dead_code)]

use helpdesk::core::{Category, Identity, Role, Ticket, UserId};
use helpdesk::handlers::{CreateTicketRequest, HandlerContext, tickets};
use helpdesk::storage::{CategoryRepository, FileStorage};
use tempfile::TempDir;

/// Initialized storage in a temporary directory with one category
pub struct Desk {
    pub temp_dir: TempDir,
    pub ctx: HandlerContext,
    pub category: Category,
}

impl Desk {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = FileStorage::new(temp_dir.path().join(".helpdesk"));
        storage.init().expect("Failed to initialize storage");

        let category = Category::new("Support").expect("Invalid category");
        storage
            .insert_category(&category)
            .expect("Failed to save category");

        Self {
            temp_dir,
            ctx: HandlerContext::new(storage),
            category,
        }
    }

    pub fn create_ticket(&self, identity: &Identity, title: &str) -> Ticket {
        tickets::create_ticket(
            &self.ctx,
            identity,
            CreateTicketRequest {
                title: title.to_string(),
                description: format!("Description for {title}"),
                category: Some(self.category.id.to_string()),
                priority: None,
            },
        )
        .expect("Failed to create ticket")
    }
}

pub fn identity(role: Role) -> Identity {
    Identity::new(UserId::new(), role)
}
