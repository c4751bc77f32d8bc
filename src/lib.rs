//! helpdesk - A helpdesk ticketing backend
//!
//! Clients submit issues, agents triage and resolve them, admins have full
//! control. This crate provides:
//! - Role-based ticket visibility
//! - An assignment protocol for agents claiming tickets
//! - A status transition state machine gated by role
//! - Threaded comments on tickets
//! - A file-backed record store with referential-integrity rules
//! - An HTTP API (feature `api`) and an operator CLI

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]

//! # Concurrent Safety
//!
//! Every mutation is a single read-check-write performed under the store's
//! write lock, an advisory lock file under the storage root shared by every
//! process using it. Assignment and status changes re-check their
//! preconditions against the freshest stored ticket inside that lock, so two
//! agents racing to claim the same ticket cannot both succeed, even through
//! separate servers.
//!
//! # Example
//!
//! ```rust,no_run
//! use helpdesk::core::{Identity, Role, UserId};
//! use helpdesk::handlers::{tickets, CreateTicketRequest, HandlerContext};
//!
//! # fn main() -> helpdesk::Result<()> {
//! let ctx = HandlerContext::open(std::path::Path::new(".helpdesk"))?;
//! let client = Identity::new(UserId::new(), Role::Client);
//!
//! let ticket = tickets::create_ticket(&ctx, &client, CreateTicketRequest {
//!     title: "VPN drops every hour".to_string(),
//!     description: "Since the last client update".to_string(),
//!     category: Some("6f1c7d4e-2b1a-4c55-9f0e-3a7d2c1b9e8f".to_string()),
//!     priority: None,
//! })?;
//!
//! let agent = Identity::new(UserId::new(), Role::Agent);
//! let claimed = tickets::assign_to_me(&ctx, &agent, &ticket.id)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod handlers;
pub mod storage;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{HelpdeskError, Result};
