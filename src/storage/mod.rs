//! Persistent record store
//!
//! The repository traits describe the storage contract the operation layer
//! relies on, including the ownership rules between records:
//! - a ticket owns its comments (deleting the ticket deletes them)
//! - a ticket references its category (a referenced category cannot be deleted)

mod file;
mod lock;
mod repository;

pub use file::FileStorage;
pub use repository::{CategoryRepository, CommentRepository, TicketRepository};
