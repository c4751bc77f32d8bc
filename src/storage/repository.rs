use crate::core::{Category, CategoryId, Comment, Ticket, TicketId};
use crate::error::Result;

/// Repository trait for category storage operations
///
/// Categories are referenced by tickets: deleting a category that any ticket
/// still points at fails with an integrity error.
pub trait CategoryRepository: Send + Sync {
    /// Inserts a new category; names must be unique
    fn insert_category(&self, category: &Category) -> Result<()>;

    /// Loads a category by ID
    fn load_category(&self, id: &CategoryId) -> Result<Category>;

    /// Loads all categories ordered by name
    fn load_all_categories(&self) -> Result<Vec<Category>>;

    /// Applies `update` to the stored category and persists the result
    ///
    /// Nothing is written when `update` fails or the new name collides.
    fn update_category<F>(&self, id: &CategoryId, update: F) -> Result<Category>
    where
        F: FnOnce(&mut Category) -> Result<()>;

    /// Deletes a category that no ticket references
    fn delete_category(&self, id: &CategoryId) -> Result<()>;

    /// Whether another category already uses `name`
    ///
    /// `except` excludes one category from the check, so renaming a category
    /// to its own name is not a collision.
    fn category_name_taken(&self, name: &str, except: Option<&CategoryId>) -> Result<bool>;
}

/// Repository trait for ticket storage operations
///
/// Tickets own their comment thread: deleting a ticket deletes its comments.
pub trait TicketRepository: Send + Sync {
    /// Inserts a new ticket; its category must exist
    fn insert_ticket(&self, ticket: &Ticket) -> Result<()>;

    /// Loads a ticket by ID
    fn load_ticket(&self, id: &TicketId) -> Result<Ticket>;

    /// Loads all tickets ordered by creation time
    fn load_all_tickets(&self) -> Result<Vec<Ticket>>;

    /// Finds tickets matching a predicate
    fn find_tickets<P>(&self, predicate: P) -> Result<Vec<Ticket>>
    where
        P: Fn(&Ticket) -> bool,
    {
        let tickets = self.load_all_tickets()?;
        Ok(tickets.into_iter().filter(|t| predicate(t)).collect())
    }

    /// Applies `update` to the freshest stored ticket and persists it
    ///
    /// The read, `update`, `updated_at` stamp and write happen under one
    /// write lock. Nothing is written when `update` fails.
    fn update_ticket<F>(&self, id: &TicketId, update: F) -> Result<Ticket>
    where
        F: FnOnce(&mut Ticket) -> Result<()>;

    /// Deletes a ticket together with its comments
    fn delete_ticket(&self, id: &TicketId) -> Result<()>;
}

/// Repository trait for ticket comment threads
pub trait CommentRepository: Send + Sync {
    /// Appends a comment to its ticket's thread
    fn append_comment(&self, comment: &Comment) -> Result<()>;

    /// Loads a ticket's comments ordered by `created_at` ascending
    fn load_comments(&self, ticket: &TicketId) -> Result<Vec<Comment>>;
}
