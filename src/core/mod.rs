//! Core domain model and lifecycle rules
//!
//! Records (`Category`, `Ticket`, `Comment`) and the caller `Identity` live
//! here, together with the decision logic that operates on them:
//! - [`access`] classifies an identity against a ticket
//! - [`visibility`] decides which tickets an identity may see
//! - [`assignment`] claims a ticket for an agent
//! - [`transition`] validates and applies status changes

pub mod access;
pub mod assignment;
pub mod builders;
pub mod category;
pub mod comment;
pub mod identity;
pub mod ticket;
pub mod transition;
pub mod visibility;

pub use access::TicketAccess;
pub use builders::TicketBuilder;
pub use category::{Category, CategoryId};
pub use comment::{Comment, CommentId};
pub use identity::{Identity, Role, UserId};
pub use ticket::{Priority, Status, Ticket, TicketId};
pub use visibility::Scope;

/// Declares a UUID-backed identifier newtype
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Parse from the hyphenated string form
            pub fn parse_str(s: &str) -> std::result::Result<Self, uuid::Error> {
                uuid::Uuid::parse_str(s).map(Self)
            }

            /// Underlying UUID
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// First eight hex characters, for log lines
            #[must_use]
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::parse_str(s)
            }
        }
    };
}

pub(crate) use uuid_id;
