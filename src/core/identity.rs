use crate::error::{HelpdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

super::uuid_id!(
    /// Identifier of an authenticated user
    UserId
);

/// Role carried by every authenticated identity
///
/// There is no default: an identity without a valid role is rejected at the
/// authentication boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Agent,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Client, Self::Agent, Self::Admin];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Agent => "AGENT",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| HelpdeskError::validation(format!("Invalid role: {s}")))
    }
}

/// The authenticated caller of an operation
///
/// Supplied by the authentication collaborator and treated as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub role: Role,
    #[serde(default)]
    pub is_superuser: bool,
}

impl Identity {
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            is_superuser: false,
        }
    }

    /// Identity with the superuser flag set
    #[must_use]
    pub const fn superuser(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            is_superuser: true,
        }
    }

    /// Superuser flag set or ADMIN role
    #[must_use]
    pub const fn is_admin_like(&self) -> bool {
        self.is_superuser || matches!(self.role, Role::Admin)
    }

    /// Whether this identity may claim tickets
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        match self.role {
            Role::Agent | Role::Admin => true,
            Role::Client => self.is_superuser,
        }
    }
}
