use crate::error::{HelpdeskError, Result};
use serde::{Deserialize, Serialize};

super::uuid_id!(
    /// Identifier of a ticket category
    CategoryId
);

/// Maximum length of a category name
pub const MAX_NAME_LEN: usize = 100;

/// Named classification tag for tickets
///
/// Tickets reference categories without owning them; a category that is
/// still referenced cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub is_active: bool,
}

impl Category {
    /// Create an active category, validating the name
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            id: CategoryId::new(),
            name: normalize_name(name)?,
            is_active: true,
        })
    }
}

/// Trim and validate a category name
pub fn normalize_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HelpdeskError::validation("Category name cannot be empty."));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(HelpdeskError::validation(format!(
            "Category name cannot exceed {MAX_NAME_LEN} characters."
        )));
    }
    Ok(name.to_string())
}
