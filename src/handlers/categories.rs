//! Category operations
//!
//! Open to every authenticated identity.

use super::HandlerContext;
use crate::core::category::normalize_name;
use crate::core::{Category, CategoryId, Identity};
use crate::error::Result;
use crate::storage::CategoryRepository;
use serde::Deserialize;
use tracing::info;

/// Full category representation for create and replace
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
    pub is_active: Option<bool>,
}

/// Partial category update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryPatchRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

pub fn list_categories(ctx: &HandlerContext, _identity: &Identity) -> Result<Vec<Category>> {
    ctx.storage.load_all_categories()
}

pub fn get_category(
    ctx: &HandlerContext,
    _identity: &Identity,
    id: &CategoryId,
) -> Result<Category> {
    ctx.storage.load_category(id)
}

pub fn create_category(
    ctx: &HandlerContext,
    identity: &Identity,
    request: CategoryRequest,
) -> Result<Category> {
    let mut category = Category::new(&request.name)?;
    category.is_active = request.is_active.unwrap_or(true);
    ctx.storage.insert_category(&category)?;

    info!(
        "Category '{}' ({}) created by {}",
        category.name,
        category.id.short(),
        identity.id.short()
    );
    Ok(category)
}

/// Replace name and active flag (PUT semantics; `is_active` defaults to true)
pub fn replace_category(
    ctx: &HandlerContext,
    identity: &Identity,
    id: &CategoryId,
    request: CategoryRequest,
) -> Result<Category> {
    let name = normalize_name(&request.name)?;
    let category = ctx.storage.update_category(id, |category| {
        category.name = name;
        category.is_active = request.is_active.unwrap_or(true);
        Ok(())
    })?;

    info!("Category {} replaced by {}", id.short(), identity.id.short());
    Ok(category)
}

pub fn patch_category(
    ctx: &HandlerContext,
    identity: &Identity,
    id: &CategoryId,
    request: CategoryPatchRequest,
) -> Result<Category> {
    let name = request.name.as_deref().map(normalize_name).transpose()?;
    let category = ctx.storage.update_category(id, |category| {
        if let Some(name) = name {
            category.name = name;
        }
        if let Some(is_active) = request.is_active {
            category.is_active = is_active;
        }
        Ok(())
    })?;

    info!("Category {} updated by {}", id.short(), identity.id.short());
    Ok(category)
}

/// Delete a category no ticket references
pub fn delete_category(ctx: &HandlerContext, identity: &Identity, id: &CategoryId) -> Result<()> {
    ctx.storage.delete_category(id)?;
    info!("Category {} deleted by {}", id.short(), identity.id.short());
    Ok(())
}
