//! Bearer-token authentication
//!
//! Credentials are never checked here beyond a lookup: the token table comes
//! from configuration and maps each token to a fixed identity.

use super::AppState;
use super::error::ApiError;
use crate::config::TokenEntry;
use crate::core::Identity;
use crate::error::HelpdeskError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::collections::HashMap;
use std::sync::Arc;

/// Token to identity lookup table
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, Identity>,
}

impl TokenRegistry {
    #[must_use]
    pub fn from_entries(entries: &[TokenEntry]) -> Self {
        Self {
            tokens: entries
                .iter()
                .map(|entry| (entry.token.clone(), entry.identity()))
                .collect(),
        }
    }

    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&Identity> {
        self.tokens.get(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Identity of the caller, resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or(HelpdeskError::Unauthenticated)?;

        state
            .tokens
            .resolve(token)
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                tracing::warn!("Rejected request with unknown token");
                ApiError(HelpdeskError::Unauthenticated)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Role, UserId};

    #[test]
    fn test_registry_lookup() {
        let user = UserId::new();
        let registry = TokenRegistry::from_entries(&[TokenEntry {
            token: "abc".to_string(),
            user_id: user,
            role: Role::Admin,
            is_superuser: true,
        }]);

        assert_eq!(registry.len(), 1);
        let identity = registry.resolve("abc").unwrap();
        assert_eq!(identity.id, user);
        assert!(identity.is_admin_like());
        assert!(registry.resolve("xyz").is_none());
    }
}
