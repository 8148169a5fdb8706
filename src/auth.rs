// Acting identity and the owner-or-admin authorization rule.
//
// The auth gateway in front of this server resolves the caller and sets an
// identity cookie; the extractors decode it once per request and every
// mutation path receives the identity as an explicit parameter from there.
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The acting identity for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: String,
    pub fullname: String,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Criteria narrowing for conditional writes: admins touch any document,
/// everyone else only documents they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerScope {
    Any,
    Owner(String),
}

impl Identity {
    pub fn owner_scope(&self) -> OwnerScope {
        if self.is_admin {
            OwnerScope::Any
        } else {
            OwnerScope::Owner(self.id.clone())
        }
    }
}

/// Owner-or-admin rule for mutations on an already-loaded resource.
pub fn authorize_owner(actor: &Identity, owner_id: &str) -> Result<(), AppError> {
    if actor.is_admin || actor.id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden("not the owner".to_string()))
    }
}
