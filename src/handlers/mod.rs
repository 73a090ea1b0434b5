//! Route handlers: thin orchestration over the policy layer and the store.
//!
//! Every handler follows the same order: parse input, resolve the target
//! document (404 before any ownership check), apply policy, apply the
//! domain transition, persist, shape the keyed success envelope.

pub mod auth;
pub mod contacts;
pub mod inquiries;
pub mod leads;
pub mod leases;
pub mod maintenance;
pub mod messages;
pub mod notifications;
pub mod payments;
pub mod properties;
pub mod tasks;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// A reference that failed to populate. Never surfaced as a partially
/// populated document; the whole request fails as unexpected.
pub(crate) fn dangling(what: &str, id: Uuid) -> ApiError {
    tracing::error!("dangling {} reference during population: {}", what, id);
    ApiError::internal("Referenced document is missing")
}

pub(crate) fn to_value<T: Serialize>(doc: &T) -> Result<Value, ApiError> {
    serde_json::to_value(doc).map_err(ApiError::from)
}

/// Build the joined "Missing required fields" validation error, or Ok when
/// nothing is missing.
pub(crate) fn require_fields(missing: Vec<&'static str>) -> Result<(), ApiError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
