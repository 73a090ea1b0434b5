//! Authorization primitives shared by every route handler.
//!
//! Ownership is decided by id equality against the record's reference field;
//! holding the manager role alone never grants access to another manager's
//! records. Existence is checked before ownership everywhere (handlers call
//! `Collection::require` first), so a missing record is always a 404 and an
//! unowned one always a 403.

use uuid::Uuid;

use crate::domain::user::Role;
use crate::error::ApiError;

/// The authenticated identity performing a request.
#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// The operation is restricted to manager accounts.
pub fn require_manager(actor: &Actor) -> Result<(), ApiError> {
    if actor.role == Role::Manager {
        Ok(())
    } else {
        Err(ApiError::forbidden("Only managers may perform this action"))
    }
}

/// The actor must be the user the record names as its manager/owner.
pub fn require_owner(actor: &Actor, owner: Uuid) -> Result<(), ApiError> {
    if actor.id == owner {
        Ok(())
    } else {
        Err(ApiError::forbidden("Not authorized to access this resource"))
    }
}

/// The actor must be one of the two parties on the record.
pub fn require_participant(actor: &Actor, manager: Uuid, customer: Uuid) -> Result<(), ApiError> {
    if actor.id == manager || actor.id == customer {
        Ok(())
    } else {
        Err(ApiError::forbidden("Not authorized to access this resource"))
    }
}

/// The actor must be acting on their own user record.
pub fn require_self(actor: &Actor, user: Uuid) -> Result<(), ApiError> {
    if actor.id == user {
        Ok(())
    } else {
        Err(ApiError::forbidden("Not authorized to act for this user"))
    }
}
