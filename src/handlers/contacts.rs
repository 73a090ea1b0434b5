use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::contact::{Contact, ContactStatus};
use crate::error::ApiError;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::Actor;
use crate::store::Store;

use super::{dangling, require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Optional: set by clients submitting on behalf of a logged-in user.
    pub user: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ContactStatusRequest {
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAssignRequest {
    pub assigned_to: Option<Uuid>,
}

/// Contact with the optional submitting user and assignee populated.
async fn contact_view(store: &Store, contact: &Contact) -> Result<Value, ApiError> {
    let mut view = to_value(contact)?;
    if let Some(user_id) = contact.user {
        let user = store
            .users
            .get(user_id)
            .await
            .ok_or_else(|| dangling("User", user_id))?;
        view["user"] = to_value(&user)?;
    }
    if let Some(assignee_id) = contact.assigned_to {
        let assignee = store
            .users
            .get(assignee_id)
            .await
            .ok_or_else(|| dangling("User", assignee_id))?;
        view["assignedTo"] = to_value(&assignee)?;
    }
    Ok(view)
}

/// POST /contact - Public inquiry form, no authentication required
pub async fn create(
    State(store): State<Store>,
    Json(payload): Json<CreateContactRequest>,
) -> ApiResult {
    let mut missing = Vec::new();
    if payload.name.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("name");
    }
    if payload.email.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("email");
    }
    if payload.subject.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("subject");
    }
    if payload.message.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("message");
    }
    require_fields(missing)?;

    // The user reference must resolve; a dangling one would poison every
    // later populated read of the collection.
    if let Some(user_id) = payload.user {
        store.users.require(user_id).await?;
    }

    let contact = Contact::new(
        payload.name.unwrap(),
        payload.email.unwrap(),
        payload.phone,
        payload.subject.unwrap(),
        payload.message.unwrap(),
        payload.user,
    );
    let contact = store.contacts.insert(contact).await;

    Ok(ApiResponse::created().field("contact", to_value(&contact)?))
}

/// GET /api/contact - Any authenticated user
pub async fn list(State(store): State<Store>, Extension(_actor): Extension<Actor>) -> ApiResult {
    let contacts = store.contacts.find(|_| true).await;

    let mut views = Vec::with_capacity(contacts.len());
    for contact in &contacts {
        views.push(contact_view(&store, contact).await?);
    }

    Ok(ApiResponse::ok()
        .field("count", Value::from(views.len()))
        .field("contacts", Value::Array(views)))
}

/// GET /api/contact/:id - Any authenticated user
pub async fn get(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let contact = store.contacts.require(id).await?;
    Ok(ApiResponse::ok().field("contact", contact_view(&store, &contact).await?))
}

/// PATCH /api/contact/:id/status - Status write with resolution stamp
pub async fn set_status(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContactStatusRequest>,
) -> ApiResult {
    let status = payload
        .status
        .ok_or_else(|| ApiError::validation("Missing required fields: status"))?;

    let mut contact = store.contacts.require(id).await?;
    contact.set_status(status);

    let contact = store.contacts.replace(contact).await?;
    Ok(ApiResponse::ok().field("contact", contact_view(&store, &contact).await?))
}

/// PATCH /api/contact/:id/assign - Route to a handler, advancing new contacts
pub async fn assign(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContactAssignRequest>,
) -> ApiResult {
    let assignee = payload
        .assigned_to
        .ok_or_else(|| ApiError::validation("Missing required fields: assignedTo"))?;

    let mut contact = store.contacts.require(id).await?;
    let assignee = store.users.require(assignee).await?;
    contact.assign(assignee.id);

    let contact = store.contacts.replace(contact).await?;
    Ok(ApiResponse::ok().field("contact", contact_view(&store, &contact).await?))
}

/// DELETE /api/contact/:id - Any authenticated user
pub async fn delete(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    store.contacts.require(id).await?;
    store.contacts.delete(id).await?;
    Ok(ApiResponse::ok().field("message", Value::from("Contact deleted")))
}
