use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::message::Message;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{dangling, require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub recipient: Option<Uuid>,
    pub property: Option<Uuid>,
    pub subject: Option<String>,
    pub content: Option<String>,
}

/// Message with both parties populated.
async fn message_view(store: &Store, message: &Message) -> Result<Value, crate::error::ApiError> {
    let sender = store
        .users
        .get(message.sender)
        .await
        .ok_or_else(|| dangling("User", message.sender))?;
    let recipient = store
        .users
        .get(message.recipient)
        .await
        .ok_or_else(|| dangling("User", message.recipient))?;

    let mut view = to_value(message)?;
    view["sender"] = to_value(&sender)?;
    view["recipient"] = to_value(&recipient)?;
    Ok(view)
}

/// GET /api/messages - Messages where the caller is sender or recipient
pub async fn list(State(store): State<Store>, Extension(actor): Extension<Actor>) -> ApiResult {
    let messages = store
        .messages
        .find(|m| m.sender == actor.id || m.recipient == actor.id)
        .await;

    let mut views = Vec::with_capacity(messages.len());
    for message in &messages {
        views.push(message_view(&store, message).await?);
    }

    Ok(ApiResponse::ok()
        .field("count", Value::from(views.len()))
        .field("messages", Value::Array(views)))
}

/// POST /api/messages - Send a message to another user
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateMessageRequest>,
) -> ApiResult {
    let mut missing = Vec::new();
    if payload.recipient.is_none() {
        missing.push("recipient");
    }
    if payload.subject.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("subject");
    }
    if payload.content.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("content");
    }
    require_fields(missing)?;

    let recipient = store.users.require(payload.recipient.unwrap()).await?;
    if let Some(property_id) = payload.property {
        store.properties.require(property_id).await?;
    }

    let message = Message::new(
        actor.id,
        recipient.id,
        payload.property,
        payload.subject.unwrap(),
        payload.content.unwrap(),
    );
    let message = store.messages.insert(message).await;

    Ok(ApiResponse::created().field("message", message_view(&store, &message).await?))
}

/// PATCH /api/messages/:id/read - Recipient marks the message read
pub async fn mark_read(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let mut message = store.messages.require(id).await?;
    policy::require_self(&actor, message.recipient)?;

    message.mark_read();

    let message = store.messages.replace(message).await?;
    Ok(ApiResponse::ok().field("message", message_view(&store, &message).await?))
}
