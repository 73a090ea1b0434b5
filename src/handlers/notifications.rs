use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::notification::Notification;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub user: Option<Uuid>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub notification_type: Option<String>,
}

/// GET /api/notifications - The caller's notifications
pub async fn list(State(store): State<Store>, Extension(actor): Extension<Actor>) -> ApiResult {
    let notifications = store.notifications.find(|n| n.user == actor.id).await;
    Ok(ApiResponse::ok()
        .field("count", Value::from(notifications.len()))
        .field("notifications", to_value(&notifications)?))
}

/// POST /api/notifications - Push a notification to a user (manager only)
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateNotificationRequest>,
) -> ApiResult {
    policy::require_manager(&actor)?;

    let mut missing = Vec::new();
    if payload.user.is_none() {
        missing.push("user");
    }
    if payload.title.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("title");
    }
    if payload.body.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("body");
    }
    require_fields(missing)?;

    let user = store.users.require(payload.user.unwrap()).await?;

    let notification = Notification::new(
        user.id,
        payload.title.unwrap(),
        payload.body.unwrap(),
        payload
            .notification_type
            .unwrap_or_else(|| "general".to_string()),
    );
    let notification = store.notifications.insert(notification).await;

    Ok(ApiResponse::created().field("notification", to_value(&notification)?))
}

/// PATCH /api/notifications/:id/read - Owner marks the notification read
pub async fn mark_read(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let mut notification = store.notifications.require(id).await?;
    policy::require_self(&actor, notification.user)?;

    notification.mark_read();

    let notification = store.notifications.replace(notification).await?;
    Ok(ApiResponse::ok().field("notification", to_value(&notification)?))
}
