use axum::extract::{Extension, Path, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::maintenance::{Priority, RequestStatus};
use crate::domain::task::Task;
use crate::error::ApiError;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<String>,
    pub priority: Option<Priority>,
    pub property: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusRequest {
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignRequest {
    pub assigned_to: Option<Uuid>,
}

/// GET /api/tasks - Any authenticated user
pub async fn list(State(store): State<Store>, Extension(_actor): Extension<Actor>) -> ApiResult {
    let tasks = store.tasks.find(|_| true).await;
    Ok(ApiResponse::ok()
        .field("count", Value::from(tasks.len()))
        .field("tasks", to_value(&tasks)?))
}

/// POST /api/tasks - Create a work item (manager only)
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult {
    policy::require_manager(&actor)?;

    let mut missing = Vec::new();
    if payload.title.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("title");
    }
    if payload.description.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("description");
    }
    if payload.assigned_to.is_none() {
        missing.push("assignedTo");
    }
    require_fields(missing)?;

    let assignee = store.users.require(payload.assigned_to.unwrap()).await?;
    if let Some(property_id) = payload.property {
        store.properties.require(property_id).await?;
    }

    let task = Task::new(
        payload.title.unwrap(),
        payload.description.unwrap(),
        payload.task_type.unwrap_or_else(|| "general".to_string()),
        payload.priority.unwrap_or(Priority::Medium),
        payload.property,
        actor.id,
        assignee.id,
        payload.due_date,
    );
    let task = store.tasks.insert(task).await;

    Ok(ApiResponse::created().field("task", to_value(&task)?))
}

/// PATCH /api/tasks/:id/status - Status write with completion stamp
pub async fn set_status(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskStatusRequest>,
) -> ApiResult {
    let status = payload
        .status
        .ok_or_else(|| ApiError::validation("Missing required fields: status"))?;

    let mut task = store.tasks.require(id).await?;
    task.set_status(status);

    let task = store.tasks.replace(task).await?;
    Ok(ApiResponse::ok().field("task", to_value(&task)?))
}

/// PATCH /api/tasks/:id/assign - Reassign, advancing pending work
pub async fn assign(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskAssignRequest>,
) -> ApiResult {
    let assignee = payload
        .assigned_to
        .ok_or_else(|| ApiError::validation("Missing required fields: assignedTo"))?;

    let mut task = store.tasks.require(id).await?;
    let assignee = store.users.require(assignee).await?;
    task.assign(assignee.id);

    let task = store.tasks.replace(task).await?;
    Ok(ApiResponse::ok().field("task", to_value(&task)?))
}

/// DELETE /api/tasks/:id - Only the user who assigned the task
pub async fn delete(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let task = store.tasks.require(id).await?;
    policy::require_owner(&actor, task.assigned_by)?;

    store.tasks.delete(id).await?;
    Ok(ApiResponse::ok().field("message", Value::from("Task deleted")))
}
