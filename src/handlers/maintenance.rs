use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::maintenance::{
    MaintenanceCategory, MaintenanceRequest, Priority, RequestStatus,
};
use crate::error::ApiError;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::Actor;
use crate::store::Store;

use super::{dangling, require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub property: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<MaintenanceCategory>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<MaintenanceCategory>,
    pub priority: Option<Priority>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub assigned_to: Option<Uuid>,
}

/// Request with property, reporter and assignee populated.
async fn request_view(store: &Store, request: &MaintenanceRequest) -> Result<Value, ApiError> {
    let property = store
        .properties
        .get(request.property)
        .await
        .ok_or_else(|| dangling("Property", request.property))?;
    let customer = store
        .users
        .get(request.customer)
        .await
        .ok_or_else(|| dangling("User", request.customer))?;

    let mut view = to_value(request)?;
    view["property"] = to_value(&property)?;
    view["customer"] = to_value(&customer)?;
    if let Some(assignee_id) = request.assigned_to {
        let assignee = store
            .users
            .get(assignee_id)
            .await
            .ok_or_else(|| dangling("User", assignee_id))?;
        view["assignedTo"] = to_value(&assignee)?;
    }
    Ok(view)
}

/// GET /api/maintenance - All requests, any authenticated user
pub async fn list(State(store): State<Store>, Extension(_actor): Extension<Actor>) -> ApiResult {
    let requests = store.maintenance.find(|_| true).await;

    let mut views = Vec::with_capacity(requests.len());
    for request in &requests {
        views.push(request_view(&store, request).await?);
    }

    Ok(ApiResponse::ok()
        .field("count", Value::from(views.len()))
        .field("requests", Value::Array(views)))
}

/// GET /api/maintenance/:id - Any authenticated user
pub async fn get(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let request = store.maintenance.require(id).await?;
    Ok(ApiResponse::ok().field("request", request_view(&store, &request).await?))
}

/// POST /api/maintenance - Create a request against an existing property
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateMaintenanceRequest>,
) -> ApiResult {
    let mut missing = Vec::new();
    if payload.property.is_none() {
        missing.push("property");
    }
    if payload.title.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("title");
    }
    if payload.description.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("description");
    }
    if payload.category.is_none() {
        missing.push("category");
    }
    require_fields(missing)?;

    let property = store.properties.require(payload.property.unwrap()).await?;

    let request = MaintenanceRequest::new(
        property.id,
        actor.id,
        payload.title.unwrap(),
        payload.description.unwrap(),
        payload.category.unwrap(),
        payload.priority.unwrap_or(Priority::Medium),
    );
    let request = store.maintenance.insert(request).await;

    Ok(ApiResponse::created().field("request", request_view(&store, &request).await?))
}

/// PUT /api/maintenance/:id - Update fields (open to any authenticated user)
pub async fn update(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMaintenanceRequest>,
) -> ApiResult {
    let mut request = store.maintenance.require(id).await?;

    if let Some(title) = payload.title {
        request.title = title;
    }
    if let Some(description) = payload.description {
        request.description = description;
    }
    if let Some(category) = payload.category {
        request.category = category;
    }
    if let Some(priority) = payload.priority {
        request.priority = priority;
    }
    if let Some(cost) = payload.cost {
        request.cost = Some(cost);
    }
    if let Some(notes) = payload.notes {
        request.notes = Some(notes);
    }
    request.touch();

    let request = store.maintenance.replace(request).await?;
    Ok(ApiResponse::ok().field("request", request_view(&store, &request).await?))
}

/// PATCH /api/maintenance/:id/status - Status write with completion stamp
pub async fn set_status(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusRequest>,
) -> ApiResult {
    let status = payload
        .status
        .ok_or_else(|| ApiError::validation("Missing required fields: status"))?;

    let mut request = store.maintenance.require(id).await?;
    request.set_status(status);

    let request = store.maintenance.replace(request).await?;
    Ok(ApiResponse::ok().field("request", request_view(&store, &request).await?))
}

/// PATCH /api/maintenance/:id/assign - Assign a worker, advancing pending work
pub async fn assign(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRequest>,
) -> ApiResult {
    let assignee = payload
        .assigned_to
        .ok_or_else(|| ApiError::validation("Missing required fields: assignedTo"))?;

    let mut request = store.maintenance.require(id).await?;
    let assignee = store.users.require(assignee).await?;
    request.assign(assignee.id);

    let request = store.maintenance.replace(request).await?;
    Ok(ApiResponse::ok().field("request", request_view(&store, &request).await?))
}

/// DELETE /api/maintenance/:id - Open to any authenticated user
pub async fn delete(
    State(store): State<Store>,
    Extension(_actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    store.maintenance.require(id).await?;
    store.maintenance.delete(id).await?;
    Ok(ApiResponse::ok().field("message", Value::from("Maintenance request deleted")))
}
