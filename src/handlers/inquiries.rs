use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::inquiry::Inquiry;
use crate::error::ApiError;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{dangling, require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    pub property: Option<Uuid>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RespondInquiryRequest {
    pub response: Option<String>,
}

/// Inquiry with its property populated.
async fn inquiry_view(store: &Store, inquiry: &Inquiry) -> Result<Value, ApiError> {
    let property = store
        .properties
        .get(inquiry.property)
        .await
        .ok_or_else(|| dangling("Property", inquiry.property))?;

    let mut view = to_value(inquiry)?;
    view["property"] = to_value(&property)?;
    Ok(view)
}

/// GET /api/inquiries - Inquiries where the caller is either side
pub async fn list(State(store): State<Store>, Extension(actor): Extension<Actor>) -> ApiResult {
    let inquiries = store
        .inquiries
        .find(|i| i.customer == actor.id || i.manager == actor.id)
        .await;

    let mut views = Vec::with_capacity(inquiries.len());
    for inquiry in &inquiries {
        views.push(inquiry_view(&store, inquiry).await?);
    }

    Ok(ApiResponse::ok()
        .field("count", Value::from(views.len()))
        .field("inquiries", Value::Array(views)))
}

/// POST /api/inquiries - Ask about a property; the answering manager is
/// derived from the property
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateInquiryRequest>,
) -> ApiResult {
    let mut missing = Vec::new();
    if payload.property.is_none() {
        missing.push("property");
    }
    if payload.message.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("message");
    }
    require_fields(missing)?;

    let property = store.properties.require(payload.property.unwrap()).await?;

    let inquiry = Inquiry::new(
        property.id,
        actor.id,
        property.manager,
        payload.message.unwrap(),
    );
    let inquiry = store.inquiries.insert(inquiry).await;

    Ok(ApiResponse::created().field("inquiry", inquiry_view(&store, &inquiry).await?))
}

/// PATCH /api/inquiries/:id/respond - Property manager answers
pub async fn respond(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondInquiryRequest>,
) -> ApiResult {
    let response = payload
        .response
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Missing required fields: response"))?;

    let mut inquiry = store.inquiries.require(id).await?;
    policy::require_owner(&actor, inquiry.manager)?;

    inquiry.respond(response);

    let inquiry = store.inquiries.replace(inquiry).await?;
    Ok(ApiResponse::ok().field("inquiry", inquiry_view(&store, &inquiry).await?))
}
