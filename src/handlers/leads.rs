use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::lead::{Budget, Lead, LeadStatus, LeadType};
use crate::domain::user::Role;
use crate::error::ApiError;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub lead_type: Option<LeadType>,
    pub manager: Option<Uuid>,
    pub customer: Option<Uuid>,
    #[serde(default)]
    pub interested_properties: Vec<Uuid>,
    pub budget: Option<Budget>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub lead_type: Option<LeadType>,
    pub interested_properties: Option<Vec<Uuid>>,
    pub budget: Option<Budget>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LeadStatusRequest {
    pub status: Option<LeadStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertLeadRequest {
    pub converted_property: Option<Uuid>,
}

/// GET /api/leads - Leads owned by the calling manager
pub async fn list(State(store): State<Store>, Extension(actor): Extension<Actor>) -> ApiResult {
    let leads = store.leads.find(|l| l.manager == actor.id).await;
    Ok(ApiResponse::ok()
        .field("count", Value::from(leads.len()))
        .field("leads", to_value(&leads)?))
}

/// GET /api/leads/:id - Owner manager only
pub async fn get(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let lead = store.leads.require(id).await?;
    policy::require_owner(&actor, lead.manager)?;
    Ok(ApiResponse::ok().field("lead", to_value(&lead)?))
}

/// POST /api/leads - Create a lead.
///
/// The owning manager comes from the payload when given, otherwise from the
/// first interested property, otherwise from the caller when the caller is a
/// manager.
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateLeadRequest>,
) -> ApiResult {
    let mut missing = Vec::new();
    if payload.name.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("name");
    }
    if payload.email.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("email");
    }
    if payload.lead_type.is_none() {
        missing.push("leadType");
    }
    require_fields(missing)?;

    for property_id in &payload.interested_properties {
        store.properties.require(*property_id).await?;
    }

    let manager = match payload.manager {
        Some(manager) => manager,
        None => match payload.interested_properties.first() {
            Some(first) => store.properties.require(*first).await?.manager,
            None if actor.role == Role::Manager => actor.id,
            None => {
                return Err(ApiError::validation(
                    "Lead manager could not be derived; supply manager or interestedProperties",
                ))
            }
        },
    };

    let customer = payload.customer.or(match actor.role {
        Role::Customer => Some(actor.id),
        Role::Manager => None,
    });

    let lead = Lead::new(
        payload.name.unwrap(),
        payload.email.unwrap(),
        payload.phone,
        payload.lead_type.unwrap(),
        manager,
        customer,
        payload.interested_properties,
        payload.budget,
        payload.notes,
    );
    let lead = store.leads.insert(lead).await;

    Ok(ApiResponse::created().field("lead", to_value(&lead)?))
}

/// PUT /api/leads/:id - Owner manager only
pub async fn update(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadRequest>,
) -> ApiResult {
    let mut lead = store.leads.require(id).await?;
    policy::require_owner(&actor, lead.manager)?;

    if let Some(name) = payload.name {
        lead.name = name;
    }
    if let Some(email) = payload.email {
        lead.email = email;
    }
    if let Some(phone) = payload.phone {
        lead.phone = Some(phone);
    }
    if let Some(lead_type) = payload.lead_type {
        lead.lead_type = lead_type;
    }
    if let Some(interested) = payload.interested_properties {
        for property_id in &interested {
            store.properties.require(*property_id).await?;
        }
        lead.interested_properties = interested;
    }
    if let Some(budget) = payload.budget {
        lead.budget = Some(budget);
    }
    if let Some(notes) = payload.notes {
        lead.notes = Some(notes);
    }
    lead.touch();

    let lead = store.leads.replace(lead).await?;
    Ok(ApiResponse::ok().field("lead", to_value(&lead)?))
}

/// PATCH /api/leads/:id/status - Owner manager only
pub async fn set_status(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LeadStatusRequest>,
) -> ApiResult {
    let status = payload
        .status
        .ok_or_else(|| ApiError::validation("Missing required fields: status"))?;

    let mut lead = store.leads.require(id).await?;
    policy::require_owner(&actor, lead.manager)?;

    lead.status = status;
    lead.touch();

    let lead = store.leads.replace(lead).await?;
    Ok(ApiResponse::ok().field("lead", to_value(&lead)?))
}

/// PATCH /api/leads/:id/convert - Dedicated conversion operation
pub async fn convert(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConvertLeadRequest>,
) -> ApiResult {
    let mut lead = store.leads.require(id).await?;
    policy::require_owner(&actor, lead.manager)?;

    if let Some(property_id) = payload.converted_property {
        store.properties.require(property_id).await?;
    }
    lead.convert(payload.converted_property);

    let lead = store.leads.replace(lead).await?;
    Ok(ApiResponse::ok().field("lead", to_value(&lead)?))
}

/// DELETE /api/leads/:id - Owner manager only
pub async fn delete(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let lead = store.leads.require(id).await?;
    policy::require_owner(&actor, lead.manager)?;

    store.leads.delete(id).await?;
    Ok(ApiResponse::ok().field("message", Value::from("Lead deleted")))
}
