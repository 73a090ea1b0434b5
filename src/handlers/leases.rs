use axum::extract::{Extension, Path, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::lease::{Lease, LeaseParty, LeaseStatus};
use crate::error::ApiError;
use crate::middleware::extract::{Json, Query};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{dangling, require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaseRequest {
    pub property: Option<Uuid>,
    pub customer: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub monthly_rent: Option<f64>,
    pub security_deposit: Option<f64>,
    pub terms: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeaseRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub monthly_rent: Option<f64>,
    pub security_deposit: Option<f64>,
    pub terms: Option<String>,
    pub status: Option<LeaseStatus>,
}

#[derive(Debug, Deserialize)]
pub struct LeaseListQuery {
    pub status: Option<LeaseStatus>,
}

/// Lease with property and both parties populated for display.
async fn lease_view(store: &Store, lease: &Lease) -> Result<Value, ApiError> {
    let property = store
        .properties
        .get(lease.property)
        .await
        .ok_or_else(|| dangling("Property", lease.property))?;
    let manager = store
        .users
        .get(lease.manager)
        .await
        .ok_or_else(|| dangling("User", lease.manager))?;
    let customer = store
        .users
        .get(lease.customer)
        .await
        .ok_or_else(|| dangling("User", lease.customer))?;

    let mut view = to_value(lease)?;
    view["property"] = to_value(&property)?;
    view["manager"] = to_value(&manager)?;
    view["customer"] = to_value(&customer)?;
    Ok(view)
}

/// GET /api/leases?status= - Leases where the caller is manager or customer
pub async fn list(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<LeaseListQuery>,
) -> ApiResult {
    let leases = store
        .leases
        .find(|l| {
            (l.manager == actor.id || l.customer == actor.id)
                && query.status.map_or(true, |s| l.status == s)
        })
        .await;

    let mut views = Vec::with_capacity(leases.len());
    for lease in &leases {
        views.push(lease_view(&store, lease).await?);
    }

    Ok(ApiResponse::ok()
        .field("count", Value::from(views.len()))
        .field("leases", Value::Array(views)))
}

/// GET /api/leases/:id - Participant read
pub async fn get(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let lease = store.leases.require(id).await?;
    policy::require_participant(&actor, lease.manager, lease.customer)?;
    Ok(ApiResponse::ok().field("lease", lease_view(&store, &lease).await?))
}

/// POST /api/leases - Create a lease (manager owning the property)
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateLeaseRequest>,
) -> ApiResult {
    policy::require_manager(&actor)?;

    let mut missing = Vec::new();
    if payload.property.is_none() {
        missing.push("property");
    }
    if payload.customer.is_none() {
        missing.push("customer");
    }
    if payload.start_date.is_none() {
        missing.push("startDate");
    }
    if payload.end_date.is_none() {
        missing.push("endDate");
    }
    if payload.monthly_rent.is_none() {
        missing.push("monthlyRent");
    }
    if payload.security_deposit.is_none() {
        missing.push("securityDeposit");
    }
    require_fields(missing)?;

    let property = store.properties.require(payload.property.unwrap()).await?;
    policy::require_owner(&actor, property.manager)?;
    let customer = store.users.require(payload.customer.unwrap()).await?;

    let start = payload.start_date.unwrap();
    let end = payload.end_date.unwrap();
    if end <= start {
        return Err(ApiError::validation("endDate must be after startDate"));
    }

    // Property status deliberately left untouched; there is no cross-entity
    // transaction here.
    let lease = Lease::new(
        property.id,
        actor.id,
        customer.id,
        start,
        end,
        payload.monthly_rent.unwrap(),
        payload.security_deposit.unwrap(),
        payload.terms,
    );
    let lease = store.leases.insert(lease).await;

    Ok(ApiResponse::created().field("lease", lease_view(&store, &lease).await?))
}

/// PUT /api/leases/:id - Update terms (owner manager only)
pub async fn update(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeaseRequest>,
) -> ApiResult {
    let mut lease = store.leases.require(id).await?;
    policy::require_owner(&actor, lease.manager)?;

    if let Some(start_date) = payload.start_date {
        lease.start_date = start_date;
    }
    if let Some(end_date) = payload.end_date {
        lease.end_date = end_date;
    }
    if let Some(monthly_rent) = payload.monthly_rent {
        lease.monthly_rent = monthly_rent;
    }
    if let Some(security_deposit) = payload.security_deposit {
        lease.security_deposit = security_deposit;
    }
    if let Some(terms) = payload.terms {
        lease.terms = Some(terms);
    }
    if let Some(status) = payload.status {
        lease.status = status;
    }
    lease.touch();

    let lease = store.leases.replace(lease).await?;
    Ok(ApiResponse::ok().field("lease", lease_view(&store, &lease).await?))
}

/// PATCH /api/leases/:id/approve-manager - Manager approval, may activate
pub async fn approve_manager(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let mut lease = store.leases.require(id).await?;
    policy::require_owner(&actor, lease.manager)?;

    lease.approve(LeaseParty::Manager);
    let lease = store.leases.replace(lease).await?;
    Ok(ApiResponse::ok().field("lease", lease_view(&store, &lease).await?))
}

/// PATCH /api/leases/:id/approve-customer - Customer approval, may activate
pub async fn approve_customer(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let mut lease = store.leases.require(id).await?;
    policy::require_self(&actor, lease.customer)?;

    lease.approve(LeaseParty::Customer);
    let lease = store.leases.replace(lease).await?;
    Ok(ApiResponse::ok().field("lease", lease_view(&store, &lease).await?))
}

/// PATCH /api/leases/:id/terminate - Manager only, valid from any state
pub async fn terminate(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let mut lease = store.leases.require(id).await?;
    policy::require_owner(&actor, lease.manager)?;

    lease.terminate();
    let lease = store.leases.replace(lease).await?;
    Ok(ApiResponse::ok().field("lease", lease_view(&store, &lease).await?))
}

/// DELETE /api/leases/:id - Owner manager only
pub async fn delete(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let lease = store.leases.require(id).await?;
    policy::require_owner(&actor, lease.manager)?;

    store.leases.delete(id).await?;
    Ok(ApiResponse::ok().field("message", Value::from("Lease deleted")))
}
