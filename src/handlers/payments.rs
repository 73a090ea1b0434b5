use axum::extract::{Extension, Path, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::payment::{Payment, PaymentStatus, PaymentType};
use crate::error::ApiError;
use crate::middleware::extract::Json;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{dangling, require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub lease: Option<Uuid>,
    pub amount: Option<f64>,
    pub payment_type: Option<PaymentType>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub status: Option<PaymentStatus>,
}

/// Payment with its lease populated.
async fn payment_view(store: &Store, payment: &Payment) -> Result<Value, ApiError> {
    let lease = store
        .leases
        .get(payment.lease)
        .await
        .ok_or_else(|| dangling("Lease", payment.lease))?;

    let mut view = to_value(payment)?;
    view["lease"] = to_value(&lease)?;
    Ok(view)
}

/// GET /api/payments - Payments where the caller is the paying customer or
/// the manager of the underlying lease
pub async fn list(State(store): State<Store>, Extension(actor): Extension<Actor>) -> ApiResult {
    let payments = store.payments.find(|_| true).await;

    let mut views = Vec::new();
    for payment in &payments {
        let lease = store
            .leases
            .get(payment.lease)
            .await
            .ok_or_else(|| dangling("Lease", payment.lease))?;
        if payment.customer == actor.id || lease.manager == actor.id {
            let mut view = to_value(payment)?;
            view["lease"] = to_value(&lease)?;
            views.push(view);
        }
    }

    Ok(ApiResponse::ok()
        .field("count", Value::from(views.len()))
        .field("payments", Value::Array(views)))
}

/// POST /api/payments - Record a payment against a lease (participant only)
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreatePaymentRequest>,
) -> ApiResult {
    let mut missing = Vec::new();
    if payload.lease.is_none() {
        missing.push("lease");
    }
    if payload.amount.is_none() {
        missing.push("amount");
    }
    if payload.payment_type.is_none() {
        missing.push("paymentType");
    }
    require_fields(missing)?;

    let amount = payload.amount.unwrap();
    if amount <= 0.0 {
        return Err(ApiError::validation("Amount must be greater than zero"));
    }

    let lease = store.leases.require(payload.lease.unwrap()).await?;
    policy::require_participant(&actor, lease.manager, lease.customer)?;

    let payment = Payment::new(
        lease.id,
        lease.customer,
        amount,
        payload.payment_type.unwrap(),
        payload.due_date,
    );
    let payment = store.payments.insert(payment).await;

    Ok(ApiResponse::created().field("payment", payment_view(&store, &payment).await?))
}

/// PATCH /api/payments/:id/status - Lease manager only; stamps paidDate on
/// the first completion
pub async fn set_status(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentStatusRequest>,
) -> ApiResult {
    let status = payload
        .status
        .ok_or_else(|| ApiError::validation("Missing required fields: status"))?;

    let mut payment = store.payments.require(id).await?;
    let lease = store
        .leases
        .get(payment.lease)
        .await
        .ok_or_else(|| dangling("Lease", payment.lease))?;
    policy::require_owner(&actor, lease.manager)?;

    payment.set_status(status);

    let payment = store.payments.replace(payment).await?;
    Ok(ApiResponse::ok().field("payment", payment_view(&store, &payment).await?))
}
