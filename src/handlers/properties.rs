use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::property::{Property, PropertyStatus, PropertyType};
use crate::error::ApiError;
use crate::filter::PropertyFilter;
use crate::middleware::extract::{Json, Query};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::policy::{self, Actor};
use crate::store::Store;

use super::{require_fields, to_value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub property_type: Option<PropertyType>,
    pub price: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub approved: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub property_type: Option<PropertyType>,
    pub price: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<f64>,
    pub status: Option<PropertyStatus>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub approved: Option<bool>,
}

/// GET /api/properties - Properties owned by the calling manager
pub async fn list(State(store): State<Store>, Extension(actor): Extension<Actor>) -> ApiResult {
    policy::require_manager(&actor)?;
    let properties = store.properties.find(|p| p.manager == actor.id).await;
    Ok(ApiResponse::ok()
        .field("count", json!(properties.len()))
        .field("properties", to_value(&properties)?))
}

/// GET /api/properties/browse - Filtered listing of the browsable set
pub async fn browse(
    State(store): State<Store>,
    Query(filter): Query<PropertyFilter>,
) -> ApiResult {
    let all = store.properties.find(|_| true).await;
    let page = filter.apply(all);

    Ok(ApiResponse::ok()
        .field("properties", to_value(&page.properties)?)
        .field("totalProperties", json!(page.total))
        .field("totalPages", json!(page.total_pages))
        .field("currentPage", json!(page.current_page)))
}

/// GET /api/properties/:id - Owner read
pub async fn get(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let property = store.properties.require(id).await?;
    policy::require_owner(&actor, property.manager)?;
    Ok(ApiResponse::ok().field("property", to_value(&property)?))
}

/// POST /api/properties - Create a listing (manager only)
pub async fn create(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreatePropertyRequest>,
) -> ApiResult {
    policy::require_manager(&actor)?;

    let mut missing = Vec::new();
    if payload.title.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("title");
    }
    if payload.address.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("address");
    }
    if payload.property_type.is_none() {
        missing.push("propertyType");
    }
    if payload.price.is_none() {
        missing.push("price");
    }
    if payload.bedrooms.is_none() {
        missing.push("bedrooms");
    }
    if payload.bathrooms.is_none() {
        missing.push("bathrooms");
    }
    if payload.area.is_none() {
        missing.push("area");
    }
    require_fields(missing)?;

    let price = payload.price.unwrap();
    if price <= 0.0 {
        return Err(ApiError::validation("Price must be greater than zero"));
    }

    let property = Property::new(
        payload.title.unwrap(),
        payload.description,
        payload.address.unwrap(),
        payload.property_type.unwrap(),
        price,
        payload.bedrooms.unwrap(),
        payload.bathrooms.unwrap(),
        payload.area.unwrap(),
        payload.amenities,
        payload.images,
        actor.id,
        payload.approved.unwrap_or(true),
    );
    let property = store.properties.insert(property).await;

    Ok(ApiResponse::created().field("property", to_value(&property)?))
}

/// PUT /api/properties/:id - Update a listing (owner only)
pub async fn update(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> ApiResult {
    let mut property = store.properties.require(id).await?;
    policy::require_owner(&actor, property.manager)?;

    if let Some(title) = payload.title {
        property.title = title;
    }
    if let Some(description) = payload.description {
        property.description = Some(description);
    }
    if let Some(address) = payload.address {
        property.address = address;
    }
    if let Some(property_type) = payload.property_type {
        property.property_type = property_type;
    }
    if let Some(price) = payload.price {
        if price <= 0.0 {
            return Err(ApiError::validation("Price must be greater than zero"));
        }
        property.price = price;
    }
    if let Some(bedrooms) = payload.bedrooms {
        property.bedrooms = bedrooms;
    }
    if let Some(bathrooms) = payload.bathrooms {
        property.bathrooms = bathrooms;
    }
    if let Some(area) = payload.area {
        property.area = area;
    }
    if let Some(status) = payload.status {
        property.status = status;
    }
    if let Some(amenities) = payload.amenities {
        property.amenities = amenities;
    }
    if let Some(images) = payload.images {
        property.images = images;
    }
    if let Some(approved) = payload.approved {
        property.approved = approved;
    }
    property.touch();

    let property = store.properties.replace(property).await?;
    Ok(ApiResponse::ok().field("property", to_value(&property)?))
}

/// DELETE /api/properties/:id - Delete a listing (owner only). No cascade:
/// leases and requests referencing the property are left in place.
pub async fn delete(
    State(store): State<Store>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult {
    let property = store.properties.require(id).await?;
    policy::require_owner(&actor, property.manager)?;

    store.properties.delete(id).await?;
    Ok(ApiResponse::ok().field("message", json!("Property deleted")))
}
