use axum::routing::{delete, get, patch, post};
use axum::{middleware, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::auth::require_auth;
use crate::store::Store;

/// Build the full application router.
pub fn app(store: Store) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Routes reachable without a bearer token: registration, login, and the
/// public contact form.
fn public_routes() -> Router<Store> {
    use handlers::{auth, contacts};

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/contact", post(contacts::create))
}

fn api_routes() -> Router<Store> {
    use handlers::{
        auth, contacts, inquiries, leads, leases, maintenance, messages, notifications, payments,
        properties, tasks,
    };

    Router::new()
        // Session
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/auth/favorites/:property_id", patch(auth::toggle_favorite))
        // Properties
        .route("/api/properties", get(properties::list).post(properties::create))
        .route("/api/properties/browse", get(properties::browse))
        .route(
            "/api/properties/:id",
            get(properties::get)
                .put(properties::update)
                .delete(properties::delete),
        )
        // Leases
        .route("/api/leases", get(leases::list).post(leases::create))
        .route(
            "/api/leases/:id",
            get(leases::get).put(leases::update).delete(leases::delete),
        )
        .route("/api/leases/:id/approve-manager", patch(leases::approve_manager))
        .route("/api/leases/:id/approve-customer", patch(leases::approve_customer))
        .route("/api/leases/:id/terminate", patch(leases::terminate))
        // Maintenance requests
        .route("/api/maintenance", get(maintenance::list).post(maintenance::create))
        .route(
            "/api/maintenance/:id",
            get(maintenance::get)
                .put(maintenance::update)
                .delete(maintenance::delete),
        )
        .route("/api/maintenance/:id/status", patch(maintenance::set_status))
        .route("/api/maintenance/:id/assign", patch(maintenance::assign))
        // Contacts (create is public, the rest requires auth)
        .route("/api/contact", get(contacts::list))
        .route("/api/contact/:id", get(contacts::get).delete(contacts::delete))
        .route("/api/contact/:id/status", patch(contacts::set_status))
        .route("/api/contact/:id/assign", patch(contacts::assign))
        // Leads
        .route("/api/leads", get(leads::list).post(leads::create))
        .route(
            "/api/leads/:id",
            get(leads::get).put(leads::update).delete(leads::delete),
        )
        .route("/api/leads/:id/status", patch(leads::set_status))
        .route("/api/leads/:id/convert", patch(leads::convert))
        // Tasks
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route("/api/tasks/:id", delete(tasks::delete))
        .route("/api/tasks/:id/status", patch(tasks::set_status))
        .route("/api/tasks/:id/assign", patch(tasks::assign))
        // Payments
        .route("/api/payments", get(payments::list).post(payments::create))
        .route("/api/payments/:id/status", patch(payments::set_status))
        // Messages
        .route("/api/messages", get(messages::list).post(messages::create))
        .route("/api/messages/:id/read", patch(messages::mark_read))
        // Notifications
        .route(
            "/api/notifications",
            get(notifications::list).post(notifications::create),
        )
        .route("/api/notifications/:id/read", patch(notifications::mark_read))
        // Inquiries
        .route("/api/inquiries", get(inquiries::list).post(inquiries::create))
        .route("/api/inquiries/:id/respond", patch(inquiries::respond))
        .route_layer(middleware::from_fn(require_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "name": "Estate API",
        "version": version,
        "description": "Property management REST backend",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/register, /auth/login (public), /api/auth/* (protected)",
            "contact": "/contact (public create), /api/contact/* (protected)",
            "properties": "/api/properties[/browse][/:id] (protected)",
            "leases": "/api/leases[/:id[/approve-manager|approve-customer|terminate]] (protected)",
            "maintenance": "/api/maintenance[/:id[/status|assign]] (protected)",
            "leads": "/api/leads[/:id[/status|convert]] (protected)",
            "tasks": "/api/tasks[/:id[/status|assign]] (protected)",
            "payments": "/api/payments[/:id/status] (protected)",
            "messages": "/api/messages[/:id/read] (protected)",
            "notifications": "/api/notifications[/:id/read] (protected)",
            "inquiries": "/api/inquiries[/:id/respond] (protected)",
        }
    }))
}

async fn health(
    axum::extract::State(store): axum::extract::State<Store>,
) -> axum::response::Json<Value> {
    let now = chrono::Utc::now();

    axum::response::Json(json!({
        "success": true,
        "status": "ok",
        "timestamp": now,
        "documents": {
            "users": store.users.count().await,
            "properties": store.properties.count().await,
            "leases": store.leases.count().await,
        }
    }))
}
