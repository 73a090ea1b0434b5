use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{Map, Value};

/// Success envelope builder.
///
/// Success bodies are `{ "success": true, "<entityKey>": ... }` with any
/// extra fields (counts, pagination) alongside. Failures never come through
/// here; they render via `ApiError`.
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    fields: Map<String, Value>,
}

impl ApiResponse {
    fn with_status(status: StatusCode) -> Self {
        let mut fields = Map::new();
        fields.insert("success".to_string(), Value::Bool(true));
        Self { status, fields }
    }

    /// 200 OK envelope.
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// 201 Created envelope.
    pub fn created() -> Self {
        Self::with_status(StatusCode::CREATED)
    }

    /// Attach a keyed payload field.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.fields))).into_response()
    }
}

/// Handler return type: keyed success envelope or taxonomy error.
pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
