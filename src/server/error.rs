use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;
use crate::templates::TemplateError;

/// Failure rendered as `{success: false, error, missing?}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub missing: Option<Vec<String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), missing: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn invalid_json() -> Self {
        Self::bad_request("Dados JSON inválidos")
    }

    pub fn invalid_query() -> Self {
        Self::bad_request("Parâmetros de consulta inválidos")
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmptyCode | StoreError::EmptyMessage => Self::bad_request(e.to_string()),
            StoreError::Duplicate(_) => Self::new(StatusCode::CONFLICT, e.to_string()),
            StoreError::TooLarge { .. } => Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Armazenamento cheio: a resposta excede o tamanho máximo do documento",
            ),
            other => {
                error!("Store failure: {}", other);
                Self::internal(other.to_string())
            }
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(e: TemplateError) -> Self {
        match e {
            TemplateError::NotFound(_) => Self::not_found(e.to_string()),
            TemplateError::MissingFields { ref fields, .. } => {
                let missing = fields.clone();
                Self { missing: Some(missing), ..Self::bad_request(e.to_string()) }
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "success": false, "error": self.message });
        if let Some(missing) = self.missing {
            body["missing"] = json!(missing);
        }
        (self.status, Json(body)).into_response()
    }
}
