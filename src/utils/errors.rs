//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Fallo de transporte, timeout o respuesta no-2xx de un upstream
    #[error("Upstream error ({service}): {message}")]
    Upstream {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// El upstream respondió 2xx pero el cuerpo no tiene el esquema esperado
    #[error("Upstream decode error ({service}): {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    pub fn upstream(service: &'static str, status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::Upstream {
            service,
            status,
            message: message.into(),
        }
    }

    pub fn decode(service: &'static str, message: impl Into<String>) -> Self {
        AppError::Decode {
            service,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } | AppError::Decode { .. } => StatusCode::BAD_GATEWAY,
            AppError::DataIntegrity(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = match self {
            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: Some("VALIDATION_ERROR".to_string()),
                }
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                }
            }

            AppError::Upstream { service, status, message } => {
                error!("Upstream error from {} (status {:?}): {}", service, status, message);
                ErrorResponse {
                    error: "Upstream Error".to_string(),
                    message: "An error occurred while communicating with external service".to_string(),
                    details: Some(json!({
                        "service": service,
                        "status": status,
                        "upstream_error": message,
                    })),
                    code: Some("UPSTREAM_ERROR".to_string()),
                }
            }

            AppError::Decode { service, message } => {
                error!("Unexpected payload from {}: {}", service, message);
                ErrorResponse {
                    error: "Upstream Error".to_string(),
                    message: "The external service returned an unexpected payload".to_string(),
                    details: Some(json!({ "service": service, "decode_error": message })),
                    code: Some("UPSTREAM_DECODE_ERROR".to_string()),
                }
            }

            AppError::DataIntegrity(msg) => {
                error!("Data integrity error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "Upstream data is inconsistent".to_string(),
                    details: Some(json!({ "integrity_error": msg })),
                    code: Some("DATA_INTEGRITY_ERROR".to_string()),
                }
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: Some(json!({ "internal_error": msg })),
                    code: Some("INTERNAL_ERROR".to_string()),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
