use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::EditError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every error body has the shape `{"error": <summary>, "details": <message>}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    #[error("PDF generation failed: {0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, summary, details) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Invalid request", msg.clone()),
            AppError::Edit(e) => {
                let status = match e {
                    EditError::UnknownSection(_) | EditError::IndexOutOfRange { .. } => {
                        StatusCode::NOT_FOUND
                    }
                    EditError::InvalidField(_) => StatusCode::BAD_REQUEST,
                    EditError::LastEntry => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, "Edit rejected", e.to_string())
            }
            AppError::Generation(msg) => {
                tracing::error!("PDF generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate PDF",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    e.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": summary,
            "details": details,
        }));

        (status, body).into_response()
    }
}
