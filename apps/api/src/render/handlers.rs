//! Axum route handlers for PDF delivery.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::cv::CvRecord;
use crate::models::wire::GenerateRequest;
use crate::render::{pdf_response, render_document, suggested_filename};
use crate::state::AppState;

/// POST /api/cv/generate
///
/// Renders the posted projection of a CV. Nothing is persisted. A body that
/// cannot be read is a generation failure like any other.
pub async fn handle_generate(
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|r| AppError::Generation(r.body_text()))?;
    let cv = CvRecord::from(request);
    info!(
        "Generating PDF from request body ({} experience entries)",
        cv.experience.len()
    );
    let filename = suggested_filename(&cv);
    let bytes = render_document(cv).await?;
    pdf_response(bytes, &filename)
}

/// GET /api/cv/pdf
///
/// Renders the stored record.
pub async fn handle_download(State(state): State<AppState>) -> Result<Response, AppError> {
    let cv = state.editor.lock().await.record().clone();
    let filename = suggested_filename(&cv);
    let bytes = render_document(cv).await?;
    pdf_response(bytes, &filename)
}
