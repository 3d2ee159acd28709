//! Delivery of rendered CVs over HTTP.
//!
//! Layout is CPU-bound, so it runs inside `tokio::task::spawn_blocking`. Each
//! request renders from its own copy of the record; nothing is shared between
//! concurrent renders.

pub mod handlers;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::layout::render_pdf;
use crate::models::cv::CvRecord;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const FALLBACK_FILENAME: &str = "cv.pdf";

/// Renders `cv` off the async runtime. A panicked render surfaces as a
/// generation error; there is no retry.
pub async fn render_document(cv: CvRecord) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&cv))
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;
    info!("Rendered PDF ({} bytes)", bytes.len());
    Ok(bytes)
}

/// `Alex_Johnson_CV.pdf`, or `cv.pdf` when the name has nothing printable.
pub fn suggested_filename(cv: &CvRecord) -> String {
    let stem = cv
        .personal_info
        .full_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if stem.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{stem}_CV.pdf")
    }
}

/// A `200` attachment response carrying the PDF.
pub fn pdf_response(bytes: Vec<u8>, filename: &str) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::Generation(format!("invalid filename header: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
