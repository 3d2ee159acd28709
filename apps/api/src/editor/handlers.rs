//! Axum route handlers for the form-controller API.
//!
//! Every mutating handler responds with the record as it stands afterwards.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::editor::fields::PersonalField;
use crate::editor::{CvPatch, Section};
use crate::errors::AppError;
use crate::models::cv::CvRecord;
use crate::state::AppState;

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

fn parse_index(raw: &str) -> Result<usize, AppError> {
    raw.parse::<usize>()
        .map_err(|_| AppError::Validation(format!("'{raw}' is not a valid entry index")))
}

/// GET /api/cv
pub async fn handle_get_cv(State(state): State<AppState>) -> Json<CvRecord> {
    Json(state.editor.lock().await.record().clone())
}

/// PATCH /api/cv
pub async fn handle_update_cv(
    State(state): State<AppState>,
    payload: Result<Json<CvPatch>, JsonRejection>,
) -> Result<Json<CvRecord>, AppError> {
    let patch = json_body(payload)?;
    let mut editor = state.editor.lock().await;
    editor.update(patch).await;
    Ok(Json(editor.record().clone()))
}

/// PUT /api/cv/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    payload: Result<Json<PersonalField>, JsonRejection>,
) -> Result<Json<CvRecord>, AppError> {
    let field = json_body(payload)?;
    let mut editor = state.editor.lock().await;
    editor.set_personal(field).await;
    Ok(Json(editor.record().clone()))
}

/// POST /api/cv/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<CvRecord> {
    let mut editor = state.editor.lock().await;
    editor.reset().await;
    Json(editor.record().clone())
}

/// POST /api/cv/sample
pub async fn handle_load_sample(State(state): State<AppState>) -> Json<CvRecord> {
    let mut editor = state.editor.lock().await;
    editor.load_sample().await;
    Json(editor.record().clone())
}

/// POST /api/cv/:section
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<CvRecord>, AppError> {
    let section: Section = section.parse()?;
    let mut editor = state.editor.lock().await;
    let index = editor.add_entry(section).await;
    tracing::debug!("Added {section} entry at index {index}");
    Ok(Json(editor.record().clone()))
}

/// PATCH /api/cv/:section/:index
pub async fn handle_edit_entry(
    State(state): State<AppState>,
    Path((section, index)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CvRecord>, AppError> {
    let section: Section = section.parse()?;
    let index = parse_index(&index)?;
    let edit = json_body(payload)?;
    let mut editor = state.editor.lock().await;
    editor.edit_entry(section, index, edit).await?;
    Ok(Json(editor.record().clone()))
}

/// DELETE /api/cv/:section/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((section, index)): Path<(String, String)>,
) -> Result<Json<CvRecord>, AppError> {
    let section: Section = section.parse()?;
    let index = parse_index(&index)?;
    let mut editor = state.editor.lock().await;
    editor.remove_entry(section, index).await?;
    Ok(Json(editor.record().clone()))
}
