//! Axum route handlers for the Resume API.

use std::future::Future;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resume::store::{get_user_resumes, insert_current_resume, NewResume};
use crate::resume::upload::{
    delete_resume_file, extract_text, resume_key, store_resume_file, validate_upload,
};
use crate::state::AppState;
use crate::users::store::get_user;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub resume_id: Uuid,
    pub filename: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeRow>,
}

struct UploadForm {
    user_id: Uuid,
    filename: String,
    body: Bytes,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut user_id = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("user_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid user_id field: {e}")))?;
                let parsed = Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(parsed);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let body = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Could not read uploaded file: {e}"))
                })?;
                file = Some((filename, body));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let (filename, body) = file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    Ok(UploadForm {
        user_id,
        filename,
        body,
    })
}

/// POST /api/v1/resumes
///
/// Multipart form with `user_id` and `file`. The upload becomes the user's
/// current resume.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let format = validate_upload(
        &form.filename,
        form.body.len(),
        state.config.max_resume_bytes,
    )?;

    if get_user(&state.db, form.user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", form.user_id)));
    }

    let key = resume_key(form.user_id, Utc::now(), &form.filename);
    store_resume_file(&state.s3, &state.config.s3_bucket, &key, format, form.body.clone()).await?;

    let resume_text = extract_text(format, form.body).await;

    let inserted = insert_current_resume(
        &state.db,
        NewResume {
            user_id: form.user_id,
            filename: &form.filename,
            s3_key: &key,
            resume_text: &resume_text,
        },
    )
    .await;
    let row = undo_on_error(inserted, || async {
        if let Err(e) = delete_resume_file(&state.s3, &state.config.s3_bucket, &key).await {
            warn!("Orphaned resume object s3://{}/{key}: {e}", state.config.s3_bucket);
        }
    })
    .await?;

    info!(
        "Resume {} uploaded for user {} ({} chars of text)",
        row.id,
        row.user_id,
        resume_text.len()
    );

    Ok(Json(UploadResumeResponse {
        resume_id: row.id,
        filename: row.filename,
        resume_text,
    }))
}

/// Runs `cleanup` if `result` is an error, then hands the result back.
async fn undo_on_error<T, E, F, Fut>(result: Result<T, E>, cleanup: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    if result.is_err() {
        cleanup().await;
    }
    result
}

/// GET /api/v1/users/:id/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = get_user_resumes(&state.db, user_id).await?;
    Ok(Json(ResumeListResponse { resumes }))
}
