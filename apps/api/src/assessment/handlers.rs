//! Axum route handlers for the Assessment API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::assessment::catalog::LabelProfile;
use crate::assessment::classifier::QuestionView;
use crate::assessment::store::{get_user_assessments, insert_assessment, NewAssessment};
use crate::assessment::submission::{
    evaluate, SubmitAssessmentRequest, SubmitAssessmentResponse,
};
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;
use crate::users::store::get_user;

const GUEST_SESSION: &str = "guest";

#[derive(Debug, Serialize)]
pub struct AssessmentHistoryEntry {
    #[serde(flatten)]
    pub assessment: AssessmentRow,
    /// Absent when the stored label is not defined by the running catalog.
    pub results: Option<LabelProfile>,
}

/// GET /api/v1/questions
pub async fn handle_list_questions(State(state): State<AppState>) -> Json<Vec<QuestionView>> {
    Json(state.classifier.list_questions())
}

/// POST /api/v1/assessments
///
/// Classifies the submission, stores it with pinned answers, and returns the
/// label, its metadata, per-label totals, and any skipped answers.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Json(request): Json<SubmitAssessmentRequest>,
) -> Result<Json<SubmitAssessmentResponse>, AppError> {
    let evaluated = evaluate(&state.classifier, &request.answers, request.strict)?;
    if let Some(user_id) = request.user_id {
        if get_user(&state.db, user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {user_id} not found")));
        }
    }
    let label = evaluated.classification.label.clone();

    let answers_json = serde_json::to_value(&evaluated.pinned)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize answers: {e}")))?;
    let session_id = request
        .session_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(GUEST_SESSION);

    let assessment_id = insert_assessment(
        &state.db,
        NewAssessment {
            session_id,
            user_id: request.user_id,
            answers: &answers_json,
            catalog_revision: state.classifier.catalog().revision(),
            personality_type: label.as_str(),
        },
    )
    .await?;

    Ok(Json(SubmitAssessmentResponse {
        assessment_id,
        personality_type: label.to_string(),
        results: state.classifier.get_results(label.as_str()).cloned(),
        classification: evaluated.classification,
    }))
}

/// GET /api/v1/personality-types/:label
pub async fn handle_get_personality_type(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<LabelProfile>, AppError> {
    state
        .classifier
        .get_results(&label)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Personality type '{label}' not found")))
}

/// GET /api/v1/users/:id/assessments
pub async fn handle_assessment_history(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AssessmentHistoryEntry>>, AppError> {
    let rows = get_user_assessments(&state.db, user_id)
        .await?;

    let history = rows
        .into_iter()
        .map(|assessment| AssessmentHistoryEntry {
            results: state
                .classifier
                .get_results(&assessment.personality_type)
                .cloned(),
            assessment,
        })
        .collect();

    Ok(Json(history))
}
