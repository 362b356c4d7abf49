//! Axum route handlers for the Advisor API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::advisor::counselor::{Advice, AdviceRequest};
use crate::errors::AppError;
use crate::resume::store::get_current_resume;
use crate::state::AppState;
use crate::users::store::get_user;

const GUEST_SESSION: &str = "guest";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub user_id: Option<Uuid>,
    pub message: String,
    #[serde(default)]
    pub personality_type: String,
    pub resume_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapQuery {
    #[serde(default)]
    pub personality_type: String,
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub personality_type: String,
    pub steps: Vec<String>,
}

/// POST /api/v1/chat
///
/// When the caller is a known user and sent no resume text, the user's current
/// resume is used as background. The exchange is logged to `chat_sessions`.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Advice>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    if let Some(user_id) = request.user_id {
        if get_user(&state.db, user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {user_id} not found")));
        }
    }

    let mut resume_text = request.resume_text.filter(|t| !t.trim().is_empty());
    if resume_text.is_none() {
        if let Some(user_id) = request.user_id {
            resume_text = get_current_resume(&state.db, user_id)
                .await?
                .and_then(|r| r.resume_text);
        }
    }

    let advice = state
        .advisor
        .advise(AdviceRequest {
            message: &request.message,
            personality_type: &request.personality_type,
            resume_text: resume_text.as_deref(),
        })
        .await;

    let session_id = request
        .session_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(GUEST_SESSION);

    sqlx::query(
        r#"
        INSERT INTO chat_sessions
            (id, session_id, user_id, message, response, personality_type, resume_text)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session_id)
    .bind(request.user_id)
    .bind(&request.message)
    .bind(&advice.response)
    .bind(Some(request.personality_type.as_str()).filter(|s| !s.is_empty()))
    .bind(resume_text.as_deref())
    .execute(&state.db)
    .await?;

    info!(
        "Chat reply for session {session_id} via {} backend",
        advice.backend
    );

    Ok(Json(advice))
}

/// GET /api/v1/roadmap?personality_type=X
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Query(query): Query<RoadmapQuery>,
) -> Json<RoadmapResponse> {
    let steps = state.advisor.roadmap(&query.personality_type);
    Json(RoadmapResponse {
        personality_type: query.personality_type,
        steps,
    })
}
