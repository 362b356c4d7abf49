//! Axum route handlers for users and profiles.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::assessment::catalog::LabelProfile;
use crate::assessment::store::get_latest_assessment;
use crate::errors::AppError;
use crate::models::{assessment::AssessmentRow, resume::ResumeRow, user::User};
use crate::resume::store::get_current_resume;
use crate::state::AppState;
use crate::users::store::{create_user, get_user, update_profile, NewUser, ProfileUpdate};
use crate::users::validation::{clean_name, normalize_email};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub external_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub preferences: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub latest_assessment: Option<AssessmentRow>,
    pub personality_results: Option<LabelProfile>,
    pub current_resume: Option<ResumeRow>,
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let external_id = request.external_id.trim();
    if external_id.is_empty() {
        return Err(AppError::Validation("external_id is required".to_string()));
    }
    let email = normalize_email(&request.email)?;
    let first_name = clean_name(request.first_name.as_deref());
    let last_name = clean_name(request.last_name.as_deref());

    let user = create_user(
        &state.db,
        NewUser {
            external_id,
            email: &email,
            first_name: first_name.as_deref(),
            last_name: last_name.as_deref(),
        },
    )
    .await?
    .ok_or_else(|| AppError::Validation("A user with this email already exists".to_string()))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = get_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let latest_assessment = get_latest_assessment(&state.db, user_id).await?;
    let personality_results = latest_assessment
        .as_ref()
        .and_then(|a| state.classifier.get_results(&a.personality_type))
        .cloned();
    let current_resume = get_current_resume(&state.db, user_id).await?;

    Ok(Json(ProfileResponse {
        user,
        latest_assessment,
        personality_results,
        current_resume,
    }))
}

/// PUT /api/v1/users/:id/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    if let Some(preferences) = &request.preferences {
        if !preferences.is_object() {
            return Err(AppError::Validation(
                "preferences must be a JSON object".to_string(),
            ));
        }
    }

    let update = ProfileUpdate {
        first_name: clean_name(request.first_name.as_deref()),
        last_name: clean_name(request.last_name.as_deref()),
        preferences: request.preferences,
    };

    update_profile(&state.db, user_id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}
