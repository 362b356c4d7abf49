pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::advisor::handlers as advisor;
use crate::assessment::handlers as assessment;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::users::handlers as users;

/// Room for the multipart framing and the `user_id` field around the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_resume_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route("/api/v1/questions", get(assessment::handle_list_questions))
        .route(
            "/api/v1/assessments",
            post(assessment::handle_submit_assessment),
        )
        .route(
            "/api/v1/personality-types/:label",
            get(assessment::handle_get_personality_type),
        )
        // Advisor API
        .route("/api/v1/chat", post(advisor::handle_chat))
        .route("/api/v1/roadmap", get(advisor::handle_roadmap))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(resume::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Users API
        .route("/api/v1/users", post(users::handle_create_user))
        .route(
            "/api/v1/users/:id/profile",
            get(users::handle_get_profile).put(users::handle_update_profile),
        )
        .route(
            "/api/v1/users/:id/assessments",
            get(assessment::handle_assessment_history),
        )
        .route("/api/v1/users/:id/resumes", get(resume::handle_list_resumes))
        .with_state(state)
}
