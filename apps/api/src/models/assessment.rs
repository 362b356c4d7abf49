use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub session_id: String,
    pub user_id: Option<Uuid>,
    /// Pinned answers, `[{question_id, option_key | option_index}]`.
    pub answers: Value,
    pub catalog_revision: String,
    pub personality_type: String,
    pub completed_at: DateTime<Utc>,
}
