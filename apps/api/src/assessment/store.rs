use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::assessment::AssessmentRow;

pub struct NewAssessment<'a> {
    pub session_id: &'a str,
    pub user_id: Option<Uuid>,
    pub answers: &'a serde_json::Value,
    pub catalog_revision: &'a str,
    pub personality_type: &'a str,
}

/// Records a classified submission. Rows are never updated afterwards.
pub async fn insert_assessment(pool: &PgPool, new: NewAssessment<'_>) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO assessments
            (id, session_id, user_id, answers, catalog_revision, personality_type)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(new.session_id)
    .bind(new.user_id)
    .bind(new.answers)
    .bind(new.catalog_revision)
    .bind(new.personality_type)
    .execute(pool)
    .await?;

    info!(
        "Stored assessment {id} (session {}, type {})",
        new.session_id, new.personality_type
    );
    Ok(id)
}

/// All assessments for a user, newest first.
pub async fn get_user_assessments(pool: &PgPool, user_id: Uuid) -> Result<Vec<AssessmentRow>> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY completed_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_latest_assessment(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<AssessmentRow>> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY completed_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}
