use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

pub struct NewResume<'a> {
    pub user_id: Uuid,
    pub filename: &'a str,
    pub s3_key: &'a str,
    pub resume_text: &'a str,
}

/// Stores a resume as the user's current one. Earlier resumes lose their
/// `is_current` flag in the same transaction.
pub async fn insert_current_resume(pool: &PgPool, new: NewResume<'_>) -> Result<ResumeRow> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE user_resumes SET is_current = FALSE WHERE user_id = $1 AND is_current")
        .bind(new.user_id)
        .execute(&mut *tx)
        .await?;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO user_resumes (id, user_id, filename, s3_key, resume_text, is_current)
        VALUES ($1, $2, $3, $4, $5, TRUE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(new.filename)
    .bind(new.s3_key)
    .bind(new.resume_text)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Stored resume {} for user {}", row.id, row.user_id);
    Ok(row)
}

/// All resumes for a user, newest first.
pub async fn get_user_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM user_resumes WHERE user_id = $1 ORDER BY uploaded_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// The resume flagged current, else the most recent upload.
pub async fn get_current_resume(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeRow>> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        r#"
        SELECT * FROM user_resumes
        WHERE user_id = $1
        ORDER BY is_current DESC, uploaded_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}
