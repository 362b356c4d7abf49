use anyhow::Result;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::user::User;

pub struct NewUser<'a> {
    pub external_id: &'a str,
    pub email: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub preferences: Option<Value>,
}

/// Inserts a user. Returns `None` when the email or external id is already taken.
pub async fn create_user(pool: &PgPool, new: NewUser<'_>) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, external_id, email, first_name, last_name)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.external_id)
    .bind(new.email)
    .bind(new.first_name)
    .bind(new.last_name)
    .fetch_optional(pool)
    .await?;

    if let Some(user) = &user {
        info!("Created user {} ({})", user.id, user.email);
    }
    Ok(user)
}

pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?)
}

/// Applies the provided fields, leaving the others untouched, and bumps `updated_at`.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            first_name  = COALESCE($2, first_name),
            last_name   = COALESCE($3, last_name),
            preferences = COALESCE($4, preferences),
            updated_at  = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(update.first_name)
    .bind(update.last_name)
    .bind(update.preferences)
    .fetch_optional(pool)
    .await?;

    if user.is_some() {
        info!("Updated profile for user {user_id}");
    }
    Ok(user)
}
