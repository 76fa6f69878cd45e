use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub birth_date: Date,
    pub score: f64,
    pub is_onboarded: bool,
    pub created_at: OffsetDateTime,
}

/// Fields needed to insert a new user.
pub struct NewUser<'a> {
    pub login: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub height: f64,
    pub weight: f64,
    pub birth_date: Date,
    pub score: f64,
    pub is_onboarded: bool,
}

impl User {
    pub async fn find_by_login(db: &PgPool, login: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, password_hash, name, height, weight, birth_date,
                   score, is_onboarded, created_at
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, password_hash, name, height, weight, birth_date,
                   score, is_onboarded, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, password_hash, name, height, weight, birth_date,
                   score, is_onboarded, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn create(db: &PgPool, new: NewUser<'_>) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, password_hash, name, height, weight, birth_date,
                               score, is_onboarded)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, login, password_hash, name, height, weight, birth_date,
                      score, is_onboarded, created_at
            "#,
        )
        .bind(new.login)
        .bind(new.password_hash)
        .bind(new.name)
        .bind(new.height)
        .bind(new.weight)
        .bind(new.birth_date)
        .bind(new.score)
        .bind(new.is_onboarded)
        .fetch_one(db)
        .await
    }

    /// Updates only the provided fields; `None` leaves a column untouched.
    pub async fn update_partial(
        db: &PgPool,
        id: Uuid,
        score: Option<f64>,
        is_onboarded: Option<bool>,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET score = COALESCE($2, score),
                is_onboarded = COALESCE($3, is_onboarded)
            WHERE id = $1
            RETURNING id, login, password_hash, name, height, weight, birth_date,
                      score, is_onboarded, created_at
            "#,
        )
        .bind(id)
        .bind(score)
        .bind(is_onboarded)
        .fetch_optional(db)
        .await
    }

    /// Deletes a user; owned drugs go with it via the FK cascade.
    /// Returns false when no row matched.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
