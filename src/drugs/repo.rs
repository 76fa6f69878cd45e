use serde::Serialize;
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::UpdateDrugRequest;
use super::schedule::Schedule;

/// Drug record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Drug {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub date_from: OffsetDateTime,
    pub date_to: OffsetDateTime,
    pub additional_info: Option<String>,
    pub times: Json<Schedule>,
    pub is_notification_enabled: bool,
    pub created_at: OffsetDateTime,
}

/// Fields needed to insert a new drug.
pub struct NewDrug<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
    pub dosage: &'a str,
    pub date_from: OffsetDateTime,
    pub date_to: OffsetDateTime,
    pub additional_info: Option<&'a str>,
    pub times: &'a Schedule,
    pub is_notification_enabled: bool,
}

impl Drug {
    pub async fn create(db: &PgPool, new: NewDrug<'_>) -> sqlx::Result<Drug> {
        sqlx::query_as::<_, Drug>(
            r#"
            INSERT INTO drugs (user_id, name, dosage, date_from, date_to,
                               additional_info, times, is_notification_enabled)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, name, dosage, date_from, date_to,
                      additional_info, times, is_notification_enabled, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.name)
        .bind(new.dosage)
        .bind(new.date_from)
        .bind(new.date_to)
        .bind(new.additional_info)
        .bind(Json(new.times))
        .bind(new.is_notification_enabled)
        .fetch_one(db)
        .await
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Drug>> {
        sqlx::query_as::<_, Drug>(
            r#"
            SELECT id, user_id, name, dosage, date_from, date_to,
                   additional_info, times, is_notification_enabled, created_at
            FROM drugs
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Drug>> {
        sqlx::query_as::<_, Drug>(
            r#"
            SELECT id, user_id, name, dosage, date_from, date_to,
                   additional_info, times, is_notification_enabled, created_at
            FROM drugs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Updates only the provided fields; `None` leaves a column untouched.
    pub async fn update_partial(
        db: &PgPool,
        id: Uuid,
        changes: &UpdateDrugRequest,
    ) -> sqlx::Result<Option<Drug>> {
        sqlx::query_as::<_, Drug>(
            r#"
            UPDATE drugs
            SET name = COALESCE($2, name),
                dosage = COALESCE($3, dosage),
                date_from = COALESCE($4, date_from),
                date_to = COALESCE($5, date_to),
                additional_info = COALESCE($6, additional_info),
                times = COALESCE($7, times),
                is_notification_enabled = COALESCE($8, is_notification_enabled)
            WHERE id = $1
            RETURNING id, user_id, name, dosage, date_from, date_to,
                      additional_info, times, is_notification_enabled, created_at
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.dosage.as_deref())
        .bind(changes.date_from)
        .bind(changes.date_to)
        .bind(changes.additional_info.as_deref())
        .bind(changes.times.as_ref().map(Json))
        .bind(changes.is_notification_enabled)
        .fetch_optional(db)
        .await
    }

    /// Returns false when no row matched.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM drugs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
