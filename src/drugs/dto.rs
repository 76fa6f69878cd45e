use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::Drug;
use super::schedule::Schedule;

/// Body for POST /drugs. The owner is named explicitly and checked against
/// the caller.
#[derive(Debug, Deserialize)]
pub struct CreateDrugRequest {
    pub user_uuid: Uuid,
    pub name: String,
    pub dosage: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub date_to: OffsetDateTime,
    #[serde(default)]
    pub additional_info: Option<String>,
    pub times: Schedule,
    pub is_notification_enabled: bool,
}

/// Body for PATCH /drugs/:id. Every field is independently optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDrugRequest {
    pub name: Option<String>,
    pub dosage: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_from: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_to: Option<OffsetDateTime>,
    pub additional_info: Option<String>,
    pub times: Option<Schedule>,
    pub is_notification_enabled: Option<bool>,
}

/// Query string for GET /drugs.
#[derive(Debug, Deserialize)]
pub struct ListDrugsQuery {
    pub user_uuid: Uuid,
}

/// Drug as returned to clients.
#[derive(Debug, Serialize)]
pub struct DrugResponse {
    pub id: Uuid,
    pub user_uuid: Uuid,
    pub name: String,
    pub dosage: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub date_to: OffsetDateTime,
    pub additional_info: Option<String>,
    pub times: Schedule,
    pub is_notification_enabled: bool,
}

impl From<Drug> for DrugResponse {
    fn from(d: Drug) -> Self {
        Self {
            id: d.id,
            user_uuid: d.user_id,
            name: d.name,
            dosage: d.dosage,
            date_from: d.date_from,
            date_to: d.date_to,
            additional_info: d.additional_info,
            times: d.times.0,
            is_notification_enabled: d.is_notification_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_full_body() {
        let req: CreateDrugRequest = serde_json::from_value(serde_json::json!({
            "user_uuid": "7f8e4a52-9c3d-4d6e-8a1b-2c3d4e5f6a7b",
            "name": "Ibuprofen",
            "dosage": "200mg",
            "date_from": "2026-01-01T00:00:00Z",
            "date_to": "2026-02-01T00:00:00Z",
            "times": {"times": ["08:00", "20:00"]},
            "is_notification_enabled": true
        }))
        .unwrap();
        assert_eq!(req.name, "Ibuprofen");
        assert!(req.additional_info.is_none());
        assert_eq!(req.times.version, 1);
        assert_eq!(req.times.times.len(), 2);
    }

    #[test]
    fn update_request_fields_are_independently_optional() {
        let empty: UpdateDrugRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.name.is_none());
        assert!(empty.date_from.is_none());
        assert!(empty.times.is_none());
        assert!(empty.is_notification_enabled.is_none());

        let partial: UpdateDrugRequest =
            serde_json::from_str(r#"{"dosage": "400mg", "date_to": "2026-03-01T12:00:00Z"}"#)
                .unwrap();
        assert_eq!(partial.dosage.as_deref(), Some("400mg"));
        assert!(partial.date_to.is_some());
        assert!(partial.name.is_none());
    }

    #[test]
    fn response_dates_render_rfc3339() {
        let drug = Drug {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ibuprofen".into(),
            dosage: "200mg".into(),
            date_from: time::macros::datetime!(2026-01-01 00:00 UTC),
            date_to: time::macros::datetime!(2026-02-01 00:00 UTC),
            additional_info: Some("after meals".into()),
            times: sqlx::types::Json(Schedule {
                version: 1,
                times: vec![],
            }),
            is_notification_enabled: false,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(DrugResponse::from(drug)).unwrap();
        assert_eq!(json["date_from"], "2026-01-01T00:00:00Z");
        assert_eq!(json["times"]["version"], 1);
    }
}
