use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::repo::User;

/// Public part of a user returned to clients. Never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub login: String,
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub birth_date: Date,
    pub score: f64,
    pub is_onboarded: bool,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            login: u.login,
            name: u.name,
            height: u.height,
            weight: u.weight,
            birth_date: u.birth_date,
            score: u.score,
            is_onboarded: u.is_onboarded,
        }
    }
}

/// Body for PATCH /users/:id. Only score and onboarding are mutable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub score: Option<f64>,
    pub is_onboarded: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::OffsetDateTime;

    #[test]
    fn public_user_never_exposes_the_hash() {
        let user = User {
            id: Uuid::new_v4(),
            login: "alice".into(),
            password_hash: "$argon2id$secret".into(),
            name: "Alice".into(),
            height: 170.0,
            weight: 60.0,
            birth_date: date!(1990 - 01 - 15),
            score: 2.5,
            is_onboarded: true,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("1990-01-15"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn update_request_fields_are_independently_optional() {
        let empty: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.score.is_none());
        assert!(empty.is_onboarded.is_none());

        let partial: UpdateUserRequest = serde_json::from_str(r#"{"score": 4.0}"#).unwrap();
        assert_eq!(partial.score, Some(4.0));
        assert!(partial.is_onboarded.is_none());
    }
}
