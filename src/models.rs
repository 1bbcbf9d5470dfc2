use crate::ledger::CompletionLedger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userId")]
    pub id: Uuid,
    pub username: String,
    pub last_active: DateTime<Utc>,
    // "squats" is the field name older data files carry
    #[serde(alias = "squats")]
    pub completions: CompletionLedger,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub users: BTreeMap<Uuid, User>,
}

impl AppData {
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users
            .values()
            .find(|user| user.username.eq_ignore_ascii_case(username))
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckUsernameRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_id: Option<Uuid>,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    pub user_id: Uuid,
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub date: String,
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub longest_streak: u32,
    pub streak_holder: Option<String>,
    pub user_streaks: BTreeMap<Uuid, u32>,
    pub active_today: usize,
}

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub user_id: Uuid,
    pub username: String,
    pub completed: Vec<bool>,
    pub current_streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    pub reference_day: String,
    pub days: Vec<String>,
    pub users: Vec<GridRow>,
    pub stats: Stats,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    pub removed_count: usize,
    pub removed_users: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date;

    #[test]
    fn user_decodes_legacy_squat_records() {
        let raw = r#"{
            "userId": "7f6b2c2e-9a1f-4d38-8f6a-3f9d9a2b1c00",
            "username": "gray",
            "lastActive": "2024-01-03T08:30:00Z",
            "squats": {"2023-12": [30, 31], "2024-01": [1]}
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.username, "gray");
        assert_eq!(user.completions.len(), 3);
        assert!(user.completions.contains(date::parse_day("2023-12-31").unwrap()));

        // re-serialization drops the legacy shape for good
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""completions":["2023-12-30","2023-12-31","2024-01-01"]"#));
        assert!(!json.contains("squats"));
    }

    #[test]
    fn username_lookup_is_case_insensitive() {
        let mut data = AppData::default();
        let id = Uuid::new_v4();
        data.users.insert(
            id,
            User {
                id,
                username: "Maya".to_string(),
                last_active: Utc::now(),
                completions: CompletionLedger::default(),
            },
        );

        assert!(data.find_by_username("maya").is_some());
        assert!(data.find_by_username("MAYA").is_some());
        assert!(data.find_by_username("mya").is_none());
    }
}
