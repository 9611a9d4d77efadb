use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEvent {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::total")]
    pub tickets_sold: u64,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub activity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub timestamp: String,
}

/// Dates stay as the backend's display strings ("No date" is a valid value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersByRole {
    #[serde(default, deserialize_with = "lenient::total")]
    pub customers: u64,
    #[serde(default, deserialize_with = "lenient::total")]
    pub organizers: u64,
    #[serde(default, deserialize_with = "lenient::total")]
    pub admins: u64,
    #[serde(default, deserialize_with = "lenient::total")]
    pub new_users: u64,
}

/// Union of the admin and organizer metric payloads. `Default` is the all-zero dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[serde(default, deserialize_with = "lenient::total")]
    pub user_count: u64,
    #[serde(default, deserialize_with = "lenient::total")]
    pub event_count: u64,
    #[serde(default, deserialize_with = "lenient::total")]
    pub ticket_count: u64,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub revenue: Decimal,
    #[serde(default, deserialize_with = "lenient::signed")]
    pub user_growth: i64,
    #[serde(default, deserialize_with = "lenient::signed")]
    pub event_growth: i64,
    #[serde(default, deserialize_with = "lenient::signed")]
    pub ticket_growth: i64,
    #[serde(default, deserialize_with = "lenient::signed")]
    pub revenue_growth: i64,
    #[serde(default, deserialize_with = "list")]
    pub top_events: Vec<TopEvent>,
    #[serde(default, deserialize_with = "list")]
    pub recent_users: Vec<RecentUser>,
    #[serde(default, deserialize_with = "list")]
    pub upcoming_events: Vec<EventSummary>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub users_by_role: UsersByRole,
    #[serde(default, deserialize_with = "list")]
    pub event_performance: Vec<EventSummary>,
    #[serde(default, deserialize_with = "lenient::total")]
    pub attendee_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DashboardMetrics {
    /// The problem the backend reported while still answering 200, if any.
    pub fn reported_error(&self) -> Option<&str> {
        let error = self.error.as_deref()?;
        self.message
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(Some(error))
    }
}

fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
