use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::datetime",
        serialize_with = "lenient::serialize_datetime"
    )]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient::datetime",
        serialize_with = "lenient::serialize_datetime"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub organizer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub published: bool,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_seats: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub available_seats: u32,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub base_price: Decimal,
}

impl Event {
    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }

    pub fn seats_label(&self) -> String {
        format!(
            "{} / {} seats available",
            self.available_seats, self.total_seats
        )
    }

    /// True when the event starts after `now`. Events without a date are never upcoming.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.event_date.map(|at| at > now).unwrap_or(false)
    }

    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

/// Body for `POST /api/events`. New events are always unpublished with every seat free.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "lenient::serialize_datetime")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "lenient::serialize_datetime")]
    pub end_date: Option<DateTime<Utc>>,
    pub venue_id: String,
    pub organizer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub categories: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub total_seats: u32,
    pub available_seats: u32,
    pub published: bool,
}
