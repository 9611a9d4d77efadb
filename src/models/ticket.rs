use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    #[default]
    Standard,
    Vip,
    Premium,
    EarlyBird,
}

impl TicketType {
    pub const ALL: [TicketType; 4] = [
        TicketType::Standard,
        TicketType::Vip,
        TicketType::Premium,
        TicketType::EarlyBird,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Standard => "STANDARD",
            TicketType::Vip => "VIP",
            TicketType::Premium => "PREMIUM",
            TicketType::EarlyBird => "EARLY_BIRD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketType::Standard => "Standard",
            TicketType::Vip => "VIP",
            TicketType::Premium => "Premium",
            TicketType::EarlyBird => "Early Bird",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        TicketType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown ticket type '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub order_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    pub ticket_type: TicketType,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ticket_number: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub used: bool,
    #[serde(
        default,
        deserialize_with = "lenient::datetime",
        serialize_with = "lenient::serialize_datetime"
    )]
    pub purchase_date: Option<DateTime<Utc>>,
}
