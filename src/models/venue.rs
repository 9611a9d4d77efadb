use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, deserialize_with = "lenient::string")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub zip_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: String,
}

impl Address {
    /// "street, city, state, zip" with empty parts left out.
    pub fn one_line(&self) -> String {
        [&self.street, &self.city, &self.state, &self.zip_code]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_address")]
    pub address: Address,
    #[serde(default, deserialize_with = "lenient::count")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn nullable_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Address>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body for `POST /api/venues`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVenue {
    pub name: String,
    pub address: Address,
    pub capacity: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
