use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::ApiClient;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum Health {
    Online { details: Value },
    Offline { error: String, details: Value },
}

impl Health {
    pub fn is_online(&self) -> bool {
        matches!(self, Health::Online { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Health::Online { .. } => "Online",
            Health::Offline { .. } => "Offline",
        }
    }
}

pub async fn check_health(api: &ApiClient) -> Health {
    match api.health().await {
        Ok(details) => {
            info!(url = %api.base_url(), "Backend is online");
            Health::Online { details }
        }
        Err(err) => {
            warn!(url = %api.base_url(), error = %err, "Backend health check failed");
            Health::Offline {
                error: err.public_message(),
                details: Value::Null,
            }
        }
    }
}
