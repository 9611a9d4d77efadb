//! Admin and organizer dashboards. Any failure leaves a zeroed dashboard on screen.

use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::Page;
use crate::models::{DashboardMetrics, Role, User};
use crate::pricing::format_money;
use crate::utils::error::ClientError;
use crate::utils::notice::Notice;
use crate::views::{gate, Gated};

const NOTICE_TITLE: &str = "Dashboard Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DashboardScope {
    Admin,
    Organizer,
}

impl DashboardScope {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => DashboardScope::Admin,
            _ => DashboardScope::Organizer,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub scope: DashboardScope,
    pub metrics: DashboardMetrics,
    /// Shown in place of the dashboard body; metrics are all zero when this is set.
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

impl Dashboard {
    pub fn revenue(&self) -> String {
        format_money(self.metrics.revenue)
    }

    pub fn growth_label(growth: i64) -> String {
        if growth >= 0 {
            format!("+{}%", growth)
        } else {
            format!("{}%", growth)
        }
    }
}

/// Splits a failure into the headline and the backend's detail, if any.
pub fn failure_message(err: &ClientError) -> (String, Option<String>) {
    match err {
        ClientError::Timeout => (err.public_message(), None),
        ClientError::Network(_) => (err.public_message(), None),
        _ => match err.status_code() {
            Some(status) => {
                let detail = err.public_message();
                let detail = if detail.trim().is_empty() {
                    "Internal Server Error".to_string()
                } else {
                    detail
                };
                (format!("Server error ({})", status.as_u16()), Some(detail))
            }
            None => (err.public_message(), None),
        },
    }
}

fn failed(scope: DashboardScope, err: ClientError) -> Dashboard {
    let (headline, detail) = failure_message(&err);
    err.log();
    let error = match &detail {
        Some(detail) => format!("{}: {}", headline, detail),
        None => headline.clone(),
    };
    Dashboard {
        scope,
        metrics: DashboardMetrics::default(),
        error: Some(error),
        notice: Some(Notice::error(NOTICE_TITLE, headline)),
    }
}

pub async fn load_dashboard(api: &ApiClient, user: Option<&User>) -> Gated<Dashboard> {
    let user = gate!(user, Page::Dashboard);
    let scope = DashboardScope::for_role(user.role);

    let result = match scope {
        DashboardScope::Admin => api.admin_metrics().await,
        DashboardScope::Organizer => api.organizer_metrics(&user.id).await,
    };

    let metrics = match result {
        Ok(metrics) => metrics,
        Err(err) => return Gated::Ready(failed(scope, err)),
    };

    // The backend can answer 200 with an error field and partial data; keep the data.
    let notice = metrics.reported_error().map(|reported| {
        warn!(error = %reported, "Dashboard metrics reported an error");
        Notice::error(NOTICE_TITLE, reported)
    });

    info!(
        ?scope,
        events = metrics.event_count,
        tickets = metrics.ticket_count,
        "Dashboard metrics loaded"
    );

    Gated::Ready(Dashboard {
        scope,
        metrics,
        error: None,
        notice,
    })
}
