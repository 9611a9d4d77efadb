//! View models: each one fetches what a page needs and degrades to defaults on failure.

use chrono::{DateTime, Utc};

use crate::auth::{authorize, Access, Page, Route};
use crate::models::User;

pub mod catalog;
pub mod dashboard;
pub mod event_detail;
pub mod event_management;
pub mod health;
pub mod my_tickets;
pub mod profile;
pub mod purchase;
pub mod ticket_management;
pub mod venues;

pub const DATE_UNAVAILABLE: &str = "Date not available";
pub const VENUE_UNAVAILABLE: &str = "Venue information not available";

/// Result of a role-gated load. A redirect means nothing was fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    Ready(T),
    Redirect(Route),
}

impl<T> Gated<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Gated::Ready(value) => Some(value),
            Gated::Redirect(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<&Route> {
        match self {
            Gated::Ready(_) => None,
            Gated::Redirect(route) => Some(route),
        }
    }
}

/// Resolves page access, or returns early from the enclosing load with the redirect.
macro_rules! gate {
    ($user:expr, $page:expr) => {
        match $crate::views::admit($user, $page) {
            Ok(user) => user,
            Err(route) => return $crate::views::Gated::Redirect(route),
        }
    };
}
pub(crate) use gate;

pub(crate) fn admit(user: Option<&User>, page: Page) -> Result<&User, Route> {
    match authorize(user, page) {
        Access::Granted(user) => Ok(user),
        Access::Redirect(route) => Err(route),
    }
}

pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string())
}

pub fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

pub fn format_date_range(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> String {
    match (start, end) {
        (Some(_), Some(_)) => format!("{} - {}", format_date(start), format_date(end)),
        (Some(_), None) => format_date(start),
        _ => DATE_UNAVAILABLE.to_string(),
    }
}

/// Lower-cased, trimmed needle; `None` when there is nothing to filter on.
pub(crate) fn needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_formatting() {
        let at = Utc.with_ymd_and_hms(2025, 7, 4, 19, 5, 0).unwrap();
        assert_eq!(format_date(Some(at)), "Jul 4, 2025");
        assert_eq!(format_time(Some(at)), "7:05 PM");
        assert_eq!(format_date(None), "Date not available");
        assert_eq!(format_time(None), "");
    }

    #[test]
    fn test_date_range() {
        let start = Utc.with_ymd_and_hms(2025, 7, 4, 19, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 7, 6, 23, 0, 0).unwrap();
        assert_eq!(
            format_date_range(Some(start), Some(end)),
            "Jul 4, 2025 - Jul 6, 2025"
        );
        assert_eq!(format_date_range(None, Some(end)), "Date not available");
    }

    #[test]
    fn test_needle() {
        assert_eq!(needle("  MuSiC "), Some("music".to_string()));
        assert_eq!(needle("   "), None);
    }
}
