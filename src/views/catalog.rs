//! Event catalog: fetch once per query, filter in memory per keystroke.
//!
//! Every fetch is stamped with a generation number. A response that arrives after a newer
//! fetch has been issued is dropped, so a slow early query can never overwrite the
//! results of a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::models::Event;
use crate::pricing::format_money;
use crate::utils::notice::Notice;
use crate::views::{format_date_range, format_time, needle, VENUE_UNAVAILABLE};

pub const NO_MATCHES: &str = "No events found matching your search.";
pub const NO_EVENTS: &str = "No events available at the moment.";
pub const LOAD_FAILED: &str = "Failed to load events. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Sent to the backend's title search when non-empty.
    pub search: Option<String>,
    pub published_only: bool,
}

impl CatalogQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            published_only: false,
        }
    }

    pub fn published(mut self) -> Self {
        self.published_only = true;
        self
    }

    fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Superseded,
}

#[derive(Debug, Default)]
struct Snapshot {
    query: CatalogQuery,
    events: Vec<Event>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug)]
pub struct Catalog {
    api: ApiClient,
    issued: AtomicU64,
    snapshot: Mutex<Snapshot>,
}

impl Catalog {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            issued: AtomicU64::new(0),
            snapshot: Mutex::new(Snapshot {
                loading: true,
                ..Snapshot::default()
            }),
        }
    }

    fn snapshot(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn load(&self, query: CatalogQuery) -> LoadOutcome {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.snapshot().loading = true;

        let result = match query.search_text() {
            Some(text) => self.api.search_events(text).await,
            None => self.api.list_events(None).await,
        };

        let mut snapshot = self.snapshot();
        if self.issued.load(Ordering::SeqCst) != generation {
            debug!(generation, "Dropping superseded catalog response");
            return LoadOutcome::Superseded;
        }

        snapshot.loading = false;
        match result {
            Ok(mut events) => {
                if query.published_only {
                    events.retain(|e| e.published);
                }
                info!(count = events.len(), "Catalog loaded");
                snapshot.events = events;
                snapshot.error = None;
            }
            Err(err) => {
                err.log();
                snapshot.events.clear();
                snapshot.error = Some(LOAD_FAILED.to_string());
            }
        }
        snapshot.query = query;
        LoadOutcome::Applied
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().loading
    }

    pub fn events(&self) -> Vec<Event> {
        self.snapshot().events.clone()
    }

    pub fn query(&self) -> CatalogQuery {
        self.snapshot().query.clone()
    }

    pub fn filter(&self, text: &str) -> Vec<Event> {
        filter_events(&self.snapshot().events, text)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn view(&self, text: &str) -> CatalogView {
        let snapshot = self.snapshot();

        if let Some(message) = &snapshot.error {
            return CatalogView {
                cards: Vec::new(),
                empty_message: None,
                error: Some(Notice::error("Error", message.clone())),
            };
        }

        let cards: Vec<EventCard> = filter_events(&snapshot.events, text)
            .into_iter()
            .map(EventCard::from)
            .collect();

        let searching = needle(text).is_some() || snapshot.query.search_text().is_some();
        let empty_message = cards
            .is_empty()
            .then_some(if searching { NO_MATCHES } else { NO_EVENTS });

        CatalogView {
            cards,
            empty_message,
            error: None,
        }
    }
}

/// Case-insensitive substring match on title or description. Blank text matches everything.
pub fn filter_events<'a>(events: &'a [Event], text: &str) -> Vec<&'a Event> {
    match needle(text) {
        Some(needle) => events.iter().filter(|e| e.matches(&needle)).collect(),
        None => events.iter().collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub categories: String,
    pub dates: String,
    pub time: String,
    pub venue: String,
    pub price: String,
    pub seats_left: String,
}

impl From<&Event> for EventCard {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            categories: event.categories.join(", "),
            dates: format_date_range(event.event_date, event.end_date),
            time: format_time(event.event_date),
            venue: event
                .venue_name
                .clone()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| VENUE_UNAVAILABLE.to_string()),
            price: format_money(event.base_price),
            seats_left: format!("{} seats left", event.available_seats),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub cards: Vec<EventCard>,
    /// Set when there is nothing to show and no error.
    pub empty_message: Option<&'static str>,
    /// Set when the fetch failed; the caller offers a retry.
    pub error: Option<Notice>,
}
