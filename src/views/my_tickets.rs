//! The logged-in user's tickets, each joined with the event it admits to.
//!
//! Event lookups run concurrently after the ticket list arrives. Each one fails on its own
//! and leaves only that ticket's event fields on their fallbacks.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::Page;
use crate::models::{Event, Ticket, User};
use crate::pricing::format_money;
use crate::utils::notice::Notice;
use crate::views::{format_date, gate, Gated, VENUE_UNAVAILABLE};

pub const UNKNOWN_EVENT: &str = "Unknown Event";
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const NO_TICKETS: &str = "You don't have any tickets yet.";
pub const NO_UPCOMING: &str = "You don't have any upcoming event tickets";
pub const NO_PAST: &str = "You don't have any past event tickets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TicketStatus {
    Used,
    Missed,
    Valid,
}

impl TicketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Used => "Used",
            TicketStatus::Missed => "Missed",
            TicketStatus::Valid => "Valid",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketEntry {
    pub ticket: Ticket,
    /// `None` when the event lookup failed.
    pub event: Option<Event>,
}

impl TicketEntry {
    pub fn event_title(&self) -> &str {
        self.event
            .as_ref()
            .map(|e| e.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_EVENT)
    }

    pub fn event_date(&self) -> String {
        match &self.event {
            Some(event) => format_date(event.event_date),
            None => UNKNOWN_DATE.to_string(),
        }
    }

    pub fn venue(&self) -> &str {
        self.event
            .as_ref()
            .and_then(|e| e.venue_name.as_deref())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(VENUE_UNAVAILABLE)
    }

    fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.event.as_ref().and_then(|e| e.event_date)
    }

    /// A ticket whose event date is unknown is never treated as past.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().map(|at| at <= now).unwrap_or(false)
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.ticket.used && !self.is_past(now)
    }

    pub fn status(&self, now: DateTime<Utc>) -> TicketStatus {
        if self.ticket.used {
            TicketStatus::Used
        } else if self.is_past(now) {
            TicketStatus::Missed
        } else {
            TicketStatus::Valid
        }
    }

    pub fn price(&self) -> String {
        format_money(self.ticket.price)
    }
}

/// Fetches each distinct event once, concurrently. Failed lookups are absent from the map.
pub(crate) async fn resolve_events(api: &ApiClient, tickets: &[Ticket]) -> HashMap<String, Event> {
    let mut ids: Vec<&str> = tickets
        .iter()
        .map(|t| t.event_id.as_str())
        .filter(|id| !id.is_empty())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let lookups = ids.into_iter().map(|id| async move {
        match api.get_event(id).await {
            Ok(event) => Some((id.to_string(), event)),
            Err(err) => {
                warn!(event_id = %id, error = %err, "Event lookup for ticket failed");
                None
            }
        }
    });

    join_all(lookups).await.into_iter().flatten().collect()
}

pub(crate) fn join_events(tickets: Vec<Ticket>, events: &HashMap<String, Event>) -> Vec<TicketEntry> {
    tickets
        .into_iter()
        .map(|ticket| {
            let event = events.get(&ticket.event_id).cloned();
            TicketEntry { ticket, event }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MyTickets {
    pub entries: Vec<TicketEntry>,
    /// Set when the ticket list itself could not be fetched.
    pub error: Option<Notice>,
}

impl MyTickets {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_TICKETS)
    }

    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<&TicketEntry> {
        self.entries.iter().filter(|e| e.is_upcoming(now)).collect()
    }

    pub fn past(&self, now: DateTime<Utc>) -> Vec<&TicketEntry> {
        self.entries.iter().filter(|e| !e.is_upcoming(now)).collect()
    }
}

pub async fn load_my_tickets(api: &ApiClient, user: Option<&User>) -> Gated<MyTickets> {
    let user = gate!(user, Page::MyTickets);

    let tickets = match api.user_tickets(&user.id).await {
        Ok(tickets) => tickets,
        Err(err) => {
            return Gated::Ready(MyTickets {
                entries: Vec::new(),
                error: Some(
                    Notice::from_error("Error", &err)
                        .with_description("Failed to load your tickets. Please try again later."),
                ),
            });
        }
    };

    let events = resolve_events(api, &tickets).await;
    let entries = join_events(tickets, &events);
    info!(user_id = %user.id, count = entries.len(), "Tickets loaded");

    Gated::Ready(MyTickets {
        entries,
        error: None,
    })
}
