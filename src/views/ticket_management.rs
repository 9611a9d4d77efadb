use tracing::info;

use crate::api::ApiClient;
use crate::auth::Page;
use crate::models::User;
use crate::utils::notice::Notice;
use crate::views::my_tickets::{join_events, resolve_events, TicketEntry};
use crate::views::{gate, needle, Gated};

pub const LOAD_FAILED: &str = "Failed to load tickets. Please try again later.";
pub const VALIDATED: &str = "Ticket has been validated successfully.";
pub const VALIDATE_FAILED: &str = "Failed to validate ticket. Please try again.";

/// Every ticket the backend knows about. Admin only.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketBoard {
    pub entries: Vec<TicketEntry>,
    pub error: Option<Notice>,
}

impl TicketBoard {
    /// Case-insensitive match on ticket number or event title.
    pub fn filter(&self, query: &str) -> Vec<&TicketEntry> {
        let Some(needle) = needle(query) else {
            return self.entries.iter().collect();
        };
        self.entries
            .iter()
            .filter(|entry| {
                entry.ticket.ticket_number.to_lowercase().contains(&needle)
                    || entry
                        .event
                        .as_ref()
                        .is_some_and(|e| e.title.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn find(&self, ticket_id: &str) -> Option<&TicketEntry> {
        self.entries.iter().find(|e| e.ticket.id == ticket_id)
    }

    /// Validates at the backend and, on success, marks the local copy used.
    pub async fn validate(&mut self, api: &ApiClient, ticket_id: &str) -> Notice {
        match api.validate_ticket(ticket_id).await {
            Ok(_) => {
                if let Some(entry) = self.entries.iter_mut().find(|e| e.ticket.id == ticket_id) {
                    entry.ticket.used = true;
                }
                info!(ticket_id = %ticket_id, "Ticket validated");
                Notice::success("Success", VALIDATED)
            }
            Err(err) => Notice::from_error("Error", &err).with_description(VALIDATE_FAILED),
        }
    }
}

pub async fn load_ticket_board(api: &ApiClient, user: Option<&User>) -> Gated<TicketBoard> {
    gate!(user, Page::ManageTickets);

    let tickets = match api.list_tickets().await {
        Ok(tickets) => tickets,
        Err(err) => {
            return Gated::Ready(TicketBoard {
                entries: Vec::new(),
                error: Some(Notice::from_error("Error", &err).with_description(LOAD_FAILED)),
            });
        }
    };

    let events = resolve_events(api, &tickets).await;
    let entries = join_events(tickets, &events);
    info!(count = entries.len(), "Ticket board loaded");

    Gated::Ready(TicketBoard {
        entries,
        error: None,
    })
}
