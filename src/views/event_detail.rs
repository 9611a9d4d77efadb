use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::models::{Event, TicketType, Venue};
use crate::pricing::{format_money, PriceTable};
use crate::utils::error::ClientResult;
use crate::utils::notice::Notice;
use crate::views::{format_date_range, format_time};

/// Upper bound on the quantity picker regardless of stock.
pub const MAX_TICKETS_PER_ORDER: u32 = 10;

pub const NOT_FOUND_TITLE: &str = "Event not found";
pub const LOAD_FAILED: &str = "Failed to load event details. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Availability {
    Open { seats: u32 },
    Unpublished,
    SoldOut,
}

impl Availability {
    pub fn of(event: &Event) -> Self {
        if !event.published {
            Availability::Unpublished
        } else if event.is_sold_out() {
            Availability::SoldOut
        } else {
            Availability::Open {
                seats: event.available_seats,
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Availability::Open { .. })
    }

    pub fn message(&self) -> String {
        match self {
            Availability::Open { seats } => format!("{} seats available", seats),
            Availability::Unpublished => "This event is not available for booking yet.".to_string(),
            Availability::SoldOut => "Sorry, this event is sold out.".to_string(),
        }
    }
}

/// Choices offered by the quantity picker: `1..=min(10, available)`; empty when closed.
pub fn quantity_options(event: &Event) -> Vec<u32> {
    if !Availability::of(event).is_open() {
        return Vec::new();
    }
    (1..=event.available_seats.min(MAX_TICKETS_PER_ORDER)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub event: Event,
    pub venue: Option<Venue>,
}

impl EventDetail {
    pub fn availability(&self) -> Availability {
        Availability::of(&self.event)
    }

    pub fn can_purchase(&self) -> bool {
        self.availability().is_open()
    }

    pub fn quantity_options(&self) -> Vec<u32> {
        quantity_options(&self.event)
    }

    pub fn dates(&self) -> String {
        format_date_range(self.event.event_date, self.event.end_date)
    }

    pub fn time(&self) -> String {
        format_time(self.event.event_date)
    }

    pub fn venue_line(&self) -> Option<String> {
        self.venue.as_ref().map(|venue| {
            let address = venue.address.one_line();
            if address.is_empty() {
                venue.name.clone()
            } else {
                format!("{}, {}", venue.name, address)
            }
        })
    }

    /// "Standard ($50.00)" style labels for the ticket-type picker.
    pub fn price_options(&self, prices: &PriceTable) -> ClientResult<Vec<(TicketType, String)>> {
        Ok(prices
            .price_list(self.event.base_price)?
            .into_iter()
            .map(|(t, price)| (t, format!("{} ({})", t.label(), format_money(price))))
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loaded(Box<EventDetail>),
    NotFound { notice: Notice },
}

impl DetailState {
    pub fn detail(&self) -> Option<&EventDetail> {
        match self {
            DetailState::Loaded(detail) => Some(detail),
            DetailState::NotFound { .. } => None,
        }
    }
}

/// Fetches the event, then its venue. A venue failure only drops the venue line.
pub async fn load_event_detail(api: &ApiClient, id: &str) -> DetailState {
    let event = match api.get_event(id).await {
        Ok(event) => event,
        Err(err) => {
            return DetailState::NotFound {
                notice: Notice::from_error("Error", &err).with_description(LOAD_FAILED),
            };
        }
    };

    let venue = match event.venue_id.as_deref().filter(|v| !v.is_empty()) {
        Some(venue_id) => match api.get_venue(venue_id).await {
            Ok(venue) => Some(venue),
            Err(err) => {
                warn!(venue_id, error = %err, "Venue lookup failed");
                None
            }
        },
        None => None,
    };

    info!(event_id = %event.id, "Event detail loaded");
    DetailState::Loaded(Box::new(EventDetail { event, venue }))
}
