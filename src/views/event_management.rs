//! Organizer tooling: draft checks, creation, publishing and deletion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::api::ApiClient;
use crate::auth::{Page, Route};
use crate::models::{Event, NewEvent, User};
use crate::utils::error::{ClientError, ClientResult};
use crate::utils::notice::Notice;
use crate::views::{gate, Gated};

/// One failed form rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Form state for a new event, checked locally before anything is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub event_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub venue_id: String,
    pub image_url: Option<String>,
    pub categories: Vec<String>,
    pub base_price: Decimal,
    pub total_seats: u32,
}

impl EventDraft {
    /// Adds a trimmed category, ignoring blanks and duplicates. Returns whether it was added.
    pub fn add_category(&mut self, category: &str) -> bool {
        let category = category.trim();
        if category.is_empty() || self.categories.iter().any(|c| c == category) {
            return false;
        }
        self.categories.push(category.to_string());
        true
    }

    pub fn remove_category(&mut self, category: &str) {
        self.categories.retain(|c| c != category);
    }

    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.trim().chars().count() < 3 {
            errors.push(FieldError::new("title", "Title must be at least 3 characters"));
        }
        if self.description.trim().chars().count() < 10 {
            errors.push(FieldError::new(
                "description",
                "Description must be at least 10 characters",
            ));
        }
        if self.event_date.is_none() {
            errors.push(FieldError::new("eventDate", "Please enter a valid date"));
        }
        if let (Some(start), Some(end)) = (self.event_date, self.end_date) {
            if end < start {
                errors.push(FieldError::new(
                    "endDate",
                    "End date cannot be before the start date",
                ));
            }
        }
        if self.venue_id.trim().is_empty() {
            errors.push(FieldError::new("venueId", "Please select a venue"));
        }
        if self.base_price <= Decimal::ZERO {
            errors.push(FieldError::new("basePrice", "Price must be a positive number"));
        }
        if self.total_seats == 0 {
            errors.push(FieldError::new(
                "totalSeats",
                "Total seats must be a positive number",
            ));
        }
        if self.categories.is_empty() {
            errors.push(FieldError::new(
                "categories",
                "Please add at least one category",
            ));
        }
        errors
    }

    /// The creation body: unpublished, with every seat available.
    pub fn into_new_event(self, organizer_id: &str) -> ClientResult<NewEvent> {
        let errors = self.errors();
        if !errors.is_empty() {
            let messages: Vec<&str> = errors.iter().map(|e| e.message).collect();
            return Err(ClientError::Validation(messages.join("; ")));
        }

        Ok(NewEvent {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            event_date: self.event_date,
            end_date: self.end_date,
            venue_id: self.venue_id.trim().to_string(),
            organizer_id: organizer_id.to_string(),
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            categories: self.categories,
            base_price: self.base_price,
            total_seats: self.total_seats,
            available_seats: self.total_seats,
            published: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created {
        event: Box<Event>,
        notice: Notice,
        redirect: Route,
    },
    Rejected {
        notice: Notice,
    },
}

impl CreateOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            CreateOutcome::Created { notice, .. } | CreateOutcome::Rejected { notice } => notice,
        }
    }
}

pub async fn create_event(
    api: &ApiClient,
    user: Option<&User>,
    draft: EventDraft,
) -> Gated<CreateOutcome> {
    let user = gate!(user, Page::CreateEvent);

    let body = match draft.into_new_event(&user.id) {
        Ok(body) => body,
        Err(err) => {
            return Gated::Ready(CreateOutcome::Rejected {
                notice: Notice::error("Error", err.public_message()),
            });
        }
    };

    match api.create_event(&body).await {
        Ok(event) => {
            info!(event_id = %event.id, organizer_id = %user.id, "Event created");
            Gated::Ready(CreateOutcome::Created {
                redirect: Route::Event(event.id.clone()),
                event: Box::new(event),
                notice: Notice::success(
                    "Event Created",
                    "Your event has been created successfully",
                ),
            })
        }
        Err(err) => Gated::Ready(CreateOutcome::Rejected {
            notice: Notice::from_error("Error", &err)
                .with_description("Failed to create event. Please try again."),
        }),
    }
}

/// The organizer's own events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventManager {
    pub events: Vec<Event>,
    pub error: Option<Notice>,
}

impl EventManager {
    pub fn find(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Replaces the local copy with the backend's published event.
    pub async fn publish(&mut self, api: &ApiClient, event_id: &str) -> Notice {
        match api.publish_event(event_id).await {
            Ok(updated) => {
                info!(event_id = %event_id, "Event published");
                if let Some(slot) = self.events.iter_mut().find(|e| e.id == event_id) {
                    *slot = updated;
                }
                Notice::success("Event Published", "Your event is now visible to the public")
            }
            Err(err) => {
                Notice::from_error("Error", &err).with_description("Failed to publish the event")
            }
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, event_id: &str) -> Notice {
        match api.delete_event(event_id).await {
            Ok(()) => {
                info!(event_id = %event_id, "Event deleted");
                self.events.retain(|e| e.id != event_id);
                Notice::success("Event Deleted", "The event has been successfully deleted")
            }
            Err(err) => {
                Notice::from_error("Error", &err).with_description("Failed to delete the event")
            }
        }
    }
}

pub async fn load_event_manager(api: &ApiClient, user: Option<&User>) -> Gated<EventManager> {
    let user = gate!(user, Page::ManageEvents);

    match api.list_events(Some(&user.id)).await {
        Ok(events) => {
            info!(organizer_id = %user.id, count = events.len(), "Organizer events loaded");
            Gated::Ready(EventManager {
                events,
                error: None,
            })
        }
        Err(err) => Gated::Ready(EventManager {
            events: Vec::new(),
            error: Some(
                Notice::from_error("Error", &err).with_description("Failed to fetch your events"),
            ),
        }),
    }
}
