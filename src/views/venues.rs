use tracing::info;

use crate::api::ApiClient;
use crate::auth::Page;
use crate::models::{Address, NewVenue, User, Venue};
use crate::utils::error::{ClientError, ClientResult};
use crate::utils::notice::Notice;
use crate::views::{admit, gate, needle, Gated};

pub const NO_VENUES: &str = "No venues found";
pub const LOAD_FAILED: &str = "Failed to load venues. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct VenueList {
    pub venues: Vec<Venue>,
    /// Whether the viewer may add venues; only admins can.
    pub can_create: bool,
    pub error: Option<Notice>,
}

impl VenueList {
    pub fn filter(&self, query: &str) -> Vec<&Venue> {
        filter_venues(&self.venues, query)
    }

    pub fn empty_message(&self, query: &str) -> Option<&'static str> {
        self.filter(query).is_empty().then_some(NO_VENUES)
    }
}

/// Case-insensitive match on name, description or city.
pub fn filter_venues<'a>(venues: &'a [Venue], query: &str) -> Vec<&'a Venue> {
    let Some(needle) = needle(query) else {
        return venues.iter().collect();
    };
    venues
        .iter()
        .filter(|v| {
            v.name.to_lowercase().contains(&needle)
                || v.description.to_lowercase().contains(&needle)
                || v.address.city.to_lowercase().contains(&needle)
        })
        .collect()
}

pub async fn load_venues(api: &ApiClient, user: Option<&User>) -> VenueList {
    let can_create = admit(user, Page::CreateVenue).is_ok();

    match api.list_venues().await {
        Ok(venues) => {
            info!(count = venues.len(), "Venues loaded");
            VenueList {
                venues,
                can_create,
                error: None,
            }
        }
        Err(err) => VenueList {
            venues: Vec::new(),
            can_create,
            error: Some(Notice::from_error("Error", &err).with_description(LOAD_FAILED)),
        },
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueDraft {
    pub name: String,
    pub address: Address,
    pub capacity: u32,
    pub description: String,
    pub image_url: Option<String>,
}

impl VenueDraft {
    pub fn into_new_venue(self) -> ClientResult<NewVenue> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Validation("Venue name is required".to_string()));
        }
        if self.capacity == 0 {
            return Err(ClientError::Validation(
                "Capacity must be a positive number".to_string(),
            ));
        }
        Ok(NewVenue {
            name: self.name.trim().to_string(),
            address: self.address,
            capacity: self.capacity,
            description: self.description.trim().to_string(),
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

pub async fn create_venue(
    api: &ApiClient,
    user: Option<&User>,
    draft: VenueDraft,
) -> Gated<ClientResult<Venue>> {
    gate!(user, Page::CreateVenue);

    let result = match draft.into_new_venue() {
        Ok(body) => api.create_venue(&body).await,
        Err(err) => Err(err),
    };
    if let Ok(venue) = &result {
        info!(venue_id = %venue.id, "Venue created");
    }
    Gated::Ready(result)
}
