//! Typed access to the ticketing backend's REST endpoints.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::models::{
    DashboardMetrics, Event, NewEvent, NewUser, NewVenue, Order, OrderRequest, Ticket, User,
    Venue,
};
use crate::utils::error::{ClientError, ClientResult};
use crate::utils::response;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    dashboard_timeout: Duration,
    health_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ClientError::Config(format!("Invalid API URL '{}': {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL '{}' cannot carry a path",
                config.api_base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            dashboard_timeout: config.dashboard_timeout,
            health_timeout: config.health_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `segments` onto the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, %url, "API request");
        self.http.request(method, url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        response::json(response).await
    }

    // ========== Events ==========

    pub async fn list_events(&self, organizer_id: Option<&str>) -> ClientResult<Vec<Event>> {
        let mut request = self.request(Method::GET, &["api", "events"]);
        if let Some(id) = organizer_id {
            request = request.query(&[("organizerId", id)]);
        }
        self.fetch(request).await
    }

    pub async fn search_events(&self, title: &str) -> ClientResult<Vec<Event>> {
        let request = self
            .request(Method::GET, &["api", "events", "search"])
            .query(&[("title", title)]);
        self.fetch(request).await
    }

    pub async fn get_event(&self, id: &str) -> ClientResult<Event> {
        self.fetch(self.request(Method::GET, &["api", "events", id]))
            .await
    }

    pub async fn create_event(&self, event: &NewEvent) -> ClientResult<Event> {
        let request = self.request(Method::POST, &["api", "events"]).json(event);
        self.fetch(request).await
    }

    pub async fn publish_event(&self, id: &str) -> ClientResult<Event> {
        self.fetch(self.request(Method::PUT, &["api", "events", id, "publish"]))
            .await
    }

    pub async fn delete_event(&self, id: &str) -> ClientResult<()> {
        let response = self
            .request(Method::DELETE, &["api", "events", id])
            .send()
            .await?;
        response::empty(response).await
    }

    // ========== Venues ==========

    pub async fn list_venues(&self) -> ClientResult<Vec<Venue>> {
        self.fetch(self.request(Method::GET, &["api", "venues"]))
            .await
    }

    pub async fn get_venue(&self, id: &str) -> ClientResult<Venue> {
        self.fetch(self.request(Method::GET, &["api", "venues", id]))
            .await
    }

    pub async fn create_venue(&self, venue: &NewVenue) -> ClientResult<Venue> {
        let request = self.request(Method::POST, &["api", "venues"]).json(venue);
        self.fetch(request).await
    }

    // ========== Orders & tickets ==========

    pub async fn create_order(&self, order: &OrderRequest) -> ClientResult<Order> {
        let request = self.request(Method::POST, &["api", "orders"]).json(order);
        self.fetch(request).await
    }

    pub async fn list_tickets(&self) -> ClientResult<Vec<Ticket>> {
        self.fetch(self.request(Method::GET, &["api", "tickets"]))
            .await
    }

    pub async fn user_tickets(&self, user_id: &str) -> ClientResult<Vec<Ticket>> {
        self.fetch(self.request(Method::GET, &["api", "tickets", "user", user_id]))
            .await
    }

    pub async fn validate_ticket(&self, id: &str) -> ClientResult<Ticket> {
        self.fetch(self.request(Method::PUT, &["api", "tickets", id, "validate"]))
            .await
    }

    // ========== Users ==========

    pub async fn get_user(&self, id: &str) -> ClientResult<User> {
        self.fetch(self.request(Method::GET, &["api", "users", id]))
            .await
    }

    pub async fn create_user(&self, user: &NewUser) -> ClientResult<User> {
        let request = self.request(Method::POST, &["api", "users"]).json(user);
        self.fetch(request).await
    }

    // ========== Dashboard & health ==========

    pub async fn admin_metrics(&self) -> ClientResult<DashboardMetrics> {
        let request = self
            .request(Method::GET, &["api", "dashboard", "metrics"])
            .timeout(self.dashboard_timeout);
        self.fetch(request).await
    }

    pub async fn organizer_metrics(&self, organizer_id: &str) -> ClientResult<DashboardMetrics> {
        let request = self
            .request(
                Method::GET,
                &["api", "dashboard", "metrics", "organizer", organizer_id],
            )
            .timeout(self.dashboard_timeout);
        self.fetch(request).await
    }

    pub async fn health(&self) -> ClientResult<Value> {
        let request = self
            .request(Method::GET, &["api", "health"])
            .timeout(self.health_timeout);
        self.fetch(request).await
    }
}
