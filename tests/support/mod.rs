#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use ticketdesk::auth::accounts::{authenticate, SEEDED_PASSWORD};
use ticketdesk::models::User;
use ticketdesk::{ApiClient, Config};

/// How the dashboard endpoints answer.
#[derive(Debug, Clone)]
pub enum DashboardMode {
    Ok(Value),
    Fail(StatusCode, Value),
    Slow(Duration),
}

/// In-memory backend state. Handlers never hold a lock across an await.
#[derive(Debug)]
pub struct MockBackend {
    pub events: Mutex<Vec<Value>>,
    pub venues: Mutex<Vec<Value>>,
    pub tickets: Mutex<Vec<Value>>,
    pub users: Mutex<Vec<Value>>,
    pub orders: Mutex<Vec<Value>>,
    pub dashboard: Mutex<DashboardMode>,
    /// Searches whose title contains this text are answered after a delay.
    pub slow_search: Mutex<Option<(String, Duration)>>,
}

impl MockBackend {
    pub fn seeded() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(vec![
                json!({
                    "id": "e1",
                    "title": "Summer Music Festival",
                    "description": "Three days of live bands",
                    "eventDate": "2030-06-01T18:00:00",
                    "endDate": "2030-06-03T23:00:00",
                    "venueId": "v1",
                    "venueName": "City Concert Hall",
                    "organizerId": "2",
                    "categories": ["Music"],
                    "published": true,
                    "totalSeats": 500,
                    "availableSeats": 100,
                    "basePrice": 100
                }),
                json!({
                    "id": "e2",
                    "title": "Tech Conference",
                    "description": "Talks about software",
                    "eventDate": "2020-03-01T09:00:00",
                    "venueId": "gone",
                    "organizerId": "2",
                    "categories": ["Tech"],
                    "published": true,
                    "totalSeats": 50,
                    "availableSeats": 2,
                    "basePrice": "49.99"
                }),
                json!({
                    "id": "e3",
                    "title": "Private Preview",
                    "description": "Invite only",
                    "organizerId": "9",
                    "published": false,
                    "totalSeats": 20,
                    "availableSeats": 20,
                    "basePrice": null
                }),
            ]),
            venues: Mutex::new(vec![json!({
                "id": "v1",
                "name": "City Concert Hall",
                "description": "A prestigious concert hall",
                "address": {
                    "street": "123 Main St",
                    "city": "New York",
                    "state": "NY",
                    "zipCode": "10001",
                    "country": "USA"
                },
                "capacity": 2000
            })]),
            tickets: Mutex::new(vec![
                json!({
                    "id": "t1", "eventId": "e1", "orderId": "o1", "userId": "3",
                    "type": "VIP", "price": 200, "ticketNumber": "AB12CD34", "used": false
                }),
                json!({
                    "id": "t2", "eventId": "deleted", "orderId": "o2", "userId": "3",
                    "type": "STANDARD", "price": 40, "ticketNumber": "ZZ99YY88", "used": false
                }),
                json!({
                    "id": "t3", "eventId": "e2", "orderId": "o3", "userId": "3",
                    "type": "STANDARD", "price": 49.99, "ticketNumber": "QQ11WW22", "used": false
                }),
                json!({
                    "id": "t4", "eventId": "e1", "orderId": "o4", "userId": "1",
                    "type": "EARLY_BIRD", "price": 80, "ticketNumber": "MM55NN66", "used": true
                }),
            ]),
            users: Mutex::new(vec![json!({
                "id": "3",
                "name": "John Customer",
                "email": "customer@example.com",
                "phone": "555-0100",
                "role": "CUSTOMER",
                "status": "ACTIVE",
                "registrationDate": "2024-01-15T10:00:00"
            })]),
            orders: Mutex::new(Vec::new()),
            dashboard: Mutex::new(DashboardMode::Ok(json!({
                "userCount": 3,
                "eventCount": 3,
                "ticketCount": 4,
                "revenue": 369.99,
                "userGrowth": 5,
                "topEvents": [{ "id": "e1", "title": "Summer Music Festival", "ticketsSold": 2, "revenue": 280 }]
            }))),
            slow_search: Mutex::new(None),
        })
    }

    pub fn set_dashboard(&self, mode: DashboardMode) {
        *self.dashboard.lock().unwrap() = mode;
    }

    pub fn slow_search(&self, needle: &str, delay: Duration) {
        *self.slow_search.lock().unwrap() = Some((needle.to_string(), delay));
    }

    pub fn orders(&self) -> Vec<Value> {
        self.orders.lock().unwrap().clone()
    }

    pub fn event(&self, id: &str) -> Option<Value> {
        find(&self.events.lock().unwrap(), id)
    }
}

type Shared = State<Arc<MockBackend>>;

fn find(items: &[Value], id: &str) -> Option<Value> {
    items.iter().find(|item| item["id"] == id).cloned()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} not found", what) })),
    )
        .into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventFilter {
    organizer_id: Option<String>,
}

async fn list_events(State(state): Shared, Query(filter): Query<EventFilter>) -> Json<Vec<Value>> {
    let events = state.events.lock().unwrap().clone();
    Json(match filter.organizer_id {
        Some(id) => events
            .into_iter()
            .filter(|e| e["organizerId"] == id.as_str())
            .collect(),
        None => events,
    })
}

#[derive(Deserialize)]
struct Search {
    title: String,
}

async fn search_events(State(state): Shared, Query(search): Query<Search>) -> Json<Vec<Value>> {
    let delay = state
        .slow_search
        .lock()
        .unwrap()
        .clone()
        .filter(|(needle, _)| search.title.contains(needle.as_str()))
        .map(|(_, delay)| delay);
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let needle = search.title.to_lowercase();
    let events = state.events.lock().unwrap().clone();
    Json(
        events
            .into_iter()
            .filter(|e| {
                e["title"]
                    .as_str()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .collect(),
    )
}

async fn get_event(State(state): Shared, Path(id): Path<String>) -> Response {
    match state.event(&id) {
        Some(event) => Json(event).into_response(),
        None => not_found("Event"),
    }
}

async fn create_event(State(state): Shared, Json(mut body): Json<Value>) -> Response {
    body["id"] = json!(uuid::Uuid::new_v4().to_string());
    state.events.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn publish_event(State(state): Shared, Path(id): Path<String>) -> Response {
    let mut events = state.events.lock().unwrap();
    match events.iter_mut().find(|e| e["id"] == id.as_str()) {
        Some(event) => {
            event["published"] = json!(true);
            Json(event.clone()).into_response()
        }
        None => not_found("Event"),
    }
}

async fn delete_event(State(state): Shared, Path(id): Path<String>) -> Response {
    let mut events = state.events.lock().unwrap();
    let before = events.len();
    events.retain(|e| e["id"] != id.as_str());
    if events.len() == before {
        return not_found("Event");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_venues(State(state): Shared) -> Json<Vec<Value>> {
    Json(state.venues.lock().unwrap().clone())
}

async fn get_venue(State(state): Shared, Path(id): Path<String>) -> Response {
    match find(&state.venues.lock().unwrap(), &id) {
        Some(venue) => Json(venue).into_response(),
        None => not_found("Venue"),
    }
}

async fn create_venue(State(state): Shared, Json(mut body): Json<Value>) -> Response {
    body["id"] = json!(uuid::Uuid::new_v4().to_string());
    state.venues.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

/// Mirrors the real order endpoint: seats are taken atomically or the order is refused.
async fn create_order(State(state): Shared, Json(body): Json<Value>) -> Response {
    let quantity = body["quantity"].as_u64().unwrap_or(0);
    let event_id = body["eventId"].as_str().unwrap_or_default().to_string();

    let mut events = state.events.lock().unwrap();
    let Some(event) = events.iter_mut().find(|e| e["id"] == event_id.as_str()) else {
        return not_found("Event");
    };
    let available = event["availableSeats"].as_u64().unwrap_or(0);
    if quantity > available {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Not enough seats available" })),
        )
            .into_response();
    }
    event["availableSeats"] = json!(available - quantity);
    drop(events);

    let unit_price = body["unitPrice"].as_f64().unwrap_or(0.0);
    let order = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "userId": body["userId"],
        "eventId": event_id,
        "quantity": quantity,
        "unitPrice": unit_price,
        "totalAmount": unit_price * quantity as f64,
        "status": "COMPLETED",
        "ticketType": body["ticketType"],
        "paymentMethod": body["paymentMethod"],
        "orderDate": "2025-05-01T12:00:00"
    });
    state.orders.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn list_tickets(State(state): Shared) -> Json<Vec<Value>> {
    Json(state.tickets.lock().unwrap().clone())
}

async fn user_tickets(State(state): Shared, Path(id): Path<String>) -> Json<Vec<Value>> {
    let tickets = state.tickets.lock().unwrap().clone();
    Json(
        tickets
            .into_iter()
            .filter(|t| t["userId"] == id.as_str())
            .collect(),
    )
}

async fn validate_ticket(State(state): Shared, Path(id): Path<String>) -> Response {
    let mut tickets = state.tickets.lock().unwrap();
    match tickets.iter_mut().find(|t| t["id"] == id.as_str()) {
        Some(ticket) if ticket["used"] == true => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Ticket already used" })),
        )
            .into_response(),
        Some(ticket) => {
            ticket["used"] = json!(true);
            Json(ticket.clone()).into_response()
        }
        None => not_found("Ticket"),
    }
}

async fn get_user(State(state): Shared, Path(id): Path<String>) -> Response {
    match find(&state.users.lock().unwrap(), &id) {
        Some(user) => Json(user).into_response(),
        None => not_found("User"),
    }
}

async fn create_user(State(state): Shared, Json(mut body): Json<Value>) -> Response {
    let mut users = state.users.lock().unwrap();
    if users.iter().any(|u| u["email"] == body["email"]) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email already registered" })),
        )
            .into_response();
    }
    body["id"] = json!(uuid::Uuid::new_v4().to_string());
    if let Some(fields) = body.as_object_mut() {
        fields.remove("password");
    }
    users.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn dashboard_response(state: &MockBackend) -> Response {
    let mode = state.dashboard.lock().unwrap().clone();
    match mode {
        DashboardMode::Ok(body) => Json(body).into_response(),
        DashboardMode::Fail(status, body) => (status, Json(body)).into_response(),
        DashboardMode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({})).into_response()
        }
    }
}

async fn admin_metrics(State(state): Shared) -> Response {
    dashboard_response(&state).await
}

async fn organizer_metrics(State(state): Shared, Path(_id): Path<String>) -> Response {
    dashboard_response(&state).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "database": "UP" }))
}

pub fn router(state: Arc<MockBackend>) -> Router {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/search", get(search_events))
        .route("/api/events/:id", get(get_event).delete(delete_event))
        .route("/api/events/:id/publish", put(publish_event))
        .route("/api/venues", get(list_venues).post(create_venue))
        .route("/api/venues/:id", get(get_venue))
        .route("/api/orders", post(create_order))
        .route("/api/tickets", get(list_tickets))
        .route("/api/tickets/user/:id", get(user_tickets))
        .route("/api/tickets/:id/validate", put(validate_ticket))
        .route("/api/users", post(create_user))
        .route("/api/users/:id", get(get_user))
        .route("/api/dashboard/metrics", get(admin_metrics))
        .route("/api/dashboard/metrics/organizer/:id", get(organizer_metrics))
        .route("/api/health", get(health))
        .with_state(state)
}

/// Serves the mock on an ephemeral port and returns its base URL.
pub async fn spawn(state: Arc<MockBackend>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        ..Config::default()
    }
}

pub fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&config(base_url)).unwrap()
}

pub async fn backend() -> (Arc<MockBackend>, ApiClient) {
    let state = MockBackend::seeded();
    let base = spawn(state.clone()).await;
    (state, client(&base))
}

pub fn login(email: &str) -> User {
    authenticate(email, SEEDED_PASSWORD).unwrap()
}

pub fn admin() -> User {
    login("admin@example.com")
}

pub fn organizer() -> User {
    login("organizer@example.com")
}

pub fn customer() -> User {
    login("customer@example.com")
}
