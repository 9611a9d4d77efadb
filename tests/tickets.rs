mod support;

use chrono::{TimeZone, Utc};
use serde_json::json;

use ticketdesk::auth::Route;
use ticketdesk::models::TicketType;
use ticketdesk::views::my_tickets::{load_my_tickets, TicketStatus};
use ticketdesk::views::ticket_management::{load_ticket_board, VALIDATED, VALIDATE_FAILED};
use ticketdesk::views::Gated;

use support::{admin, backend, customer, organizer};

#[tokio::test]
async fn test_my_tickets_joins_events_with_fallbacks() {
    let (_state, api) = backend().await;
    let user = customer();
    let tickets = load_my_tickets(&api, Some(&user)).await.ready().unwrap();

    assert!(tickets.error.is_none());
    assert_eq!(tickets.entries.len(), 3);

    let by_id = |id: &str| {
        tickets
            .entries
            .iter()
            .find(|e| e.ticket.id == id)
            .unwrap()
    };

    let festival = by_id("t1");
    assert_eq!(festival.event_title(), "Summer Music Festival");
    assert_eq!(festival.venue(), "City Concert Hall");
    assert_eq!(festival.price(), "$200.00");

    let orphan = by_id("t2");
    assert_eq!(orphan.event_title(), "Unknown Event");
    assert_eq!(orphan.event_date(), "Unknown Date");
    assert_eq!(orphan.venue(), "Venue information not available");

    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(by_id("t3").status(now), TicketStatus::Missed);
    assert_eq!(festival.status(now), TicketStatus::Valid);

    let upcoming: Vec<_> = tickets.upcoming(now).iter().map(|e| e.ticket.id.clone()).collect();
    let past: Vec<_> = tickets.past(now).iter().map(|e| e.ticket.id.clone()).collect();
    assert_eq!(upcoming, vec!["t1", "t2"]);
    assert_eq!(past, vec!["t3"]);
}

#[tokio::test]
async fn test_malformed_ticket_does_not_hide_the_rest() {
    let (state, api) = backend().await;
    state.tickets.lock().unwrap().push(json!({
        "id": "t9", "eventId": "e1", "orderId": null, "userId": "3",
        "type": null, "price": null, "ticketNumber": null, "used": null
    }));
    state.tickets.lock().unwrap().push(json!({
        "id": "t10", "eventId": "e1", "userId": "3", "type": "BALCONY", "price": "oops"
    }));

    let user = customer();
    let tickets = load_my_tickets(&api, Some(&user)).await.ready().unwrap();
    assert!(tickets.error.is_none());
    assert_eq!(tickets.entries.len(), 5);

    let odd = tickets.entries.iter().find(|e| e.ticket.id == "t9").unwrap();
    assert_eq!(odd.ticket.ticket_type, TicketType::Standard);
    assert_eq!(odd.price(), "$0.00");
    assert_eq!(odd.event_title(), "Summer Music Festival");
    assert!(!odd.ticket.used);

    let unknown = tickets.entries.iter().find(|e| e.ticket.id == "t10").unwrap();
    assert_eq!(unknown.ticket.ticket_type, TicketType::Standard);
}

#[tokio::test]
async fn test_my_tickets_requires_session() {
    let (_state, api) = backend().await;
    assert_eq!(
        load_my_tickets(&api, None).await.redirect(),
        Some(&Route::Login)
    );
}

#[tokio::test]
async fn test_user_without_tickets_sees_empty_message() {
    let (state, api) = backend().await;
    state.tickets.lock().unwrap().clear();
    let user = customer();
    let tickets = load_my_tickets(&api, Some(&user)).await.ready().unwrap();
    assert_eq!(tickets.empty_message(), Some("You don't have any tickets yet."));
}

#[tokio::test]
async fn test_board_is_admin_only() {
    let (_state, api) = backend().await;
    for user in [customer(), organizer()] {
        match load_ticket_board(&api, Some(&user)).await {
            Gated::Redirect(route) => assert_eq!(route, Route::Home),
            Gated::Ready(_) => panic!("{} must not see the ticket board", user.role),
        }
    }
}

#[tokio::test]
async fn test_board_filter_and_validate() {
    let (state, api) = backend().await;
    let user = admin();
    let mut board = load_ticket_board(&api, Some(&user)).await.ready().unwrap();
    assert_eq!(board.entries.len(), 4);

    let found: Vec<_> = board.filter("tech").iter().map(|e| e.ticket.id.clone()).collect();
    assert_eq!(found, vec!["t3"]);
    let found: Vec<_> = board.filter("ab12").iter().map(|e| e.ticket.id.clone()).collect();
    assert_eq!(found, vec!["t1"]);

    let notice = board.validate(&api, "t1").await;
    assert_eq!(notice.description, VALIDATED);
    assert!(board.find("t1").unwrap().ticket.used);
    let stored = state.tickets.lock().unwrap()[0].clone();
    assert_eq!(stored["used"], true);

    let notice = board.validate(&api, "t1").await;
    assert!(notice.is_error());
    assert_eq!(notice.description, VALIDATE_FAILED);
}
