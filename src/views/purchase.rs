//! Order submission.
//!
//! One POST, no retry and no idempotency key. After a successful order the event is
//! fetched again so the caller sees the backend's new seat count.

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::Route;
use crate::models::{Event, Order, OrderRequest, PaymentMethod, TicketType, User};
use crate::pricing::{PriceTable, Quote};
use crate::utils::error::{ClientError, ClientResult};
use crate::utils::notice::Notice;
use crate::views::event_detail::{Availability, MAX_TICKETS_PER_ORDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseForm {
    pub ticket_type: TicketType,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
}

impl Default for PurchaseForm {
    fn default() -> Self {
        Self {
            ticket_type: TicketType::Standard,
            quantity: 1,
            payment_method: PaymentMethod::CreditCard,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    Completed {
        order: Order,
        quote: Quote,
        redirect: Route,
        notice: Notice,
        /// The event as the backend reports it after the sale; `None` if the refetch failed.
        refreshed: Option<Event>,
    },
    /// Stopped locally; nothing was sent.
    Rejected {
        notice: Notice,
        redirect: Option<Route>,
    },
    Failed {
        notice: Notice,
    },
}

impl PurchaseOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            PurchaseOutcome::Completed { notice, .. }
            | PurchaseOutcome::Rejected { notice, .. }
            | PurchaseOutcome::Failed { notice } => notice,
        }
    }

    pub fn redirect(&self) -> Option<&Route> {
        match self {
            PurchaseOutcome::Completed { redirect, .. } => Some(redirect),
            PurchaseOutcome::Rejected { redirect, .. } => redirect.as_ref(),
            PurchaseOutcome::Failed { .. } => None,
        }
    }
}

/// Checks the form against the event and prices it. Does not touch the network.
pub fn build_order_request(
    prices: &PriceTable,
    user: &User,
    event: &Event,
    form: &PurchaseForm,
) -> ClientResult<(OrderRequest, Quote)> {
    let availability = Availability::of(event);
    if !availability.is_open() {
        return Err(ClientError::Validation(availability.message()));
    }
    if form.quantity == 0 {
        return Err(ClientError::Validation(
            "Please select at least one ticket".to_string(),
        ));
    }
    if form.quantity > event.available_seats {
        return Err(ClientError::Validation(format!(
            "Only {} seats are available",
            event.available_seats
        )));
    }
    if form.quantity > MAX_TICKETS_PER_ORDER {
        return Err(ClientError::Validation(format!(
            "At most {} tickets can be bought per order",
            MAX_TICKETS_PER_ORDER
        )));
    }

    let quote = prices.quote(form.ticket_type, event.base_price, form.quantity)?;
    let request = OrderRequest {
        user_id: user.id.clone(),
        event_id: event.id.clone(),
        ticket_type: form.ticket_type,
        quantity: form.quantity,
        unit_price: quote.unit_price,
        payment_method: form.payment_method,
    };
    Ok((request, quote))
}

pub async fn purchase(
    api: &ApiClient,
    prices: &PriceTable,
    user: Option<&User>,
    event: &Event,
    form: &PurchaseForm,
) -> PurchaseOutcome {
    let Some(user) = user else {
        return PurchaseOutcome::Rejected {
            notice: Notice::error(
                "Authentication Required",
                "Please log in to purchase tickets.",
            ),
            redirect: Some(Route::Login),
        };
    };

    let (request, quote) = match build_order_request(prices, user, event, form) {
        Ok(built) => built,
        Err(err) => {
            warn!(event_id = %event.id, error = %err, "Purchase rejected locally");
            return PurchaseOutcome::Rejected {
                notice: Notice::error("Error", err.public_message()),
                redirect: None,
            };
        }
    };

    let order = match api.create_order(&request).await {
        Ok(order) => order,
        Err(err) => {
            return PurchaseOutcome::Failed {
                notice: Notice::from_error("Error", &err),
            };
        }
    };

    info!(
        order_id = %order.id,
        event_id = %event.id,
        quantity = request.quantity,
        ticket_type = %request.ticket_type,
        "Order placed"
    );

    let refreshed = match api.get_event(&event.id).await {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(event_id = %event.id, error = %err, "Could not refresh event after purchase");
            None
        }
    };

    PurchaseOutcome::Completed {
        redirect: Route::Order(order.id.clone()),
        order,
        quote,
        notice: Notice::success("Success", "Tickets purchased successfully!"),
        refreshed,
    }
}
