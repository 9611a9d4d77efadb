use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::lenient;
use crate::models::ticket::TicketType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Canceled,
    Refunded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "CREDIT_CARD" | "CARD" => Ok(PaymentMethod::CreditCard),
            "PAYPAL" => Ok(PaymentMethod::Paypal),
            "BANK_TRANSFER" | "BANK" => Ok(PaymentMethod::BankTransfer),
            _ => Err(format!("unknown payment method '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub ticket_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub unit_price: Decimal,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub total_amount: Decimal,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub ticket_type: Option<TicketType>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(
        default,
        alias = "orderDate",
        deserialize_with = "lenient::datetime",
        serialize_with = "lenient::serialize_datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// The recorded total, or quantity x unit price when the backend left it at zero.
    pub fn effective_total(&self) -> Decimal {
        if self.total_amount.is_zero() && self.quantity > 0 && self.unit_price > Decimal::ZERO {
            self.unit_price * Decimal::from(self.quantity)
        } else {
            self.total_amount
        }
    }
}

/// Body for `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: String,
    pub event_id: String,
    pub ticket_type: TicketType,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            user_id: "3".to_string(),
            event_id: "e1".to_string(),
            ticket_type: TicketType::Vip,
            quantity: 2,
            unit_price: Decimal::new(20000, 2),
            payment_method: PaymentMethod::CreditCard,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "userId": "3",
                "eventId": "e1",
                "ticketType": "VIP",
                "quantity": 2,
                "unitPrice": 200.0,
                "paymentMethod": "CREDIT_CARD"
            })
        );
    }

    #[test]
    fn test_effective_total_falls_back_to_line_price() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "userId": "3",
            "quantity": 3,
            "unitPrice": 40,
            "totalAmount": 0,
            "status": "COMPLETED"
        }))
        .unwrap();
        assert_eq!(order.effective_total(), Decimal::from(120));
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn test_placed_order_with_null_enums_still_decodes() {
        let order: Order = serde_json::from_value(json!({
            "id": "o2",
            "quantity": 1,
            "status": null,
            "ticketType": "BALCONY",
            "paymentMethod": null
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.ticket_type.is_none());
        assert!(order.payment_method.is_none());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::Paypal));
        assert_eq!(
            "bank transfer".parse::<PaymentMethod>(),
            Ok(PaymentMethod::BankTransfer)
        );
        assert!("cash".parse::<PaymentMethod>().is_err());
    }
}
