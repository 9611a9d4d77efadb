//! Ticket pricing.
//!
//! Unit price is the event's base price times a fixed per-type multiplier. A quote rounds
//! that unit price to cents once, and its total is the rounded unit price times quantity,
//! the same product the backend computes from the order body.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::TicketType;
use crate::utils::error::{ClientError, ClientResult};

pub const DEFAULT_EARLY_BIRD: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTable {
    early_bird: Decimal,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            early_bird: DEFAULT_EARLY_BIRD,
        }
    }
}

impl PriceTable {
    pub fn new(early_bird: Decimal) -> Self {
        Self { early_bird }
    }

    pub fn multiplier(&self, ticket_type: TicketType) -> Decimal {
        match ticket_type {
            TicketType::Standard => Decimal::ONE,
            TicketType::Vip => Decimal::TWO,
            TicketType::Premium => Decimal::new(15, 1),
            TicketType::EarlyBird => self.early_bird,
        }
    }

    pub fn unit_price(&self, ticket_type: TicketType, base_price: Decimal) -> ClientResult<Decimal> {
        if base_price.is_sign_negative() && !base_price.is_zero() {
            return Err(ClientError::Validation(format!(
                "Base price must not be negative, got {}",
                base_price
            )));
        }
        Ok(base_price * self.multiplier(ticket_type))
    }

    pub fn quote(
        &self,
        ticket_type: TicketType,
        base_price: Decimal,
        quantity: u32,
    ) -> ClientResult<Quote> {
        let unit_price = round_cents(self.unit_price(ticket_type, base_price)?);
        Ok(Quote {
            ticket_type,
            unit_price,
            quantity,
            total: unit_price * Decimal::from(quantity),
        })
    }

    /// One entry per ticket type, in display order.
    pub fn price_list(&self, base_price: Decimal) -> ClientResult<Vec<(TicketType, Decimal)>> {
        TicketType::ALL
            .into_iter()
            .map(|t| self.unit_price(t, base_price).map(|price| (t, price)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub ticket_type: TicketType,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub total: Decimal,
}

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", round_cents(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    #[test]
    fn test_multiplier_table() {
        let table = PriceTable::default();
        let base = dec("100");
        assert_eq!(table.unit_price(TicketType::Standard, base).unwrap(), dec("100"));
        assert_eq!(table.unit_price(TicketType::Vip, base).unwrap(), dec("200"));
        assert_eq!(table.unit_price(TicketType::Premium, base).unwrap(), dec("150"));
        assert_eq!(table.unit_price(TicketType::EarlyBird, base).unwrap(), dec("80"));
        assert_eq!(
            format_money(table.unit_price(TicketType::Vip, base).unwrap()),
            "$200.00"
        );
    }

    #[test]
    fn test_early_bird_is_configurable() {
        let table = PriceTable::new(dec("0.85"));
        assert_eq!(
            table.unit_price(TicketType::EarlyBird, dec("100")).unwrap(),
            dec("85")
        );
        assert_eq!(table.multiplier(TicketType::Vip), dec("2"));
    }

    #[test]
    fn test_quote_multiplies_by_quantity() {
        let quote = PriceTable::default()
            .quote(TicketType::Premium, dec("33.33"), 3)
            .unwrap();
        assert_eq!(quote.unit_price, dec("50.00"));
        assert_eq!(quote.total, dec("150.00"));
        assert_eq!(format_money(quote.total), "$150.00");
    }

    #[test]
    fn test_zero_base_price_is_free() {
        let quote = PriceTable::default()
            .quote(TicketType::Vip, Decimal::ZERO, 4)
            .unwrap();
        assert_eq!(quote.total, Decimal::ZERO);
        assert_eq!(format_money(quote.total), "$0.00");
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let err = PriceTable::default()
            .unit_price(TicketType::Standard, dec("-1"))
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_price_list_order() {
        let list = PriceTable::default().price_list(dec("10")).unwrap();
        let types: Vec<_> = list.iter().map(|(t, _)| *t).collect();
        assert_eq!(types, TicketType::ALL.to_vec());
        assert_eq!(list[3].1, dec("8.0"));
    }
}
