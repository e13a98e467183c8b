//! # Orders
//!
//! Order submission against the payment gateway.
//!
//! ```text
//! submit_order(order, card)
//!        │
//!        ▼
//!   payments.charge(card, order.total_amount)   (exactly once)
//!        │
//!        ├── Ok(Success) ──► {"success": true}
//!        ├── Ok(Failed)  ──► {"success": false, "error": "payment_error"}
//!        └── Err(e)      ──► ServiceError::Collaborator(e)
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::Money;
use tracing::{info, warn};

use crate::collaborators::{ChargeStatus, CreditCard};
use crate::error::ServiceResult;
use crate::storefront::Storefront;

/// An order ready for payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub total_amount: Money,
}

impl Order {
    pub fn new(total_amount: Money) -> Self {
        Order { total_amount }
    }
}

/// Why an order was not placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFailure {
    PaymentError,
}

/// Result of [`Storefront::submit_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OrderFailure>,
}

impl OrderOutcome {
    pub fn placed() -> Self {
        OrderOutcome {
            success: true,
            error: None,
        }
    }

    pub fn failed(reason: OrderFailure) -> Self {
        OrderOutcome {
            success: false,
            error: Some(reason),
        }
    }
}

impl Storefront {
    /// Charges the card for the order total.
    pub async fn submit_order(
        &self,
        order: &Order,
        card: &CreditCard,
    ) -> ServiceResult<OrderOutcome> {
        let status = self.payments.charge(card, order.total_amount).await?;

        let outcome = match status {
            ChargeStatus::Success => {
                info!(amount = %order.total_amount, "Order placed");
                OrderOutcome::placed()
            }
            ChargeStatus::Failed => {
                warn!(amount = %order.total_amount, card = ?card, "Payment declined");
                OrderOutcome::failed(OrderFailure::PaymentError)
            }
        };

        Ok(outcome)
    }
}
