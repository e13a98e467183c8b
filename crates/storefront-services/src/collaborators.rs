//! # Collaborators
//!
//! Contracts for the external services the workflows depend on.
//!
//! ## One Capability per Trait
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Trait                  Method                 Used by                  │
//! │  ───────────────────    ────────────────────   ───────────────────────  │
//! │  ExchangeRateProvider   exchange_rate          price_in_currency        │
//! │  ShippingQuoter         quote                  shipping_info            │
//! │  PaymentGateway         charge                 submit_order             │
//! │  EmailSender            send_email             sign_up, login           │
//! │  PageViewTracker        track_page_view        render_page              │
//! │  CodeGenerator          generate_code          login                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each trait is object safe and `Send + Sync` so the [`crate::Storefront`]
//! can hold it behind an `Arc<dyn _>`. Under `cfg(test)` every trait also
//! gets a `mockall` mock (`MockEmailSender`, `MockPaymentGateway`, ...).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_core::Money;
use thiserror::Error;

// =============================================================================
// Collaborator Error
// =============================================================================

/// Result type for collaborator calls.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// A collaborator rejected or failed a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} failed: {reason}")]
pub struct CollaboratorError {
    service: String,
    reason: String,
}

impl CollaboratorError {
    pub fn new(service: impl Into<String>, reason: impl Into<String>) -> Self {
        CollaboratorError {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

// =============================================================================
// Data Types
// =============================================================================

/// A shipping price and delivery estimate for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub cost: Money,
    pub estimated_days: u32,
}

/// Card details handed to the payment gateway.
///
/// `Debug` only shows the last four digits.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub number: String,
}

impl CreditCard {
    pub fn new(number: impl Into<String>) -> Self {
        CreditCard {
            number: number.into(),
        }
    }

    pub fn last4(&self) -> &str {
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(idx, _)| idx);
        &self.number[start..]
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &format_args!("****{}", self.last4()))
            .finish()
    }
}

/// Outcome reported by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    Success,
    Failed,
}

/// A one-time login code.
///
/// Displays as six zero-padded digits; this is exactly the text mailed to
/// the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginCode(u32);

impl LoginCode {
    pub const fn new(value: u32) -> Self {
        LoginCode(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LoginCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Looks up the multiplicative rate converting `from` into `to`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn exchange_rate(&self, from: &str, to: &str) -> CollaboratorResult<f64>;
}

/// Quotes shipping to a destination. `None` means no quote is obtainable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShippingQuoter: Send + Sync {
    async fn quote(&self, destination: &str) -> CollaboratorResult<Option<ShippingQuote>>;
}

/// Charges a card.
///
/// A declined card is `Ok(ChargeStatus::Failed)`; `Err` means the gateway
/// itself could not process the request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, card: &CreditCard, amount: Money) -> CollaboratorResult<ChargeStatus>;
}

/// Delivers an email body to an address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, body: &str) -> CollaboratorResult<()>;
}

/// Records a page view for analytics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageViewTracker: Send + Sync {
    async fn track_page_view(&self, path: &str) -> CollaboratorResult<()>;
}

/// Produces one-time login codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate_code(&self) -> LoginCode;
}
