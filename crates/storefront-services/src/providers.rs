//! # Local Providers
//!
//! In-process implementations of the collaborator traits. They are what a
//! [`crate::Storefront`] uses when no other implementation is injected,
//! and they are what the demo binary runs against.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ Provider                 │ Behavior                                     │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ FixedRateTable           │ cross rates from a configured table          │
//! │ FlatRateShipping         │ same cost and ETA for every destination      │
//! │ SandboxPaymentGateway    │ approves any non-empty card, positive amount │
//! │ OutboxMailer             │ keeps every message in memory                │
//! │ LoggingPageViewTracker   │ logs and records each view                   │
//! │ RandomCodeGenerator      │ uniform six-digit codes                      │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use rand::Rng;
use std::collections::BTreeMap;
use storefront_core::Money;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::collaborators::{
    ChargeStatus, CodeGenerator, CollaboratorError, CollaboratorResult, CreditCard, EmailSender,
    ExchangeRateProvider, LoginCode, PageViewTracker, PaymentGateway, ShippingQuote,
    ShippingQuoter,
};
use crate::config::StorefrontConfig;

/// Exclusive upper bound of a login code.
const LOGIN_CODE_SPACE: u32 = 1_000_000;

// =============================================================================
// Exchange Rates
// =============================================================================

/// Exchange rates relative to a single base currency.
#[derive(Debug, Clone)]
pub struct FixedRateTable {
    base: String,
    rates: BTreeMap<String, f64>,
}

impl FixedRateTable {
    /// `rates` holds units of each currency per one unit of `base`.
    pub fn new(base: impl Into<String>, rates: BTreeMap<String, f64>) -> Self {
        FixedRateTable {
            base: base.into(),
            rates,
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(
            config.store.base_currency.clone(),
            config.pricing.exchange_rates.clone(),
        )
    }

    fn rate_from_base(&self, currency: &str) -> CollaboratorResult<f64> {
        if currency == self.base {
            return Ok(1.0);
        }
        self.rates.get(currency).copied().ok_or_else(|| {
            CollaboratorError::new("exchange-rates", format!("no rate for {currency}"))
        })
    }
}

#[async_trait]
impl ExchangeRateProvider for FixedRateTable {
    async fn exchange_rate(&self, from: &str, to: &str) -> CollaboratorResult<f64> {
        let rate = self.rate_from_base(to)? / self.rate_from_base(from)?;
        debug!(from, to, rate, "Exchange rate lookup");
        Ok(rate)
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Quotes the same cost and delivery estimate everywhere.
#[derive(Debug, Clone, Copy)]
pub struct FlatRateShipping {
    quote: ShippingQuote,
}

impl FlatRateShipping {
    pub fn new(cost: Money, estimated_days: u32) -> Self {
        FlatRateShipping {
            quote: ShippingQuote {
                cost,
                estimated_days,
            },
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.shipping.flat_cost(), config.shipping.estimated_days)
    }
}

#[async_trait]
impl ShippingQuoter for FlatRateShipping {
    async fn quote(&self, destination: &str) -> CollaboratorResult<Option<ShippingQuote>> {
        if destination.trim().is_empty() {
            debug!("No destination given, no shipping quote");
            return Ok(None);
        }
        Ok(Some(self.quote))
    }
}

// =============================================================================
// Payments
// =============================================================================

/// Test-mode gateway. Never moves money.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxPaymentGateway;

#[async_trait]
impl PaymentGateway for SandboxPaymentGateway {
    async fn charge(&self, card: &CreditCard, amount: Money) -> CollaboratorResult<ChargeStatus> {
        if card.number.trim().is_empty() {
            warn!("Sandbox charge declined: missing card number");
            return Ok(ChargeStatus::Failed);
        }
        if !amount.is_positive() {
            warn!(%amount, "Sandbox charge declined: non-positive amount");
            return Ok(ChargeStatus::Failed);
        }

        info!(card = card.last4(), %amount, "Sandbox charge approved");
        Ok(ChargeStatus::Success)
    }
}

// =============================================================================
// Email
// =============================================================================

/// A message captured by [`OutboxMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub body: String,
}

/// Keeps every message in memory instead of delivering it.
///
/// The outbox grows until drained with [`take`](Self::take), so this
/// provider is meant for demos and tests.
#[derive(Debug, Default)]
pub struct OutboxMailer {
    outbox: Mutex<Vec<SentEmail>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, oldest first.
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().await.clone()
    }

    /// Empties the outbox, returning what it held.
    pub async fn take(&self) -> Vec<SentEmail> {
        std::mem::take(&mut *self.outbox.lock().await)
    }
}

#[async_trait]
impl EmailSender for OutboxMailer {
    async fn send_email(&self, to: &str, body: &str) -> CollaboratorResult<()> {
        info!(to, "Queued email");
        self.outbox.lock().await.push(SentEmail {
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Analytics
// =============================================================================

/// Logs each view and keeps the paths in memory until drained with
/// [`take`](Self::take). Meant for demos and tests.
#[derive(Debug, Default)]
pub struct LoggingPageViewTracker {
    views: Mutex<Vec<String>>,
}

impl LoggingPageViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn views(&self) -> Vec<String> {
        self.views.lock().await.clone()
    }

    pub async fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.views.lock().await)
    }
}

#[async_trait]
impl PageViewTracker for LoggingPageViewTracker {
    async fn track_page_view(&self, path: &str) -> CollaboratorResult<()> {
        info!(path, "Page view");
        self.views.lock().await.push(path.to_string());
        Ok(())
    }
}

// =============================================================================
// Login Codes
// =============================================================================

/// Draws codes uniformly from `000000..=999999`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate_code(&self) -> LoginCode {
        LoginCode::new(rand::thread_rng().gen_range(0..LOGIN_CODE_SPACE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rate_table() -> FixedRateTable {
        FixedRateTable::from_config(&StorefrontConfig::default())
    }

    #[rstest]
    #[case("USD", "AUD", 1.5)]
    #[case("USD", "USD", 1.0)]
    #[case("AUD", "USD", 1.0 / 1.5)]
    #[tokio::test]
    async fn test_fixed_rate_table(#[case] from: &str, #[case] to: &str, #[case] expected: f64) {
        let rate = rate_table().exchange_rate(from, to).await.unwrap();
        assert!((rate - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_currency_is_an_error() {
        let err = rate_table().exchange_rate("USD", "XYZ").await.unwrap_err();
        assert_eq!(err.service(), "exchange-rates");
        assert!(err.reason().contains("XYZ"));
    }

    #[tokio::test]
    async fn test_flat_rate_shipping() {
        let shipping = FlatRateShipping::from_config(&StorefrontConfig::default());

        let quote = shipping.quote("Sydney").await.unwrap().unwrap();
        assert_eq!(quote.cost, Money::from_cents(1000));
        assert_eq!(quote.estimated_days, 2);

        assert_eq!(shipping.quote("   ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sandbox_gateway() {
        let gateway = SandboxPaymentGateway;
        let card = CreditCard::new("4111111111111111");

        assert_eq!(
            gateway.charge(&card, Money::from_cents(500)).await,
            Ok(ChargeStatus::Success)
        );
        assert_eq!(
            gateway.charge(&card, Money::zero()).await,
            Ok(ChargeStatus::Failed)
        );
        assert_eq!(
            gateway.charge(&CreditCard::new(""), Money::from_cents(500)).await,
            Ok(ChargeStatus::Failed)
        );
    }

    #[tokio::test]
    async fn test_outbox_and_tracker_record_in_order() {
        let mailer = OutboxMailer::new();
        mailer.send_email("a@a.com", "one").await.unwrap();
        mailer.send_email("b@b.com", "two").await.unwrap();

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@a.com");
        assert_eq!(sent[1].body, "two");

        let tracker = LoggingPageViewTracker::new();
        tracker.track_page_view("/home").await.unwrap();
        assert_eq!(tracker.views().await, vec!["/home".to_string()]);
    }

    #[tokio::test]
    async fn test_take_drains_recorded_state() {
        let mailer = OutboxMailer::new();
        mailer.send_email("a@a.com", "one").await.unwrap();

        let drained = mailer.take().await;
        assert_eq!(drained.len(), 1);
        assert!(mailer.sent().await.is_empty());

        mailer.send_email("b@b.com", "two").await.unwrap();
        assert_eq!(mailer.sent().await.len(), 1);

        let tracker = LoggingPageViewTracker::new();
        tracker.track_page_view("/home").await.unwrap();
        tracker.track_page_view("/cart").await.unwrap();
        assert_eq!(tracker.take().await.len(), 2);
        assert!(tracker.views().await.is_empty());
    }

    #[test]
    fn test_random_codes_stay_in_range() {
        let generator = RandomCodeGenerator;
        for _ in 0..100 {
            let code = generator.generate_code();
            assert!(code.value() < LOGIN_CODE_SPACE);
            assert_eq!(code.to_string().len(), 6);
        }
    }
}
