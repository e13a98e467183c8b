//! # Storefront
//!
//! The facade every workflow hangs off.
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Storefront                                   │
//! │                                                                         │
//! │   config ──────────► coupon catalog, username policy                    │
//! │                                                                         │
//! │   Arc<dyn ExchangeRateProvider>   ── default: FixedRateTable           │
//! │   Arc<dyn ShippingQuoter>         ── default: FlatRateShipping         │
//! │   Arc<dyn PaymentGateway>         ── default: SandboxPaymentGateway    │
//! │   Arc<dyn EmailSender>            ── default: OutboxMailer             │
//! │   Arc<dyn PageViewTracker>        ── default: LoggingPageViewTracker   │
//! │   Arc<dyn CodeGenerator>          ── default: RandomCodeGenerator      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Workflows live in their own modules (`pricing`, `orders`, `accounts`,
//! `pages`, `fetch`) as further `impl Storefront` blocks. The storefront
//! holds no mutable state of its own, so a single instance can be shared
//! across tasks.

use std::sync::Arc;
use storefront_core::{CouponCatalog, UsernamePolicy};
use tracing::debug;

use crate::collaborators::{
    CodeGenerator, EmailSender, ExchangeRateProvider, PageViewTracker, PaymentGateway,
    ShippingQuoter,
};
use crate::config::StorefrontConfig;
use crate::error::ServiceResult;
use crate::providers::{
    FixedRateTable, FlatRateShipping, LoggingPageViewTracker, OutboxMailer, RandomCodeGenerator,
    SandboxPaymentGateway,
};

/// Entry point for all storefront workflows.
#[derive(Clone)]
pub struct Storefront {
    pub(crate) config: Arc<StorefrontConfig>,
    pub(crate) coupons: CouponCatalog,
    pub(crate) usernames: UsernamePolicy,
    pub(crate) exchange_rates: Arc<dyn ExchangeRateProvider>,
    pub(crate) shipping: Arc<dyn ShippingQuoter>,
    pub(crate) payments: Arc<dyn PaymentGateway>,
    pub(crate) mailer: Arc<dyn EmailSender>,
    pub(crate) analytics: Arc<dyn PageViewTracker>,
    pub(crate) codes: Arc<dyn CodeGenerator>,
}

impl Storefront {
    /// Creates a storefront backed entirely by local providers.
    pub fn new(config: StorefrontConfig) -> ServiceResult<Self> {
        Self::builder(config).build()
    }

    /// Starts a builder for injecting collaborators.
    pub fn builder(config: StorefrontConfig) -> StorefrontBuilder {
        StorefrontBuilder::new(config)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn coupon_catalog(&self) -> &CouponCatalog {
        &self.coupons
    }

    pub fn username_policy(&self) -> UsernamePolicy {
        self.usernames
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("coupons", &self.coupons)
            .field("usernames", &self.usernames)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects collaborators before building a [`Storefront`].
///
/// Anything left unset falls back to the local provider built from the
/// configuration.
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    exchange_rates: Option<Arc<dyn ExchangeRateProvider>>,
    shipping: Option<Arc<dyn ShippingQuoter>>,
    payments: Option<Arc<dyn PaymentGateway>>,
    mailer: Option<Arc<dyn EmailSender>>,
    analytics: Option<Arc<dyn PageViewTracker>>,
    codes: Option<Arc<dyn CodeGenerator>>,
}

impl StorefrontBuilder {
    pub fn new(config: StorefrontConfig) -> Self {
        StorefrontBuilder {
            config,
            exchange_rates: None,
            shipping: None,
            payments: None,
            mailer: None,
            analytics: None,
            codes: None,
        }
    }

    pub fn with_exchange_rates(mut self, provider: Arc<dyn ExchangeRateProvider>) -> Self {
        self.exchange_rates = Some(provider);
        self
    }

    pub fn with_shipping(mut self, quoter: Arc<dyn ShippingQuoter>) -> Self {
        self.shipping = Some(quoter);
        self
    }

    pub fn with_payments(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.payments = Some(gateway);
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn EmailSender>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_analytics(mut self, tracker: Arc<dyn PageViewTracker>) -> Self {
        self.analytics = Some(tracker);
        self
    }

    pub fn with_codes(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.codes = Some(generator);
        self
    }

    /// Validates the configuration and assembles the storefront.
    pub fn build(self) -> ServiceResult<Storefront> {
        self.config.validate()?;

        let coupons = self.config.coupon_catalog()?;
        let usernames = self.config.username_policy()?;

        let exchange_rates = self
            .exchange_rates
            .unwrap_or_else(|| Arc::new(FixedRateTable::from_config(&self.config)));
        let shipping = self
            .shipping
            .unwrap_or_else(|| Arc::new(FlatRateShipping::from_config(&self.config)));
        let payments = self
            .payments
            .unwrap_or_else(|| Arc::new(SandboxPaymentGateway));
        let mailer = self
            .mailer
            .unwrap_or_else(|| Arc::new(OutboxMailer::new()));
        let analytics = self
            .analytics
            .unwrap_or_else(|| Arc::new(LoggingPageViewTracker::new()));
        let codes = self
            .codes
            .unwrap_or_else(|| Arc::new(RandomCodeGenerator));

        debug!(
            base_currency = %self.config.store.base_currency,
            coupons = coupons.coupons().len(),
            "Storefront assembled"
        );

        Ok(Storefront {
            config: Arc::new(self.config),
            coupons,
            usernames,
            exchange_rates,
            shipping,
            payments,
            mailer,
            analytics,
            codes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::MockEmailSender;

    #[test]
    fn test_new_uses_config_tables() {
        let storefront = Storefront::new(StorefrontConfig::default()).unwrap();

        assert!(storefront.coupon_catalog().find("SAVE10").is_some());
        assert_eq!(storefront.username_policy().min_length(), 5);
        assert_eq!(storefront.config().base_currency(), "USD");
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = StorefrontConfig::default();
        config.accounts.username_min_length = 30;

        let err = Storefront::new(config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_builder_accepts_injected_collaborators() {
        let storefront = Storefront::builder(StorefrontConfig::default())
            .with_mailer(Arc::new(MockEmailSender::new()))
            .build()
            .unwrap();

        let debug = format!("{storefront:?}");
        assert!(debug.contains("Storefront"));
    }
}
