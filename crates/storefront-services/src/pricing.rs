//! Currency conversion and shipping quotes.

use serde::Serialize;
use std::fmt;
use storefront_core::Money;
use tracing::debug;

use crate::collaborators::ShippingQuote;
use crate::error::ServiceResult;
use crate::storefront::Storefront;

/// Shipping availability for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShippingInfo {
    Unavailable,
    Available(ShippingQuote),
}

impl ShippingInfo {
    pub fn quote(&self) -> Option<&ShippingQuote> {
        match self {
            ShippingInfo::Available(quote) => Some(quote),
            ShippingInfo::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ShippingInfo::Available(_))
    }
}

impl fmt::Display for ShippingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingInfo::Unavailable => f.write_str("Shipping Unavailable"),
            ShippingInfo::Available(quote) => write!(
                f,
                "Shipping Cost: {} ({} Days)",
                quote.cost, quote.estimated_days
            ),
        }
    }
}

impl Storefront {
    /// Converts a base-currency price into `currency`.
    pub async fn price_in_currency(&self, price: Money, currency: &str) -> ServiceResult<Money> {
        let base = self.config.base_currency();
        let rate = self.exchange_rates.exchange_rate(base, currency).await?;
        let converted = price.convert(rate);

        debug!(%price, currency, rate, %converted, "Converted price");
        Ok(converted)
    }

    /// Asks the shipping provider for a quote to `destination`.
    pub async fn shipping_info(&self, destination: &str) -> ServiceResult<ShippingInfo> {
        let info = match self.shipping.quote(destination).await? {
            Some(quote) => ShippingInfo::Available(quote),
            None => ShippingInfo::Unavailable,
        };
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        CollaboratorError, MockExchangeRateProvider, MockShippingQuoter,
    };
    use crate::config::StorefrontConfig;
    use crate::error::ServiceError;
    use std::sync::Arc;

    fn storefront_with_rates(rates: MockExchangeRateProvider) -> Storefront {
        Storefront::builder(StorefrontConfig::default())
            .with_exchange_rates(Arc::new(rates))
            .build()
            .unwrap()
    }

    fn storefront_with_shipping(quoter: MockShippingQuoter) -> Storefront {
        Storefront::builder(StorefrontConfig::default())
            .with_shipping(Arc::new(quoter))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_price_in_currency_uses_exchange_rate() {
        let mut rates = MockExchangeRateProvider::new();
        rates
            .expect_exchange_rate()
            .withf(|from, to| from == "USD" && to == "AUD")
            .times(1)
            .returning(|_, _| Ok(1.5));
        let storefront = storefront_with_rates(rates);

        let price = storefront
            .price_in_currency(Money::from_cents(1000), "AUD")
            .await
            .unwrap();

        assert_eq!(price, Money::from_cents(1500));
    }

    #[tokio::test]
    async fn test_price_in_currency_propagates_provider_failure() {
        let mut rates = MockExchangeRateProvider::new();
        rates
            .expect_exchange_rate()
            .returning(|_, _| Err(CollaboratorError::new("exchange-rates", "offline")));
        let storefront = storefront_with_rates(rates);

        let err = storefront
            .price_in_currency(Money::from_cents(1000), "AUD")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Collaborator(_)));
    }

    #[tokio::test]
    async fn test_default_rates_convert_to_aud() {
        let storefront = Storefront::new(StorefrontConfig::default()).unwrap();

        let price = storefront
            .price_in_currency(Money::from_cents(1000), "AUD")
            .await
            .unwrap();

        assert_eq!(price, Money::from_cents(1500));
    }

    #[tokio::test]
    async fn test_shipping_info_unavailable() {
        let mut quoter = MockShippingQuoter::new();
        quoter.expect_quote().times(1).returning(|_| Ok(None));
        let storefront = storefront_with_shipping(quoter);

        let info = storefront.shipping_info("Atlantis").await.unwrap();

        assert_eq!(info, ShippingInfo::Unavailable);
        assert_eq!(info.to_string(), "Shipping Unavailable");
    }

    #[tokio::test]
    async fn test_shipping_info_available() {
        let mut quoter = MockShippingQuoter::new();
        quoter
            .expect_quote()
            .withf(|destination| destination == "Sydney")
            .times(1)
            .returning(|_| {
                Ok(Some(ShippingQuote {
                    cost: Money::from_cents(1000),
                    estimated_days: 2,
                }))
            });
        let storefront = storefront_with_shipping(quoter);

        let info = storefront.shipping_info("Sydney").await.unwrap();
        let message = info.to_string();

        assert!(info.is_available());
        assert!(message.contains("$10"));
        assert!(message.contains("2 Days"));
        assert_eq!(message, "Shipping Cost: $10.00 (2 Days)");
    }
}
