//! # storefront-services: Workflows for Storefront Kit
//!
//! This crate runs the storefront workflows on top of `storefront-core`,
//! talking to the outside world only through injected collaborators.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront Workflows                            │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Storefront (facade)                           │  │
//! │  │                                                                  │  │
//! │  │  pricing   price_in_currency, shipping_info                      │  │
//! │  │  orders    submit_order                                          │  │
//! │  │  accounts  sign_up, login                                        │  │
//! │  │  pages     render_page                                           │  │
//! │  │  fetch     fetch_data, fetch_data_fail                           │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ Arc<dyn _>                              │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ collaborators  │  │   providers    │  │  mockall mocks         │    │
//! │  │ (traits)       │◄─│ (local impls)  │  │  (cfg(test) only)      │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collaborators`] - Collaborator traits and their data types
//! - [`providers`] - In-process collaborator implementations
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Service error types
//! - [`storefront`] - The `Storefront` facade and its builder
//! - [`pricing`], [`orders`], [`accounts`], [`pages`], [`fetch`] - Workflows
//!
//! ## Example
//!
//! ```rust,no_run
//! use storefront_services::{Storefront, StorefrontConfig};
//!
//! # async fn run() -> storefront_services::ServiceResult<()> {
//! let storefront = Storefront::new(StorefrontConfig::load_or_default(None))?;
//! let page = storefront.render_page().await?;
//! assert_eq!(page, "<div>content</div>");
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounts;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod fetch;
pub mod orders;
pub mod pages;
pub mod pricing;
pub mod providers;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use accounts::is_valid_email;
pub use collaborators::{
    ChargeStatus, CodeGenerator, CollaboratorError, CollaboratorResult, CreditCard, EmailSender,
    ExchangeRateProvider, LoginCode, PageViewTracker, PaymentGateway, ShippingQuote,
    ShippingQuoter,
};
pub use config::StorefrontConfig;
pub use error::{ServiceError, ServiceResult};
pub use orders::{Order, OrderFailure, OrderOutcome};
pub use pricing::ShippingInfo;
pub use providers::{
    FixedRateTable, FlatRateShipping, LoggingPageViewTracker, OutboxMailer, RandomCodeGenerator,
    SandboxPaymentGateway, SentEmail,
};
pub use storefront::{Storefront, StorefrontBuilder};
