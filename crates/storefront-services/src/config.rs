//! # Storefront Configuration
//!
//! Configuration management for the storefront workflows.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_BASE_CURRENCY=EUR                                       │
//! │     STOREFRONT_USERNAME_MIN=4                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, else $STOREFRONT_CONFIG, else                       │
//! │     ~/.config/storefront-kit/storefront.toml (Linux)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD, /home, 5..=15 usernames, SAVE10/SAVE20                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! base_currency = "USD"
//! home_path = "/home"
//!
//! [accounts]
//! username_min_length = 5
//! username_max_length = 15
//! welcome_message = "Welcome aboard!"
//!
//! [pricing.exchange_rates]
//! AUD = 1.5
//! EUR = 0.92
//!
//! [[pricing.coupons]]
//! code = "SAVE10"
//! discount_bps = 1000
//!
//! [shipping]
//! flat_cost_cents = 1000
//! estimated_days = 2
//!
//! [fetch]
//! delay_ms = 100
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use storefront_core::{Coupon, CouponCatalog, Money, UsernamePolicy};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Store Settings
// =============================================================================

/// Storewide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Currency all catalog prices are denominated in.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// Path reported to analytics when the home page renders.
    #[serde(default = "default_home_path")]
    pub home_path: String,

    /// Body returned by `render_page`.
    #[serde(default = "default_home_content")]
    pub home_content: String,
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_home_path() -> String {
    "/home".to_string()
}

fn default_home_content() -> String {
    "<div>content</div>".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            base_currency: default_base_currency(),
            home_path: default_home_path(),
            home_content: default_home_content(),
        }
    }
}

// =============================================================================
// Account Settings
// =============================================================================

/// Sign-up and login settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSettings {
    #[serde(default = "default_username_min")]
    pub username_min_length: usize,

    #[serde(default = "default_username_max")]
    pub username_max_length: usize,

    /// Body of the mail sent after a successful sign-up. Must contain the
    /// word "welcome" (any case).
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

fn default_username_min() -> usize {
    storefront_core::DEFAULT_USERNAME_MIN_LENGTH
}

fn default_username_max() -> usize {
    storefront_core::DEFAULT_USERNAME_MAX_LENGTH
}

fn default_welcome_message() -> String {
    "Welcome aboard!".to_string()
}

impl Default for AccountSettings {
    fn default() -> Self {
        AccountSettings {
            username_min_length: default_username_min(),
            username_max_length: default_username_max(),
            welcome_message: default_welcome_message(),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

/// Exchange rates and coupons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Units of each currency per one unit of the base currency.
    #[serde(default = "default_exchange_rates")]
    pub exchange_rates: BTreeMap<String, f64>,

    #[serde(default = "default_coupons")]
    pub coupons: Vec<Coupon>,
}

fn default_exchange_rates() -> BTreeMap<String, f64> {
    [("AUD", 1.5), ("EUR", 0.92), ("GBP", 0.79), ("USD", 1.0)]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect()
}

fn default_coupons() -> Vec<Coupon> {
    CouponCatalog::standard().coupons().to_vec()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            exchange_rates: default_exchange_rates(),
            coupons: default_coupons(),
        }
    }
}

// =============================================================================
// Shipping Settings
// =============================================================================

/// Settings for the flat-rate shipping provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingSettings {
    #[serde(default = "default_flat_cost")]
    pub flat_cost_cents: i64,

    #[serde(default = "default_estimated_days")]
    pub estimated_days: u32,
}

fn default_flat_cost() -> i64 {
    1000
}

fn default_estimated_days() -> u32 {
    2
}

impl ShippingSettings {
    pub fn flat_cost(&self) -> Money {
        Money::from_cents(self.flat_cost_cents)
    }
}

impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            flat_cost_cents: default_flat_cost(),
            estimated_days: default_estimated_days(),
        }
    }
}

// =============================================================================
// Fetch Settings
// =============================================================================

/// Settings for the sample data fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    #[serde(default = "default_fetch_delay")]
    pub delay_ms: u64,
}

fn default_fetch_delay() -> u64 {
    100
}

impl FetchSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        FetchSettings {
            delay_ms: default_fetch_delay(),
        }
    }
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub accounts: AccountSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub shipping: ShippingSettings,

    #[serde(default)]
    pub fetch: FetchSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ServiceResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os("STOREFRONT_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections fall back to defaults.
    pub fn from_toml_str(contents: &str) -> ServiceResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ServiceResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ServiceError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.store.base_currency.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "base_currency must not be empty".into(),
            ));
        }

        if !self.store.home_path.starts_with('/') {
            return Err(ServiceError::InvalidConfig(format!(
                "home_path must start with '/', got: {}",
                self.store.home_path
            )));
        }

        if !self
            .accounts
            .welcome_message
            .to_lowercase()
            .contains("welcome")
        {
            return Err(ServiceError::InvalidConfig(format!(
                "welcome_message must contain \"welcome\", got: {}",
                self.accounts.welcome_message
            )));
        }

        self.username_policy()?;
        self.coupon_catalog()?;

        if let Some((code, rate)) = self
            .pricing
            .exchange_rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(ServiceError::InvalidConfig(format!(
                "exchange rate for {} must be positive, got: {}",
                code, rate
            )));
        }

        if self.shipping.flat_cost_cents < 0 {
            return Err(ServiceError::InvalidConfig(
                "flat_cost_cents must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(currency) = std::env::var("STOREFRONT_BASE_CURRENCY") {
            debug!(currency = %currency, "Overriding base currency from environment");
            self.store.base_currency = currency;
        }

        if let Ok(path) = std::env::var("STOREFRONT_HOME_PATH") {
            self.store.home_path = path;
        }

        if let Ok(min) = std::env::var("STOREFRONT_USERNAME_MIN") {
            match min.parse::<usize>() {
                Ok(v) => self.accounts.username_min_length = v,
                Err(_) => warn!(value = %min, "Ignoring non-numeric STOREFRONT_USERNAME_MIN"),
            }
        }

        if let Ok(max) = std::env::var("STOREFRONT_USERNAME_MAX") {
            match max.parse::<usize>() {
                Ok(v) => self.accounts.username_max_length = v,
                Err(_) => warn!(value = %max, "Ignoring non-numeric STOREFRONT_USERNAME_MAX"),
            }
        }

        if let Ok(message) = std::env::var("STOREFRONT_WELCOME_MESSAGE") {
            self.accounts.welcome_message = message;
        }

        if let Ok(delay) = std::env::var("STOREFRONT_FETCH_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                debug!(delay_ms = ms, "Overriding fetch delay from environment");
                self.fetch.delay_ms = ms;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront-kit")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the configured coupon catalog.
    pub fn coupon_catalog(&self) -> ServiceResult<CouponCatalog> {
        Ok(CouponCatalog::new(self.pricing.coupons.clone())?)
    }

    /// Builds the configured username policy.
    pub fn username_policy(&self) -> ServiceResult<UsernamePolicy> {
        Ok(UsernamePolicy::new(
            self.accounts.username_min_length,
            self.accounts.username_max_length,
        )?)
    }

    pub fn base_currency(&self) -> &str {
        &self.store.base_currency
    }
}
