//! # Storefront Demo
//!
//! Runs every Storefront Kit operation once against the local providers
//! and logs the results.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (first argument, `$STOREFRONT_CONFIG`, or the
//!    platform config directory; defaults if none exists)
//! 3. Build the `Storefront`
//! 4. Exercise the pure checks from `storefront-core`
//! 5. Exercise the async workflows
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=storefront_services=trace` - Trace the workflows only
//! - Default: INFO, DEBUG for the storefront crates

use serde_json::json;
use std::path::PathBuf;
use storefront_core::{
    can_drive, get_coupons, is_price_in_range, validate_user_input, Money, Stack,
};
use storefront_services::{CreditCard, Order, Storefront, StorefrontConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = StorefrontConfig::load_or_default(config_path);
    info!(base_currency = %config.base_currency(), "Configuration loaded");

    let storefront = Storefront::new(config)?;

    run_core_checks(&storefront)?;
    run_workflows(&storefront).await?;

    info!("Demo complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_core=debug,storefront_services=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_core_checks(storefront: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    // Stack
    let mut history = Stack::new();
    history.push("cart");
    history.push("checkout");
    info!(top = ?history.peek(), size = history.size(), "Navigation stack");
    while let Ok(page) = history.pop() {
        info!(page, "Popped");
    }
    if let Err(e) = history.pop() {
        info!(error = %e, "Pop on empty stack");
    }

    // Coupons
    let codes: Vec<&str> = get_coupons().iter().map(|c| c.code()).collect();
    info!(?codes, "Standard coupons");
    let discounted = storefront
        .coupon_catalog()
        .calculate_discount(&json!(10), "SAVE10")?;
    info!(%discounted, "SAVE10 applied to $10");
    let credit = storefront
        .coupon_catalog()
        .calculate_discount(&json!(-5), "SAVE10")?;
    info!(%credit, "SAVE10 applied to -$5");
    match storefront.coupon_catalog().calculate_discount(&json!("10"), "SAVE10") {
        Ok(price) => warn!(%price, "Text price unexpectedly accepted"),
        Err(e) => info!(error = %e, "Text price rejected"),
    }

    // Validators
    info!(
        in_range = is_price_in_range(Money::from_cents(5_000), Money::zero(), Money::from_cents(10_000)),
        "Price range check"
    );
    let policy = storefront.username_policy();
    for name in ["kitty", "cat", "a_very_long_username"] {
        info!(name, valid = policy.accepts(name), "Username check");
    }
    for (age, country) in [(16, "US"), (17, "UK"), (30, "FR")] {
        match can_drive(age, country) {
            Ok(allowed) => info!(age, country, allowed, "Driving age check"),
            Err(e) => info!(age, country, error = %e, "Driving age check"),
        }
    }
    match validate_user_input(&json!("bob"), &json!(12)) {
        Ok(message) => info!(message, "User input"),
        Err(e) => info!(error = %e, "User input rejected"),
    }

    Ok(())
}

async fn run_workflows(storefront: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    let price = storefront
        .price_in_currency(Money::from_cents(1_000), "AUD")
        .await?;
    info!(%price, "Price in AUD");

    let shipping = storefront.shipping_info("Sydney").await?;
    info!(%shipping, "Shipping to Sydney");

    let page = storefront.render_page().await?;
    info!(%page, "Rendered home page");

    let card = CreditCard::new("4111111111111111");
    let outcome = storefront
        .submit_order(&Order::new(Money::from_cents(2_500)), &card)
        .await?;
    info!(success = outcome.success, "Order submitted");

    let signed_up = storefront.sign_up("shopper@example.com").await?;
    info!(signed_up, "Sign-up");

    let code = storefront.login("shopper@example.com").await?;
    info!(%code, "Login code issued");

    let data = storefront.fetch_data().await?;
    info!(?data, "Fetched data");
    if let Err(e) = storefront.fetch_data_fail().await {
        info!(error = %e, "Fetch rejected");
    }

    Ok(())
}
