//! # Discount Engine
//!
//! Coupon catalog and discount calculation.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_discount(price, "SAVE10")                                    │
//! │       │                                                                 │
//! │       ├── price not a number? → CoreError::InvalidPrice                 │
//! │       │                                                                 │
//! │       ├── code in catalog?    → price × (1 - discount)                  │
//! │       │                                                                 │
//! │       └── unknown code        → price unchanged (not an error)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is immutable once built. The standard catalog lives for the
//! whole process; configured catalogs are owned by whoever loaded them and
//! passed around by reference.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::money::Money;

/// Basis points in 100%.
const FULL_BPS: u32 = 10_000;

// =============================================================================
// Coupon
// =============================================================================

/// A discount code paired with a fractional discount rate.
///
/// The rate is stored in basis points (1000 = 10%) so discounted prices
/// stay in integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coupon {
    code: String,
    discount_bps: u32,
}

impl Coupon {
    /// Creates a validated coupon.
    ///
    /// ## Rules
    /// - Code must not be empty or whitespace
    /// - Discount must be strictly between 0% and 100%
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Coupon;
    ///
    /// assert!(Coupon::new("SAVE10", 1000).is_ok());
    /// assert!(Coupon::new("", 1000).is_err());
    /// assert!(Coupon::new("FREE", 10_000).is_err());
    /// ```
    pub fn new(code: impl Into<String>, discount_bps: u32) -> ValidationResult<Self> {
        let coupon = Coupon {
            code: code.into(),
            discount_bps,
        };
        coupon.validate()?;
        Ok(coupon)
    }

    /// Checks the coupon invariants. Deserialized coupons bypass `new`, so
    /// the catalog calls this for every entry.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "coupon code".to_string(),
            });
        }

        if self.discount_bps == 0 || self.discount_bps >= FULL_BPS {
            return Err(ValidationError::OutOfRange {
                field: "coupon discount_bps".to_string(),
                min: 1,
                max: (FULL_BPS - 1) as i64,
            });
        }

        Ok(())
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn discount_bps(&self) -> u32 {
        self.discount_bps
    }

    /// Discount as a fraction in (0, 1), for display.
    pub fn discount(&self) -> f64 {
        self.discount_bps as f64 / FULL_BPS as f64
    }
}

// =============================================================================
// Coupon Catalog
// =============================================================================

static STANDARD_CATALOG: LazyLock<CouponCatalog> = LazyLock::new(|| CouponCatalog {
    coupons: vec![
        Coupon {
            code: "SAVE10".to_string(),
            discount_bps: 1000,
        },
        Coupon {
            code: "SAVE20".to_string(),
            discount_bps: 2000,
        },
    ],
});

/// Read-only list of coupons.
///
/// ## Invariants
/// - Never empty
/// - Every coupon passes [`Coupon::validate`]
/// - Codes are unique (exact, case-sensitive match)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponCatalog {
    coupons: Vec<Coupon>,
}

impl CouponCatalog {
    /// Builds a catalog, rejecting empty lists, invalid coupons and
    /// duplicate codes.
    pub fn new(coupons: Vec<Coupon>) -> ValidationResult<Self> {
        if coupons.is_empty() {
            return Err(ValidationError::Required {
                field: "coupons".to_string(),
            });
        }

        {
            let mut seen = HashSet::new();
            for coupon in &coupons {
                coupon.validate()?;
                if !seen.insert(coupon.code()) {
                    return Err(ValidationError::Duplicate {
                        field: "coupon code".to_string(),
                        value: coupon.code().to_string(),
                    });
                }
            }
        }

        Ok(CouponCatalog { coupons })
    }

    /// The built-in catalog: `SAVE10` (10%) and `SAVE20` (20%).
    pub fn standard() -> &'static CouponCatalog {
        &STANDARD_CATALOG
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Looks up a coupon by exact code.
    pub fn find(&self, code: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.code == code)
    }

    /// Applies the coupon for `code`, or returns `price` unchanged when the
    /// code is unknown.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{CouponCatalog, Money};
    ///
    /// let catalog = CouponCatalog::standard();
    /// let price = Money::from_cents(1000);
    /// assert_eq!(catalog.apply(price, "SAVE20"), Money::from_cents(800));
    /// assert_eq!(catalog.apply(price, "NOPE"), price);
    /// ```
    pub fn apply(&self, price: Money, code: &str) -> Money {
        match self.find(code) {
            Some(coupon) => price.apply_percentage_discount(coupon.discount_bps),
            None => price,
        }
    }

    /// Discount calculation over loosely typed price input.
    ///
    /// A price that is not a JSON number is a domain failure, not a panic.
    pub fn calculate_discount(&self, price: &Value, code: &str) -> CoreResult<Money> {
        let price =
            Money::from_json_amount(price).ok_or_else(|| CoreError::InvalidPrice(price.to_string()))?;
        Ok(self.apply(price, code))
    }
}

// =============================================================================
// Standard Catalog Shortcuts
// =============================================================================

/// Returns the coupons of the standard catalog.
pub fn get_coupons() -> &'static [Coupon] {
    CouponCatalog::standard().coupons()
}

/// [`CouponCatalog::calculate_discount`] against the standard catalog.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use storefront_core::{calculate_discount, Money};
///
/// assert_eq!(calculate_discount(&json!(10), "SAVE10"), Ok(Money::from_cents(900)));
/// assert!(calculate_discount(&json!("10"), "SAVE10").is_err());
/// ```
pub fn calculate_discount(price: &Value, code: &str) -> CoreResult<Money> {
    CouponCatalog::standard().calculate_discount(price, code)
}

// =============================================================================
// Unit Tests
// =============================================================================
