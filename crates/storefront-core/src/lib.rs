//! # storefront-core: Pure Logic for Storefront Kit
//!
//! This crate holds everything in Storefront Kit that can be computed
//! without touching the outside world.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Kit Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront-demo                            │   │
//! │  │        logging, config, end-to-end run                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             storefront-services (async workflows)               │   │
//! │  │   sign_up, login, submit_order, shipping_info, render_page     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   stack   │  │   money   │  │ discount  │  │ validation│  │   │
//! │  │   │  Stack<T> │  │   Money   │  │  Coupon   │  │  ranges   │  │   │
//! │  │   │           │  │           │  │  Catalog  │  │  tables   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`stack`] - LIFO container with explicit empty-stack errors
//! - [`money`] - Money type with integer arithmetic
//! - [`discount`] - Coupon catalog and discount calculation
//! - [`validation`] - Price, username, driving-age and user input checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **Immutable Tables**: coupon catalog and driving ages are built once
//!    and passed by reference
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: every failure is a typed `Result`, never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use storefront_core::{calculate_discount, Money, Stack};
//!
//! let price = calculate_discount(&json!(10), "SAVE10").unwrap();
//! assert_eq!(price, Money::from_cents(900));
//!
//! let mut history = Stack::new();
//! history.push(price);
//! assert_eq!(history.peek(), Ok(&price));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod money;
pub mod stack;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{calculate_discount, get_coupons, Coupon, CouponCatalog};
pub use error::{
    CoreError, CoreResult, StackError, UserInputError, UserInputViolation, ValidationError,
    ValidationResult,
};
pub use money::Money;
pub use stack::Stack;
pub use validation::{
    can_drive, is_price_in_range, is_valid_username, validate_user_input, DrivingAgeTable,
    UsernamePolicy,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shortest username accepted by the default [`UsernamePolicy`].
pub const DEFAULT_USERNAME_MIN_LENGTH: usize = 5;

/// Longest username accepted by the default [`UsernamePolicy`].
pub const DEFAULT_USERNAME_MAX_LENGTH: usize = 15;

/// Shortest username accepted by [`validate_user_input`]. Independent of
/// the account [`UsernamePolicy`].
pub const INPUT_USERNAME_MIN_LENGTH: usize = 3;

/// Age bounds (inclusive) for [`validate_user_input`].
pub const MIN_USER_AGE: u32 = 18;
pub const MAX_USER_AGE: u32 = 100;

/// Message returned when [`validate_user_input`] passes.
pub const VALIDATION_SUCCESS: &str = "Validation successful";
