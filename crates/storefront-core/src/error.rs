//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError         - Domain failures (price, country code)         │
//! │  ├── ValidationError   - Bad catalog / table / policy construction     │
//! │  ├── UserInputError    - Aggregated user input violations              │
//! │  └── StackError        - Precondition violations on Stack              │
//! │                                                                         │
//! │  storefront-services errors (separate crate)                           │
//! │  └── ServiceError      - Workflow + collaborator failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → Caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Channels
//! `StackError` is kept apart from everything else. Popping an empty stack
//! is a caller bug (check `is_empty()` first); every other error here is an
//! ordinary domain outcome the caller is expected to inspect.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain failures returned by the discount engine and validators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Price input was not a number.
    ///
    /// ## When This Occurs
    /// - Price arrives as a string (`"10"`), null, bool or structure
    /// - Price is a number too large to represent in cents
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Country code has no entry in the driving age table.
    #[error("Invalid country code: {0}")]
    UnknownCountryCode(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Errors raised while building catalogs, tables and policies.
///
/// These guard the static lookup data. A coupon with an empty code or a
/// 100% discount never makes it into a `CouponCatalog`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format or inconsistent bounds.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate coupon code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// User Input Error
// =============================================================================

/// A single failed rule in [`crate::validation::validate_user_input`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserInputViolation {
    #[error("Invalid username: must be a string of at least {min_length} characters")]
    InvalidUsername { min_length: usize },

    #[error("Invalid age: must be a number between {min} and {max}")]
    InvalidAge { min: u32, max: u32 },
}

/// Every rule that failed, in rule order.
///
/// ## Example
/// ```rust
/// use storefront_core::{UserInputError, UserInputViolation};
///
/// let err = UserInputError::new(vec![
///     UserInputViolation::InvalidUsername { min_length: 3 },
///     UserInputViolation::InvalidAge { min: 18, max: 100 },
/// ]);
/// let message = err.to_string();
/// assert!(message.contains("Invalid username"));
/// assert!(message.contains("Invalid age"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_violations(.violations))]
pub struct UserInputError {
    violations: Vec<UserInputViolation>,
}

impl UserInputError {
    pub fn new(violations: Vec<UserInputViolation>) -> Self {
        UserInputError { violations }
    }

    /// The individual rule failures.
    pub fn violations(&self) -> &[UserInputViolation] {
        &self.violations
    }

    pub fn has_invalid_username(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, UserInputViolation::InvalidUsername { .. }))
    }

    pub fn has_invalid_age(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, UserInputViolation::InvalidAge { .. }))
    }
}

fn join_violations(violations: &[UserInputViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Stack Error
// =============================================================================

/// Precondition violations on [`crate::stack::Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// `pop` or `peek` on an empty stack. The stack is left untouched.
    #[error("Stack is empty")]
    Empty,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for construction-time validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
