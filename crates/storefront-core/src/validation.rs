//! # Validation Module
//!
//! Input validation for Storefront Kit.
//!
//! ## Validator Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validators                                         │
//! │                                                                         │
//! │  Predicates (total, never fail)                                        │
//! │  ├── is_price_in_range       min <= price <= max                       │
//! │  └── is_valid_username       string, 5..=15 chars by default           │
//! │                                                                         │
//! │  Table lookups (fail on unknown keys)                                  │
//! │  └── can_drive               age >= minimum age for country            │
//! │                                                                         │
//! │  Aggregated (collect every violation)                                  │
//! │  └── validate_user_input     username + age                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loosely typed inputs arrive as `serde_json::Value`. A wrong type is a
//! failed check, never a panic.
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use storefront_core::validation::{can_drive, is_valid_username};
//!
//! assert!(is_valid_username(&json!("shopper")));
//! assert!(!is_valid_username(&json!(null)));
//! assert_eq!(can_drive(16, "US"), Ok(true));
//! ```

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{
    CoreError, CoreResult, UserInputError, UserInputViolation, ValidationError, ValidationResult,
};
use crate::{
    DEFAULT_USERNAME_MAX_LENGTH, DEFAULT_USERNAME_MIN_LENGTH, INPUT_USERNAME_MIN_LENGTH,
    MAX_USER_AGE, MIN_USER_AGE, VALIDATION_SUCCESS,
};

// =============================================================================
// Price Range
// =============================================================================

/// Returns true iff `min <= price <= max`. Both bounds are inclusive.
///
/// Works for anything ordered: plain numbers or [`crate::Money`].
///
/// ## Example
/// ```rust
/// use storefront_core::validation::is_price_in_range;
///
/// assert!(is_price_in_range(0, 0, 100));
/// assert!(is_price_in_range(100, 0, 100));
/// assert!(!is_price_in_range(-10, 0, 100));
/// ```
pub fn is_price_in_range<T: PartialOrd>(price: T, min: T, max: T) -> bool {
    min <= price && price <= max
}

// =============================================================================
// Username Policy
// =============================================================================

/// Inclusive length bounds for usernames, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernamePolicy {
    min_length: usize,
    max_length: usize,
}

impl UsernamePolicy {
    /// Creates a policy; `min_length` may not exceed `max_length`.
    pub fn new(min_length: usize, max_length: usize) -> ValidationResult<Self> {
        if min_length > max_length {
            return Err(ValidationError::InvalidFormat {
                field: "username length".to_string(),
                reason: format!("min_length {min_length} exceeds max_length {max_length}"),
            });
        }

        Ok(UsernamePolicy {
            min_length,
            max_length,
        })
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn accepts(&self, username: &str) -> bool {
        let len = username.chars().count();
        (self.min_length..=self.max_length).contains(&len)
    }

    /// Like [`accepts`](Self::accepts) but false for any non-string value.
    pub fn accepts_value(&self, username: &Value) -> bool {
        username.as_str().is_some_and(|name| self.accepts(name))
    }
}

impl Default for UsernamePolicy {
    fn default() -> Self {
        UsernamePolicy {
            min_length: DEFAULT_USERNAME_MIN_LENGTH,
            max_length: DEFAULT_USERNAME_MAX_LENGTH,
        }
    }
}

/// Checks a username against the default 5..=15 character policy.
pub fn is_valid_username(username: &Value) -> bool {
    UsernamePolicy::default().accepts_value(username)
}

// =============================================================================
// Driving Eligibility
// =============================================================================

static STANDARD_DRIVING_AGES: LazyLock<DrivingAgeTable> =
    LazyLock::new(|| DrivingAgeTable::new([("US", 16), ("UK", 17)]));

/// Minimum driving age per country code.
///
/// ## Lookup
/// Codes match exactly (`"US"`, not `"us"`). A code missing from the table
/// is reported as [`CoreError::UnknownCountryCode`] rather than treated as
/// ineligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrivingAgeTable {
    minimum_ages: BTreeMap<String, u32>,
}

impl DrivingAgeTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        DrivingAgeTable {
            minimum_ages: entries
                .into_iter()
                .map(|(code, age)| (code.into(), age))
                .collect(),
        }
    }

    /// The built-in table: US 16, UK 17.
    pub fn standard() -> &'static DrivingAgeTable {
        &STANDARD_DRIVING_AGES
    }

    pub fn minimum_age(&self, country_code: &str) -> Option<u32> {
        self.minimum_ages.get(country_code).copied()
    }

    /// Returns whether `age` meets the minimum for `country_code`.
    ///
    /// ## User Workflow
    /// ```text
    /// can_drive(17, "UK")
    ///      │
    ///      ├── "UK" not in table? → Error: "Invalid country code: UK"
    ///      │
    ///      └── 17 >= 17 → Ok(true)
    /// ```
    pub fn can_drive(&self, age: u32, country_code: &str) -> CoreResult<bool> {
        let minimum = self
            .minimum_age(country_code)
            .ok_or_else(|| CoreError::UnknownCountryCode(country_code.to_string()))?;
        Ok(age >= minimum)
    }
}

/// [`DrivingAgeTable::can_drive`] against the standard table.
pub fn can_drive(age: u32, country_code: &str) -> CoreResult<bool> {
    DrivingAgeTable::standard().can_drive(age, country_code)
}

// =============================================================================
// Aggregated User Input
// =============================================================================

/// Validates sign-up style input, reporting every failed rule at once.
///
/// ## Rules
/// - username: a string of at least 3 characters
/// - age: a number between 18 and 100 (inclusive)
///
/// ## Returns
/// `Ok("Validation successful")`, or a [`UserInputError`] listing each
/// violation in rule order.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use storefront_core::validation::validate_user_input;
///
/// assert!(validate_user_input(&json!("abhi"), &json!(27)).is_ok());
///
/// let err = validate_user_input(&json!(""), &json!(0)).unwrap_err();
/// assert!(err.has_invalid_username() && err.has_invalid_age());
/// ```
pub fn validate_user_input(username: &Value, age: &Value) -> Result<&'static str, UserInputError> {
    let mut violations = Vec::new();

    let username_ok = username
        .as_str()
        .is_some_and(|name| name.chars().count() >= INPUT_USERNAME_MIN_LENGTH);
    if !username_ok {
        violations.push(UserInputViolation::InvalidUsername {
            min_length: INPUT_USERNAME_MIN_LENGTH,
        });
    }

    let age_ok = age
        .as_f64()
        .is_some_and(|age| (MIN_USER_AGE as f64..=MAX_USER_AGE as f64).contains(&age));
    if !age_ok {
        violations.push(UserInputViolation::InvalidAge {
            min: MIN_USER_AGE,
            max: MAX_USER_AGE,
        });
    }

    if violations.is_empty() {
        Ok(VALIDATION_SUCCESS)
    } else {
        Err(UserInputError::new(violations))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::below_min(-10, false)]
    #[case::equal_to_min(0, true)]
    #[case::between_min_and_max(50, true)]
    #[case::equal_to_max(100, true)]
    #[case::above_max(200, false)]
    fn test_is_price_in_range(#[case] price: i64, #[case] expected: bool) {
        assert_eq!(is_price_in_range(price, 0, 100), expected);
    }

    #[test]
    fn test_is_price_in_range_with_money() {
        let min = Money::from_cents(0);
        let max = Money::from_cents(10_000);
        assert!(is_price_in_range(Money::from_cents(10_000), min, max));
        assert!(!is_price_in_range(Money::from_cents(10_001), min, max));
    }

    #[test]
    fn test_is_valid_username_length_bounds() {
        let min = DEFAULT_USERNAME_MIN_LENGTH;
        let max = DEFAULT_USERNAME_MAX_LENGTH;

        assert!(!is_valid_username(&json!("a".repeat(min - 1))));
        assert!(!is_valid_username(&json!("a".repeat(max + 1))));

        assert!(is_valid_username(&json!("a".repeat(min))));
        assert!(is_valid_username(&json!("a".repeat(max))));
        assert!(is_valid_username(&json!("a".repeat(min + 1))));
        assert!(is_valid_username(&json!("a".repeat(max - 1))));
    }

    #[rstest]
    #[case::null(json!(null))]
    #[case::number(json!(1))]
    #[case::array(json!(["abcdef"]))]
    #[case::object(json!({ "name": "abcdef" }))]
    fn test_is_valid_username_rejects_non_strings(#[case] input: Value) {
        assert!(!is_valid_username(&input));
    }

    #[test]
    fn test_username_policy_counts_characters_not_bytes() {
        let policy = UsernamePolicy::default();
        // 5 characters, 10 bytes
        assert!(policy.accepts("ééééé"));
    }

    #[test]
    fn test_username_policy_rejects_inverted_bounds() {
        assert!(UsernamePolicy::new(3, 8).is_ok());
        assert!(UsernamePolicy::new(9, 8).is_err());
    }

    #[rstest]
    #[case(15, "US", false)]
    #[case(16, "US", true)]
    #[case(17, "US", true)]
    #[case(16, "UK", false)]
    #[case(17, "UK", true)]
    #[case(18, "UK", true)]
    fn test_can_drive(#[case] age: u32, #[case] country: &str, #[case] expected: bool) {
        assert_eq!(can_drive(age, country), Ok(expected));
    }

    #[test]
    fn test_can_drive_with_unknown_country() {
        let err = can_drive(20, "FR").unwrap_err();

        assert_eq!(err, CoreError::UnknownCountryCode("FR".to_string()));
        assert!(err.to_string().to_lowercase().contains("invalid"));
    }

    #[test]
    fn test_custom_driving_age_table() {
        let table = DrivingAgeTable::new([("FR", 18)]);
        assert_eq!(table.minimum_age("FR"), Some(18));
        assert_eq!(table.can_drive(17, "FR"), Ok(false));
        assert!(table.can_drive(17, "US").is_err());
    }

    #[test]
    fn test_validate_user_input_success() {
        let result = validate_user_input(&json!("abhi"), &json!(27));
        assert_eq!(result, Ok(VALIDATION_SUCCESS));
        assert!(VALIDATION_SUCCESS.to_lowercase().contains("success"));
    }

    #[rstest]
    #[case::username_not_a_string(json!(1), json!(27))]
    #[case::username_too_short(json!("a"), json!(27))]
    #[case::age_not_a_number(json!("abhi"), json!("27"))]
    #[case::age_below_minimum(json!("abhi"), json!(17))]
    #[case::age_above_maximum(json!("abhi"), json!(101))]
    fn test_validate_user_input_single_violation(#[case] username: Value, #[case] age: Value) {
        let err = validate_user_input(&username, &age).unwrap_err();

        assert_eq!(err.violations().len(), 1);
        assert!(err.to_string().to_lowercase().contains("invalid"));
    }

    #[test]
    fn test_validate_user_input_reports_both_violations() {
        let err = validate_user_input(&json!(""), &json!(0)).unwrap_err();
        let message = err.to_string().to_lowercase();

        assert!(message.contains("invalid username"));
        assert!(message.contains("invalid age"));
    }

    #[test]
    fn test_validate_user_input_age_bounds_are_inclusive() {
        assert!(validate_user_input(&json!("abc"), &json!(18)).is_ok());
        assert!(validate_user_input(&json!("abc"), &json!(100)).is_ok());
    }
}
