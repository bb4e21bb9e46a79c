//! Centralized validation and helper functions.

use num_traits::{CheckedDiv, CheckedSub, ToPrimitive, Zero};

use crate::core::types::{Ratio, Teeth};

/// Maximum number of gears allowed in an inventory.
///
/// Six-gear generation grows with the sixth power of the number of distinct
/// tooth counts. Sixteen distinct gears give under a million six-gear trains.
pub const MAX_INVENTORY: usize = 16;

/// Largest tooth count accepted for a single gear
pub const MAX_TEETH: Teeth = 500;

/// Longest train, in physical gears (three driver/driven stages)
pub const MAX_TRAIN_GEARS: usize = 6;

/// Maximum number of fractional digits accepted when parsing a decimal
pub const MAX_DECIMAL_PLACES: usize = 12;

/// Errors raised while turning user-supplied decimals into exact ratios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("Empty number")]
    Empty,
    #[error("Invalid number '{0}'")]
    Invalid(String),
    #[error("Negative or non-finite number '{0}'")]
    OutOfRange(String),
    #[error("Number '{0}' has more than {MAX_DECIMAL_PLACES} decimal places")]
    TooPrecise(String),
    #[error("Number '{0}' is too large")]
    Overflow(String),
}

/// Check that a tooth count is usable for a gear.
///
/// # Examples
///
/// ```
/// use gear_solver::utils::validation::is_valid_teeth;
///
/// assert!(is_valid_teeth(20));
/// assert!(!is_valid_teeth(0));
/// assert!(!is_valid_teeth(10_000));
/// ```
#[must_use]
pub fn is_valid_teeth(teeth: Teeth) -> bool {
    teeth > 0 && teeth <= MAX_TEETH
}

/// Check if adding another gear would exceed the maximum inventory size.
///
/// Call this with the current count BEFORE adding a new gear.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_inventory_limit(count: usize) -> Option<String> {
    if count >= MAX_INVENTORY {
        Some(format!(
            "Too many gears: adding another would exceed maximum of {MAX_INVENTORY}"
        ))
    } else {
        None
    }
}

/// Parse a non-negative decimal (`"0.15"`, `"12"`) or fraction (`"3/20"`)
/// into an exact ratio.
///
/// # Examples
///
/// ```
/// use gear_solver::utils::validation::parse_decimal;
/// use gear_solver::Ratio;
///
/// assert_eq!(parse_decimal("0.15").unwrap(), Ratio::new(3, 20));
/// assert_eq!(parse_decimal("2.875").unwrap(), Ratio::new(23, 8));
/// assert_eq!(parse_decimal("127/40").unwrap(), Ratio::new(127, 40));
/// assert!(parse_decimal("-1").is_err());
/// ```
///
/// # Errors
///
/// Returns a `DecimalError` if the text is empty, malformed, negative, has
/// too many decimal places, or does not fit in a 64-bit ratio.
pub fn parse_decimal(text: &str) -> Result<Ratio, DecimalError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DecimalError::Empty);
    }
    if text.starts_with('-') {
        return Err(DecimalError::OutOfRange(text.to_string()));
    }

    if let Some((numer, denom)) = text.split_once('/') {
        let numer = parse_digits(numer.trim(), text)?;
        let denom = parse_digits(denom.trim(), text)?;
        if denom == 0 {
            return Err(DecimalError::Invalid(text.to_string()));
        }
        return Ok(Ratio::new(numer, denom));
    }

    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(DecimalError::Invalid(text.to_string()));
    }
    if fraction.len() > MAX_DECIMAL_PLACES {
        return Err(DecimalError::TooPrecise(text.to_string()));
    }

    let whole = if whole.is_empty() { 0 } else { parse_digits(whole, text)? };
    let fraction_value = if fraction.is_empty() { 0 } else { parse_digits(fraction, text)? };
    let scale = 10u64.pow(u32::try_from(fraction.len()).unwrap_or(0));

    let numer = whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(fraction_value))
        .ok_or_else(|| DecimalError::Overflow(text.to_string()))?;

    Ok(Ratio::new(numer, scale))
}

/// Convert a float read from configuration into an exact ratio.
///
/// The float is rendered with its shortest round-trip representation first,
/// so `0.15` becomes exactly `3/20` rather than the nearest binary fraction.
///
/// # Errors
///
/// Returns a `DecimalError` for negative, NaN or infinite values, and for
/// values whose decimal form is too long to represent.
pub fn decimal_from_f64(value: f64) -> Result<Ratio, DecimalError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DecimalError::OutOfRange(value.to_string()));
    }
    parse_decimal(&value.to_string())
}

/// Lossy conversion of an exact ratio for display
#[must_use]
pub fn ratio_to_f64(ratio: &Ratio) -> f64 {
    ratio.to_f64().unwrap_or(f64::NAN)
}

/// Ratio with 128-bit terms, for intermediate results of `Ratio` arithmetic
pub type WideRatio = num_rational::Ratio<u128>;

/// Widen an exact ratio without changing its value.
///
/// The difference of two widened ratios always fits; sums and products may
/// not and must use checked arithmetic.
#[must_use]
pub fn widen(ratio: &Ratio) -> WideRatio {
    WideRatio::new_raw(u128::from(*ratio.numer()), u128::from(*ratio.denom()))
}

fn wide_to_f64(ratio: &WideRatio) -> f64 {
    ratio.to_f64().unwrap_or(f64::NAN)
}

/// Signed relative deviation `(actual - expected) / expected` as a float.
///
/// The subtraction is done exactly; only the final quotient is rounded. If
/// the exact quotient does not fit, it is computed in floating point.
#[must_use]
pub fn relative_deviation(actual: &Ratio, expected: &Ratio) -> f64 {
    if expected.is_zero() {
        return f64::NAN;
    }
    let (actual, expected) = (widen(actual), widen(expected));
    let (sign, diff) = if actual >= expected {
        (1.0, actual.checked_sub(&expected))
    } else {
        (-1.0, expected.checked_sub(&actual))
    };
    match diff.and_then(|d| d.checked_div(&expected)) {
        Some(quotient) => sign * wide_to_f64(&quotient),
        None => (wide_to_f64(&actual) - wide_to_f64(&expected)) / wide_to_f64(&expected),
    }
}

fn parse_digits(digits: &str, original: &str) -> Result<u64, DecimalError> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DecimalError::Invalid(original.to_string()));
    }
    digits
        .parse::<u64>()
        .map_err(|_| DecimalError::Overflow(original.to_string()))
}
