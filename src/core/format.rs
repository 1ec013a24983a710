use crate::core::normalize::normalize;
use crate::domain::model::NormalizedDigits;
use crate::utils::error::CardError;

pub const MIN_DIGITS: usize = 13;
pub const MAX_DIGITS: usize = 19;

/// Structural check on a raw card number.
///
/// The digits-only check runs before the length check, so absent or empty
/// input always reports [`CardError::DIGITS_ONLY`].
pub fn validate_format(raw: Option<&str>) -> Result<NormalizedDigits, CardError> {
    let digits = normalize(raw.unwrap_or_default());

    if digits.is_empty() || !digits.as_str().bytes().all(|b| b.is_ascii_digit()) {
        return Err(CardError::invalid_format(CardError::DIGITS_ONLY));
    }

    if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
        return Err(CardError::invalid_format(CardError::LENGTH_RANGE));
    }

    Ok(digits)
}
