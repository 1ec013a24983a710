use crate::core::{classify::classify, format::validate_format, luhn::luhn_check};
use crate::domain::model::{CardDetails, NormalizedDigits};
use crate::domain::ports::Clock;
use crate::utils::error::CardError;
use chrono::{DateTime, Utc};

const BIN_DIGITS: usize = 6;
const LAST_DIGITS: usize = 4;

/// UTC instant as ISO-8601 without an offset suffix, microsecond precision.
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Derived fields for digits that already passed the format check.
pub fn describe(digits: &NormalizedDigits, clock: &dyn Clock) -> CardDetails {
    CardDetails {
        card_type: classify(digits),
        length: digits.len(),
        bin: digits.leading(BIN_DIGITS).to_string(),
        last_four: digits.trailing(LAST_DIGITS).to_string(),
        is_valid: luhn_check(digits),
        timestamp: iso_timestamp(clock.now()),
    }
}

/// Format-checks `raw` and, if it passes, builds its [`CardDetails`].
/// Format failures come back unchanged.
pub fn card_details(raw: Option<&str>, clock: &dyn Clock) -> Result<CardDetails, CardError> {
    let digits = validate_format(raw)?;
    Ok(describe(&digits, clock))
}
