use crate::core::format::{MAX_DIGITS, MIN_DIGITS};
use crate::domain::model::NormalizedDigits;

/// Luhn (mod 10) checksum.
///
/// Sequences outside the 13..=19 card length range, including the empty one,
/// are never valid.
pub fn luhn_check(digits: &NormalizedDigits) -> bool {
    if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
        return false;
    }

    let mut sum = 0u32;
    let mut doubled = false;

    for digit in digits.values().rev() {
        let mut value = digit;
        if doubled {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
        doubled = !doubled;
    }

    sum % 10 == 0
}
