use crate::domain::model::NormalizedDigits;

/// Strips everything that is not an ASCII digit. Never fails; an input without
/// digits normalizes to an empty sequence.
pub fn normalize(raw: &str) -> NormalizedDigits {
    NormalizedDigits::from_raw(raw)
}
