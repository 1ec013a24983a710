use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal digits pulled out of a raw card number, in their original order.
///
/// Only [`NormalizedDigits::from_raw`] builds one, so the contents are always
/// ASCII `0`-`9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedDigits(String);

impl NormalizedDigits {
    pub fn from_raw(raw: &str) -> Self {
        Self(raw.chars().filter(|c| c.is_ascii_digit()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digit values, left to right.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.0.bytes().map(|b| u32::from(b - b'0'))
    }

    /// First `n` digits, or all of them when there are fewer.
    pub fn leading(&self, n: usize) -> &str {
        &self.0[..n.min(self.0.len())]
    }

    /// Last `n` digits, or all of them when there are fewer.
    pub fn trailing(&self, n: usize) -> &str {
        &self.0[self.0.len().saturating_sub(n)..]
    }

    /// Groups of four separated by a space: `4111 1111 1111 1111`.
    pub fn grouped(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + self.0.len() / 4);
        for (i, c) in self.0.chars().enumerate() {
            if i > 0 && i % 4 == 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for NormalizedDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Visa,
    MasterCard,
    #[serde(rename = "American Express")]
    AmericanExpress,
    Discover,
    Unknown,
}

impl CardType {
    pub fn label(&self) -> &'static str {
        match self {
            CardType::Visa => "Visa",
            CardType::MasterCard => "MasterCard",
            CardType::AmericanExpress => "American Express",
            CardType::Discover => "Discover",
            CardType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation result for one card number, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub length: usize,
    pub bin: String,
    pub last_four: String,
    pub is_valid: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn healthy(timestamp: String) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_keeps_only_digits_in_order() {
        assert_eq!(
            NormalizedDigits::from_raw("4111-1111 1111x1111").as_str(),
            "4111111111111111"
        );
        assert!(NormalizedDigits::from_raw("").is_empty());
        assert!(NormalizedDigits::from_raw("   \t").is_empty());
        assert!(NormalizedDigits::from_raw("abc-def").is_empty());
    }

    #[test]
    fn test_from_raw_ignores_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII
        assert_eq!(NormalizedDigits::from_raw("4١2").as_str(), "42");
    }

    #[test]
    fn test_leading_and_trailing_clamp() {
        let digits = NormalizedDigits::from_raw("123");
        assert_eq!(digits.leading(6), "123");
        assert_eq!(digits.trailing(4), "123");

        let digits = NormalizedDigits::from_raw("4111111111111111");
        assert_eq!(digits.leading(6), "411111");
        assert_eq!(digits.trailing(4), "1111");
    }

    #[test]
    fn test_grouped() {
        assert_eq!(
            NormalizedDigits::from_raw("4111111111111111").grouped(),
            "4111 1111 1111 1111"
        );
        assert_eq!(
            NormalizedDigits::from_raw("340000000000009").grouped(),
            "3400 0000 0000 009"
        );
        assert_eq!(NormalizedDigits::default().grouped(), "");
    }

    #[test]
    fn test_card_details_wire_names() {
        let details = CardDetails {
            card_type: CardType::AmericanExpress,
            length: 15,
            bin: "340000".to_string(),
            last_four: "0009".to_string(),
            is_valid: true,
            timestamp: "2024-05-01T12:00:00.000000".to_string(),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "American Express");
        assert_eq!(json["lastFour"], "0009");
        assert_eq!(json["isValid"], true);
        assert_eq!(json["length"], 15);
        assert_eq!(json.as_object().unwrap().len(), 6);
    }
}
