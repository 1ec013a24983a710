use crate::domain::model::{CardType, NormalizedDigits};

type Rule = (fn(&str) -> bool, CardType);

fn is_visa(digits: &str) -> bool {
    digits.starts_with('4')
}

fn is_mastercard(digits: &str) -> bool {
    matches!(digits.get(..2), Some("51" | "52" | "53" | "54" | "55"))
}

fn is_amex(digits: &str) -> bool {
    matches!(digits.get(..2), Some("34" | "37"))
}

fn is_discover(digits: &str) -> bool {
    digits.starts_with('6')
}

/// Prefix rules in priority order; the first match wins.
const RULES: &[Rule] = &[
    (is_visa, CardType::Visa),
    (is_mastercard, CardType::MasterCard),
    (is_amex, CardType::AmericanExpress),
    (is_discover, CardType::Discover),
];

/// Issuer network from the leading digits. This is a small fixed prefix table,
/// not a BIN range lookup.
pub fn classify(digits: &NormalizedDigits) -> CardType {
    if digits.is_empty() {
        return CardType::Unknown;
    }

    RULES
        .iter()
        .find(|(matches, _)| matches(digits.as_str()))
        .map(|(_, card_type)| *card_type)
        .unwrap_or(CardType::Unknown)
}
