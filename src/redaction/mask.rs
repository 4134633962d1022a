//! Partial masking for display
//!
//! Unlike redaction these keep the last four digits, for UIs and receipts
//! where the value must stay recognisable to its owner.

use regex::Regex;
use std::sync::LazyLock;

static SSN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{3})[\s.-]?(\d{2})[\s.-]?(\d{4})\s*$").expect("valid SSN mask regex")
});

/// Mask an SSN as `XXX-XX-1234`; anything not shaped like one is returned unchanged
pub fn mask_ssn(ssn: &str) -> String {
    match SSN_SHAPE.captures(ssn) {
        Some(caps) => format!("XXX-XX-{}", &caps[3]),
        None => ssn.to_string(),
    }
}

/// Mask a card number as `XXXX-XXXX-XXXX-1234`
///
/// Spaces and hyphens are ignored. Input that is not 13 to 19 digits is
/// returned unchanged.
pub fn mask_credit_card(card: &str) -> String {
    let digits: String = card
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if !(13..=19).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return card.to_string();
    }

    format!("XXXX-XXXX-XXXX-{}", &digits[digits.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("123-45-6789", "XXX-XX-6789" ; "hyphenated")]
    #[test_case("123456789", "XXX-XX-6789" ; "bare digits")]
    #[test_case("123 45 6789", "XXX-XX-6789" ; "spaced")]
    #[test_case("12-345-6789", "12-345-6789" ; "wrong grouping")]
    #[test_case("not an ssn", "not an ssn" ; "text")]
    fn test_mask_ssn(input: &str, expected: &str) {
        assert_eq!(mask_ssn(input), expected);
    }

    #[test_case("4111 1111 1111 1234", "XXXX-XXXX-XXXX-1234" ; "spaced")]
    #[test_case("4111-1111-1111-1111", "XXXX-XXXX-XXXX-1111" ; "hyphenated")]
    #[test_case("378282246310005", "XXXX-XXXX-XXXX-0005" ; "amex length")]
    #[test_case("1234", "1234" ; "too short")]
    #[test_case("4111 1111 abcd 1111", "4111 1111 abcd 1111" ; "non digits")]
    fn test_mask_credit_card(input: &str, expected: &str) {
        assert_eq!(mask_credit_card(input), expected);
    }
}
