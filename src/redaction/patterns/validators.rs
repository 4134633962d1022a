//! Candidate validators
//!
//! Each validator receives the exact substring its pattern matched, separators
//! included, and confirms whether it is plausibly real PII. Validators are pure:
//! no state is kept between calls.

/// Repeated-digit numbers never issued as SSNs
const REPEATED_DIGIT_SSNS: [&str; 10] = [
    "000000000",
    "111111111",
    "222222222",
    "333333333",
    "444444444",
    "555555555",
    "666666666",
    "777777777",
    "888888888",
    "999999999",
];

/// Validate a US Social Security Number against SSA issuance rules
///
/// Hyphens are stripped first. Rejects the ten repeated-digit numbers, area
/// numbers 000, 666 and 900-999, group 00 and serial 0000.
pub fn validate_ssn(candidate: &str) -> bool {
    let cleaned: String = candidate.chars().filter(|c| *c != '-').collect();

    if cleaned.len() != 9 || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    if REPEATED_DIGIT_SSNS.contains(&cleaned.as_str()) {
        return false;
    }

    let area: u32 = cleaned[..3].parse().unwrap_or(0);
    if area == 0 || area == 666 || area >= 900 {
        return false;
    }

    let group: u32 = cleaned[3..5].parse().unwrap_or(0);
    if group == 0 {
        return false;
    }

    let serial: u32 = cleaned[5..].parse().unwrap_or(0);
    serial != 0
}

/// Luhn checksum for payment card numbers
///
/// Spaces and hyphens are stripped; the remainder must be 13-19 digits.
pub fn validate_luhn(candidate: &str) -> bool {
    let cleaned: String = candidate
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if cleaned.len() < 13 || cleaned.len() > 19 {
        return false;
    }

    let mut sum = 0;
    for (idx, ch) in cleaned.chars().rev().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };

        // Every second digit from the right is doubled
        sum += if idx % 2 == 1 {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
    }

    sum % 10 == 0
}

/// ABA routing number checksum
///
/// `3(d1+d4+d7) + 7(d2+d5+d8) + (d3+d6+d9)` must be divisible by 10. A leading
/// zero is accepted (Federal Reserve routing symbols 01-12 start with 0), but
/// the all-zero number is not.
pub fn validate_aba(candidate: &str) -> bool {
    if candidate.len() != 9 {
        return false;
    }

    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 9 || digits.iter().all(|d| *d == 0) {
        return false;
    }

    let sum = 3 * (digits[0] + digits[3] + digits[6])
        + 7 * (digits[1] + digits[4] + digits[7])
        + (digits[2] + digits[5] + digits[8]);

    sum % 10 == 0
}

/// Resolve a validator by the name used in pattern libraries
pub fn by_name(name: &str) -> Option<fn(&str) -> bool> {
    match name.to_lowercase().as_str() {
        "ssn" => Some(validate_ssn),
        "luhn" => Some(validate_luhn),
        "aba" => Some(validate_aba),
        _ => None,
    }
}
