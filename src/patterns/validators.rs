//! Checksum and plausibility checks applied to candidate matches.
//!
//! A candidate that fails its validator never becomes a span.

use std::net::Ipv6Addr;

use crate::core::models::BuiltinPattern;

/// Luhn (mod 10) checksum over the digits of `input`.
///
/// Spaces and dashes are ignored; any other non-digit makes the input invalid.
pub fn luhn_valid(input: &str) -> bool {
    let mut digits = Vec::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '0'..='9' => digits.push(c as u32 - '0' as u32),
            ' ' | '-' => continue,
            _ => return false,
        }
    }
    if digits.len() < 2 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// ISO 13616 IBAN check: country code, check digits, mod 97 == 1.
///
/// Whitespace is ignored and letters are compared case-insensitively.
pub fn iban_valid(input: &str) -> bool {
    let compact: Vec<char> = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !(15..=34).contains(&compact.len()) {
        return false;
    }
    if !compact[0].is_ascii_alphabetic()
        || !compact[1].is_ascii_alphabetic()
        || !compact[2].is_ascii_digit()
        || !compact[3].is_ascii_digit()
    {
        return false;
    }

    let mut remainder: u32 = 0;
    for c in compact[4..].iter().chain(compact[..4].iter()) {
        let value = match c {
            '0'..='9' => *c as u32 - '0' as u32,
            'A'..='Z' => *c as u32 - 'A' as u32 + 10,
            _ => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    remainder == 1
}

/// A validator takes the extracted value and accepts or rejects it
pub type Validator = fn(&str) -> bool;

/// The validator a built-in pattern type requires, if any
pub fn for_pattern(kind: BuiltinPattern) -> Option<Validator> {
    let validator: Validator = match kind {
        BuiltinPattern::CreditCard => credit_card_valid,
        BuiltinPattern::Iban => iban_valid,
        BuiltinPattern::Email => email_plausible,
        BuiltinPattern::Hostname => hostname_plausible,
        BuiltinPattern::Phone => phone_plausible,
        BuiltinPattern::Path => path_plausible,
        BuiltinPattern::Ipv6 => ipv6_plausible,
        _ => return None,
    };
    Some(validator)
}

/// Run the validator for `kind` against `value`; types without one always pass
pub fn validate(kind: BuiltinPattern, value: &str) -> bool {
    for_pattern(kind).map_or(true, |v| v(value))
}

fn credit_card_valid(value: &str) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() >= 13 && luhn_valid(value)
}

fn email_plausible(value: &str) -> bool {
    value
        .rsplit_once('@')
        .map(|(_, domain)| domain.contains('.'))
        .unwrap_or(false)
}

fn hostname_plausible(value: &str) -> bool {
    value.contains('.') && !value.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn phone_plausible(value: &str) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() >= 8
}

fn path_plausible(value: &str) -> bool {
    if value.to_ascii_lowercase().starts_with("http") {
        return false;
    }
    // Unix paths need at least two components
    !value.starts_with('/') || value.matches('/').count() >= 2
}

fn ipv6_plausible(value: &str) -> bool {
    let address = value.split('/').next().unwrap_or(value);
    let groups = address.split(':').filter(|g| !g.is_empty()).count();
    groups >= 2 && address.parse::<Ipv6Addr>().is_ok()
}
