//! Category-specific acceptance checks
//!
//! Only payment cards and national IDs carry a validator. A rejected
//! candidate is simply dropped; nothing here returns an error.

use super::catalog::PiiCategory;

/// Decide whether a raw candidate of `category` is kept.
pub fn validate(category: PiiCategory, text: &str) -> bool {
    match category {
        PiiCategory::PaymentCard => luhn_valid(text),
        PiiCategory::NationalId => national_id_valid(text),
        PiiCategory::Email | PiiCategory::Phone | PiiCategory::PersonName => true,
    }
}

fn digits(text: &str) -> Vec<u32> {
    text.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Mod-10 (Luhn) checksum over the digits of `text`, ignoring separators.
///
/// Fewer than two digits is a rejection, not an error.
pub fn luhn_valid(text: &str) -> bool {
    let digits = digits(text);
    let Some((&check, rest)) = digits.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }

    let sum: u32 = rest
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
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

    (sum + check) % 10 == 0
}

/// Structural check for a 9-digit area-group-serial national ID.
pub fn national_id_valid(text: &str) -> bool {
    let clean: String = text.chars().filter(char::is_ascii_digit).collect();
    if clean.len() != 9 {
        return false;
    }

    let (area, rest) = clean.split_at(3);
    let (group, serial) = rest.split_at(2);

    if area == "000" || area == "666" || area.starts_with('9') {
        return false;
    }
    if group == "00" {
        return false;
    }
    serial != "0000"
}
