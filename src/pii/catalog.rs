//! Pattern catalog: the fixed set of PII recognizers
//!
//! The `regex` crate has no look-around or back-references, so the
//! structural exclusions for national IDs live in the validator and the
//! consistent-separator rule is spelled out as an alternation.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of personally identifiable information.
///
/// Declaration order is catalog order; reports iterate categories in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PiiCategory {
    /// Email address
    Email,
    /// Phone number, optionally with country code and extension
    Phone,
    /// 3-2-4 structured national ID number
    NationalId,
    /// Payment card number (Luhn checked)
    PaymentCard,
    /// Two consecutive capitalized words
    PersonName,
}

impl PiiCategory {
    /// All categories in catalog order
    pub const ALL: [PiiCategory; 5] = [
        PiiCategory::Email,
        PiiCategory::Phone,
        PiiCategory::NationalId,
        PiiCategory::PaymentCard,
        PiiCategory::PersonName,
    ];

    /// Stable name used in reports and JSON output
    pub fn label(self) -> &'static str {
        match self {
            PiiCategory::Email => "email",
            PiiCategory::Phone => "phone",
            PiiCategory::NationalId => "nationalId",
            PiiCategory::PaymentCard => "paymentCard",
            PiiCategory::PersonName => "personName",
        }
    }

    // Digit classes and word boundaries are ASCII-only: a Unicode digit the
    // validators cannot read must never end up inside a match.
    fn pattern(self) -> &'static str {
        match self {
            PiiCategory::Email => r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            PiiCategory::Phone => {
                r"(?:\+?[0-9]{1,3}[-. ]*)?\(?[0-9]{3}\)?[-. ]*[0-9]{3}[-. ]*[0-9]{4}(?: *x[0-9]+)?"
            }
            PiiCategory::NationalId => {
                r"(?-u:\b)(?:[0-9]{3}-[0-9]{2}-[0-9]{4}|[0-9]{3}[ \t][0-9]{2}[ \t][0-9]{4}|[0-9]{9})(?-u:\b)"
            }
            PiiCategory::PaymentCard => r"(?-u:\b)(?:[0-9][ -]*?){13,19}(?-u:\b)",
            PiiCategory::PersonName => r"(?-u:\b)[A-Z][a-z]+ [A-Z][a-z]+(?-u:\b)",
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PiiCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PiiCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| Error::Config(format!("Unknown PII category '{}'", s)))
    }
}

/// A compiled pattern bound to its category
#[derive(Debug, Clone)]
pub struct Recognizer {
    /// Category this recognizer reports
    pub category: PiiCategory,
    /// Compiled pattern
    pub pattern: Regex,
}

/// Immutable, ordered set of recognizers, one per category.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    recognizers: Vec<Recognizer>,
}

impl PatternCatalog {
    /// Compile the built-in recognizers
    pub fn new() -> Result<Self> {
        let recognizers = PiiCategory::ALL
            .into_iter()
            .map(|category| {
                let pattern = Regex::new(category.pattern()).map_err(|e| {
                    Error::Pattern(format!(
                        "Invalid regex pattern for category '{}': {}",
                        category, e
                    ))
                })?;
                Ok(Recognizer { category, pattern })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { recognizers })
    }

    /// Recognizers in catalog order
    pub fn recognizers(&self) -> impl Iterator<Item = &Recognizer> {
        self.recognizers.iter()
    }

    /// Look up the recognizer for a category
    pub fn get(&self, category: PiiCategory) -> Option<&Recognizer> {
        self.recognizers.iter().find(|r| r.category == category)
    }

    /// Number of recognizers
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(category: PiiCategory, text: &str) -> Vec<String> {
        let catalog = PatternCatalog::new().unwrap();
        catalog
            .get(category)
            .unwrap()
            .pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_catalog_order() {
        let catalog = PatternCatalog::new().unwrap();
        let order: Vec<_> = catalog.recognizers().map(|r| r.category).collect();
        assert_eq!(order, PiiCategory::ALL.to_vec());
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_no_pattern_matches_empty() {
        let catalog = PatternCatalog::new().unwrap();
        for r in catalog.recognizers() {
            assert!(!r.pattern.is_match(""), "{} matched empty input", r.category);
        }
    }

    #[test]
    fn test_labels_roundtrip() {
        for category in PiiCategory::ALL {
            assert_eq!(category.label().parse::<PiiCategory>().unwrap(), category);
        }
        assert!("ssn".parse::<PiiCategory>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PiiCategory::PaymentCard).unwrap();
        assert_eq!(json, "\"paymentCard\"");
        let parsed: PiiCategory = serde_json::from_str("\"nationalId\"").unwrap();
        assert_eq!(parsed, PiiCategory::NationalId);
    }

    #[test]
    fn test_email_pattern() {
        assert_eq!(
            matches(PiiCategory::Email, "mail a.b+c@mail.example.org or x@y.z"),
            vec!["a.b+c@mail.example.org"]
        );
    }

    #[test]
    fn test_phone_pattern_shapes() {
        assert_eq!(matches(PiiCategory::Phone, "call 555-123-4567"), vec!["555-123-4567"]);
        assert_eq!(matches(PiiCategory::Phone, "call (555) 123-4567"), vec!["(555) 123-4567"]);
        assert_eq!(
            matches(PiiCategory::Phone, "call +1 555.123.4567 x204 now"),
            vec!["+1 555.123.4567 x204"]
        );
        assert!(matches(PiiCategory::Phone, "call 555-1234").is_empty());
    }

    #[test]
    fn test_national_id_pattern_separators() {
        assert_eq!(matches(PiiCategory::NationalId, "id 123-45-6789"), vec!["123-45-6789"]);
        assert_eq!(matches(PiiCategory::NationalId, "id 123 45 6789"), vec!["123 45 6789"]);
        assert_eq!(matches(PiiCategory::NationalId, "id\t123\t45\t6789"), vec!["123\t45\t6789"]);
        assert_eq!(matches(PiiCategory::NationalId, "id 123456789"), vec!["123456789"]);
        assert!(matches(PiiCategory::NationalId, "id 1234567890").is_empty());
    }

    #[test]
    fn test_national_id_pattern_rejects_dash_mixed_with_whitespace() {
        assert!(matches(PiiCategory::NationalId, "id 123-45 6789").is_empty());
        assert!(matches(PiiCategory::NationalId, "id 123 45-6789").is_empty());
    }

    #[test]
    fn test_payment_card_pattern() {
        assert_eq!(
            matches(PiiCategory::PaymentCard, "card 4111-1111-1111-1111."),
            vec!["4111-1111-1111-1111"]
        );
        assert_eq!(
            matches(PiiCategory::PaymentCard, "card 4532 0151 1283 0366"),
            vec!["4532 0151 1283 0366"]
        );
        assert!(matches(PiiCategory::PaymentCard, "order 123456789012").is_empty());
    }

    #[test]
    fn test_person_name_pattern() {
        assert_eq!(
            matches(PiiCategory::PersonName, "signed by Alice Smith and Bob Jones,"),
            vec!["Alice Smith", "Bob Jones"]
        );
        assert!(matches(PiiCategory::PersonName, "dear alice smith").is_empty());
    }

    #[test]
    fn test_non_ascii_digits_never_match() {
        assert!(matches(PiiCategory::Phone, "call ٥٥٥-١٢٣-٤٥٦٧ now").is_empty());
        assert!(matches(PiiCategory::Phone, "call ５５５-１２３-４５６７ now").is_empty());
        assert!(matches(PiiCategory::NationalId, "id ١٢٣-45-6789").is_empty());
    }

    #[test]
    fn test_payment_card_stops_at_non_ascii_digit() {
        assert_eq!(
            matches(PiiCategory::PaymentCard, "card 4532015112830366٣ end"),
            vec!["4532015112830366"]
        );
    }

    #[test]
    fn test_person_name_ascii_word_boundary() {
        assert_eq!(
            matches(PiiCategory::PersonName, "Alice Smithé"),
            vec!["Alice Smith"]
        );
    }
}
