//! Scan, validate and order: the boundary operations of the engine

use super::catalog::{PatternCatalog, PiiCategory};
use super::report::PiiFinding;
use super::scanner::Scanner;
use super::validator::validate;
use crate::error::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static SHARED: OnceCell<PiiDetector> = OnceCell::new();

/// A validated match with its position in the scanned text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedPii {
    /// Category of the value
    pub category: PiiCategory,
    /// Value exactly as it appeared
    pub value: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

impl From<DetectedPii> for PiiFinding {
    fn from(d: DetectedPii) -> Self {
        PiiFinding {
            category: d.category,
            value: d.value,
        }
    }
}

/// Stateless PII detector over an immutable pattern catalog.
#[derive(Debug, Clone)]
pub struct PiiDetector {
    catalog: PatternCatalog,
}

impl PiiDetector {
    /// Create a detector with a freshly compiled catalog
    pub fn new() -> Result<Self> {
        Ok(Self::with_catalog(PatternCatalog::new()?))
    }

    /// Create a detector over an existing catalog
    pub fn with_catalog(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Process-wide detector, compiled on first use.
    pub fn shared() -> Result<&'static PiiDetector> {
        SHARED.get_or_try_init(PiiDetector::new)
    }

    /// The catalog this detector scans with
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Scan and validate one text; results ascend by start offset.
    pub fn detect(&self, text: &str) -> Vec<DetectedPii> {
        let raw = Scanner::new(&self.catalog).scan(text);
        let candidates = raw.len();

        let mut detected: Vec<DetectedPii> = raw
            .into_iter()
            .filter(|m| {
                let keep = validate(m.category, &m.text);
                if !keep {
                    tracing::trace!(category = %m.category, "Dropped candidate failing validation");
                }
                keep
            })
            .map(|m| DetectedPii {
                category: m.category,
                value: m.text,
                start: m.start,
                end: m.end,
            })
            .collect();

        // Stable: equal offsets keep catalog order.
        detected.sort_by_key(|d| d.start);

        tracing::debug!(
            candidates,
            accepted = detected.len(),
            "Scanned {} bytes",
            text.len()
        );

        detected
    }

    /// Detect across messages, concatenating results in input order.
    pub fn detect_across_messages<I, S>(&self, texts: I) -> Vec<PiiFinding>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .flat_map(|text| self.detect(text.as_ref()))
            .map(PiiFinding::from)
            .collect()
    }
}

/// Detect PII in one text using the shared detector.
pub fn detect_pii(text: &str) -> Result<Vec<DetectedPii>> {
    Ok(PiiDetector::shared()?.detect(text))
}

/// Detect PII across an ordered sequence of texts using the shared detector.
pub fn detect_pii_across_messages<I, S>(texts: I) -> Result<Vec<PiiFinding>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(PiiDetector::shared()?.detect_across_messages(texts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pii::report::{format_report, NO_PII_MESSAGE};

    fn detector() -> PiiDetector {
        PiiDetector::new().unwrap()
    }

    #[test]
    fn test_detect_empty_and_plain() {
        let d = detector();
        assert!(d.detect("").is_empty());
        assert!(d.detect("the quick brown fox jumps over the lazy dog").is_empty());
    }

    #[test]
    fn test_detect_email_then_phone() {
        let found = detector().detect("Contact alice@example.com or 555-123-4567");
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].category, PiiCategory::Email);
        assert_eq!(found[0].value, "alice@example.com");
        assert_eq!(found[0].start, 8);
        assert_eq!(found[0].end, 25);

        assert_eq!(found[1].category, PiiCategory::Phone);
        assert_eq!(found[1].value, "555-123-4567");
    }

    #[test]
    fn test_detect_national_id_and_card() {
        let text = "My SSN is 078-05-1120 and card 4532015112830366";
        let found = detector().detect(text);

        let ids: Vec<_> = found
            .iter()
            .filter(|d| d.category == PiiCategory::NationalId)
            .collect();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].value, "078-05-1120");

        let cards: Vec<_> = found
            .iter()
            .filter(|d| d.category == PiiCategory::PaymentCard)
            .collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].value, "4532015112830366");
    }

    #[test]
    fn test_detect_drops_invalid_candidates() {
        let found = detector().detect("SSN 666-45-6789, card 4532015112830367");
        assert!(found.iter().all(|d| d.category != PiiCategory::NationalId));
        assert!(found.iter().all(|d| d.category != PiiCategory::PaymentCard));
    }

    #[test]
    fn test_detect_sorted_by_start() {
        let text = "Alice Smith <alice@example.com>, card 4111 1111 1111 1111, ssn 123-45-6789";
        let found = detector().detect(text);
        assert!(found.len() >= 4);
        assert!(found.windows(2).all(|w| w[0].start <= w[1].start));
        assert_eq!(found[0].category, PiiCategory::PersonName);
        for d in &found {
            assert_eq!(&text[d.start..d.end], d.value);
        }
    }

    #[test]
    fn test_detect_keeps_unvalidated_false_positives() {
        let found = detector().detect("Reach Bob Jones at bob@example.org or (555) 987-6543 x12");
        let names: Vec<_> = found
            .iter()
            .filter(|d| d.category == PiiCategory::PersonName)
            .map(|d| d.value.as_str())
            .collect();
        assert_eq!(names, vec!["Reach Bob"]);
        assert!(found.iter().all(|d| d.value != "Bob Jones"));

        let found = detector().detect("order ref 1234567890");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, PiiCategory::Phone);
        assert_eq!(found[0].value, "1234567890");
    }

    #[test]
    fn test_detect_ignores_non_ascii_digits() {
        let d = detector();
        assert!(d.detect("call ٥٥٥-١٢٣-٤٥٦٧ now").is_empty());
        assert!(d.detect("call ５５５-１２３-４５６７ now").is_empty());

        let found = d.detect("card 4532015112830366٣ end");
        let cards: Vec<_> = found
            .iter()
            .filter(|d| d.category == PiiCategory::PaymentCard)
            .collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].value, "4532015112830366");
        assert!(cards[0].value.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_detect_idempotent() {
        let d = detector();
        let text = "Reach Bob Jones at bob@example.org or (555) 987-6543 x12";
        assert_eq!(d.detect(text), d.detect(text));
    }

    #[test]
    fn test_detect_across_messages_preserves_order() {
        let messages = [
            "first: z@example.com",
            "",
            "second: a@example.com and z@example.com",
        ];
        let found = detector().detect_across_messages(messages);
        let values: Vec<_> = found.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["z@example.com", "a@example.com", "z@example.com"]);

        let report = format_report(&found);
        assert_eq!(
            report,
            "PII Detection Results:\n\nemail:\n- z@example.com\n- a@example.com"
        );
    }

    #[test]
    fn test_detect_across_no_messages() {
        let found = detector().detect_across_messages(Vec::<String>::new());
        assert!(found.is_empty());
        assert_eq!(format_report(&found), NO_PII_MESSAGE);
    }

    #[test]
    fn test_shared_detector() {
        let a = PiiDetector::shared().unwrap();
        let b = PiiDetector::shared().unwrap();
        assert!(std::ptr::eq(a, b));

        let found = detect_pii("mail carol@example.net").unwrap();
        assert_eq!(found.len(), 1);

        let found = detect_pii_across_messages(["carol@example.net", "555.123.4567"]).unwrap();
        assert_eq!(found[1].category, PiiCategory::Phone);
    }
}
