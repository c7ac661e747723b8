//! PII detection engine
//!
//! A forward-only pipeline over plain text:
//!
//! ```text
//! PatternCatalog → Scanner → validators → Report
//! ```
//!
//! - [`catalog`]: the closed set of recognizers, one per category
//! - [`scanner`]: every non-overlapping occurrence of every recognizer
//! - [`validator`]: Luhn and national-ID structural checks
//! - [`report`]: grouping, deduplication and text rendering
//! - [`detector`]: the boundary operations tying them together

pub mod catalog;
pub mod detector;
pub mod report;
pub mod scanner;
pub mod validator;

pub use catalog::{PatternCatalog, PiiCategory, Recognizer};
pub use detector::{detect_pii, detect_pii_across_messages, DetectedPii, PiiDetector};
pub use report::{format_report, summarize, summary_message, PiiFinding, Report, NO_PII_MESSAGE};
pub use scanner::{RawMatch, Scanner};
pub use validator::{luhn_valid, national_id_valid, validate};
