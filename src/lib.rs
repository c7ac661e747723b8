//! piiscan - Pattern and checksum based PII detection
//!
//! piiscan scans free text (chat messages, uploaded documents) for
//! structured personal data and produces a grouped report.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │    Intake    │   │  Transcript  │
//! │ size + type  │   │   parsing    │
//! └──────┬───────┘   └──────┬───────┘
//!        └────────┬─────────┘
//!                 │ text
//! ┌───────────────▼───────────────────────────────────────────┐
//! │                      PII Detector                          │
//! │  PatternCatalog → Scanner → Validators → Report            │
//! │  - email, phone, nationalId, paymentCard, personName       │
//! │  - Luhn checksum for cards, structural rules for IDs       │
//! │  - dedup per category, catalog-ordered rendering           │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use piiscan::pii::{format_report, PiiCategory, PiiDetector, PiiFinding};
//!
//! let detector = PiiDetector::new().unwrap();
//! let found = detector.detect("Contact alice@example.com or 555-123-4567");
//! assert_eq!(found[0].category, PiiCategory::Email);
//!
//! let findings: Vec<PiiFinding> = found.into_iter().map(Into::into).collect();
//! assert!(format_report(&findings).starts_with("PII Detection Results:"));
//! ```
//!
//! ## Modules
//!
//! - [`pii`]: Pattern catalog, scanner, validators and reporting
//! - [`intake`]: Document size and type gating
//! - [`messages`]: Chat transcript parsing
//! - [`config`]: Configuration management

pub mod config;
pub mod error;
pub mod intake;
pub mod messages;
pub mod pii;

pub use config::PiiScanConfig;
pub use error::{Error, Result};
pub use pii::{
    detect_pii, detect_pii_across_messages, format_report, DetectedPii, PiiCategory,
    PiiDetector, PiiFinding, Report,
};
