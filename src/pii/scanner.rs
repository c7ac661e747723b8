//! Applies every recognizer to a text and collects raw candidates

use super::catalog::{PatternCatalog, PiiCategory};

/// An unvalidated occurrence of a recognizer's pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Category of the recognizer that produced it
    pub category: PiiCategory,
    /// Matched text, verbatim
    pub text: String,
    /// Start byte offset in the scanned text
    pub start: usize,
    /// End byte offset in the scanned text
    pub end: usize,
}

/// Runs a catalog's recognizers over input text.
pub struct Scanner<'a> {
    catalog: &'a PatternCatalog,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over a compiled catalog
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Collect every non-overlapping occurrence of every recognizer.
    ///
    /// Results are grouped by category in catalog order, ascending by
    /// offset within a category. Different categories may overlap.
    pub fn scan(&self, text: &str) -> Vec<RawMatch> {
        let mut matches = Vec::new();

        for recognizer in self.catalog.recognizers() {
            for mat in recognizer.pattern.find_iter(text) {
                matches.push(RawMatch {
                    category: recognizer.category,
                    text: mat.as_str().to_string(),
                    start: mat.start(),
                    end: mat.end(),
                });
            }
        }

        matches
    }
}
