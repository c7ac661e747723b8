//! Aggregation and rendering of detection results

use super::catalog::PiiCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendered when nothing was found.
pub const NO_PII_MESSAGE: &str = "No PII detected in the document.";

const REPORT_HEADER: &str = "PII Detection Results:";

/// A detected value without its position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiFinding {
    /// Category of the value
    pub category: PiiCategory,
    /// Value exactly as it appeared in the source text
    pub value: String,
}

impl PiiFinding {
    /// Create a finding
    pub fn new(category: PiiCategory, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }
}

/// Findings grouped by category, unique values in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    groups: BTreeMap<PiiCategory, Vec<String>>,
}

impl Report {
    /// Group findings by category, dropping repeated values per category.
    pub fn build(findings: &[PiiFinding]) -> Self {
        let mut groups: BTreeMap<PiiCategory, Vec<String>> = BTreeMap::new();

        for finding in findings {
            let values = groups.entry(finding.category).or_default();
            if !values.contains(&finding.value) {
                values.push(finding.value.clone());
            }
        }

        Self { groups }
    }

    /// Unique values for one category
    pub fn values(&self, category: PiiCategory) -> &[String] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty groups in catalog order
    pub fn groups(&self) -> impl Iterator<Item = (PiiCategory, &[String])> {
        self.groups.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Whether nothing was found
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Count of unique values across all categories
    pub fn total_unique(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Render the report as plain text.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_PII_MESSAGE.to_string();
        }

        let mut lines = vec![REPORT_HEADER.to_string()];
        for (category, values) in self.groups() {
            lines.push(String::new());
            lines.push(format!("{}:", category));
            lines.extend(values.iter().map(|v| format!("- {}", v)));
        }
        lines.join("\n")
    }
}

/// Render findings as a grouped text report.
pub fn format_report(findings: &[PiiFinding]) -> String {
    Report::build(findings).render()
}

/// Count findings per category, duplicates included.
pub fn summarize(findings: &[PiiFinding]) -> BTreeMap<PiiCategory, usize> {
    let mut counts = BTreeMap::new();
    for finding in findings {
        *counts.entry(finding.category).or_insert(0) += 1;
    }
    counts
}

/// One-line summary, e.g. `Found 4 potential PII items: 3 email, 1 phone`.
pub fn summary_message(findings: &[PiiFinding]) -> String {
    if findings.is_empty() {
        return "No PII detected.".to_string();
    }

    let parts: Vec<String> = summarize(findings)
        .into_iter()
        .map(|(category, count)| format!("{} {}", count, category))
        .collect();

    format!(
        "Found {} potential PII items: {}",
        findings.len(),
        parts.join(", ")
    )
}
