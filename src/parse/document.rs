use anyhow::{Context, Result};
use regex::Regex;

use crate::rules::ExtractionRules;

use super::row::point_name_from_section;
use super::token::is_valid_point_name;

/// Counters gathered while scanning one document. `header_seen` records
/// that a "POINT NAME" header line was present; row matching is not
/// conditioned on it.
#[derive(Debug, Clone, Default)]
pub struct DocumentScan {
    pub point_names: Vec<String>,
    pub header_seen: bool,
    pub lines_seen: usize,
    pub rows_matched: usize,
    pub candidates_rejected: usize,
}

/// Line classifier driving the row extractor and validator over every data
/// row of a document's extracted text.
pub struct PointNameParser {
    rules: ExtractionRules,
    row_pattern: Regex,
}

impl PointNameParser {
    pub fn new() -> Result<Self> {
        Self::with_rules(ExtractionRules::default())
    }

    pub fn with_rules(rules: ExtractionRules) -> Result<Self> {
        // A data row: numeric identifier, a separator run of pipes,
        // brackets, or whitespace, then the row remainder.
        let row_pattern = Regex::new(r"^(\d+)\s*[|\[\s]+(.+)")
            .context("failed to compile data-row pattern")?;

        Ok(Self { rules, row_pattern })
    }

    /// Returns the ordered, validated point names of one document.
    /// Duplicates are preserved; garbled input degrades to a partial or
    /// empty result, never an error.
    pub fn extract_all(&self, text: &str) -> Vec<String> {
        self.scan(text).point_names
    }

    pub fn scan(&self, text: &str) -> DocumentScan {
        let mut scan = DocumentScan::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            scan.lines_seen += 1;

            if line.to_uppercase().contains(self.rules.header_marker.as_str()) {
                scan.header_seen = true;
                continue;
            }

            if self
                .rules
                .skip_line_substrings
                .iter()
                .any(|skip| line.contains(skip.as_str()))
            {
                continue;
            }

            let Some(captures) = self.row_pattern.captures(line) else {
                continue;
            };
            let Some(remainder) = captures.get(2) else {
                continue;
            };
            scan.rows_matched += 1;

            let first_section = remainder
                .as_str()
                .trim()
                .split('|')
                .next()
                .unwrap_or_default()
                .trim();

            let candidate = point_name_from_section(first_section, &self.rules);
            if is_valid_point_name(&candidate) {
                scan.point_names.push(candidate);
            } else {
                scan.candidates_rejected += 1;
            }
        }

        scan
    }
}
