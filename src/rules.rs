/// How a stop marker is compared against a raw row token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMatch {
    /// Substring match against the uppercased token.
    Uppercase,
    /// Substring match against the token exactly as written. Used for the
    /// bracketed OCR control markers, which only occur in this casing.
    Verbatim,
}

/// One entry of the ordered stop-marker table. A matching marker ends the
/// name portion of a row; the matching token is not consumed.
#[derive(Debug, Clone)]
pub struct StopMarker {
    pub needle: String,
    pub mode: MarkerMatch,
}

impl StopMarker {
    pub fn uppercase(needle: &str) -> Self {
        Self {
            needle: needle.to_string(),
            mode: MarkerMatch::Uppercase,
        }
    }

    pub fn verbatim(needle: &str) -> Self {
        Self {
            needle: needle.to_string(),
            mode: MarkerMatch::Verbatim,
        }
    }

    pub fn matches(&self, raw_token: &str) -> bool {
        match self.mode {
            MarkerMatch::Uppercase => raw_token.to_uppercase().contains(self.needle.as_str()),
            MarkerMatch::Verbatim => raw_token.contains(self.needle.as_str()),
        }
    }
}

/// Vocabulary and limits driving the extraction core. The defaults are
/// tuned for DNP point-list drawings; a different document family can
/// supply its own table without touching the parser.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Ordered stop-marker table, evaluated per raw token.
    pub stop_markers: Vec<StopMarker>,
    /// Lines containing any of these (case-sensitive) are metadata, not rows.
    pub skip_line_substrings: Vec<String>,
    /// Substring of the uppercased line that marks a table header.
    pub header_marker: String,
    /// Characters deleted from every token before further cleaning.
    pub strip_chars: Vec<char>,
    /// Hard cap on collected name tokens per row.
    pub max_name_tokens: usize,
    /// Longest digits-only token still treated as a name suffix.
    pub max_suffix_digits: usize,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        let stop_markers = vec![
            StopMarker::uppercase("CLOSE"),
            StopMarker::uppercase("OPEN"),
            StopMarker::uppercase("NORMAL"),
            StopMarker::uppercase("ALARM"),
            StopMarker::uppercase("AUTO"),
            StopMarker::uppercase("SOLID"),
            StopMarker::uppercase("MANUAL"),
            StopMarker::uppercase("RK"),
            StopMarker::uppercase("DI"),
            StopMarker::verbatim("[or"),
            StopMarker::verbatim("[ot"),
            StopMarker::verbatim("[pI"),
            StopMarker::verbatim("[oI"),
            StopMarker::verbatim("[dI"),
        ];

        let skip_line_substrings = ["PLOT BY:", ".dwg", "DIAG", "NOTE", "COEFFICIENT", "OFFSET"]
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            stop_markers,
            skip_line_substrings,
            header_marker: "POINT NAME".to_string(),
            strip_chars: vec!['|', '[', ']', '(', ')', '{', '}', '_'],
            max_name_tokens: 10,
            max_suffix_digits: 2,
        }
    }
}
