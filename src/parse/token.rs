use crate::rules::ExtractionRules;

/// Strips OCR noise characters and common misrecognition artifacts from a
/// single token. Empty input yields empty output.
pub fn clean_token(token: &str, rules: &ExtractionRules) -> String {
    let mut cleaned = token
        .chars()
        .filter(|character| !rules.strip_chars.contains(character))
        .collect::<String>();

    // A recognizer misreading "I" as lowercase "l" immediately before a
    // capitalized word, e.g. "lINPUT" for "INPUT".
    let mut chars = cleaned.chars();
    if let (Some('l'), Some(second)) = (chars.next(), chars.next()) {
        if second.is_uppercase() {
            cleaned.remove(0);
        }
    }

    if cleaned.starts_with('/') && cleaned.len() > 1 {
        cleaned.remove(0);
    }

    cleaned.trim().to_string()
}

/// Accepts a candidate point name. Rejects empty or whitespace-only input,
/// anything containing "SPARE" (case-insensitive), single characters, and
/// strings with no alphabetic character at all.
pub fn is_valid_point_name(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.chars().count() <= 1 {
        return false;
    }

    if trimmed.to_uppercase().contains("SPARE") {
        return false;
    }

    trimmed.chars().any(char::is_alphabetic)
}
