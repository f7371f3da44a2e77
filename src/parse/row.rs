use crate::rules::ExtractionRules;

use super::token::clean_token;

/// Collects the leading name portion of one table-row section. Point names
/// are short, left-anchored phrases; the stop-marker table marks where
/// state and control metadata begins. Returns an empty string when the
/// section holds no usable name; never errors.
pub fn point_name_from_section(section: &str, rules: &ExtractionRules) -> String {
    let mut name_tokens: Vec<String> = Vec::new();

    for raw_token in section.split_whitespace() {
        if rules
            .stop_markers
            .iter()
            .any(|marker| marker.matches(raw_token))
        {
            break;
        }

        let cleaned = clean_token(raw_token, rules);
        if cleaned.is_empty() {
            continue;
        }

        // A short trailing number is a name suffix such as a point index;
        // a longer one is an unrelated field such as a setpoint value.
        // Either way it ends the name. A leading number is part of the
        // name (e.g. breaker designations like "52").
        if !name_tokens.is_empty() && cleaned.chars().all(|character| character.is_ascii_digit()) {
            if cleaned.len() <= rules.max_suffix_digits {
                name_tokens.push(cleaned);
            }
            break;
        }

        name_tokens.push(cleaned);

        if name_tokens.len() >= rules.max_name_tokens {
            break;
        }
    }

    name_tokens
        .join(" ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
