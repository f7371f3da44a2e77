use super::*;
use crate::rules::{ExtractionRules, StopMarker};

fn rules() -> ExtractionRules {
    ExtractionRules::default()
}

#[test]
fn clean_token_strips_noise_characters() {
    assert_eq!(clean_token("|Pump_1]", &rules()), "Pump1");
    assert_eq!(clean_token("{(Status)}", &rules()), "Status");
    assert_eq!(clean_token("", &rules()), "");
}

#[test]
fn clean_token_drops_leading_l_before_capitalized_word() {
    assert_eq!(clean_token("lINPUT", &rules()), "INPUT");
    assert_eq!(clean_token("lBreaker", &rules()), "Breaker");
    // Second character not uppercase: leave the token alone.
    assert_eq!(clean_token("lower", &rules()), "lower");
    assert_eq!(clean_token("l5", &rules()), "l5");
    assert_eq!(clean_token("l", &rules()), "l");
}

#[test]
fn clean_token_drops_leading_slash_on_longer_tokens() {
    assert_eq!(clean_token("/Run", &rules()), "Run");
    assert_eq!(clean_token("/", &rules()), "/");
}

#[test]
fn clean_token_is_idempotent() {
    for raw in ["|Pump_1]", "lINPUT", "/Run", "{52}", "Feeder"] {
        let once = clean_token(raw, &rules());
        assert_eq!(clean_token(&once, &rules()), once);
    }
}

#[test]
fn validator_rejects_spare_and_artifacts() {
    assert!(!is_valid_point_name("Spare"));
    assert!(!is_valid_point_name("SPARE 12"));
    assert!(!is_valid_point_name(""));
    assert!(!is_valid_point_name("   "));
    assert!(!is_valid_point_name("1"));
    assert!(!is_valid_point_name("12"));
    assert!(!is_valid_point_name("A"));
    assert!(is_valid_point_name("Pump 1"));
    assert!(is_valid_point_name("52 Breaker Status"));
}

#[test]
fn section_extraction_stops_at_state_keywords() {
    assert_eq!(
        point_name_from_section("52 Breaker Status Open 125", &rules()),
        "52 Breaker Status"
    );
    assert_eq!(
        point_name_from_section("Bus Volts Normal", &rules()),
        "Bus Volts"
    );
}

#[test]
fn section_extraction_keeps_short_numeric_suffix_and_stops() {
    assert_eq!(point_name_from_section("Feeder 7 Amps 001", &rules()), "Feeder 7");
}

#[test]
fn section_extraction_drops_long_trailing_number() {
    assert_eq!(
        point_name_from_section("Feeder Amps 12345 Trailing", &rules()),
        "Feeder Amps"
    );
}

#[test]
fn section_extraction_allows_leading_number() {
    // A number with an empty accumulator is part of the name, e.g. device
    // designations like "52".
    assert_eq!(point_name_from_section("52 Close", &rules()), "52");
    assert_eq!(
        point_name_from_section("86 Lockout Relay Target", &rules()),
        "86 Lockout Relay Target"
    );
}

#[test]
fn section_extraction_matches_bracketed_markers_verbatim() {
    assert_eq!(point_name_from_section("Pump [or Motor", &rules()), "Pump");
    assert_eq!(point_name_from_section("Xfmr Temp [dI 4", &rules()), "Xfmr Temp");
}

#[test]
fn section_extraction_skips_tokens_that_clean_to_empty() {
    assert_eq!(point_name_from_section("Pump [] Run", &rules()), "Pump Run");
}

#[test]
fn section_extraction_caps_token_count() {
    let section = "Main Bus Volt Phase Abc Def Ghi Jkl Mno Pqr Stu Vwx";
    assert_eq!(
        point_name_from_section(section, &rules()),
        "Main Bus Volt Phase Abc Def Ghi Jkl Mno Pqr"
    );
    assert_eq!(point_name_from_section("", &rules()), "");
}

#[test]
fn scan_collects_rows_and_filters_invalid_candidates() {
    let parser = PointNameParser::new().expect("parser builds");
    let text = "NO. | POINT NAME | STATE\n\
                1 | Pump Run Status | CLOSE\n\
                2 | Spare\n\
                3 | Feeder Volts | NORMAL\n";

    let scan = parser.scan(text);
    assert!(scan.header_seen);
    assert_eq!(scan.rows_matched, 3);
    assert_eq!(scan.candidates_rejected, 1);
    assert_eq!(scan.point_names, vec!["Pump Run Status", "Feeder Volts"]);
}

#[test]
fn scan_treats_short_numeric_token_as_name_suffix() {
    let parser = PointNameParser::new().expect("parser builds");
    let names = parser.extract_all("1 | Pump 1 Run Status | CLOSE\n");
    assert_eq!(names, vec!["Pump 1"]);
}

#[test]
fn scan_skips_metadata_lines() {
    let parser = PointNameParser::new().expect("parser builds");
    let text = "PLOT BY: operator\n\
                1 NOTE see sheet 2\n\
                substation_sh1.dwg\n\
                4 | Bus Tie Position\n";

    assert_eq!(parser.extract_all(text), vec!["Bus Tie Position"]);
}

#[test]
fn scan_matches_rows_without_pipes_and_with_bracket_separators() {
    let parser = PointNameParser::new().expect("parser builds");
    let text = "12 Feeder Amps 480\n3[Breaker 52 Trip\n";

    assert_eq!(parser.extract_all(text), vec!["Feeder Amps", "Breaker 52"]);
}

#[test]
fn scan_matches_rows_before_any_header_line() {
    // Header state is tracked for reporting only; it does not gate matching.
    let parser = PointNameParser::new().expect("parser builds");
    let text = "1 | Bus Volts\nNO. | POINT NAME\n2 | Feeder Amps\n";

    let scan = parser.scan(text);
    assert!(scan.header_seen);
    assert_eq!(scan.point_names, vec!["Bus Volts", "Feeder Amps"]);
}

#[test]
fn scan_preserves_duplicates_and_source_order() {
    let parser = PointNameParser::new().expect("parser builds");
    let text = "1 | Pump Run\n2 | Pump Run\n";

    assert_eq!(parser.extract_all(text), vec!["Pump Run", "Pump Run"]);
}

#[test]
fn scan_is_pure_across_invocations() {
    let parser = PointNameParser::new().expect("parser builds");
    let text = "1 | Pump Run Status\n2 | Feeder Volts\n";

    assert_eq!(parser.extract_all(text), parser.extract_all(text));
}

#[test]
fn scan_of_empty_or_garbled_text_yields_empty_sequence() {
    let parser = PointNameParser::new().expect("parser builds");

    assert!(parser.extract_all("").is_empty());
    assert!(parser.extract_all("\n\n   \n").is_empty());
    assert!(parser.extract_all("no table content here\n}} | ((\n").is_empty());
}

#[test]
fn custom_rules_swap_the_vocabulary() {
    let mut custom = ExtractionRules::default();
    custom.stop_markers = vec![StopMarker::uppercase("TRIP")];
    custom.max_name_tokens = 2;

    let parser = PointNameParser::with_rules(custom).expect("parser builds");
    let names = parser.extract_all("1 | Feeder Breaker Close Trip\n");
    assert_eq!(names, vec!["Feeder Breaker"]);
}
