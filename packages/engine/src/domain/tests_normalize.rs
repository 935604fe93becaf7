use crate::domain::normalize::{guess_matches, normalize_guess};
use crate::domain::session::Target;

#[test]
fn trims_surrounding_whitespace() {
    assert_eq!(normalize_guess("  🐶  "), "🐶");
    assert_eq!(normalize_guess("\tdog\n"), "dog");
}

#[test]
fn lowercases_beyond_ascii() {
    assert_eq!(normalize_guess("DOG"), "dog");
    assert_eq!(normalize_guess("Straße"), "straße");
    assert_eq!(normalize_guess("ÅNGSTRÖM"), "ångström");
}

#[test]
fn composes_to_nfc() {
    // "é" as a combining pair vs. precomposed.
    let decomposed = "e\u{0301}";
    let precomposed = "\u{00e9}";
    assert_eq!(normalize_guess(decomposed), normalize_guess(precomposed));
}

#[test]
fn matches_are_normalization_insensitive() {
    let target = Target::new("🐶");
    assert!(guess_matches("🐶", &target));
    assert!(guess_matches(" 🐶 ", &target));
    assert!(!guess_matches("🐱", &target));
    assert!(!guess_matches("", &target));
}

#[test]
fn skin_tone_variants_stay_distinct() {
    // Modifier sequences are different values, not case/width variants.
    let target = Target::new("👍");
    assert!(!guess_matches("👍🏽", &target));
}

#[test]
fn empty_and_whitespace_normalize_to_empty() {
    assert_eq!(normalize_guess(""), "");
    assert_eq!(normalize_guess("   "), "");
}
