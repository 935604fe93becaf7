//! Guess equality policy.
//!
//! A submitted value matches the round target iff their normal forms are
//! byte-equal. The normal form is: Unicode NFC, surrounding whitespace
//! trimmed, then Unicode lowercasing. The policy is deterministic and
//! locale-independent; emoji with combining modifiers compare equal across
//! composed and decomposed submissions.

use unicode_normalization::UnicodeNormalization;

use crate::domain::session::Target;

/// Canonical form used for guess comparison.
pub fn normalize_guess(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    composed.trim().to_lowercase()
}

/// Whether a submitted value matches the target under the policy.
pub fn guess_matches(value: &str, target: &Target) -> bool {
    normalize_guess(value) == normalize_guess(target.as_str())
}
