//! Predicate tables used to narrow the stat reference data into prompt
//! candidates. Every rule is a plain function over a key (and optional
//! description) so it can be checked in isolation.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::core_api::StatDefinition;

/// Aggregate keys present in the stat data that are never offered to the
/// operator.
pub const HIDDEN_STAT_KEYS: &[&str] = &["CriticalValue"];

/// Stat keys matching any of these (case-insensitive) are not rollable
/// sub-stats.
pub const SUB_STAT_DENYLIST: &[&str] = &[
    "DMG Boost",
    "Boost",
    "Max",
    "Healing",
    "Base",
    "Energy",
    "Value",
    "Accuracy",
];

pub const DAMAGE_TOKENS: &[&str] = &["damage", "dmg"];

// The stat data calls lightning "thunder".
pub const ELEMENT_TOKENS: &[&str] = &[
    "fire",
    "ice",
    "wind",
    "quantum",
    "imaginary",
    "lightning",
    "thunder",
    "physical",
];

pub const RESISTANCE_TOKENS: &[&str] = &["resist"];

/// Abbreviation used in display text ("Fire RES"); matched as a whole word
/// only so that words like "rest" are not caught.
pub const RESISTANCE_WORDS: &[&str] = &["res"];

static SUB_STAT_DENYLIST_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = SUB_STAT_DENYLIST
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("denylist tokens are escaped literals")
});

pub fn is_hidden_stat(key: &str) -> bool {
    HIDDEN_STAT_KEYS.contains(&key)
}

pub fn is_denylisted_sub_stat(key: &str) -> bool {
    SUB_STAT_DENYLIST_RE.is_match(key)
}

pub fn mentions_damage(text: &str) -> bool {
    contains_any(text, DAMAGE_TOKENS)
}

pub fn names_element(key: &str) -> bool {
    contains_any(key, ELEMENT_TOKENS)
}

pub fn mentions_resistance(text: &str) -> bool {
    if contains_any(text, RESISTANCE_TOKENS) {
        return true;
    }
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| RESISTANCE_WORDS.iter().any(|w| word.eq_ignore_ascii_case(w)))
}

/// ORB candidate rule: damage or element inclusion, then resistance
/// exclusion. Exclusion wins.
pub fn is_elemental_stat(key: &str, definition: &StatDefinition) -> bool {
    let description = definition.description.as_deref().unwrap_or("");

    let included = mentions_damage(key) || mentions_damage(description) || names_element(key);
    if !included {
        return false;
    }
    !(mentions_resistance(key) || mentions_resistance(description))
}

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    let lowered = text.to_ascii_lowercase();
    tokens.iter().any(|token| lowered.contains(token))
}
