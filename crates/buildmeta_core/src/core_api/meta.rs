use serde_json::{Map as JsonMap, Value as JsonValue};

use super::config::StatValueSeed;
use super::session::SessionAnswers;
use super::types::{Character, MetaEntry};

const BLANK_STAT_KEYS: &[&str] = &[
    "BaseSpeed",
    "CriticalChance",
    "CriticalDamage",
    "SPRatio",
    "StatusProbabilityBase",
    "BreakDamageAddedRatioBase",
];

pub fn blank_stat_template() -> JsonValue {
    let mut out = JsonMap::new();
    for key in BLANK_STAT_KEYS {
        out.insert((*key).to_string(), JsonValue::String(String::new()));
    }
    JsonValue::Object(out)
}

/// Pre-filled contents of the stat-value editor.
pub fn stat_value_seed(seed: StatValueSeed, character: &Character) -> JsonValue {
    match seed {
        StatValueSeed::Blank => blank_stat_template(),
        StatValueSeed::CharacterBaseStats if character.base_stats.is_empty() => {
            blank_stat_template()
        }
        StatValueSeed::CharacterBaseStats => {
            let mut out = JsonMap::new();
            for base in &character.base_stats {
                out.insert(base.stat.clone(), base.value.clone());
            }
            JsonValue::Object(out)
        }
    }
}

impl MetaEntry {
    /// Builds the record for the character chosen in the session. The
    /// version tag is always left blank; it is filled in by release tooling.
    pub fn assemble(answers: &SessionAnswers, character: &Character) -> Self {
        let mut sets = answers.relic_combos.clone();
        sets.push(answers.ornaments.clone());

        Self {
            name: character.name.clone(),
            weapons: answers.weapons.clone(),
            sub_stats: answers.sub_stats.clone(),
            stats: answers.stat_values.clone(),
            version: String::new(),
            sets,
            main_stats: answers.main_stats.clone(),
            eidolon: answers.eidolon,
            talents_index: answers.talents_index,
            synergies: answers.synergies.clone(),
        }
    }
}
