use serde_json::Value as JsonValue;

use crate::options::{Eidolon, Slot, TALENT_PRIORITIES};

use super::choices::{
    character_choices, main_stat_choices, ornament_choices, relic_choices, sub_stat_choices,
    weapon_choices,
};
use super::config::{InvalidJsonPolicy, RelicSelection, SessionConfig};
use super::error::{MetaError, MetaErrorCode};
use super::meta::stat_value_seed;
use super::reference::ReferenceData;
use super::types::{Character, Choice, MainStats};

const MAX_WEAPONS: usize = 3;
const MAX_SUB_STATS: usize = 4;
const MAX_SETS_PER_COMBO: usize = 2;
const MAX_ORNAMENTS: usize = 2;

/// The terminal side of a session. Implementations return indexes into the
/// `choices` slice they were given.
pub trait Prompter {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize, MetaError>;

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[Choice],
    ) -> Result<Vec<usize>, MetaError>;

    /// Free text entry pre-filled with `default`.
    fn edit_text(&mut self, message: &str, default: &str) -> Result<String, MetaError>;

    /// Validation feedback shown before a prompt is asked again.
    fn warn(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Character,
    Weapons,
    SubStats,
    RelicCombo(usize),
    Relics,
    Ornaments,
    Eidolon,
    TalentPriority,
    MainStats(Slot),
    StatValues,
    Synergies,
}

impl SessionStep {
    /// Maximum number of selections, for multi-select steps that have one.
    pub fn limit(&self) -> Option<usize> {
        match *self {
            Self::Weapons => Some(MAX_WEAPONS),
            Self::SubStats => Some(MAX_SUB_STATS),
            Self::RelicCombo(_) => Some(MAX_SETS_PER_COMBO),
            Self::Ornaments => Some(MAX_ORNAMENTS),
            _ => None,
        }
    }

    fn limit_warning(&self, max: usize) -> String {
        match *self {
            Self::Weapons => format!("Please select up to {max} weapons only"),
            Self::SubStats => format!("Please select up to {max} stats"),
            Self::RelicCombo(_) => format!("Please select at most {max} relic sets"),
            Self::Ornaments => format!("Please select at most {max} ornament sets"),
            _ => format!("Please select at most {max} entries"),
        }
    }
}

/// Everything the operator decided in one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAnswers {
    pub character_id: String,
    pub weapons: Vec<String>,
    pub sub_stats: Vec<String>,
    pub relic_combos: Vec<Vec<String>>,
    pub ornaments: Vec<String>,
    pub eidolon: Eidolon,
    pub talents_index: usize,
    pub main_stats: MainStats,
    pub stat_values: JsonValue,
    pub synergies: Vec<String>,
}

pub struct Session<'a> {
    data: &'a ReferenceData,
    config: SessionConfig,
}

impl<'a> Session<'a> {
    pub fn new(data: &'a ReferenceData, config: SessionConfig) -> Self {
        Self { data, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Asks every question in order. Any error ends the session; the caller
    /// must not persist anything in that case.
    pub fn run<P: Prompter>(&self, prompter: &mut P) -> Result<SessionAnswers, MetaError> {
        let characters = character_choices(self.data);
        if characters.is_empty() {
            return Err(MetaError::new(
                MetaErrorCode::Parse,
                "character table has no entries",
            ));
        }

        log_step(SessionStep::Character, characters.len());
        let index = prompter.select("Choose a character:", &characters)?;
        let character_id = resolve_one(&characters, index)?;
        let character = self.character(&character_id)?;

        let weapons = weapon_choices(self.data, character)?;
        let weapons = self.ask_many(
            prompter,
            SessionStep::Weapons,
            &format!(
                "Select up to {MAX_WEAPONS} weapons matching type \"{}\":",
                character.weapon_type
            ),
            &weapons,
        )?;

        let sub_stats = self.ask_many(
            prompter,
            SessionStep::SubStats,
            &format!("Select up to {MAX_SUB_STATS} sub-stats:"),
            &sub_stat_choices(self.data, self.config.sub_stat_filter),
        )?;

        let relics = relic_choices(self.data);
        let relic_combos = match self.config.relic_selection {
            RelicSelection::SplitCombo => {
                let mut combos = Vec::with_capacity(2);
                for combo in 1..=2 {
                    combos.push(self.ask_many(
                        prompter,
                        SessionStep::RelicCombo(combo),
                        &format!(
                            "Select up to {MAX_SETS_PER_COMBO} relic sets (non-ornament) for combo {combo}:"
                        ),
                        &relics,
                    )?);
                }
                combos
            }
            RelicSelection::Unified => vec![self.ask_many(
                prompter,
                SessionStep::Relics,
                "Select relic sets (non-ornament):",
                &relics,
            )?],
        };

        let ornaments = self.ask_many(
            prompter,
            SessionStep::Ornaments,
            &format!("Select up to {MAX_ORNAMENTS} ornament sets:"),
            &ornament_choices(self.data),
        )?;

        let eidolons: Vec<Choice> = Eidolon::ALL
            .iter()
            .map(|e| Choice::new(e.as_str(), e.as_str()))
            .collect();
        log_step(SessionStep::Eidolon, eidolons.len());
        let index = prompter.select("Select Eidolon level:", &eidolons)?;
        let eidolon = Eidolon::from_level(index).ok_or_else(|| out_of_range(index, &eidolons))?;

        let talents: Vec<Choice> = TALENT_PRIORITIES
            .iter()
            .enumerate()
            .map(|(index, label)| Choice::new(*label, index.to_string()))
            .collect();
        log_step(SessionStep::TalentPriority, talents.len());
        let talents_index = prompter.select(
            "Please select the recommended Main Trace Upgrade Priority for this character.",
            &talents,
        )?;
        if talents_index >= talents.len() {
            return Err(out_of_range(talents_index, &talents));
        }

        let mut main_stats = MainStats::default();
        for slot in Slot::ALL {
            let message = match slot {
                Slot::Orb => {
                    format!("Select possible main stats for {slot} slot (elemental stats only):")
                }
                _ => format!("Select possible main stats for {slot} slot:"),
            };
            let picked = self.ask_many(
                prompter,
                SessionStep::MainStats(slot),
                &message,
                &main_stat_choices(self.data, slot),
            )?;
            main_stats.set_slot(slot, picked);
        }

        let stat_values = self.ask_stat_values(prompter, character)?;

        let synergies = self.ask_many(
            prompter,
            SessionStep::Synergies,
            "Select synergy characters (multiple allowed):",
            &characters,
        )?;

        tracing::info!(character = %character_id, "session complete");
        Ok(SessionAnswers {
            character_id,
            weapons,
            sub_stats,
            relic_combos,
            ornaments,
            eidolon,
            talents_index,
            main_stats,
            stat_values,
            synergies,
        })
    }

    fn character(&self, id: &str) -> Result<&'a Character, MetaError> {
        self.data.character(id).ok_or_else(|| {
            MetaError::new(
                MetaErrorCode::InvalidSelection,
                format!("unknown character id {id}"),
            )
        })
    }

    /// Multi-select that re-asks the same prompt until the answer fits the
    /// step's limit.
    fn ask_many<P: Prompter>(
        &self,
        prompter: &mut P,
        step: SessionStep,
        message: &str,
        choices: &[Choice],
    ) -> Result<Vec<String>, MetaError> {
        log_step(step, choices.len());
        loop {
            let picked = resolve_many(choices, &prompter.multi_select(message, choices)?)?;
            if let Some(max) = step.limit()
                && picked.len() > max
            {
                tracing::debug!(?step, picked = picked.len(), max, "selection over limit");
                prompter.warn(&step.limit_warning(max));
                continue;
            }
            return Ok(picked);
        }
    }

    fn ask_stat_values<P: Prompter>(
        &self,
        prompter: &mut P,
        character: &Character,
    ) -> Result<JsonValue, MetaError> {
        let seed = stat_value_seed(self.config.stat_value_seed, character);
        let default = serde_json::to_string_pretty(&seed).map_err(|e| {
            MetaError::new(
                MetaErrorCode::Parse,
                format!("failed to render stat template: {e}"),
            )
        })?;

        log_step(SessionStep::StatValues, 0);
        loop {
            let text = prompter.edit_text(
                "Enter stats JSON (leave empty for default structure):",
                &default,
            )?;
            match parse_stat_values(&text, &seed) {
                Ok(values) => return Ok(values),
                Err(e) if self.config.invalid_json == InvalidJsonPolicy::Retry => {
                    tracing::debug!(error = %e, "stat values rejected, asking again");
                    prompter.warn(&e.message);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Blank input keeps the seed; anything else must be well-formed JSON.
fn parse_stat_values(text: &str, seed: &JsonValue) -> Result<JsonValue, MetaError> {
    if text.trim().is_empty() {
        return Ok(seed.clone());
    }
    serde_json::from_str(text).map_err(|e| {
        MetaError::new(
            MetaErrorCode::InvalidStatValues,
            format!("Invalid JSON detected. Please check your input. ({e})"),
        )
    })
}

fn resolve_one(choices: &[Choice], index: usize) -> Result<String, MetaError> {
    choices
        .get(index)
        .map(|choice| choice.value.clone())
        .ok_or_else(|| out_of_range(index, choices))
}

// Duplicate indexes collapse to one selection, keeping first-seen order.
fn resolve_many(choices: &[Choice], indexes: &[usize]) -> Result<Vec<String>, MetaError> {
    let mut seen = Vec::with_capacity(indexes.len());
    for &index in indexes {
        if index >= choices.len() {
            return Err(out_of_range(index, choices));
        }
        if !seen.contains(&index) {
            seen.push(index);
        }
    }
    Ok(seen
        .into_iter()
        .map(|index| choices[index].value.clone())
        .collect())
}

fn out_of_range(index: usize, choices: &[Choice]) -> MetaError {
    MetaError::new(
        MetaErrorCode::InvalidSelection,
        format!(
            "selection {index} is out of range ({} choices)",
            choices.len()
        ),
    )
}

fn log_step(step: SessionStep, candidates: usize) {
    tracing::debug!(?step, candidates, "prompting");
}
