use std::collections::VecDeque;
use std::path::PathBuf;

use buildmeta_core::core_api::{
    Choice, InvalidJsonPolicy, MetaError, MetaErrorCode, Prompter, ReferenceData, ReferencePaths,
    RelicSelection, Session, SessionConfig, StatValueSeed,
};
use buildmeta_core::options::{Eidolon, Slot};
use serde_json::json;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_data() -> ReferenceData {
    let paths = ReferencePaths::in_dir(&workspace_root().join("tests/fixtures"));
    ReferenceData::load(&paths).expect("fixtures should load")
}

#[derive(Debug)]
enum Answer {
    One(usize),
    Many(Vec<usize>),
    Text(&'static str),
}

/// Replays canned answers. Running out of answers behaves like the operator
/// pressing Ctrl-C.
#[derive(Default)]
struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    messages: Vec<String>,
    warnings: Vec<String>,
    defaults: Vec<String>,
    offered: Vec<Vec<Choice>>,
}

impl ScriptedPrompter {
    fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    fn next(&mut self, message: &str) -> Result<Answer, MetaError> {
        self.messages.push(message.to_string());
        self.answers.pop_front().ok_or_else(MetaError::cancelled)
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize, MetaError> {
        self.offered.push(choices.to_vec());
        match self.next(message)? {
            Answer::One(index) => Ok(index),
            other => panic!("expected single answer for {message:?}, got {other:?}"),
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[Choice],
    ) -> Result<Vec<usize>, MetaError> {
        self.offered.push(choices.to_vec());
        match self.next(message)? {
            Answer::Many(indexes) => Ok(indexes),
            other => panic!("expected multi answer for {message:?}, got {other:?}"),
        }
    }

    fn edit_text(&mut self, message: &str, default: &str) -> Result<String, MetaError> {
        self.defaults.push(default.to_string());
        match self.next(message)? {
            Answer::Text(text) => Ok(text.to_string()),
            other => panic!("expected text answer for {message:?}, got {other:?}"),
        }
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

fn happy_path(stat_text: &'static str) -> Vec<Answer> {
    vec![
        Answer::One(0),               // March 7th
        Answer::Many(vec![0, 1]),     // weapons
        Answer::Many(vec![0, 3, 4]),  // sub-stats
        Answer::Many(vec![1]),        // combo 1
        Answer::Many(vec![0, 2]),     // combo 2
        Answer::Many(vec![0]),        // ornaments
        Answer::One(2),               // E2
        Answer::One(24),              // sentinel talent order
        Answer::Many(vec![1]),        // BODY
        Answer::Many(vec![3]),        // FOOT
        Answer::Many(vec![0, 1]),     // ORB
        Answer::Many(vec![3]),        // ROPE
        Answer::Text(stat_text),
        Answer::Many(vec![1, 2]),     // synergies
    ]
}

#[test]
fn full_session_collects_every_answer() {
    let data = fixture_data();
    let mut prompter = ScriptedPrompter::new(happy_path(r#"{"BaseSpeed": 120}"#));

    let answers = Session::new(&data, SessionConfig::default())
        .run(&mut prompter)
        .expect("session should complete");

    assert_eq!(answers.character_id, "1001");
    assert_eq!(answers.weapons, vec!["23003", "21001"]);
    assert_eq!(
        answers.sub_stats,
        vec!["HPDelta", "CriticalChance", "SPRatio"]
    );
    assert_eq!(
        answers.relic_combos,
        vec![vec!["102".to_string()], vec!["101".to_string(), "103".to_string()]]
    );
    assert_eq!(answers.ornaments, vec!["301"]);
    assert_eq!(answers.eidolon, Eidolon::E2);
    assert_eq!(answers.talents_index, 24);
    assert_eq!(answers.main_stats.slot(Slot::Body), ["Crit DMG / Rate"]);
    assert_eq!(answers.main_stats.slot(Slot::Foot), ["SPD"]);
    assert_eq!(
        answers.main_stats.slot(Slot::Orb),
        ["FireAddedRatio", "IceAddedRatio"]
    );
    assert_eq!(answers.main_stats.slot(Slot::Rope), ["Energy"]);
    assert_eq!(answers.stat_values, json!({"BaseSpeed": 120}));
    assert_eq!(answers.synergies, vec!["1002", "1003"]);
    assert!(prompter.warnings.is_empty());
    assert!(prompter.answers.is_empty());
}

#[test]
fn weapon_prompt_excludes_other_types() {
    let data = fixture_data();
    let mut prompter = ScriptedPrompter::new(happy_path("{}"));

    Session::new(&data, SessionConfig::default())
        .run(&mut prompter)
        .expect("session should complete");

    let weapon_ids: Vec<&str> = prompter.offered[1]
        .iter()
        .map(|c| c.value.as_str())
        .collect();
    assert_eq!(weapon_ids, vec!["23003", "21001"]);
    assert!(prompter.messages[1].contains("type \"A\""));
}

#[test]
fn no_matching_weapons_aborts_after_character_prompt() {
    let data = fixture_data();
    let mut prompter = ScriptedPrompter::new(vec![Answer::One(2)]);

    let err = Session::new(&data, SessionConfig::default())
        .run(&mut prompter)
        .expect_err("Himeko has no weapons");

    assert_eq!(err.code, MetaErrorCode::NoMatchingWeapons);
    assert_eq!(prompter.messages.len(), 1);
}

#[test]
fn too_many_weapons_is_asked_again() {
    let data = ReferenceData::from_json_strs(
        r#"{"1": {"name": "X", "avatarType": "Bow"}}"#,
        r#"{
            "w1": {"name": "One", "weaponType": "Bow", "rarity": 5},
            "w2": {"name": "Two", "weaponType": "Bow", "rarity": 4},
            "w3": {"name": "Three", "weaponType": "Bow", "rarity": 4},
            "w4": {"name": "Four", "weaponType": "Bow", "rarity": 3}
        }"#,
        "{}",
        "{}",
    )
    .expect("valid tables");
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::One(0),
        Answer::Many(vec![0, 1, 2, 3]),
        Answer::Many(vec![0, 1, 2]),
    ]);

    let err = Session::new(&data, SessionConfig::default())
        .run(&mut prompter)
        .expect_err("script stops after weapons");

    assert_eq!(err.code, MetaErrorCode::Cancelled);
    assert_eq!(prompter.warnings, vec!["Please select up to 3 weapons only"]);
    assert_eq!(prompter.messages[1], prompter.messages[2]);
    // The accepted weapon answer moved the session on to sub-stats.
    assert!(prompter.messages[3].contains("sub-stats"));
}

#[test]
fn bounded_prompts_reject_over_limit_and_accept_limit() {
    let data = fixture_data();
    let mut answers = happy_path("{}");
    // sub-stats: 5 rejected, then exactly 4
    answers.splice(
        2..3,
        [Answer::Many(vec![0, 1, 2, 3, 4]), Answer::Many(vec![0, 1, 2, 3])],
    );
    // combo 1: 3 rejected, then 2
    answers.splice(4..5, [Answer::Many(vec![0, 1, 2]), Answer::Many(vec![0, 1])]);
    // ornaments: a repeated index counts once
    answers.splice(7..8, [Answer::Many(vec![0, 1, 1])]);

    let mut prompter = ScriptedPrompter::new(answers);
    let result = Session::new(&data, SessionConfig::default())
        .run(&mut prompter)
        .expect("session should complete");

    assert_eq!(
        prompter.warnings,
        vec![
            "Please select up to 4 stats",
            "Please select at most 2 relic sets"
        ]
    );
    assert_eq!(result.sub_stats.len(), 4);
    assert_eq!(result.relic_combos[0], vec!["101", "102"]);
    assert_eq!(result.ornaments, vec!["301", "302"]);
}

#[test]
fn unified_relic_mode_asks_once_without_limit() {
    let data = fixture_data();
    let mut answers = happy_path("{}");
    answers.splice(3..5, [Answer::Many(vec![0, 1, 2])]);

    let config = SessionConfig {
        relic_selection: RelicSelection::Unified,
        ..SessionConfig::default()
    };
    let mut prompter = ScriptedPrompter::new(answers);
    let result = Session::new(&data, config)
        .run(&mut prompter)
        .expect("session should complete");

    assert_eq!(result.relic_combos, vec![vec!["101", "102", "103"]]);
    assert!(prompter.warnings.is_empty());
}

#[test]
fn malformed_stat_values_abort_by_default() {
    let data = fixture_data();
    let mut prompter = ScriptedPrompter::new(happy_path("{not json"));

    let err = Session::new(&data, SessionConfig::default())
        .run(&mut prompter)
        .expect_err("malformed JSON is fatal");

    assert_eq!(err.code, MetaErrorCode::InvalidStatValues);
    // synergies were never asked
    assert_eq!(prompter.answers.len(), 1);
}

#[test]
fn malformed_stat_values_can_be_retried() {
    let data = fixture_data();
    let mut answers = happy_path("{not json");
    answers.insert(13, Answer::Text(r#"{"CriticalChance": 0.5}"#));

    let config = SessionConfig {
        invalid_json: InvalidJsonPolicy::Retry,
        ..SessionConfig::default()
    };
    let mut prompter = ScriptedPrompter::new(answers);
    let result = Session::new(&data, config)
        .run(&mut prompter)
        .expect("retry should recover");

    assert_eq!(result.stat_values, json!({"CriticalChance": 0.5}));
    assert_eq!(prompter.warnings.len(), 1);
    assert!(prompter.warnings[0].starts_with("Invalid JSON detected"));
    assert_eq!(result.weapons, vec!["23003", "21001"]);
}

#[test]
fn blank_stat_text_uses_the_seed() {
    let data = fixture_data();
    let config = SessionConfig {
        stat_value_seed: StatValueSeed::CharacterBaseStats,
        ..SessionConfig::default()
    };
    let mut prompter = ScriptedPrompter::new(happy_path(""));
    let result = Session::new(&data, config)
        .run(&mut prompter)
        .expect("session should complete");

    assert_eq!(
        result.stat_values,
        json!({"BaseSpeed": 101, "CriticalChance": 0.05})
    );
    let shown: serde_json::Value =
        serde_json::from_str(&prompter.defaults[0]).expect("default is JSON");
    assert_eq!(shown, result.stat_values);
}

#[test]
fn out_of_range_selection_is_an_error() {
    let data = fixture_data();
    let mut prompter = ScriptedPrompter::new(vec![Answer::One(9)]);

    let err = Session::new(&data, SessionConfig::default())
        .run(&mut prompter)
        .expect_err("index 9 does not exist");
    assert_eq!(err.code, MetaErrorCode::InvalidSelection);
}
