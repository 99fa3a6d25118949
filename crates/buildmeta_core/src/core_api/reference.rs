use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use super::error::{MetaError, MetaErrorCode};
use super::types::{Character, RelicSet, StatDefinition, Weapon};

pub const WEAPONS_FILE: &str = "weapons.json";
pub const CHARACTERS_FILE: &str = "avatar.json";
pub const RELIC_SETS_FILE: &str = "relicset.json";
pub const STATS_FILE: &str = "stats.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePaths {
    pub weapons: PathBuf,
    pub characters: PathBuf,
    pub relic_sets: PathBuf,
    pub stats: PathBuf,
}

impl ReferencePaths {
    /// The standard file names inside one data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            weapons: dir.join(WEAPONS_FILE),
            characters: dir.join(CHARACTERS_FILE),
            relic_sets: dir.join(RELIC_SETS_FILE),
            stats: dir.join(STATS_FILE),
        }
    }
}

/// The four read-only lookup tables, each keyed by id in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub characters: IndexMap<String, Character>,
    pub weapons: IndexMap<String, Weapon>,
    pub relic_sets: IndexMap<String, RelicSet>,
    pub stats: IndexMap<String, StatDefinition>,
}

impl ReferenceData {
    pub fn load(paths: &ReferencePaths) -> Result<Self, MetaError> {
        let data = Self {
            characters: load_table(&paths.characters)?,
            weapons: load_table(&paths.weapons)?,
            relic_sets: load_table(&paths.relic_sets)?,
            stats: load_table(&paths.stats)?,
        };
        tracing::info!(
            characters = data.characters.len(),
            weapons = data.weapons.len(),
            relic_sets = data.relic_sets.len(),
            stats = data.stats.len(),
            "loaded reference data"
        );
        Ok(data)
    }

    pub fn from_json_strs(
        characters: &str,
        weapons: &str,
        relic_sets: &str,
        stats: &str,
    ) -> Result<Self, MetaError> {
        Ok(Self {
            characters: parse_table(characters, "characters")?,
            weapons: parse_table(weapons, "weapons")?,
            relic_sets: parse_table(relic_sets, "relic sets")?,
            stats: parse_table(stats, "stats")?,
        })
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Result<IndexMap<String, T>, MetaError> {
    let text = fs::read_to_string(path).map_err(|e| {
        MetaError::new(
            MetaErrorCode::Io,
            format!("failed to read {}: {e}", path.display()),
        )
    })?;
    let table = parse_table(&text, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), entries = table.len(), "loaded table");
    Ok(table)
}

fn parse_table<T: DeserializeOwned>(
    text: &str,
    source: &str,
) -> Result<IndexMap<String, T>, MetaError> {
    serde_json::from_str(text).map_err(|e| {
        MetaError::new(
            MetaErrorCode::Parse,
            format!("failed to parse {source}: {e}"),
        )
    })
}
