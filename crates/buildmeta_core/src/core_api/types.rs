use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::options::{Eidolon, Slot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStat {
    pub stat: String,
    pub value: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "avatarType", alias = "weaponType", default)]
    pub weapon_type: String,
    #[serde(rename = "baseStats", default, skip_serializing_if = "Vec::is_empty")]
    pub base_stats: Vec<BaseStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "weaponType", default)]
    pub weapon_type: String,
    #[serde(default)]
    pub rarity: u8,
}

impl Weapon {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceEffect {
    #[serde(default)]
    pub effect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicSet {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "planarSet", default)]
    pub ornament: bool,
    #[serde(rename = "2", default, skip_serializing_if = "Option::is_none")]
    pub two_piece: Option<PieceEffect>,
    #[serde(rename = "4", default, skip_serializing_if = "Option::is_none")]
    pub four_piece: Option<PieceEffect>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One line of a prompt: what the operator sees and what gets stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainStats {
    #[serde(rename = "BODY", default)]
    pub body: Vec<String>,
    #[serde(rename = "FOOT", default)]
    pub foot: Vec<String>,
    #[serde(rename = "ORB", default)]
    pub orb: Vec<String>,
    #[serde(rename = "ROPE", default)]
    pub rope: Vec<String>,
}

impl MainStats {
    pub fn slot(&self, slot: Slot) -> &[String] {
        match slot {
            Slot::Body => &self.body,
            Slot::Foot => &self.foot,
            Slot::Orb => &self.orb,
            Slot::Rope => &self.rope,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, values: Vec<String>) {
        match slot {
            Slot::Body => self.body = values,
            Slot::Foot => self.foot = values,
            Slot::Orb => self.orb = values,
            Slot::Rope => self.rope = values,
        }
    }
}

/// A recommended build for one character, as persisted in the meta store.
///
/// `sets` holds every relic combination followed by the ornament selection
/// as its last element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaEntry {
    pub name: String,
    pub weapons: Vec<String>,
    pub sub_stats: Vec<String>,
    pub stats: JsonValue,
    pub version: String,
    pub sets: Vec<Vec<String>>,
    pub main_stats: MainStats,
    pub eidolon: Eidolon,
    pub talents_index: usize,
    pub synergies: Vec<String>,
}

impl MetaEntry {
    pub fn relic_combos(&self) -> &[Vec<String>] {
        match self.sets.split_last() {
            Some((_, combos)) => combos,
            None => &[],
        }
    }

    pub fn ornaments(&self) -> &[String] {
        self.sets.last().map(Vec::as_slice).unwrap_or(&[])
    }
}
