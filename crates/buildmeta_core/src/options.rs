//! Fixed enumerations offered to the operator: eidolon levels, trace upgrade
//! priorities and the main-stat tables for the slots whose candidates do not
//! come from the stat reference data.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eidolon {
    E0,
    E1,
    E2,
    E3,
    E4,
    E5,
    E6,
}

impl Eidolon {
    pub const ALL: [Self; 7] = [
        Self::E0,
        Self::E1,
        Self::E2,
        Self::E3,
        Self::E4,
        Self::E5,
        Self::E6,
    ];

    pub fn from_level(level: usize) -> Option<Self> {
        Self::ALL.get(level).copied()
    }

    pub fn level(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::E0 => "E0",
            Self::E1 => "E1",
            Self::E2 => "E2",
            Self::E3 => "E3",
            Self::E4 => "E4",
            Self::E5 => "E5",
            Self::E6 => "E6",
        }
    }
}

impl fmt::Display for Eidolon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relic equipment slots that carry a selectable main stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Body,
    Foot,
    Orb,
    Rope,
}

impl Slot {
    /// Prompt order.
    pub const ALL: [Self; 4] = [Self::Body, Self::Foot, Self::Orb, Self::Rope];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Body => "BODY",
            Self::Foot => "FOOT",
            Self::Orb => "ORB",
            Self::Rope => "ROPE",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Ult = ultimate, T = talent, S = skill, B = basic attack. The stored value is
// the index into this table, so the order is part of the persisted format.
#[rustfmt::skip]
pub const TALENT_PRIORITIES: &[&str] = &[
    "Ult > T > S > B", "Ult > T > B > S", "Ult > S > T > B", "Ult > S > B > T",
    "Ult > B > T > S", "Ult > B > S > T", "T > Ult > S > B", "T > Ult > B > S",
    "T > S > Ult > B", "T > S > B > Ult", "T > B > Ult > S", "T > B > S > Ult",
    "S > Ult > T > B", "S > Ult > B > T", "S > T > Ult > B", "S > T > B > Ult",
    "S > B > Ult > T", "S > B > T > Ult", "B > Ult > S > T", "B > Ult > T > S",
    "B > S > Ult > T", "B > S > T > Ult", "B > T > Ult > S", "B > T > S > Ult",
    TALENT_PRIORITY_SENTINEL,
];

/// Kits that do not follow the four-ability model get this label instead of
/// a permutation.
pub const TALENT_PRIORITY_SENTINEL: &str = "Blade";

pub fn talent_priority_label(index: usize) -> Option<&'static str> {
    TALENT_PRIORITIES.get(index).copied()
}

pub struct FixedMainStat {
    pub label: &'static str,
    pub value: &'static str,
}

#[rustfmt::skip]
pub const BODY_MAIN_STATS: &[FixedMainStat] = &[
    FixedMainStat { label: "ATK%",                  value: "ATK%" },
    FixedMainStat { label: "Crit DMG / Rate",       value: "Crit DMG / Rate" },
    FixedMainStat { label: "Crit Rate",             value: "Crit Rate" },
    FixedMainStat { label: "Crit DMG",              value: "Crit DMG" },
    FixedMainStat { label: "DEF%",                  value: "DEF%" },
    FixedMainStat { label: "Effect Hit Rate%",      value: "EHR%" },
    FixedMainStat { label: "HP%",                   value: "HP%" },
    FixedMainStat { label: "Outgoing Healing Boost", value: "OHB%" },
];

#[rustfmt::skip]
pub const FOOT_MAIN_STATS: &[FixedMainStat] = &[
    FixedMainStat { label: "ATK%", value: "ATK%" },
    FixedMainStat { label: "DEF%", value: "DEF%" },
    FixedMainStat { label: "HP%",  value: "HP%" },
    FixedMainStat { label: "SPD",  value: "SPD" },
];

#[rustfmt::skip]
pub const ROPE_MAIN_STATS: &[FixedMainStat] = &[
    FixedMainStat { label: "ATK%",                  value: "ATK%" },
    FixedMainStat { label: "Break Effect%",         value: "Break" },
    FixedMainStat { label: "DEF%",                  value: "DEF%" },
    FixedMainStat { label: "Energy Recharge Rate%", value: "Energy" },
    FixedMainStat { label: "HP%",                   value: "HP%" },
];

/// Fixed candidates for a slot. ORB candidates are derived from the stat
/// reference data instead, so it has no table.
pub fn fixed_main_stats(slot: Slot) -> Option<&'static [FixedMainStat]> {
    match slot {
        Slot::Body => Some(BODY_MAIN_STATS),
        Slot::Foot => Some(FOOT_MAIN_STATS),
        Slot::Rope => Some(ROPE_MAIN_STATS),
        Slot::Orb => None,
    }
}
