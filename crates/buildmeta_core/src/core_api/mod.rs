mod choices;
mod config;
mod error;
mod meta;
mod reference;
mod session;
mod store;
mod types;

pub use choices::{
    character_choices, elemental_stat_choices, main_stat_choices, ornament_choices,
    relic_choices, sub_stat_choices, weapon_choices,
};
pub use config::{InvalidJsonPolicy, RelicSelection, SessionConfig, StatValueSeed, SubStatFilter};
pub use error::{MetaError, MetaErrorCode};
pub use meta::{blank_stat_template, stat_value_seed};
pub use reference::{ReferenceData, ReferencePaths};
pub use session::{Prompter, Session, SessionAnswers, SessionStep};
pub use store::MetaStore;
pub use types::{
    BaseStat, Character, Choice, MainStats, MetaEntry, PieceEffect, RelicSet, StatDefinition,
    Weapon,
};
