/// Which stat keys are offered as sub-stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubStatFilter {
    /// Drop keys matching the sub-stat denylist.
    #[default]
    Denylist,
    /// Offer every stat key.
    Unfiltered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelicSelection {
    /// Two combinations of at most two standard sets each.
    #[default]
    SplitCombo,
    /// One unbounded selection of standard sets.
    Unified,
}

/// Default contents of the stat-value editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatValueSeed {
    #[default]
    Blank,
    CharacterBaseStats,
}

/// What happens when the stat-value text is not valid JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidJsonPolicy {
    /// End the session; nothing is written.
    #[default]
    Abort,
    /// Warn and ask for the stat values again, keeping earlier answers.
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub sub_stat_filter: SubStatFilter,
    pub relic_selection: RelicSelection,
    pub stat_value_seed: StatValueSeed,
    pub invalid_json: InvalidJsonPolicy,
}
