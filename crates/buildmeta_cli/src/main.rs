mod prompt;

use std::path::PathBuf;
use std::process;

use buildmeta_core::core_api::{
    InvalidJsonPolicy, MetaEntry, MetaError, MetaErrorCode, MetaStore, ReferenceData,
    ReferencePaths, RelicSelection, Session, SessionConfig, StatValueSeed, SubStatFilter,
};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::prompt::TerminalPrompter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SubStatArg {
    Denylist,
    #[value(name = "none")]
    Unfiltered,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum RelicArg {
    SplitCombo,
    Unified,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StatSeedArg {
    Blank,
    CharacterBaseStats,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum InvalidJsonArg {
    Abort,
    Retry,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding weapons.json, avatar.json, relicset.json and stats.json
    #[arg(long, value_name = "DIR", env = "BUILDMETA_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,
    #[arg(long, value_name = "FILE")]
    weapons: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    characters: Option<PathBuf>,
    #[arg(long = "relic-sets", value_name = "FILE")]
    relic_sets: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    stats: Option<PathBuf>,
    /// Meta store to merge the new entry into
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "BUILDMETA_OUTPUT",
        default_value = "meta-output.json"
    )]
    output: PathBuf,
    #[arg(
        long = "sub-stats",
        value_enum,
        env = "BUILDMETA_SUB_STATS",
        default_value_t = SubStatArg::Denylist
    )]
    sub_stats: SubStatArg,
    #[arg(
        long,
        value_enum,
        env = "BUILDMETA_RELICS",
        default_value_t = RelicArg::SplitCombo
    )]
    relics: RelicArg,
    #[arg(
        long = "stat-seed",
        value_enum,
        env = "BUILDMETA_STAT_SEED",
        default_value_t = StatSeedArg::Blank
    )]
    stat_seed: StatSeedArg,
    #[arg(
        long = "on-invalid-json",
        value_enum,
        env = "BUILDMETA_ON_INVALID_JSON",
        default_value_t = InvalidJsonArg::Abort
    )]
    on_invalid_json: InvalidJsonArg,
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn reference_paths(&self) -> ReferencePaths {
        let defaults = ReferencePaths::in_dir(&self.data_dir);
        ReferencePaths {
            weapons: self.weapons.clone().unwrap_or(defaults.weapons),
            characters: self.characters.clone().unwrap_or(defaults.characters),
            relic_sets: self.relic_sets.clone().unwrap_or(defaults.relic_sets),
            stats: self.stats.clone().unwrap_or(defaults.stats),
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            sub_stat_filter: to_core_sub_stat_filter(self.sub_stats),
            relic_selection: to_core_relic_selection(self.relics),
            stat_value_seed: to_core_stat_seed(self.stat_seed),
            invalid_json: to_core_invalid_json(self.on_invalid_json),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data = ReferenceData::load(&cli.reference_paths()).unwrap_or_else(|e| fail(&e));
    // Read up front so a corrupt store is reported before any questions.
    let mut store = MetaStore::open(&cli.output).unwrap_or_else(|e| fail(&e));

    let session = Session::new(&data, cli.session_config());
    tracing::debug!(config = ?session.config(), "starting session");
    let mut prompter = TerminalPrompter::from_stdin().unwrap_or_else(|e| fail(&e));
    let answers = session.run(&mut prompter).unwrap_or_else(|e| fail(&e));

    let Some(character) = data.character(&answers.character_id) else {
        fail(&MetaError::new(
            MetaErrorCode::InvalidSelection,
            format!("unknown character id {}", answers.character_id),
        ));
    };
    let entry = MetaEntry::assemble(&answers, character);

    store
        .upsert(&answers.character_id, &entry)
        .unwrap_or_else(|e| fail(&e));
    store.save().unwrap_or_else(|e| fail(&e));

    println!(
        "✅ Metadata for {} saved to {}",
        entry.name,
        cli.output.display()
    );
}

fn fail(err: &MetaError) -> ! {
    tracing::debug!(code = ?err.code, "aborting without writing");
    match err.code {
        MetaErrorCode::NoMatchingWeapons => eprintln!("⚠️ {}", err.message),
        MetaErrorCode::Cancelled => eprintln!("❌ Cancelled; nothing was saved."),
        _ => eprintln!("❌ {}", err.message),
    }
    process::exit(1);
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn to_core_sub_stat_filter(arg: SubStatArg) -> SubStatFilter {
    match arg {
        SubStatArg::Denylist => SubStatFilter::Denylist,
        SubStatArg::Unfiltered => SubStatFilter::Unfiltered,
    }
}

fn to_core_relic_selection(arg: RelicArg) -> RelicSelection {
    match arg {
        RelicArg::SplitCombo => RelicSelection::SplitCombo,
        RelicArg::Unified => RelicSelection::Unified,
    }
}

fn to_core_stat_seed(arg: StatSeedArg) -> StatValueSeed {
    match arg {
        StatSeedArg::Blank => StatValueSeed::Blank,
        StatSeedArg::CharacterBaseStats => StatValueSeed::CharacterBaseStats,
    }
}

fn to_core_invalid_json(arg: InvalidJsonArg) -> InvalidJsonPolicy {
    match arg {
        InvalidJsonArg::Abort => InvalidJsonPolicy::Abort,
        InvalidJsonArg::Retry => InvalidJsonPolicy::Retry,
    }
}
