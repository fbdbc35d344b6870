//! Clap derive structures for the `questline` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use questline_core::GameMode;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// questline -- quest availability from the command line
#[derive(Debug, Parser)]
#[command(
    name = "questline",
    version,
    about = "Track quest availability from the command line",
    long_about = "Fetches the quest dataset (quests, achievements, prestige tiers)\n\
        for a language and game mode, and marks which quests are currently\n\
        active given the progress recorded in your progress file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Language code for quest text (overrides config)
    #[arg(long, short = 'l', global = true)]
    pub lang: Option<String>,

    /// Game mode: regular or pve (overrides config)
    #[arg(long, short = 'm', global = true)]
    pub mode: Option<GameMode>,

    /// Quest API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file to read instead of the platform default
    #[arg(long, env = "QUESTLINE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Progress file with completed quests and objectives
    #[arg(long, env = "QUESTLINE_PROGRESS", global = true)]
    pub progress: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List quests with their derived availability
    #[command(alias = "q")]
    Quests(QuestsArgs),

    /// List achievements
    #[command(alias = "ach")]
    Achievements,

    /// List prestige tiers
    Prestige,

    /// Keep the cache refreshed and report every change
    Watch(WatchArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Quests ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QuestsArgs {
    /// Only show quests that are currently active
    #[arg(long, short = 'a')]
    pub active: bool,

    /// Only show quests given by this trader (name or normalized name)
    #[arg(long, short = 't')]
    pub trader: Option<String>,
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Refresh period in seconds (overrides config)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
