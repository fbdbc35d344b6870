//! Command dispatch and shared command context.

pub mod achievements;
pub mod config_cmd;
pub mod prestige;
pub mod quests;
pub mod watch;

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use tracing::{debug, warn};

use questline_config::Config;
use questline_core::{GameMode, QuestService};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a data command needs, resolved from config + flags.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub language: String,
    pub game_mode: GameMode,
    pub format: OutputFormat,
    pub quiet: bool,
    pub progress: PathBuf,
}

impl Context {
    /// Load the config file and apply flag overrides on top.
    pub fn from_global(global: &GlobalOpts) -> Result<Self, CliError> {
        let path = global
            .config
            .clone()
            .unwrap_or_else(questline_config::config_path);
        let mut config = questline_config::load_config_from(&path)?;

        if let Some(ref lang) = global.lang {
            config.language.clone_from(lang);
        }
        if let Some(mode) = global.mode {
            config.game_mode = mode;
        }
        if let Some(ref url) = global.api_url {
            config.api_url.clone_from(url);
        }

        let format = match global.output {
            Some(format) => format,
            None => resolve_format(&config.output)?,
        };

        let progress = global
            .progress
            .clone()
            .unwrap_or_else(questline_config::progress_path);

        Ok(Self {
            language: config.language.clone(),
            game_mode: config.game_mode,
            config,
            format,
            quiet: global.quiet,
            progress,
        })
    }

    /// Build a service with player progress loaded. The progress file's
    /// selected mode is replaced by the mode being fetched so the derived
    /// views always describe the fetched dataset.
    pub fn service(&self, refresh_secs: Option<u64>) -> Result<QuestService, CliError> {
        let mut service_config = self.config.to_service_config()?;
        if let Some(secs) = refresh_secs {
            if secs == 0 {
                return Err(CliError::Validation {
                    field: "interval".into(),
                    reason: "must be greater than zero".into(),
                });
            }
            service_config.refresh_interval = Duration::from_secs(secs);
        }

        let service = QuestService::new(service_config)?;

        let mut settings = questline_config::load_progress(&self.progress)?;
        debug!(path = %self.progress.display(), "progress loaded");
        settings.game_mode = self.game_mode;
        service.set_settings(settings);

        Ok(service)
    }

    /// One-shot fetch of the quest dataset (and optionally traders).
    pub async fn fetch(&self, service: &QuestService, with_traders: bool) -> Result<(), CliError> {
        if with_traders {
            let (quests, traders) = tokio::join!(
                service.fetch_once(&self.language, self.game_mode),
                service.refresh_traders(&self.language, self.game_mode),
            );
            if let Err(err) = traders {
                warn!(error = %err, "trader list unavailable");
            }
            quests?;
        } else {
            service.fetch_once(&self.language, self.game_mode).await?;
        }
        Ok(())
    }
}

fn resolve_format(raw: &str) -> Result<OutputFormat, CliError> {
    OutputFormat::from_str(raw, true).map_err(|_| CliError::Validation {
        field: "output".into(),
        reason: format!("expected table, json, yaml, or plain, got '{raw}'"),
    })
}

/// Route a data command to its handler.
pub async fn dispatch(cmd: Command, ctx: Context) -> Result<(), CliError> {
    match cmd {
        Command::Quests(args) => quests::handle(&args, &ctx).await,
        Command::Achievements => achievements::handle(&ctx).await,
        Command::Prestige => prestige::handle(&ctx).await,
        Command::Watch(args) => watch::handle(&args, &ctx).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not use the quest service".into(),
        )),
    }
}
