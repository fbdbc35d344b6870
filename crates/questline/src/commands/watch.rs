//! Long-running refresh loop: one summary per store change until Ctrl-C.

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio_stream::StreamExt;
use tracing::{info, warn};

use questline_core::{FetchStatus, QuestService, QuestState};

use crate::cli::{OutputFormat, WatchArgs};
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

/// One observed store state, as printed.
#[derive(Debug, Serialize)]
struct WatchEvent {
    at: DateTime<Local>,
    status: FetchStatus,
    quests: usize,
    active: usize,
    achievements: usize,
    prestige: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl WatchEvent {
    fn observe(service: &QuestService, state: &QuestState) -> Self {
        let quests = service.quests().data;
        Self {
            at: Local::now(),
            status: state.status,
            quests: quests.len(),
            active: quests.iter().filter(|q| q.active).count(),
            achievements: state.data.achievements.len(),
            prestige: state.data.prestige.len(),
            error: state.error.as_ref().map(ToString::to_string),
        }
    }

    fn summary(&self, color: bool) -> String {
        let mut line = format!(
            "{} {:<9} {} quests ({} active) | {} achievements | {} prestige",
            self.at.format("%H:%M:%S"),
            output::status_label(self.status, color),
            self.quests,
            self.active,
            self.achievements,
            self.prestige,
        );
        if let Some(ref err) = self.error {
            line.push_str(&format!(" | error: {err}"));
        }
        line
    }

    fn render(&self, format: OutputFormat, color: bool) -> Result<String, CliError> {
        Ok(match format {
            OutputFormat::Table | OutputFormat::Plain => self.summary(color),
            OutputFormat::Json => serde_json::to_string(self)?,
            OutputFormat::Yaml => format!("---\n{}", serde_yaml::to_string(self)?),
        })
    }
}

pub async fn handle(args: &WatchArgs, ctx: &Context) -> Result<(), CliError> {
    let service = ctx.service(args.interval)?;
    let color = output::should_color();

    if let Err(err) = service
        .refresh_traders(&ctx.language, ctx.game_mode)
        .await
    {
        warn!(error = %err, "trader list unavailable");
    }

    let _subscription = service.subscribe(&ctx.language, ctx.game_mode);
    info!(
        language = %ctx.language,
        game_mode = %ctx.game_mode,
        period = ?service.scheduler().period(),
        "watching quest data"
    );

    let mut states = service.state_stream();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            state = states.next() => {
                let Some(state) = state else { break };
                let event = WatchEvent::observe(&service, &state);
                output::print_output(&event.render(ctx.format, color)?, ctx.quiet);
            }
        }
    }

    service.shutdown();
    Ok(())
}
