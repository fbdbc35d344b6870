//! Quest list with derived availability.

use tabled::Tabled;

use questline_core::QuestView;

use crate::cli::QuestsArgs;
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct QuestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Trader")]
    trader: String,
    #[tabled(rename = "Map")]
    map: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Objectives")]
    objectives: String,
    #[tabled(rename = "Kappa")]
    kappa: &'static str,
    #[tabled(rename = "Active")]
    active: &'static str,
}

impl From<&QuestView> for QuestRow {
    fn from(view: &QuestView) -> Self {
        let quest = &view.quest;
        Self {
            id: quest.id.clone(),
            name: quest.name.clone(),
            trader: quest
                .trader
                .as_ref()
                .and_then(|t| t.name.clone())
                .unwrap_or_default(),
            map: quest
                .map
                .as_ref()
                .and_then(|m| m.name.clone())
                .unwrap_or_else(|| "any".into()),
            level: quest
                .min_player_level
                .map(|l| l.to_string())
                .unwrap_or_default(),
            objectives: format!("{}/{}", view.completed_objectives(), view.objectives.len()),
            kappa: output::check(quest.kappa_required),
            active: output::check(view.active),
        }
    }
}

/// Whether `view` is given by the trader named `filter`.
fn given_by(view: &QuestView, filter: &str) -> bool {
    view.quest.trader.as_ref().is_some_and(|trader| {
        [trader.name.as_deref(), trader.normalized_name.as_deref()]
            .into_iter()
            .flatten()
            .any(|name| name.eq_ignore_ascii_case(filter))
    })
}

fn select<'a>(views: &'a [QuestView], args: &QuestsArgs) -> Vec<&'a QuestView> {
    views
        .iter()
        .filter(|view| !args.active || view.active)
        .filter(|view| args.trader.as_deref().is_none_or(|t| given_by(view, t)))
        .collect()
}

pub async fn handle(args: &QuestsArgs, ctx: &Context) -> Result<(), CliError> {
    let service = ctx.service(None)?;
    ctx.fetch(&service, true).await?;

    let view = service.quests();
    let selected = select(&view.data, args);

    let out = output::render_list(
        ctx.format,
        &selected,
        |v| QuestRow::from(*v),
        |v| v.id().to_owned(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
