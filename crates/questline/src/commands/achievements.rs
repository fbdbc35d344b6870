//! Achievement list.

use tabled::Tabled;

use questline_core::Achievement;

use crate::commands::Context;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct AchievementRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Rarity")]
    rarity: String,
    #[tabled(rename = "Players")]
    players: String,
    #[tabled(rename = "Hidden")]
    hidden: &'static str,
}

fn to_row(a: &Achievement) -> AchievementRow {
    AchievementRow {
        id: a.id.clone(),
        name: a.name.clone(),
        side: a.side.clone().unwrap_or_default(),
        rarity: a.rarity.clone().unwrap_or_default(),
        players: a
            .player_percentage
            .map(|p| format!("{p:.1}%"))
            .unwrap_or_default(),
        hidden: output::check(a.hidden),
    }
}

pub async fn handle(ctx: &Context) -> Result<(), CliError> {
    let service = ctx.service(None)?;
    ctx.fetch(&service, false).await?;

    let view = service.achievements();
    let out = output::render_list(ctx.format, &view.data, to_row, |a| a.id.clone())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
