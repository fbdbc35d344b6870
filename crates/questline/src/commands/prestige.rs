//! Prestige tier list.

use tabled::Tabled;

use questline_core::Prestige;

use crate::commands::Context;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PrestigeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Conditions")]
    conditions: usize,
}

fn to_row(p: &Prestige) -> PrestigeRow {
    PrestigeRow {
        id: p.id.clone(),
        level: p.prestige_level.map(|l| l.to_string()).unwrap_or_default(),
        name: p.name.clone(),
        conditions: p.conditions.len(),
    }
}

pub async fn handle(ctx: &Context) -> Result<(), CliError> {
    let service = ctx.service(None)?;
    ctx.fetch(&service, false).await?;

    let view = service.prestige();
    let out = output::render_list(ctx.format, &view.data, to_row, |p| p.id.clone())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
