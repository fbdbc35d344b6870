//! Config subcommand handlers.

use std::fmt::Write as _;
use std::path::PathBuf;

use questline_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

fn target_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(questline_config::config_path)
}

fn entries(cfg: &Config) -> [(&'static str, String); 6] {
    [
        ("language", cfg.language.clone()),
        ("game_mode", cfg.game_mode.to_string()),
        ("api_url", cfg.api_url.clone()),
        (
            "timeout_secs",
            cfg.timeout_secs
                .map_or_else(|| "none".into(), |t| t.to_string()),
        ),
        ("refresh_interval_secs", cfg.refresh_interval_secs.to_string()),
        ("output", cfg.output.clone()),
    ]
}

fn detail(cfg: &Config) -> String {
    let mut out = String::new();
    for (key, value) in entries(cfg) {
        let _ = writeln!(out, "{key:<22} {value}");
    }
    out.trim_end().to_owned()
}

fn plain(cfg: &Config) -> String {
    entries(cfg)
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = target_path(global);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = questline_config::load_config_from(&path)?;
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = output::render_single(format, &cfg, detail, plain)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            questline_config::save_config_to(&Config::default(), &path)?;
            if !global.quiet {
                eprintln!("Wrote default configuration to {}", path.display());
            }
            Ok(())
        }
    }
}
