mod cli;
mod config;
mod error;
mod menu;
mod model;
mod report;
mod repository;
mod scenarios;
mod service;
mod state;
mod ui;
mod validator;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use env_logger::Env;
use log::{debug, warn};

use cli::{Cli, Command};
use config::EduConfig;
use menu::Menu;
use service::EducationService;
use ui::Ui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EduConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    debug!("loaded config: {config:?}");

    let mut service = EducationService::new(config.password_cost);
    if config.seed_sample_data && !cli.no_seed {
        let seeded = service.load_sample_data();
        if !seeded.is_success() {
            warn!("{}", seeded.message());
        }
    }

    let ui = if Term::stdout().is_term() {
        Ui::new(config.report_width)
    } else {
        Ui::plain(config.report_width)
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command_or_menu() {
        Command::Menu => {
            let term = Term::stdout();
            if term.is_term() {
                term.clear_screen()?;
            }
            let stdin = io::stdin();
            Menu::new(&mut service, ui, stdin.lock(), &mut out).run()?;
        }
        Command::Report { kind, json } => {
            let reports = report::build(service.state(), kind.into());
            if json {
                // One report prints as an object, several as an array.
                let rendered = match reports.as_slice() {
                    [single] => single.to_json()?,
                    many => serde_json::to_string_pretty(many)
                        .context("failed to encode reports as JSON")?,
                };
                writeln!(out, "{rendered}")?;
            } else {
                for r in &reports {
                    ui.report(&mut out, r)?;
                }
            }
        }
        Command::Scenarios => {
            let verdicts = scenarios::run_all(&service);
            for verdict in &verdicts {
                ui.verdict(&mut out, verdict)?;
            }
            let failed = verdicts.iter().filter(|v| !v.passed).count();
            if failed > 0 {
                anyhow::bail!("{failed} scenario(s) failed");
            }
        }
    }

    Ok(())
}
