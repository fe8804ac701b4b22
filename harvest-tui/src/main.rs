mod api;
mod app;
mod cli;
mod config;
mod logging;
mod runtime;
mod toast;
mod ui;

#[cfg(test)]
mod test_support;

use anyhow::{bail, Context, Result};
use api::Services;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::HarvestConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use harvest::{report, SheetClient, Workbench};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Commands::ConfigPath) = cli.command {
        let path = HarvestConfig::ensure_default_file()?;
        println!("{}", path.display());
        return Ok(());
    }

    let cfg = HarvestConfig::load()?;
    logging::init(&cfg.log_path()?)?;

    match cli.command {
        Some(Commands::Dev) => {
            println!("Dev mode: using in-memory sheets, nothing is sent.");
            let app = App::new(api::dev_sources());
            run_tui(app, Services::dev()).await
        }
        Some(Commands::Report {
            source,
            output,
            filters,
        }) => write_report(&cfg, source, output, filters).await,
        Some(Commands::Run) | None => {
            cfg.require_sources()?;
            let services = Services::live(&cfg)?;
            let app = App::new(cfg.sources.clone());
            run_tui(app, services).await
        }
        Some(Commands::ConfigPath) => Ok(()),
    }
}

async fn run_tui(mut app: App, services: Services) -> Result<()> {
    tracing::info!(sources = app.workbench.sources().len(), "starting terminal UI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &services).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "terminal UI stopped");
    }
    res
}

async fn write_report(
    cfg: &HarvestConfig,
    source: Option<String>,
    output: Option<PathBuf>,
    filters: Vec<(usize, String)>,
) -> Result<()> {
    cfg.require_sources()?;

    let mut workbench = Workbench::new(cfg.sources.clone());
    if let Some(name) = source {
        let Some(index) = cfg.sources.iter().position(|s| s.name == name) else {
            bail!("No source named `{name}` in the config");
        };
        workbench.select_source(index);
    }

    let store = SheetClient::new(cfg.request_timeout()).context("Failed to build HTTP client")?;
    workbench
        .load_dataset(&store)
        .await
        .context("Failed to load the sheet")?;

    for (column, text) in &filters {
        workbench.apply_filter(*column, text);
    }

    let html = report::render_html(workbench.table_view().as_ref(), workbench.filters());
    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}
