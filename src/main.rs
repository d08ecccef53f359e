use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use wikiplot::{
    config::Config,
    fetch::{Locator, TableExtractor},
    link::validate_link,
    plot::{self, PlotOptions},
    process::resolve_from_tables,
};

fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // ─── 2) configuration ────────────────────────────────────────────
    let config = Config::from_env().context("loading configuration")?;

    // ─── 3) read + validate link ─────────────────────────────────────
    let line = prompt("Enter the Wikipedia link: ")?;
    let url = validate_link(&line)?;
    info!(%url, "validated link");

    // ─── 4) tables → numeric series ──────────────────────────────────
    let extractor = TableExtractor::new(&config)?;
    let tables = extractor.extract_tables(&Locator::parse(url.as_str()))?;
    let series = resolve_from_tables(&tables)?;
    info!(column = %series.name, values = series.len(), "resolved numeric column");

    // ─── 5) plot ─────────────────────────────────────────────────────
    match plot::render_with(Some(&series), &config.output_dir, &PlotOptions::from(&config))? {
        Some(path) => info!(path = %path.display(), "done"),
        None => info!("nothing to plot"),
    }
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", message)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading link from stdin")?;
    Ok(line)
}
