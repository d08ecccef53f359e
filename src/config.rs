// src/config.rs
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const OUTPUT_FILE_NAME: &str = "visualized_data.png";

const DEFAULT_TABLE_CLASS: &str = "wikitable";
const DEFAULT_WIDTH: u32 = 1024;
const DEFAULT_HEIGHT: u32 = 768;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub output_dir: PathBuf,
    pub table_class: String,
    pub user_agent: String,
    pub plot_width: u32,
    pub plot_height: u32,
    pub font: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            user_agent: default_user_agent(),
            plot_width: DEFAULT_WIDTH,
            plot_height: DEFAULT_HEIGHT,
            font: None,
        }
    }
}

impl Config {
    /// Read `WIKIPLOT_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(dir) = lookup("WIKIPLOT_OUTPUT_DIR") {
            cfg.output_dir = PathBuf::from(dir);
        }
        if let Some(class) = lookup("WIKIPLOT_TABLE_CLASS") {
            let class = class.trim();
            if class.is_empty() {
                bail!("WIKIPLOT_TABLE_CLASS must not be empty");
            }
            cfg.table_class = class.to_string();
        }
        if let Some(agent) = lookup("WIKIPLOT_USER_AGENT") {
            cfg.user_agent = agent;
        }
        if let Some(w) = lookup("WIKIPLOT_PLOT_WIDTH") {
            cfg.plot_width = parse_dimension("WIKIPLOT_PLOT_WIDTH", &w)?;
        }
        if let Some(h) = lookup("WIKIPLOT_PLOT_HEIGHT") {
            cfg.plot_height = parse_dimension("WIKIPLOT_PLOT_HEIGHT", &h)?;
        }
        cfg.font = lookup("WIKIPLOT_FONT").map(PathBuf::from);

        Ok(cfg)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }
}

fn parse_dimension(key: &str, raw: &str) -> Result<u32> {
    let v: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got {:?}", key, raw))?;
    if v == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(v)
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
