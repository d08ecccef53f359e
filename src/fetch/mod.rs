// src/fetch/mod.rs
pub mod csv_table;
pub mod html;

pub use html::TableFilter;

use crate::config::Config;
use crate::error::{Error, Result, RetrievalError};
use crate::table::Table;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Remote(Url),
    Local(PathBuf),
}

impl Locator {
    /// `http(s)` URLs are remote; `file://` URLs and anything else are paths.
    pub fn parse(s: &str) -> Locator {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Locator::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Locator::Local(path),
                Err(()) => Locator::Local(PathBuf::from(s)),
            },
            _ => Locator::Local(PathBuf::from(s)),
        }
    }
}

/// Fetches a document and turns its marked tables into [`Table`]s.
pub struct TableExtractor {
    client: Client,
    filter: TableFilter,
}

impl TableExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .build()
            .map_err(Error::Client)?;
        Ok(Self::with_client(client, TableFilter::class(&config.table_class)))
    }

    pub fn with_client(client: Client, filter: TableFilter) -> Self {
        Self { client, filter }
    }

    /// Read the document behind `locator` and return its marked tables in
    /// document order. CSV files count as one table.
    pub fn extract_tables(&self, locator: &Locator) -> Result<Vec<Table>> {
        let tables = match locator {
            Locator::Remote(url) => {
                let html = self.get_text(url)?;
                html::parse_tables(&html, &self.filter)
            }
            Locator::Local(path) if is_csv(path) => {
                let text = read_local(path)?;
                csv_table::parse_csv(&text)?.into_iter().collect()
            }
            Locator::Local(path) => {
                let html = read_local(path)?;
                html::parse_tables(&html, &self.filter)
            }
        };

        if tables.is_empty() {
            return Err(Error::NoTablesFound(None));
        }
        info!(count = tables.len(), "extracted tables");
        Ok(tables)
    }

    fn get_text(&self, url: &Url) -> std::result::Result<String, RetrievalError> {
        debug!(%url, "fetching page");
        let body = self
            .client
            .get(url.clone())
            .send()?
            .error_for_status()?
            .text()?;
        debug!(%url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

fn read_local(path: &Path) -> std::result::Result<String, RetrievalError> {
    debug!(path = %path.display(), "reading local document");
    fs::read_to_string(path).map_err(|source| RetrievalError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"))
}
