// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Terminal failures of a single run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Invalid Wikipedia link. Please provide a valid link starting with 'https://<language>.wikipedia.org/wiki/'"
    )]
    InvalidLinkFormat(String),

    /// Nothing usable came back from the locator. Unreachable pages and pages
    /// without marked tables share this kind; the transport cause, if any,
    /// hangs off `source()`.
    #[error("No tables found")]
    NoTablesFound(#[source] Option<RetrievalError>),

    #[error("No numerical data found")]
    NoNumericDataFound,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to render plot to {}: {message}", .path.display())]
    Render { path: PathBuf, message: String },
}

/// Why a document could not be read.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl From<RetrievalError> for Error {
    fn from(err: RetrievalError) -> Self {
        Error::NoTablesFound(Some(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn retrieval_failures_surface_as_no_tables_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = RetrievalError::Io {
            path: PathBuf::from("missing.html"),
            source: io,
        }
        .into();

        assert_eq!(err.to_string(), "No tables found");
        assert!(matches!(err, Error::NoTablesFound(Some(_))));
        let cause = err.source().expect("cause should be kept");
        assert!(cause.to_string().contains("missing.html"));
    }

    #[test]
    fn empty_match_has_no_cause() {
        let err = Error::NoTablesFound(None);
        assert_eq!(err.to_string(), "No tables found");
        assert!(err.source().is_none());
    }
}
