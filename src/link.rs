// src/link.rs
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static WIKIPEDIA_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://\w+\.wikipedia\.org/wiki/.*").expect("wikipedia link regex")
});

/// Gate user input before any retrieval happens.
pub fn validate_link(input: &str) -> Result<Url> {
    let link = input.trim();
    if !WIKIPEDIA_LINK.is_match(link) {
        return Err(Error::InvalidLinkFormat(link.to_string()));
    }
    Url::parse(link).map_err(|_| Error::InvalidLinkFormat(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_language_subdomains() -> anyhow::Result<()> {
        let url = validate_link(
            "https://en.wikipedia.org/wiki/Women%27s_high_jump_world_record_progression\n",
        )?;
        assert_eq!(url.host_str(), Some("en.wikipedia.org"));

        validate_link("http://vi.wikipedia.org/wiki/Vi%E1%BB%87t_Nam")?;
        Ok(())
    }

    #[test]
    fn rejects_other_links() {
        for bad in [
            "",
            "en.wikipedia.org/wiki/Rust",
            "ftp://en.wikipedia.org/wiki/Rust",
            "https://wikipedia.org/wiki/Rust",
            "https://en.m.wikipedia.org/wiki/Rust",
            "https://en.wikipedia.org/w/index.php?title=Rust",
            "https://example.com/?https://en.wikipedia.org/wiki/Rust",
        ] {
            let err = validate_link(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidLinkFormat(_)), "{bad}");
        }
    }

    #[test]
    fn message_points_at_expected_shape() {
        let err = validate_link("nope").unwrap_err();
        assert!(err
            .to_string()
            .contains("https://<language>.wikipedia.org/wiki/"));
    }
}
