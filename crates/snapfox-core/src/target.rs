use crate::{Error, Result};
use url::Url;

/// Default URL captured when none is given on the command line.
pub const DEFAULT_URL: &str = "https://www.bannerbear.com";

/// Default output path for the screenshot file.
pub const DEFAULT_OUTPUT: &str = "example.png";

/// A validated navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parse a target, defaulting to https:// when no scheme is given.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidUrl("empty URL".to_string()));
        }

        let with_scheme = normalize_scheme(trimmed);

        let url = Url::parse(&with_scheme)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", trimmed, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            other => Err(Error::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                other, trimmed
            ))),
        }
    }

    /// The full URL as passed to the browser.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Host portion, if the URL has one.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.url.fmt(f)
    }
}

/// Prepend https:// when the input carries no scheme.
fn normalize_scheme(input: &str) -> String {
    if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_accepts_full_url() {
        let target = Target::parse("https://www.bannerbear.com").unwrap();
        assert_eq!(target.as_str(), "https://www.bannerbear.com/");
        assert_eq!(target.host(), Some("www.bannerbear.com"));
    }

    #[test]
    fn test_target_defaults_to_https() {
        let target = Target::parse("example.com").unwrap();
        assert_eq!(target.as_str(), "https://example.com/");
    }

    #[test]
    fn test_target_keeps_http_scheme() {
        let target = Target::parse("http://example.com/page").unwrap();
        assert_eq!(target.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_target_rejects_empty() {
        let result = Target::parse("   ");
        assert!(result.is_err());
    }

    #[test]
    fn test_target_rejects_unsupported_scheme() {
        let result = Target::parse("ftp://example.com");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_default_url_parses() {
        assert!(Target::parse(DEFAULT_URL).is_ok());
    }
}
