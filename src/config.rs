//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::source::DEFAULT_PROFILE_URL;

/// Cycle through the games on an itch.io page in the terminal.
#[derive(Debug, Parser)]
#[command(name = "itch-slideshow", version, about)]
pub struct Config {
    /// itch.io profile or listing page to load at startup.
    #[arg(env = "ITCH_SLIDESHOW_SOURCE", default_value = DEFAULT_PROFILE_URL)]
    pub source: String,

    /// Proxy endpoint called as `<PROXY>?url=<source>`.  Omit to skip the proxy tier.
    #[arg(long, env = "ITCH_SLIDESHOW_PROXY")]
    pub proxy: Option<String>,

    /// Auto-advance interval in milliseconds.
    #[arg(long, env = "ITCH_SLIDESHOW_INTERVAL_MS", default_value_t = 5000)]
    pub interval_ms: u64,

    /// Where to write log output (the terminal belongs to the UI).
    #[arg(long, env = "ITCH_SLIDESHOW_LOG", default_value = "itch-slideshow.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// The startup source URL, scheme-prefixed if needed.
    pub fn source_url(&self) -> String {
        normalize_source_url(&self.source)
    }
}

/// Prefix `https://` unless the input already names an http(s) scheme.
///
/// `example.itch.io` becomes `https://example.itch.io`.  Surrounding
/// whitespace is dropped; no other validation happens.
pub fn normalize_source_url(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hostname_gets_https() {
        assert_eq!(normalize_source_url("example.itch.io"), "https://example.itch.io");
    }

    #[test]
    fn existing_scheme_is_kept() {
        assert_eq!(normalize_source_url("http://a.itch.io"), "http://a.itch.io");
        assert_eq!(normalize_source_url("HTTPS://a.itch.io/x"), "HTTPS://a.itch.io/x");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize_source_url("  b.itch.io \n"), "https://b.itch.io");
    }

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["itch-slideshow"]).unwrap();
        assert_eq!(cfg.source, DEFAULT_PROFILE_URL);
        assert_eq!(cfg.interval(), Duration::from_millis(5000));
    }

    #[test]
    fn positional_source_is_normalized() {
        let cfg = Config::try_parse_from(["itch-slideshow", "someone.itch.io", "--proxy", "http://p/x"])
            .unwrap();
        assert_eq!(cfg.source_url(), "https://someone.itch.io");
        assert_eq!(cfg.proxy.as_deref(), Some("http://p/x"));
    }
}
