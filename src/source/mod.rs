//! Slide source abstraction layer.
//!
//! A [`SlideSource`] turns a page URL into slides by running an ordered
//! chain of [`SlideStrategy`] tiers and keeping the first success:
//!
//! 1. [`ProxyStrategy`]: a server-side endpoint that returns JSON.
//! 2. [`ScrapeStrategy`]: fetch the page directly and scrape the markup.
//! 3. [`FallbackStrategy`]: hardcoded slides.
//!
//! ## For contributors — adding a tier
//!
//! 1. Create a new file in this directory and implement [`SlideStrategy`].
//! 2. Insert it at the right position in [`SlideSource::standard`].
//!
//! Failures are logged and never leave this module.  The controller only ever
//! sees a non-empty list of slides.

mod error;
mod fallback;
mod http;
mod proxy;
mod scrape;
mod slide;

pub use fallback::{fallback_slides, FallbackStrategy, DEFAULT_PROFILE_URL};
pub use http::ReqwestClient;
pub use proxy::ProxyStrategy;
pub use scrape::ScrapeStrategy;
pub use slide::Slide;

use std::sync::Arc;

use http::HttpClient;

/// One tier of the fetch chain.
///
/// Strategies run on a loader thread, so implementations must be
/// [`Send`] + [`Sync`].
pub trait SlideStrategy: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    /// Produce slides for the page at `source`, or explain why not.
    fn fetch(&self, source: &str) -> error::Result<Vec<Slide>>;
}

/// Run `strategies` in order and return the first success.
///
/// Each failure is logged before moving on.  Returns the winning strategy's
/// name with its slides, or `None` if every strategy failed.
pub fn first_success(
    strategies: &[Box<dyn SlideStrategy>],
    source: &str,
) -> Option<(&'static str, Vec<Slide>)> {
    for strategy in strategies {
        match strategy.fetch(source) {
            Ok(slides) => return Some((strategy.name(), slides)),
            Err(e) => tracing::warn!(tier = strategy.name(), error = %e, "tier failed, escalating"),
        }
    }
    None
}

/// The complete, total slide fetcher.
pub struct SlideSource {
    strategies: Vec<Box<dyn SlideStrategy>>,
}

impl SlideSource {
    pub fn new(strategies: Vec<Box<dyn SlideStrategy>>) -> Self {
        Self { strategies }
    }

    /// Proxy, then direct scrape, then fallback.
    pub fn standard(proxy: Option<String>, client: Arc<dyn HttpClient>) -> Self {
        Self::new(vec![
            Box::new(ProxyStrategy::new(proxy, Arc::clone(&client))),
            Box::new(ScrapeStrategy::new(client)),
            Box::new(FallbackStrategy),
        ])
    }

    /// Fetch slides for `source`.  Never fails and never returns an empty list.
    pub fn fetch_slides(&self, source: &str) -> Vec<Slide> {
        match first_success(&self.strategies, source) {
            Some((tier, slides)) if !slides.is_empty() => {
                tracing::info!(tier, count = slides.len(), source, "loaded slides");
                slides
            }
            _ => {
                tracing::info!(source, "all tiers failed, using fallback slides");
                fallback_slides()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
