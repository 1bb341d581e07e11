//! Last tier: hardcoded slides so the slideshow never comes up empty.

use super::error::Result;
use super::scrape::PLACEHOLDER_IMG;
use super::{Slide, SlideStrategy};

/// Profile page loaded at startup and linked by the fallback slides.
pub const DEFAULT_PROFILE_URL: &str = "https://leafo.itch.io";

/// The fixed two-entry list shown when every other tier has failed.
pub fn fallback_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "Sample Game 1",
            "Could not load games from the profile page.",
            PLACEHOLDER_IMG,
            DEFAULT_PROFILE_URL,
        ),
        Slide::new(
            "Sample Game 2",
            "Press F2 to try another itch.io page.",
            PLACEHOLDER_IMG,
            DEFAULT_PROFILE_URL,
        ),
    ]
}

pub struct FallbackStrategy;

impl SlideStrategy for FallbackStrategy {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn fetch(&self, _source: &str) -> Result<Vec<Slide>> {
        Ok(fallback_slides())
    }
}
