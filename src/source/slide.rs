//! The core data type shared across all slide strategies.
//!
//! `Slide` represents a single promotional entry (usually one game) no matter
//! which tier produced it.  The proxy tier decodes slides straight from JSON,
//! the scrape tier builds them from HTML, and the fallback tier hardcodes them.
//!
//! ## For contributors
//!
//! The JSON shape is the proxy's wire format.  Renaming a field here breaks
//! every deployed proxy, so add a `#[serde(rename)]` instead.

use serde::Deserialize;

/// A single renderable slide.
///
/// Slides carry no identity beyond their position in the list they were
/// fetched in, and are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slide {
    /// Headline shown in the title region.
    pub title: String,

    /// Short blurb shown under the title.  May be empty.
    pub desc: String,

    /// Absolute URL of the cover image (or the placeholder name).
    pub img: String,

    /// Absolute URL the slide links to.
    pub url: String,
}

impl Slide {
    pub fn new(
        title: impl Into<String>,
        desc: impl Into<String>,
        img: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            desc: desc.into(),
            img: img.into(),
            url: url.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
