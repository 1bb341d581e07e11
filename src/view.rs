//! Slide render targets.
//!
//! [`SlideView`] is the write-only surface the controller renders into.
//! [`TerminalView`] keeps the latest slide for [`crate::ui`] to draw and owns
//! the reveal animation, which restarts on every render so re-showing the
//! same slide still replays it.

use std::time::{Duration, Instant};

use crate::source::Slide;

/// Time between revealed title characters.
const REVEAL_STEP: Duration = Duration::from_millis(25);

pub trait SlideView {
    fn render(&mut self, slide: &Slide);
}

/// Progressive title reveal, measured from `started`.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    started: Instant,
}

impl Reveal {
    pub fn start(now: Instant) -> Self {
        Self { started: now }
    }

    /// How many of `total` characters are visible at `now`.
    pub fn visible_chars(&self, now: Instant, total: usize) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let steps = elapsed.as_millis() / REVEAL_STEP.as_millis();
        usize::try_from(steps).unwrap_or(usize::MAX).min(total)
    }
}

/// The terminal's title/description/image/link slots.
#[derive(Debug, Default)]
pub struct TerminalView {
    slide: Option<Slide>,
    reveal: Option<Reveal>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slide(&self) -> Option<&Slide> {
        self.slide.as_ref()
    }

    pub fn reveal(&self) -> Option<Reveal> {
        self.reveal
    }

    fn restart_animation(&mut self, now: Instant) {
        self.reveal = Some(Reveal::start(now));
    }
}

impl SlideView for TerminalView {
    fn render(&mut self, slide: &Slide) {
        self.slide = Some(slide.clone());
        self.restart_animation(Instant::now());
    }
}
