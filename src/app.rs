use std::time::{Duration, Instant};

use ratatui::layout::{Position, Rect};

use crate::config::normalize_source_url;
use crate::loader::Loaded;
use crate::prompt::{LinePrompt, PromptOutcome, UrlPrompt};
use crate::source::Slide;
use crate::view::{SlideView, TerminalView};

/// Slides, position and timer for the running slideshow.
#[derive(Debug)]
pub struct SlideshowState {
    /// In fetch order; replaced wholesale by each completed load.
    pub slides: Vec<Slide>,
    /// Always `< slides.len()` when `slides` is non-empty.
    pub current_index: usize,
    /// Page the next load will fetch.
    pub source_url: String,
    /// Page the slides on screen actually came from.
    pub shown_source: Option<String>,
    /// Next auto-advance deadline.  `None` means auto-advance is stopped.
    timer: Option<Instant>,
}

/// The slideshow controller.
///
/// Owns all state and mediates between the loader (which delivers slides),
/// the input handlers, and the [`SlideView`] it renders into.
pub struct App<V: SlideView = TerminalView> {
    pub state: SlideshowState,
    pub view: V,
    pub prompt: Box<dyn UrlPrompt>,
    /// Interior of the slide panel from the last frame, for hover detection.
    /// The border counts as outside so a pointer leaving the window through
    /// an edge registers as a leave.
    pub display_area: Rect,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last load status message.
    pub status: String,
    interval: Duration,
    hovered: bool,
    paused: bool,
    pending_load: Option<String>,
}

impl App<TerminalView> {
    pub fn new(source_url: impl Into<String>, interval: Duration) -> Self {
        Self::with_view(TerminalView::new(), source_url, interval)
    }
}

impl<V: SlideView> App<V> {
    pub fn with_view(view: V, source_url: impl Into<String>, interval: Duration) -> Self {
        Self {
            state: SlideshowState {
                slides: Vec::new(),
                current_index: 0,
                source_url: source_url.into(),
                shown_source: None,
                timer: None,
            },
            view,
            prompt: Box::new(LinePrompt::new()),
            display_area: Rect::default(),
            quit: false,
            status: "Starting…".into(),
            interval,
            hovered: false,
            paused: false,
            pending_load: None,
        }
    }

    // -- loading -------------------------------------------------------------

    /// Switch to `url` (or keep the current source) and request a fetch.
    ///
    /// The fetch itself runs elsewhere; see [`App::take_pending_load`] and
    /// [`App::set_slides`].
    pub fn load(&mut self, url: Option<String>) {
        if let Some(url) = url {
            self.state.source_url = url;
        }
        tracing::info!(source = %self.state.source_url, "load requested");
        self.status = format!("Loading {}…", self.state.source_url);
        self.pending_load = Some(self.state.source_url.clone());
    }

    /// The URL of a requested but not yet dispatched load.
    pub fn take_pending_load(&mut self) -> Option<String> {
        self.pending_load.take()
    }

    /// Apply a finished load, whichever request it answers.
    pub fn apply_loaded(&mut self, loaded: Loaded, now: Instant) {
        let count = loaded.slides.len();
        self.status = format!(
            "Loaded {count} slides at {}",
            chrono::Local::now().format("%H:%M:%S")
        );
        self.state.shown_source = Some(loaded.source_url);
        self.set_slides(loaded.slides, now);
    }

    /// Replace the slide list with a completed fetch and start over at slide 0.
    pub fn set_slides(&mut self, slides: Vec<Slide>, now: Instant) {
        self.state.slides = slides;
        self.state.current_index = 0;
        self.show_slide(0);
        self.resume_auto(now);
    }

    // -- navigation ----------------------------------------------------------

    /// Show slide `i`, wrapping out-of-range and negative indices.
    pub fn show_slide(&mut self, i: isize) {
        let n = self.state.slides.len();
        if n == 0 {
            return;
        }
        let index = i.rem_euclid(n as isize) as usize;
        self.state.current_index = index;
        self.view.render(&self.state.slides[index]);
    }

    pub fn next(&mut self) {
        self.show_slide(self.state.current_index as isize + 1);
    }

    pub fn previous(&mut self) {
        self.show_slide(self.state.current_index as isize - 1);
    }

    /// Manual navigation resets the timer so it doesn't fire right after.
    pub fn navigate_next(&mut self, now: Instant) {
        self.next();
        self.resume_auto(now);
    }

    pub fn navigate_previous(&mut self, now: Instant) {
        self.previous();
        self.resume_auto(now);
    }

    // -- auto-advance --------------------------------------------------------

    /// Replace any running timer with a fresh one.
    pub fn start_auto(&mut self, now: Instant) {
        self.state.timer = Some(now + self.interval);
    }

    pub fn stop_auto(&mut self) {
        self.state.timer = None;
    }

    #[cfg(test)]
    pub fn is_auto_running(&self) -> bool {
        self.state.timer.is_some()
    }

    /// Restart the timer unless hover, the open prompt or the user's pause
    /// holds it.
    fn resume_auto(&mut self, now: Instant) {
        if self.hovered || self.paused || self.prompt.is_open() {
            self.stop_auto();
        } else {
            self.start_auto(now);
        }
    }

    /// Advance if the deadline has passed.  Called once per UI tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.state.timer {
            if now >= deadline {
                self.next();
                self.start_auto(now);
            }
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.paused = !self.paused;
        self.resume_auto(now);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // -- hover ---------------------------------------------------------------

    /// Track the pointer; entering the panel stops auto-advance, leaving
    /// restarts it.
    pub fn pointer_at(&mut self, position: Position, now: Instant) {
        let inside = self.display_area.contains(position);
        if inside && !self.hovered {
            self.hovered = true;
            self.stop_auto();
        } else if !inside {
            self.pointer_left(now);
        }
    }

    /// The pointer is gone (left the panel or the terminal lost focus).
    pub fn pointer_left(&mut self, now: Instant) {
        if self.hovered {
            self.hovered = false;
            self.resume_auto(now);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    // -- source prompt -------------------------------------------------------

    /// Open the prompt; slides hold still while the user types.
    pub fn open_prompt(&mut self) {
        self.prompt.open();
        self.stop_auto();
    }

    /// Act on what the prompt returned.  Blank input loads nothing.
    pub fn apply_prompt_outcome(&mut self, outcome: PromptOutcome, now: Instant) {
        match outcome {
            PromptOutcome::Pending => return,
            PromptOutcome::Submitted(text) if !text.trim().is_empty() => {
                self.load(Some(normalize_source_url(&text)));
            }
            PromptOutcome::Submitted(_) | PromptOutcome::Cancelled => {}
        }
        self.resume_auto(now);
    }
}
