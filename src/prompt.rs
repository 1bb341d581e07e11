//! Source-URL input provider.
//!
//! The controller never reads text itself; it opens a [`UrlPrompt`], feeds it
//! key events while it is open, and acts on the [`PromptOutcome`].  Swapping
//! the inline line editor for another input surface only means implementing
//! this trait.

use crossterm::event::{KeyCode, KeyEvent};

/// What a key press did to an open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing.
    Pending,
    /// The user confirmed this text (possibly empty).
    Submitted(String),
    Cancelled,
}

pub trait UrlPrompt: Send {
    fn open(&mut self);
    fn is_open(&self) -> bool;
    /// Text being edited, or `None` while closed.
    fn contents(&self) -> Option<&str>;
    fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome;
}

/// Single-line editor drawn in the status area.
#[derive(Debug, Default)]
pub struct LinePrompt {
    buffer: String,
    open: bool,
}

impl LinePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    fn close(&mut self) -> String {
        self.open = false;
        std::mem::take(&mut self.buffer)
    }
}

impl UrlPrompt for LinePrompt {
    fn open(&mut self) {
        self.buffer.clear();
        self.open = true;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn contents(&self) -> Option<&str> {
        self.open.then_some(self.buffer.as_str())
    }

    fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        if !self.open {
            return PromptOutcome::Cancelled;
        }
        match key.code {
            KeyCode::Enter => PromptOutcome::Submitted(self.close()),
            KeyCode::Esc => {
                self.close();
                PromptOutcome::Cancelled
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptOutcome::Pending
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(p: &mut LinePrompt, text: &str) {
        for c in text.chars() {
            assert_eq!(p.handle_key(key(KeyCode::Char(c))), PromptOutcome::Pending);
        }
    }

    #[test]
    fn closed_prompt_has_no_contents() {
        let p = LinePrompt::new();
        assert!(!p.is_open());
        assert_eq!(p.contents(), None);
    }

    #[test]
    fn typing_then_enter_submits() {
        let mut p = LinePrompt::new();
        p.open();
        type_text(&mut p, "a.itch.iox");
        p.handle_key(key(KeyCode::Backspace));
        assert_eq!(p.contents(), Some("a.itch.io"));
        assert_eq!(
            p.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Submitted("a.itch.io".into())
        );
        assert!(!p.is_open());
    }

    #[test]
    fn escape_cancels_and_clears() {
        let mut p = LinePrompt::new();
        p.open();
        type_text(&mut p, "abc");
        assert_eq!(p.handle_key(key(KeyCode::Esc)), PromptOutcome::Cancelled);
        p.open();
        assert_eq!(p.contents(), Some(""));
    }
}
