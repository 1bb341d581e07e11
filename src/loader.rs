//! Background slide loading.
//!
//! Each requested load runs the [`SlideSource`] chain on its own thread and
//! sends the result to the UI thread over an [`mpsc`] channel.
//!
//! ## For contributors
//!
//! Loads are neither cancelled nor de-duplicated.  If two are in flight the
//! one that finishes last is what the user ends up seeing.

use std::sync::{mpsc, Arc};
use std::thread;

use crate::source::{Slide, SlideSource};

/// A finished load, sent from a loader thread to the UI thread.
pub struct Loaded {
    pub source_url: String,
    pub slides: Vec<Slide>,
}

pub struct Loader {
    source: Arc<SlideSource>,
    tx: mpsc::Sender<Loaded>,
}

/// Create a loader and the receiver the main loop should drain every tick.
pub fn channel(source: SlideSource) -> (Loader, mpsc::Receiver<Loaded>) {
    let (tx, rx) = mpsc::channel();
    let loader = Loader {
        source: Arc::new(source),
        tx,
    };
    (loader, rx)
}

impl Loader {
    /// Start fetching `source_url` in the background.
    pub fn request(&self, source_url: String) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let slides = source.fetch_slides(&source_url);
            // If the receiver is gone the main thread has exited.
            let _ = tx.send(Loaded { source_url, slides });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::source::testing::FakeClient;
    use crate::source::{fallback_slides, FallbackStrategy};
    use std::time::{Duration, Instant};

    #[test]
    fn load_through_proxy_renders_exactly_one_slide() {
        let client = FakeClient::new().with(
            "http://proxy.test/api/slides",
            r#"[{"title":"A","desc":"d","img":"i.png","url":"https://x"}]"#,
        );
        let source = SlideSource::standard(Some("http://proxy.test/api/slides".into()), Arc::new(client));
        let (loader, rx) = channel(source);

        let mut app = test_app();
        app.load(Some("https://leafo.itch.io".into()));
        loader.request(app.take_pending_load().unwrap());

        let loaded = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        app.apply_loaded(loaded, Instant::now());

        assert_eq!(app.view.renders, vec![Slide::new("A", "d", "i.png", "https://x")]);
        assert_eq!(app.state.slides.len(), 1);
        assert_eq!(app.state.current_index, 0);
    }

    #[test]
    fn request_delivers_slides() {
        let (loader, rx) = channel(SlideSource::new(vec![Box::new(FallbackStrategy)]));
        loader.request("https://leafo.itch.io".into());

        let loaded = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(loaded.source_url, "https://leafo.itch.io");
        assert_eq!(loaded.slides, fallback_slides());
    }

    #[test]
    fn every_request_gets_an_answer() {
        let (loader, rx) = channel(SlideSource::new(Vec::new()));
        loader.request("a".into());
        loader.request("b".into());

        let mut urls: Vec<_> = (0..2)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap().source_url)
            .collect();
        urls.sort();
        assert_eq!(urls, vec!["a", "b"]);
    }
}
