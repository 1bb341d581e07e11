//! Proxy tier: ask a server-side endpoint to fetch the page on our behalf.
//!
//! The endpoint is called as `GET <endpoint>?url=<encoded source URL>` and is
//! expected to answer with a JSON array of [`Slide`] objects.  Its output is
//! trusted as-is; the only check is that the array is non-empty.

use std::sync::Arc;

use url::Url;

use super::error::{FetchError, Result};
use super::http::HttpClient;
use super::{Slide, SlideStrategy};

pub struct ProxyStrategy {
    /// `None` disables the tier without removing it from the chain.
    endpoint: Option<String>,
    client: Arc<dyn HttpClient>,
}

impl ProxyStrategy {
    pub fn new(endpoint: Option<String>, client: Arc<dyn HttpClient>) -> Self {
        Self { endpoint, client }
    }

    /// Build the request URL, percent-encoding the source URL.
    pub fn request_url(endpoint: &str, source: &str) -> Result<Url> {
        Ok(Url::parse_with_params(endpoint, &[("url", source)])?)
    }
}

impl SlideStrategy for ProxyStrategy {
    fn name(&self) -> &'static str {
        "proxy"
    }

    fn fetch(&self, source: &str) -> Result<Vec<Slide>> {
        let endpoint = self.endpoint.as_deref().ok_or(FetchError::NoProxy)?;
        let request = Self::request_url(endpoint, source)?;
        let page = self.client.get(&request)?;
        let slides: Vec<Slide> = serde_json::from_str(&page.body)?;
        if slides.is_empty() {
            return Err(FetchError::Empty(self.name()));
        }
        Ok(slides)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::FakeClient;

    const ENDPOINT: &str = "http://proxy.test/api/slides";

    fn strategy(client: FakeClient) -> ProxyStrategy {
        ProxyStrategy::new(Some(ENDPOINT.into()), Arc::new(client))
    }

    #[test]
    fn request_url_encodes_source() {
        let url = ProxyStrategy::request_url(ENDPOINT, "https://leafo.itch.io/?a=b").unwrap();
        assert_eq!(
            url.as_str(),
            "http://proxy.test/api/slides?url=https%3A%2F%2Fleafo.itch.io%2F%3Fa%3Db"
        );
    }

    #[test]
    fn returns_slides_as_is() {
        let client = FakeClient::new().with(
            ENDPOINT,
            r#"[{"title":"A","desc":"d","img":"i.png","url":"https://x"}]"#,
        );
        let slides = strategy(client).fetch("https://leafo.itch.io").unwrap();
        assert_eq!(slides, vec![Slide::new("A", "d", "i.png", "https://x")]);
    }

    #[test]
    fn empty_array_is_a_failure() {
        let client = FakeClient::new().with(ENDPOINT, "[]");
        let err = strategy(client).fetch("https://leafo.itch.io").unwrap_err();
        assert!(matches!(err, FetchError::Empty("proxy")));
    }

    #[test]
    fn wrong_shape_is_a_failure() {
        let client = FakeClient::new().with(ENDPOINT, r#"{"error":"blocked"}"#);
        let err = strategy(client).fetch("https://leafo.itch.io").unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let err = strategy(FakeClient::new())
            .fetch("https://leafo.itch.io")
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn unconfigured_endpoint_fails_immediately() {
        let s = ProxyStrategy::new(None, Arc::new(FakeClient::new()));
        assert!(matches!(s.fetch("https://x").unwrap_err(), FetchError::NoProxy));
    }
}
