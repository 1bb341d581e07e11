//! HTTP access for the network-backed strategies.
//!
//! Strategies talk to the network only through [`HttpClient`], so tests can
//! hand them canned pages instead of hitting itch.io.

use url::Url;

use super::error::{FetchError, Result};

const USER_AGENT: &str = concat!("itch-slideshow/", env!("CARGO_PKG_VERSION"));

/// A fetched document together with the URL it was finally served from.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after redirects.  Relative links on the page resolve against this.
    pub url: Url,
    pub body: String,
}

/// Blocking GET returning the body of a successful response.
pub trait HttpClient: Send + Sync {
    /// Non-success statuses are reported as [`FetchError::Status`].
    fn get(&self, url: &Url) -> Result<Page>;
}

/// [`HttpClient`] backed by a [`reqwest::blocking::Client`].
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &Url) -> Result<Page> {
        let resp = self.inner.get(url.clone()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let final_url = resp.url().clone();
        let body = resp.text()?;
        Ok(Page {
            url: final_url,
            body,
        })
    }
}
