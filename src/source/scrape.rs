//! Direct tier: fetch the itch.io page ourselves and scrape it.
//!
//! itch.io ships several profile themes with different markup, so the game
//! nodes are located by trying a fixed list of selectors in order.  When no
//! theme matches, every link that looks like a game is used instead.

use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::error::{FetchError, Result};
use super::http::HttpClient;
use super::{Slide, SlideStrategy};

/// Selectors for known theme variants, tried in order.
const GAME_NODE_SELECTORS: &[&str] = &[
    ".game_cell",
    ".game_grid_widget .game_thumb",
    ".game_list .game",
    "[data-game_id]",
];

const TITLE_SELECTORS: &[&str] = &[".game_title", ".title", "h2", "h3"];
const DESC_SELECTORS: &[&str] = &[".game_text", ".game_description", ".sub", "p"];
const IMG_ATTRS: &[&str] = &["src", "data-lazy_src", "data-src"];

/// Only the first this-many matched nodes are turned into slides.
pub const MAX_NODES: usize = 12;

pub const PLACEHOLDER_IMG: &str = "placeholder.png";
const UNTITLED: &str = "Untitled";

pub struct ScrapeStrategy {
    client: Arc<dyn HttpClient>,
}

impl ScrapeStrategy {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl SlideStrategy for ScrapeStrategy {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn fetch(&self, source: &str) -> Result<Vec<Slide>> {
        let url = Url::parse(source)?;
        let page = self.client.get(&url)?;
        let slides = parse_page(&page.body, &page.url);
        if slides.is_empty() {
            return Err(FetchError::Empty(self.name()));
        }
        Ok(slides)
    }
}

/// Extract slides from an already-fetched page.
///
/// Pure (no I/O) so the heuristics can be tested against canned markup.
pub fn parse_page(html: &str, page_url: &Url) -> Vec<Slide> {
    let doc = Html::parse_document(html);
    let nodes = game_nodes(&doc);
    tracing::debug!(matched = nodes.len(), "scraped candidate nodes");

    nodes
        .into_iter()
        .take(MAX_NODES)
        .filter_map(|node| extract_slide(node, page_url))
        .collect()
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Nodes for the first theme selector with any match, else game-like links.
fn game_nodes(doc: &Html) -> Vec<ElementRef<'_>> {
    for css in GAME_NODE_SELECTORS {
        let Some(sel) = selector(css) else { continue };
        let nodes: Vec<_> = doc.select(&sel).collect();
        if !nodes.is_empty() {
            tracing::debug!(selector = css, "matched theme selector");
            return nodes;
        }
    }

    let Some(links) = selector("a[href]") else {
        return Vec::new();
    };
    doc.select(&links)
        .filter(|a| a.value().attr("href").is_some_and(looks_like_game_link))
        .collect()
}

fn looks_like_game_link(href: &str) -> bool {
    href.contains("itch.io") || href.contains("/game")
}

fn extract_slide(node: ElementRef<'_>, page_url: &Url) -> Option<Slide> {
    let link = find_link(node);
    let url = link
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve(page_url, href))?;

    let img = first_match(node, "img")
        .and_then(|img| IMG_ATTRS.iter().find_map(|attr| img.value().attr(attr)))
        .and_then(|src| resolve(page_url, src))
        .unwrap_or_else(|| PLACEHOLDER_IMG.to_string());

    let title = first_text(node, TITLE_SELECTORS)
        .or_else(|| {
            link.and_then(|a| a.value().attr("title"))
                .map(collapse_ws)
                .filter(|t| !t.is_empty())
        })
        .or_else(|| link.map(text_of).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| UNTITLED.to_string());

    let desc = first_text(node, DESC_SELECTORS).unwrap_or_default();

    Some(Slide {
        title,
        desc,
        img,
        url,
    })
}

/// The node itself if it is a link, else a nested link, else an ancestor link.
fn find_link(node: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if is_link(node) {
        return Some(node);
    }
    if let Some(nested) = first_match(node, "a[href]") {
        return Some(nested);
    }
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| is_link(*el))
}

fn is_link(el: ElementRef<'_>) -> bool {
    el.value().name() == "a" && el.value().attr("href").is_some()
}

fn first_match<'a>(node: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    node.select(&sel).next()
}

fn first_text(node: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|css| first_match(node, css))
        .map(text_of)
        .find(|t| !t.is_empty())
}

fn text_of(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<String>())
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve `href` against the page; failures are dropped, not propagated.
fn resolve(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match base.join(href) {
        Ok(u) => Some(u.to_string()),
        Err(e) => {
            tracing::debug!(href, error = %e, "could not resolve URL");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::FakeClient;

    fn page_url() -> Url {
        Url::parse("https://site.example/list").unwrap()
    }

    #[test]
    fn resolves_relative_image_against_page() {
        let html = r#"
            <div class="game_cell">
              <a href="https://site.example/game/a">A</a>
              <img src="img/a.png">
            </div>"#;
        let slides = parse_page(html, &page_url());
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].img, "https://site.example/img/a.png");
    }

    #[test]
    fn extracts_game_cell_fields() {
        let html = r#"
            <div class="game_cell">
              <a class="game_link" href="/my-game">
                <img data-lazy_src="https://img.itch.zone/cover.png">
              </a>
              <div class="game_title">  My   Game </div>
              <div class="game_text">A short blurb.</div>
            </div>"#;
        let slides = parse_page(html, &page_url());
        assert_eq!(
            slides,
            vec![Slide::new(
                "My Game",
                "A short blurb.",
                "https://img.itch.zone/cover.png",
                "https://site.example/my-game",
            )]
        );
    }

    #[test]
    fn first_matching_theme_selector_wins() {
        let html = r#"
            <div class="game_list">
              <div class="game"><a href="/from-list">List</a></div>
            </div>
            <div data-game_id="1"><a href="/from-data-attr">Data</a></div>"#;
        let slides = parse_page(html, &page_url());
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].url, "https://site.example/from-list");
    }

    #[test]
    fn uses_ancestor_link_when_none_nested() {
        let html = r#"
            <a href="https://leafo.itch.io/x-moon" title="X-Moon">
              <div class="game_thumb"><img src="x.png"></div>
            </a>"#;
        let html = format!(r#"<div class="game_grid_widget">{html}</div>"#);
        let slides = parse_page(&html, &page_url());
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].url, "https://leafo.itch.io/x-moon");
        assert_eq!(slides[0].title, "X-Moon");
    }

    #[test]
    fn falls_back_to_game_like_links() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://someone.itch.io/thing">Thing</a>
            <a href="/games/other">Other</a>"#;
        let slides = parse_page(html, &page_url());
        let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Thing", "Other"]);
        assert_eq!(slides[0].img, PLACEHOLDER_IMG);
        assert_eq!(slides[0].desc, "");
    }

    #[test]
    fn defaults_title_to_untitled() {
        let html = r#"<div class="game_cell"><a href="/g"><img src="g.png"></a></div>"#;
        let slides = parse_page(html, &page_url());
        assert_eq!(slides[0].title, "Untitled");
    }

    #[test]
    fn discards_nodes_without_link() {
        let html = r#"
            <div class="game_cell"><div class="game_title">No link</div></div>
            <div class="game_cell"><a href="/ok">Ok</a></div>"#;
        let slides = parse_page(html, &page_url());
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].url, "https://site.example/ok");
    }

    #[test]
    fn takes_at_most_twelve_nodes() {
        let cells: String = (0..20)
            .map(|i| format!(r#"<div class="game_cell"><a href="/g{i}">G{i}</a></div>"#))
            .collect();
        let slides = parse_page(&cells, &page_url());
        assert_eq!(slides.len(), MAX_NODES);
        assert_eq!(slides[11].title, "G11");
    }

    #[test]
    fn no_matches_yields_nothing() {
        let html = "<html><body><p>Nothing here</p><a href='/about'>About</a></body></html>";
        assert!(parse_page(html, &page_url()).is_empty());
    }

    #[test]
    fn fetch_reports_empty_page() {
        let client = FakeClient::new().with("https://site.example/list", "<p>empty</p>");
        let err = ScrapeStrategy::new(Arc::new(client))
            .fetch("https://site.example/list")
            .unwrap_err();
        assert!(matches!(err, FetchError::Empty("direct")));
    }
}
