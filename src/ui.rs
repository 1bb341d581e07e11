//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a two-row split: the slide panel on top and a one-line
//!   status bar (or the URL prompt) at the bottom.
//! * The slide panel's interior is stored on [`App`] every frame so mouse
//!   hover can be hit-tested against it.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::view::TerminalView;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App<TerminalView>, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    app.display_area = panel_block(app).inner(main_area);
    draw_slide(app, frame, main_area);

    match app.prompt.contents() {
        Some(text) => draw_prompt(text, frame, status_area),
        None => draw_status_bar(app, frame, status_area),
    }
}

/// Bordered frame titled with the page the visible slides came from.
fn panel_block(app: &App<TerminalView>) -> Block<'static> {
    let source = app
        .state
        .shown_source
        .as_deref()
        .unwrap_or(&app.state.source_url);
    Block::default()
        .title(format!(" {source} "))
        .borders(Borders::ALL)
        .border_style(if app.is_hovered() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        })
}

/// Render the current slide into the title, description, image and link slots.
fn draw_slide(app: &App<TerminalView>, frame: &mut Frame, area: Rect) {
    let block = panel_block(app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(slide) = app.view.slide() else {
        frame.render_widget(
            Paragraph::new("No slides yet").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let [title_area, desc_area, img_area, link_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let total = slide.title.chars().count();
    let shown = app
        .view
        .reveal()
        .map_or(total, |r| r.visible_chars(Instant::now(), total));
    let title: String = slide.title.chars().take(shown).collect();
    frame.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        title_area,
    );

    frame.render_widget(
        Paragraph::new(slide.desc.as_str()).wrap(Wrap { trim: true }),
        desc_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Image ", Style::default().fg(Color::DarkGray)),
            Span::raw(slide.img.as_str()),
        ])),
        img_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Link  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                slide.url.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
        ])),
        link_area,
    );
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App<TerminalView>, frame: &mut Frame, area: Rect) {
    let position = match app.state.slides.len() {
        0 => "0/0".to_string(),
        n => format!("{}/{n}", app.state.current_index + 1),
    };
    let mode = if app.is_paused() {
        "paused"
    } else if app.is_hovered() {
        "hover"
    } else {
        "auto"
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(position, Style::default().fg(Color::Green)),
        Span::raw(" "),
        Span::styled(mode, Style::default().fg(Color::DarkGray)),
        Span::raw("  q: quit  ←/→: slide  space: pause  r: reload  F2: source"),
    ]));
    frame.render_widget(status, area);
}

fn draw_prompt(text: &str, frame: &mut Frame, area: Rect) {
    let prompt = Paragraph::new(Line::from(vec![
        Span::styled(" Source URL: ", Style::default().fg(Color::Yellow)),
        Span::raw(text),
        Span::styled("█", Style::default().fg(Color::White)),
    ]));
    frame.render_widget(prompt, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
