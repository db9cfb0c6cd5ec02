//! Board rendering.

use keyscope_core::engine::Engine;
use keyscope_core::layout::Section;
use keyscope_core::types::{KeyIdentity, TestState};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use std::collections::HashSet;

/// Per-frame view data that lives outside the engine.
pub struct ViewState<'a> {
    pub status: &'a str,
    pub unknown_text: Option<&'a str>,
    /// Keys mid reset sweep, drawn highlighted until their step elapses.
    pub sweeping: &'a HashSet<KeyIdentity>,
}

const SECTIONS: &[(Section, &str)] = &[
    (Section::Main, "Main"),
    (Section::TopOther, "System"),
    (Section::Nav, "Navigation"),
    (Section::NumPad, "Numeric pad"),
];

pub fn render(frame: &mut Frame, engine: &Engine, view: &ViewState) {
    let [header, board, indicator, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = if engine.is_complete() {
        Line::from(Span::styled(
            " ALL KEYS TESTED ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        let tested = engine
            .entries()
            .iter()
            .filter(|e| e.state != TestState::Untested)
            .count();
        Line::from(format!(
            "keyscope  [{:?}]  {tested}/{} keys tested",
            engine.platform(),
            engine.entries().len(),
        ))
    };
    frame.render_widget(Paragraph::new(title), header);

    let full = engine.full_layout_shown();
    let mut lines = Vec::new();
    for &(section, name) in SECTIONS {
        let keys: Vec<Span> = engine
            .entries()
            .iter()
            .filter(|e| e.section == section && (e.compact_visible || full))
            .flat_map(|e| {
                let sweeping = view.sweeping.contains(&e.identity);
                [
                    Span::styled(format!(" {} ", e.label), key_style(e.state, sweeping)),
                    Span::raw(" "),
                ]
            })
            .collect();
        if keys.is_empty() {
            continue;
        }
        if full {
            lines.push(Line::from(Span::styled(
                name,
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
        }
        lines.push(Line::from(keys));
        lines.push(Line::default());
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), board);

    let unknown = match view.unknown_text {
        Some(text) => Line::from(vec![
            Span::raw("Unrecognized key: "),
            Span::styled(
                format!(" {text} "),
                key_style(engine.unknown_indicator_state(), false),
            ),
        ]),
        None => Line::from(view.status),
    };
    frame.render_widget(Paragraph::new(unknown), indicator);

    frame.render_widget(
        Paragraph::new("Ctrl-R reset   Ctrl-F full layout   Ctrl-Q quit")
            .style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}

fn key_style(state: TestState, sweeping: bool) -> Style {
    if sweeping {
        return Style::default().fg(Color::Black).bg(Color::Cyan);
    }
    match state {
        TestState::Untested => Style::default().fg(Color::DarkGray),
        TestState::RecentlyPressed => Style::default().fg(Color::Black).bg(Color::Yellow),
        TestState::Confirmed => Style::default().fg(Color::Black).bg(Color::Green),
    }
}
