use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use looped_core::demo::STYLES;
use looped_core::App;

use super::{panel, GREEN, MAUVE, SUBTEXT0, SURFACE1, TEXT};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let intro = vec![
        Line::from(Span::styled(
            "How do you like to learn?",
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Pick the creator styles you want more of, then press c.",
            Style::default().fg(SUBTEXT0),
        )),
    ];
    frame.render_widget(
        Paragraph::new(intro).block(panel("Onboarding".to_string(), false)).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let items: Vec<ListItem> = STYLES
        .iter()
        .enumerate()
        .map(|(i, style_name)| {
            let selected = i == app.style_selected;
            let marker = if selected { ">" } else { " " };
            let checked = app.state.has_style(style_name);
            let check = if checked { "[x]" } else { "[ ]" };
            let mut style = if checked {
                Style::default().fg(GREEN)
            } else {
                Style::default().fg(TEXT)
            };
            if selected {
                style = style.bg(SURFACE1);
            }
            ListItem::new(format!("{marker} {check} {style_name}")).style(style)
        })
        .collect();

    let title = format!("Creator styles ({} picked)", app.state.preferred_styles.len());
    frame.render_widget(List::new(items).block(panel(title, true)), chunks[1]);
}
