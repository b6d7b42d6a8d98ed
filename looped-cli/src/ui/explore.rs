use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use looped_core::{App, ExploreFilter, Mode};

use super::{panel, MAUVE, SUBTEXT0, SURFACE1, TEAL, TEXT};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let explore = &app.explore;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let filter = |label: &str, value: &str, which: ExploreFilter| {
        let focused = explore.focus == which;
        let style = if focused {
            Style::default().fg(MAUVE).bg(SURFACE1).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SUBTEXT0)
        };
        Span::styled(format!(" {label}: {value} "), style)
    };
    let cursor = if app.mode == Mode::Search { "_" } else { "" };
    let search = format!("{}{cursor}", explore.search);
    let filters = Line::from(vec![
        filter("Subject", &explore.subject, ExploreFilter::Subject),
        Span::raw("  "),
        filter("Style", &explore.style, ExploreFilter::Style),
        Span::raw("  "),
        filter("Search", &search, ExploreFilter::Search),
    ]);
    frame.render_widget(
        Paragraph::new(filters).block(panel("Filters".to_string(), false)),
        chunks[0],
    );

    let videos = explore.filtered();
    if videos.is_empty() {
        let paragraph = Paragraph::new("Nothing matches these filters.")
            .style(Style::default().fg(SUBTEXT0))
            .block(panel("Explore".to_string(), true));
        frame.render_widget(paragraph, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = videos
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == explore.selected;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };
            let style_label = item.creator_style.as_deref().unwrap_or("-");
            let duration = item.video.duration_label().unwrap_or_default();
            ListItem::new(vec![
                Line::from(Span::styled(format!("{marker} {}", item.video.title), style)),
                Line::from(Span::styled(
                    format!("   {} · {style_label} · {duration}", item.video.topic),
                    style.fg(TEAL),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(panel(format!("Explore ({})", videos.len()), true));
    let mut state = ListState::default().with_selected(Some(explore.selected));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
