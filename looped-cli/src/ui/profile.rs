use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use looped_core::profile::{self, BADGES, NAME, SCHEDULE, TAGLINE};
use looped_core::App;

use super::{panel, BLUE, MAUVE, SUBTEXT0, TEAL, TEXT, YELLOW};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let stats: Vec<Span> = profile::stats(&app.state)
        .into_iter()
        .flat_map(|stat| {
            [
                Span::styled(format!("{} ", stat.value), Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)),
                Span::styled(format!("{}   ", stat.label), Style::default().fg(SUBTEXT0)),
            ]
        })
        .collect();
    let header = vec![
        Line::from(Span::styled(NAME, Style::default().fg(TEXT).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(TAGLINE, Style::default().fg(SUBTEXT0))),
        Line::from(Span::styled(BADGES.join(" · "), Style::default().fg(MAUVE))),
        Line::from(stats),
    ];
    frame.render_widget(
        Paragraph::new(header).block(panel("Profile".to_string(), true)).wrap(Wrap { trim: true }),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let sessions: Vec<ListItem> = SCHEDULE
        .iter()
        .map(|session| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", session.day), Style::default().fg(BLUE)),
                    Span::styled(session.title, Style::default().fg(TEXT)),
                ]),
                Line::from(Span::styled(format!("    {}", session.description), Style::default().fg(SUBTEXT0))),
                Line::from(Span::styled(format!("    {}", session.tags.join(", ")), Style::default().fg(TEAL))),
            ])
        })
        .collect();
    frame.render_widget(List::new(sessions).block(panel("This week".to_string(), false)), columns[0]);

    let saved: Vec<ListItem> = profile::saved_clips()
        .iter()
        .map(|meta| {
            ListItem::new(vec![
                Line::from(Span::styled(meta.title, Style::default().fg(TEXT))),
                Line::from(Span::styled(
                    format!("   {} · {}", meta.subject, meta.duration),
                    Style::default().fg(SUBTEXT0),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(saved).block(panel("Saved clips".to_string(), false)), columns[1]);
}
