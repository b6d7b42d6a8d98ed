use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use looped_core::{App, FeedDisplay, FeedVideo, QuizSession};

use super::{
    centered_rect, choice_label, choice_marker, choice_style, panel, scroll_to, BLUE, GREEN, MAUVE,
    SUBTEXT0, SURFACE1, TEAL, TEXT, YELLOW,
};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    draw_topics(frame, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    match app.feed.display() {
        FeedDisplay::Loading => draw_message(frame, columns[0], "Loading clips…", SUBTEXT0),
        FeedDisplay::Error(message) => draw_message(frame, columns[0], message, YELLOW),
        FeedDisplay::Empty => draw_message(frame, columns[0], looped_core::feed::EMPTY_FEED_MESSAGE, SUBTEXT0),
        FeedDisplay::Clips(videos) => draw_clip_list(frame, videos, app.feed.selected, columns[0]),
    }

    let detail = panel("Clip".to_string(), false);
    match app.feed.selected_video() {
        Some(video) => draw_clip_detail(frame, video, detail, columns[1]),
        None => frame.render_widget(detail, columns[1]),
    }

    if let Some(session) = &app.feed.quiz {
        draw_quiz_drawer(frame, session);
    }
}

fn draw_topics(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.feed.active_topic();
    let mut spans = vec![Span::styled(" Topics: ", Style::default().fg(SUBTEXT0))];
    for topic in app.feed.topics() {
        let style = if topic == active {
            Style::default().fg(TEAL).bg(SURFACE1).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SUBTEXT0)
        };
        spans.push(Span::styled(format!(" {topic} "), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_message(frame: &mut Frame, area: Rect, message: &str, color: ratatui::style::Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(panel("Feed".to_string(), true));
    frame.render_widget(paragraph, area);
}

fn draw_clip_list(frame: &mut Frame, videos: &[FeedVideo], selected: usize, area: Rect) {
    let items: Vec<ListItem> = videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            let is_selected = i == selected;
            let marker = if is_selected { ">" } else { " " };
            let style = if is_selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };

            let mut meta = vec![video.topic.clone()];
            if let Some(duration) = video.duration_label() {
                meta.push(duration);
            }
            let created = video.created_label();
            if !created.is_empty() {
                meta.push(created);
            }

            ListItem::new(vec![
                Line::from(Span::styled(format!("{marker} {}", video.title), style)),
                Line::from(Span::styled(format!("   {}", meta.join(" · ")), style.fg(SUBTEXT0))),
            ])
        })
        .collect();

    let list = List::new(items).block(panel(format!("Feed ({})", videos.len()), true));
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_clip_detail(frame: &mut Frame, video: &FeedVideo, block: Block<'static>, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            video.title.clone(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(video.topic.clone(), Style::default().fg(TEAL))),
        Line::from(""),
    ];
    if !video.summary.is_empty() {
        lines.push(Line::from(Span::styled(video.summary.clone(), Style::default().fg(TEXT))));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Notes",
        Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
    )));
    for point in video.note_points() {
        lines.push(Line::from(format!("  • {point}")));
    }

    if !video.filepath.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            video.filepath.clone(),
            Style::default().fg(SUBTEXT0),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: quiz me on this clip",
        Style::default().fg(BLUE),
    )));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_quiz_drawer(frame: &mut Frame, session: &QuizSession) {
    let full = frame.area();
    let area = centered_rect(full.width.saturating_sub(8).min(72), full.height.saturating_sub(4), full);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MAUVE))
        .title("Quiz");

    if session.is_loading {
        let paragraph = Paragraph::new("Generating questions…")
            .style(Style::default().fg(SUBTEXT0))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let focus = session.focus();
    let mut focus_line = 0;
    let mut lines = Vec::new();
    for (q, question) in session.payload().questions.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("{}. {}", q + 1, question.prompt),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )));
        for (c, choice) in question.choices.iter().enumerate() {
            let state = session.choice_state(q, c);
            let mut style = choice_style(state);
            if focus == (q, c) {
                style = style.bg(SURFACE1);
                focus_line = lines.len();
            }
            if !session.accepts_input(q) && state == looped_core::ChoiceState::Neutral {
                style = style.fg(SUBTEXT0);
            }
            lines.push(Line::from(Span::styled(
                format!("   {} {}) {}", choice_marker(state), choice_label(c), choice),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    let score = session.score();
    let summary = if session.all_answered() {
        let color = if score.is_perfect() { GREEN } else { YELLOW };
        Span::styled(format!("Score: {}/{}", score.correct, score.total), Style::default().fg(color))
    } else {
        Span::styled(
            format!("Answered {} of {}", answered_count(session), score.total),
            Style::default().fg(SUBTEXT0),
        )
    };

    let questions = Paragraph::new(lines)
        .scroll((scroll_to(focus_line, rows[0].height), 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(questions, rows[0]);
    frame.render_widget(Paragraph::new(Line::from(summary)), rows[1]);
}

fn answered_count(session: &QuizSession) -> usize {
    (0..session.payload().questions.len())
        .filter(|q| session.is_answered(*q))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use looped_core::{QuizPayload, AnswerPolicy};

    #[test]
    fn test_answered_count() {
        let mut session = QuizSession::new(QuizPayload::service_unavailable("v1"), AnswerPolicy::Overwrite);
        assert_eq!(answered_count(&session), 0);
        session.select(0, 1);
        assert_eq!(answered_count(&session), 1);
    }
}
