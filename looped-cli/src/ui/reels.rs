use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use looped_core::quiz::choice_state;
use looped_core::App;

use super::{choice_label, choice_marker, choice_style, panel, GREEN, MAUVE, RED, SUBTEXT0, TEAL, TEXT};

pub(super) fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let Some(reel) = state.current() else {
        let paragraph = Paragraph::new("No reels")
            .style(Style::default().fg(SUBTEXT0))
            .block(panel("Reels".to_string(), true));
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let mut header = vec![Line::from(Span::styled(
        reel.title.clone(),
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtitle) = &reel.subtitle {
        header.push(Line::from(Span::styled(subtitle.clone(), Style::default().fg(TEAL))));
    }
    if let Some(url) = &reel.video_url {
        header.push(Line::from(Span::styled(url.clone(), Style::default().fg(SUBTEXT0))));
    }
    let title = format!("Reel {}/{}", state.current_index + 1, state.reels.len());
    frame.render_widget(
        Paragraph::new(header).block(panel(title, true)).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let block = panel("Quick check".to_string(), false);
    let Some(question) = &reel.quiz else {
        let paragraph = Paragraph::new("No quiz on this reel. j/k to keep swiping.")
            .style(Style::default().fg(SUBTEXT0))
            .block(block);
        frame.render_widget(paragraph, chunks[1]);
        return;
    };

    let answer = state.answer_for(&reel.id);
    let selected = answer.map(|a| a.selected_index);
    let mut lines = vec![
        Line::from(Span::styled(
            question.prompt.clone(),
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, choice) in question.choices.iter().enumerate() {
        let state = choice_state(question, selected, i);
        lines.push(Line::from(Span::styled(
            format!("  {} {}) {}", choice_marker(state), choice_label(i), choice),
            choice_style(state),
        )));
    }
    lines.push(Line::from(""));
    lines.push(match answer {
        Some(a) if a.correct => Line::from(Span::styled("Correct! n: next video", Style::default().fg(GREEN))),
        Some(_) => Line::from(Span::styled("Not quite. n: next video", Style::default().fg(RED))),
        None => Line::from(Span::styled("Press a letter to answer", Style::default().fg(SUBTEXT0))),
    });

    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
}
