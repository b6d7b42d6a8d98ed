//! Terminal UI rendering

mod explore;
mod feed;
mod onboarding;
mod profile;
mod reels;
mod upload;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use looped_core::{App, ChoiceState, Mode, Screen};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const RED: Color = Color::Rgb(243, 139, 168);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const TEAL: Color = Color::Rgb(148, 226, 213);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Screen
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_tab_bar(frame, app, chunks[0]);
    match app.screen {
        Screen::Feed => feed::draw(frame, app, chunks[1]),
        Screen::Reels => reels::draw(frame, app, chunks[1]),
        Screen::Upload => upload::draw(frame, app, chunks[1]),
        Screen::Explore => explore::draw(frame, app, chunks[1]),
        Screen::Profile => profile::draw(frame, app, chunks[1]),
        Screen::Onboarding => onboarding::draw(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);

    match app.mode {
        Mode::PathInput => draw_path_input(frame, app),
        Mode::Help => draw_help(frame),
        _ => {}
    }
}

fn draw_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Looped ",
        Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
    )];
    for (i, screen) in Screen::all().iter().enumerate() {
        let style = if *screen == app.screen {
            Style::default().fg(TEXT).bg(SURFACE1).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SUBTEXT0)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, screen.as_str()), style));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(SURFACE0));
    frame.render_widget(bar, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::PathInput => "PATH",
        Mode::Search => "SEARCH",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");
    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { screen_hint(app) } else { status },
    );

    let status_bar = Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));
    frame.render_widget(status_bar, area);
}

fn screen_hint(app: &App) -> &'static str {
    match app.screen {
        Screen::Feed if app.feed.quiz.is_some() => "j/k choose | Enter answer | r regenerate | Esc close",
        Screen::Feed => "j/k select | h/l topic | Enter quiz | r refresh | ? help",
        Screen::Reels => "j/k swipe | a-h answer | ? help",
        Screen::Upload => "o pick file | r retry | ? help",
        Screen::Explore => "j/k select | f filter | h/l change | / search | ? help",
        Screen::Profile => "Tab next screen | ? help",
        Screen::Onboarding => "j/k move | Space toggle | c continue",
    }
}

fn draw_path_input(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title("File to upload (pdf, png, jpg, ppt)");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(format!("{}_", app.input_buffer)).style(Style::default().fg(TEXT));
    frame.render_widget(input, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(62, 24, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        heading("Global"),
        Line::from("  1-6/Tab  Switch screen"),
        Line::from("  q        Quit"),
        Line::from(""),
        heading("Feed"),
        Line::from("  j/k      Select clip"),
        Line::from("  h/l      Change topic"),
        Line::from("  Enter    Open quiz drawer"),
        Line::from("  r        Refresh (drawer: regenerate quiz)"),
        Line::from(""),
        heading("Reels"),
        Line::from("  j/k      Next/previous reel"),
        Line::from("  a-h      Answer the reel quiz"),
        Line::from(""),
        heading("Upload / Explore"),
        Line::from("  o        Pick a file to upload"),
        Line::from("  f, h/l   Focus and change a filter"),
        Line::from("  /        Search titles"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

/// Bordered panel with the focused/unfocused border color
fn panel(title: String, focused: bool) -> Block<'static> {
    let border = if focused { BLUE } else { SUBTEXT0 };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

/// Style for a quiz choice once its question has an answer
fn choice_style(state: ChoiceState) -> Style {
    match state {
        ChoiceState::Neutral => Style::default().fg(TEXT),
        ChoiceState::PickedCorrect => Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        ChoiceState::PickedWrong => Style::default().fg(RED).add_modifier(Modifier::CROSSED_OUT),
        ChoiceState::RevealCorrect => Style::default().fg(GREEN),
    }
}

fn choice_marker(state: ChoiceState) -> &'static str {
    match state {
        ChoiceState::Neutral => " ",
        ChoiceState::PickedCorrect | ChoiceState::RevealCorrect => "✓",
        ChoiceState::PickedWrong => "✗",
    }
}

/// Letter for the first 26 choices, 1-based number past that
fn choice_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'a' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Scroll offset that keeps `line` inside a viewport of `height` rows
fn scroll_to(line: usize, height: u16) -> u16 {
    let height = height as usize;
    let offset = if height > 0 && line >= height { line - height + 1 } else { 0 };
    u16::try_from(offset).unwrap_or(u16::MAX)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use looped_core::feed::EMPTY_FEED_MESSAGE;
    use looped_core::{AnswerPolicy, ApiError, Command, Event};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded(app: &mut App, result: Result<Vec<looped_core::FeedVideo>, ApiError>) {
        let Command::LoadFeed { token } = app.refresh_feed() else {
            unreachable!()
        };
        app.apply(Event::FeedLoaded { token, result });
    }

    #[test]
    fn test_feed_states_render() {
        let mut app = App::new(AnswerPolicy::LockFirst);
        assert!(render(&app).contains("Loading clips"));

        loaded(&mut app, Ok(Vec::new()));
        assert!(render(&app).contains(&EMPTY_FEED_MESSAGE[..20]));

        loaded(&mut app, Err(ApiError::network("fetch feed", "refused")));
        assert!(render(&app).contains("couldn’t fetch the feed"));
    }

    #[test]
    fn test_every_screen_renders() {
        let mut app = App::new(AnswerPolicy::LockFirst);
        for screen in Screen::all() {
            app.screen = *screen;
            let screen_text = render(&app);
            assert!(screen_text.contains(screen.as_str()));
        }
    }

    #[test]
    fn test_choice_labels() {
        assert_eq!(choice_label(0), "a");
        assert_eq!(choice_label(7), "h");
        assert_eq!(choice_label(25), "z");
        assert_eq!(choice_label(26), "27");
        assert_eq!(choice_label(300), "301");
    }

    #[test]
    fn test_scroll_keeps_line_visible() {
        assert_eq!(scroll_to(3, 10), 0);
        assert_eq!(scroll_to(10, 10), 1);
        assert_eq!(scroll_to(40, 10), 31);
        assert_eq!(scroll_to(5, 0), 0);
    }

    #[test]
    fn test_long_feed_scrolls_to_selection() {
        let mut app = App::new(AnswerPolicy::LockFirst);
        let videos = (0..20)
            .map(|i| looped_core::FeedVideo {
                id: format!("v{i}"),
                title: format!("Lecture {i:02}"),
                topic: "Physics".into(),
                summary: String::new(),
                script: String::new(),
                key_points: Vec::new(),
                filepath: String::new(),
                duration: 30.0,
                thumbnail: None,
                created_at: String::new(),
            })
            .collect();
        loaded(&mut app, Ok(videos));
        assert!(render(&app).contains("Lecture 00"));

        for _ in 0..19 {
            app.feed.select_next();
        }
        let screen = render(&app);
        assert!(screen.contains("Lecture 19"));
        assert!(!screen.contains("Lecture 00"));
    }

    #[test]
    fn test_long_quiz_keeps_focus_and_score_visible() {
        use looped_core::{QuizPayload, QuizQuestion};

        let mut app = App::new(AnswerPolicy::LockFirst);
        let questions = (0..10)
            .map(|i| QuizQuestion::new(&format!("Question {i:02}?"), &["w", "x", "y", "z"], 0))
            .collect();
        let mut session = looped_core::QuizSession::new(
            QuizPayload {
                video_id: "v1".into(),
                questions,
            },
            AnswerPolicy::LockFirst,
        );
        for _ in 0..9 {
            session.select_focused();
        }
        app.feed.quiz = Some(session);

        let screen = render(&app);
        assert!(screen.contains("Question 09?"));
        assert!(screen.contains("Answered 9 of 10"));

        app.feed.quiz.as_mut().unwrap().select_focused();
        assert!(render(&app).contains("Score: 10/10"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = App::new(AnswerPolicy::LockFirst);
        app.mode = Mode::Help;
        assert!(render(&app).contains("press any key to close"));
    }
}
