//! Key handling. Mutates the [`App`] and returns background work to run.

use crossterm::event::KeyCode;

use looped_core::upload::is_accepted_file;
use looped_core::{Action, App, Command, ExploreFilter, Mode, Screen, SelectOutcome, UploadPhase};

pub fn handle_key(app: &mut App, code: KeyCode) -> Vec<Command> {
    match app.mode {
        Mode::Normal => handle_normal_mode(app, code),
        Mode::PathInput => handle_path_input(app, code),
        Mode::Search => {
            handle_search_input(app, code);
            Vec::new()
        }
        Mode::Help => {
            app.mode = Mode::Normal;
            Vec::new()
        }
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode) -> Vec<Command> {
    // The open drawer takes keys before screen switching
    if app.screen == Screen::Feed && app.feed.quiz.is_some() {
        return handle_quiz_drawer(app, code);
    }

    match code {
        KeyCode::Char('q') => {
            app.running = false;
            return Vec::new();
        }
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
            return Vec::new();
        }
        KeyCode::Tab => {
            app.screen = app.screen.next();
            return Vec::new();
        }
        KeyCode::Char(c @ '1'..='6') => {
            let idx = c as usize - '1' as usize;
            if let Some(screen) = Screen::all().get(idx) {
                app.screen = *screen;
            }
            return Vec::new();
        }
        _ => {}
    }

    match app.screen {
        Screen::Feed => handle_feed(app, code),
        Screen::Reels => {
            handle_reels(app, code);
            Vec::new()
        }
        Screen::Upload => handle_upload(app, code),
        Screen::Explore => handle_explore(app, code),
        Screen::Profile => Vec::new(),
        Screen::Onboarding => {
            handle_onboarding(app, code);
            Vec::new()
        }
    }
}

fn handle_feed(app: &mut App, code: KeyCode) -> Vec<Command> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.feed.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.feed.select_prev(),
        KeyCode::Char('l') | KeyCode::Right => app.feed.cycle_topic(true),
        KeyCode::Char('h') | KeyCode::Left => app.feed.cycle_topic(false),
        KeyCode::Char('r') => return vec![app.refresh_feed()],
        KeyCode::Enter | KeyCode::Char('z') => {
            return app.open_quiz().into_iter().collect();
        }
        _ => {}
    }
    Vec::new()
}

fn handle_quiz_drawer(app: &mut App, code: KeyCode) -> Vec<Command> {
    let Some(session) = app.feed.quiz.as_mut() else {
        return Vec::new();
    };
    match code {
        KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => app.feed.close_quiz(),
        KeyCode::Char('j') | KeyCode::Down => session.focus_next_choice(),
        KeyCode::Char('k') | KeyCode::Up => session.focus_prev_choice(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if session.is_loading {
                return Vec::new();
            }
            if session.select_focused() == SelectOutcome::Rejected {
                app.set_status("Already answered");
            }
        }
        KeyCode::Char('r') => {
            let video_id = session.video_id().to_string();
            let token = app.feed.begin_quiz(&video_id);
            return vec![Command::FetchQuiz { token, video_id }];
        }
        _ => {}
    }
    Vec::new()
}

fn handle_reels(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('n') => app.dispatch(Action::Next),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::Char('p') => app.dispatch(Action::Prev),
        KeyCode::Char(c @ 'a'..='h') => {
            let choice = c as usize - 'a' as usize;
            let valid = app
                .state
                .current()
                .and_then(|r| r.quiz.as_ref())
                .is_some_and(|q| choice < q.choices.len());
            if valid {
                app.answer_current_reel(choice);
            }
        }
        _ => {}
    }
}

fn handle_upload(app: &mut App, code: KeyCode) -> Vec<Command> {
    match code {
        KeyCode::Char('o') | KeyCode::Enter => {
            if app.upload.is_busy() {
                app.set_status("Upload in progress");
            } else {
                app.input_buffer.clear();
                app.mode = Mode::PathInput;
            }
        }
        KeyCode::Char('r') if app.upload.phase == UploadPhase::Error => {
            let path = app.input_buffer.clone();
            return start_upload(app, &path);
        }
        _ => {}
    }
    Vec::new()
}

fn handle_path_input(app: &mut App, code: KeyCode) -> Vec<Command> {
    match code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.input_buffer.clear();
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            let path = app.input_buffer.trim().to_string();
            if !path.is_empty() {
                return start_upload(app, &path);
            }
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
    Vec::new()
}

/// Start uploading `path`; the path stays in the input buffer for retry
fn start_upload(app: &mut App, path: &str) -> Vec<Command> {
    if path.is_empty() {
        return Vec::new();
    }
    if !is_accepted_file(path) {
        app.set_status("Unsupported file type (pdf, png, jpg, jpeg, ppt, pptx)");
        return Vec::new();
    }
    app.input_buffer = path.to_string();
    vec![app.upload_file(path)]
}

fn handle_explore(app: &mut App, code: KeyCode) -> Vec<Command> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.explore.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.explore.select_prev(),
        KeyCode::Char('f') => app.explore.next_focus(),
        KeyCode::Char('/') => {
            app.explore.focus = ExploreFilter::Search;
            app.mode = Mode::Search;
        }
        KeyCode::Char('l') | KeyCode::Right => cycle_explore_filter(app, true),
        KeyCode::Char('h') | KeyCode::Left => cycle_explore_filter(app, false),
        KeyCode::Char('r') => return vec![app.refresh_explore()],
        _ => {}
    }
    Vec::new()
}

fn cycle_explore_filter(app: &mut App, forward: bool) {
    match app.explore.focus {
        ExploreFilter::Subject => app.explore.cycle_subject(forward),
        ExploreFilter::Style => app.explore.cycle_style(forward),
        ExploreFilter::Search => app.mode = Mode::Search,
    }
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Backspace => app.explore.pop_search(),
        KeyCode::Char(c) => app.explore.push_search(c),
        _ => {}
    }
}

fn handle_onboarding(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.next_style(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_style(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_style(),
        KeyCode::Char('c') => app.screen = Screen::Feed,
        _ => {}
    }
}
