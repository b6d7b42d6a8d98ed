use chrono::Utc;
use log::debug;

use crate::demo;
use crate::error::ApiResult;
use crate::explore::ExploreView;
use crate::feed::FeedView;
use crate::model::{FeedVideo, QuizPayload, UploadResponse};
use crate::quiz::AnswerPolicy;
use crate::request::RequestToken;
use crate::store::{reduce, Action, AppState};
use crate::upload::UploadView;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Feed,
    Reels,
    Upload,
    Explore,
    Profile,
    Onboarding,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Feed,
            Screen::Reels,
            Screen::Upload,
            Screen::Explore,
            Screen::Profile,
            Screen::Onboarding,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Feed => "Feed",
            Screen::Reels => "Reels",
            Screen::Upload => "Upload",
            Screen::Explore => "Explore",
            Screen::Profile => "Profile",
            Screen::Onboarding => "Onboarding",
        }
    }

    pub fn from_name(name: &str) -> Option<Screen> {
        Screen::all()
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }

    pub fn next(&self) -> Screen {
        let all = Screen::all();
        let pos = all.iter().position(|s| s == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing a file path on the upload screen
    PathInput,
    /// Typing in the explore search box
    Search,
    Help,
}

/// Background work requested by a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadFeed { token: RequestToken },
    FetchQuiz { token: RequestToken, video_id: String },
    LoadExplore { token: RequestToken },
    Upload { token: RequestToken, path: String },
}

/// Result of background work
#[derive(Debug, Clone)]
pub enum Event {
    FeedLoaded {
        token: RequestToken,
        result: ApiResult<Vec<FeedVideo>>,
    },
    QuizLoaded {
        token: RequestToken,
        video_id: String,
        result: ApiResult<QuizPayload>,
    },
    ExploreLoaded {
        token: RequestToken,
        result: ApiResult<Vec<FeedVideo>>,
    },
    /// File read, request sent
    UploadSent { token: RequestToken },
    UploadProgress { token: RequestToken, frame: usize },
    UploadTimelineDone { token: RequestToken },
    UploadFinished {
        token: RequestToken,
        result: ApiResult<UploadResponse>,
    },
    /// The file could not be read
    UploadAborted { token: RequestToken, reason: String },
}

/// Platform-agnostic application state
pub struct App {
    pub state: AppState,
    pub feed: FeedView,
    pub upload: UploadView,
    pub explore: ExploreView,
    pub screen: Screen,
    pub mode: Mode,
    pub running: bool,

    // Onboarding picker
    pub style_selected: usize,

    // Input state
    pub input_buffer: String,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// App with demo reels; `policy` governs both the reel quiz and the drawer
    pub fn new(policy: AnswerPolicy) -> Self {
        Self {
            state: AppState::demo().with_policy(policy),
            feed: FeedView::new(policy),
            upload: UploadView::new(),
            explore: ExploreView::seeded(&Utc::now().to_rfc3339()),
            screen: Screen::Feed,
            mode: Mode::Normal,
            running: true,
            style_selected: 0,
            input_buffer: String::new(),
            status_message: None,
        }
    }

    /// Commands to run at startup: the feed and the explore merge
    pub fn start(&mut self) -> Vec<Command> {
        vec![self.refresh_feed(), self.refresh_explore()]
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatching {action:?}");
        self.state = reduce(&self.state, action);
    }

    pub fn refresh_feed(&mut self) -> Command {
        Command::LoadFeed {
            token: self.feed.begin_load(),
        }
    }

    pub fn refresh_explore(&mut self) -> Command {
        Command::LoadExplore {
            token: self.explore.begin_live_merge(),
        }
    }

    /// Open the drawer for the selected feed clip
    pub fn open_quiz(&mut self) -> Option<Command> {
        let video_id = self.feed.selected_video()?.id.clone();
        let token = self.feed.begin_quiz(&video_id);
        Some(Command::FetchQuiz { token, video_id })
    }

    /// Pick `path` for upload
    pub fn upload_file(&mut self, path: &str) -> Command {
        let name = std::path::Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());
        let token = self.upload.select_file(name);
        Command::Upload {
            token,
            path: path.to_string(),
        }
    }

    /// Apply a background result
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::FeedLoaded { token, result } => {
                self.feed.finish_load(token, result);
            }
            Event::QuizLoaded {
                token,
                video_id,
                result,
            } => {
                self.feed.finish_quiz(token, &video_id, result);
            }
            Event::ExploreLoaded { token, result } => {
                self.explore.finish_live_merge(token, result);
            }
            Event::UploadSent { token } => {
                self.upload.start_processing(token);
            }
            Event::UploadProgress { token, frame } => {
                self.upload.advance_progress(token, frame);
            }
            Event::UploadTimelineDone { token } => {
                self.upload.finish_timeline(token);
            }
            Event::UploadFinished { token, result } => {
                self.upload.finish_upload(token, result);
            }
            Event::UploadAborted { token, reason } => {
                if self.upload.fail(token, &reason) {
                    self.set_status(&format!("Could not read file: {reason}"));
                }
            }
        }
    }

    /// Answer the current reel's quiz
    pub fn answer_current_reel(&mut self, choice: usize) {
        let Some(reel) = self.state.current() else {
            return;
        };
        if reel.quiz.is_none() {
            return;
        }
        let reel_id = reel.id.clone();
        self.dispatch(Action::AnswerQuiz {
            reel_id,
            selected_index: choice,
        });
    }

    pub fn toggle_selected_style(&mut self) {
        if let Some(style) = demo::STYLES.get(self.style_selected) {
            self.dispatch(Action::ToggleStyle(style.to_string()));
        }
    }

    pub fn next_style(&mut self) {
        self.style_selected = (self.style_selected + 1) % demo::STYLES.len();
    }

    pub fn prev_style(&mut self) {
        let len = demo::STYLES.len();
        self.style_selected = (self.style_selected + len - 1) % len;
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AnswerPolicy::default())
    }
}
