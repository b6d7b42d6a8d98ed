//! Upload screen state machine.
//!
//! ```text
//! Idle -> Uploading -> Processing -> Completed
//!             \            \
//!              `-> Error <--'
//! ```
//!
//! While processing, a narration walks through [`PROGRESS_FRAMES`]. The screen
//! only completes once both the narration and the upload response are in.

use log::{info, warn};

use crate::error::ApiResult;
use crate::model::{FeedVideo, UploadResponse};
use crate::request::{RequestGenerations, RequestToken};

/// Narration shown while the service generates clips, one per interval
pub const PROGRESS_FRAMES: [&str; 5] = [
    "Reading chapters and parsing structure…",
    "Breaking content into learning beats…",
    "Drafting the 30-second voiceover script…",
    "Syncing captions and overlays…",
    "Almost there — final polish…",
];

pub const UPLOADING_MESSAGE: &str = "Uploading textbook…";
pub const PROCESSING_PLACEHOLDER: &str = "Generating study clips…";
pub const UPLOAD_ERROR_MESSAGE: &str = "Upload failed — please try again.";

/// File extensions the picker offers
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "png", "jpg", "jpeg", "ppt", "pptx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading,
    Processing,
    Completed,
    Error,
}

/// Mark shown next to a status row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMark {
    Done,
    Active,
    Pending,
}

impl StatusMark {
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusMark::Done => "✓",
            StatusMark::Active => "…",
            StatusMark::Pending => "—",
        }
    }

    fn from_flags(active: bool, done: bool) -> Self {
        if done {
            StatusMark::Done
        } else if active {
            StatusMark::Active
        } else {
            StatusMark::Pending
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadView {
    pub phase: UploadPhase,
    pub file_name: Option<String>,
    pub progress_message: String,
    pub generated: Vec<FeedVideo>,
    pub job_id: Option<String>,
    requests: RequestGenerations,
    timeline_done: bool,
    pending: Option<UploadResponse>,
}

impl UploadView {
    pub fn new() -> Self {
        Self {
            phase: UploadPhase::Idle,
            file_name: None,
            progress_message: String::new(),
            generated: Vec::new(),
            job_id: None,
            requests: RequestGenerations::new(),
            timeline_done: false,
            pending: None,
        }
    }

    /// A file was picked; restarts the machine at `Uploading`
    pub fn select_file(&mut self, file_name: impl Into<String>) -> RequestToken {
        self.file_name = Some(file_name.into());
        self.phase = UploadPhase::Uploading;
        self.generated.clear();
        self.job_id = None;
        self.progress_message = UPLOADING_MESSAGE.to_string();
        self.timeline_done = false;
        self.pending = None;
        self.requests.issue()
    }

    /// The request is in flight; narration starts
    pub fn start_processing(&mut self, token: RequestToken) -> bool {
        if !self.requests.is_current(token) || self.phase != UploadPhase::Uploading {
            return false;
        }
        self.phase = UploadPhase::Processing;
        true
    }

    /// Show narration frame `frame`
    pub fn advance_progress(&mut self, token: RequestToken, frame: usize) -> bool {
        if !self.requests.is_current(token) || self.phase != UploadPhase::Processing {
            return false;
        }
        match PROGRESS_FRAMES.get(frame) {
            Some(message) => {
                self.progress_message = message.to_string();
                true
            }
            None => false,
        }
    }

    /// The narration has shown every frame
    pub fn finish_timeline(&mut self, token: RequestToken) -> bool {
        if !self.requests.is_current(token) || self.phase != UploadPhase::Processing {
            return false;
        }
        self.timeline_done = true;
        if let Some(response) = self.pending.take() {
            self.complete(token, response);
        }
        true
    }

    /// Apply the upload response
    pub fn finish_upload(&mut self, token: RequestToken, result: ApiResult<UploadResponse>) -> bool {
        if !self.requests.is_current(token) {
            info!("Dropping stale upload result #{}", token.generation());
            return false;
        }
        match result {
            Ok(response) if self.timeline_done => self.complete(token, response),
            Ok(response) => self.pending = Some(response),
            Err(e) => {
                self.fail(token, &e.to_string());
            }
        }
        true
    }

    /// Move to `Error` (request failure or unreadable file)
    pub fn fail(&mut self, token: RequestToken, reason: &str) -> bool {
        if !self.requests.settle(token) {
            return false;
        }
        warn!("Upload failed: {reason}");
        self.phase = UploadPhase::Error;
        self.pending = None;
        true
    }

    /// Text for the spinner row while processing
    pub fn processing_message(&self) -> &str {
        if self.progress_message.is_empty() {
            PROCESSING_PLACEHOLDER
        } else {
            &self.progress_message
        }
    }

    /// Upload, Parsing and Rendering rows
    pub fn status_rows(&self) -> [(&'static str, StatusMark); 3] {
        let phase = self.phase;
        let started = phase != UploadPhase::Idle;
        let completed = phase == UploadPhase::Completed;
        [
            (
                "Upload",
                StatusMark::from_flags(started, started && phase != UploadPhase::Error),
            ),
            (
                "Parsing",
                StatusMark::from_flags(phase == UploadPhase::Processing || completed, completed),
            ),
            ("Rendering", StatusMark::from_flags(completed, completed)),
        ]
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading | UploadPhase::Processing)
    }

    fn complete(&mut self, token: RequestToken, response: UploadResponse) {
        self.requests.settle(token);
        info!(
            "Upload job {} finished with {} clips",
            response.job_id,
            response.videos.len()
        );
        self.job_id = Some(response.job_id);
        self.generated = response.videos;
        self.phase = UploadPhase::Completed;
    }
}

impl Default for UploadView {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `file_name` has an extension the picker accepts
pub fn is_accepted_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
