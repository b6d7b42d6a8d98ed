//! Feed screen state: the fetched clip list, topic filter, selection and the
//! quiz drawer.

use log::{info, warn};

use crate::error::ApiResult;
use crate::model::{FeedVideo, QuizPayload};
use crate::quiz::{AnswerPolicy, QuizSession};
use crate::request::{RequestGenerations, RequestToken};
use crate::store::clamp_index;

/// Topic entry that disables filtering
pub const ALL_TOPICS: &str = "All";

/// Message shown when the feed cannot be fetched
pub const FEED_ERROR_MESSAGE: &str = "We couldn’t fetch the feed. Try again in a bit.";

/// Message shown when the current topic has no clips
pub const EMPTY_FEED_MESSAGE: &str =
    "No clips in this topic yet. Try another filter or upload new material to generate ones instantly.";

/// Loading state of the clip list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Loading,
    Ready,
    Failed(String),
}

/// What the clip area should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedDisplay<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Clips(&'a [FeedVideo]),
}

#[derive(Debug, Clone)]
pub struct FeedView {
    pub status: FeedStatus,
    videos: Vec<FeedVideo>,
    active_topic: String,
    /// Index into `filtered()`
    pub selected: usize,
    pub quiz: Option<QuizSession>,
    policy: AnswerPolicy,
    feed_requests: RequestGenerations,
    quiz_requests: RequestGenerations,
    // Cached result of filtering by `active_topic`
    filtered: Vec<FeedVideo>,
}

impl FeedView {
    pub fn new(policy: AnswerPolicy) -> Self {
        Self {
            status: FeedStatus::Loading,
            videos: Vec::new(),
            active_topic: ALL_TOPICS.to_string(),
            selected: 0,
            quiz: None,
            policy,
            feed_requests: RequestGenerations::new(),
            quiz_requests: RequestGenerations::new(),
            filtered: Vec::new(),
        }
    }

    pub fn videos(&self) -> &[FeedVideo] {
        &self.videos
    }

    pub fn active_topic(&self) -> &str {
        &self.active_topic
    }

    /// Start a (re)load of the feed
    pub fn begin_load(&mut self) -> RequestToken {
        self.status = FeedStatus::Loading;
        self.feed_requests.issue()
    }

    /// Apply a feed result; returns false when the result was superseded
    pub fn finish_load(&mut self, token: RequestToken, result: ApiResult<Vec<FeedVideo>>) -> bool {
        if !self.feed_requests.settle(token) {
            info!("Dropping stale feed result #{}", token.generation());
            return false;
        }
        match result {
            Ok(videos) => {
                info!("Feed loaded with {} clips", videos.len());
                self.videos = videos;
                self.status = FeedStatus::Ready;
                if self.active_topic != ALL_TOPICS && !self.videos.iter().any(|v| v.topic == self.active_topic) {
                    self.active_topic = ALL_TOPICS.to_string();
                }
                self.refilter();
            }
            Err(e) => {
                warn!("Feed load failed: {e}");
                self.status = FeedStatus::Failed(FEED_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// "All" followed by distinct topics in first-seen order
    pub fn topics(&self) -> Vec<&str> {
        let mut topics = vec![ALL_TOPICS];
        for video in &self.videos {
            if !topics.contains(&video.topic.as_str()) {
                topics.push(&video.topic);
            }
        }
        topics
    }

    pub fn set_topic(&mut self, topic: &str) {
        self.active_topic = topic.to_string();
        self.refilter();
    }

    /// Move the topic filter forward (or backward) through `topics()`
    pub fn cycle_topic(&mut self, forward: bool) {
        let next = {
            let topics = self.topics();
            let pos = topics.iter().position(|t| *t == self.active_topic).unwrap_or(0);
            let len = topics.len();
            let idx = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
            topics[idx].to_string()
        };
        self.set_topic(&next);
    }

    pub fn filtered(&self) -> &[FeedVideo] {
        &self.filtered
    }

    pub fn display(&self) -> FeedDisplay<'_> {
        match &self.status {
            FeedStatus::Loading => FeedDisplay::Loading,
            FeedStatus::Failed(msg) => FeedDisplay::Error(msg),
            FeedStatus::Ready if self.filtered.is_empty() => FeedDisplay::Empty,
            FeedStatus::Ready => FeedDisplay::Clips(&self.filtered),
        }
    }

    pub fn selected_video(&self) -> Option<&FeedVideo> {
        self.filtered.get(self.selected)
    }

    pub fn select(&mut self, index: isize) {
        self.selected = clamp_index(index, self.filtered.len());
    }

    pub fn select_next(&mut self) {
        self.select(self.selected as isize + 1);
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected as isize - 1);
    }

    /// Open the drawer for `video_id` in loading state
    pub fn begin_quiz(&mut self, video_id: &str) -> RequestToken {
        match self.quiz.as_mut().filter(|s| s.video_id() == video_id) {
            Some(session) => session.is_loading = true,
            None => self.quiz = Some(QuizSession::loading(video_id, self.policy)),
        }
        self.quiz_requests.issue()
    }

    /// Apply a quiz result; failures and malformed payloads show the fallback question
    pub fn finish_quiz(&mut self, token: RequestToken, video_id: &str, result: ApiResult<QuizPayload>) -> bool {
        if !self.quiz_requests.settle(token) {
            info!("Dropping stale quiz result for {video_id}");
            return false;
        }
        let payload = match result.map(|p| p.validate().map(|_| p)) {
            Ok(Ok(payload)) => payload,
            Ok(Err(e)) => {
                warn!("Quiz for {video_id} is malformed: {e}");
                QuizPayload::service_unavailable(video_id)
            }
            Err(e) => {
                warn!("Quiz for {video_id} failed: {e}");
                QuizPayload::service_unavailable(video_id)
            }
        };
        // A fresh payload starts a fresh answer sheet, even for the same video
        self.quiz = Some(QuizSession::new(payload, self.policy));
        true
    }

    /// Close the drawer and forget any outstanding quiz request
    pub fn close_quiz(&mut self) {
        self.quiz = None;
        self.quiz_requests.cancel();
    }

    fn refilter(&mut self) {
        self.filtered = if self.active_topic == ALL_TOPICS {
            self.videos.clone()
        } else {
            self.videos
                .iter()
                .filter(|v| v.topic == self.active_topic)
                .cloned()
                .collect()
        };
        self.selected = clamp_index(self.selected as isize, self.filtered.len());
    }
}
