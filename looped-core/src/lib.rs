//! Looped Core - Platform-agnostic client state for the Looped study reels app
//!
//! This crate holds the data model, the reel store and its reducers, quiz
//! scoring and the per-screen view state. It performs no I/O; the CLI drives
//! network calls and feeds their results back in.

pub mod app;
pub mod demo;
pub mod error;
pub mod explore;
pub mod feed;
pub mod model;
pub mod profile;
pub mod quiz;
pub mod request;
pub mod store;
pub mod upload;

pub use app::{App, Command, Event, Mode, Screen};
pub use error::{ApiError, ApiResult};
pub use explore::{ExploreFilter, ExploreVideo, ExploreView};
pub use feed::{FeedDisplay, FeedStatus, FeedView};
pub use model::{FeedVideo, QuizAnswer, QuizPayload, QuizQuestion, ReelItem, UploadResponse, VideoMeta};
pub use quiz::{AnswerPolicy, ChoiceState, QuizSession, Score, SelectOutcome};
pub use request::{RequestGenerations, RequestToken};
pub use store::{reduce, Action, AppState};
pub use upload::{StatusMark, UploadPhase, UploadView};
