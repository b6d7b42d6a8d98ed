pub mod question;
pub mod reel;
pub mod video;

pub use question::{QuizPayload, QuizQuestion};
pub use reel::{QuizAnswer, ReelItem};
pub use video::{FeedVideo, UploadResponse, VideoMeta};
