//! Bundled demo content used before (or instead of) the live service.

use crate::model::{FeedVideo, QuizQuestion, ReelItem, VideoMeta};

/// Learning styles offered during onboarding
pub const STYLES: [&str; 4] = ["Explainer", "Whiteboard", "Animated", "Show & tell"];

/// Duration used when a demo duration label cannot be parsed
pub const DEFAULT_DURATION_SECS: f64 = 30.0;

/// Reels the store starts with
pub fn reels() -> Vec<ReelItem> {
    vec![
        ReelItem::new("1", "What is a Derivative?")
            .with_subtitle("Intuition with slopes")
            .with_thumbnail("/window.svg"),
        ReelItem::new("2", "Chain Rule in 30s")
            .with_subtitle("Compose and differentiate")
            .with_thumbnail("/globe.svg")
            .with_quiz(QuizQuestion::new(
                "d/dx of (3x^2) is?",
                &["3x", "6x", "x^3", "9x^2"],
                1,
            )),
        ReelItem::new("3", "Limits: Squeeze Theorem")
            .with_subtitle("Visual proof sketch")
            .with_thumbnail("/file.svg"),
    ]
}

/// The demo library shown in explore and the profile's saved clips
pub fn library() -> &'static [VideoMeta] {
    const LIBRARY: &[VideoMeta] = &[
        VideoMeta {
            id: "v1",
            title: "Newton’s Laws Explained in 30s",
            subject: "Physics",
            creator_style: "Explainer",
            duration: "0:30",
            mp4_url: Some("https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4"),
        },
        VideoMeta {
            id: "v2",
            title: "Derivatives: Intuition + Slopes",
            subject: "Calculus",
            creator_style: "Whiteboard",
            duration: "0:28",
            mp4_url: Some("https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4"),
        },
        VideoMeta {
            id: "v3",
            title: "Chain Rule in 30s",
            subject: "Calculus",
            creator_style: "Animated",
            duration: "0:32",
            mp4_url: Some("https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4"),
        },
        VideoMeta {
            id: "v4",
            title: "Photosynthesis Visualized",
            subject: "Biology",
            creator_style: "Show & tell",
            duration: "0:27",
            mp4_url: Some("https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4"),
        },
        VideoMeta {
            id: "v5",
            title: "Supply & Demand in 40s",
            subject: "Economics",
            creator_style: "Explainer",
            duration: "0:40",
            mp4_url: Some("https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"),
        },
    ];
    LIBRARY
}

/// Parse an "m:ss" label into seconds
pub fn parse_duration(label: &str) -> f64 {
    let Some((minutes, seconds)) = label.split_once(':') else {
        return DEFAULT_DURATION_SECS;
    };
    match (minutes.trim().parse::<u32>(), seconds.trim().parse::<u32>()) {
        (Ok(m), Ok(s)) => f64::from(m * 60 + s),
        _ => DEFAULT_DURATION_SECS,
    }
}

/// Convert a library entry into the feed shape
pub fn to_feed_video(meta: &VideoMeta, created_at: &str) -> FeedVideo {
    FeedVideo {
        id: format!("demo-{}", meta.id),
        title: meta.title.to_string(),
        topic: meta.subject.to_string(),
        summary: format!(
            "Creator style: {}. Duration {}.",
            meta.creator_style, meta.duration
        ),
        script: String::new(),
        key_points: Vec::new(),
        filepath: meta.mp4_url.unwrap_or_default().to_string(),
        duration: parse_duration(meta.duration),
        thumbnail: None,
        created_at: created_at.to_string(),
    }
}
