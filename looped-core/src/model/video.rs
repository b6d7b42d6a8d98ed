use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated study clip as served by the feed and upload endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedVideo {
    pub id: String,
    pub title: String,
    pub topic: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub filepath: String,
    /// Length in seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl FeedVideo {
    /// Parse `created_at` as an RFC 3339 timestamp
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Short date label for cards ("Mar 4"), empty when the timestamp is unparseable
    pub fn created_label(&self) -> String {
        self.created()
            .map(|dt| dt.format("%b %-d").to_string())
            .unwrap_or_default()
    }

    /// Rounded duration label, e.g. "32s"
    pub fn duration_label(&self) -> Option<String> {
        if self.duration > 0.0 {
            Some(format!("{}s", self.duration.round() as u64))
        } else {
            None
        }
    }

    /// Up to four note chips: key points, or the summary when there are none
    pub fn note_points(&self) -> Vec<&str> {
        if self.key_points.is_empty() {
            vec![self.summary.as_str()]
        } else {
            self.key_points.iter().take(4).map(String::as_str).collect()
        }
    }
}

/// Body returned by `POST /api/upload`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub videos: Vec<FeedVideo>,
}

/// Entry of the bundled demo library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub subject: &'static str,
    pub creator_style: &'static str,
    /// "m:ss"
    pub duration: &'static str,
    pub mp4_url: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case_with_defaults() {
        let json = r#"{
            "id": "abc",
            "title": "Chain Rule",
            "topic": "Calculus",
            "summary": "Compose and differentiate",
            "filepath": "/videos/abc.mp4",
            "duration": 31.6,
            "thumbnail": null,
            "createdAt": "2024-03-04T10:00:00Z"
        }"#;
        let video: FeedVideo = serde_json::from_str(json).unwrap();

        assert!(video.key_points.is_empty());
        assert_eq!(video.thumbnail, None);
        assert_eq!(video.duration_label().as_deref(), Some("32s"));
        assert_eq!(video.created_label(), "Mar 4");
        assert_eq!(video.note_points(), vec!["Compose and differentiate"]);
    }

    #[test]
    fn test_bad_timestamp_has_no_label() {
        let video = FeedVideo {
            id: "x".into(),
            title: "t".into(),
            topic: "p".into(),
            summary: String::new(),
            script: String::new(),
            key_points: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
            filepath: String::new(),
            duration: 0.0,
            thumbnail: None,
            created_at: "yesterday".into(),
        };

        assert_eq!(video.created(), None);
        assert_eq!(video.created_label(), "");
        assert_eq!(video.duration_label(), None);
        assert_eq!(video.note_points().len(), 4);
    }
}
