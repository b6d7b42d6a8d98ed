//! Explore screen: the demo library merged with the live feed.

use log::{info, warn};

use crate::demo;
use crate::error::ApiResult;
use crate::model::FeedVideo;
use crate::request::{RequestGenerations, RequestToken};
use crate::store::clamp_index;

pub const ALL: &str = "All";

/// Creator style given to clips from the live feed
pub const LIVE_STYLE: &str = "AI";

/// A library clip with its creator style
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreVideo {
    pub video: FeedVideo,
    pub creator_style: Option<String>,
}

/// Which filter the keyboard is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreFilter {
    Subject,
    Style,
    Search,
}

#[derive(Debug, Clone)]
pub struct ExploreView {
    videos: Vec<ExploreVideo>,
    pub subject: String,
    pub style: String,
    pub search: String,
    pub focus: ExploreFilter,
    pub selected: usize,
    requests: RequestGenerations,
}

impl ExploreView {
    pub fn new() -> Self {
        Self {
            videos: Vec::new(),
            subject: ALL.to_string(),
            style: ALL.to_string(),
            search: String::new(),
            focus: ExploreFilter::Subject,
            selected: 0,
            requests: RequestGenerations::new(),
        }
    }

    /// Library seeded from the bundled demo videos, stamped with `created_at`
    pub fn seeded(created_at: &str) -> Self {
        let mut view = Self::new();
        view.videos = demo::library()
            .iter()
            .map(|meta| ExploreVideo {
                video: demo::to_feed_video(meta, created_at),
                creator_style: Some(meta.creator_style.to_string()),
            })
            .collect();
        view
    }

    pub fn videos(&self) -> &[ExploreVideo] {
        &self.videos
    }

    pub fn begin_live_merge(&mut self) -> RequestToken {
        self.requests.issue()
    }

    /// Put live clips in front of the seeded library; failures only log
    pub fn finish_live_merge(&mut self, token: RequestToken, result: ApiResult<Vec<FeedVideo>>) -> bool {
        if !self.requests.settle(token) {
            return false;
        }
        match result {
            Ok(live) => {
                info!("Merging {} live clips into explore", live.len());
                let mut merged: Vec<ExploreVideo> = live
                    .into_iter()
                    .map(|video| ExploreVideo {
                        video,
                        creator_style: Some(LIVE_STYLE.to_string()),
                    })
                    .collect();
                // Earlier live clips are replaced, not stacked
                self.videos.retain(|v| v.creator_style.as_deref() != Some(LIVE_STYLE));
                merged.append(&mut self.videos);
                self.videos = merged;
                self.clamp_selection();
            }
            Err(e) => warn!("Failed to load live feed for explore: {e}"),
        }
        true
    }

    /// "All" followed by distinct subjects
    pub fn subjects(&self) -> Vec<&str> {
        distinct(self.videos.iter().map(|v| v.video.topic.as_str()))
    }

    /// "All" followed by distinct creator styles
    pub fn styles(&self) -> Vec<&str> {
        distinct(self.videos.iter().filter_map(|v| v.creator_style.as_deref()))
    }

    pub fn filtered(&self) -> Vec<&ExploreVideo> {
        let needle = self.search.to_lowercase();
        self.videos
            .iter()
            .filter(|v| self.subject == ALL || v.video.topic == self.subject)
            .filter(|v| self.style == ALL || v.creator_style.as_deref() == Some(self.style.as_str()))
            .filter(|v| {
                needle.is_empty()
                    || v.video.title.to_lowercase().contains(&needle)
                    || v.video.summary.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn cycle_subject(&mut self, forward: bool) {
        let next = cycle(&self.subjects(), &self.subject, forward);
        self.subject = next;
        self.clamp_selection();
    }

    pub fn cycle_style(&mut self, forward: bool) {
        let next = cycle(&self.styles(), &self.style, forward);
        self.style = next;
        self.clamp_selection();
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.clamp_selection();
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.clamp_selection();
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            ExploreFilter::Subject => ExploreFilter::Style,
            ExploreFilter::Style => ExploreFilter::Search,
            ExploreFilter::Search => ExploreFilter::Subject,
        };
    }

    pub fn select_next(&mut self) {
        self.selected = clamp_index(self.selected as isize + 1, self.filtered().len());
    }

    pub fn select_prev(&mut self) {
        self.selected = clamp_index(self.selected as isize - 1, self.filtered().len());
    }

    fn clamp_selection(&mut self) {
        self.selected = clamp_index(self.selected as isize, self.filtered().len());
    }
}

impl Default for ExploreView {
    fn default() -> Self {
        Self::new()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out = vec![ALL];
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn cycle(options: &[&str], current: &str, forward: bool) -> String {
    let len = options.len();
    if len == 0 {
        return ALL.to_string();
    }
    let pos = options.iter().position(|o| *o == current).unwrap_or(0);
    let idx = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    options[idx].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    const STAMP: &str = "2024-05-01T12:00:00Z";

    fn live(id: &str, topic: &str, title: &str) -> FeedVideo {
        FeedVideo {
            id: id.into(),
            title: title.into(),
            topic: topic.into(),
            summary: "generated".into(),
            script: String::new(),
            key_points: vec!["one".into()],
            filepath: String::new(),
            duration: 31.0,
            thumbnail: None,
            created_at: STAMP.into(),
        }
    }

    #[test]
    fn test_seed_is_available_before_live_feed() {
        let view = ExploreView::seeded(STAMP);
        assert_eq!(view.videos().len(), demo::library().len());
        assert_eq!(view.subjects(), vec!["All", "Physics", "Calculus", "Biology", "Economics"]);
        assert_eq!(
            view.styles(),
            vec!["All", "Explainer", "Whiteboard", "Animated", "Show & tell"]
        );
    }

    #[test]
    fn test_live_feed_is_prepended_with_ai_style() {
        let mut view = ExploreView::seeded(STAMP);
        let token = view.begin_live_merge();
        view.finish_live_merge(token, Ok(vec![live("x", "Chemistry", "Moles")]));

        let first = &view.videos()[0];
        assert_eq!(first.video.id, "x");
        assert_eq!(first.creator_style.as_deref(), Some(LIVE_STYLE));
        assert_eq!(view.videos().len(), demo::library().len() + 1);
    }

    #[test]
    fn test_repeated_merge_replaces_live_clips() {
        let mut view = ExploreView::seeded(STAMP);
        for title in ["Moles", "Moles, again"] {
            let token = view.begin_live_merge();
            view.finish_live_merge(token, Ok(vec![live("x", "Chemistry", title)]));
        }

        let live_ids: Vec<_> = view
            .videos()
            .iter()
            .filter(|v| v.video.id == "x")
            .map(|v| v.video.title.as_str())
            .collect();
        assert_eq!(live_ids, vec!["Moles, again"]);
        assert_eq!(view.videos().len(), demo::library().len() + 1);
    }

    #[test]
    fn test_live_failure_keeps_seed() {
        let mut view = ExploreView::seeded(STAMP);
        let token = view.begin_live_merge();
        assert!(view.finish_live_merge(token, Err(ApiError::network("fetch feed", "timeout"))));
        assert_eq!(view.videos().len(), demo::library().len());
    }

    #[test]
    fn test_filters_combine() {
        let mut view = ExploreView::seeded(STAMP);
        view.subject = "Calculus".into();
        assert_eq!(view.filtered().len(), 2);

        view.style = "Animated".into();
        let titles: Vec<_> = view.filtered().iter().map(|v| v.video.title.as_str()).collect();
        assert_eq!(titles, vec!["Chain Rule in 30s"]);

        view.style = ALL.into();
        view.search = "SLOPES".into();
        assert_eq!(view.filtered().len(), 1);
    }

    #[test]
    fn test_search_matches_summary() {
        let mut view = ExploreView::seeded(STAMP);
        for c in "show & tell".chars() {
            view.push_search(c);
        }
        let ids: Vec<_> = view.filtered().iter().map(|v| v.video.id.as_str()).collect();
        assert_eq!(ids, vec!["demo-v4"]);

        view.pop_search();
        assert_eq!(view.search, "show & tel");
    }

    #[test]
    fn test_cycle_subject_wraps() {
        let mut view = ExploreView::seeded(STAMP);
        view.cycle_subject(false);
        assert_eq!(view.subject, "Economics");
        view.cycle_subject(true);
        assert_eq!(view.subject, ALL);
    }
}
