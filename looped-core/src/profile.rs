//! Profile screen content.

use crate::demo;
use crate::model::VideoMeta;
use crate::store::AppState;

/// Accuracy shown until the user has answered a quiz
pub const DEFAULT_ACCURACY: &str = "87%";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub day: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub const NAME: &str = "Avery Johnson";
pub const TAGLINE: &str = "Building a knowledge loop in calculus, physics, and cognitive science.";
pub const BADGES: [&str; 3] = ["Looped Founder", "Quiz Wizard", "Retention Pro"];

pub const SCHEDULE: [Session; 3] = [
    Session {
        day: "Mon",
        title: "Calculus ladder: Chain rule sprint",
        description: "Watched 3 loops, completed quiz with 2/3 accuracy. Flagged implicit differentiation for review.",
        tags: &["Calculus", "Quiz"],
    },
    Session {
        day: "Tue",
        title: "Physics: Momentum conservation",
        description: "Generated 2 clips from lecture slides, practiced problems in the workbook.",
        tags: &["Physics", "Generated"],
    },
    Session {
        day: "Wed",
        title: "Cognitive science study jam",
        description: "Revisited memory encoding framework. Shared clip with the study group.",
        tags: &["Memory", "Shared"],
    },
];

/// Stat cards, with quiz accuracy taken from recorded answers when there are any
pub fn stats(state: &AppState) -> Vec<Stat> {
    let accuracy = match state.accuracy() {
        (_, 0) => DEFAULT_ACCURACY.to_string(),
        (correct, answered) => format!("{}%", (correct * 100 + answered / 2) / answered),
    };
    vec![
        Stat {
            label: "Clips Watched",
            value: "128".to_string(),
        },
        Stat {
            label: "Daily Streak",
            value: "9".to_string(),
        },
        Stat {
            label: "Quiz Accuracy",
            value: accuracy,
        },
        Stat {
            label: "Minutes Saved",
            value: "214".to_string(),
        },
    ]
}

/// The first four library clips
pub fn saved_clips() -> &'static [VideoMeta] {
    let library = demo::library();
    &library[..library.len().min(4)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accuracy(state: &AppState) -> String {
        stats(state)
            .into_iter()
            .find(|s| s.label == "Quiz Accuracy")
            .map(|s| s.value)
            .unwrap_or_default()
    }

    #[test]
    fn test_accuracy_defaults_without_answers() {
        assert_eq!(accuracy(&AppState::demo()), DEFAULT_ACCURACY);
    }

    #[test]
    fn test_accuracy_from_answers() {
        let state = AppState::demo().answer_quiz("2", 1);
        assert_eq!(accuracy(&state), "100%");

        let state = AppState::demo().answer_quiz("2", 0);
        assert_eq!(accuracy(&state), "0%");
    }

    #[test]
    fn test_saved_clips() {
        let ids: Vec<_> = saved_clips().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3", "v4"]);
    }
}
