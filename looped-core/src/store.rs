//! Reel feed state and its reducers.
//!
//! [`AppState`] is a plain value owned by whoever composes the application.
//! Every mutation goes through [`reduce`], which takes the previous state and
//! returns the next one.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::demo;
use crate::model::{QuizAnswer, ReelItem};
use crate::quiz::AnswerPolicy;

/// State of the reel feed, style preferences and recorded quiz answers
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub reels: Vec<ReelItem>,
    /// Always `< reels.len()`, or 0 when there are no reels
    pub current_index: usize,
    pub preferred_styles: BTreeSet<String>,
    pub quiz_answers: HashMap<String, QuizAnswer>,
    pub answer_policy: AnswerPolicy,
}

/// A state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetIndex(isize),
    Next,
    Prev,
    ToggleStyle(String),
    AnswerQuiz { reel_id: String, selected_index: usize },
}

impl AppState {
    pub fn new(reels: Vec<ReelItem>) -> Self {
        Self {
            reels,
            current_index: 0,
            preferred_styles: BTreeSet::new(),
            quiz_answers: HashMap::new(),
            answer_policy: AnswerPolicy::default(),
        }
    }

    /// State seeded with the bundled demo reels
    pub fn demo() -> Self {
        Self::new(demo::reels())
    }

    pub fn with_policy(mut self, policy: AnswerPolicy) -> Self {
        self.answer_policy = policy;
        self
    }

    pub fn current(&self) -> Option<&ReelItem> {
        self.reels.get(self.current_index)
    }

    pub fn reel(&self, id: &str) -> Option<&ReelItem> {
        self.reels.iter().find(|r| r.id == id)
    }

    pub fn answer_for(&self, reel_id: &str) -> Option<QuizAnswer> {
        self.quiz_answers.get(reel_id).copied()
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.preferred_styles.contains(style)
    }

    /// `(correct, answered)` over recorded answers
    pub fn accuracy(&self) -> (usize, usize) {
        let correct = self.quiz_answers.values().filter(|a| a.correct).count();
        (correct, self.quiz_answers.len())
    }

    pub fn set_index(&self, index: isize) -> Self {
        reduce(self, Action::SetIndex(index))
    }

    pub fn next(&self) -> Self {
        reduce(self, Action::Next)
    }

    pub fn prev(&self) -> Self {
        reduce(self, Action::Prev)
    }

    pub fn toggle_style(&self, style: &str) -> Self {
        reduce(self, Action::ToggleStyle(style.to_string()))
    }

    pub fn answer_quiz(&self, reel_id: &str, selected_index: usize) -> Self {
        reduce(
            self,
            Action::AnswerQuiz {
                reel_id: reel_id.to_string(),
                selected_index,
            },
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::demo()
    }
}

/// Clamp `index` into `[0, len - 1]`; an empty list keeps index 0
pub fn clamp_index(index: isize, len: usize) -> usize {
    if len == 0 || index <= 0 {
        return 0;
    }
    (index as usize).min(len - 1)
}

/// Apply `action` to `state`, returning the next state
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SetIndex(index) => {
            next.current_index = clamp_index(index, next.reels.len());
        }
        Action::Next => {
            next.current_index = clamp_index(state.current_index as isize + 1, next.reels.len());
        }
        Action::Prev => {
            next.current_index = clamp_index(state.current_index as isize - 1, next.reels.len());
        }
        Action::ToggleStyle(style) => {
            if !next.preferred_styles.remove(&style) {
                next.preferred_styles.insert(style);
            }
        }
        Action::AnswerQuiz {
            reel_id,
            selected_index,
        } => {
            let Some(quiz) = state.reel(&reel_id).and_then(|r| r.quiz.as_ref()) else {
                return next;
            };
            let answered = next.quiz_answers.contains_key(&reel_id);
            if !next.answer_policy.permits(answered) {
                debug!("Ignoring repeat answer for reel {reel_id}");
                return next;
            }
            let answer = QuizAnswer {
                selected_index,
                correct: quiz.is_correct(selected_index),
            };
            next.quiz_answers.insert(reel_id, answer);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizQuestion;

    #[test]
    fn test_set_index_clamps() {
        let state = AppState::demo();
        let len = state.reels.len() as isize;

        for i in -5..(len + 5) {
            let expected = i.clamp(0, len - 1) as usize;
            assert_eq!(state.set_index(i).current_index, expected, "index {i}");
        }
    }

    #[test]
    fn test_next_prev_stop_at_edges() {
        let state = AppState::demo();
        assert_eq!(state.prev().current_index, 0);

        let last = state.next().next().next().next();
        assert_eq!(last.current_index, 2);
        assert_eq!(last.prev().current_index, 1);
    }

    #[test]
    fn test_empty_reels_keep_index_zero() {
        let state = AppState::new(Vec::new());

        assert_eq!(state.set_index(3).current_index, 0);
        assert_eq!(state.next().current_index, 0);
        assert_eq!(state.prev().current_index, 0);
        assert!(state.current().is_none());
    }

    #[test]
    fn test_reducer_does_not_touch_previous_state() {
        let state = AppState::demo();
        let moved = state.next();

        assert_eq!(state.current_index, 0);
        assert_eq!(moved.current_index, 1);
    }

    #[test]
    fn test_toggle_style_twice_restores_set() {
        let state = AppState::demo().toggle_style("Whiteboard");
        let original = state.preferred_styles.clone();

        let toggled = state.toggle_style("Animated");
        assert!(toggled.has_style("Animated"));

        let restored = toggled.toggle_style("Animated");
        assert_eq!(restored.preferred_styles, original);

        let removed = state.toggle_style("Whiteboard");
        assert!(!removed.has_style("Whiteboard"));
    }

    #[test]
    fn test_answer_quiz_records_correctness_and_overwrites() {
        let state = AppState::demo();

        let wrong = state.answer_quiz("2", 0);
        assert_eq!(
            wrong.answer_for("2"),
            Some(QuizAnswer {
                selected_index: 0,
                correct: false
            })
        );

        let right = wrong.answer_quiz("2", 1);
        assert_eq!(
            right.answer_for("2"),
            Some(QuizAnswer {
                selected_index: 1,
                correct: true
            })
        );
        assert_eq!(right.accuracy(), (1, 1));
    }

    #[test]
    fn test_answer_quiz_without_quiz_is_noop() {
        let state = AppState::demo().answer_quiz("2", 1);

        assert_eq!(state.answer_quiz("1", 0).quiz_answers, state.quiz_answers);
        assert_eq!(state.answer_quiz("missing", 0).quiz_answers, state.quiz_answers);
    }

    #[test]
    fn test_lock_first_policy_keeps_first_answer() {
        let state = AppState::demo()
            .with_policy(AnswerPolicy::LockFirst)
            .answer_quiz("2", 3)
            .answer_quiz("2", 1);

        assert_eq!(state.answer_for("2").map(|a| a.selected_index), Some(3));
    }

    #[test]
    fn test_every_choice_scored_against_answer_index() {
        let quiz = QuizQuestion::new("pick", &["a", "b", "c"], 2);
        let state = AppState::new(vec![ReelItem::new("r", "Reel").with_quiz(quiz)]);

        for k in 0..3 {
            let answered = state.answer_quiz("r", k);
            assert_eq!(answered.answer_for("r").map(|a| a.correct), Some(k == 2));
        }
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-1, 3), 0);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(10, 3), 2);
        assert_eq!(clamp_index(5, 0), 0);
    }
}
