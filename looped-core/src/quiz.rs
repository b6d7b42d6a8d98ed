//! Quiz answering and scoring.
//!
//! [`AnswerPolicy`] decides what happens when a question that already has an
//! answer is answered again. The same policy value governs the reel store and
//! the quiz drawer so both behave alike.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{QuizPayload, QuizQuestion};

/// What a second answer to the same question does
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerPolicy {
    /// The latest answer replaces the earlier one
    #[default]
    Overwrite,
    /// The first answer is final
    LockFirst,
}

impl AnswerPolicy {
    /// Whether a new answer may be written given whether one already exists
    pub fn permits(&self, already_answered: bool) -> bool {
        match self {
            AnswerPolicy::Overwrite => true,
            AnswerPolicy::LockFirst => !already_answered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerPolicy::Overwrite => "overwrite",
            AnswerPolicy::LockFirst => "lock-first",
        }
    }
}

/// Result of a selection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Recorded { correct: bool },
    Replaced { correct: bool },
    Rejected,
}

/// Correct answers out of the number of questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// How a choice should be shown after its question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceState {
    /// Question not answered yet, or an unpicked wrong choice
    Neutral,
    PickedCorrect,
    PickedWrong,
    /// The correct choice, revealed after a wrong pick
    RevealCorrect,
}

/// Rendering state for one choice of `question` given the selection (if any)
pub fn choice_state(question: &QuizQuestion, selected: Option<usize>, choice: usize) -> ChoiceState {
    let Some(selected) = selected else {
        return ChoiceState::Neutral;
    };
    let is_answer = question.answer_index == choice;
    if selected == choice {
        if is_answer {
            ChoiceState::PickedCorrect
        } else {
            ChoiceState::PickedWrong
        }
    } else if is_answer {
        ChoiceState::RevealCorrect
    } else {
        ChoiceState::Neutral
    }
}

/// Answer sheet for a quiz shown in the drawer
#[derive(Debug, Clone)]
pub struct QuizSession {
    payload: QuizPayload,
    selections: BTreeMap<usize, usize>,
    policy: AnswerPolicy,
    pub is_loading: bool,
    /// Keyboard focus as (question, choice)
    focus: (usize, usize),
}

impl QuizSession {
    pub fn new(payload: QuizPayload, policy: AnswerPolicy) -> Self {
        Self {
            payload,
            selections: BTreeMap::new(),
            policy,
            is_loading: false,
            focus: (0, 0),
        }
    }

    /// Empty drawer shown while a quiz for `video_id` is being generated
    pub fn loading(video_id: impl Into<String>, policy: AnswerPolicy) -> Self {
        let mut session = Self::new(
            QuizPayload {
                video_id: video_id.into(),
                questions: Vec::new(),
            },
            policy,
        );
        session.is_loading = true;
        session
    }

    /// Replace the payload; answers are kept only when the video is unchanged
    pub fn load(&mut self, payload: QuizPayload) {
        if payload.video_id != self.payload.video_id {
            self.selections.clear();
            self.focus = (0, 0);
        }
        self.payload = payload;
        self.selections.retain(|q, _| *q < self.payload.questions.len());
        self.clamp_focus();
    }

    pub fn payload(&self) -> &QuizPayload {
        &self.payload
    }

    pub fn video_id(&self) -> &str {
        &self.payload.video_id
    }

    pub fn policy(&self) -> AnswerPolicy {
        self.policy
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    pub fn is_answered(&self, question: usize) -> bool {
        self.selections.contains_key(&question)
    }

    /// Whether choices of `question` still accept input
    pub fn accepts_input(&self, question: usize) -> bool {
        self.policy.permits(self.is_answered(question))
    }

    /// Select `choice` for `question`
    pub fn select(&mut self, question: usize, choice: usize) -> SelectOutcome {
        let Some(q) = self.payload.questions.get(question) else {
            return SelectOutcome::Rejected;
        };
        if choice >= q.choices.len() {
            return SelectOutcome::Rejected;
        }

        let answered = self.is_answered(question);
        if !self.policy.permits(answered) {
            return SelectOutcome::Rejected;
        }

        let correct = q.is_correct(choice);
        self.selections.insert(question, choice);
        if answered {
            SelectOutcome::Replaced { correct }
        } else {
            SelectOutcome::Recorded { correct }
        }
    }

    pub fn score(&self) -> Score {
        let correct = self
            .payload
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.selection(*i) == Some(q.answer_index))
            .count();
        Score {
            correct,
            total: self.payload.questions.len(),
        }
    }

    pub fn all_answered(&self) -> bool {
        (0..self.payload.questions.len()).all(|i| self.is_answered(i))
    }

    pub fn choice_state(&self, question: usize, choice: usize) -> ChoiceState {
        match self.payload.questions.get(question) {
            Some(q) => choice_state(q, self.selection(question), choice),
            None => ChoiceState::Neutral,
        }
    }

    // Keyboard focus

    pub fn focus(&self) -> (usize, usize) {
        self.focus
    }

    pub fn focus_next_choice(&mut self) {
        let (q, c) = self.focus;
        let choices = self.choice_count(q);
        if c + 1 < choices {
            self.focus = (q, c + 1);
        } else if q + 1 < self.payload.questions.len() {
            self.focus = (q + 1, 0);
        }
    }

    pub fn focus_prev_choice(&mut self) {
        let (q, c) = self.focus;
        if c > 0 {
            self.focus = (q, c - 1);
        } else if q > 0 {
            let prev = q - 1;
            self.focus = (prev, self.choice_count(prev).saturating_sub(1));
        }
    }

    /// Select the focused choice
    pub fn select_focused(&mut self) -> SelectOutcome {
        let (q, c) = self.focus;
        let outcome = self.select(q, c);
        if matches!(outcome, SelectOutcome::Recorded { .. }) && q + 1 < self.payload.questions.len() {
            self.focus = (q + 1, 0);
        }
        outcome
    }

    fn choice_count(&self, question: usize) -> usize {
        self.payload
            .questions
            .get(question)
            .map(|q| q.choices.len())
            .unwrap_or(0)
    }

    fn clamp_focus(&mut self) {
        let questions = self.payload.questions.len();
        if questions == 0 {
            self.focus = (0, 0);
            return;
        }
        let q = self.focus.0.min(questions - 1);
        let c = self.focus.1.min(self.choice_count(q).saturating_sub(1));
        self.focus = (q, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(video_id: &str) -> QuizPayload {
        QuizPayload {
            video_id: video_id.into(),
            questions: vec![
                QuizQuestion::new("2 + 2?", &["3", "4", "5"], 1),
                QuizQuestion::new("Capital of France?", &["Paris", "Rome"], 0),
                QuizQuestion::new("d/dx x^2?", &["x", "2x", "x^2"], 1),
            ],
        }
    }

    #[test]
    fn test_all_correct_is_perfect_score() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::LockFirst);
        let answers: Vec<usize> = session.payload().questions.iter().map(|q| q.answer_index).collect();
        for (q, a) in answers.into_iter().enumerate() {
            assert_eq!(session.select(q, a), SelectOutcome::Recorded { correct: true });
        }

        let score = session.score();
        assert_eq!(score.correct, score.total);
        assert!(score.is_perfect());
        assert!(session.all_answered());
    }

    #[test]
    fn test_partial_answers() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::LockFirst);
        session.select(0, 0);
        session.select(1, 0);

        assert_eq!(session.score(), Score { correct: 1, total: 3 });
        assert!(!session.all_answered());
    }

    #[test]
    fn test_lock_first_rejects_second_selection() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::LockFirst);
        assert_eq!(session.select(0, 0), SelectOutcome::Recorded { correct: false });
        assert_eq!(session.select(0, 1), SelectOutcome::Rejected);

        assert_eq!(session.selection(0), Some(0));
        assert!(!session.accepts_input(0));
    }

    #[test]
    fn test_overwrite_replaces_selection() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::Overwrite);
        session.select(0, 0);
        assert_eq!(session.select(0, 1), SelectOutcome::Replaced { correct: true });
        assert_eq!(session.score().correct, 1);
    }

    #[test]
    fn test_out_of_range_selection_rejected() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::Overwrite);
        assert_eq!(session.select(7, 0), SelectOutcome::Rejected);
        assert_eq!(session.select(1, 2), SelectOutcome::Rejected);
        assert_eq!(session.score().correct, 0);
    }

    #[test]
    fn test_selections_reset_on_new_video() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::LockFirst);
        session.select(0, 1);

        session.load(payload("v1"));
        assert_eq!(session.selection(0), Some(1));

        session.load(payload("v2"));
        assert_eq!(session.selection(0), None);
        assert_eq!(session.video_id(), "v2");
    }

    #[test]
    fn test_empty_quiz_counts_as_all_answered() {
        let session = QuizSession::loading("v3", AnswerPolicy::LockFirst);
        assert!(session.is_loading);
        assert!(session.all_answered());
        assert_eq!(session.score(), Score { correct: 0, total: 0 });
        assert!(!session.score().is_perfect());
    }

    #[test]
    fn test_choice_states_after_wrong_pick() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::LockFirst);
        assert_eq!(session.choice_state(0, 1), ChoiceState::Neutral);

        session.select(0, 2);
        assert_eq!(session.choice_state(0, 2), ChoiceState::PickedWrong);
        assert_eq!(session.choice_state(0, 1), ChoiceState::RevealCorrect);
        assert_eq!(session.choice_state(0, 0), ChoiceState::Neutral);
    }

    #[test]
    fn test_focus_walks_across_questions() {
        let mut session = QuizSession::new(payload("v1"), AnswerPolicy::LockFirst);
        session.focus_next_choice();
        session.focus_next_choice();
        session.focus_next_choice();
        assert_eq!(session.focus(), (1, 0));

        session.focus_prev_choice();
        assert_eq!(session.focus(), (0, 2));

        session.focus_next_choice();
        assert_eq!(session.select_focused(), SelectOutcome::Recorded { correct: true });
        assert_eq!(session.focus(), (2, 0));
    }

    #[test]
    fn test_policy_permits() {
        assert!(AnswerPolicy::Overwrite.permits(true));
        assert!(AnswerPolicy::LockFirst.permits(false));
        assert!(!AnswerPolicy::LockFirst.permits(true));
    }
}
