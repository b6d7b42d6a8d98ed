use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prompt shown when the quiz service cannot be reached
pub const FALLBACK_PROMPT: &str = "We couldn’t reach the quiz service. Try again?";

/// Choices of the fallback question; the first one is the "correct" answer
pub const FALLBACK_CHOICES: [&str; 3] = ["Retry", "Cancel", "Refresh feed"];

/// A multiple-choice question with one correct choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    /// Zero-based index into `choices`
    pub answer_index: usize,
}

impl QuizQuestion {
    pub fn new(prompt: impl Into<String>, choices: &[&str], answer_index: usize) -> Self {
        Self {
            prompt: prompt.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            answer_index,
        }
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer_index
    }
}

/// Questions generated for one video
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub video_id: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

/// Malformed quiz payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("question {question} has no choices")]
    NoChoices { question: usize },

    #[error("question {question} answer index {answer_index} is out of range for {choices} choices")]
    AnswerOutOfRange {
        question: usize,
        answer_index: usize,
        choices: usize,
    },
}

impl QuizPayload {
    /// Single-question payload shown in place of a quiz that failed to load
    pub fn service_unavailable(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            questions: vec![QuizQuestion::new(FALLBACK_PROMPT, &FALLBACK_CHOICES, 0)],
        }
    }

    /// Check `answer_index < choices.len()` for every question
    pub fn validate(&self) -> Result<(), QuizError> {
        for (i, q) in self.questions.iter().enumerate() {
            if q.choices.is_empty() {
                return Err(QuizError::NoChoices { question: i });
            }
            if q.answer_index >= q.choices.len() {
                return Err(QuizError::AnswerOutOfRange {
                    question: i,
                    answer_index: q.answer_index,
                    choices: q.choices.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_payload_shape() {
        let quiz = QuizPayload::service_unavailable("v9");

        assert_eq!(quiz.video_id, "v9");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].choices, vec!["Retry", "Cancel", "Refresh feed"]);
        assert_eq!(quiz.questions[0].answer_index, 0);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_answer() {
        let quiz = QuizPayload {
            video_id: "v1".into(),
            questions: vec![
                QuizQuestion::new("ok", &["a", "b"], 1),
                QuizQuestion::new("bad", &["a", "b"], 2),
            ],
        };

        assert_eq!(
            quiz.validate(),
            Err(QuizError::AnswerOutOfRange {
                question: 1,
                answer_index: 2,
                choices: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_choices() {
        let quiz = QuizPayload {
            video_id: "v1".into(),
            questions: vec![QuizQuestion::new("empty", &[], 0)],
        };

        assert_eq!(quiz.validate(), Err(QuizError::NoChoices { question: 0 }));
    }

    #[test]
    fn test_decode_wire_format() {
        let json = r#"{"videoId":"v2","questions":[{"prompt":"d/dx 3x^2?","choices":["3x","6x"],"answerIndex":1}]}"#;
        let quiz: QuizPayload = serde_json::from_str(json).unwrap();

        assert_eq!(quiz.video_id, "v2");
        assert!(quiz.questions[0].is_correct(1));
    }
}
