//! Scripted responder for running surveys without user interaction.
//!
//! `ScriptedResponder` answers from a pre-configured table, which makes it
//! easy to test surveys and the flow around them.
//!
//! # Example
//!
//! ```rust
//! use survey_flow::{Answer, Question, ScriptedResponder, SurveyDefinition, run};
//!
//! let survey = SurveyDefinition::new(
//!     "pulse",
//!     "Pulse check",
//!     vec![
//!         Question::text("age", "What is your age?").required(),
//!         Question::single_choice("agree", "Do you agree?", ["Yes", "No"]).required(),
//!     ],
//! );
//!
//! let mut responder = ScriptedResponder::new()
//!     .with_answer("age", "42")
//!     .with_answer("agree", Answer::Choice("Yes".into()));
//!
//! let responses = run(&survey, &mut responder).unwrap();
//! assert_eq!(responses.len(), 2);
//! ```

use std::collections::{HashMap, HashSet};

use crate::{Answer, FlowError, Progress, Question, QuestionId, Reply, Responder};

/// A responder that replies from a table of answers.
///
/// Questions without a scripted answer are skipped with `Reply::Next`. A
/// rejection ends the run with an error. The one exception is completion
/// blocked by a different question: the driver jumps there and the script
/// carries on. A backward branch revisited with unchanged answers is stopped
/// by the driver with `RunError::Loop`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResponder {
    answers: HashMap<QuestionId, Answer>,
    back_once: HashSet<QuestionId>,
    cancel_at: Option<QuestionId>,
    visited: Vec<QuestionId>,
}

/// Error type for ScriptedResponder.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Question '{question}' was rejected: {message}")]
    Rejected { question: QuestionId, message: String },
}

impl ScriptedResponder {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an answer for a question.
    pub fn with_answer(mut self, question: impl Into<QuestionId>, answer: impl Into<Answer>) -> Self {
        self.answers.insert(question.into(), answer.into());
        self
    }

    /// Add a text answer.
    pub fn with_text(self, question: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        self.with_answer(question, Answer::Text(text.into()))
    }

    /// Add a single-choice answer.
    pub fn with_choice(self, question: impl Into<QuestionId>, option: impl Into<String>) -> Self {
        self.with_answer(question, Answer::Choice(option.into()))
    }

    /// Add a scale answer.
    pub fn with_scale(self, question: impl Into<QuestionId>, value: i64) -> Self {
        self.with_answer(question, Answer::Scale(value))
    }

    /// Reply `Back` the first time this question is shown.
    pub fn back_once_at(mut self, question: impl Into<QuestionId>) -> Self {
        self.back_once.insert(question.into());
        self
    }

    /// Reply `Cancel` when this question is shown.
    pub fn cancel_at(mut self, question: impl Into<QuestionId>) -> Self {
        self.cancel_at = Some(question.into());
        self
    }

    /// Every question shown, in order, including repeats.
    pub fn visited(&self) -> &[QuestionId] {
        &self.visited
    }
}

impl Responder for ScriptedResponder {
    type Error = ScriptError;

    fn respond(
        &mut self,
        question: &Question,
        _progress: Progress,
        current: Option<&Answer>,
    ) -> Result<Reply, ScriptError> {
        let id = question.id();
        self.visited.push(id.clone());

        if self.cancel_at.as_ref() == Some(id) {
            return Ok(Reply::Cancel);
        }
        if self.back_once.remove(id) {
            return Ok(Reply::Back);
        }

        match self.answers.get(id) {
            Some(answer) if current != Some(answer) => Ok(Reply::Answer(answer.clone())),
            _ => Ok(Reply::Next),
        }
    }

    fn rejected(&mut self, question: &Question, error: &FlowError) -> Result<(), ScriptError> {
        if let FlowError::Blocked { question: missing } = error
            && missing != question.id()
        {
            return Ok(());
        }
        Err(ScriptError::Rejected {
            question: question.id().clone(),
            message: error.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_with_scripted_answer() {
        let mut responder = ScriptedResponder::new().with_text("age", "42");
        let question = Question::text("age", "Age?");
        let progress = Progress {
            position: 1,
            total: 1,
        };
        assert_eq!(
            responder.respond(&question, progress, None).unwrap(),
            Reply::Answer(Answer::Text("42".into()))
        );
    }

    #[test]
    fn skips_when_already_answered() {
        let mut responder = ScriptedResponder::new().with_text("age", "42");
        let question = Question::text("age", "Age?");
        let progress = Progress {
            position: 1,
            total: 1,
        };
        let current = Answer::Text("42".into());
        assert_eq!(
            responder.respond(&question, progress, Some(&current)).unwrap(),
            Reply::Next
        );
    }

    #[test]
    fn back_once_only_fires_once() {
        let mut responder = ScriptedResponder::new().back_once_at("q");
        let question = Question::text("q", "Q?");
        let progress = Progress {
            position: 1,
            total: 1,
        };
        assert_eq!(responder.respond(&question, progress, None).unwrap(), Reply::Back);
        assert_eq!(responder.respond(&question, progress, None).unwrap(), Reply::Next);
        assert_eq!(responder.visited().len(), 2);
    }

    #[test]
    fn rejection_is_an_error() {
        let mut responder = ScriptedResponder::new();
        let question = Question::text("q", "Q?").required();
        let err = responder
            .rejected(
                &question,
                &FlowError::Blocked {
                    question: QuestionId::new("q"),
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("must be answered"));
    }

    #[test]
    fn blocked_elsewhere_is_tolerated() {
        let mut responder = ScriptedResponder::new();
        let question = Question::text("last", "Last?");
        let blocked = FlowError::Blocked {
            question: QuestionId::new("skipped"),
        };
        assert!(responder.rejected(&question, &blocked).is_ok());
    }
}
