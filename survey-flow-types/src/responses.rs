use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Answer, QuestionId};

/// Error type for typed response access.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Missing response for question: {0}")]
    Missing(QuestionId),

    #[error("Type mismatch for question '{question}': expected {expected}, got {actual}")]
    TypeMismatch {
        question: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The answers collected during one response session.
///
/// Created empty when a session starts and grows until submission. Recording
/// an answer for a question replaces any earlier answer for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses {
    answers: BTreeMap<QuestionId, Answer>,
}

impl Responses {
    /// Create a new empty response set.
    pub fn new() -> Self {
        Self {
            answers: BTreeMap::new(),
        }
    }

    /// Record an answer, replacing any prior answer for the same question.
    pub fn record(&mut self, question: impl Into<QuestionId>, answer: impl Into<Answer>) {
        self.answers.insert(question.into(), answer.into());
    }

    /// Builder-style variant of [`Responses::record`].
    pub fn with(mut self, question: impl Into<QuestionId>, answer: impl Into<Answer>) -> Self {
        self.record(question, answer);
        self
    }

    /// Get the answer for a question.
    pub fn get(&self, question: &QuestionId) -> Option<&Answer> {
        self.answers.get(question)
    }

    /// Check if an answer exists for a question.
    pub fn contains(&self, question: &QuestionId) -> bool {
        self.answers.contains_key(question)
    }

    /// Remove the answer for a question.
    pub fn remove(&mut self, question: &QuestionId) -> Option<Answer> {
        self.answers.remove(question)
    }

    /// Get an iterator over all question-answer pairs, ordered by question id.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.answers.iter()
    }

    /// Get the number of answered questions.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Check if nothing has been answered yet.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    // === Typed accessors ===

    /// Get a text answer.
    pub fn get_text(&self, question: &QuestionId) -> Result<&str, ResponseError> {
        match self.get(question) {
            Some(Answer::Text(s)) => Ok(s),
            Some(other) => Err(mismatch(question, "Text", other)),
            None => Err(ResponseError::Missing(question.clone())),
        }
    }

    /// Get a single-choice answer.
    pub fn get_choice(&self, question: &QuestionId) -> Result<&str, ResponseError> {
        match self.get(question) {
            Some(Answer::Choice(s)) => Ok(s),
            Some(other) => Err(mismatch(question, "Choice", other)),
            None => Err(ResponseError::Missing(question.clone())),
        }
    }

    /// Get a multi-choice answer.
    pub fn get_multi_choice(
        &self,
        question: &QuestionId,
    ) -> Result<&BTreeSet<String>, ResponseError> {
        match self.get(question) {
            Some(Answer::MultiChoice(set)) => Ok(set),
            Some(other) => Err(mismatch(question, "MultiChoice", other)),
            None => Err(ResponseError::Missing(question.clone())),
        }
    }

    /// Get a scale answer.
    pub fn get_scale(&self, question: &QuestionId) -> Result<i64, ResponseError> {
        match self.get(question) {
            Some(Answer::Scale(v)) => Ok(*v),
            Some(other) => Err(mismatch(question, "Scale", other)),
            None => Err(ResponseError::Missing(question.clone())),
        }
    }

    /// Get a matrix answer.
    pub fn get_matrix(
        &self,
        question: &QuestionId,
    ) -> Result<&BTreeMap<String, String>, ResponseError> {
        match self.get(question) {
            Some(Answer::Matrix(cells)) => Ok(cells),
            Some(other) => Err(mismatch(question, "Matrix", other)),
            None => Err(ResponseError::Missing(question.clone())),
        }
    }

    /// Get a ranking answer.
    pub fn get_ranking(
        &self,
        question: &QuestionId,
    ) -> Result<&BTreeMap<String, u32>, ResponseError> {
        match self.get(question) {
            Some(Answer::Ranking(ranks)) => Ok(ranks),
            Some(other) => Err(mismatch(question, "Ranking", other)),
            None => Err(ResponseError::Missing(question.clone())),
        }
    }

    /// Check if a question has a non-empty answer.
    pub fn has_value(&self, question: &QuestionId) -> bool {
        self.get(question).is_some_and(|answer| !answer.is_empty())
    }
}

fn mismatch(question: &QuestionId, expected: &'static str, actual: &Answer) -> ResponseError {
    ResponseError::TypeMismatch {
        question: question.clone(),
        expected,
        actual: actual.type_name(),
    }
}

impl IntoIterator for Responses {
    type Item = (QuestionId, Answer);
    type IntoIter = std::collections::btree_map::IntoIter<QuestionId, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = (&'a QuestionId, &'a Answer);
    type IntoIter = std::collections::btree_map::Iter<'a, QuestionId, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}

impl FromIterator<(QuestionId, Answer)> for Responses {
    fn from_iter<T: IntoIterator<Item = (QuestionId, Answer)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
