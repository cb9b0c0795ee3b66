use crate::{QuestionId, SurveyStatus};

/// Error type for navigating a survey.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The cursor does not point at a question. Indicates a caller bug.
    #[error("Cursor {cursor} is out of range for a survey of {len} questions")]
    OutOfRange { cursor: usize, len: usize },

    /// A required question has no valid answer yet. No state was changed.
    #[error("Question '{question}' must be answered before continuing")]
    Blocked { question: QuestionId },

    /// The answer variant does not match the question kind.
    #[error("Question '{question}' expects a {expected} answer, got {actual}")]
    ShapeMismatch {
        question: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },

    /// The answer has the right shape but a value the question does not offer.
    #[error("Invalid answer for question '{question}': {reason}")]
    InvalidAnswer { question: QuestionId, reason: String },

    /// No question with this id exists in the survey.
    #[error("No question with id '{0}'")]
    UnknownQuestion(QuestionId),

    /// The survey has no questions, so no session can start.
    #[error("Survey has no questions")]
    EmptySurvey,

    /// The session is already submitted; navigation is over.
    #[error("Survey has already been submitted")]
    AlreadySubmitted,

    /// Responses can only be handed off once the session is submitted.
    #[error("Survey has not been submitted yet")]
    NotSubmitted,

    /// The submission collaborator failed.
    #[error("Submission failed: {0}")]
    Submission(#[source] anyhow::Error),
}

impl FlowError {
    /// Create a submission error from any error type.
    pub fn submission(err: impl Into<anyhow::Error>) -> Self {
        Self::Submission(err.into())
    }

    /// Check if this error is a recoverable validation block.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Check if this error should end the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::Submission(_))
    }
}

/// Error type for authoring a survey definition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Survey id must not be empty")]
    EmptySurveyId,

    #[error("Survey title must not be empty")]
    EmptyTitle,

    #[error("Question {index} has an empty id")]
    EmptyQuestionId { index: usize },

    #[error("Question id '{0}' is used more than once")]
    DuplicateQuestionId(QuestionId),

    #[error("Question '{0}' has an empty prompt")]
    EmptyPrompt(QuestionId),

    #[error("Question '{0}' needs at least one option")]
    MissingOptions(QuestionId),

    #[error("Question '{question}' lists option '{option}' more than once")]
    DuplicateOption { question: QuestionId, option: String },

    #[error("Matrix question '{0}' needs at least one row and one column")]
    EmptyMatrix(QuestionId),

    #[error("Scale question '{question}' has min {min} not below max {max}")]
    InvalidScale { question: QuestionId, min: i64, max: i64 },

    #[error("Question '{0}' cannot branch; only choice questions can")]
    BranchNotSupported(QuestionId),

    #[error("Question '{question}' branches on '{option}', which is not one of its options")]
    UnknownBranchOption { question: QuestionId, option: String },

    #[error("Question '{question}' branches on '{option}' to unknown question '{target}'")]
    UnknownBranchTarget {
        question: QuestionId,
        option: String,
        target: QuestionId,
    },

    #[error("Question index {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No question with id '{0}'")]
    UnknownQuestion(QuestionId),
}

/// Error type for survey storage.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Survey '{0}' not found")]
    NotFound(String),

    #[error("Survey '{0}' already exists")]
    AlreadyExists(String),

    #[error("Survey '{id}' is {status} and does not accept responses")]
    NotAccepting { id: String, status: SurveyStatus },
}
