//! Core types for the survey-flow crate.
//!
//! This crate provides the foundational types for running surveys:
//! - `SurveyDefinition` - The authored survey (title, description, ordered questions)
//! - `Question` and `QuestionKind` - Individual questions, their types and branches
//! - `Answer` and `Responses` - Typed answers keyed by `QuestionId`
//! - `SurveyStore`, `SubmissionSink` and `Responder` traits - The collaborators
//!   a flow talks to (storage, submission, presentation)

mod question_id;
pub use question_id::QuestionId;

mod answer;
pub use answer::Answer;

mod responses;
pub use responses::{ResponseError, Responses};

mod question;
pub use question::{DEFAULT_SCALE_MAX, DEFAULT_SCALE_MIN, Question, QuestionKind};

mod survey_definition;
pub use survey_definition::SurveyDefinition;

mod record;
pub use record::{SurveyRecord, SurveyStatus, SurveySummary};

// Dates on stored surveys
pub use chrono::NaiveDate;

mod error;
pub use error::{DefinitionError, FlowError, StoreError};

mod traits;
pub use traits::{Progress, Reply, Responder, SubmissionSink, SurveyStore};
