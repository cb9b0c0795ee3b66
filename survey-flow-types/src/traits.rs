use std::fmt;

use crate::{
    Answer, FlowError, Question, Responses, StoreError, SurveyDefinition, SurveyRecord,
    SurveySummary,
};

/// Trait for storage collaborators holding authored surveys.
///
/// Replaces process-wide mutable lists: the store is passed to whatever needs
/// it. Implementations hand out owned values so they may live out of process.
pub trait SurveyStore {
    /// Add a new survey. Fails if the id is taken.
    fn create(&mut self, record: SurveyRecord) -> Result<(), StoreError>;

    /// Fetch a survey by id.
    fn get(&self, id: &str) -> Result<SurveyRecord, StoreError>;

    /// Replace an existing survey, keeping its id.
    fn update(&mut self, record: SurveyRecord) -> Result<(), StoreError>;

    /// Remove a survey, returning what was stored.
    fn delete(&mut self, id: &str) -> Result<SurveyRecord, StoreError>;

    /// Summaries of every stored survey.
    fn list(&self) -> Vec<SurveySummary>;

    /// Append a submitted response set, returning the new response count.
    fn record_submission(&mut self, id: &str, responses: Responses) -> Result<usize, StoreError>;
}

/// Trait for the collaborator that receives a finished response set.
///
/// Called exactly once per session, at the `Submitted` transition.
pub trait SubmissionSink {
    /// The error type for this sink.
    type Error: Into<anyhow::Error>;

    /// Accept the responses collected for `survey`.
    fn submit(&mut self, survey: &SurveyDefinition, responses: &Responses)
    -> Result<(), Self::Error>;
}

/// Position of the current question, 1-based, for "Question n of m" displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Check if this is the last question.
    pub fn is_last(&self) -> bool {
        self.position == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {} of {}", self.position, self.total)
    }
}

/// What a responder wants to do with the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Record this answer, then move on.
    Answer(Answer),
    /// Move on without changing the recorded answer.
    Next,
    /// Go back one question.
    Back,
    /// Abandon the session.
    Cancel,
}

/// Trait for presentation layers that put questions to a person (or a script).
///
/// The driver in `survey-flow` owns the session; the responder only sees one
/// question at a time and reports what the user did.
pub trait Responder {
    /// The error type for this responder.
    type Error: Into<anyhow::Error>;

    /// Called once before the first question.
    fn start(&mut self, _survey: &SurveyDefinition) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Present a question and return the user's reply.
    ///
    /// `current` is the answer already recorded for this question, if any.
    fn respond(
        &mut self,
        question: &Question,
        progress: Progress,
        current: Option<&Answer>,
    ) -> Result<Reply, Self::Error>;

    /// Called when an answer was refused or navigation was blocked.
    ///
    /// The session state is unchanged; the same question will be presented again.
    fn rejected(&mut self, _question: &Question, _error: &FlowError) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once after the session was submitted.
    fn finish(&mut self, _survey: &SurveyDefinition, _responses: &Responses) -> Result<(), Self::Error> {
        Ok(())
    }
}
