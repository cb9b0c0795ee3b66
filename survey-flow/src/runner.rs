//! Driving a session with a `Responder`.

use survey_flow_types::{
    FlowError, Question, QuestionId, Reply, Responder, Responses, SubmissionSink,
    SurveyDefinition,
};

use crate::session::{FlowState, Session};

/// Error type for [`run`] and [`run_and_submit`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The responder abandoned the survey.
    #[error("Survey cancelled by responder")]
    Cancelled,

    /// A navigation error that ends the session.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// A backward branch led to the same question with the same answers again.
    #[error("Survey keeps returning to question '{question}' without any new answer")]
    Loop { question: QuestionId },

    /// The responder itself failed (I/O, terminal closed, script exhausted...).
    #[error("Responder error: {0}")]
    Responder(#[source] anyhow::Error),
}

impl RunError {
    fn responder(err: impl Into<anyhow::Error>) -> Self {
        Self::Responder(err.into())
    }

    /// Check if this error represents cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Put every question to `responder` until the survey is submitted.
///
/// Refused answers and blocked moves are reported back through
/// `Responder::rejected` and the question is asked again. If completion is
/// blocked by a required question elsewhere (skipped by a branch), the
/// session jumps to it.
///
/// Moving forward past the same question twice with identical responses
/// (and no `Back` in between) ends the run with [`RunError::Loop`].
pub fn run<R: Responder>(
    survey: &SurveyDefinition,
    responder: &mut R,
) -> Result<Responses, RunError> {
    let mut session = Session::start(survey)?;
    drive(&mut session, responder)?;
    let responses = session.into_responses()?;
    responder
        .finish(survey, &responses)
        .map_err(RunError::responder)?;
    Ok(responses)
}

/// Like [`run`], then hand the responses to `sink`.
pub fn run_and_submit<R: Responder, S: SubmissionSink>(
    survey: &SurveyDefinition,
    responder: &mut R,
    sink: &mut S,
) -> Result<Responses, RunError> {
    let mut session = Session::start(survey)?;
    drive(&mut session, responder)?;
    let responses = session.submit(sink)?;
    responder
        .finish(survey, &responses)
        .map_err(RunError::responder)?;
    Ok(responses)
}

fn drive<R: Responder>(session: &mut Session<'_>, responder: &mut R) -> Result<(), RunError> {
    responder
        .start(session.survey())
        .map_err(RunError::responder)?;

    let mut passed = Vec::new();
    loop {
        let question = session.current()?;
        let progress = session.progress()?;
        let reply = responder
            .respond(question, progress, session.current_answer())
            .map_err(RunError::responder)?;

        let outcome = match reply {
            Reply::Cancel => {
                tracing::info!(question = %question.id(), "survey cancelled");
                return Err(RunError::Cancelled);
            }
            Reply::Back => {
                passed.clear();
                session.retreat()
            }
            Reply::Next => advance_once(session, question, &mut passed)?,
            Reply::Answer(answer) => match session.answer(answer) {
                Ok(()) => advance_once(session, question, &mut passed)?,
                Err(err) => Err(err),
            },
        };

        match outcome {
            Ok(FlowState::Submitted) => return Ok(()),
            Ok(FlowState::Answering(_)) => {}
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => {
                responder
                    .rejected(question, &err)
                    .map_err(RunError::responder)?;
                if let FlowError::Blocked { question: missing } = &err
                    && missing != question.id()
                {
                    session.jump_to(missing)?;
                }
            }
        }
    }
}

/// Advance past `question` unless it was already passed with these exact
/// responses. Only successful moves are remembered.
fn advance_once(
    session: &mut Session<'_>,
    question: &Question,
    passed: &mut Vec<(QuestionId, Responses)>,
) -> Result<Result<FlowState, FlowError>, RunError> {
    let key = (question.id().clone(), session.responses().clone());
    if passed.contains(&key) {
        tracing::warn!(question = %question.id(), "navigation loop detected");
        return Err(RunError::Loop {
            question: question.id().clone(),
        });
    }
    let outcome = session.advance();
    if outcome.is_ok() {
        passed.push(key);
    }
    Ok(outcome)
}
