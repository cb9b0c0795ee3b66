//! Navigation over a survey's questions.
//!
//! Every function here is pure: state (cursor, responses) is passed in and the
//! result is returned. `Session` wraps them into a state machine.

use survey_flow_types::{
    Answer, FlowError, Progress, Question, QuestionId, QuestionKind, Responses, SurveyDefinition,
};

/// Outcome of a successful [`advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move the cursor to this index.
    To(usize),
    /// The last question was passed and every required question is answered.
    Complete,
}

/// Get the question under the cursor.
pub fn current_question(survey: &SurveyDefinition, cursor: usize) -> Result<&Question, FlowError> {
    survey.question(cursor).ok_or(FlowError::OutOfRange {
        cursor,
        len: survey.len(),
    })
}

/// Record an answer, replacing any earlier answer to the same question.
///
/// The answer's shape is not checked here; see `Question::check`.
pub fn record_answer(
    mut responses: Responses,
    question: impl Into<QuestionId>,
    answer: impl Into<Answer>,
) -> Responses {
    responses.record(question, answer);
    responses
}

/// Check whether a question's recorded answer is good enough to move past it.
///
/// Optional questions always count as answered.
pub fn is_answered(question: &Question, responses: &Responses) -> bool {
    if !question.is_required() {
        return true;
    }
    let Some(answer) = responses.get(question.id()) else {
        return false;
    };

    match (question.kind(), answer) {
        (QuestionKind::Matrix { rows, .. }, Answer::Matrix(cells)) => {
            cells.len() == rows.len() && rows.iter().all(|row| cells.contains_key(row))
        }
        (_, answer) => !answer.is_empty(),
    }
}

/// First required question without a usable answer, in survey order.
pub fn first_unanswered<'a>(
    survey: &'a SurveyDefinition,
    responses: &Responses,
) -> Option<&'a Question> {
    survey
        .questions()
        .iter()
        .find(|question| !is_answered(question, responses))
}

/// Check whether every required question is answered.
pub fn is_complete(survey: &SurveyDefinition, responses: &Responses) -> bool {
    first_unanswered(survey, responses).is_none()
}

/// Move past the question under the cursor.
///
/// Follows the question's branch for the recorded answer if there is one,
/// otherwise moves to the next question. Passing the last question completes
/// the survey only when nothing required is left unanswered.
pub fn advance(
    survey: &SurveyDefinition,
    cursor: usize,
    responses: &Responses,
) -> Result<Advance, FlowError> {
    let question = current_question(survey, cursor)?;
    if !is_answered(question, responses) {
        tracing::warn!(question = %question.id(), cursor, "advance blocked: unanswered");
        return Err(FlowError::Blocked {
            question: question.id().clone(),
        });
    }

    if let Some(target) = branch_index(survey, question, responses) {
        tracing::debug!(from = cursor, to = target, "following branch");
        return Ok(Advance::To(target));
    }

    if cursor + 1 < survey.len() {
        return Ok(Advance::To(cursor + 1));
    }

    match first_unanswered(survey, responses) {
        None => Ok(Advance::Complete),
        Some(missing) => {
            tracing::warn!(question = %missing.id(), "cannot complete: required question unanswered");
            Err(FlowError::Blocked {
                question: missing.id().clone(),
            })
        }
    }
}

fn branch_index(survey: &SurveyDefinition, question: &Question, responses: &Responses) -> Option<usize> {
    let answer = responses.get(question.id())?;
    let target = question.branch_target(answer)?;
    let index = survey.position_of(target);
    if index.is_none() {
        tracing::warn!(
            question = %question.id(),
            target = %target,
            "branch target does not exist, continuing in order"
        );
    }
    index
}

/// Index of a question to jump to directly.
pub fn jump(survey: &SurveyDefinition, question: &QuestionId) -> Result<usize, FlowError> {
    survey
        .position_of(question)
        .ok_or_else(|| FlowError::UnknownQuestion(question.clone()))
}

/// Step back one question, stopping at the first.
pub fn retreat(cursor: usize) -> usize {
    cursor.saturating_sub(1)
}

/// Position of the cursor for display.
pub fn progress(survey: &SurveyDefinition, cursor: usize) -> Progress {
    Progress {
        position: cursor + 1,
        total: survey.len(),
    }
}
