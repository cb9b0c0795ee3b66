//! A single responder's pass through a survey.

use survey_flow_types::{
    Answer, FlowError, Progress, Question, QuestionId, Responses, SubmissionSink,
    SurveyDefinition,
};

use crate::navigation::{self, Advance};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Presenting the question at this index.
    Answering(usize),
    /// Every required question was answered and the last question passed.
    Submitted,
}

/// State machine for one response session.
///
/// Starts at `Answering(0)` with empty responses. Failed operations leave the
/// state untouched. Once `Submitted`, only [`Session::submit`] remains.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    survey: &'a SurveyDefinition,
    state: FlowState,
    responses: Responses,
}

impl<'a> Session<'a> {
    /// Start a session at the first question.
    pub fn start(survey: &'a SurveyDefinition) -> Result<Self, FlowError> {
        if survey.is_empty() {
            return Err(FlowError::EmptySurvey);
        }
        tracing::debug!(survey = %survey.id, questions = survey.len(), "session started");
        Ok(Self {
            survey,
            state: FlowState::Answering(0),
            responses: Responses::new(),
        })
    }

    /// Resume a session with answers collected earlier, at the first question.
    pub fn resume(survey: &'a SurveyDefinition, responses: Responses) -> Result<Self, FlowError> {
        let mut session = Self::start(survey)?;
        session.responses = responses;
        Ok(session)
    }

    /// The survey being answered.
    pub fn survey(&self) -> &'a SurveyDefinition {
        self.survey
    }

    /// Current state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Check if the session has reached `Submitted`.
    pub fn is_submitted(&self) -> bool {
        self.state == FlowState::Submitted
    }

    /// Answers collected so far.
    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    fn cursor(&self) -> Result<usize, FlowError> {
        match self.state {
            FlowState::Answering(cursor) => Ok(cursor),
            FlowState::Submitted => Err(FlowError::AlreadySubmitted),
        }
    }

    /// The question being presented.
    pub fn current(&self) -> Result<&'a Question, FlowError> {
        navigation::current_question(self.survey, self.cursor()?)
    }

    /// Position of the current question.
    pub fn progress(&self) -> Result<Progress, FlowError> {
        Ok(navigation::progress(self.survey, self.cursor()?))
    }

    /// The answer recorded for the current question, if any.
    pub fn current_answer(&self) -> Option<&Answer> {
        let question = self.current().ok()?;
        self.responses.get(question.id())
    }

    /// Record an answer for the current question.
    ///
    /// The answer must match the question's kind and offered values.
    pub fn answer(&mut self, answer: impl Into<Answer>) -> Result<(), FlowError> {
        let question = self.current()?;
        let answer = answer.into();
        question.check(&answer)?;
        tracing::debug!(question = %question.id(), kind = answer.type_name(), "answer recorded");
        self.responses.record(question.id().clone(), answer);
        Ok(())
    }

    /// Forget the answer to the current question.
    pub fn clear(&mut self) -> Result<Option<Answer>, FlowError> {
        let question = self.current()?;
        Ok(self.responses.remove(question.id()))
    }

    /// Move past the current question; see [`navigation::advance`].
    pub fn advance(&mut self) -> Result<FlowState, FlowError> {
        let cursor = self.cursor()?;
        self.state = match navigation::advance(self.survey, cursor, &self.responses)? {
            Advance::To(next) => FlowState::Answering(next),
            Advance::Complete => {
                tracing::info!(
                    survey = %self.survey.id,
                    answers = self.responses.len(),
                    "survey submitted"
                );
                FlowState::Submitted
            }
        };
        Ok(self.state)
    }

    /// Step back one question.
    pub fn retreat(&mut self) -> Result<FlowState, FlowError> {
        let cursor = self.cursor()?;
        self.state = FlowState::Answering(navigation::retreat(cursor));
        Ok(self.state)
    }

    /// Move straight to a question, e.g. one still missing an answer.
    pub fn jump_to(&mut self, question: &QuestionId) -> Result<FlowState, FlowError> {
        self.cursor()?;
        let index = navigation::jump(self.survey, question)?;
        tracing::debug!(question = %question, to = index, "jumped");
        self.state = FlowState::Answering(index);
        Ok(self.state)
    }

    /// Check if every required question is answered.
    pub fn is_complete(&self) -> bool {
        navigation::is_complete(self.survey, &self.responses)
    }

    /// Hand the responses of a submitted session to `sink`.
    pub fn submit<S: SubmissionSink>(self, sink: &mut S) -> Result<Responses, FlowError> {
        if !self.is_submitted() {
            return Err(FlowError::NotSubmitted);
        }
        sink.submit(self.survey, &self.responses)
            .map_err(FlowError::submission)?;
        Ok(self.responses)
    }

    /// Take the responses of a submitted session without a sink.
    pub fn into_responses(self) -> Result<Responses, FlowError> {
        if !self.is_submitted() {
            return Err(FlowError::NotSubmitted);
        }
        Ok(self.responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_questions() -> SurveyDefinition {
        SurveyDefinition::new(
            "s",
            "Two questions",
            vec![
                Question::text("Q1", "What is your age?").required(),
                Question::single_choice("Q2", "Do you agree?", ["Yes", "No"]).required(),
            ],
        )
    }

    #[derive(Default)]
    struct Collect(Vec<Responses>);

    impl SubmissionSink for Collect {
        type Error = std::convert::Infallible;

        fn submit(
            &mut self,
            _survey: &SurveyDefinition,
            responses: &Responses,
        ) -> Result<(), Self::Error> {
            self.0.push(responses.clone());
            Ok(())
        }
    }

    #[test]
    fn end_to_end_two_questions() {
        let survey = two_questions();
        let mut session = Session::start(&survey).unwrap();
        assert_eq!(session.state(), FlowState::Answering(0));

        assert!(session.advance().unwrap_err().is_blocked());
        assert_eq!(session.state(), FlowState::Answering(0));

        session.answer("42").unwrap();
        assert_eq!(session.advance().unwrap(), FlowState::Answering(1));

        session.answer(Answer::Choice("Yes".into())).unwrap();
        assert_eq!(session.advance().unwrap(), FlowState::Submitted);

        let mut sink = Collect::default();
        let responses = session.submit(&mut sink).unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(sink.0, vec![responses]);
    }

    #[test]
    fn empty_survey_cannot_start() {
        let survey = SurveyDefinition::new("s", "Empty", vec![]);
        assert!(matches!(Session::start(&survey), Err(FlowError::EmptySurvey)));
    }

    #[test]
    fn wrong_shape_is_refused() {
        let survey = two_questions();
        let mut session = Session::start(&survey).unwrap();
        let err = session.answer(Answer::Scale(3)).unwrap_err();
        assert!(matches!(err, FlowError::ShapeMismatch { .. }));
        assert!(session.responses().is_empty());
    }

    #[test]
    fn retreat_keeps_answers() {
        let survey = two_questions();
        let mut session = Session::start(&survey).unwrap();
        session.answer("42").unwrap();
        session.advance().unwrap();
        assert_eq!(session.retreat().unwrap(), FlowState::Answering(0));
        assert_eq!(session.current_answer(), Some(&Answer::Text("42".into())));
        assert_eq!(session.retreat().unwrap(), FlowState::Answering(0));
    }

    #[test]
    fn submitted_session_refuses_navigation() {
        let survey = SurveyDefinition::new("s", "One", vec![Question::text("q", "Anything?")]);
        let mut session = Session::start(&survey).unwrap();
        assert_eq!(session.advance().unwrap(), FlowState::Submitted);
        assert!(matches!(session.retreat(), Err(FlowError::AlreadySubmitted)));
        assert!(matches!(session.advance(), Err(FlowError::AlreadySubmitted)));
        assert!(matches!(session.current(), Err(FlowError::AlreadySubmitted)));
    }

    #[test]
    fn submit_before_finishing_fails() {
        let survey = two_questions();
        let session = Session::start(&survey).unwrap();
        let mut sink = Collect::default();
        assert!(matches!(
            session.submit(&mut sink),
            Err(FlowError::NotSubmitted)
        ));
        assert!(sink.0.is_empty());
    }

    #[test]
    fn jump_to_moves_cursor() {
        let survey = two_questions();
        let mut session = Session::start(&survey).unwrap();
        assert_eq!(
            session.jump_to(&QuestionId::new("Q2")).unwrap(),
            FlowState::Answering(1)
        );
        assert!(session.jump_to(&QuestionId::new("nope")).is_err());
        assert_eq!(session.state(), FlowState::Answering(1));
    }

    #[test]
    fn clear_removes_current_answer() {
        let survey = two_questions();
        let mut session = Session::start(&survey).unwrap();
        session.answer("42").unwrap();
        assert_eq!(session.clear().unwrap(), Some(Answer::Text("42".into())));
        assert!(session.advance().unwrap_err().is_blocked());
    }
}
