//! Authoring surveys question by question.

use survey_flow_types::{DefinitionError, Question, QuestionId, SurveyDefinition};

/// Builder for a `SurveyDefinition`.
///
/// Mirrors an authoring screen: questions can be added, removed, reordered,
/// toggled required and given options and branches. [`SurveyBuilder::build`]
/// validates the result, so branch targets are checked before anyone answers.
#[derive(Debug, Clone)]
pub struct SurveyBuilder {
    id: String,
    title: String,
    description: String,
    questions: Vec<Question>,
}

impl SurveyBuilder {
    /// Start a survey with an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            questions: Vec::new(),
        }
    }

    /// Start from an existing definition, e.g. to edit a stored survey.
    pub fn from_definition(definition: SurveyDefinition) -> Self {
        Self {
            id: definition.id,
            title: definition.title,
            description: definition.description,
            questions: definition.questions,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a question.
    pub fn question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Append a question in place.
    pub fn push(&mut self, question: Question) -> &mut Self {
        self.questions.push(question);
        self
    }

    /// Questions added so far.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Question, DefinitionError> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(DefinitionError::IndexOutOfRange { index, len })
    }

    fn check_index(&self, index: usize) -> Result<(), DefinitionError> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(DefinitionError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })
        }
    }

    /// Remove the question at `index`.
    ///
    /// Branches elsewhere that pointed at it are dropped too.
    pub fn remove_question(&mut self, index: usize) -> Result<Question, DefinitionError> {
        self.check_index(index)?;
        let removed = self.questions.remove(index);
        for question in &mut self.questions {
            question
                .branches_mut()
                .retain(|_, target| *target != *removed.id());
        }
        Ok(removed)
    }

    /// Move the question at `from` so it ends up at `to`.
    pub fn move_question(&mut self, from: usize, to: usize) -> Result<(), DefinitionError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let question = self.questions.remove(from);
        self.questions.insert(to, question);
        Ok(())
    }

    /// Flip the required flag of the question at `index`.
    pub fn toggle_required(&mut self, index: usize) -> Result<bool, DefinitionError> {
        let question = self.get_mut(index)?;
        let required = !question.is_required();
        question.set_required(required);
        Ok(required)
    }

    /// Add an option to a choice or ranking question.
    pub fn add_option(
        &mut self,
        index: usize,
        option: impl Into<String>,
    ) -> Result<(), DefinitionError> {
        let question = self.get_mut(index)?;
        let id = question.id().clone();
        question
            .kind_mut()
            .options_mut()
            .ok_or(DefinitionError::MissingOptions(id))?
            .push(option.into());
        Ok(())
    }

    /// Remove an option, along with any branch hanging off it.
    pub fn remove_option(
        &mut self,
        index: usize,
        option_index: usize,
    ) -> Result<String, DefinitionError> {
        let question = self.get_mut(index)?;
        let id = question.id().clone();
        let options = question
            .kind_mut()
            .options_mut()
            .ok_or(DefinitionError::MissingOptions(id))?;
        let len = options.len();
        if option_index >= len {
            return Err(DefinitionError::IndexOutOfRange {
                index: option_index,
                len,
            });
        }
        let option = options.remove(option_index);
        question.branches_mut().remove(&option);
        Ok(option)
    }

    /// Route `option` of the question at `index` to the question `target`.
    pub fn branch(
        &mut self,
        index: usize,
        option: impl Into<String>,
        target: impl Into<QuestionId>,
    ) -> Result<(), DefinitionError> {
        let target = target.into();
        if !self.questions.iter().any(|q| q.id() == &target) {
            return Err(DefinitionError::UnknownQuestion(target));
        }
        let question = self.get_mut(index)?;
        question.branches_mut().insert(option.into(), target);
        Ok(())
    }

    /// Remove the branch for `option` of the question at `index`.
    pub fn clear_branch(
        &mut self,
        index: usize,
        option: &str,
    ) -> Result<Option<QuestionId>, DefinitionError> {
        Ok(self.get_mut(index)?.branches_mut().remove(option))
    }

    /// Validate and produce the definition.
    pub fn build(self) -> Result<SurveyDefinition, DefinitionError> {
        let definition = SurveyDefinition {
            id: self.id,
            title: self.title,
            description: self.description,
            questions: self.questions,
        };
        definition.validate()?;
        tracing::info!(
            survey = %definition.id,
            questions = definition.len(),
            "survey definition built"
        );
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SurveyBuilder {
        SurveyBuilder::new("youth", "Youth Engagement Program")
            .description("Tell us what you would join")
            .question(Question::single_choice("role", "Who are you?", ["Parent", "Teen"]).required())
            .question(Question::text("parent", "What would help your family?"))
            .question(Question::text("teen", "What would you like to do?"))
    }

    #[test]
    fn builds_valid_survey() {
        let mut builder = draft();
        builder.branch(0, "Teen", "teen").unwrap();
        let survey = builder.build().unwrap();
        assert_eq!(survey.len(), 3);
        assert_eq!(survey.description, "Tell us what you would join");
        assert_eq!(
            survey.questions[0].branch_for("Teen"),
            Some(&QuestionId::new("teen"))
        );
    }

    #[test]
    fn branch_to_unknown_question_fails_fast() {
        let mut builder = draft();
        assert_eq!(
            builder.branch(0, "Teen", "nope"),
            Err(DefinitionError::UnknownQuestion(QuestionId::new("nope")))
        );
    }

    #[test]
    fn removing_question_drops_branches_to_it() {
        let mut builder = draft();
        builder.branch(0, "Teen", "teen").unwrap();
        let removed = builder.remove_question(2).unwrap();
        assert_eq!(removed.id().as_str(), "teen");
        assert!(builder.questions()[0].branches().is_empty());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn move_question_reorders() {
        let mut builder = draft();
        builder.move_question(2, 0).unwrap();
        let ids: Vec<_> = builder.questions().iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, vec!["teen", "role", "parent"]);
        assert!(builder.move_question(0, 3).is_err());
    }

    #[test]
    fn toggle_required_flips() {
        let mut builder = draft();
        assert_eq!(builder.toggle_required(1), Ok(true));
        assert_eq!(builder.toggle_required(1), Ok(false));
        assert!(builder.toggle_required(9).is_err());
    }

    #[test]
    fn options_can_be_added_and_removed() {
        let mut builder = draft();
        builder.add_option(0, "Volunteer").unwrap();
        builder.branch(0, "Volunteer", "parent").unwrap();
        assert_eq!(builder.remove_option(0, 2), Ok("Volunteer".to_string()));
        assert!(builder.questions()[0].branch_for("Volunteer").is_none());
        assert_eq!(
            builder.add_option(1, "x"),
            Err(DefinitionError::MissingOptions(QuestionId::new("parent")))
        );
    }

    #[test]
    fn build_reports_authoring_errors() {
        let builder = SurveyBuilder::new("s", "")
            .question(Question::text("q", "Prompt"));
        assert_eq!(builder.build(), Err(DefinitionError::EmptyTitle));
    }

    #[test]
    fn from_definition_round_trips() {
        let survey = draft().build().unwrap();
        let rebuilt = SurveyBuilder::from_definition(survey.clone()).build().unwrap();
        assert_eq!(rebuilt, survey);
    }
}
