use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{DefinitionError, Question, QuestionId, QuestionKind};

/// An authored survey: metadata plus the ordered list of questions.
///
/// The order of `questions` is the default navigation order. A definition is
/// immutable from the responder's point of view; sessions only borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    /// Identifier of the survey in its store.
    pub id: String,

    /// Title shown above every question.
    pub title: String,

    /// Short explanation shown before the first question.
    #[serde(default)]
    pub description: String,

    /// All questions, in navigation order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl SurveyDefinition {
    /// Create a new survey definition with the given questions.
    pub fn new(id: impl Into<String>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            questions,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get the question at an index.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Find a question by id.
    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Get the index of a question by id.
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Check if the survey has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Index of the last question, if there is one.
    pub fn last_index(&self) -> Option<usize> {
        self.questions.len().checked_sub(1)
    }

    /// Check the definition for authoring mistakes.
    ///
    /// Reports the first problem found, walking questions in order.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.id.trim().is_empty() {
            return Err(DefinitionError::EmptySurveyId);
        }
        if self.title.trim().is_empty() {
            return Err(DefinitionError::EmptyTitle);
        }

        let mut ids = HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            if question.id().is_empty() {
                return Err(DefinitionError::EmptyQuestionId { index });
            }
            if !ids.insert(question.id()) {
                return Err(DefinitionError::DuplicateQuestionId(question.id().clone()));
            }
            validate_question(question)?;
        }

        for question in &self.questions {
            for (option, target) in question.branches() {
                if !ids.contains(target) {
                    return Err(DefinitionError::UnknownBranchTarget {
                        question: question.id().clone(),
                        option: option.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn validate_question(question: &Question) -> Result<(), DefinitionError> {
    let id = question.id();
    if question.prompt().trim().is_empty() {
        return Err(DefinitionError::EmptyPrompt(id.clone()));
    }

    match question.kind() {
        QuestionKind::Text => {}
        QuestionKind::SingleChoice { options }
        | QuestionKind::MultiChoice { options }
        | QuestionKind::Ranking { items: options } => unique_entries(id, options)?,
        QuestionKind::Scale { min, max } => {
            if min >= max {
                return Err(DefinitionError::InvalidScale {
                    question: id.clone(),
                    min: *min,
                    max: *max,
                });
            }
        }
        QuestionKind::Matrix { rows, columns } => {
            if rows.is_empty() || columns.is_empty() {
                return Err(DefinitionError::EmptyMatrix(id.clone()));
            }
            unique_entries(id, rows)?;
            unique_entries(id, columns)?;
        }
    }

    if question.branches().is_empty() {
        return Ok(());
    }
    if !question.kind().can_branch() {
        return Err(DefinitionError::BranchNotSupported(id.clone()));
    }
    let options = question.kind().options();
    for option in question.branches().keys() {
        if !options.contains(option) {
            return Err(DefinitionError::UnknownBranchOption {
                question: id.clone(),
                option: option.clone(),
            });
        }
    }
    Ok(())
}

fn unique_entries(id: &QuestionId, entries: &[String]) -> Result<(), DefinitionError> {
    if entries.is_empty() {
        return Err(DefinitionError::MissingOptions(id.clone()));
    }
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.as_str()) {
            return Err(DefinitionError::DuplicateOption {
                question: id.clone(),
                option: entry.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(questions: Vec<Question>) -> SurveyDefinition {
        SurveyDefinition::new("needs", "Community Needs Assessment", questions)
    }

    #[test]
    fn lookup_helpers() {
        let survey = survey(vec![
            Question::text("age", "What is your age?"),
            Question::scale("satisfaction", "How satisfied are you?"),
        ]);
        assert_eq!(survey.len(), 2);
        assert_eq!(survey.last_index(), Some(1));
        assert_eq!(survey.position_of(&QuestionId::new("satisfaction")), Some(1));
        assert!(survey.find(&QuestionId::new("missing")).is_none());
    }

    #[test]
    fn valid_survey_passes() {
        let survey = survey(vec![
            Question::single_choice("services", "Which?", ["Youth", "Seniors"])
                .with_branch("Seniors", "seniors"),
            Question::text("youth", "Tell us about youth programs"),
            Question::text("seniors", "Tell us about senior care"),
        ]);
        assert_eq!(survey.validate(), Ok(()));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let survey = survey(vec![Question::text("q1", "A"), Question::text("q1", "B")]);
        assert_eq!(
            survey.validate(),
            Err(DefinitionError::DuplicateQuestionId(QuestionId::new("q1")))
        );
    }

    #[test]
    fn rejects_unknown_branch_target() {
        let survey = survey(vec![
            Question::single_choice("q1", "Pick", ["A", "B"]).with_branch("A", "q9"),
        ]);
        assert!(matches!(
            survey.validate(),
            Err(DefinitionError::UnknownBranchTarget { .. })
        ));
    }

    #[test]
    fn rejects_branch_on_missing_option() {
        let survey = survey(vec![
            Question::single_choice("q1", "Pick", ["A"]).with_branch("Z", "q1"),
        ]);
        assert!(matches!(
            survey.validate(),
            Err(DefinitionError::UnknownBranchOption { .. })
        ));
    }

    #[test]
    fn rejects_branch_on_text() {
        let survey = survey(vec![Question::text("q1", "Say").with_branch("x", "q1")]);
        assert_eq!(
            survey.validate(),
            Err(DefinitionError::BranchNotSupported(QuestionId::new("q1")))
        );
    }

    #[test]
    fn rejects_bad_shapes() {
        let no_options = survey(vec![Question::single_choice("q1", "Pick", Vec::<String>::new())]);
        assert_eq!(
            no_options.validate(),
            Err(DefinitionError::MissingOptions(QuestionId::new("q1")))
        );

        let flat_scale = survey(vec![Question::scale_between("q1", "Rate", 3, 3)]);
        assert!(matches!(
            flat_scale.validate(),
            Err(DefinitionError::InvalidScale { .. })
        ));

        let empty_matrix = survey(vec![Question::matrix(
            "q1",
            "Rate",
            ["Quality"],
            Vec::<String>::new(),
        )]);
        assert_eq!(
            empty_matrix.validate(),
            Err(DefinitionError::EmptyMatrix(QuestionId::new("q1")))
        );
    }

    #[test]
    fn rejects_blank_title() {
        let survey = SurveyDefinition::new("s1", "  ", vec![]);
        assert_eq!(survey.validate(), Err(DefinitionError::EmptyTitle));
    }

    #[test]
    fn deserializes_from_toml() {
        let survey: SurveyDefinition = toml::from_str(
            r#"
            id = "pulse"
            title = "Pulse check"

            [[questions]]
            id = "mood"
            prompt = "How are you?"
            required = true
            type = "single_choice"
            options = ["Good", "Bad"]
            branches = { Bad = "why" }

            [[questions]]
            id = "why"
            prompt = "What went wrong?"
            type = "text"
            "#,
        )
        .unwrap();
        assert_eq!(survey.len(), 2);
        assert_eq!(survey.validate(), Ok(()));
        assert_eq!(
            survey.questions[0].branch_for("Bad"),
            Some(&QuestionId::new("why"))
        );
    }
}
