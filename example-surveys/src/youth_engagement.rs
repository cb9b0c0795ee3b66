use survey_flow::{Question, SurveyDefinition};

/// Question ids of the youth engagement survey.
pub mod ids {
    pub const PARTICIPATES: &str = "participates";
    pub const PROGRAMS: &str = "programs";
    pub const BARRIERS: &str = "barriers";
    pub const RATING: &str = "rating";
    pub const SUGGESTIONS: &str = "suggestions";
}

/// A branching survey.
///
/// Participants say which programs they attend and rate them. Everyone else
/// is asked what keeps them away and then skips to suggestions. Questions on
/// only one path stay optional, otherwise the other path could never complete.
pub fn youth_engagement() -> SurveyDefinition {
    SurveyDefinition::new(
        "youth-engagement",
        "Youth Engagement Program",
        vec![
            Question::single_choice(
                ids::PARTICIPATES,
                "Do you take part in any of our youth programs?",
                ["Yes", "No"],
            )
            .required()
            .with_branch("Yes", ids::PROGRAMS)
            .with_branch("No", ids::BARRIERS),
            Question::multi_choice(
                ids::PROGRAMS,
                "Which programs do you attend?",
                ["Sports", "Arts", "Tutoring", "Mentoring"],
            )
            .with_branch("Sports", ids::RATING)
            .with_branch("Arts", ids::RATING)
            .with_branch("Tutoring", ids::RATING)
            .with_branch("Mentoring", ids::RATING),
            Question::multi_choice(
                ids::BARRIERS,
                "What keeps you from joining?",
                ["Schedule", "Cost", "Transportation", "Not interested"],
            )
            .with_branch("Schedule", ids::SUGGESTIONS)
            .with_branch("Cost", ids::SUGGESTIONS)
            .with_branch("Transportation", ids::SUGGESTIONS)
            .with_branch("Not interested", ids::SUGGESTIONS),
            Question::scale_between(ids::RATING, "How would you rate the programs?", 1, 10),
            Question::text(ids::SUGGESTIONS, "What would you like us to offer?"),
        ],
    )
    .with_description("Tell us how our youth programs work for you.")
}
