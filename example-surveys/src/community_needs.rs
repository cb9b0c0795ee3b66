use survey_flow::{Question, SurveyDefinition};

/// Question ids of the community needs assessment.
pub mod ids {
    pub const AGE: &str = "age";
    pub const SERVICES: &str = "services";
    pub const EVENTS: &str = "events";
    pub const SATISFACTION: &str = "satisfaction";
    pub const RATINGS: &str = "ratings";
    pub const PROJECTS: &str = "projects";
}

/// Six questions, one of every kind. Only the events question is optional.
pub fn community_needs() -> SurveyDefinition {
    SurveyDefinition::new(
        "community-needs",
        "Community Needs Assessment",
        vec![
            Question::text(ids::AGE, "What is your age?").required(),
            Question::single_choice(
                ids::SERVICES,
                "Which of the following services do you think our community needs the most?",
                [
                    "Mental Health Support",
                    "Youth Programs",
                    "Senior Care",
                    "Job Training",
                ],
            )
            .required(),
            Question::multi_choice(
                ids::EVENTS,
                "Which of the following community events would you be interested in attending?",
                [
                    "Community Cleanup",
                    "Cultural Festival",
                    "Health Fair",
                    "Educational Workshops",
                ],
            ),
            Question::scale(
                ids::SATISFACTION,
                "On a scale of 1-5, how satisfied are you with the current community services?",
            )
            .required(),
            Question::matrix(
                ids::RATINGS,
                "Please rate the following aspects of our community services:",
                ["Accessibility", "Quality", "Variety"],
                ["Poor", "Fair", "Good", "Excellent"],
            )
            .required(),
            Question::ranking(
                ids::PROJECTS,
                "Please rank the following community improvement projects in order of importance (1 being most important):",
                [
                    "Park Renovation",
                    "Library Expansion",
                    "Community Center Upgrade",
                    "Public Transportation Improvement",
                ],
            )
            .required(),
        ],
    )
    .with_description("Help us understand the needs of our community to improve our services.")
}
