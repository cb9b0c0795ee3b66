//! Integration tests for survey-flow

use example_surveys::{community_needs, seeded_store, youth_engagement};
use survey_flow::{
    Answer, CatalogQuery, FlowState, Question, QuestionId, RunError, ScriptedResponder, Session,
    SortDirection, SortField, StoreError, SurveyBuilder, SurveyDefinition, SurveyStatus,
    SurveyStore, run, run_and_submit,
};

fn community_script() -> ScriptedResponder {
    use example_surveys::community_needs::ids;

    ScriptedResponder::new()
        .with_text(ids::AGE, "34")
        .with_choice(ids::SERVICES, "Youth Programs")
        .with_scale(ids::SATISFACTION, 4)
        .with_answer(
            ids::RATINGS,
            Answer::matrix([
                ("Accessibility", "Good"),
                ("Quality", "Fair"),
                ("Variety", "Excellent"),
            ]),
        )
        .with_answer(
            ids::PROJECTS,
            Answer::ranking([
                ("Park Renovation", 2),
                ("Library Expansion", 4),
                ("Community Center Upgrade", 3),
                ("Public Transportation Improvement", 1),
            ]),
        )
}

fn visited_ids(visited: &[QuestionId]) -> Vec<&str> {
    visited.iter().map(QuestionId::as_str).collect()
}

#[test]
fn test_community_needs_full_run() {
    let survey = community_needs();
    let mut responder = community_script();
    let responses = run(&survey, &mut responder).unwrap();

    // The optional events question is skipped without an answer.
    assert_eq!(responses.len(), 5);
    assert_eq!(
        responses.get_text(&QuestionId::new("age")).unwrap(),
        "34"
    );
    assert_eq!(
        responses.get_scale(&QuestionId::new("satisfaction")).unwrap(),
        4
    );
    assert_eq!(responder.visited().len(), 6);
}

#[test]
fn test_community_needs_partial_matrix_is_rejected() {
    let survey = community_needs();
    let mut responder = community_script().with_answer(
        "ratings",
        Answer::matrix([("Accessibility", "Good"), ("Quality", "Fair")]),
    );
    let err = run(&survey, &mut responder).unwrap_err();
    assert!(matches!(err, RunError::Responder(_)));
    assert!(err.to_string().contains("ratings"));
}

#[test]
fn test_session_back_and_forth() {
    let survey = community_needs();
    let mut session = Session::start(&survey).unwrap();
    session.answer("34").unwrap();
    assert_eq!(session.advance().unwrap(), FlowState::Answering(1));
    assert_eq!(session.retreat().unwrap(), FlowState::Answering(0));
    assert_eq!(session.advance().unwrap(), FlowState::Answering(1));
    assert_eq!(session.progress().unwrap().to_string(), "Question 2 of 6");
}

#[test]
fn test_youth_engagement_participant_path() {
    let survey = youth_engagement();
    let mut responder = ScriptedResponder::new()
        .with_choice("participates", "Yes")
        .with_answer("programs", Answer::multi_choice(["Arts", "Tutoring"]))
        .with_scale("rating", 8);

    let responses = run(&survey, &mut responder).unwrap();
    assert_eq!(responses.len(), 3);
    assert_eq!(
        visited_ids(responder.visited()),
        vec!["participates", "programs", "rating", "suggestions"]
    );
}

#[test]
fn test_youth_engagement_non_participant_skips_programs() {
    let survey = youth_engagement();
    let mut responder = ScriptedResponder::new()
        .with_choice("participates", "No")
        .with_answer("barriers", Answer::multi_choice(["Cost"]))
        .with_text("suggestions", "Evening sessions");

    let responses = run(&survey, &mut responder).unwrap();
    assert!(!responses.contains(&QuestionId::new("programs")));
    assert_eq!(
        visited_ids(responder.visited()),
        vec!["participates", "barriers", "suggestions"]
    );
}

#[test]
fn test_completion_jumps_to_skipped_required_question() {
    let survey = SurveyDefinition::new(
        "s",
        "Skipping",
        vec![
            Question::single_choice("start", "Pick one", ["A", "B"])
                .required()
                .with_branch("A", "end"),
            Question::text("middle", "Skipped by A").required(),
            Question::text("end", "Last"),
        ],
    );
    let mut responder = ScriptedResponder::new()
        .with_choice("start", "A")
        .with_text("middle", "filled in");

    let responses = run(&survey, &mut responder).unwrap();
    assert_eq!(responses.get_text(&QuestionId::new("middle")).unwrap(), "filled in");
    assert_eq!(
        visited_ids(responder.visited()),
        vec!["start", "end", "middle", "end"]
    );
}

#[test]
fn test_back_reply_revisits_previous_question() {
    let survey = community_needs();
    let mut responder = community_script().back_once_at("services");
    run(&survey, &mut responder).unwrap();
    assert_eq!(
        visited_ids(&responder.visited()[..4]),
        vec!["age", "services", "age", "services"]
    );
}

#[test]
fn test_run_and_submit_stores_responses() {
    let mut store = seeded_store().unwrap();
    let survey = store.get("community-needs").unwrap().definition;

    run_and_submit(&survey, &mut community_script(), &mut store).unwrap();
    run_and_submit(&survey, &mut community_script(), &mut store).unwrap();

    assert_eq!(store.get("community-needs").unwrap().response_count(), 2);
}

#[test]
fn test_submit_to_closed_survey_fails() {
    let mut store = seeded_store().unwrap();
    let mut record = store.get("community-needs").unwrap();
    record.status = SurveyStatus::Closed;
    store.update(record.clone()).unwrap();

    let err = run_and_submit(&record.definition, &mut community_script(), &mut store).unwrap_err();
    let flow = match err {
        RunError::Flow(flow) => flow,
        other => panic!("expected a flow error, got {other:?}"),
    };
    let source = std::error::Error::source(&flow).expect("submission error has a source");
    assert_eq!(
        source.downcast_ref::<StoreError>(),
        Some(&StoreError::NotAccepting {
            id: "community-needs".into(),
            status: SurveyStatus::Closed,
        })
    );
}

#[test]
fn test_catalog_over_store_listing() {
    let mut store = seeded_store().unwrap();
    let survey = store.get("youth-engagement").unwrap().definition;
    let mut responder = ScriptedResponder::new()
        .with_choice("participates", "No")
        .with_answer("barriers", Answer::multi_choice(["Schedule"]));
    run_and_submit(&survey, &mut responder, &mut store).unwrap();

    let page = CatalogQuery::new()
        .sort_by(SortField::Responses, SortDirection::Descending)
        .apply(store.list());
    assert_eq!(page.total_items, 2);
    assert_eq!(page.items[0].id, "youth-engagement");
    assert_eq!(page.items[0].responses, 1);

    let page = CatalogQuery::new().search("community").apply(store.list());
    assert_eq!(page.items.len(), 1);
}

#[test]
fn test_catalog_over_sample_listing() {
    let page = CatalogQuery::new()
        .sort_by(SortField::CreatedAt, SortDirection::Descending)
        .apply(example_surveys::catalog_summaries());
    let titles: Vec<_> = page.items.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles[0], "Youth Engagement Program");
    assert_eq!(titles[4], "Senior Care Satisfaction");
}

#[test]
fn test_builder_edits_survive_a_run() {
    let mut builder = SurveyBuilder::from_definition(community_needs());
    builder.toggle_required(2).unwrap();
    let survey = builder.build().unwrap();
    assert!(survey.questions()[2].is_required());

    let mut responder = community_script().with_answer("events", Answer::multi_choice(["Health Fair"]));
    let responses = run(&survey, &mut responder).unwrap();
    assert_eq!(responses.len(), 6);
}
