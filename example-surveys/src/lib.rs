//! Sample surveys and a seeded catalog for tests and demos.

pub mod community_needs;
pub mod youth_engagement;

pub use community_needs::community_needs;
pub use youth_engagement::youth_engagement;

use survey_flow::{
    InMemoryStore, NaiveDate, StoreError, SurveyDefinition, SurveyRecord, SurveyStatus,
    SurveySummary,
};

struct Listing {
    id: &'static str,
    title: &'static str,
    responses: usize,
    status: SurveyStatus,
    created_at: (i32, u32, u32),
}

const LISTINGS: [Listing; 5] = [
    Listing {
        id: "1",
        title: "Community Health Assessment",
        responses: 150,
        status: SurveyStatus::Active,
        created_at: (2023, 5, 1),
    },
    Listing {
        id: "2",
        title: "Youth Engagement Program",
        responses: 75,
        status: SurveyStatus::Draft,
        created_at: (2023, 5, 15),
    },
    Listing {
        id: "3",
        title: "Senior Care Satisfaction",
        responses: 200,
        status: SurveyStatus::Closed,
        created_at: (2023, 4, 20),
    },
    Listing {
        id: "4",
        title: "Mental Health Awareness",
        responses: 100,
        status: SurveyStatus::Active,
        created_at: (2023, 5, 10),
    },
    Listing {
        id: "5",
        title: "Education Resources Survey",
        responses: 50,
        status: SurveyStatus::Active,
        created_at: (2023, 5, 5),
    },
];

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The five catalog rows used by the catalog tests and the demo listing.
pub fn catalog_summaries() -> Vec<SurveySummary> {
    LISTINGS
        .iter()
        .map(|listing| SurveySummary {
            id: listing.id.to_string(),
            title: listing.title.to_string(),
            status: listing.status,
            created_at: date(listing.created_at),
            responses: listing.responses,
        })
        .collect()
}

/// A store holding both sample surveys, open for responses.
pub fn seeded_store() -> Result<InMemoryStore, StoreError> {
    let created = date((2023, 5, 1));
    InMemoryStore::with_records([
        SurveyRecord::new(community_needs(), SurveyStatus::Active, created),
        SurveyRecord::new(youth_engagement(), SurveyStatus::Active, created),
    ])
}

/// Every sample survey definition.
pub fn all() -> Vec<SurveyDefinition> {
    vec![community_needs(), youth_engagement()]
}
