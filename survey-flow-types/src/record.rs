use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Responses, SurveyDefinition};

/// Publication status of a stored survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    /// Being authored; not open for responses.
    Draft,
    /// Open for responses.
    Active,
    /// No longer accepting responses.
    Closed,
}

impl SurveyStatus {
    /// Check if responses may be submitted.
    pub fn accepts_responses(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Closed => "Closed",
        };
        f.write_str(label)
    }
}

/// A survey as kept by a `SurveyStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub definition: SurveyDefinition,
    pub status: SurveyStatus,
    pub created_at: NaiveDate,
    /// Every submitted response set, oldest first.
    #[serde(default)]
    pub submissions: Vec<Responses>,
}

impl SurveyRecord {
    /// Create a record with no submissions.
    pub fn new(definition: SurveyDefinition, status: SurveyStatus, created_at: NaiveDate) -> Self {
        Self {
            definition,
            status,
            created_at,
            submissions: Vec::new(),
        }
    }

    /// Identifier of the stored survey.
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Number of submitted response sets.
    pub fn response_count(&self) -> usize {
        self.submissions.len()
    }

    /// Catalog row for this record.
    pub fn summary(&self) -> SurveySummary {
        SurveySummary {
            id: self.definition.id.clone(),
            title: self.definition.title.clone(),
            status: self.status,
            created_at: self.created_at,
            responses: self.response_count(),
        }
    }
}

/// One row of the survey catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub id: String,
    pub title: String,
    pub status: SurveyStatus,
    pub created_at: NaiveDate,
    pub responses: usize,
}
