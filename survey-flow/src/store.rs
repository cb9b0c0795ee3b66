//! In-memory survey storage.

use std::collections::BTreeMap;

use survey_flow_types::{
    Responses, StoreError, SubmissionSink, SurveyDefinition, SurveyRecord, SurveyStore,
    SurveySummary,
};

/// A `SurveyStore` kept entirely in memory.
///
/// Suitable for tests, demos and single-process tools. Surveys are ordered by
/// id. Also acts as a `SubmissionSink`, so a finished session can be handed
/// straight back to the store it was loaded from.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: BTreeMap<String, SurveyRecord>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Create a store holding the given records.
    pub fn with_records(records: impl IntoIterator<Item = SurveyRecord>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.create(record)?;
        }
        Ok(store)
    }

    /// Borrow a stored record without cloning it.
    pub fn record(&self, id: &str) -> Option<&SurveyRecord> {
        self.records.get(id)
    }

    /// Number of stored surveys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SurveyStore for InMemoryStore {
    fn create(&mut self, record: SurveyRecord) -> Result<(), StoreError> {
        let id = record.id().to_string();
        if self.records.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        tracing::info!(survey = %id, status = %record.status, "survey created");
        self.records.insert(id, record);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<SurveyRecord, StoreError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(&mut self, record: SurveyRecord) -> Result<(), StoreError> {
        let slot = self
            .records
            .get_mut(record.id())
            .ok_or_else(|| StoreError::NotFound(record.id().to_string()))?;
        tracing::info!(survey = %record.id(), status = %record.status, "survey updated");
        *slot = record;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<SurveyRecord, StoreError> {
        let record = self
            .records
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tracing::info!(survey = %id, "survey deleted");
        Ok(record)
    }

    fn list(&self) -> Vec<SurveySummary> {
        self.records.values().map(SurveyRecord::summary).collect()
    }

    fn record_submission(&mut self, id: &str, responses: Responses) -> Result<usize, StoreError> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !record.status.accepts_responses() {
            return Err(StoreError::NotAccepting {
                id: id.to_string(),
                status: record.status,
            });
        }
        record.submissions.push(responses);
        let count = record.response_count();
        tracing::info!(survey = %id, responses = count, "submission stored");
        Ok(count)
    }
}

impl SubmissionSink for InMemoryStore {
    type Error = StoreError;

    fn submit(&mut self, survey: &SurveyDefinition, responses: &Responses) -> Result<(), StoreError> {
        self.record_submission(&survey.id, responses.clone())
            .map(|_| ())
    }
}
