use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a question within a survey, e.g. `"age"` or `"q3"`.
///
/// Used as the key in `Responses` and as the target of branches.
/// Identifiers are unique within a `SurveyDefinition`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId {
    id: String,
}

impl QuestionId {
    /// Create a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Check if the identifier is empty (never valid in an authored survey).
    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for QuestionId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&QuestionId> for QuestionId {
    fn from(id: &QuestionId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for QuestionId {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let id = QuestionId::new("age");
        assert_eq!(id.as_str(), "age");
    }

    #[test]
    fn blank_is_empty() {
        assert!(QuestionId::new("").is_empty());
        assert!(QuestionId::new("  ").is_empty());
        assert!(!QuestionId::new("q1").is_empty());
    }

    #[test]
    fn display() {
        let id = QuestionId::new("services");
        assert_eq!(format!("{}", id), "services");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = QuestionId::new("q1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"q1\"");
    }
}
