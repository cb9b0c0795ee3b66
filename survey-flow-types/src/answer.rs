use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A single answer collected for a question.
///
/// Each variant corresponds to one `QuestionKind`; a session only accepts the
/// variant that matches the question it is recorded for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Free text (Text questions).
    Text(String),

    /// The selected option (SingleChoice questions).
    Choice(String),

    /// The selected options (MultiChoice questions).
    MultiChoice(BTreeSet<String>),

    /// The selected point on a scale (Scale questions).
    Scale(i64),

    /// Row to selected column (Matrix questions).
    Matrix(BTreeMap<String, String>),

    /// Item to rank, 1 being the highest (Ranking questions).
    Ranking(BTreeMap<String, u32>),
}

impl Answer {
    /// Build a multi-choice answer from any list of options.
    pub fn multi_choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MultiChoice(options.into_iter().map(Into::into).collect())
    }

    /// Build a matrix answer from `(row, column)` pairs.
    pub fn matrix<I, R, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
        R: Into<String>,
        C: Into<String>,
    {
        Self::Matrix(
            cells
                .into_iter()
                .map(|(row, column)| (row.into(), column.into()))
                .collect(),
        )
    }

    /// Build a ranking answer from `(item, rank)` pairs.
    pub fn ranking<I, S>(ranks: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self::Ranking(
            ranks
                .into_iter()
                .map(|(item, rank)| (item.into(), rank))
                .collect(),
        )
    }

    /// Check whether the answer carries no usable value.
    ///
    /// Whitespace-only text counts as empty. A scale value is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Choice(s) => s.trim().is_empty(),
            Self::MultiChoice(set) => set.is_empty(),
            Self::Scale(_) => false,
            Self::Matrix(cells) => cells.is_empty(),
            Self::Ranking(ranks) => ranks.is_empty(),
        }
    }

    /// Try to get this answer as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this answer as a chosen option.
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this answer as a set of chosen options.
    pub fn as_multi_choice(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::MultiChoice(set) => Some(set),
            _ => None,
        }
    }

    /// Try to get this answer as a scale value.
    pub fn as_scale(&self) -> Option<i64> {
        match self {
            Self::Scale(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this answer as a matrix.
    pub fn as_matrix(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Matrix(cells) => Some(cells),
            _ => None,
        }
    }

    /// Try to get this answer as a ranking.
    pub fn as_ranking(&self) -> Option<&BTreeMap<String, u32>> {
        match self {
            Self::Ranking(ranks) => Some(ranks),
            _ => None,
        }
    }

    /// Get the type name of this answer for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Choice(_) => "Choice",
            Self::MultiChoice(_) => "MultiChoice",
            Self::Scale(_) => "Scale",
            Self::Matrix(_) => "Matrix",
            Self::Ranking(_) => "Ranking",
        }
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Answer {
    fn from(v: i64) -> Self {
        Self::Scale(v)
    }
}

impl From<BTreeSet<String>> for Answer {
    fn from(set: BTreeSet<String>) -> Self {
        Self::MultiChoice(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_empty() {
        assert!(Answer::Text("   ".into()).is_empty());
        assert!(Answer::Choice(String::new()).is_empty());
        assert!(!Answer::Text("42".into()).is_empty());
    }

    #[test]
    fn scale_is_never_empty() {
        assert!(!Answer::Scale(0).is_empty());
    }

    #[test]
    fn multi_choice_deduplicates() {
        let answer = Answer::multi_choice(["Health Fair", "Health Fair", "Cultural Festival"]);
        assert_eq!(answer.as_multi_choice().map(BTreeSet::len), Some(2));
    }

    #[test]
    fn accessors_reject_other_variants() {
        let answer = Answer::Scale(4);
        assert_eq!(answer.as_scale(), Some(4));
        assert!(answer.as_text().is_none());
        assert!(answer.as_matrix().is_none());
        assert_eq!(answer.type_name(), "Scale");
    }

    #[test]
    fn json_shape_is_tagged() {
        let json = serde_json::to_string(&Answer::Choice("Yes".into())).unwrap();
        assert_eq!(json, r#"{"type":"choice","value":"Yes"}"#);
    }
}
