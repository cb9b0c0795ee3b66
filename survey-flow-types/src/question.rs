use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Answer, FlowError, QuestionId};

/// Lowest point of a scale question when none is given.
pub const DEFAULT_SCALE_MIN: i64 = 1;

/// Highest point of a scale question when none is given.
pub const DEFAULT_SCALE_MAX: i64 = 5;

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier of this question within its survey.
    id: QuestionId,

    /// The prompt text shown to the responder.
    prompt: String,

    /// Whether an answer must be given before moving past this question.
    #[serde(default)]
    required: bool,

    /// The kind of question (determines the answer shape).
    #[serde(flatten)]
    kind: QuestionKind,

    /// Option value to the question navigation jumps to when it is selected.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    branches: BTreeMap<String, QuestionId>,
}

impl Question {
    /// Create a new, optional question without branches.
    pub fn new(id: impl Into<QuestionId>, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            required: false,
            kind,
            branches: BTreeMap::new(),
        }
    }

    /// Create a free-text question.
    pub fn text(id: impl Into<QuestionId>, prompt: impl Into<String>) -> Self {
        Self::new(id, prompt, QuestionKind::Text)
    }

    /// Create a pick-one question.
    pub fn single_choice<I, S>(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            prompt,
            QuestionKind::SingleChoice {
                options: strings(options),
            },
        )
    }

    /// Create a pick-any question.
    pub fn multi_choice<I, S>(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            prompt,
            QuestionKind::MultiChoice {
                options: strings(options),
            },
        )
    }

    /// Create a scale question with the default `1..=5` range.
    pub fn scale(id: impl Into<QuestionId>, prompt: impl Into<String>) -> Self {
        Self::new(
            id,
            prompt,
            QuestionKind::Scale {
                min: DEFAULT_SCALE_MIN,
                max: DEFAULT_SCALE_MAX,
            },
        )
    }

    /// Create a scale question with explicit bounds.
    pub fn scale_between(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        min: i64,
        max: i64,
    ) -> Self {
        Self::new(id, prompt, QuestionKind::Scale { min, max })
    }

    /// Create a matrix question (one column picked per row).
    pub fn matrix<R, C, S, T>(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        rows: R,
        columns: C,
    ) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(
            id,
            prompt,
            QuestionKind::Matrix {
                rows: strings(rows),
                columns: strings(columns),
            },
        )
    }

    /// Create a ranking question.
    pub fn ranking<I, S>(id: impl Into<QuestionId>, prompt: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            prompt,
            QuestionKind::Ranking {
                items: strings(items),
            },
        )
    }

    /// Mark this question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Redirect navigation to `target` when `option` is selected.
    pub fn with_branch(mut self, option: impl Into<String>, target: impl Into<QuestionId>) -> Self {
        self.branches.insert(option.into(), target.into());
        self
    }

    /// Get the question identifier.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Set the prompt text.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Check if an answer is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Set whether an answer is required.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get a mutable reference to the question kind.
    pub fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    /// Get the branch table.
    pub fn branches(&self) -> &BTreeMap<String, QuestionId> {
        &self.branches
    }

    /// Get a mutable reference to the branch table.
    pub fn branches_mut(&mut self) -> &mut BTreeMap<String, QuestionId> {
        &mut self.branches
    }

    /// Get the branch target for an option, if any.
    pub fn branch_for(&self, option: &str) -> Option<&QuestionId> {
        self.branches.get(option)
    }

    /// Resolve the branch taken by an answer to this question.
    ///
    /// A choice answer follows the branch of its option. A multi-choice answer
    /// follows the branch of the first selected option, in the order the
    /// options are listed on the question.
    pub fn branch_target(&self, answer: &Answer) -> Option<&QuestionId> {
        if self.branches.is_empty() {
            return None;
        }
        match (&self.kind, answer) {
            (QuestionKind::SingleChoice { .. }, Answer::Choice(option)) => self.branch_for(option),
            (QuestionKind::MultiChoice { options }, Answer::MultiChoice(selected)) => options
                .iter()
                .filter(|option| selected.contains(*option))
                .find_map(|option| self.branch_for(option)),
            _ => None,
        }
    }

    /// Check that an answer has the shape and values this question accepts.
    pub fn check(&self, answer: &Answer) -> Result<(), FlowError> {
        let reason = match (&self.kind, answer) {
            (QuestionKind::Text, Answer::Text(_)) => None,
            (QuestionKind::SingleChoice { options }, Answer::Choice(choice)) => {
                (!options.contains(choice)).then(|| format!("'{choice}' is not an option"))
            }
            (QuestionKind::MultiChoice { options }, Answer::MultiChoice(selected)) => selected
                .iter()
                .find(|choice| !options.contains(*choice))
                .map(|choice| format!("'{choice}' is not an option")),
            (QuestionKind::Scale { min, max }, Answer::Scale(value)) => (value < min
                || value > max)
                .then(|| format!("{value} is outside {min}..={max}")),
            (QuestionKind::Matrix { rows, columns }, Answer::Matrix(cells)) => {
                cells.iter().find_map(|(row, column)| {
                    if !rows.contains(row) {
                        Some(format!("'{row}' is not a row"))
                    } else if !columns.contains(column) {
                        Some(format!("'{column}' is not a column"))
                    } else {
                        None
                    }
                })
            }
            (QuestionKind::Ranking { items }, Answer::Ranking(ranks)) => check_ranking(items, ranks),
            (kind, answer) => {
                return Err(FlowError::ShapeMismatch {
                    question: self.id.clone(),
                    expected: kind.answer_name(),
                    actual: answer.type_name(),
                });
            }
        };

        match reason {
            Some(reason) => Err(FlowError::InvalidAnswer {
                question: self.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

fn check_ranking(items: &[String], ranks: &BTreeMap<String, u32>) -> Option<String> {
    let highest = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let mut seen = BTreeSet::new();
    for (item, rank) in ranks {
        if !items.contains(item) {
            return Some(format!("'{item}' is not a ranked item"));
        }
        if *rank == 0 || *rank > highest {
            return Some(format!("rank {rank} is outside 1..={highest}"));
        }
        if !seen.insert(*rank) {
            return Some(format!("rank {rank} is used more than once"));
        }
    }
    None
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// The kind of question, determining the answer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free text input.
    Text,

    /// Choose exactly one of the options.
    SingleChoice { options: Vec<String> },

    /// Choose any number of the options.
    MultiChoice { options: Vec<String> },

    /// Pick a point on an integer scale.
    Scale {
        #[serde(default = "default_scale_min")]
        min: i64,
        #[serde(default = "default_scale_max")]
        max: i64,
    },

    /// Pick one column for every row.
    Matrix { rows: Vec<String>, columns: Vec<String> },

    /// Rank every item, 1 being the most important.
    Ranking { items: Vec<String> },
}

fn default_scale_min() -> i64 {
    DEFAULT_SCALE_MIN
}

fn default_scale_max() -> i64 {
    DEFAULT_SCALE_MAX
}

impl QuestionKind {
    /// The options of a choice question, or the items of a ranking question.
    pub fn options(&self) -> &[String] {
        match self {
            Self::SingleChoice { options } | Self::MultiChoice { options } => options,
            Self::Ranking { items } => items,
            Self::Text | Self::Scale { .. } | Self::Matrix { .. } => &[],
        }
    }

    /// Mutable access to the options, for kinds that carry them.
    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::SingleChoice { options } | Self::MultiChoice { options } => Some(options),
            Self::Ranking { items } => Some(items),
            Self::Text | Self::Scale { .. } | Self::Matrix { .. } => None,
        }
    }

    /// Check if options on this kind may carry branches.
    pub fn can_branch(&self) -> bool {
        matches!(self, Self::SingleChoice { .. } | Self::MultiChoice { .. })
    }

    /// Name of the `Answer` variant this kind expects.
    pub fn answer_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::SingleChoice { .. } => "Choice",
            Self::MultiChoice { .. } => "MultiChoice",
            Self::Scale { .. } => "Scale",
            Self::Matrix { .. } => "Matrix",
            Self::Ranking { .. } => "Ranking",
        }
    }

    /// Name of this kind for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::SingleChoice { .. } => "Multiple Choice",
            Self::MultiChoice { .. } => "Checkbox",
            Self::Scale { .. } => "Scale",
            Self::Matrix { .. } => "Matrix",
            Self::Ranking { .. } => "Ranking",
        }
    }
}
