//! # survey-flow-dialoguer
//!
//! Dialoguer responder for survey-flow.
//!
//! This crate puts survey questions to a person on the command line using the
//! `dialoguer` library, one question at a time, in a classic CLI wizard style.
//! It also ships the `survey-run` binary, which runs a survey read from a
//! TOML file and prints the responses as JSON.
//!
//! ## Example
//!
//! ```rust,ignore
//! use survey_flow::{Question, SurveyDefinition, run};
//! use survey_flow_dialoguer::DialoguerResponder;
//!
//! fn main() -> anyhow::Result<()> {
//!     let survey = SurveyDefinition::new(
//!         "pulse",
//!         "Pulse check",
//!         vec![Question::scale("mood", "How are you today?").required()],
//!     );
//!     let responses = run(&survey, &mut DialoguerResponder::new())?;
//!     println!("{} answers", responses.len());
//!     Ok(())
//! }
//! ```

mod config;
mod responder;

pub use config::{ConfigError, DEFAULT_LOG_FILTER, RunnerConfig};
pub use responder::{BACK_TOKEN, DialoguerError, DialoguerResponder};

use std::path::Path;

use survey_flow::{DefinitionError, SurveyDefinition};
use thiserror::Error;

/// Error type for loading a survey definition file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid survey in {path}: {source}")]
    Invalid {
        path: std::path::PathBuf,
        #[source]
        source: DefinitionError,
    },
}

/// Parse and validate a survey definition written in TOML.
pub fn parse_survey(text: &str, path: &Path) -> Result<SurveyDefinition, LoadError> {
    let survey: SurveyDefinition = toml::from_str(text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    survey.validate().map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(survey)
}

/// Read, parse and validate a survey definition file.
pub fn load_survey(path: &Path) -> Result<SurveyDefinition, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let survey = parse_survey(&text, path)?;
    tracing::info!(
        survey = %survey.id,
        questions = survey.len(),
        path = %path.display(),
        "survey loaded"
    );
    Ok(survey)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = include_str!("../demos/youth_engagement.toml");

    #[test]
    fn demo_survey_parses() {
        let survey = parse_survey(DEMO, Path::new("demos/youth_engagement.toml")).unwrap();
        assert_eq!(survey.id, "youth-engagement");
        assert_eq!(survey.len(), 5);
        assert!(survey.questions()[0].is_required());
    }

    #[test]
    fn invalid_branch_is_reported() {
        let text = r#"
            id = "broken"
            title = "Broken"

            [[questions]]
            id = "start"
            prompt = "Pick one"
            type = "single_choice"
            options = ["A", "B"]
            branches = { A = "nowhere" }
        "#;
        let err = parse_survey(text, Path::new("broken.toml")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                source: DefinitionError::UnknownBranchTarget { .. },
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_survey("id = ", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
