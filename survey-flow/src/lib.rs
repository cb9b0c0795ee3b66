//! # survey-flow
//!
//! Run authored surveys: navigation, branching, completeness and submission.
//! Presentation-agnostic.
//!
//! A [`SurveyDefinition`] is an ordered list of [`Question`]s. A [`Session`]
//! walks one responder through it, refusing to move past required questions
//! that have no usable answer and following branches attached to choice
//! options. [`run`] drives a session with any [`Responder`].
//!
//! ## Usage
//!
//! ```rust
//! use survey_flow::{Answer, FlowState, Question, Session, SurveyDefinition};
//!
//! let survey = SurveyDefinition::new(
//!     "pulse",
//!     "Pulse check",
//!     vec![
//!         Question::text("age", "What is your age?").required(),
//!         Question::scale("mood", "How are you today?"),
//!     ],
//! );
//!
//! let mut session = Session::start(&survey).unwrap();
//! assert!(session.advance().unwrap_err().is_blocked());
//!
//! session.answer("42").unwrap();
//! session.advance().unwrap();
//! session.answer(Answer::Scale(4)).unwrap();
//! assert_eq!(session.advance().unwrap(), FlowState::Submitted);
//! ```
//!
//! ## Authoring
//!
//! [`SurveyBuilder`] edits a survey (add, remove, reorder questions, options
//! and branches) and validates it on [`SurveyBuilder::build`].
//!
//! ## Storage and catalog
//!
//! [`InMemoryStore`] keeps survey records and their submissions.
//! [`CatalogQuery`] searches, sorts and pages the summaries a store lists.
//!
//! ## Responders
//!
//! Responders are separate crates that implement `Responder`:
//! - `survey-flow-dialoguer` - CLI prompts via dialoguer

pub use survey_flow_types::*;

pub mod navigation;
pub use navigation::Advance;

mod session;
pub use session::{FlowState, Session};

mod builder;
pub use builder::SurveyBuilder;

mod store;
pub use store::InMemoryStore;

mod catalog;
pub use catalog::{CatalogPage, CatalogQuery, DEFAULT_PER_PAGE, SortDirection, SortField};

mod runner;
pub use runner::{RunError, run, run_and_submit};

// Scripted responder for running surveys without user interaction
mod scripted;
pub use scripted::{ScriptError, ScriptedResponder};
