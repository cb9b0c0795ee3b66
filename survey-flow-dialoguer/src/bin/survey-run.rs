//! Run a survey from a TOML file on the command line.
//!
//! ```text
//! survey-run demos/youth_engagement.toml --config demos/runner.toml
//! ```
//!
//! Responses are printed as JSON on stdout, or written to `--output`.
//! Logs go to stderr; set `RUST_LOG` to override the configured filter.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use survey_flow::{Responses, RunError, run};
use survey_flow_dialoguer::{DialoguerResponder, RunnerConfig, load_survey};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "survey-run", version, about = "Answer a survey interactively")]
struct Args {
    /// Survey definition (TOML).
    survey: PathBuf,

    /// Runner settings (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the plain prompt theme.
    #[arg(long)]
    plain: bool,

    /// Do not offer a way back to the previous question.
    #[arg(long)]
    no_back: bool,

    /// Write responses to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(&self, mut config: RunnerConfig) -> RunnerConfig {
        if self.plain {
            config.colorful = false;
        }
        if self.no_back {
            config.allow_back = false;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        config
    }
}

#[derive(Serialize)]
struct Submission<'a> {
    survey: &'a str,
    responses: &'a Responses,
}

fn init_tracing(config: &RunnerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = args.apply(RunnerConfig::load_or_default(args.config.as_deref())?);
    init_tracing(&config);

    let survey = load_survey(&args.survey)?;
    let responder = if config.colorful {
        DialoguerResponder::new()
    } else {
        DialoguerResponder::plain()
    };
    let mut responder = responder.allow_back(config.allow_back);

    let responses = match run(&survey, &mut responder) {
        Ok(responses) => responses,
        Err(RunError::Cancelled) => {
            tracing::info!(survey = %survey.id, "cancelled by user");
            eprintln!("Survey cancelled.");
            return Ok(ExitCode::from(130));
        }
        Err(err) => return Err(err).context("survey run failed"),
    };

    let json = serde_json::to_string_pretty(&Submission {
        survey: &survey.id,
        responses: &responses,
    })?;
    match &config.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "responses written");
        }
        None => println!("{json}"),
    }
    Ok(ExitCode::SUCCESS)
}
