//! Dialoguer responder implementation for the Responder trait.

use std::collections::BTreeMap;

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{FuzzySelect, Input, MultiSelect, Select};
use survey_flow::{
    Answer, FlowError, Progress, Question, QuestionKind, Reply, Responder, Responses,
    SurveyDefinition,
};
use thiserror::Error;

/// Typed at a text prompt to go back one question.
pub const BACK_TOKEN: &str = "<";

const BACK_LABEL: &str = "« Back";
const SKIP_LABEL: &str = "(skip)";

/// Choice lists longer than this get a fuzzy finder instead of a plain list.
const FUZZY_THRESHOLD: usize = 8;

/// Error type for the Dialoguer responder.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

/// Navigation entries offered next to a question's own values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extras {
    skip: bool,
    back: bool,
}

impl Extras {
    fn new(question: &Question, progress: Progress, allow_back: bool) -> Self {
        Self {
            skip: !question.is_required(),
            back: allow_back && progress.position > 1,
        }
    }

    fn labels(self) -> Vec<String> {
        let mut labels = Vec::new();
        if self.skip {
            labels.push(SKIP_LABEL.to_string());
        }
        if self.back {
            labels.push(BACK_LABEL.to_string());
        }
        labels
    }

    /// Reply for the `offset`-th extra entry.
    fn reply(self, offset: usize) -> Reply {
        match (self.skip, offset) {
            (true, 0) => Reply::Next,
            _ => Reply::Back,
        }
    }
}

/// Interpret a line typed at a text prompt.
fn text_reply(input: &str, extras: Extras) -> Reply {
    let trimmed = input.trim();
    if extras.back && trimmed == BACK_TOKEN {
        Reply::Back
    } else if trimmed.is_empty() {
        Reply::Next
    } else {
        Reply::Answer(Answer::Text(trimmed.to_string()))
    }
}

/// Interpret a line typed at a scale prompt.
fn scale_reply(input: &str, min: i64, max: i64, extras: Extras) -> Result<Reply, String> {
    let trimmed = input.trim();
    if extras.back && trimmed == BACK_TOKEN {
        return Ok(Reply::Back);
    }
    if trimmed.is_empty() {
        return Ok(Reply::Next);
    }
    match trimmed.parse::<i64>() {
        Ok(value) if (min..=max).contains(&value) => Ok(Reply::Answer(Answer::Scale(value))),
        _ => Err(format!("Enter a whole number from {min} to {max}")),
    }
}

/// Map a picked list index onto a reply: an option, or one of the extras.
fn pick_reply(index: usize, options: &[String], extras: Extras) -> Reply {
    match options.get(index) {
        Some(option) => Reply::Answer(Answer::Choice(option.clone())),
        None => extras.reply(index - options.len()),
    }
}

/// Map the ticked entries of a multi-select onto a reply.
///
/// Ticking an extra wins over any ticked options. An empty selection on a
/// question that had no answer yet is a skip.
fn multi_reply(picked: &[usize], options: &[String], had_answer: bool, extras: Extras) -> Reply {
    if let Some(&extra) = picked.iter().filter(|&&index| index >= options.len()).min() {
        return extras.reply(extra - options.len());
    }
    if picked.is_empty() && !had_answer {
        return Reply::Next;
    }
    Reply::Answer(Answer::multi_choice(
        picked.iter().filter_map(|&index| options.get(index).cloned()),
    ))
}

/// Index in `remaining` to preselect for `rank`, taken from an earlier ranking.
fn ranking_default(
    remaining: &[String],
    earlier: Option<&BTreeMap<String, u32>>,
    rank: u32,
) -> usize {
    earlier
        .and_then(|ranks| {
            remaining
                .iter()
                .position(|item| ranks.get(item) == Some(&rank))
        })
        .unwrap_or(0)
}

fn hint(extras: Extras) -> &'static str {
    if extras.back {
        " (enter < to go back)"
    } else {
        ""
    }
}

/// Dialoguer responder for interactive CLI prompts.
///
/// Questions are asked one at a time. Optional questions offer a skip entry,
/// and every question after the first can go back unless disabled.
#[derive(Debug, Clone)]
pub struct DialoguerResponder {
    /// Use colorful theme for prompts.
    colorful: bool,
    /// Offer a way back to the previous question.
    allow_back: bool,
}

impl Default for DialoguerResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerResponder {
    /// Create a new Dialoguer responder with default (colorful) theme.
    pub fn new() -> Self {
        Self {
            colorful: true,
            allow_back: true,
        }
    }

    /// Create a responder with plain (no color) theme.
    pub fn plain() -> Self {
        Self {
            colorful: false,
            ..Self::new()
        }
    }

    /// Enable or disable going back.
    pub fn allow_back(mut self, allow_back: bool) -> Self {
        self.allow_back = allow_back;
        self
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, dialoguer::Error> {
        let theme = self.theme();
        if items.len() > FUZZY_THRESHOLD {
            FuzzySelect::with_theme(&*theme)
                .with_prompt(prompt)
                .items(items)
                .default(default)
                .interact_opt()
        } else {
            Select::with_theme(&*theme)
                .with_prompt(prompt)
                .items(items)
                .default(default)
                .interact_opt()
        }
    }

    fn ask_text(
        &self,
        prompt: &str,
        current: Option<&Answer>,
        extras: Extras,
    ) -> Result<Reply, dialoguer::Error> {
        let theme = self.theme();
        let mut input = Input::<String>::with_theme(&*theme)
            .with_prompt(format!("{prompt}{}", hint(extras)))
            .allow_empty(true);
        if let Some(text) = current.and_then(Answer::as_text) {
            input = input.default(text.to_string());
        }
        let line = input.interact_text()?;
        Ok(text_reply(&line, extras))
    }

    fn ask_scale(
        &self,
        prompt: &str,
        (min, max): (i64, i64),
        current: Option<&Answer>,
        extras: Extras,
    ) -> Result<Reply, dialoguer::Error> {
        loop {
            let theme = self.theme();
            let mut input = Input::<String>::with_theme(&*theme)
                .with_prompt(format!("{prompt} [{min}-{max}]{}", hint(extras)))
                .allow_empty(true);
            if let Some(value) = current.and_then(Answer::as_scale) {
                input = input.default(value.to_string());
            }
            let line = input.interact_text()?;
            match scale_reply(&line, min, max, extras) {
                Ok(reply) => return Ok(reply),
                Err(msg) => println!("Error: {msg}"),
            }
        }
    }

    fn ask_single_choice(
        &self,
        prompt: &str,
        options: &[String],
        current: Option<&Answer>,
        extras: Extras,
    ) -> Result<Reply, dialoguer::Error> {
        let mut items = options.to_vec();
        items.extend(extras.labels());
        let default = current
            .and_then(Answer::as_choice)
            .and_then(|chosen| options.iter().position(|option| option == chosen))
            .unwrap_or(0);

        Ok(match self.select(prompt, &items, default)? {
            Some(index) => pick_reply(index, options, extras),
            None => Reply::Cancel,
        })
    }

    fn ask_multi_choice(
        &self,
        prompt: &str,
        options: &[String],
        current: Option<&Answer>,
        extras: Extras,
    ) -> Result<Reply, dialoguer::Error> {
        let selected = current.and_then(Answer::as_multi_choice);
        let mut items = options.to_vec();
        let mut defaults: Vec<bool> = options
            .iter()
            .map(|option| selected.is_some_and(|set| set.contains(option)))
            .collect();
        let labels = extras.labels();
        defaults.extend(labels.iter().map(|_| false));
        items.extend(labels);

        let theme = self.theme();
        let picked = MultiSelect::with_theme(&*theme)
            .with_prompt(prompt)
            .items(&items)
            .defaults(&defaults)
            .interact_opt()?;

        Ok(match picked {
            Some(picked) => multi_reply(&picked, options, selected.is_some(), extras),
            None => Reply::Cancel,
        })
    }

    fn ask_matrix(
        &self,
        prompt: &str,
        (rows, columns): (&[String], &[String]),
        current: Option<&Answer>,
        extras: Extras,
    ) -> Result<Reply, dialoguer::Error> {
        println!("{prompt}");
        let existing = current.and_then(Answer::as_matrix);
        let mut items = columns.to_vec();
        items.extend(extras.labels());

        let mut cells = BTreeMap::new();
        for row in rows {
            let default = existing
                .and_then(|cells| cells.get(row))
                .and_then(|chosen| columns.iter().position(|column| column == chosen))
                .unwrap_or(0);
            match self.select(&format!("  {row}"), &items, default)? {
                Some(index) if index < columns.len() => {
                    cells.insert(row.clone(), columns[index].clone());
                }
                Some(index) => return Ok(extras.reply(index - columns.len())),
                None => return Ok(Reply::Cancel),
            }
        }
        Ok(Reply::Answer(Answer::Matrix(cells)))
    }

    fn ask_ranking(
        &self,
        prompt: &str,
        items: &[String],
        current: Option<&Answer>,
        extras: Extras,
    ) -> Result<Reply, dialoguer::Error> {
        println!("{prompt}");
        let earlier = current.and_then(Answer::as_ranking);
        let mut remaining = items.to_vec();
        let mut ranks = BTreeMap::new();

        let mut rank: u32 = 1;
        // The first pick always shows the extras, even for a single item.
        while !remaining.is_empty() && (rank == 1 || remaining.len() > 1) {
            let mut choices = remaining.clone();
            if rank == 1 {
                choices.extend(extras.labels());
            }
            let default = ranking_default(&remaining, earlier, rank);
            match self.select(&format!("  Rank {rank}"), &choices, default)? {
                Some(index) if index < remaining.len() => {
                    ranks.insert(remaining.remove(index), rank);
                }
                Some(index) => return Ok(extras.reply(index - remaining.len())),
                None => return Ok(Reply::Cancel),
            }
            rank += 1;
        }
        if let Some(last) = remaining.pop() {
            println!("  Rank {rank}: {last}");
            ranks.insert(last, rank);
        }
        Ok(Reply::Answer(Answer::Ranking(ranks)))
    }

    fn ask(
        &self,
        question: &Question,
        current: Option<&Answer>,
        extras: Extras,
    ) -> Result<Reply, dialoguer::Error> {
        let prompt = question.prompt();
        match question.kind() {
            QuestionKind::Text => self.ask_text(prompt, current, extras),
            QuestionKind::SingleChoice { options } => {
                self.ask_single_choice(prompt, options, current, extras)
            }
            QuestionKind::MultiChoice { options } => {
                self.ask_multi_choice(prompt, options, current, extras)
            }
            QuestionKind::Scale { min, max } => {
                self.ask_scale(prompt, (*min, *max), current, extras)
            }
            QuestionKind::Matrix { rows, columns } => {
                self.ask_matrix(prompt, (rows.as_slice(), columns.as_slice()), current, extras)
            }
            QuestionKind::Ranking { items } => {
                self.ask_ranking(prompt, items, current, extras)
            }
        }
    }
}

impl Responder for DialoguerResponder {
    type Error = DialoguerError;

    fn start(&mut self, survey: &SurveyDefinition) -> Result<(), DialoguerError> {
        println!("{}", survey.title);
        if !survey.description.is_empty() {
            println!("{}", survey.description);
        }
        println!();
        Ok(())
    }

    fn respond(
        &mut self,
        question: &Question,
        progress: Progress,
        current: Option<&Answer>,
    ) -> Result<Reply, DialoguerError> {
        println!();
        println!("{progress}");
        let extras = Extras::new(question, progress, self.allow_back);
        match self.ask(question, current, extras) {
            Ok(reply) => Ok(reply),
            Err(e) if is_cancelled(&e) => Ok(Reply::Cancel),
            Err(e) => Err(DialoguerError::Dialoguer(e)),
        }
    }

    fn rejected(&mut self, _question: &Question, error: &FlowError) -> Result<(), DialoguerError> {
        println!("Error: {error}");
        Ok(())
    }

    fn finish(
        &mut self,
        survey: &SurveyDefinition,
        responses: &Responses,
    ) -> Result<(), DialoguerError> {
        println!();
        println!(
            "Thank you for completing {} ({} answers recorded).",
            survey.title,
            responses.len()
        );
        Ok(())
    }
}
