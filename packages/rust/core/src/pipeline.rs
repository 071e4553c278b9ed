//! End-to-end flows: career summary generation and question answering.
//!
//! Input routing happens before any network call: text carrying a reserved
//! `@` prefix resolves to a typed command and never reaches the scraper or
//! the bridge.

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use careerguide_commands::Command;
use careerguide_llm::GeminiClient;
use careerguide_scrape::{SectionFilter, fetch_details};
use careerguide_shared::{CareerGuideError, CareerSummary, Result};

use crate::prompt;

/// Outcome of routing one line of user input.
#[derive(Debug)]
pub enum AskOutcome {
    /// The input was a question; this is the generated answer.
    Answer(String),
    /// The input was a recognized or unrecognized `@` command. Acting on it
    /// belongs to the productivity collaborators, not to this crate.
    Command(Command),
}

/// Generate the standalone summary for one career.
#[instrument(skip_all, fields(career = %career.name))]
pub async fn summarize_career(
    client: &Client,
    llm: &GeminiClient,
    filter: &SectionFilter,
    career: &CareerSummary,
) -> Result<String> {
    let url = parse_career_url(career)?;
    let sections = fetch_details(client, &url, filter).await?;
    let context = prompt::career_context(&sections);
    let answer = llm
        .generate(&prompt::summary_prompt(&career.name, &context))
        .await?;

    info!(answer_len = answer.len(), "summary generated");
    Ok(answer)
}

/// Route one line of user input about a career.
///
/// Command input short-circuits to a typed [`Command`] without touching the
/// network. Question input fetches the career's details fresh and answers
/// grounded in them.
#[instrument(skip_all, fields(career = %career.name))]
pub async fn ask_about_career(
    client: &Client,
    llm: &GeminiClient,
    filter: &SectionFilter,
    career: &CareerSummary,
    input: &str,
    today: NaiveDate,
) -> Result<AskOutcome> {
    match careerguide_commands::parse(input, today) {
        Command::Question { text } => {
            let url = parse_career_url(career)?;
            let sections = fetch_details(client, &url, filter).await?;
            let context = prompt::career_context(&sections);
            let answer = llm
                .generate(&prompt::question_prompt(&career.name, &context, &text))
                .await?;
            Ok(AskOutcome::Answer(answer))
        }
        command => {
            info!(?command, "input routed to a typed command");
            Ok(AskOutcome::Command(command))
        }
    }
}

fn parse_career_url(career: &CareerSummary) -> Result<Url> {
    Url::parse(&career.url).map_err(|e| {
        CareerGuideError::validation(format!("career URL {} did not parse: {e}", career.url))
    })
}
