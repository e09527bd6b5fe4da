// src/pipeline/parse.rs

//! Parse a judge page and deliver the resulting tasks.

use crate::error::{AppError, Result};
use crate::models::Sendable;
use crate::parsers::{Choices, FanOut, Parser, ParserRegistry, Selection};
use crate::services::{Delivery, SignalSink};
use crate::utils::http::PageFetcher;

/// Result of [`run_parse`].
#[derive(Debug)]
pub enum ParseOutcome {
    /// At least one task was parsed. `failures` lists contest links that
    /// could not be parsed, keyed by URL.
    Tasks {
        tasks: Vec<Sendable>,
        failures: Vec<(String, AppError)>,
    },
    /// Several parsers accept the URL and no choice was given.
    Ambiguous(Choices),
}

/// Select a parser for `url` and run it.
///
/// `html` is the already-loaded page, if any; otherwise the page is fetched.
/// Contest parsers always fetch their linked problems through `fetcher`.
pub async fn run_parse(
    registry: &ParserRegistry,
    fetcher: &dyn PageFetcher,
    fan_out: &FanOut,
    url: &str,
    choice: Option<&str>,
    html: Option<String>,
) -> Result<ParseOutcome> {
    let selected = match registry.select(url, choice)? {
        Selection::Parser(parser) => parser,
        Selection::Ambiguous(choices) => {
            log::info!("{} parsers accept {}", choices.len(), url);
            return Ok(ParseOutcome::Ambiguous(choices));
        }
    };
    log::info!("Parsing {} with {} ({})", url, selected.name(), selected.kind());

    let html = match html {
        Some(html) => html,
        None => fetcher.fetch(url).await?,
    };

    match selected.parser() {
        Parser::Problem(parser) => {
            let task = parser.parse(url, &html)?;
            Ok(ParseOutcome::Tasks {
                tasks: vec![task],
                failures: Vec::new(),
            })
        }
        Parser::Contest(parser) => {
            let (tasks, failures) = parser.parse(url, &html, fetcher, fan_out).await?.into_parts();
            if tasks.is_empty() {
                return Err(AppError::NoRecords {
                    url: url.to_string(),
                });
            }
            if !failures.is_empty() {
                log::warn!("{} of {} problems failed", failures.len(), tasks.len() + failures.len());
            }
            Ok(ParseOutcome::Tasks { tasks, failures })
        }
    }
}

/// Deliver every task in order, one [`Signal::TaskSent`](crate::services::Signal)
/// per task. Returns the number of tasks handed to delivery.
pub async fn deliver_tasks(
    delivery: &Delivery,
    tasks: &[Sendable],
    origin: &dyn SignalSink,
) -> Result<usize> {
    for task in tasks {
        let payload = task.to_payload()?;
        delivery.deliver(&payload, origin).await;
    }
    Ok(tasks.len())
}
