// src/parsers/contest.rs

//! Generic contest parser.
//!
//! Collects problem links from a listing page, fetches every problem and hands
//! it to a delegate [`ProblemParser`]. One broken problem never takes the rest
//! of the batch down with it: its error is kept next to its URL.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Batch, FetcherConfig, Sendable};
use crate::parsers::ProblemParser;
use crate::utils::http::PageFetcher;
use crate::utils::{dom, resolve_url};

/// How many problem pages a contest parse fetches at once.
#[derive(Debug, Clone)]
pub struct FanOut {
    pub max_concurrent: usize,
    pub request_delay: Duration,
}

impl Default for FanOut {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            request_delay: Duration::ZERO,
        }
    }
}

impl From<&FetcherConfig> for FanOut {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent.max(1),
            request_delay: Duration::from_millis(config.request_delay_ms),
        }
    }
}

/// Outcome for one linked problem.
#[derive(Debug)]
pub struct ProblemResult {
    pub url: String,
    pub outcome: Result<Sendable>,
}

/// Everything a contest parse produced, in listing order.
#[derive(Debug)]
pub struct ContestBatch {
    pub url: String,
    pub results: Vec<ProblemResult>,
}

impl ContestBatch {
    /// Successfully parsed tasks.
    pub fn tasks(&self) -> impl Iterator<Item = &Sendable> {
        self.results.iter().filter_map(|r| r.outcome.as_ref().ok())
    }

    /// Failed problems with the error that stopped each one.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &AppError)> {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.url.as_str(), e)))
    }

    pub fn task_count(&self) -> usize {
        self.tasks().count()
    }

    /// Split into tasks and attributed failures.
    pub fn into_parts(self) -> (Vec<Sendable>, Vec<(String, AppError)>) {
        let mut tasks = Vec::new();
        let mut failures = Vec::new();
        for result in self.results {
            match result.outcome {
                Ok(task) => tasks.push(task),
                Err(error) => failures.push((result.url, error)),
            }
        }
        (tasks, failures)
    }
}

/// Crawls a contest listing and delegates each problem.
#[derive(Clone)]
pub struct ContestParser {
    name: &'static str,
    match_patterns: &'static [&'static str],
    excluded_match_patterns: &'static [&'static str],
    link_selector: &'static str,
    problem_parser: Arc<dyn ProblemParser>,
}

impl ContestParser {
    pub fn new(
        name: &'static str,
        match_patterns: &'static [&'static str],
        link_selector: &'static str,
        problem_parser: Arc<dyn ProblemParser>,
    ) -> Self {
        Self {
            name,
            match_patterns,
            excluded_match_patterns: &[],
            link_selector,
            problem_parser,
        }
    }

    pub fn with_excluded_match_patterns(mut self, patterns: &'static [&'static str]) -> Self {
        self.excluded_match_patterns = patterns;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn match_patterns(&self) -> &'static [&'static str] {
        self.match_patterns
    }

    pub fn excluded_match_patterns(&self) -> &'static [&'static str] {
        self.excluded_match_patterns
    }

    pub fn problem_parser(&self) -> &dyn ProblemParser {
        self.problem_parser.as_ref()
    }

    /// Absolute problem URLs on the listing page, in order and without repeats.
    pub fn problem_links(&self, url: &str, html: &str) -> Result<Vec<String>> {
        let base = Url::parse(url)?;
        let selector = dom::parse_selector(self.link_selector)?;
        let document = Html::parse_document(html);

        let mut seen = HashSet::new();
        let links = document
            .select(&selector)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty() && *href != "#" && !href.starts_with("javascript:"))
            .map(|href| resolve_url(&base, href))
            .filter(|link| seen.insert(link.clone()))
            .collect();

        Ok(links)
    }

    /// Parse every problem linked from the listing page.
    ///
    /// Successful tasks share one batch whose size is the number of successes.
    pub async fn parse(
        &self,
        url: &str,
        html: &str,
        fetcher: &dyn PageFetcher,
        fan_out: &FanOut,
    ) -> Result<ContestBatch> {
        let links = self.problem_links(url, html)?;
        log::info!("{}: {} problem links on {}", self.name, links.len(), url);

        let delay = fan_out.request_delay;
        let mut problem_stream = stream::iter(links)
            .map(|link| self.parse_problem(link, fetcher))
            .buffered(fan_out.max_concurrent.max(1));

        let mut results = Vec::new();
        while let Some(result) = problem_stream.next().await {
            match &result.outcome {
                Ok(task) => log::debug!("Parsed {} from {}", task.name(), result.url),
                Err(error) => log::warn!("Failed to parse problem {}: {}", result.url, error),
            }
            results.push(result);

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let batch = Batch::new(results.iter().filter(|r| r.outcome.is_ok()).count());
        let results = results
            .into_iter()
            .map(|result| ProblemResult {
                outcome: result.outcome.map(|task| task.with_batch(batch.clone())),
                url: result.url,
            })
            .collect();

        Ok(ContestBatch {
            url: url.to_string(),
            results,
        })
    }

    async fn parse_problem(&self, link: String, fetcher: &dyn PageFetcher) -> ProblemResult {
        let outcome = match fetcher.fetch(&link).await {
            Ok(html) => self.problem_parser.parse(&link, &html),
            Err(error) => Err(error),
        };
        ProblemResult { url: link, outcome }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::models::TaskBuilder;

    /// Serves canned pages; unknown URLs behave like a 404.
    struct FakeFetcher {
        pages: HashMap<String, (String, u64)>,
    }

    impl FakeFetcher {
        fn new(pages: &[(&str, &str, u64)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html, delay)| (url.to_string(), (html.to_string(), *delay)))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            match self.pages.get(url) {
                Some((html, delay)) => {
                    tokio::time::sleep(Duration::from_millis(*delay)).await;
                    Ok(html.clone())
                }
                None => Err(AppError::fetch(url, "status 404 Not Found")),
            }
        }
    }

    /// Reads the name from `<h1>` and nothing else.
    struct HeadingParser;

    impl ProblemParser for HeadingParser {
        fn name(&self) -> &'static str {
            "HeadingParser"
        }

        fn match_patterns(&self) -> &'static [&'static str] {
            &["https://judge.test/problem/*"]
        }

        fn parse(&self, url: &str, html: &str) -> Result<Sendable> {
            let document = Html::parse_document(html);
            let h1 = dom::parse_selector("h1")?;
            let name = dom::first_text(&document, &h1)
                .ok_or_else(|| AppError::extraction("name", "no <h1>"))?;

            let mut task = TaskBuilder::new("Test");
            task.set_url(url)
                .set_name(name)
                .set_time_limit(1000)
                .set_memory_limit(256);
            task.build()
        }
    }

    const LISTING: &str = r##"
        <table class="problems">
          <tr><td><a href="/problem/1">A</a></td><td><a href="/problem/1">Alpha</a></td></tr>
          <tr><td><a href="/problem/2">B</a></td></tr>
          <tr><td><a href="https://judge.test/problem/3">C</a></td></tr>
          <tr><td><a href="problem/4">D</a></td></tr>
          <tr><td><a href="#">hidden</a></td></tr>
        </table>"##;

    fn contest_parser() -> ContestParser {
        ContestParser::new(
            "TestContestParser",
            &["https://judge.test/contest/*"],
            "table.problems a",
            Arc::new(HeadingParser),
        )
    }

    #[test]
    fn links_are_resolved_and_deduplicated() {
        let links = contest_parser()
            .problem_links("https://judge.test/contest/9", LISTING)
            .unwrap();
        assert_eq!(
            links,
            vec![
                "https://judge.test/problem/1",
                "https://judge.test/problem/2",
                "https://judge.test/problem/3",
                "https://judge.test/contest/problem/4",
            ]
        );
    }

    #[tokio::test]
    async fn broken_link_is_attributed_not_fatal() {
        let fetcher = FakeFetcher::new(&[
            ("https://judge.test/problem/1", "<h1>Alpha</h1>", 30),
            ("https://judge.test/problem/3", "<h1>Gamma</h1>", 0),
            ("https://judge.test/contest/problem/4", "<p>no heading</p>", 10),
        ]);

        let batch = contest_parser()
            .parse("https://judge.test/contest/9", LISTING, &fetcher, &FanOut::default())
            .await
            .unwrap();

        let names: Vec<_> = batch.tasks().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);

        let failures: Vec<_> = batch.failures().collect();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].0, "https://judge.test/problem/2");
        assert!(matches!(failures[0].1, AppError::Fetch { .. }));
        assert_eq!(failures[1].0, "https://judge.test/contest/problem/4");
        assert_eq!(failures[1].1.extraction_field(), Some("name"));

        let batch_ids: HashSet<_> = batch.tasks().map(|t| t.batch().id).collect();
        assert_eq!(batch_ids.len(), 1);
        assert!(batch.tasks().all(|t| t.batch().size == 2));
    }

    #[tokio::test]
    async fn listing_order_survives_uneven_fetch_times() {
        let listing = r#"<table class="problems"><tr>
            <td><a href="/problem/1">1</a></td>
            <td><a href="/problem/2">2</a></td>
            <td><a href="/problem/3">3</a></td>
        </tr></table>"#;
        let fetcher = FakeFetcher::new(&[
            ("https://judge.test/problem/1", "<h1>One</h1>", 40),
            ("https://judge.test/problem/2", "<h1>Two</h1>", 20),
            ("https://judge.test/problem/3", "<h1>Three</h1>", 0),
        ]);

        let (tasks, failures) = contest_parser()
            .parse("https://judge.test/contest/1", listing, &fetcher, &FanOut::default())
            .await
            .unwrap()
            .into_parts();

        assert!(failures.is_empty());
        let names: Vec<_> = tasks.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn empty_listing_gives_empty_batch() {
        let fetcher = FakeFetcher::new(&[]);
        let batch = contest_parser()
            .parse("https://judge.test/contest/1", "<p>nothing</p>", &fetcher, &FanOut::default())
            .await
            .unwrap();
        assert_eq!(batch.task_count(), 0);
        assert!(batch.results.is_empty());
    }

    #[test]
    fn fan_out_from_config_never_zero() {
        let config = FetcherConfig {
            max_concurrent: 0,
            ..FetcherConfig::default()
        };
        assert_eq!(FanOut::from(&config).max_concurrent, 1);
    }
}
