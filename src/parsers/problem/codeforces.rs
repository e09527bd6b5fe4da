// src/parsers/problem/codeforces.rs

//! Codeforces problem pages (contest, problemset, gym and group views).

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{Sendable, TaskBuilder, TestCase};
use crate::parsers::heuristics::{self, Strategy};
use crate::parsers::{ProblemParser, limits};
use crate::utils::dom;

static SAMPLE_INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".sample-test .input pre").expect("static selector is valid"));
static SAMPLE_OUTPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".sample-test .output pre").expect("static selector is valid"));

/// Codeforces' own sample layout first, then the shared fallbacks.
const STRATEGIES: &[Strategy] = &[
    sample_test_sections,
    heuristics::labeled_sample_blocks,
    heuristics::sample_headings,
];

pub struct CodeforcesProblemParser;

impl ProblemParser for CodeforcesProblemParser {
    fn name(&self) -> &'static str {
        "CodeforcesProblemParser"
    }

    fn match_patterns(&self) -> &'static [&'static str] {
        &[
            "https://codeforces.com/contest/*/problem/*",
            "https://codeforces.com/problemset/problem/*/*",
            "https://codeforces.com/gym/*/problem/*",
            "https://codeforces.com/group/*/contest/*/problem/*",
        ]
    }

    fn parse(&self, url: &str, html: &str) -> Result<Sendable> {
        let document = Html::parse_document(html);
        let mut task = TaskBuilder::new("Codeforces");
        task.set_url(url);

        task.set_name(super::required_text(
            &document,
            ".problem-statement .header .title",
            "name",
        )?);

        if let Some(contest) = super::optional_text(&document, ".rtable .left a")? {
            task.set_category(&contest);
        }

        let interactive = html.contains("This is an interactive problem")
            || super::optional_text(&document, ".problem-statement .interaction-specification")?
                .is_some();
        task.set_interactive(interactive);

        let time = super::required_text(&document, ".problem-statement .header .time-limit", "time limit")?;
        task.set_time_limit(limits::parse_time_limit_ms(&time)?);

        let memory = super::required_text(
            &document,
            ".problem-statement .header .memory-limit",
            "memory limit",
        )?;
        task.set_memory_limit(limits::parse_memory_limit_mb(&memory)?);

        task.extend_tests(heuristics::extract_tests(&document, STRATEGIES));
        task.build()
    }
}

/// `.sample-test` blocks; lines may be split into one `div` each.
fn sample_test_sections(document: &Html) -> Vec<TestCase> {
    let inputs = document.select(&SAMPLE_INPUT).map(dom::text_with_breaks);
    let outputs = document.select(&SAMPLE_OUTPUT).map(dom::text_with_breaks);

    inputs
        .zip(outputs)
        .map(|(input, output)| heuristics::sample(&input, &output))
        .collect()
}
