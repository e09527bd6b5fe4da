// src/parsers/problem/uoj.rs

//! UOJ (Universal Online Judge) problem pages.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Sendable, TaskBuilder, TestCase};
use crate::parsers::heuristics::{self, DEFAULT_STRATEGIES, Strategy};
use crate::parsers::{ProblemParser, limits};
use crate::utils::dom;

static H4: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h4").expect("static selector is valid"));

/// `\texttt{s}`-style wrappers and `$` delimiters around limits.
static LATEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:texttt|mathrm|text|rm)\{([^}]*)\}|\$").expect("latex regex is valid")
});

static INDEX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\d+\.\s*").expect("index prefix regex is valid"));

const TIME_LABELS: &[&str] = &["时间限制", "Time Limit", "Time limit"];
const MEMORY_LABELS: &[&str] = &["空间限制", "内存限制", "Memory Limit", "Memory limit"];

pub struct UojProblemParser;

impl ProblemParser for UojProblemParser {
    fn name(&self) -> &'static str {
        "UojProblemParser"
    }

    fn match_patterns(&self) -> &'static [&'static str] {
        &["https://uoj.ac/problem/*", "https://uoj.ac/contest/*/problem/*"]
    }

    fn parse(&self, url: &str, html: &str) -> Result<Sendable> {
        let document = Html::parse_document(html);
        let mut task = TaskBuilder::new("UOJ");
        task.set_url(url);

        let header = super::required_text(&document, "h1.page-header", "name")?;
        task.set_name(INDEX_PREFIX.replace(&header, "").to_string());

        if let Some(contest) = super::optional_text(&document, ".uoj-contest-title, .contest-title")? {
            task.set_category(&contest);
        }

        let body = LATEX.replace_all(&document.root_element().text().collect::<String>(), "$1").to_string();
        task.set_interactive(body.contains("交互题") || body.contains("interactive problem"));

        let time = labeled_window(&body, TIME_LABELS)
            .ok_or_else(|| AppError::extraction("time limit", "no time limit label"))?;
        task.set_time_limit(limits::parse_time_limit_ms(time)?);

        let memory = labeled_window(&body, MEMORY_LABELS)
            .ok_or_else(|| AppError::extraction("memory limit", "no memory limit label"))?;
        task.set_memory_limit(limits::parse_memory_limit_mb(memory)?);

        let strategies: Vec<Strategy> = std::iter::once(input_output_headings as Strategy)
            .chain(DEFAULT_STRATEGIES.iter().copied())
            .collect();
        task.extend_tests(heuristics::extract_tests(&document, &strategies));

        task.build()
    }
}

/// Text right after the first label found, short enough to hold one value.
fn labeled_window<'a>(body: &'a str, labels: &[&str]) -> Option<&'a str> {
    labels.iter().find_map(|label| {
        let start = body.find(label)? + label.len();
        let rest = &body[start..];
        let end = rest
            .char_indices()
            .nth(24)
            .map_or(rest.len(), |(idx, _)| idx);
        Some(&rest[..end])
    })
}

/// UOJ samples: `<h4>input</h4><pre>…</pre><h4>output</h4><pre>…</pre>`.
fn input_output_headings(document: &Html) -> Vec<TestCase> {
    let following_pre = |label: &str| -> Vec<String> {
        document
            .select(&H4)
            .filter(|h4| dom::text(*h4).trim().eq_ignore_ascii_case(label))
            .filter_map(dom::next_element_sibling)
            .filter(|next| next.value().name() == "pre")
            .map(dom::text)
            .collect()
    };

    following_pre("input")
        .iter()
        .zip(following_pre("output").iter())
        .map(|(input, output)| heuristics::sample(input, output))
        .collect()
}
