// src/parsers/problem/atcoder.rs

//! AtCoder task pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Sendable, TaskBuilder, TestCase};
use crate::parsers::heuristics::{self, Strategy};
use crate::parsers::{ProblemParser, limits};
use crate::utils::dom;

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#task-statement h3").expect("static selector is valid"));

/// English statements first; Japanese-only tasks fall back to 入力例/出力例.
const STRATEGIES: &[Strategy] = &[heuristics::sample_headings, japanese_sample_headings];

pub struct AtCoderProblemParser;

impl ProblemParser for AtCoderProblemParser {
    fn name(&self) -> &'static str {
        "AtCoderProblemParser"
    }

    fn match_patterns(&self) -> &'static [&'static str] {
        &["https://atcoder.jp/contests/*/tasks/*"]
    }

    fn parse(&self, url: &str, html: &str) -> Result<Sendable> {
        let document = Html::parse_document(html);
        let mut task = TaskBuilder::new("AtCoder");
        task.set_url(url);

        // The title span also holds an "Editorial" button; only its own text counts.
        let title = dom::parse_selector("span.h2")?;
        let name = document
            .select(&title)
            .next()
            .map(|span| dom::direct_text_nodes(span).concat().trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::extraction("name", "no span.h2 title"))?;
        task.set_name(name);

        if let Some(contest) = super::optional_text(&document, ".contest-title")? {
            task.set_category(&contest);
        }

        task.set_interactive(
            html.contains("This is an interactive task") || html.contains("インタラクティブ"),
        );

        let limits_line = limits_paragraph(&document)?
            .ok_or_else(|| AppError::extraction("time limit", "no 'Time Limit' paragraph"))?;
        task.set_time_limit(limits::parse_time_limit_ms(&limits_line)?);
        task.set_memory_limit(limits::parse_memory_limit_mb(&limits_line)?);

        task.extend_tests(heuristics::extract_tests(&document, STRATEGIES));
        task.build()
    }
}

/// The "Time Limit: 2 sec / Memory Limit: 1024 MB" line under the title.
fn limits_paragraph(document: &Html) -> Result<Option<String>> {
    let paragraphs = dom::parse_selector("p")?;
    Ok(document
        .select(&paragraphs)
        .map(dom::text)
        .find(|text| text.contains("Time Limit") || text.contains("実行時間制限")))
}

fn japanese_sample_headings(document: &Html) -> Vec<TestCase> {
    let following_pre = |label: &str| -> Vec<String> {
        document
            .select(&HEADING)
            .filter(|h3| dom::text(*h3).trim().starts_with(label))
            .filter_map(dom::next_element_sibling)
            .filter(|next| next.value().name() == "pre")
            .map(dom::text)
            .collect()
    };

    following_pre("入力例")
        .iter()
        .zip(following_pre("出力例").iter())
        .map(|(input, output)| heuristics::sample(input, output))
        .collect()
}
