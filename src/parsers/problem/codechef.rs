// src/parsers/problem/codechef.rs

//! CodeChef problem pages.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{Sendable, TaskBuilder};
use crate::parsers::heuristics::{self, DEFAULT_STRATEGIES};
use crate::parsers::{ProblemParser, limits};
use crate::utils::dom;

/// CodeChef does not print a memory limit on the statement.
const MEMORY_LIMIT_MB: u64 = 256;

pub struct CodeChefProblemParser;

impl ProblemParser for CodeChefProblemParser {
    fn name(&self) -> &'static str {
        "CodeChefProblemParser"
    }

    fn match_patterns(&self) -> &'static [&'static str] {
        &[
            "https://www.codechef.com/problems/*",
            "https://www.codechef.com/*/problems/*",
        ]
    }

    fn excluded_match_patterns(&self) -> &'static [&'static str] {
        &[
            "https://www.codechef.com/problems/school",
            "https://www.codechef.com/problems/easy",
            "https://www.codechef.com/problems/medium",
            "https://www.codechef.com/problems/hard",
            "https://www.codechef.com/problems/challenge",
            "https://www.codechef.com/problems/extcontest",
        ]
    }

    fn parse(&self, url: &str, html: &str) -> Result<Sendable> {
        let document = Html::parse_document(html);
        let mut task = TaskBuilder::new("CodeChef");
        task.set_url(url);

        // The last heading is the problem title; its first line is the name.
        let h1 = dom::parse_selector("h1")?;
        let title = dom::last_text(&document, &h1)
            .ok_or_else(|| AppError::extraction("name", "no <h1> on the page"))?;
        let name = title.trim().lines().next().unwrap_or_default().trim().to_string();
        task.set_name(name);

        let breadcrumbs = dom::parse_selector(".breadcrumbs a")?;
        if let Some(category) = dom::last_text(&document, &breadcrumbs) {
            task.set_category(&category);
        }

        task.set_interactive(html.contains("This is an interactive problem"));
        task.extend_tests(heuristics::extract_tests(&document, DEFAULT_STRATEGIES));

        let info = super::required_text(&document, ".problem-info", "time limit")?;
        task.set_time_limit(limits::parse_time_limit_ms(&info)?);
        task.set_memory_limit(MEMORY_LIMIT_MB);

        task.build()
    }
}
