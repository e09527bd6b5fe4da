//! Per-judge problem parsers and the built-in parser list.

mod atcoder;
mod codechef;
mod codeforces;
mod uoj;

use std::sync::Arc;

use scraper::Html;

use crate::error::{AppError, Result};
use crate::parsers::{ContestParser, Parser};
use crate::utils::dom;

pub use atcoder::AtCoderProblemParser;
pub use codechef::CodeChefProblemParser;
pub use codeforces::CodeforcesProblemParser;
pub use uoj::UojProblemParser;

/// Every built-in parser, problem parsers first within each judge.
pub fn builtin_parsers() -> Vec<Parser> {
    let codeforces = Arc::new(CodeforcesProblemParser);
    let atcoder = Arc::new(AtCoderProblemParser);
    let uoj = Arc::new(UojProblemParser);

    vec![
        Parser::problem(CodeChefProblemParser),
        Parser::Problem(codeforces.clone()),
        Parser::Contest(ContestParser::new(
            "CodeforcesContestParser",
            &[
                "https://codeforces.com/contest/*",
                "https://codeforces.com/gym/*",
            ],
            "table.problems td.id a",
            codeforces,
        )),
        Parser::Problem(atcoder.clone()),
        Parser::Contest(ContestParser::new(
            "AtCoderContestParser",
            &["https://atcoder.jp/contests/*/tasks"],
            "#main-container table tbody tr td:first-child a",
            atcoder,
        )),
        Parser::Problem(uoj.clone()),
        Parser::Contest(ContestParser::new(
            "UojContestParser",
            &["https://uoj.ac/contest/*"],
            ".top-buffer-md > .table-responsive > .table a",
            uoj,
        )),
    ]
}

/// Trimmed text of the first element matching `selector`, or an extraction
/// error naming `field`.
fn required_text(document: &Html, selector: &str, field: &str) -> Result<String> {
    let sel = dom::parse_selector(selector)?;
    dom::first_text(document, &sel)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::extraction(field, format!("no element matches '{selector}'")))
}

/// Trimmed text of the first element matching `selector`, if any.
fn optional_text(document: &Html, selector: &str) -> Result<Option<String>> {
    let sel = dom::parse_selector(selector)?;
    Ok(dom::first_text(document, &sel)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty()))
}

#[cfg(test)]
mod tests {
    use crate::parsers::ParserRegistry;

    #[test]
    fn contest_and_problem_urls_do_not_collide() {
        let registry = ParserRegistry::builtin().unwrap();
        let cases = [
            ("https://codeforces.com/contest/1850", "CodeforcesContestParser"),
            ("https://codeforces.com/contest/1850/problem/A", "CodeforcesProblemParser"),
            ("https://codeforces.com/problemset/problem/4/A", "CodeforcesProblemParser"),
            ("https://atcoder.jp/contests/abc300/tasks", "AtCoderContestParser"),
            ("https://atcoder.jp/contests/abc300/tasks/abc300_a", "AtCoderProblemParser"),
            ("https://uoj.ac/contest/12", "UojContestParser"),
            ("https://uoj.ac/contest/12/problem/3", "UojProblemParser"),
            ("https://uoj.ac/problem/1", "UojProblemParser"),
            ("https://www.codechef.com/problems/TEST", "CodeChefProblemParser"),
            ("https://www.codechef.com/START100/problems/ABC", "CodeChefProblemParser"),
        ];

        for (url, expected) in cases {
            let eligible: Vec<_> = registry.find_eligible(url).iter().map(|p| p.name().to_string()).collect();
            assert_eq!(eligible, vec![expected.to_string()], "for {url}");
        }
    }

    #[test]
    fn codechef_listing_pages_are_excluded() {
        let registry = ParserRegistry::builtin().unwrap();
        assert!(registry.find_eligible("https://www.codechef.com/problems/school").is_empty());
        assert!(registry.find_eligible("https://www.codechef.com/problems/hard").is_empty());
    }
}
