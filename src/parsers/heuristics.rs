// src/parsers/heuristics.rs

//! Sample test extraction shared by problem parsers.
//!
//! Each strategy is a pure function over the document. [`extract_tests`]
//! tries strategies in order and stops at the first one that finds anything,
//! so results from different strategies are never mixed.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::models::TestCase;
use crate::utils::dom;

/// A sample extraction strategy.
pub type Strategy = fn(&Html) -> Vec<TestCase>;

/// Strategies that cover the common statement layouts, in priority order.
pub const DEFAULT_STRATEGIES: &[Strategy] = &[
    labeled_sample_blocks,
    sample_statement_containers,
    sample_headings,
];

static PRE: LazyLock<Selector> = LazyLock::new(|| selector("pre"));
static BOLD: LazyLock<Selector> = LazyLock::new(|| selector("b"));
static CODE: LazyLock<Selector> = LazyLock::new(|| selector("code"));
static STATEMENT_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| selector(".problem-statement div.mathjax-support"));
static HEADING_OR_PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("h3, p"));

fn selector(s: &str) -> Selector {
    Selector::parse(s).expect("static selector is valid")
}

/// Run `strategies` in order and return the first non-empty result.
pub fn extract_tests(document: &Html, strategies: &[Strategy]) -> Vec<TestCase> {
    strategies
        .iter()
        .map(|strategy| strategy(document))
        .find(|tests| !tests.is_empty())
        .unwrap_or_default()
}

/// Remove newline characters at the very start of `text`, nothing else.
pub fn strip_leading_newlines(text: &str) -> &str {
    text.trim_start_matches(['\n', '\r'])
}

/// Build a test case from raw sample texts.
pub fn sample(input: &str, output: &str) -> TestCase {
    TestCase::new(strip_leading_newlines(input), strip_leading_newlines(output))
}

/// Tier 1: `<pre>` blocks labeled with a `<b>` marker.
///
/// Two nested `<code>` elements give input and output. Otherwise the last two
/// direct text nodes of the block are used, fully trimmed.
pub fn labeled_sample_blocks(document: &Html) -> Vec<TestCase> {
    let mut tests = Vec::new();

    for pre in document.select(&PRE) {
        if pre.select(&BOLD).next().is_none() {
            continue;
        }

        let code_blocks: Vec<_> = pre.select(&CODE).collect();
        if code_blocks.len() >= 2 {
            tests.push(sample(&dom::text(code_blocks[0]), &dom::text(code_blocks[1])));
            continue;
        }

        // Bare text nodes carry the layout whitespace around the labels.
        let text_nodes = dom::direct_text_nodes(pre);
        if let [.., input, output] = text_nodes.as_slice() {
            tests.push(sample(input.trim(), output.trim()));
        }
    }

    tests
}

/// Tier 2: statement containers that mention both sample input and output
/// and hold exactly two `<pre>` blocks.
pub fn sample_statement_containers(document: &Html) -> Vec<TestCase> {
    document
        .select(&STATEMENT_CONTAINER)
        .filter(|container| {
            let text = dom::text(*container).to_lowercase();
            text.contains("sample input") && text.contains("sample output")
        })
        .filter_map(|container| {
            let blocks: Vec<_> = container.select(&PRE).collect();
            match blocks.as_slice() {
                [input, output] => Some(sample(&dom::text(*input), &dom::text(*output))),
                _ => None,
            }
        })
        .collect()
}

/// Tier 3: "Sample Input" / "Sample Output" headings followed directly by a
/// `<pre>` or `<span>`; the i-th input pairs with the i-th output.
pub fn sample_headings(document: &Html) -> Vec<TestCase> {
    let inputs = labeled_siblings(document, "sample input");
    let outputs = labeled_siblings(document, "sample output");

    inputs
        .iter()
        .zip(outputs.iter())
        .map(|(input, output)| sample(input, output))
        .collect()
}

fn labeled_siblings(document: &Html, label: &str) -> Vec<String> {
    document
        .select(&HEADING_OR_PARAGRAPH)
        .filter(|heading| dom::text(*heading).to_lowercase().contains(label))
        .filter_map(|heading| dom::next_element_sibling(heading))
        .filter(|next| matches!(next.value().name(), "pre" | "span"))
        .map(dom::text)
        .collect()
}
