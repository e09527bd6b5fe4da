// src/pipeline/list.rs

//! Registry introspection.

use serde::Serialize;

use crate::parsers::{Choices, ParserKind, ParserRegistry};

/// One registered parser, as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserSummary {
    pub name: String,
    pub kind: ParserKind,
    pub match_patterns: Vec<String>,
}

/// Every registered parser in registration order.
pub fn run_list(registry: &ParserRegistry) -> Vec<ParserSummary> {
    registry
        .iter()
        .map(|registered| ParserSummary {
            name: registered.name().to_string(),
            kind: registered.kind(),
            match_patterns: registered
                .parser()
                .match_patterns()
                .iter()
                .map(|p| p.to_string())
                .collect(),
        })
        .collect()
}

/// Parsers eligible for `url`, grouped by role.
pub fn run_choices(registry: &ParserRegistry, url: &str) -> Choices {
    let choices = registry.choices(url);
    log::debug!("{} eligible parsers for {}", choices.len(), url);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_builtin_parsers_with_roles() {
        let registry = ParserRegistry::builtin().unwrap();
        let summaries = run_list(&registry);

        assert_eq!(summaries.len(), registry.len());
        let codeforces = summaries
            .iter()
            .find(|s| s.name == "CodeforcesContestParser")
            .unwrap();
        assert_eq!(codeforces.kind, ParserKind::Contest);
        assert!(!codeforces.match_patterns.is_empty());
    }

    #[test]
    fn choices_group_by_role() {
        let registry = ParserRegistry::builtin().unwrap();

        let problem = run_choices(&registry, "https://codeforces.com/contest/1/problem/A");
        assert_eq!(problem.problem, vec!["CodeforcesProblemParser"]);
        assert!(problem.contest.is_empty());

        let contest = run_choices(&registry, "https://codeforces.com/contest/1");
        assert!(contest.problem.is_empty());
        assert_eq!(contest.contest, vec!["CodeforcesContestParser"]);

        assert!(run_choices(&registry, "https://example.com/").is_empty());
    }
}
