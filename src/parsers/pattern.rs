// src/parsers/pattern.rs

//! URL match patterns.
//!
//! A pattern is a full URL in which `*` stands for any run of characters
//! inside a single path segment (it never crosses a `/`). Matching is
//! case-sensitive and anchored at both ends.

use regex::Regex;

use crate::error::{AppError, Result};

/// A compiled URL glob.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    source: String,
    regex: Regex,
}

impl MatchPattern {
    /// Compile a pattern such as `https://uoj.ac/contest/*`.
    pub fn new(pattern: &str) -> Result<Self> {
        if !pattern.contains("://") {
            return Err(AppError::pattern(pattern, "missing scheme"));
        }

        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("[^/]*");
        let regex = Regex::new(&format!("^{body}$")).map_err(|e| AppError::pattern(pattern, e))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Include/exclude pattern pair deciding whether a parser accepts a URL.
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    include: Vec<MatchPattern>,
    exclude: Vec<MatchPattern>,
}

impl UrlMatcher {
    pub fn new(include: &[&str], exclude: &[&str]) -> Result<Self> {
        if include.is_empty() {
            return Err(AppError::config("a parser needs at least one match pattern"));
        }

        Ok(Self {
            include: compile_all(include)?,
            exclude: compile_all(exclude)?,
        })
    }

    /// True when some include pattern matches and no exclude pattern does.
    pub fn accepts(&self, url: &str) -> bool {
        self.include.iter().any(|p| p.matches(url)) && !self.exclude.iter().any(|p| p.matches(url))
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<MatchPattern>> {
    patterns.iter().map(|p| MatchPattern::new(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_within_segment() {
        let pattern = MatchPattern::new("https://uoj.ac/contest/*").unwrap();
        assert!(pattern.matches("https://uoj.ac/contest/12"));
        assert!(pattern.matches("https://uoj.ac/contest/"));
        assert!(!pattern.matches("https://uoj.ac/contest/12/problem/3"));
        assert!(!pattern.matches("https://uoj.ac/problem/12"));
    }

    #[test]
    fn star_covers_query_string() {
        let pattern = MatchPattern::new("https://www.codechef.com/problems/*").unwrap();
        assert!(pattern.matches("https://www.codechef.com/problems/TEST?tab=statement"));
    }

    #[test]
    fn literal_characters_are_escaped() {
        let pattern = MatchPattern::new("https://atcoder.jp/contests/*/tasks").unwrap();
        assert!(pattern.matches("https://atcoder.jp/contests/abc300/tasks"));
        assert!(!pattern.matches("https://atcoderxjp/contests/abc300/tasks"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let pattern = MatchPattern::new("https://codeforces.com/contest/*").unwrap();
        assert!(!pattern.matches("https://CODEFORCES.com/contest/1"));
    }

    #[test]
    fn pattern_without_scheme_is_rejected() {
        assert!(MatchPattern::new("uoj.ac/*").is_err());
    }

    #[test]
    fn exclusion_takes_precedence() {
        let matcher = UrlMatcher::new(
            &["https://www.codechef.com/problems/*"],
            &["https://www.codechef.com/problems/school"],
        )
        .unwrap();
        assert!(matcher.accepts("https://www.codechef.com/problems/FLOW001"));
        assert!(!matcher.accepts("https://www.codechef.com/problems/school"));
    }

    #[test]
    fn matcher_requires_include_patterns() {
        assert!(UrlMatcher::new(&[], &[]).is_err());
    }
}
