//! Parser framework.
//!
//! - [`ProblemParser`]: one page in, one [`Sendable`] out
//! - [`ContestParser`]: a listing page fanned out to a delegate problem parser
//! - [`ParserRegistry`]: URL → eligible parsers, with an explicit role per parser

pub mod contest;
pub mod heuristics;
pub mod limits;
mod pattern;
pub mod problem;
mod registry;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::models::Sendable;

pub use contest::{ContestBatch, ContestParser, FanOut, ProblemResult};
pub use pattern::{MatchPattern, UrlMatcher};
pub use registry::{Choices, ParserRegistry, RegisteredParser, Selection};

/// Extracts a single task from a problem page.
///
/// Implementations hold no state between calls.
pub trait ProblemParser: Send + Sync {
    /// Display name, unique within a registry.
    fn name(&self) -> &'static str;

    /// URL globs this parser accepts. Must not be empty.
    fn match_patterns(&self) -> &'static [&'static str];

    /// URL globs rejected even when a match pattern accepts them.
    fn excluded_match_patterns(&self) -> &'static [&'static str] {
        &[]
    }

    /// Parse the page at `url` whose markup is `html`.
    fn parse(&self, url: &str, html: &str) -> Result<Sendable>;
}

/// Declared role of a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    Problem,
    Contest,
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserKind::Problem => write!(f, "problem"),
            ParserKind::Contest => write!(f, "contest"),
        }
    }
}

/// A registered parser, tagged with its role.
#[derive(Clone)]
pub enum Parser {
    Problem(Arc<dyn ProblemParser>),
    Contest(ContestParser),
}

impl Parser {
    /// Wrap a problem parser.
    pub fn problem(parser: impl ProblemParser + 'static) -> Self {
        Parser::Problem(Arc::new(parser))
    }

    pub fn kind(&self) -> ParserKind {
        match self {
            Parser::Problem(_) => ParserKind::Problem,
            Parser::Contest(_) => ParserKind::Contest,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Parser::Problem(parser) => parser.name(),
            Parser::Contest(parser) => parser.name(),
        }
    }

    pub fn match_patterns(&self) -> &[&'static str] {
        match self {
            Parser::Problem(parser) => parser.match_patterns(),
            Parser::Contest(parser) => parser.match_patterns(),
        }
    }

    pub fn excluded_match_patterns(&self) -> &[&'static str] {
        match self {
            Parser::Problem(parser) => parser.excluded_match_patterns(),
            Parser::Contest(parser) => parser.excluded_match_patterns(),
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}
