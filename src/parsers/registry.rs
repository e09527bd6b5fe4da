// src/parsers/registry.rs

//! Parser registry.
//!
//! Built once at startup from a fixed parser list and read-only afterwards.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::parsers::{Parser, ParserKind, UrlMatcher, problem};

/// A parser together with its compiled URL matcher.
#[derive(Debug, Clone)]
pub struct RegisteredParser {
    parser: Parser,
    matcher: UrlMatcher,
}

impl RegisteredParser {
    fn new(parser: Parser) -> Result<Self> {
        let matcher = UrlMatcher::new(parser.match_patterns(), parser.excluded_match_patterns())?;
        Ok(Self { parser, matcher })
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn name(&self) -> &str {
        self.parser.name()
    }

    pub fn kind(&self) -> ParserKind {
        self.parser.kind()
    }

    pub fn accepts(&self, url: &str) -> bool {
        self.matcher.accepts(url)
    }
}

/// Eligible parser names grouped by role, for a selection menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Choices {
    pub problem: Vec<String>,
    pub contest: Vec<String>,
}

impl Choices {
    pub fn len(&self) -> usize {
        self.problem.len() + self.contest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the registry decided for a URL.
#[derive(Debug)]
pub enum Selection<'a> {
    /// Exactly one parser should run.
    Parser(&'a RegisteredParser),
    /// Several parsers apply and the user has to pick one.
    Ambiguous(Choices),
}

/// Holds every parser known to the process.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    parsers: Vec<RegisteredParser>,
}

impl ParserRegistry {
    /// Build a registry from a fixed parser list.
    ///
    /// Fails on duplicate names or invalid match patterns.
    pub fn from_parsers(parsers: impl IntoIterator<Item = Parser>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut registered = Vec::new();

        for parser in parsers {
            if !names.insert(parser.name().to_string()) {
                return Err(AppError::config(format!(
                    "parser '{}' is registered twice",
                    parser.name()
                )));
            }
            registered.push(RegisteredParser::new(parser)?);
        }

        Ok(Self {
            parsers: registered,
        })
    }

    /// Registry with every built-in site parser.
    pub fn builtin() -> Result<Self> {
        Self::from_parsers(problem::builtin_parsers())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredParser> {
        self.parsers.iter()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Parsers accepting `url`, in registration order.
    pub fn find_eligible(&self, url: &str) -> Vec<&RegisteredParser> {
        self.parsers.iter().filter(|p| p.accepts(url)).collect()
    }

    /// Look up a parser by its display name.
    pub fn find_by_name(&self, name: &str) -> Option<&RegisteredParser> {
        self.parsers.iter().find(|p| p.name() == name)
    }

    /// Names of the parsers accepting `url`, grouped by role.
    pub fn choices(&self, url: &str) -> Choices {
        let mut choices = Choices::default();
        for parser in self.find_eligible(url) {
            match parser.kind() {
                ParserKind::Problem => choices.problem.push(parser.name().to_string()),
                ParserKind::Contest => choices.contest.push(parser.name().to_string()),
            }
        }
        choices
    }

    /// Decide which parser runs for `url`.
    ///
    /// An explicit `choice` is honored regardless of the URL. Without one, a
    /// single eligible parser is selected and several are returned as
    /// [`Selection::Ambiguous`].
    pub fn select(&self, url: &str, choice: Option<&str>) -> Result<Selection<'_>> {
        if let Some(name) = choice {
            return self
                .find_by_name(name)
                .map(Selection::Parser)
                .ok_or_else(|| AppError::UnknownParser {
                    name: name.to_string(),
                });
        }

        match self.find_eligible(url).as_slice() {
            [] => Err(AppError::NoParser {
                url: url.to_string(),
            }),
            [only] => Ok(Selection::Parser(*only)),
            _ => Ok(Selection::Ambiguous(self.choices(url))),
        }
    }
}
