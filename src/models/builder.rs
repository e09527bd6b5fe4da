// src/models/builder.rs

//! Incremental builder for [`Sendable`] tasks.

use crate::error::{AppError, Result};
use crate::models::{Batch, Sendable, TestCase};

/// Mutable accumulator a parser fills in while walking a page.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    judge: String,
    url: Option<String>,
    name: Option<String>,
    group: String,
    interactive: bool,
    time_limit_ms: Option<u64>,
    memory_limit_mb: Option<u64>,
    tests: Vec<TestCase>,
}

impl TaskBuilder {
    /// Start a task for the given judge (e.g. "CodeChef").
    pub fn new(judge: impl Into<String>) -> Self {
        Self {
            judge: judge.into(),
            url: None,
            name: None,
            group: String::new(),
            interactive: false,
            time_limit_ms: None,
            memory_limit_mb: None,
            tests: Vec::new(),
        }
    }

    pub fn judge(&self) -> &str {
        &self.judge
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Set the group as `"<judge> - <category>"`.
    ///
    /// An empty category leaves the group untouched.
    pub fn set_category(&mut self, category: &str) -> &mut Self {
        let category = category.trim();
        if !category.is_empty() {
            self.group = format!("{} - {}", self.judge, category);
        }
        self
    }

    pub fn set_interactive(&mut self, interactive: bool) -> &mut Self {
        self.interactive = interactive;
        self
    }

    /// Time limit in milliseconds.
    pub fn set_time_limit(&mut self, ms: u64) -> &mut Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Memory limit in megabytes.
    pub fn set_memory_limit(&mut self, mb: u64) -> &mut Self {
        self.memory_limit_mb = Some(mb);
        self
    }

    pub fn add_test(&mut self, input: impl Into<String>, output: impl Into<String>) -> &mut Self {
        self.tests.push(TestCase::new(input, output));
        self
    }

    pub fn extend_tests(&mut self, tests: impl IntoIterator<Item = TestCase>) -> &mut Self {
        self.tests.extend(tests);
        self
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    /// Validate required fields and produce the immutable task.
    pub fn build(self) -> Result<Sendable> {
        let url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| AppError::validation("task url is missing"))?;
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation(format!("task name is missing for {url}")))?;
        let time_limit_ms = self
            .time_limit_ms
            .filter(|&ms| ms > 0)
            .ok_or_else(|| AppError::validation(format!("time limit is missing for {url}")))?;
        let memory_limit_mb = self
            .memory_limit_mb
            .filter(|&mb| mb > 0)
            .ok_or_else(|| AppError::validation(format!("memory limit is missing for {url}")))?;

        Ok(Sendable {
            url,
            name,
            group: self.group,
            interactive: self.interactive,
            time_limit_ms,
            memory_limit_mb,
            tests: self.tests,
            batch: Batch::new(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> TaskBuilder {
        let mut task = TaskBuilder::new("CodeChef");
        task.set_url("https://www.codechef.com/problems/TEST")
            .set_name("Life, the Universe, and Everything")
            .set_time_limit(1000)
            .set_memory_limit(256);
        task
    }

    #[test]
    fn build_complete_task() {
        let mut task = complete();
        task.set_category("Practice").set_interactive(true);
        task.add_test("1\n42\n", "1\n").add_test("2\n", "2\n");

        let sendable = task.build().unwrap();
        assert_eq!(sendable.group(), "CodeChef - Practice");
        assert!(sendable.interactive());
        assert_eq!(sendable.tests().len(), 2);
        assert_eq!(sendable.tests()[1].input, "2\n");
        assert_eq!(sendable.batch().size, 1);
    }

    #[test]
    fn group_defaults_to_empty() {
        let sendable = complete().build().unwrap();
        assert_eq!(sendable.group(), "");

        let mut task = complete();
        task.set_category("   ");
        assert_eq!(task.build().unwrap().group(), "");
    }

    #[test]
    fn build_rejects_missing_name() {
        let mut task = TaskBuilder::new("X");
        task.set_url("https://x/1").set_time_limit(1).set_memory_limit(1);
        assert!(matches!(task.build(), Err(AppError::Validation(_))));
    }

    #[test]
    fn build_rejects_missing_url() {
        let mut task = TaskBuilder::new("X");
        task.set_name("A").set_time_limit(1).set_memory_limit(1);
        assert!(matches!(task.build(), Err(AppError::Validation(_))));
    }

    #[test]
    fn build_rejects_zero_limits() {
        let mut task = complete();
        task.set_time_limit(0);
        assert!(matches!(task.build(), Err(AppError::Validation(_))));

        let mut task = complete();
        task.set_memory_limit(0);
        assert!(matches!(task.build(), Err(AppError::Validation(_))));
    }
}
