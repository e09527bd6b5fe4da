// src/models/task.rs

//! The normalized, judge-agnostic task record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// A single sample test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Groups tasks that were parsed together.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Batch {
    pub id: Uuid,
    pub size: usize,
}

impl Batch {
    /// A fresh batch holding `size` tasks.
    pub fn new(size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            size,
        }
    }
}

/// A parsed problem, ready to be serialized and delivered.
///
/// Only [`TaskBuilder`](crate::models::TaskBuilder) creates these, which keeps
/// the invariants (non-empty url and name, positive limits) in one place.
/// It is serialize-only for the same reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sendable {
    pub(crate) url: String,
    pub(crate) name: String,
    pub(crate) group: String,
    pub(crate) interactive: bool,
    pub(crate) time_limit_ms: u64,
    pub(crate) memory_limit_mb: u64,
    pub(crate) tests: Vec<TestCase>,
    pub(crate) batch: Batch,
}

impl Sendable {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn time_limit_ms(&self) -> u64 {
        self.time_limit_ms
    }

    pub fn memory_limit_mb(&self) -> u64 {
        self.memory_limit_mb
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Move this task into another batch.
    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.batch = batch;
        self
    }

    /// Serialize into the payload handed to receivers.
    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::TaskBuilder;

    #[test]
    fn payload_uses_camel_case_fields() {
        let mut task = TaskBuilder::new("Test");
        task.set_url("https://example.com/p/1")
            .set_name("A. Sum")
            .set_time_limit(2000)
            .set_memory_limit(256)
            .add_test("1 2", "3");
        let sendable = task.build().unwrap();

        let json: serde_json::Value = serde_json::from_str(&sendable.to_payload().unwrap()).unwrap();
        assert_eq!(json["timeLimitMs"], 2000);
        assert_eq!(json["memoryLimitMb"], 256);
        assert_eq!(json["tests"][0]["input"], "1 2");
        assert_eq!(json["batch"]["size"], 1);
        assert_eq!(json["group"], "");
    }
}
