//! Configuration types for execution and repair search.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Executor limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Optional guard on executed instructions. Cycle detection already bounds
    /// every run to `len + 1` steps, so this is unset by default.
    pub max_steps: Option<usize>,
}

/// How candidates are evaluated during a repair search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// One candidate at a time, in generation order
    #[default]
    Sequential,
    /// Candidates spread over a fixed number of worker threads
    Parallel { workers: usize },
}

/// What a candidate whose run faults (e.g. jumps out of bounds) means to the search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Surface the fault as the search result
    #[default]
    Propagate,
    /// Treat the candidate as not being a repair and keep searching
    Reject,
}

/// Repair search configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidate evaluation strategy
    pub strategy: SearchStrategy,
    /// Handling of faulting candidates
    pub on_fault: FaultPolicy,
    /// Limits applied to every candidate run
    #[serde(default)]
    pub execution: ExecutionConfig,
}

impl SearchConfig {
    pub fn parallel(workers: usize) -> Self {
        Self {
            strategy: SearchStrategy::Parallel { workers },
            ..Default::default()
        }
    }

    pub fn with_fault_policy(mut self, on_fault: FaultPolicy) -> Self {
        self.on_fault = on_fault;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let SearchStrategy::Parallel { workers: 0 } = self.strategy {
            return Err(Error::Config(
                "parallel search needs at least one worker".to_string(),
            ));
        }
        if self.execution.max_steps == Some(0) {
            return Err(Error::Config("max_steps must be positive".to_string()));
        }
        Ok(())
    }

    /// Load a configuration from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
