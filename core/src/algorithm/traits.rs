//! Core algorithm trait definitions for the graph engine
//!
//! Every solver in the engine is a small configurable object implementing
//! [`Algorithm`]: it exposes a name, a category, a description and a string
//! parameter map with validated values. Solving itself is a plain method on
//! each solver, because inputs and result shapes differ per algorithm.
//!
//! # Key Design Principles
//! - State isolation between runs: solvers hold configuration only
//! - Deterministic behavior for given inputs
//! - Uniform, string-typed configuration surface

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::algorithm::path_finding::dijkstra::PathError;
use crate::data_structures::graph::GraphError;
use crate::validation::correctness::CorrectnessError;

/// Errors raised by solver configuration and execution
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown parameter: {name}. Valid parameters: {valid}")]
    UnknownParameter { name: String, valid: String },

    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Invalid path query: {0}")]
    Path(#[from] PathError),

    #[error("Result verification failed: {0}")]
    Verification(#[from] CorrectnessError),
}

/// Counters collected while a solver runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatistics {
    /// Outer iterations (vertices processed, vertices settled, paths augmented)
    pub steps_executed: usize,
    /// Relaxations or residual updates that changed state
    pub updates_applied: usize,
    /// Candidate comparisons examined
    pub comparisons: usize,
    /// Wall-clock time of the run
    pub execution_time_ms: f64,
}

/// Main algorithm trait
///
/// # Invariants
/// - Thread-safe: solvers are `Send + Sync` and keep no per-run state
/// - Deterministic behavior for given inputs
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., shortest_path, max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity notes
    fn description(&self) -> &'static str;

    /// Sets algorithm parameter with value validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<&str>;

    /// Snapshot of all parameters
    fn get_parameters(&self) -> HashMap<String, String>;
}

/// Validates a boolean parameter value
pub(crate) fn parse_bool_parameter(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("invalid boolean value: {}. Use 'true' or 'false'", value),
        }),
    }
}

/// Reads a boolean parameter previously validated by `set_parameter`
pub(crate) fn bool_parameter(parameters: &HashMap<String, String>, name: &str) -> bool {
    parameters.get(name).map_or(false, |v| v == "true")
}

/// Timing and counter collection for a single solver run
#[derive(Debug)]
pub struct AlgorithmProfiler {
    statistics: ExecutionStatistics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self {
            statistics: ExecutionStatistics::default(),
            start_time: None,
        }
    }

    /// Creates a profiler that is already timing
    pub fn started() -> Self {
        let mut profiler = Self::new();
        profiler.start();
        profiler
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn record_step(&mut self) {
        self.statistics.steps_executed += 1;
    }

    pub fn record_update(&mut self) {
        self.statistics.updates_applied += 1;
    }

    pub fn record_comparisons(&mut self, count: usize) {
        self.statistics.comparisons += count;
    }

    /// Stops timing and returns the collected statistics
    pub fn finish(mut self) -> ExecutionStatistics {
        let elapsed = self
            .start_time
            .take()
            .map_or(Duration::ZERO, |start| start.elapsed());
        self.statistics.execution_time_ms = elapsed.as_secs_f64() * 1000.0;
        self.statistics
    }
}

impl Default for AlgorithmProfiler {
    fn default() -> Self {
        Self::new()
    }
}
