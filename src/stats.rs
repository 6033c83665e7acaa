//! Aggregate statistics for repeated search trials.
//!
//! The benchmark harness accumulates raw samples per (algorithm, TTL)
//! cell and summarizes them as mean and sample standard deviation,
//! mirroring what the summary report serializes to JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Mean and sample standard deviation of one metric
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub stddev: f64,
}

/// Summarize a sample list. Empty input yields zeros; a single sample
/// has zero deviation.
pub fn summarize(values: &[f64]) -> MetricSummary {
    if values.is_empty() {
        return MetricSummary::default();
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let stddev = if values.len() > 1 {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };
    MetricSummary { mean, stddev }
}

/// Raw samples collected for one (algorithm, TTL) cell
#[derive(Debug, Default)]
pub struct TrialAccumulator {
    successes: Vec<f64>,
    messages: Vec<f64>,
    visited: Vec<f64>,
    execution_times_ms: Vec<f64>,
}

impl TrialAccumulator {
    /// Record the outcome of a single trial
    pub fn record(&mut self, found: bool, messages: u64, visited: usize, elapsed_ms: f64) {
        self.successes.push(if found { 1.0 } else { 0.0 });
        self.messages.push(messages as f64);
        self.visited.push(visited as f64);
        self.execution_times_ms.push(elapsed_ms);
    }

    pub fn len(&self) -> usize {
        self.successes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successes.is_empty()
    }

    /// Collapse the samples into a serializable summary
    pub fn summarize(&self) -> CellStats {
        let mut success_rate_pct = summarize(&self.successes);
        success_rate_pct.mean *= 100.0;
        success_rate_pct.stddev *= 100.0;

        CellStats {
            trials: self.len(),
            success_rate_pct,
            messages: summarize(&self.messages),
            visited: summarize(&self.visited),
            execution_time_ms: summarize(&self.execution_times_ms),
        }
    }
}

/// Summary statistics for one (algorithm, TTL) cell
#[derive(Debug, Clone, Serialize)]
pub struct CellStats {
    pub trials: usize,
    pub success_rate_pct: MetricSummary,
    pub messages: MetricSummary,
    pub visited: MetricSummary,
    pub execution_time_ms: MetricSummary,
}

/// Per-topology results: algorithm name -> TTL -> cell summary
pub type TopologyStats = BTreeMap<String, BTreeMap<u64, CellStats>>;

/// Full benchmark report, serialized to JSON by the harness
#[derive(Debug, Serialize)]
pub struct BenchmarkReport {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub trials_per_cell: usize,
    /// Topology name -> per-topology results
    pub topologies: BTreeMap<String, TopologyStats>,
}
