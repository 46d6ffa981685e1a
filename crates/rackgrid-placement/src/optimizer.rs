//! Optimization coordinator.
//!
//! Runs every placement strategy, filters out infeasible candidates, scores
//! the survivors, and returns the best layout together with a
//! human-readable improvement narrative and run metadata. Each call is a
//! pure request/response transformation over caller-supplied snapshots; no
//! state persists between calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use rack_core::types::{
    Connection, DeviceAttributes, ObjectiveWeights, PlacementPosition, PlacementSolution, Rack,
    ScoreBreakdown,
};

use crate::generator::PlacementStrategy;
use crate::scoring::score_placement;

/// Objective deltas above this many score points get a narrative call-out.
const NARRATIVE_DELTA: f64 = 0.05;

/// Objectives at or above this score are called out as strengths.
const STRONG_OBJECTIVE: f64 = 0.8;

/// Errors from the coordinator. Infeasible *candidates* are normal data;
/// this fires only when no strategy can produce a valid layout at all.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error(
        "no strategy produced a feasible placement ({candidates} candidates rejected); \
         remove devices, raise rack capacity, or unlock pinned positions"
    )]
    NoFeasiblePlacement { candidates: usize },
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;

/// Run metadata for one optimization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationMetadata {
    /// Name of the winning strategy.
    pub strategy: String,
    /// Candidates scored (valid ones only).
    pub alternatives_evaluated: usize,
    pub devices_placed: usize,
    pub devices_total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_score: Option<f64>,
    pub optimized_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_percent: Option<f64>,
    pub weights: ObjectiveWeights,
    pub breakdown: ScoreBreakdown,
}

/// The full result of one optimization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub solution: PlacementSolution,
    pub improvements: Vec<String>,
    pub metadata: OptimizationMetadata,
}

/// Compute the best placement for `devices` in `rack`.
///
/// When `current_positions` is supplied it is scored as a comparison
/// baseline; a layout that cannot be scored (for example, positions naming
/// unknown devices) is tolerated and treated as "no baseline".
pub fn optimize(
    rack: &Rack,
    devices: &[DeviceAttributes],
    connections: &[Connection],
    weights: &ObjectiveWeights,
    locked_device_ids: &[String],
    current_positions: Option<&[PlacementPosition]>,
) -> OptimizeResult<OptimizationOutcome> {
    let baseline = current_positions.and_then(|positions| {
        baseline_breakdown(rack, devices, connections, positions, weights)
    });

    let mut best: Option<(PlacementStrategy, PlacementSolution)> = None;
    let mut rejected = 0usize;
    let mut evaluated = 0usize;

    for strategy in PlacementStrategy::ALL {
        let mut candidate = strategy.generate(rack, devices, weights, locked_device_ids);
        if !candidate.is_valid() {
            debug!(
                strategy = strategy.name(),
                violations = candidate.violations.len(),
                "candidate rejected"
            );
            rejected += 1;
            continue;
        }
        // An empty layout for a non-empty device set is not a usable
        // answer; callers get a fatal error instead of a degraded result.
        if candidate.positions.is_empty() && !devices.is_empty() {
            debug!(strategy = strategy.name(), "candidate placed no devices");
            rejected += 1;
            continue;
        }

        candidate.breakdown =
            score_placement(rack, devices, connections, &candidate.positions, weights);
        evaluated += 1;

        let better = match &best {
            Some((_, incumbent)) => candidate.breakdown.total > incumbent.breakdown.total,
            None => true,
        };
        if better {
            best = Some((strategy, candidate));
        }
    }

    let Some((strategy, solution)) = best else {
        return Err(OptimizeError::NoFeasiblePlacement {
            candidates: rejected,
        });
    };

    info!(
        strategy = strategy.name(),
        score = solution.breakdown.total,
        placed = solution.positions.len(),
        total = devices.len(),
        "selected placement"
    );

    let improvements = build_narrative(strategy, &solution, baseline.as_ref());
    let improvement_percent = baseline.as_ref().and_then(|b| {
        (b.total > 0.0).then(|| (solution.breakdown.total - b.total) / b.total * 100.0)
    });

    let metadata = OptimizationMetadata {
        strategy: strategy.name().to_string(),
        alternatives_evaluated: evaluated,
        devices_placed: solution.positions.len(),
        devices_total: devices.len(),
        baseline_score: baseline.as_ref().map(|b| b.total),
        optimized_score: solution.breakdown.total,
        improvement_percent,
        weights: *weights,
        breakdown: solution.breakdown.clone(),
    };

    Ok(OptimizationOutcome {
        solution,
        improvements,
        metadata,
    })
}

/// Score the caller's current layout, or `None` when it cannot serve as a
/// baseline.
fn baseline_breakdown(
    rack: &Rack,
    devices: &[DeviceAttributes],
    connections: &[Connection],
    positions: &[PlacementPosition],
    weights: &ObjectiveWeights,
) -> Option<ScoreBreakdown> {
    if positions.is_empty() {
        return None;
    }
    if positions
        .iter()
        .any(|p| !devices.iter().any(|d| d.device_id == p.device_id))
    {
        debug!("current layout names unknown devices, skipping baseline");
        return None;
    }
    // Even a current layout that violates hard constraints still yields a
    // comparable score; scoring is total over well-formed input.
    Some(score_placement(rack, devices, connections, positions, weights))
}

/// Assemble the ordered improvement narrative.
fn build_narrative(
    strategy: PlacementStrategy,
    solution: &PlacementSolution,
    baseline: Option<&ScoreBreakdown>,
) -> Vec<String> {
    let mut lines = Vec::new();
    let optimized = &solution.breakdown;

    match baseline {
        None => {
            lines.push(format!(
                "Optimized layout scores {:.2} overall",
                optimized.total
            ));
            for (name, score) in objective_scores(optimized) {
                if score >= STRONG_OBJECTIVE {
                    lines.push(format!("Strong {name} score ({score:.2})"));
                }
            }
        }
        Some(base) => {
            if base.total > 0.0 {
                let delta = (optimized.total - base.total) / base.total * 100.0;
                if delta >= 0.0 {
                    lines.push(format!(
                        "Overall score improved {delta:.1}% over the current layout"
                    ));
                } else {
                    lines.push(format!(
                        "Overall score declined {:.1}% against the current layout",
                        delta.abs()
                    ));
                }
            } else {
                lines.push(format!(
                    "Optimized layout scores {:.2} overall",
                    optimized.total
                ));
            }
            for ((name, after), (_, before)) in
                objective_scores(optimized).iter().zip(objective_scores(base).iter())
            {
                let delta = after - before;
                if delta.abs() > NARRATIVE_DELTA {
                    let direction = if delta > 0.0 { "improved" } else { "declined" };
                    lines.push(format!(
                        "{name} {direction} from {before:.2} to {after:.2}"
                    ));
                }
            }
        }
    }

    lines.push(format!(
        "Selected {} layout with total score {:.2}",
        strategy.name(),
        optimized.total
    ));
    lines
}

fn objective_scores(breakdown: &ScoreBreakdown) -> [(&'static str, f64); 5] {
    [
        ("thermal management", breakdown.thermal),
        ("power distribution", breakdown.power),
        ("cable management", breakdown.cable),
        ("access placement", breakdown.access),
        ("weight distribution", breakdown.weight),
    ]
}
