//! Rackgrid placement engine — bin-packing heuristics, multi-objective
//! scoring, constraint validation.
//!
//! This crate decides where devices go in a rack. It does NOT analyze an
//! existing layout (that's `rackgrid-thermal`). The coordinator fans out
//! over the placement strategies, rejects infeasible candidates, and
//! returns the best-scoring valid layout.
//!
//! # Components
//!
//! - **`occupancy`** — occupied-unit bookkeeping for greedy placement
//! - **`validator`** — hard-constraint checks, accumulated as violation data
//! - **`generator`** — the closed set of placement strategies
//! - **`objectives`** — the five pure [0,1] scorers
//! - **`scoring`** — weighted composite score
//! - **`optimizer`** — candidate fan-out, selection, narrative, metadata

pub mod generator;
pub mod objectives;
pub mod occupancy;
pub mod optimizer;
pub mod scoring;
pub mod validator;

pub use generator::PlacementStrategy;
pub use occupancy::UnitOccupancy;
pub use optimizer::{
    optimize, OptimizationMetadata, OptimizationOutcome, OptimizeError, OptimizeResult,
};
pub use scoring::score_placement;
pub use validator::validate;
