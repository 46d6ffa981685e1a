//! Rackgrid thermal analysis — zone model, heat aggregation, cooling
//! capacity, hot spots, airflow conflicts.
//!
//! This crate is consumed two ways: the placement objectives read the zone
//! model and aggregation helpers, and callers invoke [`analyzer::analyze`]
//! directly for a standalone diagnostic report without running any
//! optimization.
//!
//! # Components
//!
//! - **`zone`** — the three-band vertical zone model
//! - **`analyzer`** — heat distribution, cooling efficiency, hot spots,
//!   airflow conflicts, recommendations
//! - **`report`** — human-readable report formatting

pub mod analyzer;
pub mod report;
pub mod zone;

pub use analyzer::{
    analyze, airflow_conflicts, cooling_efficiency, heat_distribution, hot_spots,
    recommendations, AirflowConflict, CoolingEfficiency, CoolingStatus, HeatDistribution,
    HotSpot, Severity, ThermalAnalysis, ZoneLoad, DEFAULT_HOT_SPOT_THRESHOLD_BTU,
};
pub use report::format_report;
pub use zone::{zone_of, ThermalZone};
