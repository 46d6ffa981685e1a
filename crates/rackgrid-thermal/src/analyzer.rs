//! Heat and cooling-capacity analysis for a positioned device set.
//!
//! Four read-only reports, each computable independently of optimization:
//! - **Heat distribution** — per-zone and total heat/power
//! - **Cooling efficiency** — utilization against rated capacity
//! - **Hot spots** — devices above a heat threshold
//! - **Airflow conflicts** — opposing patterns on adjacent devices
//!
//! `analyze` bundles all four plus rule-based recommendations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rack_core::types::{
    join_positions, DeviceAttributes, PlacementPosition, Rack, BTU_PER_TON,
};

use crate::zone::{zone_of, ThermalZone};

/// Default heat threshold for hot-spot identification.
pub const DEFAULT_HOT_SPOT_THRESHOLD_BTU: f64 = 1000.0;

/// Heat at or above this marks a hot spot as high severity.
pub const SEVERE_HOT_SPOT_BTU: f64 = 2000.0;

/// Hot-spot threshold used by the recommendation rules.
pub const RECOMMENDATION_HOT_SPOT_BTU: f64 = 1500.0;

/// Aggregated load for one thermal zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneLoad {
    pub zone: ThermalZone,
    pub heat_btu: f64,
    pub power_watts: f64,
    pub device_count: usize,
}

/// Per-zone and total heat/power for a positioned device set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatDistribution {
    /// Bottom-up zone order, always three entries.
    pub zones: Vec<ZoneLoad>,
    pub total_heat_btu: f64,
    pub total_power_watts: f64,
}

impl HeatDistribution {
    pub fn zone_heat(&self, zone: ThermalZone) -> f64 {
        self.zones[zone.index()].heat_btu
    }
}

/// Cooling utilization status buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoolingStatus {
    Optimal,
    Acceptable,
    Warning,
    Critical,
}

impl CoolingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CoolingStatus::Optimal => "optimal",
            CoolingStatus::Acceptable => "acceptable",
            CoolingStatus::Warning => "warning",
            CoolingStatus::Critical => "critical",
        }
    }
}

/// Cooling-capacity utilization report.
///
/// With no rated capacity the rack behaves as unlimited: utilization is
/// reported as 0% and the capacity-derived fields stay unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoolingEfficiency {
    pub utilization_percent: f64,
    pub status: CoolingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_btu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_tons: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_btu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_tons: Option<f64>,
}

/// Severity grading shared by hot spots and airflow conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// A device whose heat output crosses the hot-spot threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotSpot {
    pub device_id: String,
    pub heat_btu: f64,
    pub start_u: u32,
    pub zone: ThermalZone,
    pub severity: Severity,
}

/// Two vertically adjacent devices with opposing airflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirflowConflict {
    pub lower_device_id: String,
    pub upper_device_id: String,
    pub lower_airflow: String,
    pub upper_airflow: String,
    pub severity: Severity,
    pub description: String,
}

/// The full diagnostic bundle produced by [`analyze`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalAnalysis {
    pub rack_name: String,
    pub heat: HeatDistribution,
    pub cooling: CoolingEfficiency,
    pub hot_spots: Vec<HotSpot>,
    pub airflow_conflicts: Vec<AirflowConflict>,
    pub recommendations: Vec<String>,
}

/// Aggregate heat and power by thermal zone.
///
/// Each device is assigned to the zone containing its vertical midpoint.
pub fn heat_distribution(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> HeatDistribution {
    let mut zones: Vec<ZoneLoad> = ThermalZone::ALL
        .iter()
        .map(|&zone| ZoneLoad {
            zone,
            heat_btu: 0.0,
            power_watts: 0.0,
            device_count: 0,
        })
        .collect();

    let mut total_heat = 0.0;
    let mut total_power = 0.0;

    for (device, pos) in join_positions(devices, positions) {
        let zone = zone_of(pos.midpoint_u(device), rack.total_height_u);
        let load = &mut zones[zone.index()];
        load.heat_btu += device.heat_btu();
        load.power_watts += device.power();
        load.device_count += 1;
        total_heat += device.heat_btu();
        total_power += device.power();
    }

    HeatDistribution {
        zones,
        total_heat_btu: total_heat,
        total_power_watts: total_power,
    }
}

/// Compute cooling utilization against the rack's rated capacity.
pub fn cooling_efficiency(rack: &Rack, total_heat_btu: f64) -> CoolingEfficiency {
    let capacity = rack.cooling_capacity_btu.filter(|&c| c > 0.0);

    let utilization_percent = match capacity {
        Some(cap) => total_heat_btu / cap * 100.0,
        None => 0.0,
    };

    let status = if utilization_percent < 70.0 {
        CoolingStatus::Optimal
    } else if utilization_percent < 85.0 {
        CoolingStatus::Acceptable
    } else if utilization_percent < 100.0 {
        CoolingStatus::Warning
    } else {
        CoolingStatus::Critical
    };

    CoolingEfficiency {
        utilization_percent,
        status,
        capacity_btu: capacity,
        capacity_tons: capacity.map(|c| c / BTU_PER_TON),
        remaining_btu: capacity.map(|c| c - total_heat_btu),
        remaining_tons: capacity.map(|c| (c - total_heat_btu) / BTU_PER_TON),
    }
}

/// Devices whose heat output meets `threshold_btu`, hottest first.
pub fn hot_spots(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
    threshold_btu: f64,
) -> Vec<HotSpot> {
    let mut spots: Vec<HotSpot> = join_positions(devices, positions)
        .into_iter()
        .filter(|(device, _)| device.heat_btu() >= threshold_btu)
        .map(|(device, pos)| HotSpot {
            device_id: device.device_id.clone(),
            heat_btu: device.heat_btu(),
            start_u: pos.start_u,
            zone: zone_of(pos.midpoint_u(device), rack.total_height_u),
            severity: if device.heat_btu() >= SEVERE_HOT_SPOT_BTU {
                Severity::High
            } else {
                Severity::Medium
            },
        })
        .collect();

    spots.sort_by(|a, b| {
        b.heat_btu
            .partial_cmp(&a.heat_btu)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    spots
}

/// Scan vertically adjacent device pairs for opposing airflow patterns.
///
/// Adjacency follows start_u ordering; an exhaust stream feeding directly
/// into the intake above (or below) it causes recirculation.
pub fn airflow_conflicts(
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> Vec<AirflowConflict> {
    let mut placed = join_positions(devices, positions);
    placed.sort_by_key(|(_, pos)| pos.start_u);

    let mut conflicts = Vec::new();
    for pair in placed.windows(2) {
        let (lower, lower_pos) = pair[0];
        let (upper, _) = pair[1];
        if lower.airflow.opposes(upper.airflow) {
            debug!(
                lower = %lower.device_id,
                upper = %upper.device_id,
                "opposing airflow between adjacent devices"
            );
            conflicts.push(AirflowConflict {
                lower_device_id: lower.device_id.clone(),
                upper_device_id: upper.device_id.clone(),
                lower_airflow: lower.airflow.label().to_string(),
                upper_airflow: upper.airflow.label().to_string(),
                severity: Severity::High,
                description: format!(
                    "{} ({}) exhausts into {} ({}) near unit {}, causing recirculation",
                    lower.device_id,
                    lower.airflow.label(),
                    upper.device_id,
                    upper.airflow.label(),
                    lower_pos.start_u,
                ),
            });
        }
    }
    conflicts
}

/// Rule-based recommendations for the current layout.
///
/// Rules fire in a fixed order; when nothing triggers, a single
/// all-clear message is returned.
pub fn recommendations(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> Vec<String> {
    let heat = heat_distribution(rack, devices, positions);
    let cooling = cooling_efficiency(rack, heat.total_heat_btu);
    let conflicts = airflow_conflicts(devices, positions);
    let spots = hot_spots(rack, devices, positions, RECOMMENDATION_HOT_SPOT_BTU);

    let mut out = Vec::new();

    if cooling.utilization_percent > 90.0 {
        out.push(
            "Cooling utilization exceeds 90% — upgrade cooling capacity or redistribute \
             heat-dense devices to another rack"
                .to_string(),
        );
    } else if cooling.capacity_btu.is_some() && cooling.utilization_percent < 40.0 {
        out.push(
            "Cooling utilization is below 40% — capacity is over-provisioned for the \
             current load"
                .to_string(),
        );
    }

    let max_zone = heat
        .zones
        .iter()
        .map(|z| z.heat_btu)
        .fold(0.0f64, f64::max);
    let min_zone = heat
        .zones
        .iter()
        .map(|z| z.heat_btu)
        .fold(f64::INFINITY, f64::min);
    if min_zone > 0.0 && max_zone / min_zone > 3.0 {
        out.push(
            "Zone heat imbalance exceeds 3:1 — move load from the hottest zone toward \
             cooler zones"
                .to_string(),
        );
    }

    let top_heat = heat.zone_heat(ThermalZone::Top);
    if heat.total_heat_btu > 0.0 && top_heat / heat.total_heat_btu > 0.5 {
        out.push(
            "More than half of the rack's heat is in the top zone — relocate hot devices \
             lower to keep exhaust clear"
                .to_string(),
        );
    }

    if !conflicts.is_empty() {
        out.push(
            "Opposing airflow patterns detected between adjacent devices — reorient or \
             separate them to prevent recirculation"
                .to_string(),
        );
    }

    if !spots.is_empty() {
        out.push(
            "High-heat devices present — verify cold-aisle delivery at their positions \
             and leave clearance above them"
                .to_string(),
        );
    }

    if out.is_empty() {
        out.push("Thermal profile is optimal — no changes recommended".to_string());
    }

    out
}

/// Run every thermal report for one rack and bundle the results.
pub fn analyze(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> ThermalAnalysis {
    let heat = heat_distribution(rack, devices, positions);
    let cooling = cooling_efficiency(rack, heat.total_heat_btu);

    debug!(
        rack = %rack.name,
        total_heat_btu = heat.total_heat_btu,
        utilization = cooling.utilization_percent,
        status = cooling.status.label(),
        "thermal analysis"
    );

    ThermalAnalysis {
        rack_name: rack.name.clone(),
        heat,
        cooling,
        hot_spots: hot_spots(rack, devices, positions, DEFAULT_HOT_SPOT_THRESHOLD_BTU),
        airflow_conflicts: airflow_conflicts(devices, positions),
        recommendations: recommendations(rack, devices, positions),
    }
}
