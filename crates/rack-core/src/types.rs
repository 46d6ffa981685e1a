//! Shared types used across Rackgrid crates.

use serde::{Deserialize, Serialize};

/// One watt of electrical load dissipates roughly 3.412 BTU/hr of heat.
pub const WATTS_TO_BTU_HR: f64 = 3.412;

/// One refrigeration ton of cooling moves 12,000 BTU/hr.
pub const BTU_PER_TON: f64 = 12_000.0;

/// Convert electrical power to its dissipated heat rate.
///
/// This is the single conversion point for the power→heat fallback; every
/// consumer (objectives, analyzer, validator) goes through it.
pub fn watts_to_btu(watts: f64) -> f64 {
    watts * WATTS_TO_BTU_HR
}

/// Rack width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RackWidth {
    /// Standard 19-inch rails.
    #[default]
    Standard19,
    /// 23-inch telco rails.
    Wide23,
}

/// Direction a device moves air through the rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AirflowPattern {
    #[default]
    FrontToBack,
    BackToFront,
    SideToSide,
    Passive,
}

impl AirflowPattern {
    /// True when two patterns blow directly against each other.
    ///
    /// Only the front-to-back / back-to-front pairing recirculates exhaust;
    /// side-to-side and passive devices never oppose anything.
    pub fn opposes(&self, other: AirflowPattern) -> bool {
        matches!(
            (self, other),
            (AirflowPattern::FrontToBack, AirflowPattern::BackToFront)
                | (AirflowPattern::BackToFront, AirflowPattern::FrontToBack)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirflowPattern::FrontToBack => "front-to-back",
            AirflowPattern::BackToFront => "back-to-front",
            AirflowPattern::SideToSide => "side-to-side",
            AirflowPattern::Passive => "passive",
        }
    }
}

/// How often a device needs hands-on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessFrequency {
    #[default]
    Low,
    Medium,
    High,
}

/// Physical and electrical envelope of a rack.
///
/// Immutable snapshot for the duration of one optimization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rack {
    pub name: String,
    /// Usable height in rack units. Must be positive.
    pub total_height_u: u32,
    #[serde(default)]
    pub width: RackWidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_mm: Option<f64>,
    pub max_weight_kg: f64,
    pub max_power_watts: f64,
    /// Rated cooling capacity. Absent means "no limit".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_capacity_btu: Option<f64>,
    /// Inlet air temperature, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_temp_c: Option<f64>,
}

/// Catalog attributes of a single rack-mountable device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceAttributes {
    pub device_id: String,
    /// Height in rack units. Fractional heights are allowed.
    pub height_u: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_watts: Option<f64>,
    /// Measured heat output. Absent falls back to the power-derived value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_output_btu: Option<f64>,
    #[serde(default)]
    pub airflow: AirflowPattern,
    #[serde(default)]
    pub access_frequency: AccessFrequency,
}

impl DeviceAttributes {
    pub fn weight(&self) -> f64 {
        self.weight_kg.unwrap_or(0.0)
    }

    pub fn power(&self) -> f64 {
        self.power_watts.unwrap_or(0.0)
    }

    /// Heat dissipation in BTU/hr: the explicit datasheet value, or the
    /// power-derived fallback.
    pub fn heat_btu(&self) -> f64 {
        self.heat_output_btu
            .unwrap_or_else(|| watts_to_btu(self.power()))
    }

    /// Whole rack units occupied. Fractional heights round up to the next
    /// full unit.
    pub fn span_u(&self) -> u32 {
        (self.height_u.ceil() as u32).max(1)
    }
}

/// A cable run between two devices. Endpoints outside the supplied device
/// set are simply not "in-rack" and carry no penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub source_device_id: String,
    pub target_device_id: String,
}

/// A device pinned to a vertical offset. `start_u` is 1-based from the
/// rack floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementPosition {
    pub device_id: String,
    pub start_u: u32,
}

impl PlacementPosition {
    /// Last rack unit occupied by `device` at this position.
    pub fn end_u(&self, device: &DeviceAttributes) -> u32 {
        self.start_u + device.span_u() - 1
    }

    /// Vertical midpoint, used for zone assignment.
    pub fn midpoint_u(&self, device: &DeviceAttributes) -> f64 {
        self.start_u as f64 + device.height_u / 2.0
    }
}

/// Per-objective scores plus the weighted composite, all in [0, 1].
///
/// The power dimension is reported for diagnostics but is not part of the
/// weighted total; see DESIGN.md.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub thermal: f64,
    pub power: f64,
    pub cable: f64,
    pub access: f64,
    pub weight: f64,
    pub total: f64,
}

/// Weights for the composite score. Pre-validated to sum to 1.0 by the
/// plan config layer before the core ever sees them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub cable: f64,
    pub weight: f64,
    pub thermal: f64,
    pub access: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            cable: 0.25,
            weight: 0.25,
            thermal: 0.25,
            access: 0.25,
        }
    }
}

impl ObjectiveWeights {
    pub fn sum(&self) -> f64 {
        self.cable + self.weight + self.thermal + self.access
    }
}

/// A candidate or final placement: positions, scores, and any hard
/// constraint violations. Violations are data, not errors — an infeasible
/// candidate simply carries a non-empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementSolution {
    pub positions: Vec<PlacementPosition>,
    pub breakdown: ScoreBreakdown,
    pub violations: Vec<String>,
}

impl PlacementSolution {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Join positions with their device attributes, skipping positions whose
/// device id is not in the supplied set.
pub fn join_positions<'a>(
    devices: &'a [DeviceAttributes],
    positions: &'a [PlacementPosition],
) -> Vec<(&'a DeviceAttributes, &'a PlacementPosition)> {
    positions
        .iter()
        .filter_map(|pos| {
            devices
                .iter()
                .find(|d| d.device_id == pos.device_id)
                .map(|d| (d, pos))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, height: f64) -> DeviceAttributes {
        DeviceAttributes {
            device_id: id.to_string(),
            height_u: height,
            weight_kg: None,
            power_watts: None,
            heat_output_btu: None,
            airflow: AirflowPattern::FrontToBack,
            access_frequency: AccessFrequency::Low,
        }
    }

    #[test]
    fn heat_falls_back_to_power_derived() {
        let mut d = device("sw1", 1.0);
        d.power_watts = Some(100.0);
        assert!((d.heat_btu() - 341.2).abs() < 1e-9);

        d.heat_output_btu = Some(500.0);
        assert_eq!(d.heat_btu(), 500.0);
    }

    #[test]
    fn missing_numerics_default_to_zero() {
        let d = device("sw1", 1.0);
        assert_eq!(d.power(), 0.0);
        assert_eq!(d.weight(), 0.0);
        assert_eq!(d.heat_btu(), 0.0);
    }

    #[test]
    fn span_rounds_fractional_heights_up() {
        assert_eq!(device("a", 1.0).span_u(), 1);
        assert_eq!(device("b", 1.5).span_u(), 2);
        assert_eq!(device("c", 4.0).span_u(), 4);
    }

    #[test]
    fn position_end_and_midpoint() {
        let d = device("srv", 2.0);
        let pos = PlacementPosition {
            device_id: "srv".to_string(),
            start_u: 5,
        };
        assert_eq!(pos.end_u(&d), 6);
        assert_eq!(pos.midpoint_u(&d), 6.0);
    }

    #[test]
    fn opposing_airflow_is_symmetric() {
        assert!(AirflowPattern::FrontToBack.opposes(AirflowPattern::BackToFront));
        assert!(AirflowPattern::BackToFront.opposes(AirflowPattern::FrontToBack));
        assert!(!AirflowPattern::FrontToBack.opposes(AirflowPattern::FrontToBack));
        assert!(!AirflowPattern::Passive.opposes(AirflowPattern::BackToFront));
        assert!(!AirflowPattern::SideToSide.opposes(AirflowPattern::SideToSide));
    }

    #[test]
    fn join_skips_unknown_positions() {
        let devices = vec![device("a", 1.0)];
        let positions = vec![
            PlacementPosition {
                device_id: "a".to_string(),
                start_u: 1,
            },
            PlacementPosition {
                device_id: "ghost".to_string(),
                start_u: 2,
            },
        ];
        let joined = join_positions(&devices, &positions);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].0.device_id, "a");
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert!((ObjectiveWeights::default().sum() - 1.0).abs() < 1e-9);
    }
}
