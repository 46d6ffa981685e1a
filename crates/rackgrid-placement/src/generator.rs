//! Candidate placement generators.
//!
//! Each heuristic is a variant of one closed enum behind a single
//! `generate` signature; the coordinator iterates `PlacementStrategy::ALL`
//! and treats every variant identically. Adding a heuristic means adding a
//! variant, not a type hierarchy.
//!
//! Devices that cannot fit anywhere are silently omitted from the
//! candidate — a shorter placement is a worse-scoring candidate or an
//! invalid one (when a locked device is dropped), never an error here.

use tracing::debug;

use rack_core::types::{
    DeviceAttributes, ObjectiveWeights, PlacementPosition, PlacementSolution, Rack,
    ScoreBreakdown,
};

use crate::occupancy::UnitOccupancy;
use crate::validator::validate;

/// Heat category boundaries for the zone-balanced heuristic, in BTU/hr.
const HIGH_HEAT_BTU: f64 = 1500.0;
const MEDIUM_HEAT_BTU: f64 = 500.0;

/// The closed set of placement heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// Height-driven greedy bin-packing.
    FirstFitDecreasing,
    /// Heat-category-driven layout that sinks hot devices low.
    ThermalZoneBalanced,
}

impl PlacementStrategy {
    pub const ALL: [PlacementStrategy; 2] = [
        PlacementStrategy::FirstFitDecreasing,
        PlacementStrategy::ThermalZoneBalanced,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlacementStrategy::FirstFitDecreasing => "first-fit-decreasing",
            PlacementStrategy::ThermalZoneBalanced => "thermal-zone-balanced",
        }
    }

    /// Produce an unscored candidate. Violations are populated via the
    /// validator before returning; the breakdown stays zeroed until the
    /// scoring engine fills it in.
    pub fn generate(
        &self,
        rack: &Rack,
        devices: &[DeviceAttributes],
        _weights: &ObjectiveWeights,
        locked_device_ids: &[String],
    ) -> PlacementSolution {
        let positions = match self {
            PlacementStrategy::FirstFitDecreasing => first_fit_decreasing(rack, devices),
            PlacementStrategy::ThermalZoneBalanced => thermal_zone_balanced(rack, devices),
        };

        let violations = validate(rack, devices, &positions, locked_device_ids);
        debug!(
            strategy = self.name(),
            placed = positions.len(),
            supplied = devices.len(),
            violations = violations.len(),
            "generated candidate"
        );

        PlacementSolution {
            positions,
            breakdown: ScoreBreakdown::default(),
            violations,
        }
    }
}

/// Devices eligible for placement. Entries without a positive height are
/// skipped rather than crashing the heuristic.
fn placeable(devices: &[DeviceAttributes]) -> Vec<&DeviceAttributes> {
    devices.iter().filter(|d| d.height_u > 0.0).collect()
}

fn by_height_then_weight_desc(a: &&DeviceAttributes, b: &&DeviceAttributes) -> std::cmp::Ordering {
    b.height_u
        .partial_cmp(&a.height_u)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then(
            b.weight()
                .partial_cmp(&a.weight())
                .unwrap_or(std::cmp::Ordering::Equal),
        )
}

/// First-Fit-Decreasing: tallest (then heaviest) devices first, each at the
/// lowest free span.
fn first_fit_decreasing(rack: &Rack, devices: &[DeviceAttributes]) -> Vec<PlacementPosition> {
    let mut order = placeable(devices);
    order.sort_by(by_height_then_weight_desc);

    let mut occupied = UnitOccupancy::new();
    let mut positions = Vec::new();

    for device in order {
        match occupied.first_fit(device.span_u(), rack.total_height_u) {
            Some(start_u) => {
                occupied.claim(start_u, device.span_u());
                positions.push(PlacementPosition {
                    device_id: device.device_id.clone(),
                    start_u,
                });
            }
            None => {
                debug!(device = %device.device_id, "no free span, device omitted");
            }
        }
    }

    positions
}

/// Thermal-Zone-Balanced: high-heat devices sink to the bottom third,
/// medium-heat devices prefer the middle third, low-heat devices fill
/// whatever remains. Band preferences fall back to any free span when the
/// preferred band is exhausted.
fn thermal_zone_balanced(rack: &Rack, devices: &[DeviceAttributes]) -> Vec<PlacementPosition> {
    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();

    for device in placeable(devices) {
        let heat = device.heat_btu();
        if heat > HIGH_HEAT_BTU {
            high.push(device);
        } else if heat >= MEDIUM_HEAT_BTU {
            medium.push(device);
        } else {
            low.push(device);
        }
    }
    high.sort_by(by_height_then_weight_desc);
    medium.sort_by(by_height_then_weight_desc);
    low.sort_by(by_height_then_weight_desc);

    let bottom_hi = (rack.total_height_u as f64 / 3.0).floor() as u32;
    let middle_hi = (2.0 * rack.total_height_u as f64 / 3.0).floor() as u32;

    let mut occupied = UnitOccupancy::new();
    let mut positions = Vec::new();

    let place = |device: &DeviceAttributes,
                     band: Option<(u32, u32)>,
                     occupied: &mut UnitOccupancy,
                     positions: &mut Vec<PlacementPosition>| {
        let span = device.span_u();
        let start = band
            .and_then(|(lo, hi)| occupied.first_fit_in(span, rack.total_height_u, lo, hi))
            .or_else(|| occupied.first_fit(span, rack.total_height_u));
        match start {
            Some(start_u) => {
                occupied.claim(start_u, span);
                positions.push(PlacementPosition {
                    device_id: device.device_id.clone(),
                    start_u,
                });
            }
            None => {
                debug!(device = %device.device_id, "no free span, device omitted");
            }
        }
    };

    for device in high {
        place(device, Some((1, bottom_hi)), &mut occupied, &mut positions);
    }
    for device in medium {
        place(
            device,
            Some((bottom_hi + 1, middle_hi)),
            &mut occupied,
            &mut positions,
        );
    }
    for device in low {
        place(device, None, &mut occupied, &mut positions);
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rack_core::types::{AccessFrequency, AirflowPattern, RackWidth};
    use rackgrid_thermal::zone::{zone_of, ThermalZone};

    fn make_rack(total_height_u: u32) -> Rack {
        Rack {
            name: "rack-a1".to_string(),
            total_height_u,
            width: RackWidth::Standard19,
            depth_mm: None,
            max_weight_kg: 900.0,
            max_power_watts: 5000.0,
            cooling_capacity_btu: None,
            ambient_temp_c: None,
        }
    }

    fn make_device(id: &str, height: f64) -> DeviceAttributes {
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

    fn position_of<'a>(positions: &'a [PlacementPosition], id: &str) -> &'a PlacementPosition {
        positions.iter().find(|p| p.device_id == id).unwrap()
    }

    #[test]
    fn ffd_places_tallest_first() {
        let rack = make_rack(42);
        let devices = vec![
            make_device("small", 1.0),
            make_device("big", 4.0),
            make_device("mid", 2.0),
        ];
        let solution = PlacementStrategy::FirstFitDecreasing.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );

        assert!(solution.is_valid());
        assert_eq!(position_of(&solution.positions, "big").start_u, 1);
        assert_eq!(position_of(&solution.positions, "mid").start_u, 5);
        assert_eq!(position_of(&solution.positions, "small").start_u, 7);
    }

    #[test]
    fn ffd_breaks_height_ties_by_weight() {
        let rack = make_rack(42);
        let mut light = make_device("light", 2.0);
        light.weight_kg = Some(5.0);
        let mut heavy = make_device("heavy", 2.0);
        heavy.weight_kg = Some(40.0);
        let devices = vec![light, heavy];

        let solution = PlacementStrategy::FirstFitDecreasing.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );
        assert_eq!(position_of(&solution.positions, "heavy").start_u, 1);
        assert_eq!(position_of(&solution.positions, "light").start_u, 3);
    }

    #[test]
    fn ffd_silently_omits_unfittable_devices() {
        let rack = make_rack(4);
        let devices = vec![
            make_device("fits", 3.0),
            make_device("too-tall", 6.0),
            make_device("squeezed-out", 2.0),
        ];
        let solution = PlacementStrategy::FirstFitDecreasing.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );

        // 6U never fits; after the 3U device only 1 unit remains for the 2U.
        assert_eq!(solution.positions.len(), 1);
        assert!(solution.is_valid());
    }

    #[test]
    fn ffd_skips_devices_without_height() {
        let rack = make_rack(42);
        let devices = vec![make_device("ok", 2.0), make_device("broken", 0.0)];
        let solution = PlacementStrategy::FirstFitDecreasing.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );
        assert_eq!(solution.positions.len(), 1);
        assert_eq!(solution.positions[0].device_id, "ok");
    }

    #[test]
    fn omitted_locked_device_invalidates_candidate() {
        let rack = make_rack(2);
        let devices = vec![make_device("pinned", 6.0)];
        let locked = vec!["pinned".to_string()];

        let solution = PlacementStrategy::FirstFitDecreasing.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &locked,
        );
        assert!(!solution.is_valid());
        assert!(solution.violations[0].contains("locked device"));
    }

    #[test]
    fn zone_balanced_sinks_hot_devices() {
        let rack = make_rack(42);
        let mut hot = make_device("hot", 2.0);
        hot.heat_output_btu = Some(2500.0);
        let mut warm = make_device("warm", 2.0);
        warm.heat_output_btu = Some(800.0);
        let mut cool = make_device("cool", 1.0);
        cool.heat_output_btu = Some(100.0);
        let devices = vec![cool.clone(), warm.clone(), hot.clone()];

        let solution = PlacementStrategy::ThermalZoneBalanced.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );
        assert!(solution.is_valid());

        let hot_pos = position_of(&solution.positions, "hot");
        let warm_pos = position_of(&solution.positions, "warm");
        assert_eq!(
            zone_of(hot_pos.midpoint_u(&hot), rack.total_height_u),
            ThermalZone::Bottom
        );
        assert_eq!(
            zone_of(warm_pos.midpoint_u(&warm), rack.total_height_u),
            ThermalZone::Middle
        );
    }

    #[test]
    fn zone_balanced_falls_back_when_band_is_full() {
        let rack = make_rack(6); // bottom band is units 1-2
        let mut hot_a = make_device("hot-a", 2.0);
        hot_a.heat_output_btu = Some(3000.0);
        let mut hot_b = make_device("hot-b", 2.0);
        hot_b.heat_output_btu = Some(2000.0);
        let devices = vec![hot_a, hot_b];

        let solution = PlacementStrategy::ThermalZoneBalanced.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );
        // Both placed: the second hot device spills out of the bottom band.
        assert_eq!(solution.positions.len(), 2);
        assert!(solution.is_valid());
        assert_eq!(position_of(&solution.positions, "hot-a").start_u, 1);
        assert_eq!(position_of(&solution.positions, "hot-b").start_u, 3);
    }

    #[test]
    fn zone_balanced_uses_power_derived_heat_for_categories() {
        let rack = make_rack(42);
        // 500 W ≈ 1706 BTU/hr — high category via the power fallback.
        let mut server = make_device("server", 2.0);
        server.power_watts = Some(500.0);
        let devices = vec![server.clone()];

        let solution = PlacementStrategy::ThermalZoneBalanced.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );
        let pos = position_of(&solution.positions, "server");
        assert_eq!(
            zone_of(pos.midpoint_u(&server), rack.total_height_u),
            ThermalZone::Bottom
        );
    }

    #[test]
    fn strategies_produce_different_layouts() {
        let rack = make_rack(42);
        let mut hot_small = make_device("hot-small", 1.0);
        hot_small.heat_output_btu = Some(2500.0);
        let mut cool_tall = make_device("cool-tall", 4.0);
        cool_tall.heat_output_btu = Some(100.0);
        let devices = vec![hot_small, cool_tall];
        let weights = ObjectiveWeights::default();

        let ffd = PlacementStrategy::FirstFitDecreasing.generate(&rack, &devices, &weights, &[]);
        let balanced =
            PlacementStrategy::ThermalZoneBalanced.generate(&rack, &devices, &weights, &[]);

        // FFD puts the tall cool device at the bottom; the balanced layout
        // puts the hot device there instead.
        assert_eq!(position_of(&ffd.positions, "cool-tall").start_u, 1);
        assert_eq!(position_of(&balanced.positions, "hot-small").start_u, 1);
    }

    #[test]
    fn end_to_end_two_device_scenario() {
        let mut rack = make_rack(42);
        rack.max_power_watts = 2000.0;
        rack.cooling_capacity_btu = Some(10_000.0);

        let mut a = make_device("dev-a", 2.0);
        a.power_watts = Some(750.0);
        a.weight_kg = Some(28.0);
        a.heat_output_btu = Some(2559.0);
        a.access_frequency = AccessFrequency::High;
        let mut b = make_device("dev-b", 1.0);
        b.power_watts = Some(180.0);
        b.weight_kg = Some(3.5);
        b.access_frequency = AccessFrequency::Low;
        let devices = vec![a.clone(), b.clone()];

        let solution = PlacementStrategy::FirstFitDecreasing.generate(
            &rack,
            &devices,
            &ObjectiveWeights::default(),
            &[],
        );

        assert_eq!(solution.positions.len(), 2);
        assert!(solution.is_valid());

        // FFD places the 2U device first, bottom-up.
        let pos_a = position_of(&solution.positions, "dev-a");
        assert_eq!(pos_a.start_u, 1);
        assert_eq!(
            zone_of(pos_a.midpoint_u(&a), rack.total_height_u),
            ThermalZone::Bottom
        );
        let pos_b = position_of(&solution.positions, "dev-b");
        assert_eq!(pos_b.start_u, 3);
    }
}
