//! Hard-constraint validation for candidate placements.
//!
//! Violations are accumulated as strings, not raised as errors: an
//! infeasible candidate is a normal outcome, and the coordinator decides
//! what to do with it. Checks never short-circuit, so a caller sees every
//! problem at once.

use std::collections::HashMap;

use rack_core::types::{join_positions, DeviceAttributes, PlacementPosition, Rack};

/// Check a candidate placement against all hard constraints.
///
/// Order: unit bounds, unit overlap, power budget, weight budget, cooling
/// budget (when rated), locked-device presence. An empty result means the
/// placement is valid. Positions naming a device outside `devices` are
/// ignored, matching the generators' skip behavior.
pub fn validate(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
    locked_device_ids: &[String],
) -> Vec<String> {
    let mut violations = Vec::new();
    let placed = join_positions(devices, positions);

    for (device, pos) in &placed {
        if pos.start_u < 1 {
            violations.push(format!(
                "device {} starts below the rack floor (unit {})",
                device.device_id, pos.start_u
            ));
        }
        if pos.end_u(device) > rack.total_height_u {
            violations.push(format!(
                "device {} extends beyond the rack top (units {}-{} of {})",
                device.device_id,
                pos.start_u,
                pos.end_u(device),
                rack.total_height_u
            ));
        }
    }

    // First claimant per unit wins; each unit reports at most one pair.
    let mut unit_owner: HashMap<u32, &str> = HashMap::new();
    for (device, pos) in &placed {
        for u in pos.start_u..=pos.end_u(device) {
            match unit_owner.get(&u) {
                Some(owner) => violations.push(format!(
                    "devices {} and {} overlap at unit {}",
                    owner, device.device_id, u
                )),
                None => {
                    unit_owner.insert(u, device.device_id.as_str());
                }
            }
        }
    }

    let total_power: f64 = placed.iter().map(|(d, _)| d.power()).sum();
    if total_power > rack.max_power_watts {
        violations.push(format!(
            "total power draw {:.0} W exceeds the rack budget of {:.0} W",
            total_power, rack.max_power_watts
        ));
    }

    let total_weight: f64 = placed.iter().map(|(d, _)| d.weight()).sum();
    if total_weight > rack.max_weight_kg {
        violations.push(format!(
            "total weight {:.1} kg exceeds the rack limit of {:.1} kg",
            total_weight, rack.max_weight_kg
        ));
    }

    if let Some(capacity) = rack.cooling_capacity_btu {
        let total_heat: f64 = placed.iter().map(|(d, _)| d.heat_btu()).sum();
        if total_heat > capacity {
            violations.push(format!(
                "total heat load {:.0} BTU/hr exceeds the cooling capacity of {:.0} BTU/hr",
                total_heat, capacity
            ));
        }
    }

    for locked in locked_device_ids {
        if !positions.iter().any(|p| &p.device_id == locked) {
            violations.push(format!(
                "locked device {locked} is missing from the placement"
            ));
        }
    }

    violations
}
