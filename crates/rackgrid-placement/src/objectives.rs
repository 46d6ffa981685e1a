//! Objective functions for placement scoring.
//!
//! Each scorer is pure and maps a placement to [0, 1], higher is better.
//! An empty placement scores 1.0 everywhere: no devices means nothing to
//! penalize. Missing optional attributes contribute zero rather than
//! failing, so partially specified devices never poison a score.

use rack_core::types::{
    join_positions, Connection, DeviceAttributes, PlacementPosition, Rack,
};
use rackgrid_thermal::zone::{zone_of, ThermalZone};

/// Heat threshold above which a device counts as high-heat for spacing.
const HIGH_HEAT_BTU: f64 = 1500.0;

type Placed<'a> = (&'a DeviceAttributes, &'a PlacementPosition);

/// Sum a per-device quantity into the three zones by midpoint.
fn zone_totals(rack: &Rack, placed: &[Placed<'_>], value: impl Fn(&DeviceAttributes) -> f64) -> [f64; 3] {
    let mut totals = [0.0; 3];
    for (device, pos) in placed {
        let zone = zone_of(pos.midpoint_u(device), rack.total_height_u);
        totals[zone.index()] += value(device);
    }
    totals
}

/// min/max ratio across zones; 1.0 when nothing is loaded anywhere.
fn balance_ratio(totals: &[f64; 3]) -> f64 {
    let max = totals.iter().copied().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return 1.0;
    }
    let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
    min / max
}

/// Thermal management: zone balance, high-heat spacing, cooling headroom,
/// and a bottom-heavy bonus for keeping the heat centroid low.
pub fn thermal_score(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> f64 {
    let placed = join_positions(devices, positions);
    if placed.is_empty() {
        return 1.0;
    }

    let heat_zones = zone_totals(rack, &placed, |d| d.heat_btu());
    let balance = balance_ratio(&heat_zones);
    let spacing = high_heat_spacing(rack, &placed);
    let total_heat: f64 = placed.iter().map(|(d, _)| d.heat_btu()).sum();
    let headroom = cooling_headroom(rack, total_heat);
    let centroid = bottom_heavy_bonus(rack, &placed, total_heat);

    (0.3 * balance + 0.3 * spacing + 0.2 * headroom + 0.2 * centroid).clamp(0.0, 1.0)
}

/// Average vertical gap between high-heat devices, scored against an ideal
/// spacing of one third of the rack height. Zero or one such devices is a
/// perfect score.
fn high_heat_spacing(rack: &Rack, placed: &[Placed<'_>]) -> f64 {
    let mut midpoints: Vec<f64> = placed
        .iter()
        .filter(|(d, _)| d.heat_btu() > HIGH_HEAT_BTU)
        .map(|(d, pos)| pos.midpoint_u(d))
        .collect();
    if midpoints.len() < 2 {
        return 1.0;
    }
    midpoints.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let gaps: f64 = midpoints.windows(2).map(|w| w[1] - w[0]).sum();
    let avg_gap = gaps / (midpoints.len() - 1) as f64;
    let ideal = rack.total_height_u as f64 / 3.0;
    (avg_gap / ideal).min(1.0)
}

fn cooling_headroom(rack: &Rack, total_heat_btu: f64) -> f64 {
    match rack.cooling_capacity_btu.filter(|&c| c > 0.0) {
        Some(capacity) => (1.0 - total_heat_btu / capacity).clamp(0.0, 1.0),
        None => 1.0,
    }
}

/// Heat-weighted vertical centroid, bucketed: bottom third is ideal, lower
/// half is acceptable, anything above that is poor.
fn bottom_heavy_bonus(rack: &Rack, placed: &[Placed<'_>], total_heat_btu: f64) -> f64 {
    if total_heat_btu <= 0.0 {
        return 1.0;
    }
    let weighted: f64 = placed
        .iter()
        .map(|(d, pos)| d.heat_btu() * pos.midpoint_u(d))
        .sum();
    let centroid = weighted / total_heat_btu;
    let height = rack.total_height_u as f64;
    if centroid <= height / 3.0 {
        1.0
    } else if centroid <= height / 2.0 {
        0.7
    } else {
        0.3
    }
}

/// Power distribution: zone balance plus headroom against the rack's
/// power budget. Reported for diagnostics; not part of the weighted
/// composite (see DESIGN.md).
pub fn power_score(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> f64 {
    let placed = join_positions(devices, positions);
    if placed.is_empty() {
        return 1.0;
    }

    let power_zones = zone_totals(rack, &placed, |d| d.power());
    let balance = balance_ratio(&power_zones);

    let total_power: f64 = placed.iter().map(|(d, _)| d.power()).sum();
    let headroom = if rack.max_power_watts > 0.0 {
        (1.0 - total_power / rack.max_power_watts).clamp(0.0, 1.0)
    } else if total_power > 0.0 {
        0.0
    } else {
        1.0
    };

    (0.6 * balance + 0.4 * headroom).clamp(0.0, 1.0)
}

/// Cable management: short runs and same-zone endpoints for every
/// connection whose both endpoints are placed in this rack.
pub fn cable_score(
    rack: &Rack,
    devices: &[DeviceAttributes],
    connections: &[Connection],
    positions: &[PlacementPosition],
) -> f64 {
    let placed = join_positions(devices, positions);

    let mut distances = Vec::new();
    let mut same_zone = 0usize;
    for connection in connections {
        let source = placed
            .iter()
            .find(|(d, _)| d.device_id == connection.source_device_id);
        let target = placed
            .iter()
            .find(|(d, _)| d.device_id == connection.target_device_id);
        let (Some((src_dev, src_pos)), Some((dst_dev, dst_pos))) = (source, target) else {
            continue;
        };

        let src_mid = src_pos.midpoint_u(src_dev);
        let dst_mid = dst_pos.midpoint_u(dst_dev);
        distances.push((src_mid - dst_mid).abs());
        if zone_of(src_mid, rack.total_height_u) == zone_of(dst_mid, rack.total_height_u) {
            same_zone += 1;
        }
    }

    if distances.is_empty() {
        return 1.0;
    }

    let avg_distance = distances.iter().sum::<f64>() / distances.len() as f64;
    let proximity = (1.0 - avg_distance / rack.total_height_u as f64).clamp(0.0, 1.0);
    let zone_fraction = same_zone as f64 / distances.len() as f64;

    (0.6 * proximity + 0.4 * zone_fraction).clamp(0.0, 1.0)
}

/// Access frequency: high-touch devices belong in the ergonomic middle
/// band of the rack.
pub fn access_score(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> f64 {
    use rack_core::types::AccessFrequency;

    let placed = join_positions(devices, positions);
    let high_access: Vec<&Placed<'_>> = placed
        .iter()
        .filter(|(d, _)| d.access_frequency == AccessFrequency::High)
        .collect();
    if high_access.is_empty() {
        return 1.0;
    }

    let in_middle = high_access
        .iter()
        .filter(|(d, pos)| {
            zone_of(pos.midpoint_u(d), rack.total_height_u) == ThermalZone::Middle
        })
        .count();
    in_middle as f64 / high_access.len() as f64
}

/// Weight distribution: zone balance with a specific top-heavy penalty,
/// plus headroom against the rack's weight limit.
pub fn weight_score(
    rack: &Rack,
    devices: &[DeviceAttributes],
    positions: &[PlacementPosition],
) -> f64 {
    let placed = join_positions(devices, positions);
    if placed.is_empty() {
        return 1.0;
    }

    let weight_zones = zone_totals(rack, &placed, |d| d.weight());
    let bottom = weight_zones[ThermalZone::Bottom.index()];
    let middle = weight_zones[ThermalZone::Middle.index()];
    let top = weight_zones[ThermalZone::Top.index()];

    let balance = if top > bottom && top > middle && top > 0.0 {
        bottom.min(middle) / top
    } else {
        balance_ratio(&weight_zones)
    };

    let total_weight: f64 = placed.iter().map(|(d, _)| d.weight()).sum();
    let headroom = if rack.max_weight_kg > 0.0 {
        (1.0 - total_weight / rack.max_weight_kg).clamp(0.0, 1.0)
    } else if total_weight > 0.0 {
        0.0
    } else {
        1.0
    };

    (0.7 * balance + 0.3 * headroom).clamp(0.0, 1.0)
}
