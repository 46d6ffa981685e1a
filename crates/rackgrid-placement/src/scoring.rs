//! Composite scoring for candidate placements.

use rack_core::types::{
    Connection, DeviceAttributes, ObjectiveWeights, PlacementPosition, Rack, ScoreBreakdown,
};

use crate::objectives;

/// Score a placement on every objective and compose the weighted total.
///
/// The total combines cable, weight, thermal, and access; the power score
/// rides along in the breakdown for diagnostics only. Weights arrive
/// pre-validated (sum 1.0) from the plan config layer.
pub fn score_placement(
    rack: &Rack,
    devices: &[DeviceAttributes],
    connections: &[Connection],
    positions: &[PlacementPosition],
    weights: &ObjectiveWeights,
) -> ScoreBreakdown {
    let thermal = objectives::thermal_score(rack, devices, positions);
    let power = objectives::power_score(rack, devices, positions);
    let cable = objectives::cable_score(rack, devices, connections, positions);
    let access = objectives::access_score(rack, devices, positions);
    let weight = objectives::weight_score(rack, devices, positions);

    let total = (cable * weights.cable
        + weight * weights.weight
        + thermal * weights.thermal
        + access * weights.access)
        .clamp(0.0, 1.0);

    ScoreBreakdown {
        thermal,
        power,
        cable,
        access,
        weight,
        total,
    }
}
