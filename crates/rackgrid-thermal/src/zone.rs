//! Thermal zone model.
//!
//! A rack's height is split into three equal vertical bands that
//! approximate intake/exhaust airflow behavior: cool air pools at the
//! bottom, exhaust collects at the top.

use serde::{Deserialize, Serialize};

/// One of the three vertical bands of a rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalZone {
    Bottom,
    Middle,
    Top,
}

impl ThermalZone {
    /// Fixed bottom-up ordering used by every per-zone aggregation.
    pub const ALL: [ThermalZone; 3] = [ThermalZone::Bottom, ThermalZone::Middle, ThermalZone::Top];

    pub fn label(&self) -> &'static str {
        match self {
            ThermalZone::Bottom => "bottom",
            ThermalZone::Middle => "middle",
            ThermalZone::Top => "top",
        }
    }

    /// Index into `ALL`-ordered arrays.
    pub fn index(&self) -> usize {
        match self {
            ThermalZone::Bottom => 0,
            ThermalZone::Middle => 1,
            ThermalZone::Top => 2,
        }
    }
}

/// Map a vertical position to its thermal zone.
///
/// The bands are `(0, h/3]`, `(h/3, 2h/3]`, `(2h/3, h]` with real-number
/// division, so heights that are not multiples of three still produce
/// three contiguous, fully covering bands.
pub fn zone_of(u_position: f64, total_height_u: u32) -> ThermalZone {
    let third = total_height_u as f64 / 3.0;
    if u_position <= third {
        ThermalZone::Bottom
    } else if u_position <= 2.0 * third {
        ThermalZone::Middle
    } else {
        ThermalZone::Top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_42u_boundaries() {
        assert_eq!(zone_of(1.0, 42), ThermalZone::Bottom);
        assert_eq!(zone_of(14.0, 42), ThermalZone::Bottom);
        assert_eq!(zone_of(15.0, 42), ThermalZone::Middle);
        assert_eq!(zone_of(21.0, 42), ThermalZone::Middle);
        assert_eq!(zone_of(28.0, 42), ThermalZone::Middle);
        assert_eq!(zone_of(29.0, 42), ThermalZone::Top);
        assert_eq!(zone_of(42.0, 42), ThermalZone::Top);
    }

    #[test]
    fn non_multiple_of_three_heights() {
        // 44U: thirds fall at 14.67 and 29.33.
        assert_eq!(zone_of(14.0, 44), ThermalZone::Bottom);
        assert_eq!(zone_of(15.0, 44), ThermalZone::Middle);
        assert_eq!(zone_of(29.0, 44), ThermalZone::Middle);
        assert_eq!(zone_of(30.0, 44), ThermalZone::Top);

        // 1U rack: everything is in the top band except nothing below it.
        assert_eq!(zone_of(1.0, 1), ThermalZone::Top);
    }

    #[test]
    fn fractional_midpoints() {
        // A 2U device starting at u=13 in a 42U rack has midpoint 14.0.
        assert_eq!(zone_of(14.0, 42), ThermalZone::Bottom);
        // Starting at u=14, midpoint 15.0 tips into the middle band.
        assert_eq!(zone_of(15.0, 42), ThermalZone::Middle);
    }

    #[test]
    fn zones_partition_every_height() {
        for total in 1..=48u32 {
            let mut last = ThermalZone::Bottom;
            for u in 1..=total {
                let zone = zone_of(u as f64, total);
                // Zones never move downward as u increases.
                assert!(zone.index() >= last.index(), "regressed at u={u} total={total}");
                last = zone;
            }
            // The top unit is always in the top band.
            assert_eq!(zone_of(total as f64, total), ThermalZone::Top);
        }
    }
}
