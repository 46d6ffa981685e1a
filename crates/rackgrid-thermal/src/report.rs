//! Human-readable report formatting.

use crate::analyzer::{Severity, ThermalAnalysis};

pub fn format_report(analysis: &ThermalAnalysis) -> String {
    let mut out = String::new();

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Rackgrid Thermal Analysis               ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Rack:   {:<32}║\n", analysis.rack_name));
    out.push_str(&format!(
        "║  Status: {:<32}║\n",
        analysis.cooling.status.label()
    ));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str(&format!(
        "Total heat: {:.0} BTU/hr ({:.0} W)\n",
        analysis.heat.total_heat_btu, analysis.heat.total_power_watts
    ));
    match analysis.cooling.capacity_btu {
        Some(cap) => out.push_str(&format!(
            "Cooling:    {:.1}% of {:.0} BTU/hr ({:.1} tons), {:.0} BTU/hr remaining\n\n",
            analysis.cooling.utilization_percent,
            cap,
            analysis.cooling.capacity_tons.unwrap_or_default(),
            analysis.cooling.remaining_btu.unwrap_or_default(),
        )),
        None => out.push_str("Cooling:    no rated capacity (unlimited)\n\n"),
    }

    out.push_str("Heat by zone:\n");
    for zone in analysis.heat.zones.iter().rev() {
        out.push_str(&format!(
            "  {:<7} {:>8.0} BTU/hr  {:>6.0} W  {} device(s)\n",
            zone.zone.label(),
            zone.heat_btu,
            zone.power_watts,
            zone.device_count,
        ));
    }
    out.push('\n');

    if !analysis.hot_spots.is_empty() {
        out.push_str("🔥 HOT SPOTS:\n\n");
        for (i, spot) in analysis.hot_spots.iter().enumerate() {
            let marker = match spot.severity {
                Severity::High => "high",
                Severity::Medium => "medium",
            };
            out.push_str(&format!(
                "  {}. {} — {:.0} BTU/hr at unit {} ({} zone, {})\n",
                i + 1,
                spot.device_id,
                spot.heat_btu,
                spot.start_u,
                spot.zone.label(),
                marker,
            ));
        }
        out.push('\n');
    }

    if !analysis.airflow_conflicts.is_empty() {
        out.push_str("⚠️  AIRFLOW CONFLICTS:\n\n");
        for conflict in &analysis.airflow_conflicts {
            out.push_str(&format!("  • {}\n", conflict.description));
        }
        out.push('\n');
    }

    out.push_str("Recommendations:\n");
    for rec in &analysis.recommendations {
        out.push_str(&format!("  • {rec}\n"));
    }

    out
}
