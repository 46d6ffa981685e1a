//! `rack optimize` — run the placement coordinator against a plan file.

use std::path::Path;

use anyhow::{bail, Context};
use tracing::info;

use rack_core::RackPlan;
use rackgrid_placement::optimize;
use rackgrid_thermal::zone::zone_of;

pub fn run(plan_path: &str, format: &str) -> anyhow::Result<()> {
    let plan = RackPlan::from_file(Path::new(plan_path))
        .with_context(|| format!("loading plan from {plan_path}"))?;

    info!(
        rack = %plan.rack.name,
        devices = plan.devices.len(),
        connections = plan.connections.len(),
        "loaded plan"
    );

    let current = (!plan.current_layout.is_empty()).then_some(plan.current_layout.as_slice());
    let outcome = optimize(
        &plan.rack,
        &plan.devices,
        &plan.connections,
        &plan.weights,
        &plan.locked,
        current,
    )
    .context("optimization failed")?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        "text" => print_text(&plan, &outcome),
        other => bail!("unknown output format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_text(plan: &RackPlan, outcome: &rackgrid_placement::OptimizationOutcome) {
    println!("\nPlacement for rack {}:", plan.rack.name);

    let mut positions = outcome.solution.positions.clone();
    positions.sort_by_key(|p| p.start_u);
    for pos in &positions {
        let device = plan
            .devices
            .iter()
            .find(|d| d.device_id == pos.device_id);
        match device {
            Some(d) => println!(
                "  U{:>2}-U{:<2}  {}  ({} zone)",
                pos.start_u,
                pos.end_u(d),
                pos.device_id,
                zone_of(pos.midpoint_u(d), plan.rack.total_height_u).label(),
            ),
            None => println!("  U{:>2}      {}", pos.start_u, pos.device_id),
        }
    }

    if outcome.metadata.devices_placed < outcome.metadata.devices_total {
        println!(
            "\n{} of {} devices placed — the rest did not fit",
            outcome.metadata.devices_placed, outcome.metadata.devices_total
        );
    }

    println!();
    for line in &outcome.improvements {
        println!("  • {line}");
    }

    let b = &outcome.metadata.breakdown;
    println!(
        "\nScores: thermal {:.2}  power {:.2}  cable {:.2}  access {:.2}  weight {:.2}  → total {:.2}",
        b.thermal, b.power, b.cable, b.access, b.weight, b.total
    );
}
