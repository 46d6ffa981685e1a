//! `rack thermal` — standalone thermal analysis of the current layout.

use std::path::Path;

use anyhow::{bail, Context};

use rack_core::RackPlan;
use rackgrid_thermal::{analyze, format_report};

pub fn run(plan_path: &str, format: &str) -> anyhow::Result<()> {
    let plan = RackPlan::from_file(Path::new(plan_path))
        .with_context(|| format!("loading plan from {plan_path}"))?;

    if plan.current_layout.is_empty() {
        bail!("plan has no [[current_layout]] positions to analyze");
    }

    let analysis = analyze(&plan.rack, &plan.devices, &plan.current_layout);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&analysis)?),
        "text" => print!("{}", format_report(&analysis)),
        other => bail!("unknown output format: {other} (expected text or json)"),
    }

    Ok(())
}
