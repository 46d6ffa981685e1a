use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "rack",
    about = "Rackgrid — rack device placement optimizer",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an optimized device placement for a rack plan.
    ///
    /// Runs every placement strategy against the plan, validates each
    /// candidate against the rack's hard constraints, and prints the
    /// best-scoring valid layout. If the plan carries a [[current_layout]],
    /// it is scored as the comparison baseline.
    Optimize {
        /// Path to the rack plan TOML file
        #[arg(short, long)]
        plan: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Analyze the thermal profile of the plan's current layout
    Thermal {
        /// Path to the rack plan TOML file
        #[arg(short, long)]
        plan: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rack=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize { plan, format } => commands::optimize::run(&plan, &format),
        Commands::Thermal { plan, format } => commands::thermal::run(&plan, &format),
    }
}
