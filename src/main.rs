use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gridnav::adapters::inbound::FileEventStore;
use gridnav::adapters::outbound::{init_domain_logger, FilesystemMapSource};
use gridnav::application::NavigationService;
use gridnav::domains::grid_navigation::StepMode;
use gridnav::Config;

/// Multi-agent grid navigation over Tiled-style JSON maps
#[derive(Parser)]
#[command(name = "gridnav")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input map, resolved under the data directory unless absolute
    #[arg(default_value = "single_unit_single_goal_test.json")]
    input: String,

    /// Output map with marked paths
    #[arg(default_value = "output_map.json")]
    output: String,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "GRIDNAV_CONFIG_PATH", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding map files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Upper bound on simulation ticks
    #[arg(long)]
    max_steps: Option<u64>,

    /// Resolve moves against the tick-start snapshot instead of live positions
    #[arg(long)]
    simultaneous: bool,

    /// Do not paint agent paths onto the exported map
    #[arg(long)]
    no_mark: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(max_steps) = cli.max_steps {
        config.simulation.max_steps = max_steps;
    }
    if cli.simultaneous {
        config.simulation.step_mode = StepMode::Simultaneous;
    }
    if cli.no_mark {
        config.simulation.mark_paths = false;
    }

    // Initialize tracing without claiming the `log` facade; fast_log owns it
    // when a log file is configured.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting gridnav");
    let logger = init_domain_logger(&config.logging);

    let map_source = Arc::new(FilesystemMapSource::new(
        cli.data_dir.or_else(|| config.data.map_dir.clone()),
    ));
    info!("Map directory: {}", map_source.base().display());

    let mut service = NavigationService::new(
        map_source,
        logger,
        config.simulation.clone(),
        config.markers.clone(),
    );
    if let Some(dir) = &config.data.journal_dir {
        service = service.with_event_store(Arc::new(FileEventStore::new(dir.clone())));
    }

    let summary = service.run(&cli.input, Some(&cli.output)).await?;

    for agent in &summary.agents {
        println!("{}", agent);
    }
    if summary.outcome.all_arrived {
        info!(
            ticks = summary.outcome.ticks,
            "All agents that found paths have arrived"
        );
    } else {
        warn!(ticks = summary.outcome.ticks, "Simulation stopped before all agents arrived");
    }
    if summary.events_persisted > 0 {
        info!(
            coordinator_id = %summary.coordinator_id,
            events = summary.events_persisted,
            "Event journal written"
        );
    }

    Ok(())
}
