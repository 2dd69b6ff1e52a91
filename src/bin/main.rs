use anyhow::Result;
use clap::Parser;
use shapediff::config::Config;
use shapediff::scenario::{Scenario, ScenarioRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "shapediff",
    version,
    about = "Compare JSON response shapes of two compatible info APIs"
)]
struct Cli {
    /// Scenarios to run, in order.
    #[arg(value_enum, required = true)]
    scenarios: Vec<Scenario>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let runner = ScenarioRunner::new(Config::from_env())?;
    info!(window = %runner.config().describe_window(), "comparing backends");

    let results = runner.run_all(&cli.scenarios).await?;
    if results.len() > 1 {
        runner.print_summary(&results);
    }

    Ok(())
}
