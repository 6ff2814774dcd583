use anyhow::Result;
use clap::Parser;
use handheld_cli::{solve, telemetry, Cli};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry();

    let config = cli.search_config();
    debug!(?config, "search configuration");

    let answers = solve(&cli.input, config)?;
    println!("Solution to part 1: {}", answers.loop_accumulator);
    println!("Solution to part 2: {}", answers.repaired_accumulator);
    Ok(())
}
