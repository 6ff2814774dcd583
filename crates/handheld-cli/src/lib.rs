//! Command-line driver: reads a boot code listing and reports the loop-point
//! and repaired accumulators.

pub mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use handheld_core::{FaultPolicy, SearchConfig, SearchStrategy};
use handheld_ir::{parse_program, validate_program};
use handheld_vm::{loop_accumulator, RepairSearch};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "handheld", about = "Find the boot code loop and repair it")]
pub struct Cli {
    /// File with one `<op> <signed operand>` instruction per line
    pub input: PathBuf,

    /// Evaluate repair candidates on several threads
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for the parallel search (implies --parallel)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Skip candidates that jump out of bounds instead of failing
    #[arg(long)]
    pub reject_faults: bool,
}

impl Cli {
    pub fn search_config(&self) -> SearchConfig {
        let strategy = match (self.parallel, self.workers) {
            (_, Some(workers)) => SearchStrategy::Parallel { workers },
            (true, None) => SearchStrategy::Parallel {
                workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            },
            (false, None) => SearchStrategy::Sequential,
        };
        let on_fault = if self.reject_faults {
            FaultPolicy::Reject
        } else {
            FaultPolicy::Propagate
        };
        SearchConfig {
            strategy,
            on_fault,
            ..Default::default()
        }
    }
}

/// Both answers for one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answers {
    pub loop_accumulator: i64,
    pub repaired_accumulator: i64,
}

/// Read, parse and solve the listing at `path`
pub fn solve(path: &Path, config: SearchConfig) -> Result<Answers> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let program = parse_program(&source).context("failed to parse boot code")?;
    info!(instructions = program.len(), "loaded {}", path.display());

    if let Err(e) = validate_program(&program) {
        warn!("{}", e);
    }

    let loop_acc = loop_accumulator(&program).context("failed to find the loop")?;
    let search = RepairSearch::new(config).context("invalid search configuration")?;
    let repair = search
        .find_repair(&program)
        .context("failed to repair boot code")?;

    Ok(Answers {
        loop_accumulator: loop_acc,
        repaired_accumulator: repair.result.accumulator,
    })
}
