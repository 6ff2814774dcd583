//! Repair search: find the single flipped instruction that lets a program halt.

use crate::executor::{ExecutionResult, Executor};
use handheld_core::{Error, FaultPolicy, Result, SearchConfig, SearchStrategy};
use handheld_ir::{candidate_at, enumerate, flippable_lines, Candidate, Instruction, Program};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tracing::{debug, info, instrument};

/// A flip that makes the program halt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repair {
    /// Line that was flipped
    pub index: usize,
    pub original: Instruction,
    pub replacement: Instruction,
    /// Run of the repaired program
    pub result: ExecutionResult,
}

/// Drives the executor over every flip candidate of a program.
///
/// The winner is always the halting candidate with the lowest line index,
/// whatever the strategy.
#[derive(Debug, Clone, Default)]
pub struct RepairSearch {
    config: SearchConfig,
    executor: Executor,
}

impl RepairSearch {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let executor = Executor::new(config.execution.clone());
        Ok(Self { config, executor })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[instrument(skip_all, fields(len = program.len(), strategy = ?self.config.strategy))]
    pub fn find_repair(&self, program: &Program) -> Result<Repair> {
        let repair = match self.config.strategy {
            SearchStrategy::Sequential => self.search_sequential(program),
            SearchStrategy::Parallel { workers } => self.search_parallel(program, workers),
        }?;
        info!(
            index = repair.index,
            from = %repair.original,
            to = %repair.replacement,
            accumulator = repair.result.accumulator,
            "repair found"
        );
        Ok(repair)
    }

    fn search_sequential(&self, program: &Program) -> Result<Repair> {
        let candidates = enumerate(program);
        let total = candidates.len();
        for candidate in candidates {
            if let Some(outcome) = self.evaluate(&candidate) {
                return outcome;
            }
        }
        Err(Error::NoRepairFound { candidates: total })
    }

    /// Workers claim candidates in line order from a shared cursor. A decisive
    /// outcome lowers `bound`, and no worker claims a candidate at or past it,
    /// so every candidate ahead of the final winner has been evaluated.
    fn search_parallel(&self, program: &Program, workers: usize) -> Result<Repair> {
        let lines = flippable_lines(program);
        let total = lines.len();

        let cursor = AtomicUsize::new(0);
        let bound = AtomicUsize::new(total);
        let winner: Mutex<Option<(usize, Result<Repair>)>> = Mutex::new(None);

        thread::scope(|scope| {
            for worker in 0..workers.min(total) {
                let (lines, cursor, bound, winner) = (&lines, &cursor, &bound, &winner);
                scope.spawn(move || loop {
                    let ordinal = cursor.fetch_add(1, Ordering::SeqCst);
                    if ordinal >= bound.load(Ordering::SeqCst) {
                        debug!(worker, "no candidates left");
                        break;
                    }
                    let Some(candidate) = candidate_at(program, lines[ordinal]) else {
                        break;
                    };
                    let Some(outcome) = self.evaluate(&candidate) else {
                        continue;
                    };

                    let mut slot = winner.lock();
                    if slot.as_ref().map_or(true, |(best, _)| ordinal < *best) {
                        *slot = Some((ordinal, outcome));
                        bound.fetch_min(ordinal, Ordering::SeqCst);
                    }
                });
            }
        });

        match winner.into_inner() {
            Some((_, outcome)) => outcome,
            None => Err(Error::NoRepairFound { candidates: total }),
        }
    }

    /// Run one candidate. `None` means the search should move on.
    fn evaluate(&self, candidate: &Candidate) -> Option<Result<Repair>> {
        match self.executor.run(&candidate.program) {
            Ok(result) if result.terminated() => Some(Ok(Repair {
                index: candidate.index,
                original: candidate.original,
                replacement: candidate.replacement,
                result,
            })),
            Ok(result) => {
                debug!(index = candidate.index, termination = ?result.termination, "candidate loops");
                None
            }
            Err(err) if err.is_execution_fault() && self.config.on_fault == FaultPolicy::Reject => {
                debug!(index = candidate.index, error = %err, "candidate rejected");
                None
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Find the first halting flip of `program` with the default configuration
pub fn find_repair(program: &Program) -> Result<Repair> {
    RepairSearch::default().find_repair(program)
}

/// Accumulator value after the repaired program halts
pub fn repaired_accumulator(program: &Program) -> Result<i64> {
    Ok(find_repair(program)?.result.accumulator)
}
