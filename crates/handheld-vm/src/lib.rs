//! Execution engine for handheld boot code.
//!
//! This crate provides:
//! - A deterministic executor that stops at the first repeated line
//! - A repair search over single `nop`/`jmp` flips, sequential or threaded

pub mod executor;
pub mod repair;

pub use executor::{loop_accumulator, run, ExecutionResult, Executor, Termination};
pub use repair::{find_repair, repaired_accumulator, Repair, RepairSearch};
