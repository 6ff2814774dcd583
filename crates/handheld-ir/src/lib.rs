//! Program representation for handheld boot code.
//!
//! Boot code is a flat list of three kinds of instruction:
//! - `nop`: does nothing
//! - `acc`: adds its operand to the accumulator
//! - `jmp`: moves the program counter by its operand
//!
//! Programs are immutable values; the mutation module derives new programs
//! from an existing one instead of editing it.

pub mod instruction;
pub mod mutation;
pub mod parser;
pub mod program;
pub mod validation;

pub use instruction::{Instruction, Opcode};
pub use mutation::{candidate_at, enumerate, flippable_lines, Candidate, Candidates};
pub use parser::parse_program;
pub use program::Program;
pub use validation::validate_program;
