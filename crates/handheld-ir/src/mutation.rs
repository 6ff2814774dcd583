//! Single-instruction mutations used to repair corrupted boot code.
//!
//! Exactly one `nop` or `jmp` is assumed to be corrupted. The candidates for a
//! program are every program obtained by swapping one `nop` for a `jmp` (or the
//! reverse), keeping the operand. Candidates are yielded in ascending line
//! order, and repair search relies on that order to pick a winner.

use crate::instruction::Instruction;
use crate::program::Program;
use std::iter::FusedIterator;

/// A program that differs from its source in exactly one instruction's opcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Line that was flipped
    pub index: usize,
    /// Instruction at `index` in the source program
    pub original: Instruction,
    /// Instruction at `index` in `program`
    pub replacement: Instruction,
    pub program: Program,
}

/// Lazy iterator over the flip candidates of a program.
///
/// Programs are only built when requested, so a search that stops early never
/// pays for the remaining candidates.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    source: &'a Program,
    next: usize,
    remaining: usize,
}

impl<'a> Candidates<'a> {
    fn new(source: &'a Program) -> Self {
        let remaining = source.iter().filter(|inst| inst.flipped().is_some()).count();
        Self {
            source,
            next: 0,
            remaining,
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        while let Some(&original) = self.source.get(self.next) {
            let index = self.next;
            self.next += 1;

            if original.flipped().is_none() {
                continue;
            }
            self.remaining -= 1;
            return candidate_at(self.source, index);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Candidates<'_> {}

impl FusedIterator for Candidates<'_> {}

/// Build the candidate that flips line `index`, or `None` if that line is
/// out of range or an `acc`
pub fn candidate_at(program: &Program, index: usize) -> Option<Candidate> {
    let original = *program.get(index)?;
    let replacement = original.flipped()?;
    Some(Candidate {
        index,
        original,
        replacement,
        program: program.with_replaced(index, replacement)?,
    })
}

/// Line indices that produce a candidate, ascending
pub fn flippable_lines(program: &Program) -> Vec<usize> {
    program
        .iter()
        .enumerate()
        .filter(|(_, inst)| inst.flipped().is_some())
        .map(|(index, _)| index)
        .collect()
}

/// Enumerate the flip candidates of `program` in ascending line order
pub fn enumerate(program: &Program) -> Candidates<'_> {
    Candidates::new(program)
}
