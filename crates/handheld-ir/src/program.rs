//! Program structure for boot code.

use crate::instruction::{Instruction, Opcode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// An immutable, ordered list of instructions.
///
/// Cloning is cheap: the instructions live behind an `Arc`, and the only way to
/// obtain a different program is to build a new one (see [`Program::with_replaced`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Arc<[Instruction]>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Count instructions with the given opcode
    pub fn count(&self, opcode: Opcode) -> usize {
        self.iter().filter(|inst| inst.opcode() == opcode).count()
    }

    /// Build a new program identical to this one except at `index`.
    ///
    /// Returns `None` if `index` is not a line of this program.
    pub fn with_replaced(&self, index: usize, instruction: Instruction) -> Option<Self> {
        if index >= self.len() {
            return None;
        }
        let mut instructions = self.instructions.to_vec();
        instructions[index] = instruction;
        Some(Self::new(instructions))
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Instruction {
        &self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in self {
            writeln!(f, "{inst}")?;
        }
        Ok(())
    }
}
