//! Instruction set for boot code.

use handheld_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opcode tag, without its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Nop,
    Acc,
    Jmp,
}

impl Opcode {
    pub const ALL: [Opcode; 3] = [Opcode::Nop, Opcode::Acc, Opcode::Jmp];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Acc => "acc",
            Opcode::Jmp => "jmp",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Result<Self> {
        Opcode::ALL
            .into_iter()
            .find(|op| op.mnemonic() == mnemonic)
            .ok_or_else(|| Error::InvalidInstruction(mnemonic.to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single boot code instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    NoOp(i32),
    Accumulate(i32),
    Jump(i32),
}

impl Instruction {
    pub fn new(opcode: Opcode, operand: i32) -> Self {
        match opcode {
            Opcode::Nop => Instruction::NoOp(operand),
            Opcode::Acc => Instruction::Accumulate(operand),
            Opcode::Jmp => Instruction::Jump(operand),
        }
    }

    /// Build an instruction from an untyped mnemonic/operand pair
    pub fn from_parts(mnemonic: &str, operand: i32) -> Result<Self> {
        Ok(Self::new(Opcode::from_mnemonic(mnemonic)?, operand))
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::NoOp(_) => Opcode::Nop,
            Instruction::Accumulate(_) => Opcode::Acc,
            Instruction::Jump(_) => Opcode::Jmp,
        }
    }

    pub fn operand(&self) -> i32 {
        match *self {
            Instruction::NoOp(v) | Instruction::Accumulate(v) | Instruction::Jump(v) => v,
        }
    }

    /// Swap `nop` and `jmp`, keeping the operand. `acc` has no counterpart.
    pub fn flipped(&self) -> Option<Self> {
        match *self {
            Instruction::NoOp(v) => Some(Instruction::Jump(v)),
            Instruction::Jump(v) => Some(Instruction::NoOp(v)),
            Instruction::Accumulate(_) => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.opcode(), self.operand())
    }
}
