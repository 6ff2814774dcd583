//! Validation for boot code programs.

use crate::instruction::Instruction;
use crate::program::Program;
use handheld_core::{Error, Result};

/// Validate that every `jmp` lands inside the program or exactly on its end.
///
/// Programs that fail this check still run; the executor reports the bad jump
/// as `ProgramCounterOutOfBounds` if it is ever taken.
pub fn validate_program(program: &Program) -> Result<()> {
    for (index, inst) in program.iter().enumerate() {
        if let Instruction::Jump(offset) = *inst {
            validate_target(program, index, offset)?;
        }
    }
    Ok(())
}

fn validate_target(program: &Program, index: usize, offset: i32) -> Result<()> {
    let target = index as i64 + i64::from(offset);
    if target < 0 || target > program.len() as i64 {
        return Err(Error::Validation(format!(
            "line {} jumps to {}, outside [0, {}]",
            index,
            target,
            program.len()
        )));
    }
    Ok(())
}
