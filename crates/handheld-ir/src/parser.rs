//! Text format for boot code: one `<op> <signed operand>` per line, e.g. `jmp -4`.

use crate::instruction::Instruction;
use crate::program::Program;
use handheld_core::{Error, Result};
use std::str::FromStr;
use tracing::debug;

/// Parse a whole program, skipping blank lines.
///
/// Line numbers in errors are 1-based and count blank lines.
pub fn parse_program(source: &str) -> Result<Program> {
    let mut instructions = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let inst = parse_instruction(line).map_err(|err| match err {
            Error::Parse { message, .. } => Error::Parse {
                line: idx + 1,
                message,
            },
            other => other,
        })?;
        instructions.push(inst);
    }
    debug!(instructions = instructions.len(), "parsed program");
    Ok(Program::new(instructions))
}

fn parse_instruction(line: &str) -> Result<Instruction> {
    let mut tokens = line.split_whitespace();
    let (Some(mnemonic), Some(operand)) = (tokens.next(), tokens.next()) else {
        return Err(parse_error(format!("expected '<op> <operand>', got '{line}'")));
    };
    if let Some(extra) = tokens.next() {
        return Err(parse_error(format!("unexpected trailing token '{extra}'")));
    }
    Instruction::from_parts(mnemonic, parse_operand(operand)?)
}

fn parse_operand(token: &str) -> Result<i32> {
    if !token.starts_with(['+', '-']) {
        return Err(parse_error(format!("operand '{token}' must carry a sign")));
    }
    token
        .parse()
        .map_err(|e| parse_error(format!("bad operand '{token}': {e}")))
}

fn parse_error(message: String) -> Error {
    Error::Parse { line: 1, message }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_instruction(s.trim())
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_program(s)
    }
}
