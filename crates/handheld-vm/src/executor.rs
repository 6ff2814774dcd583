//! Boot code executor with loop detection.

use handheld_core::{Error, ExecutionConfig, Result};
use handheld_ir::{Instruction, Program};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// How a run came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The program counter reached the line just past the last instruction
    Halted,
    /// The program counter came back to a line that had already run
    Looped { pc: usize },
}

/// Outcome of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Accumulator when the run stopped. For a loop, this is the value just
    /// before the repeated instruction would execute again.
    pub accumulator: i64,
    pub termination: Termination,
    /// Instructions executed
    pub steps: usize,
}

impl ExecutionResult {
    pub fn terminated(&self) -> bool {
        self.termination == Termination::Halted
    }
}

/// Transient state of one run
struct ExecutionState {
    pc: i64,
    accumulator: i64,
    visited: Vec<bool>,
    steps: usize,
}

impl ExecutionState {
    fn new(len: usize) -> Self {
        Self {
            pc: 0,
            accumulator: 0,
            visited: vec![false; len],
            steps: 0,
        }
    }

    fn finish(self, termination: Termination) -> ExecutionResult {
        ExecutionResult {
            accumulator: self.accumulator,
            termination,
            steps: self.steps,
        }
    }
}

/// Runs programs under a fixed [`ExecutionConfig`]
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Run `program` from line 0 until it halts or revisits a line.
    ///
    /// Every line runs at most once, so a run takes at most `len + 1` checks.
    pub fn run(&self, program: &Program) -> Result<ExecutionResult> {
        let len = program.len();
        let mut state = ExecutionState::new(len);

        loop {
            if state.pc == len as i64 {
                return Ok(state.finish(Termination::Halted));
            }
            if state.pc < 0 || state.pc > len as i64 {
                return Err(Error::ProgramCounterOutOfBounds { pc: state.pc, len });
            }

            let pc = state.pc as usize;
            if state.visited[pc] {
                return Ok(state.finish(Termination::Looped { pc }));
            }
            if let Some(limit) = self.config.max_steps {
                if state.steps >= limit {
                    return Err(Error::StepLimitExceeded { limit });
                }
            }
            state.visited[pc] = true;
            state.steps += 1;

            let inst = program[pc];
            trace!(pc, %inst, accumulator = state.accumulator, "step");
            match inst {
                Instruction::NoOp(_) => state.pc += 1,
                Instruction::Accumulate(v) => {
                    state.accumulator += i64::from(v);
                    state.pc += 1;
                }
                Instruction::Jump(v) => state.pc += i64::from(v),
            }
        }
    }
}

/// Run `program` with the default configuration
#[instrument(skip(program), fields(len = program.len()))]
pub fn run(program: &Program) -> Result<ExecutionResult> {
    Executor::default().run(program)
}

/// Accumulator value at the moment the unmodified program first repeats a line.
///
/// Fails with `Validation` if the program halts instead of looping.
pub fn loop_accumulator(program: &Program) -> Result<i64> {
    let result = run(program)?;
    match result.termination {
        Termination::Looped { .. } => Ok(result.accumulator),
        Termination::Halted => Err(Error::Validation(
            "program halts without repeating an instruction".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Program {
        "nop +0\nacc +1\njmp +4\nacc +3\njmp -3\nacc -99\nacc +1\njmp -4\nacc +6\n"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_empty_program_halts() {
        let result = run(&Program::empty()).unwrap();
        assert!(result.terminated());
        assert_eq!(result.accumulator, 0);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_sample_loops_at_line_one() {
        let result = run(&sample()).unwrap();
        assert_eq!(result.termination, Termination::Looped { pc: 1 });
        assert_eq!(result.accumulator, 5);
        assert_eq!(result.steps, 7);
        assert_eq!(loop_accumulator(&sample()).unwrap(), 5);
    }

    #[test]
    fn test_straight_line_halts() {
        let program = Program::new(vec![
            Instruction::Accumulate(2),
            Instruction::NoOp(5),
            Instruction::Accumulate(-7),
        ]);
        let result = run(&program).unwrap();
        assert!(result.terminated());
        assert_eq!(result.accumulator, -5);
        assert_eq!(result.steps, 3);
        assert!(matches!(loop_accumulator(&program), Err(Error::Validation(_))));
    }

    #[test]
    fn test_self_jump_loops_immediately() {
        let program = Program::new(vec![Instruction::Accumulate(1), Instruction::Jump(0)]);
        let result = run(&program).unwrap();
        assert_eq!(result.termination, Termination::Looped { pc: 1 });
        assert_eq!(result.accumulator, 1);
    }

    #[test]
    fn test_jump_past_end_is_out_of_bounds() {
        let program = Program::new(vec![Instruction::Jump(2)]);
        assert!(matches!(
            run(&program),
            Err(Error::ProgramCounterOutOfBounds { pc: 2, len: 1 })
        ));
    }

    #[test]
    fn test_jump_before_start_is_out_of_bounds() {
        let program = Program::new(vec![Instruction::NoOp(0), Instruction::Jump(-5)]);
        assert!(matches!(
            run(&program),
            Err(Error::ProgramCounterOutOfBounds { pc: -4, len: 2 })
        ));
    }

    #[test]
    fn test_jump_exactly_to_end_halts() {
        let program = Program::new(vec![Instruction::Jump(2), Instruction::Accumulate(9)]);
        let result = run(&program).unwrap();
        assert!(result.terminated());
        assert_eq!(result.accumulator, 0);
    }

    #[test]
    fn test_step_limit() {
        let executor = Executor::new(ExecutionConfig { max_steps: Some(3) });
        assert!(matches!(
            executor.run(&sample()),
            Err(Error::StepLimitExceeded { limit: 3 })
        ));

        let executor = Executor::new(ExecutionConfig { max_steps: Some(7) });
        assert!(executor.run(&sample()).is_ok());
    }

    fn arb_program() -> impl Strategy<Value = Program> {
        prop::collection::vec((0..3u8, -10i32..10), 0..30).prop_map(|insts| {
            insts
                .into_iter()
                .map(|(op, v)| match op {
                    0 => Instruction::NoOp(v),
                    1 => Instruction::Accumulate(v),
                    _ => Instruction::Jump(v),
                })
                .collect()
        })
    }

    /// Programs whose jumps all land in `[0, len]`
    fn arb_valid_program() -> impl Strategy<Value = Program> {
        prop::collection::vec((0..3u8, -10i32..10, 0.0f64..=1.0), 0..30).prop_map(|insts| {
            let len = insts.len() as f64;
            insts
                .iter()
                .enumerate()
                .map(|(i, &(op, v, target))| match op {
                    0 => Instruction::NoOp(v),
                    1 => Instruction::Accumulate(v),
                    _ => Instruction::Jump((target * len).round() as i32 - i as i32),
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn runs_are_bounded_and_deterministic(program in arb_program()) {
            let first = run(&program);
            let second = run(&program);

            match (first, second) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a, b);
                    prop_assert!(a.steps <= program.len());
                }
                (Err(Error::ProgramCounterOutOfBounds { pc: a, .. }),
                 Err(Error::ProgramCounterOutOfBounds { pc: b, .. })) => {
                    prop_assert_eq!(a, b);
                }
                (a, b) => prop_assert!(false, "unexpected results {:?} / {:?}", a, b),
            }
        }

        #[test]
        fn validated_programs_never_fault(program in arb_valid_program()) {
            prop_assert!(handheld_ir::validate_program(&program).is_ok());
            prop_assert!(run(&program).is_ok());
        }
    }
}
