use handheld_core::{Error, FaultPolicy, SearchConfig};
use handheld_ir::{enumerate, parse_program, Instruction, Program};
use handheld_vm::{loop_accumulator, repaired_accumulator, run, RepairSearch, Termination};

const SAMPLE: &str = "\
nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

fn sample() -> Program {
    parse_program(SAMPLE).unwrap()
}

#[test]
fn loop_point_accumulator() {
    let program = sample();
    let result = run(&program).unwrap();

    assert!(!result.terminated());
    assert_eq!(result.termination, Termination::Looped { pc: 1 });
    assert_eq!(loop_accumulator(&program).unwrap(), 5);
}

#[test]
fn repaired_program_halts_with_expected_accumulator() {
    let program = sample();
    assert_eq!(repaired_accumulator(&program).unwrap(), 8);

    // The winner is the first halting candidate in generation order.
    let first_halting = enumerate(&program)
        .find(|c| run(&c.program).map(|r| r.terminated()).unwrap_or(false))
        .unwrap();
    assert_eq!(first_halting.index, 7);
    assert_eq!(first_halting.program[7], Instruction::NoOp(-4));
}

#[test]
fn repair_leaves_source_program_unchanged() {
    let program = sample();
    let before = program.clone();
    RepairSearch::new(SearchConfig::parallel(3))
        .unwrap()
        .find_repair(&program)
        .unwrap();
    assert_eq!(program, before);
    assert_eq!(run(&program).unwrap().accumulator, 5);
}

#[test]
fn unknown_opcode_is_rejected_before_execution() {
    let err = parse_program("nop +0\nhcf +1\n").unwrap_err();
    assert!(matches!(err, Error::InvalidInstruction(op) if op == "hcf"));
}

#[test]
fn search_config_from_json() {
    let config =
        SearchConfig::from_json(r#"{"strategy":{"parallel":{"workers":2}},"on_fault":"reject"}"#)
            .unwrap();
    assert_eq!(config.on_fault, FaultPolicy::Reject);

    let repair = RepairSearch::new(config).unwrap().find_repair(&sample()).unwrap();
    assert_eq!(repair.result.accumulator, 8);
}
