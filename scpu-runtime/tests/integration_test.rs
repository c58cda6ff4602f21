//! Integration tests for the SCPU runtime

use proptest::prelude::*;
use scpu_assembler::assemble;
use scpu_runtime::{HaltReason, PrintRecord, RuntimeError, VMConfig, DEFAULT_MAX_STEPS, VM};
use scpu_spec::{DecodeError, Register};

fn vm_for(source: &str) -> VM {
    VM::with_program(assemble(source).unwrap(), VMConfig::default())
}

#[test]
fn test_add_and_print() {
    let mut vm = vm_for("LOAD 5 A\nLOAD 1 B\nADD A B\nPRINT RES");
    let outcome = vm.run().unwrap();

    assert_eq!(outcome.steps, 4);
    assert_eq!(outcome.halt_reason, HaltReason::Completed);
    assert_eq!(
        outcome.outputs,
        vec![PrintRecord { pc: 3, register: Register::Res, value: 6 }]
    );

    let state = vm.state();
    assert_eq!(state.read_reg(Register::A), 5);
    assert_eq!(state.read_reg(Register::B), 1);
    assert_eq!(state.read_reg(Register::Res), 6);
    assert_eq!(state.pc, 4);
    assert!(!state.flags.carry);
    assert!(!state.flags.zero);
}

#[test]
fn test_add_overflow_sets_carry_and_zero() {
    let mut vm = vm_for("LOAD 255 A\nLOAD 1 B\nADD A B");
    vm.run().unwrap();

    assert_eq!(vm.state().read_reg(Register::Res), 0);
    assert!(vm.state().flags.carry);
    assert!(vm.state().flags.zero);
}

#[test]
fn test_mul_overflow() {
    let mut vm = vm_for("LOAD 16 A\nMUL A A");
    vm.run().unwrap();

    assert_eq!(vm.state().read_reg(Register::Res), 0);
    assert!(vm.state().flags.carry);
    assert!(vm.state().flags.zero);
}

#[test]
fn test_div_keeps_carry() {
    let mut vm = vm_for("LOAD 255 A\nLOAD 1 B\nADD A B\nLOAD 7 C\nLOAD 2 D\nDIV C D");
    vm.run().unwrap();

    assert_eq!(vm.state().read_reg(Register::Res), 3);
    assert!(vm.state().flags.carry);
    assert!(!vm.state().flags.zero);
}

#[test]
fn test_infinite_loop_hits_step_limit() {
    let mut vm = vm_for("loop:\nJMP loop");
    let outcome = vm.run().unwrap();

    assert_eq!(outcome.halt_reason, HaltReason::StepLimit);
    assert_eq!(outcome.steps, DEFAULT_MAX_STEPS);
    assert_eq!(vm.state().pc, 0);
}

#[test]
fn test_division_by_zero_faults_without_side_effects() {
    let mut vm = vm_for("LOAD 3 A\nLOAD 2 B\nADD A B\nLOAD 0 C\nDIV A C\nPRINT RES");
    let err = vm.run().unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::DivisionByZero { pc: 4, lhs: Register::A, rhs: Register::C, dividend: 3, .. }
    ));
    assert_eq!(err.line(), Some("DIV A C"));
    assert_eq!(vm.state().read_reg(Register::Res), 5);
    assert!(!vm.state().flags.zero);
    assert!(!vm.state().flags.carry);
    assert_eq!(vm.state().pc, 5);
}

#[test]
fn test_countdown_loop() {
    let source = r#"
        LOAD 3 A
        LOAD 1 B
    loop:
        SUB A B
        LOAD RES A
        PRINT A
        JNZ loop
    "#;
    let mut vm = vm_for(source);
    let outcome = vm.run().unwrap();

    assert!(outcome.completed());
    assert_eq!(outcome.steps, 14);
    let values: Vec<u8> = outcome.outputs.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![2, 1, 0]);
    assert!(vm.state().flags.zero);
}

#[test]
fn test_borrow_takes_jc() {
    let source = r#"
        LOAD 1 A
        LOAD 2 B
        SUB A B
        JC borrow
        LOAD 0 D
        PRINT D
    borrow:
        PRINT RES
    "#;
    let outcome = vm_for(source).run().unwrap();

    assert_eq!(
        outcome.outputs,
        vec![PrintRecord { pc: 6, register: Register::Res, value: 255 }]
    );
}

#[test]
fn test_conditional_jumps_not_taken() {
    // 2 - 1: no borrow, non-zero result
    let source = r#"
        LOAD 2 A
        LOAD 1 B
        SUB A B
        JZ skip
        JC skip
        PRINT A
        JNC next
        PRINT B
    next:
        JNZ end
        PRINT B
    skip:
        PRINT C
    end:
    "#;
    let outcome = vm_for(source).run().unwrap();

    let regs: Vec<Register> = outcome.outputs.iter().map(|p| p.register).collect();
    assert_eq!(regs, vec![Register::A]);
}

#[test]
fn test_literal_jump_past_end_completes() {
    let outcome = vm_for("JMP 99\nPRINT A").run().unwrap();
    assert!(outcome.completed());
    assert_eq!(outcome.steps, 1);
    assert!(outcome.outputs.is_empty());
}

#[test]
fn test_load_wraps_literals() {
    let mut vm = vm_for("LOAD -1 A\nLOAD 256 B\nLOAD 300 C");
    vm.run().unwrap();

    assert_eq!(vm.state().read_reg(Register::A), 255);
    assert_eq!(vm.state().read_reg(Register::B), 0);
    assert_eq!(vm.state().read_reg(Register::C), 44);
    assert!(!vm.state().flags.carry);
    assert!(!vm.state().flags.zero);
}

#[test]
fn test_bad_line_faults_only_when_fetched() {
    let outcome = vm_for("JMP 2\nFROB\nPRINT A").run().unwrap();
    assert!(outcome.completed());
    assert_eq!(outcome.outputs.len(), 1);

    let err = vm_for("PRINT A\nFROB").run().unwrap_err();
    assert_eq!(err.pc(), 1);
    assert_eq!(err.decode_error(), Some(&DecodeError::UnknownOpcode("FROB".into())));
}

#[test]
fn test_state_persists_across_loads() {
    let mut vm = vm_for("LOAD 9 C\nLOAD 1 D\nSUB D C");
    vm.run().unwrap();
    assert!(vm.state().flags.carry);

    vm.load_program(assemble("PRINT C").unwrap());
    assert_eq!(vm.state().pc, 0);

    let outcome = vm.run().unwrap();
    assert_eq!(outcome.outputs[0].value, 9);
    assert!(vm.state().flags.carry);
}

#[test]
fn test_custom_step_limit() {
    let mut vm = VM::with_program(
        assemble("top:\nJMP top").unwrap(),
        VMConfig::default().with_max_steps(7),
    );
    let outcome = vm.run().unwrap();
    assert_eq!(outcome.steps, 7);
    assert_eq!(outcome.halt_reason, HaltReason::StepLimit);
}

#[test]
fn test_empty_program_completes() {
    let outcome = vm_for("; nothing to do").run().unwrap();
    assert!(outcome.completed());
    assert_eq!(outcome.steps, 0);
}

proptest! {
    #[test]
    fn prop_add_matches_u8_arithmetic(a in 0u8..=255, b in 0u8..=255) {
        let source = format!("LOAD {} A\nLOAD {} B\nADD A B", a, b);
        let mut vm = vm_for(&source);
        vm.run().unwrap();

        let (sum, overflow) = a.overflowing_add(b);
        prop_assert_eq!(vm.state().read_reg(Register::Res), sum);
        prop_assert_eq!(vm.state().flags.carry, overflow);
        prop_assert_eq!(vm.state().flags.zero, sum == 0);
    }

    #[test]
    fn prop_sub_borrow(a in 0u8..=255, b in 0u8..=255) {
        let source = format!("LOAD {} A\nLOAD {} B\nSUB A B", a, b);
        let mut vm = vm_for(&source);
        vm.run().unwrap();

        prop_assert_eq!(vm.state().read_reg(Register::Res), a.wrapping_sub(b));
        prop_assert_eq!(vm.state().flags.carry, a < b);
    }
}
