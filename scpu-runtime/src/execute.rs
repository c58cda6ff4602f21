//! Instruction execution for SCPU

use crate::alu::{self, AluError};
use crate::error::{Result, RuntimeError};
use crate::observer::PrintRecord;
use crate::state::MachineState;
use scpu_spec::{to_word, Instruction, Operand, Register};

/// Execute a single decoded instruction.
///
/// `pc` is the index the instruction was fetched from; `state.pc` has
/// already been advanced past it. Either every effect is committed or, on
/// error, none are.
pub fn execute(
    instr: &Instruction,
    state: &mut MachineState,
    pc: usize,
    line: &str,
) -> Result<Option<PrintRecord>> {
    match *instr {
        Instruction::Alu { op, lhs, rhs } => {
            let output = alu::compute(op, state.read_reg(lhs), state.read_reg(rhs)).map_err(
                |err| match err {
                    AluError::DivisionByZero { dividend } => RuntimeError::DivisionByZero {
                        pc,
                        lhs,
                        rhs,
                        dividend,
                        line: line.to_string(),
                    },
                },
            )?;

            state.write_reg(Register::Res, output.result);
            state.flags.apply(&output);
            tracing::trace!(
                ?op,
                result = output.result,
                carry = state.flags.carry,
                zero = state.flags.zero,
                "alu"
            );
            Ok(None)
        }

        Instruction::Load { src, dst } => {
            let value = match src {
                Operand::Register(reg) => state.read_reg(reg),
                Operand::Literal(value) => to_word(value),
            };
            state.write_reg(dst, value);
            Ok(None)
        }

        Instruction::Jump { cond, target } => {
            if cond.holds(state.flags.carry, state.flags.zero) {
                state.pc = target;
            }
            Ok(None)
        }

        Instruction::Print { reg } => Ok(Some(PrintRecord {
            pc,
            register: reg,
            value: state.read_reg(reg),
        })),
    }
}
