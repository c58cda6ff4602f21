//! Textual instruction decoder
//!
//! Lines are split on whitespace. The first token selects the opcode
//! (case-sensitive); the rest are operands, resolved against the register
//! file and the program's label table.

use crate::error::DecodeError;
use crate::instruction::{AluOp, Condition, Instruction, Operand};
use crate::opcode::Opcode;
use crate::register::Register;
use crate::token::{classify, OperandToken};
use std::collections::HashMap;

/// Decode one instruction line
pub fn decode(line: &str, labels: &HashMap<String, usize>) -> Result<Instruction, DecodeError> {
    let mut tokens = line.split_whitespace();
    let mnemonic = tokens
        .next()
        .ok_or_else(|| DecodeError::malformed("", "empty instruction"))?;
    let operands: Vec<&str> = tokens.collect();

    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| DecodeError::UnknownOpcode(mnemonic.to_string()))?;

    if operands.len() != opcode.arity() {
        return Err(DecodeError::malformed(
            mnemonic,
            format!(
                "expected {} operand(s), found {}",
                opcode.arity(),
                operands.len()
            ),
        ));
    }

    let instr = match opcode {
        Opcode::Add => alu(AluOp::Add, &operands)?,
        Opcode::Sub => alu(AluOp::Sub, &operands)?,
        Opcode::Mul => alu(AluOp::Mul, &operands)?,
        Opcode::Div => alu(AluOp::Div, &operands)?,

        Opcode::Load => Instruction::Load {
            src: parse_source(mnemonic, operands[0])?,
            dst: parse_register(operands[1])?,
        },

        Opcode::Jmp => jump(Condition::Always, operands[0], labels)?,
        Opcode::Jz => jump(Condition::Zero, operands[0], labels)?,
        Opcode::Jnz => jump(Condition::NotZero, operands[0], labels)?,
        Opcode::Jc => jump(Condition::Carry, operands[0], labels)?,
        Opcode::Jnc => jump(Condition::NotCarry, operands[0], labels)?,

        Opcode::Print => Instruction::Print {
            reg: parse_register(operands[0])?,
        },
    };

    Ok(instr)
}

/// Parse a register name
pub fn parse_register(name: &str) -> Result<Register, DecodeError> {
    Register::from_name(name).ok_or_else(|| DecodeError::UnknownRegister(name.to_string()))
}

/// Resolve a jump target: a declared label wins, otherwise a non-negative
/// instruction index.
pub fn resolve_target(token: &str, labels: &HashMap<String, usize>) -> Result<usize, DecodeError> {
    if let Some(&index) = labels.get(token) {
        return Ok(index);
    }

    match classify(token) {
        Some(OperandToken::Integer(value)) => {
            usize::try_from(value).map_err(|_| DecodeError::InvalidJumpTarget(token.to_string()))
        }
        _ => Err(DecodeError::InvalidJumpTarget(token.to_string())),
    }
}

fn alu(op: AluOp, operands: &[&str]) -> Result<Instruction, DecodeError> {
    Ok(Instruction::Alu {
        op,
        lhs: parse_register(operands[0])?,
        rhs: parse_register(operands[1])?,
    })
}

fn jump(
    cond: Condition,
    token: &str,
    labels: &HashMap<String, usize>,
) -> Result<Instruction, DecodeError> {
    Ok(Instruction::Jump {
        cond,
        target: resolve_target(token, labels)?,
    })
}

fn parse_source(mnemonic: &str, token: &str) -> Result<Operand, DecodeError> {
    if let Some(reg) = Register::from_name(token) {
        return Ok(Operand::Register(reg));
    }

    match classify(token) {
        Some(OperandToken::Integer(value)) => Ok(Operand::Literal(value)),
        Some(OperandToken::Symbol(name)) => Err(DecodeError::UnknownRegister(name)),
        None => Err(DecodeError::malformed(
            mnemonic,
            format!("invalid source operand `{}`", token),
        )),
    }
}
