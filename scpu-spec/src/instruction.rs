//! SCPU Instruction Set
//!
//! Decoded form of one program line. Register operands are already resolved
//! to [`Register`] and jump targets to instruction indices, so execution never
//! touches strings.

use crate::opcode::Opcode;
use crate::register::Register;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operation performed by the ALU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl AluOp {
    pub const fn opcode(self) -> Opcode {
        match self {
            AluOp::Add => Opcode::Add,
            AluOp::Sub => Opcode::Sub,
            AluOp::Mul => Opcode::Mul,
            AluOp::Div => Opcode::Div,
        }
    }
}

/// Flag condition guarding a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Always,
    Zero,
    NotZero,
    Carry,
    NotCarry,
}

impl Condition {
    /// Evaluate against the current carry and zero flags
    #[inline]
    pub const fn holds(self, carry: bool, zero: bool) -> bool {
        match self {
            Condition::Always => true,
            Condition::Zero => zero,
            Condition::NotZero => !zero,
            Condition::Carry => carry,
            Condition::NotCarry => !carry,
        }
    }

    pub const fn opcode(self) -> Opcode {
        match self {
            Condition::Always => Opcode::Jmp,
            Condition::Zero => Opcode::Jz,
            Condition::NotZero => Opcode::Jnz,
            Condition::Carry => Opcode::Jc,
            Condition::NotCarry => Opcode::Jnc,
        }
    }
}

/// Source operand of LOAD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Register(Register),
    /// Literal as written; masked to 8 bits when stored
    Literal(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// SCPU Instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// ADD/SUB/MUL/DIV: RES = lhs op rhs, flags updated
    Alu { op: AluOp, lhs: Register, rhs: Register },

    /// LOAD: dst = src (masked to 8 bits), flags untouched
    Load { src: Operand, dst: Register },

    /// JMP/JZ/JNZ/JC/JNC: PC = target when the condition holds
    Jump { cond: Condition, target: usize },

    /// PRINT: report the register's value
    Print { reg: Register },
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Alu { op, .. } => op.opcode(),
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Jump { cond, .. } => cond.opcode(),
            Instruction::Print { .. } => Opcode::Print,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Alu { op, lhs, rhs } => write!(f, "{} {} {}", op.opcode(), lhs, rhs),
            Instruction::Load { src, dst } => write!(f, "LOAD {} {}", src, dst),
            Instruction::Jump { cond, target } => write!(f, "{} {}", cond.opcode(), target),
            Instruction::Print { reg } => write!(f, "PRINT {}", reg),
        }
    }
}
