//! # SCPU Opcode Definitions
//!
//! Opcodes are matched textually against the first token of an instruction
//! line. Matching is case-sensitive: `ADD` is an opcode, `add` is not.
//!
//! ## Families
//! - Arithmetic: ADD, SUB, MUL, DIV (two source registers, result in RES)
//! - Data: LOAD (register or literal into register)
//! - Jump: JMP, JZ, JNZ, JC, JNC (label or literal instruction index)
//! - I/O: PRINT (report a register value)

use serde::{Deserialize, Serialize};

/// Instruction opcode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Arithmetic ==========
    /// ADD: RES = r1 + r2
    Add,
    /// SUB: RES = r1 - r2
    Sub,
    /// MUL: RES = r1 * r2
    Mul,
    /// DIV: RES = r1 / r2
    Div,

    // ========== Data ==========
    /// LOAD: dst = src
    Load,

    // ========== Jump ==========
    /// JMP: PC = target
    Jmp,
    /// JZ: if zero, PC = target
    Jz,
    /// JNZ: if !zero, PC = target
    Jnz,
    /// JC: if carry, PC = target
    Jc,
    /// JNC: if !carry, PC = target
    Jnc,

    // ========== I/O ==========
    /// PRINT: report register value
    Print,
}

impl Opcode {
    /// Every opcode in dispatch-table order
    pub const ALL: [Opcode; 11] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Load,
        Opcode::Jmp,
        Opcode::Jz,
        Opcode::Jnz,
        Opcode::Jc,
        Opcode::Jnc,
        Opcode::Print,
    ];

    /// Resolve a mnemonic. Exact, case-sensitive match.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == mnemonic)
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Load => "LOAD",
            Opcode::Jmp => "JMP",
            Opcode::Jz => "JZ",
            Opcode::Jnz => "JNZ",
            Opcode::Jc => "JC",
            Opcode::Jnc => "JNC",
            Opcode::Print => "PRINT",
        }
    }

    /// Number of operand tokens the opcode expects
    pub const fn arity(self) -> usize {
        match self {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Load => 2,
            Opcode::Jmp
            | Opcode::Jz
            | Opcode::Jnz
            | Opcode::Jc
            | Opcode::Jnc
            | Opcode::Print => 1,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
