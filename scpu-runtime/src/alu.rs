//! Arithmetic logic unit
//!
//! Pure 8-bit arithmetic. Results wrap modulo 256; `carry` records whether
//! the true result left the 8-bit range. Division never defines carry.

use crate::state::Flags;
use scpu_spec::{AluOp, Word};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AluError {
    #[error("Division by zero ({dividend} / 0)")]
    DivisionByZero { dividend: Word },
}

/// Result value and flag updates of one ALU operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluOutput {
    pub result: Word,
    /// `None` leaves the carry flag as it was
    pub carry: Option<bool>,
    pub zero: bool,
}

impl AluOutput {
    fn with_carry(result: Word, carry: bool) -> Self {
        Self {
            result,
            carry: Some(carry),
            zero: result == 0,
        }
    }
}

/// Compute `lhs op rhs`
pub fn compute(op: AluOp, lhs: Word, rhs: Word) -> Result<AluOutput, AluError> {
    let output = match op {
        AluOp::Add => {
            let (result, overflow) = lhs.overflowing_add(rhs);
            AluOutput::with_carry(result, overflow)
        }
        AluOp::Sub => {
            // Borrow: lhs < rhs
            let (result, overflow) = lhs.overflowing_sub(rhs);
            AluOutput::with_carry(result, overflow)
        }
        AluOp::Mul => {
            let (result, overflow) = lhs.overflowing_mul(rhs);
            AluOutput::with_carry(result, overflow)
        }
        AluOp::Div => {
            let result = lhs
                .checked_div(rhs)
                .ok_or(AluError::DivisionByZero { dividend: lhs })?;
            AluOutput {
                result,
                carry: None,
                zero: result == 0,
            }
        }
    };

    Ok(output)
}

impl Flags {
    /// Commit the flag half of an ALU result
    pub fn apply(&mut self, output: &AluOutput) {
        if let Some(carry) = output.carry {
            self.carry = carry;
        }
        self.zero = output.zero;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let out = compute(AluOp::Add, 5, 1).unwrap();
        assert_eq!(out, AluOutput { result: 6, carry: Some(false), zero: false });
    }

    #[test]
    fn test_add_wraps_to_zero() {
        let out = compute(AluOp::Add, 255, 1).unwrap();
        assert_eq!(out, AluOutput { result: 0, carry: Some(true), zero: true });
    }

    #[test]
    fn test_sub_borrow() {
        let out = compute(AluOp::Sub, 3, 5).unwrap();
        assert_eq!(out.result, 254);
        assert_eq!(out.carry, Some(true));
        assert!(!out.zero);

        let out = compute(AluOp::Sub, 5, 5).unwrap();
        assert_eq!(out, AluOutput { result: 0, carry: Some(false), zero: true });
    }

    #[test]
    fn test_mul_overflow() {
        let out = compute(AluOp::Mul, 16, 16).unwrap();
        assert_eq!(out, AluOutput { result: 0, carry: Some(true), zero: true });

        let out = compute(AluOp::Mul, 15, 17).unwrap();
        assert_eq!(out, AluOutput { result: 255, carry: Some(false), zero: false });
    }

    #[test]
    fn test_div() {
        let out = compute(AluOp::Div, 7, 2).unwrap();
        assert_eq!(out, AluOutput { result: 3, carry: None, zero: false });

        let out = compute(AluOp::Div, 1, 2).unwrap();
        assert_eq!(out, AluOutput { result: 0, carry: None, zero: true });
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            compute(AluOp::Div, 9, 0),
            Err(AluError::DivisionByZero { dividend: 9 })
        );
    }

    #[test]
    fn test_flags_apply_keeps_carry_for_div() {
        let mut flags = Flags { carry: true, zero: true };
        flags.apply(&compute(AluOp::Div, 8, 2).unwrap());
        assert!(flags.carry);
        assert!(!flags.zero);

        flags.apply(&compute(AluOp::Add, 1, 1).unwrap());
        assert!(!flags.carry);
    }

    #[test]
    fn test_exhaustive_add_sub_mul() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (wa, wb) = (a as i32, b as i32);

                let add = compute(AluOp::Add, a, b).unwrap();
                assert_eq!(add.result as i32, (wa + wb) % 256);
                assert_eq!(add.carry, Some(wa + wb > 255));

                let sub = compute(AluOp::Sub, a, b).unwrap();
                assert_eq!(sub.result as i32, (wa - wb).rem_euclid(256));
                assert_eq!(sub.carry, Some(a < b));

                let mul = compute(AluOp::Mul, a, b).unwrap();
                assert_eq!(mul.result as i32, (wa * wb) % 256);
                assert_eq!(mul.carry, Some(wa * wb > 255));
            }
        }
    }
}
