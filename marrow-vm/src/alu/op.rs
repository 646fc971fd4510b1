//! Operations submitted to the ALU.

use marrow_asm::{BinaryArithFunc, UnaryArithFunc};
use marrow_types::{RawValue, WORD_SIZE};

/// The implicit zero operand of synthesized unary operations; register 0
/// reads as this value by convention.
const ZERO: RawValue = [0; WORD_SIZE];

/// One arithmetic operation over raw 8-byte operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    /// `left + right`
    Add {
        /// Left operand bytes.
        left: RawValue,
        /// Right operand bytes.
        right: RawValue,
    },
    /// `left - right`
    Sub {
        /// Left operand bytes.
        left: RawValue,
        /// Right operand bytes.
        right: RawValue,
    },
    /// `left * right`
    Mul {
        /// Left operand bytes.
        left: RawValue,
        /// Right operand bytes.
        right: RawValue,
    },
    /// `left / right`, floor division
    Div {
        /// Left operand bytes.
        left: RawValue,
        /// Right operand bytes.
        right: RawValue,
    },
    /// `left % right`
    Mod {
        /// Left operand bytes.
        left: RawValue,
        /// Right operand bytes.
        right: RawValue,
    },
}

impl AluOp {
    /// The operation selected by a binary arithmetic macro-op.
    pub const fn from_binary(func: BinaryArithFunc, left: RawValue, right: RawValue) -> Self {
        match func {
            BinaryArithFunc::Add => Self::Add { left, right },
            BinaryArithFunc::Sub => Self::Sub { left, right },
            BinaryArithFunc::Mul => Self::Mul { left, right },
            BinaryArithFunc::Div => Self::Div { left, right },
            BinaryArithFunc::Mod => Self::Mod { left, right },
        }
    }

    /// The operation selected by a unary arithmetic macro-op.
    ///
    /// `POS` is addition and `NEG` subtraction, each with a zero left
    /// operand.
    pub const fn from_unary(func: UnaryArithFunc, right: RawValue) -> Self {
        match func {
            UnaryArithFunc::Pos => Self::Add { left: ZERO, right },
            UnaryArithFunc::Neg => Self::Sub { left: ZERO, right },
        }
    }
}
