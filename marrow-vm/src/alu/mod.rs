//! The arithmetic logic unit.
//!
//! Operands and results are raw 8-byte buffers; arithmetic decodes them
//! as unsigned 64-bit bit patterns, computes on the host integer type and
//! masks back to 64 bits. The unit is stateless apart from its flag set,
//! which is reset at the start of every operation.

mod op;

pub use op::AluOp;

use bitflags::bitflags;
use marrow_types::{bytes, RawValue, WORD_SIZE};

bitflags! {
    /// Status flags left by the last ALU operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UnitFlags: u8 {
        /// The truncated result differs from the untruncated one.
        const OVERFLOW = 1 << 0;
        /// The result is negative. Arithmetic runs on unsigned bit
        /// patterns today, so nothing sets it yet.
        const NEGATIVE = 1 << 1;
        /// The divisor of a division or remainder was zero.
        const DIV_BY_ZERO = 1 << 2;
    }
}

/// Executes [`AluOp`]s, keeping flags for the caller to inspect.
#[derive(Debug, Clone)]
pub struct Alu {
    flags: UnitFlags,
}

impl Default for Alu {
    fn default() -> Self {
        Self::new()
    }
}

impl Alu {
    /// Create a unit with cleared flags.
    pub const fn new() -> Self {
        Self {
            flags: UnitFlags::empty(),
        }
    }

    /// Flags left by the last executed operation.
    pub const fn flags(&self) -> UnitFlags {
        self.flags
    }

    fn reset_flags(&mut self) {
        self.flags = UnitFlags::empty();
    }

    /// Execute one operation, returning the encoded 8-byte result.
    ///
    /// A division or remainder by zero sets [`UnitFlags::DIV_BY_ZERO`]
    /// and yields a zero buffer instead of trapping.
    pub fn execute(&mut self, op: AluOp) -> RawValue {
        self.reset_flags();

        match op {
            AluOp::Add { left, right } => self.wrapping(u64::overflowing_add, left, right),
            AluOp::Sub { left, right } => self.wrapping(u64::overflowing_sub, left, right),
            AluOp::Mul { left, right } => self.wrapping(u64::overflowing_mul, left, right),
            AluOp::Div { left, right } => self.guarded(|left, right| left / right, left, right),
            AluOp::Mod { left, right } => self.guarded(|left, right| left % right, left, right),
        }
    }

    fn wrapping(
        &mut self,
        op: fn(u64, u64) -> (u64, bool),
        left: RawValue,
        right: RawValue,
    ) -> RawValue {
        let (result, overflowed) = op(bytes::decode_integer(&left), bytes::decode_integer(&right));

        if overflowed {
            self.flags |= UnitFlags::OVERFLOW;
        }

        result.to_be_bytes()
    }

    fn guarded(&mut self, op: fn(u64, u64) -> u64, left: RawValue, right: RawValue) -> RawValue {
        let left = bytes::decode_integer(&left);
        let right = bytes::decode_integer(&right);

        if right == 0 {
            self.flags |= UnitFlags::DIV_BY_ZERO;

            return [0; WORD_SIZE];
        }

        op(left, right).to_be_bytes()
    }
}
