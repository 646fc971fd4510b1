//! SSA instructions.

use marrow_types::MemoryAddress;

use super::rvalue::RValue;

/// One SSA instruction: a fresh destination address and its r-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrInstruction<'src> {
    /// The abstract address this instruction defines.
    pub destination: MemoryAddress,
    /// The computed value.
    pub rvalue: RValue<'src>,
}

impl IrInstruction<'_> {
    /// Whether this instruction reads the given address.
    pub fn is_dependent_on(&self, location: MemoryAddress) -> bool {
        match self.rvalue {
            RValue::Atomic(_) => false,
            RValue::Binary { left, right, .. } => location == left || location == right,
            RValue::Unary { right, .. } => location == right,
        }
    }
}
