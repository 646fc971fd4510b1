//! Atomic types shared by the Marrow compiler and the Marrow runtime.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod bytes;
pub mod diagnostic;

/// Register contents, heap slots and encoded immediates are 64-bit words.
pub type Word = u64;

/// Index of a register in the machine's register file.
pub type RegisterId = usize;

/// Abstract memory address assigned by the IR generator.
///
/// Addresses are fresh and monotonically increasing per subexpression, and
/// map one-to-one to heap slots during macro-op generation.
pub type MemoryAddress = usize;

/// Memory size of a [`Word`].
pub const WORD_SIZE: usize = core::mem::size_of::<Word>();

/// Raw byte representation of one register or heap slot.
pub type RawValue = [u8; WORD_SIZE];

/// Number of registers in the register file.
pub const REGISTER_COUNT: usize = 16;

/// The reserved register.
///
/// Never handed out by the register allocator; its role is the implicit
/// zero left operand when unary arithmetic is synthesized in the ALU.
pub const REG_ZERO: RegisterId = 0;

/// Type tag attached to an encoded immediate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImmediateType {
    /// Unsigned 64-bit integer, big-endian on the wire.
    Integer,
    /// IEEE-754 binary64, big-endian on the wire.
    Float,
}

impl ImmediateType {
    /// Encoded size of a value of this type, in bytes.
    pub const fn size(&self) -> usize {
        match self {
            Self::Integer | Self::Float => WORD_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_immediate_type_is_word_sized() {
        for ty in ImmediateType::iter() {
            assert_eq!(ty.size(), WORD_SIZE);
        }
    }
}
