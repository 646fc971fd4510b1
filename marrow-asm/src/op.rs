//! The macro-op enum and shorthand constructors.

use marrow_types::{ImmediateType, MemoryAddress, RegisterId};

use crate::{BinaryArithFunc, Immediate, UnaryArithFunc};

/// One instruction of the machine's ISA.
///
/// Memory operands are abstract slot addresses: slot `a` occupies heap
/// bytes `[8a, 8a + 8)`. Register operands must be below the register
/// count; the machine asserts both bounds at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MacroOp {
    /// Copy one word from a heap slot into a register.
    Load {
        /// Target register.
        destination: RegisterId,
        /// Source heap slot.
        source: MemoryAddress,
    },
    /// Copy one word from a register into a heap slot.
    Store {
        /// Target heap slot.
        destination: MemoryAddress,
        /// Source register.
        source: RegisterId,
    },
    /// Write an encoded immediate into a heap slot.
    StoreImmediate {
        /// Target heap slot.
        destination: MemoryAddress,
        /// How the immediate bytes are encoded.
        ty: ImmediateType,
        /// The encoded value.
        immediate: Immediate,
    },
    /// Push an encoded immediate onto the stack memory.
    Push {
        /// How the immediate bytes are encoded.
        ty: ImmediateType,
        /// The encoded value.
        source: Immediate,
    },
    /// Pop a value from the stack memory into a register.
    Pop {
        /// How the popped bytes are encoded.
        ty: ImmediateType,
        /// Target register.
        destination: RegisterId,
    },
    /// Apply a binary arithmetic function to two registers.
    BinaryArith {
        /// Function selector.
        func: BinaryArithFunc,
        /// Operand type; arithmetic is integer-only today.
        ty: ImmediateType,
        /// Target register.
        destination: RegisterId,
        /// Left operand register.
        left: RegisterId,
        /// Right operand register.
        right: RegisterId,
    },
    /// Apply a unary arithmetic function to a register.
    UnaryArith {
        /// Function selector.
        func: UnaryArithFunc,
        /// Operand type; arithmetic is integer-only today.
        ty: ImmediateType,
        /// Target register.
        destination: RegisterId,
        /// Operand register.
        source: RegisterId,
    },
    /// Emit a hex dump of one 256-byte heap section as a debug diagnostic.
    DumpMemory {
        /// Index of the section to dump.
        section_id: usize,
    },
}

/// Construct a `Load` macro-op.
pub const fn load(destination: RegisterId, source: MemoryAddress) -> MacroOp {
    MacroOp::Load {
        destination,
        source,
    }
}

/// Construct a `Store` macro-op.
pub const fn store(destination: MemoryAddress, source: RegisterId) -> MacroOp {
    MacroOp::Store {
        destination,
        source,
    }
}

/// Construct a `StoreImmediate` macro-op.
pub const fn store_immediate(
    destination: MemoryAddress,
    ty: ImmediateType,
    immediate: Immediate,
) -> MacroOp {
    MacroOp::StoreImmediate {
        destination,
        ty,
        immediate,
    }
}

/// Construct a `Push` macro-op.
pub const fn push(ty: ImmediateType, source: Immediate) -> MacroOp {
    MacroOp::Push { ty, source }
}

/// Construct a `Pop` macro-op.
pub const fn pop(ty: ImmediateType, destination: RegisterId) -> MacroOp {
    MacroOp::Pop { ty, destination }
}

/// Construct a `BinaryArith` macro-op.
pub const fn binary_arith(
    func: BinaryArithFunc,
    ty: ImmediateType,
    destination: RegisterId,
    left: RegisterId,
    right: RegisterId,
) -> MacroOp {
    MacroOp::BinaryArith {
        func,
        ty,
        destination,
        left,
        right,
    }
}

/// Construct a `UnaryArith` macro-op.
pub const fn unary_arith(
    func: UnaryArithFunc,
    ty: ImmediateType,
    destination: RegisterId,
    source: RegisterId,
) -> MacroOp {
    MacroOp::UnaryArith {
        func,
        ty,
        destination,
        source,
    }
}

/// Construct a `DumpMemory` macro-op.
pub const fn dump_memory(section_id: usize) -> MacroOp {
    MacroOp::DumpMemory { section_id }
}
