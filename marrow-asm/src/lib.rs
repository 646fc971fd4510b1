//! Macro-op instruction set of the Marrow virtual machine.
//!
//! A macro-op is one instruction of the machine's ISA, dispatched directly
//! by the machine's execution loop. The set covers heap/register transfers,
//! immediate stores, stack transfers, typed arithmetic and a debugging
//! memory dump.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(unused_must_use)]

mod funcs;
mod immediate;
pub mod op;

pub use funcs::{BinaryArithFunc, UnaryArithFunc};
pub use immediate::Immediate;
pub use op::MacroOp;

#[doc(no_inline)]
pub use marrow_types;

/// Commonly imported items.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{op, BinaryArithFunc, Immediate, MacroOp, UnaryArithFunc};
    #[doc(no_inline)]
    pub use marrow_types::{
        ImmediateType, MemoryAddress, RawValue, RegisterId, Word, REGISTER_COUNT, REG_ZERO,
        WORD_SIZE,
    };
}
