//! Marrow virtual machine.
//!
//! Executes the macro-ops produced by `marrow-compiler` against a 16
//! register file and a 64 KiB byte-addressed heap, with an ALU that keeps
//! status flags and a per-operation register access log.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod access;
pub mod alu;
pub mod consts;
pub mod environment;
pub mod machine;

// Fully re-export the marrow dependencies.
#[doc(no_inline)]
pub use marrow_asm;
#[doc(no_inline)]
pub use marrow_compiler;
#[doc(no_inline)]
pub use marrow_types;

/// Commonly imported items.
pub mod prelude {
    #[doc(no_inline)]
    pub use marrow_asm::{op, BinaryArithFunc, Immediate, MacroOp, UnaryArithFunc};
    #[doc(no_inline)]
    pub use marrow_compiler::{Bytecode, Compiler, SourceFile};
    #[doc(no_inline)]
    pub use marrow_types::{
        bytes,
        diagnostic::{Diagnostic, DiagnosticSink, LogKind},
        ImmediateType, MemoryAddress, RawValue, RegisterId, Word, REG_ZERO, WORD_SIZE,
    };

    pub use crate::{
        access::RegisterAccess,
        alu::{Alu, AluOp, UnitFlags},
        consts::*,
        environment::Environment,
        machine::Machine,
    };
}
