//! Compile pipeline of the Marrow language.
//!
//! Source text is tokenized lazily, parsed by a Pratt parser into a tree
//! whose errors are explicit `Invalid` nodes, checked for sanity, lowered
//! to single-static-assignment instructions and finally to the macro-ops
//! executed by `marrow-vm`. The [`Compiler`] drives the stages in order.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod backend;
pub mod bytecode;
pub mod compiler;
pub mod frontend;
pub mod ir;
pub mod source;

pub use bytecode::Bytecode;
pub use compiler::Compiler;
pub use source::SourceFile;

#[doc(no_inline)]
pub use marrow_asm;
#[doc(no_inline)]
pub use marrow_types;

/// Commonly imported items.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        backend::MacroOpGenerator,
        bytecode::Bytecode,
        compiler::Compiler,
        frontend::{
            ast::Expr,
            parser::Parser,
            sanity::SanityChecker,
            token::{Span, Token, TokenKind},
            tokenizer::Tokenizer,
        },
        ir::{IrGenerator, IrInstruction, RValue},
        source::SourceFile,
    };
    #[doc(no_inline)]
    pub use marrow_asm::prelude::*;
    #[doc(no_inline)]
    pub use marrow_types::diagnostic::{Diagnostic, DiagnosticSink, LogKind};
}
