//! Right-hand sides of SSA instructions.

use marrow_types::MemoryAddress;

use crate::frontend::token::{Token, TokenKind};

/// The computed value an SSA instruction assigns to its destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RValue<'src> {
    /// A literal token used as-is.
    Atomic(Token<'src>),
    /// A binary operation over two previously defined addresses.
    Binary {
        /// One of the five binary operator token kinds.
        operator: TokenKind,
        /// Address of the left operand.
        left: MemoryAddress,
        /// Address of the right operand.
        right: MemoryAddress,
    },
    /// A unary operation over one previously defined address.
    Unary {
        /// [`TokenKind::Plus`] or [`TokenKind::Minus`].
        operator: TokenKind,
        /// Address of the operand.
        right: MemoryAddress,
    },
}
