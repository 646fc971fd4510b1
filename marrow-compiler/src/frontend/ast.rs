//! The expression tree produced by the parser.

use super::token::{Token, TokenKind};

/// A node of the expression tree.
///
/// Nodes are immutable after construction and own their children outright.
/// Parse errors are part of the tree as [`Expr::Invalid`] nodes; the parser
/// is total and always yields a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'src> {
    /// An integer or float literal.
    LiteralScalar {
        /// The literal token.
        token: Token<'src>,
        /// [`TokenKind::Integer`] or [`TokenKind::Float`].
        kind: TokenKind,
    },
    /// A parenthesized expression.
    Grouping(Box<Expr<'src>>),
    /// An `in e; e; ... end` sequence.
    Block(Vec<Expr<'src>>),
    /// A `mod e` module wrapper.
    Module(Box<Expr<'src>>),
    /// A prefix operator applied to an operand.
    Unary {
        /// [`TokenKind::Plus`] or [`TokenKind::Minus`].
        operator: TokenKind,
        /// The affected expression.
        operand: Box<Expr<'src>>,
    },
    /// An infix operator applied to two operands.
    Binary {
        /// One of the five binary operator kinds.
        operator: TokenKind,
        /// Left-hand side.
        left: Box<Expr<'src>>,
        /// Right-hand side.
        right: Box<Expr<'src>>,
    },
    /// A parse error recorded in-tree.
    Invalid {
        /// Human-readable description of the error.
        message: String,
        /// The token whose span locates the error.
        token: Token<'src>,
        /// Children collected before the error was detected.
        subexprs: Vec<Expr<'src>>,
    },
}
