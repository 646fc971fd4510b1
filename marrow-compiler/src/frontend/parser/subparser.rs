//! Specialized parsers keyed by token kind.

use marrow_types::diagnostic::Diagnostic;

use super::precedence;
use super::Parser;
use crate::frontend::ast::Expr;
use crate::frontend::token::{Token, TokenKind};

/// Parser for an expression that starts at an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AtomSubparser {
    /// Integer and float literals.
    LiteralScalar,
    /// `( expr )`
    Grouping,
    /// `in expr; ... end`
    Block,
    /// `mod expr`
    Module,
}

impl AtomSubparser {
    /// The subparser registered for a token kind, if any.
    pub(crate) fn for_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Integer | TokenKind::Float => Some(Self::LiteralScalar),
            TokenKind::LeftParen => Some(Self::Grouping),
            TokenKind::In => Some(Self::Block),
            TokenKind::Mod => Some(Self::Module),
            _ => None,
        }
    }

    pub(crate) fn parse<'src, I: Iterator<Item = Token<'src>>>(
        self,
        parser: &mut Parser<'src, I>,
        token: Token<'src>,
    ) -> Expr<'src> {
        match self {
            Self::LiteralScalar => parse_literal_scalar(parser, token),
            Self::Grouping => parse_grouping(parser, token),
            Self::Block => parse_block(parser, token),
            Self::Module => Expr::Module(Box::new(parser.parse_expr(0))),
        }
    }
}

fn parse_literal_scalar<'src, I: Iterator<Item = Token<'src>>>(
    parser: &mut Parser<'src, I>,
    token: Token<'src>,
) -> Expr<'src> {
    if token.kind == TokenKind::Float {
        parser.record(
            Diagnostic::warning(format!(
                "float literal '{}' is not supported at runtime; arithmetic stays integer",
                token.lexeme
            ))
            .with_source(token.source.name()),
        );
    }

    Expr::LiteralScalar {
        token,
        kind: token.kind,
    }
}

fn parse_grouping<'src, I: Iterator<Item = Token<'src>>>(
    parser: &mut Parser<'src, I>,
    open_paren: Token<'src>,
) -> Expr<'src> {
    let inner = parser.parse_expr(0);

    if parser.consume_expected(TokenKind::RightParen).is_err() {
        return Expr::Invalid {
            message: "missing expected ')'".into(),
            token: open_paren,
            subexprs: vec![inner],
        };
    }

    Expr::Grouping(Box::new(inner))
}

fn parse_block<'src, I: Iterator<Item = Token<'src>>>(
    parser: &mut Parser<'src, I>,
    in_token: Token<'src>,
) -> Expr<'src> {
    let mut expr_list = Vec::new();

    while !matches!(parser.peek(0).kind, TokenKind::End | TokenKind::Eof) {
        expr_list.push(parser.parse_expr(0));

        if parser.peek(0).kind != TokenKind::End
            && parser.consume_expected(TokenKind::Semicolon).is_err()
        {
            let current = parser.peek(0);
            expr_list.push(Expr::Invalid {
                message: format!("expected ';' after {}", current.kind),
                token: current,
                subexprs: Vec::new(),
            });
        }
    }

    if parser.consume_expected(TokenKind::End).is_err() {
        return Expr::Invalid {
            message: "missing expected 'end'".into(),
            token: in_token,
            subexprs: expr_list,
        };
    }

    Expr::Block(expr_list)
}

/// Parser for a prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrefixSubparser {
    /// `+` and `-` in operand position.
    Unary,
}

impl PrefixSubparser {
    /// The subparser registered for a token kind, if any.
    pub(crate) fn for_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus | TokenKind::Minus => Some(Self::Unary),
            _ => None,
        }
    }

    pub(crate) fn parse<'src, I: Iterator<Item = Token<'src>>>(
        self,
        parser: &mut Parser<'src, I>,
        token: Token<'src>,
    ) -> Expr<'src> {
        match self {
            Self::Unary => Expr::Unary {
                operator: token.kind,
                operand: Box::new(parser.parse_expr(0)),
            },
        }
    }
}

/// Parser for a nonprefix (infix) operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NonprefixSubparser {
    /// Binding power of the operator.
    pub(crate) precedence: u8,
    /// Right-associative operators recurse one level looser.
    pub(crate) right_associative: bool,
}

impl NonprefixSubparser {
    /// The subparser registered for a token kind, if any.
    pub(crate) fn for_kind(kind: TokenKind) -> Option<Self> {
        let precedence = match kind {
            TokenKind::Plus => precedence::ADDITION,
            TokenKind::Minus => precedence::SUBTRACTION,
            TokenKind::Star => precedence::MULTIPLICATION,
            TokenKind::Slash => precedence::DIVISION,
            TokenKind::Percent => precedence::REMAINDER,
            _ => return None,
        };

        Some(Self {
            precedence,
            right_associative: false,
        })
    }

    pub(crate) fn parse<'src, I: Iterator<Item = Token<'src>>>(
        self,
        parser: &mut Parser<'src, I>,
        left: Expr<'src>,
        token: Token<'src>,
    ) -> Expr<'src> {
        let right = parser.parse_expr(self.precedence - u8::from(self.right_associative));

        Expr::Binary {
            operator: token.kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
