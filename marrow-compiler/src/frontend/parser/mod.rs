//! Pratt parser over the token stream.
//!
//! Parsing is organized in three subparser families keyed by token kind:
//! atoms (literals and scoped expressions), prefix operators and nonprefix
//! (infix) operators. [`Parser::parse_expr`] consults them in that order
//! and loops on infix operators whose precedence exceeds the caller's.

pub mod precedence;
mod subparser;

use std::collections::VecDeque;

use marrow_types::diagnostic::Diagnostic;

use self::subparser::{AtomSubparser, NonprefixSubparser, PrefixSubparser};
use super::ast::Expr;
use super::token::{Token, TokenKind};

/// Expectation miss returned by [`Parser::consume_expected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected token {expected}, got {found}")]
pub struct Expected {
    /// The kind the caller required.
    pub expected: TokenKind,
    /// The kind actually at the head of the stream.
    pub found: TokenKind,
}

/// Pratt parser producing a single expression tree.
///
/// The parser is total: every input yields a tree, with errors represented
/// inline as [`Expr::Invalid`] nodes.
#[derive(Debug)]
pub struct Parser<'src, I: Iterator<Item = Token<'src>>> {
    tokens: I,
    buffer: VecDeque<Token<'src>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src, I: Iterator<Item = Token<'src>>> Parser<'src, I> {
    /// Create a parser over a token stream.
    ///
    /// The stream must end in an infinite `EOF` tail, as produced by
    /// [`Tokenizer`](crate::frontend::tokenizer::Tokenizer).
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            buffer: VecDeque::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Look `distance` tokens ahead without consuming.
    pub fn peek(&mut self, distance: usize) -> Token<'src> {
        while self.buffer.len() <= distance {
            let token = self
                .tokens
                .next()
                .expect("token stream must end in an infinite EOF tail");
            self.buffer.push_back(token);
        }

        self.buffer[distance]
    }

    /// Consume and return the head token.
    pub fn consume(&mut self) -> Token<'src> {
        let head = self.peek(0);
        self.buffer.pop_front();

        head
    }

    /// Consume the head token only if it has the expected kind.
    ///
    /// On a miss nothing is consumed and the expectation comes back as an
    /// error.
    pub fn consume_expected(&mut self, expected: TokenKind) -> Result<Token<'src>, Expected> {
        let head = self.peek(0);

        if head.kind != expected {
            return Err(Expected {
                expected,
                found: head.kind,
            });
        }

        Ok(self.consume())
    }

    /// Precedence of the infix operator at the head of the stream, or 0.
    fn nonprefix_precedence(&mut self) -> u8 {
        NonprefixSubparser::for_kind(self.peek(0).kind)
            .map(|subparser| subparser.precedence)
            .unwrap_or(0)
    }

    /// Parse one expression.
    ///
    /// `min_precedence` bounds which infix operators may extend the
    /// expression; top-level callers pass 0.
    pub fn parse_expr(&mut self, min_precedence: u8) -> Expr<'src> {
        let token = self.consume();

        let mut left = if let Some(prefix) = PrefixSubparser::for_kind(token.kind) {
            prefix.parse(self, token)
        } else if let Some(atom) = AtomSubparser::for_kind(token.kind) {
            atom.parse(self, token)
        } else {
            Expr::Invalid {
                message: format!("unexpected token '{}'", token.lexeme),
                token,
                subexprs: Vec::new(),
            }
        };

        while min_precedence < self.nonprefix_precedence() {
            let operator = self.consume();
            let subparser = NonprefixSubparser::for_kind(operator.kind)
                .expect("a nonzero nonprefix precedence implies a registered subparser");

            left = subparser.parse(self, left, operator);
        }

        left
    }

    /// Run the parser to completion.
    pub fn run(&mut self) -> Expr<'src> {
        let expression = self.parse_expr(0);

        let leftover = self
            .buffer
            .iter()
            .filter(|token| token.kind != TokenKind::Eof)
            .count();
        if leftover > 0 {
            self.diagnostics.push(Diagnostic::warning(format!(
                "parser buffer still contains {leftover} token(s)"
            )));
        }

        expression
    }

    /// Diagnostics recorded while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::tokenizer::Tokenizer;
    use crate::source::SourceFile;
    use marrow_types::diagnostic::LogKind;

    fn parse(source: &SourceFile) -> Expr<'_> {
        Parser::new(Tokenizer::new(source)).run()
    }

    #[test]
    fn literals_parse_to_scalars() {
        let source = SourceFile::from_string("42");
        let tree = parse(&source);

        let Expr::LiteralScalar { token, kind } = tree else {
            panic!("expected a literal, got {tree:?}");
        };
        assert_eq!(kind, TokenKind::Integer);
        assert_eq!(token.lexeme, "42");
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let source = SourceFile::from_string("2 * 3 + 4");
        let tree = parse(&source);

        let Expr::Binary {
            operator: TokenKind::Plus,
            left,
            right,
        } = tree
        else {
            panic!("expected the addition at the root, got {tree:?}");
        };
        assert!(matches!(
            *left,
            Expr::Binary {
                operator: TokenKind::Star,
                ..
            }
        ));
        assert!(matches!(*right, Expr::LiteralScalar { .. }));
    }

    #[test]
    fn binary_operators_are_left_associative() {
        let source = SourceFile::from_string("1 - 2 - 3");
        let tree = parse(&source);

        let Expr::Binary {
            operator: TokenKind::Minus,
            left,
            ..
        } = tree
        else {
            panic!("expected a subtraction at the root, got {tree:?}");
        };
        assert!(matches!(
            *left,
            Expr::Binary {
                operator: TokenKind::Minus,
                ..
            }
        ));
    }

    #[test]
    fn groupings_override_precedence() {
        let source = SourceFile::from_string("2 * (3 + 4)");
        let tree = parse(&source);

        let Expr::Binary {
            operator: TokenKind::Star,
            right,
            ..
        } = tree
        else {
            panic!("expected the multiplication at the root, got {tree:?}");
        };
        assert!(matches!(*right, Expr::Grouping(_)));
    }

    #[test]
    fn dangling_operator_yields_invalid() {
        let source = SourceFile::from_string("1 +");
        let tree = parse(&source);

        let Expr::Binary { right, .. } = tree else {
            panic!("expected a binary node, got {tree:?}");
        };
        let Expr::Invalid { message, .. } = *right else {
            panic!("expected an invalid right operand");
        };
        assert!(message.contains("unexpected token"));
    }

    #[test]
    fn unmatched_paren_yields_invalid() {
        let source = SourceFile::from_string("(1 + 2");
        let tree = parse(&source);

        let Expr::Invalid {
            message, subexprs, ..
        } = tree
        else {
            panic!("expected an invalid node, got {tree:?}");
        };
        assert_eq!(message, "missing expected ')'");
        assert_eq!(subexprs.len(), 1);
    }

    #[test]
    fn block_collects_semicolon_separated_expressions() {
        let source = SourceFile::from_string("in 1; 2; 3 end");
        let tree = parse(&source);

        let Expr::Block(expr_list) = tree else {
            panic!("expected a block, got {tree:?}");
        };
        assert_eq!(expr_list.len(), 3);
    }

    #[test]
    fn block_missing_separator_recovers() {
        let source = SourceFile::from_string("in 1 2 end");
        let tree = parse(&source);

        let Expr::Block(expr_list) = tree else {
            panic!("expected a block, got {tree:?}");
        };
        assert_eq!(expr_list.len(), 3);
        let Expr::Invalid { message, .. } = &expr_list[1] else {
            panic!("expected an invalid separator node");
        };
        assert_eq!(message, "expected ';' after INTEGER");
    }

    #[test]
    fn block_missing_end_yields_invalid() {
        let source = SourceFile::from_string("in 1; 2");
        let tree = parse(&source);

        let Expr::Invalid {
            message,
            token,
            subexprs,
        } = tree
        else {
            panic!("expected an invalid node, got {tree:?}");
        };
        assert_eq!(message, "missing expected 'end'");
        assert_eq!(token.kind, TokenKind::In);
        assert_eq!(subexprs.len(), 2);
    }

    #[test]
    fn module_wraps_one_expression() {
        let source = SourceFile::from_string("mod 1 + 2");
        let tree = parse(&source);

        assert!(matches!(tree, Expr::Module(_)));
    }

    #[test]
    fn unary_operators_apply_prefix() {
        let source = SourceFile::from_string("-1");
        let tree = parse(&source);

        let Expr::Unary {
            operator: TokenKind::Minus,
            operand,
        } = tree
        else {
            panic!("expected a unary node, got {tree:?}");
        };
        assert!(matches!(*operand, Expr::LiteralScalar { .. }));
    }

    #[test]
    fn float_literals_warn() {
        let source = SourceFile::from_string("1.5");
        let mut parser = Parser::new(Tokenizer::new(&source));
        let _ = parser.run();

        let warnings: Vec<_> = parser
            .diagnostics()
            .iter()
            .filter(|diagnostic| diagnostic.kind == LogKind::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("float"));
    }

    #[test]
    fn lookahead_holds_only_eof_after_a_clean_parse() {
        let source = SourceFile::from_string("1 + 2");
        let mut parser = Parser::new(Tokenizer::new(&source));
        let _ = parser.run();

        assert!(parser
            .buffer
            .iter()
            .all(|token| token.kind == TokenKind::Eof));
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn consume_expected_does_not_consume_on_miss() {
        let source = SourceFile::from_string("1");
        let mut parser = Parser::new(Tokenizer::new(&source));

        let miss = parser.consume_expected(TokenKind::Semicolon);
        assert_eq!(
            miss,
            Err(Expected {
                expected: TokenKind::Semicolon,
                found: TokenKind::Integer,
            })
        );
        assert_eq!(parser.consume().kind, TokenKind::Integer);
    }
}
