//! Tokens and their positions in the source.

use crate::source::SourceFile;

/// Byte-offset interval `[start, end)` of a token in its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte of the lexeme.
    pub start: usize,
    /// Offset one past the last byte of the lexeme.
    pub end: usize,
}

impl Span {
    /// Create a span from its bounds.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Kind of a token.
///
/// The `Display` rendering matches the diagnostic vocabulary
/// (`LEFT_PAREN`, `INTEGER`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Keyword `end`.
    End,
    /// Keyword `in`.
    In,
    /// Keyword `mod`.
    Mod,

    /// Float literal.
    Float,
    /// Integer literal.
    Integer,

    /// `(`
    LeftParen,
    /// `)`
    RightParen,

    /// `-`
    Minus,
    /// `%`
    Percent,
    /// `+`
    Plus,
    /// `/`
    Slash,
    /// `*`
    Star,

    /// `;`
    Semicolon,

    /// A character sequence no rule accepts.
    Invalid,
    /// End of the stream; produced forever once reached.
    Eof,
}

impl TokenKind {
    /// Whether the kind is a literal.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// One token over a borrowed source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind.
    pub kind: TokenKind,
    /// Exact source slice covered by [`Token::span`].
    pub lexeme: &'src str,
    /// Byte offsets into the source.
    pub span: Span,
    /// The buffer the token was scanned from.
    pub source: &'src SourceFile,
}

impl<'src> Token<'src> {
    /// Line and column (both 1-based) of the span's start and end.
    pub fn line_span(&self) -> ((usize, usize), (usize, usize)) {
        let contents = self.source.contents();
        (
            position_of(contents, self.span.start),
            position_of(contents, self.span.end),
        )
    }

    /// The full source lines the span covers, for diagnostic context.
    pub fn lines(&self) -> Vec<&'src str> {
        let ((start_line, _), (end_line, _)) = self.line_span();

        self.source
            .contents()
            .lines()
            .skip(start_line - 1)
            .take(end_line - start_line + 1)
            .collect()
    }
}

/// (line, column) of a byte offset, both 1-based.
fn position_of(contents: &str, offset: usize) -> (usize, usize) {
    let before = &contents[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|index| index + 1).unwrap_or(0);

    (line, offset - line_start + 1)
}
