//! Lazy tokenizer over a source buffer.

use crate::source::SourceFile;

use super::token::{Span, Token, TokenKind};

/// Keyword table.
fn keyword(lexeme: &str) -> Option<TokenKind> {
    match lexeme {
        "end" => Some(TokenKind::End),
        "in" => Some(TokenKind::In),
        "mod" => Some(TokenKind::Mod),
        _ => None,
    }
}

/// The tokenizer transforms source text into tokens.
///
/// It is lazy, scanning one token per [`Iterator::next`] call, and never
/// runs dry: once the input is exhausted it yields `EOF` tokens forever.
/// Lexemes are slices of the source buffer, so `source[span] == lexeme`
/// holds for every produced token.
#[derive(Debug)]
pub struct Tokenizer<'src> {
    source: &'src SourceFile,
    /// Offset where the current token starts.
    start: usize,
    /// Offset of the next unread byte.
    current: usize,
}

impl<'src> Tokenizer<'src> {
    /// Create a tokenizer at the start of the source.
    pub fn new(source: &'src SourceFile) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.contents()[self.current..].chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let char = self.peek()?;
        self.current += char.len_utf8();

        Some(char)
    }

    /// Prepare `start` for a new token.
    fn sync_head(&mut self) {
        self.start = self.current;
    }

    fn lexeme(&self) -> &'src str {
        &self.source.contents()[self.start..self.current]
    }

    /// Scan the remainder of a number; the first digit is already consumed.
    ///
    /// Digits followed by a period continue as a float; otherwise the token
    /// is an integer. Non-decimal bases are not supported.
    fn scan_number(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(char) if char.is_ascii_digit()) {
            self.consume();
        }

        if self.peek() == Some('.') {
            self.consume();

            return self.scan_float_decimals();
        }

        TokenKind::Integer
    }

    /// Scan the decimals of a float; the period is already consumed.
    fn scan_float_decimals(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(char) if char.is_ascii_digit()) {
            self.consume();
        }

        TokenKind::Float
    }

    /// Scan the remainder of a symbol; a keyword miss is an invalid token.
    fn scan_symbol(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(char) if char.is_alphanumeric()) {
            self.consume();
        }

        keyword(self.lexeme()).unwrap_or(TokenKind::Invalid)
    }

    /// Consume characters until a token is formed.
    fn scan_token(&mut self) -> TokenKind {
        loop {
            let Some(char) = self.consume() else {
                return TokenKind::Eof;
            };

            match char {
                ' ' | '\t' | '\r' | '\n' => self.sync_head(),
                '(' => return TokenKind::LeftParen,
                ')' => return TokenKind::RightParen,
                '-' => return TokenKind::Minus,
                '%' => return TokenKind::Percent,
                '+' => return TokenKind::Plus,
                '/' => return TokenKind::Slash,
                '*' => return TokenKind::Star,
                ';' => return TokenKind::Semicolon,
                char if char.is_ascii_digit() => return self.scan_number(),
                char if char.is_alphabetic() => return self.scan_symbol(),
                _ => return TokenKind::Invalid,
            }
        }
    }

    fn build_token(&self, kind: TokenKind) -> Token<'src> {
        Token {
            kind,
            lexeme: self.lexeme(),
            span: Span::new(self.start, self.current),
            source: self.source,
        }
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    /// Never `None`; the stream ends in an infinite `EOF` tail.
    fn next(&mut self) -> Option<Token<'src>> {
        self.sync_head();

        let kind = self.scan_token();
        Some(self.build_token(kind))
    }
}
