//! Front end: tokens, tokenizer, parse tree, parser and sanity checking.

pub mod ast;
pub mod parser;
pub mod sanity;
pub mod token;
pub mod tokenizer;

pub use ast::Expr;
pub use parser::Parser;
pub use sanity::SanityChecker;
pub use token::{Span, Token, TokenKind};
pub use tokenizer::Tokenizer;
