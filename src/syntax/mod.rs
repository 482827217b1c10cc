//! Surface syntax: tokens, lexer and parser.

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::{LexError, lex};
pub use parser::{MAX_LIST_DEPTH, parse};
pub use token::{Keyword, Token, TokenKind};
