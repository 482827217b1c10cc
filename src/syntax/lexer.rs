//! Lexical analysis for schema sources.
//!
//! Tokenization is done by a logos-generated automaton over a borrowed
//! `Lexeme`, which [`lex`] then turns into owned [`Token`]s with 1-based
//! line numbers. Comments and whitespace are skipped. The first lexical
//! error aborts the file.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::LineIndex;
use crate::error::LexErrorKind;

use super::token::{Keyword, Token, TokenKind};

/// Raw lexeme as matched by logos.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme<'src> {
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,

    #[token("namespace", |_| Keyword::Namespace)]
    #[token("packet", |_| Keyword::Packet)]
    #[token("enum", |_| Keyword::Enum)]
    #[token("record", |_| Keyword::Record)]
    #[token("VarInt", |_| Keyword::VarInt)]
    #[token("VarLong", |_| Keyword::VarLong)]
    #[token("int", |_| Keyword::Int)]
    #[token("bool", |_| Keyword::Bool)]
    #[token("String", |_| Keyword::String)]
    #[token("char", |_| Keyword::Char)]
    #[token("double", |_| Keyword::Double)]
    #[token("float", |_| Keyword::Float)]
    #[token("short", |_| Keyword::Short)]
    #[token("List", |_| Keyword::List)]
    Keyword(Keyword),

    #[regex(r"[A-Za-z][A-Za-z0-9]*", |lex| lex.slice())]
    Name(&'src str),

    #[regex(r#""[^"]*""#, string_literal)]
    #[regex(r#""[^"]*"#, unterminated_string)]
    Str(&'src str),

    #[regex(r"-?[0-9]+", decimal)]
    #[regex(r"-?0x[0-9A-Fa-f]*", hexadecimal)]
    Int(i64),

    #[regex(r"-?[0-9]+\.[0-9]*", floating)]
    Float(f64),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Assign,
}

fn string_literal<'src>(
    lex: &mut logos::Lexer<'src, Lexeme<'src>>,
) -> Result<&'src str, LexErrorKind> {
    let slice = lex.slice();
    Ok(&slice[1..slice.len() - 1])
}

fn unterminated_string<'src>(
    _lex: &mut logos::Lexer<'src, Lexeme<'src>>,
) -> Result<&'src str, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

fn decimal<'src>(lex: &mut logos::Lexer<'src, Lexeme<'src>>) -> Result<i64, LexErrorKind> {
    lex.slice()
        .parse()
        .map_err(|_| LexErrorKind::MalformedNumber)
}

fn hexadecimal<'src>(lex: &mut logos::Lexer<'src, Lexeme<'src>>) -> Result<i64, LexErrorKind> {
    let slice = lex.slice();
    let (negative, rest) = match slice.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, slice),
    };
    let digits = &rest[2..];
    let value = i64::from_str_radix(digits, 16).map_err(|_| LexErrorKind::MalformedNumber)?;
    Ok(if negative { -value } else { value })
}

fn floating<'src>(lex: &mut logos::Lexer<'src, Lexeme<'src>>) -> Result<f64, LexErrorKind> {
    lex.slice()
        .parse()
        .map_err(|_| LexErrorKind::MalformedNumber)
}

impl Lexeme<'_> {
    fn into_kind(self) -> Option<TokenKind> {
        Some(match self {
            Lexeme::Comment => return None,
            Lexeme::Keyword(k) => TokenKind::Keyword(k),
            Lexeme::Name(n) => TokenKind::Name(SmolStr::new(n)),
            Lexeme::Str(s) => TokenKind::Str(SmolStr::new(s)),
            Lexeme::Int(v) => TokenKind::Int(v),
            Lexeme::Float(v) => TokenKind::Float(v),
            Lexeme::LBrace => TokenKind::LBrace,
            Lexeme::RBrace => TokenKind::RBrace,
            Lexeme::LBracket => TokenKind::LBracket,
            Lexeme::RBracket => TokenKind::RBracket,
            Lexeme::Colon => TokenKind::Colon,
            Lexeme::Semicolon => TokenKind::Semicolon,
            Lexeme::Comma => TokenKind::Comma,
            Lexeme::Dot => TokenKind::Dot,
            Lexeme::Assign => TokenKind::Assign,
        })
    }
}

/// A lexical error with the 1-based line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: u32,
    pub kind: LexErrorKind,
}

/// Tokenize one source file.
///
/// The returned sequence always ends with exactly one [`TokenKind::Eof`].
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let index = LineIndex::new(source);
    let mut lexer = Lexeme::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let line = index.line_of(lexer.span().start);
        match result {
            Ok(lexeme) => {
                if let Some(kind) = lexeme.into_kind() {
                    tokens.push(Token::new(kind, line));
                }
            }
            Err(LexErrorKind::UnknownCharacter) => {
                let kind = match lexer.slice().chars().next() {
                    Some(c) => LexErrorKind::UnexpectedChar(c),
                    None => LexErrorKind::UnknownCharacter,
                };
                return Err(LexError { line, kind });
            }
            Err(kind) => return Err(LexError { line, kind }),
        }
    }

    tokens.push(Token::new(TokenKind::Eof, index.line_of(source.len())));
    Ok(tokens)
}
