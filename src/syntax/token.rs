//! Token types produced by the lexer.

use std::fmt;

use smol_str::SmolStr;

use crate::hir::{Literal, Primitive};

/// Reserved words: declaration keywords and the built-in type names.
///
/// Reserved words and user names are different token kinds, so the parser
/// can dispatch on the kind alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Namespace,
    Packet,
    Enum,
    Record,
    VarInt,
    VarLong,
    Int,
    Bool,
    String,
    Char,
    Double,
    Float,
    Short,
    List,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Namespace => "namespace",
            Keyword::Packet => "packet",
            Keyword::Enum => "enum",
            Keyword::Record => "record",
            Keyword::VarInt => "VarInt",
            Keyword::VarLong => "VarLong",
            Keyword::Int => "int",
            Keyword::Bool => "bool",
            Keyword::String => "String",
            Keyword::Char => "char",
            Keyword::Double => "double",
            Keyword::Float => "float",
            Keyword::Short => "short",
            Keyword::List => "List",
        }
    }

    /// The scalar type this keyword names, if any. `List` is a type name
    /// but not a scalar, so it maps to `None`.
    pub fn as_primitive(self) -> Option<Primitive> {
        match self {
            Keyword::VarInt => Some(Primitive::VarInt),
            Keyword::VarLong => Some(Primitive::VarLong),
            Keyword::Int => Some(Primitive::Int),
            Keyword::Bool => Some(Primitive::Bool),
            Keyword::String => Some(Primitive::String),
            Keyword::Char => Some(Primitive::Char),
            Keyword::Double => Some(Primitive::Double),
            Keyword::Float => Some(Primitive::Float),
            Keyword::Short => Some(Primitive::Short),
            Keyword::Namespace
            | Keyword::Packet
            | Keyword::Enum
            | Keyword::Record
            | Keyword::List => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a token, with its payload for names and literals.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Name(SmolStr),
    Str(SmolStr),
    Int(i64),
    Float(f64),
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `=`
    Assign,
    Eof,
}

impl TokenKind {
    /// Literal payload of a string or number token.
    pub fn literal(&self) -> Option<Literal> {
        match self {
            TokenKind::Str(s) => Some(Literal::Str(s.clone())),
            TokenKind::Int(v) => Some(Literal::Int(*v)),
            TokenKind::Float(v) => Some(Literal::Float(*v)),
            _ => None,
        }
    }

    /// Short description used in "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(k) => format!("keyword '{}'", k),
            TokenKind::Name(n) => format!("name '{}'", n),
            TokenKind::Str(s) => format!("string \"{}\"", s),
            TokenKind::Int(v) => format!("number {}", v),
            TokenKind::Float(v) => format!("number {}", v),
            TokenKind::Eof => "end of file".to_string(),
            punct => format!("'{}'", punct.punctuation().unwrap_or('?')),
        }
    }

    fn punctuation(&self) -> Option<char> {
        Some(match self {
            TokenKind::LBrace => '{',
            TokenKind::RBrace => '}',
            TokenKind::LBracket => '[',
            TokenKind::RBracket => ']',
            TokenKind::Colon => ':',
            TokenKind::Semicolon => ';',
            TokenKind::Comma => ',',
            TokenKind::Dot => '.',
            TokenKind::Assign => '=',
            _ => return None,
        })
    }
}

/// A token with the 1-based line it starts on.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
