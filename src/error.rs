//! Compile errors.
//!
//! Every stage fails fast: the first violation becomes a [`CompileError`]
//! carrying the file name, the 1-based line and a typed cause, and the run
//! stops without handing out a partial registry.

use std::sync::Arc;

use thiserror::Error;

/// Result alias used throughout the compiler.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Stable diagnostic codes, one per error cause.
pub mod codes {
    /// Character not part of the language.
    pub const UNKNOWN_CHARACTER: &str = "E0101";
    /// String literal without closing quote.
    pub const UNTERMINATED_STRING: &str = "E0102";
    /// Number literal that does not parse.
    pub const MALFORMED_NUMBER: &str = "E0103";

    /// File without a `namespace "..."` header.
    pub const MISSING_NAMESPACE: &str = "E0201";
    /// Reference to a namespace no file declares.
    pub const UNDEFINED_IMPORT: &str = "E0202";
    /// Namespaces referencing each other in a loop.
    pub const IMPORT_CYCLE: &str = "E0203";

    /// Token not allowed at this grammar position.
    pub const UNEXPECTED_TOKEN: &str = "E0301";
    /// `{` or `[` never closed.
    pub const UNCLOSED_BLOCK: &str = "E0302";
    /// `List[...]` nested past the supported depth.
    pub const LIST_TOO_DEEP: &str = "E0303";

    /// Two declarations with one name in a namespace.
    pub const DUPLICATE_DECLARATION: &str = "E0401";
    /// Two fields with one name in a record or packet.
    pub const DUPLICATE_FIELD: &str = "E0402";
    /// Two values with one name in an enum.
    pub const DUPLICATE_ENUM_VALUE: &str = "E0403";
    /// Packet without a literal-valued `packetID` field.
    pub const MISSING_PACKET_ID: &str = "E0404";
    /// Literal default on a type that cannot carry one.
    pub const INVALID_DEFAULT: &str = "E0405";
    /// Metatags left unattached at end of file.
    pub const DANGLING_METATAG: &str = "E0406";
}

/// Lexical error causes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("unknown character")]
    UnknownCharacter,
    #[error("unknown character '{0}'")]
    UnexpectedChar(char),
    #[error("unclosed string")]
    UnterminatedString,
    #[error("malformed number literal")]
    MalformedNumber,
}

/// Dependency resolution error causes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportErrorKind {
    #[error("no namespace defined in file")]
    MissingNamespace,
    #[error("undefined import use: no file declares namespace '{namespace}'")]
    UndefinedImport { namespace: String },
    #[error("namespace import cycle: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },
}

/// Grammar error causes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unclosed block: '{delimiter}' is never closed")]
    UnclosedBlock { delimiter: char },
    #[error("list type nested deeper than {limit} levels")]
    ListTooDeep { limit: usize },
}

/// Well-formedness error causes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    #[error("you can't use the same name '{name}' for 2 types in namespace '{namespace}'")]
    DuplicateDeclaration { namespace: String, name: String },
    #[error("field '{field}' is defined twice in {owner}")]
    DuplicateField { owner: String, field: String },
    #[error("value '{value}' is defined twice in enum {owner}")]
    DuplicateEnumValue { owner: String, value: String },
    #[error("packet {packet} must have a packetID field with a value")]
    MissingPacketId { packet: String },
    #[error("type {ty} cannot carry a literal default value")]
    InvalidDefault { ty: String },
    #[error("unknown metatag: [{}] is not attached to any record or packet", .names.join("], ["))]
    DanglingMetatag { names: Vec<String> },
}

/// A fatal compile error with its location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("lexical error in {file} at line {line}: {kind}")]
    Lexical {
        file: Arc<str>,
        line: u32,
        kind: LexErrorKind,
    },

    #[error("import error in {file} at line {line}: {kind}")]
    Import {
        file: Arc<str>,
        line: u32,
        kind: ImportErrorKind,
    },

    #[error("syntax error in {file} at line {line}: {kind}")]
    Syntax {
        file: Arc<str>,
        line: u32,
        kind: SyntaxErrorKind,
    },

    #[error("semantic error in {file} at line {line}: {kind}")]
    Semantic {
        file: Arc<str>,
        line: u32,
        kind: SemanticErrorKind,
    },
}

impl CompileError {
    /// Name of the file the error was found in.
    pub fn file(&self) -> &str {
        match self {
            CompileError::Lexical { file, .. }
            | CompileError::Import { file, .. }
            | CompileError::Syntax { file, .. }
            | CompileError::Semantic { file, .. } => file,
        }
    }

    /// 1-based line of the error.
    pub fn line(&self) -> u32 {
        match self {
            CompileError::Lexical { line, .. }
            | CompileError::Import { line, .. }
            | CompileError::Syntax { line, .. }
            | CompileError::Semantic { line, .. } => *line,
        }
    }

    /// Stable diagnostic code, see [`codes`].
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Lexical { kind, .. } => match kind {
                LexErrorKind::UnknownCharacter | LexErrorKind::UnexpectedChar(_) => {
                    codes::UNKNOWN_CHARACTER
                }
                LexErrorKind::UnterminatedString => codes::UNTERMINATED_STRING,
                LexErrorKind::MalformedNumber => codes::MALFORMED_NUMBER,
            },
            CompileError::Import { kind, .. } => match kind {
                ImportErrorKind::MissingNamespace => codes::MISSING_NAMESPACE,
                ImportErrorKind::UndefinedImport { .. } => codes::UNDEFINED_IMPORT,
                ImportErrorKind::Cycle { .. } => codes::IMPORT_CYCLE,
            },
            CompileError::Syntax { kind, .. } => match kind {
                SyntaxErrorKind::UnexpectedToken { .. } => codes::UNEXPECTED_TOKEN,
                SyntaxErrorKind::UnclosedBlock { .. } => codes::UNCLOSED_BLOCK,
                SyntaxErrorKind::ListTooDeep { .. } => codes::LIST_TOO_DEEP,
            },
            CompileError::Semantic { kind, .. } => match kind {
                SemanticErrorKind::DuplicateDeclaration { .. } => codes::DUPLICATE_DECLARATION,
                SemanticErrorKind::DuplicateField { .. } => codes::DUPLICATE_FIELD,
                SemanticErrorKind::DuplicateEnumValue { .. } => codes::DUPLICATE_ENUM_VALUE,
                SemanticErrorKind::MissingPacketId { .. } => codes::MISSING_PACKET_ID,
                SemanticErrorKind::InvalidDefault { .. } => codes::INVALID_DEFAULT,
                SemanticErrorKind::DanglingMetatag { .. } => codes::DANGLING_METATAG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_file_and_line() {
        let err = CompileError::Semantic {
            file: Arc::from("net.pidl"),
            line: 7,
            kind: SemanticErrorKind::MissingPacketId {
                packet: "Handshake".into(),
            },
        };

        assert_eq!(
            err.to_string(),
            "semantic error in net.pidl at line 7: packet Handshake must have a packetID field with a value"
        );
        assert_eq!(err.file(), "net.pidl");
        assert_eq!(err.line(), 7);
        assert_eq!(err.code(), codes::MISSING_PACKET_ID);
    }

    #[test]
    fn test_cycle_message_joins_namespaces() {
        let kind = ImportErrorKind::Cycle {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };

        assert_eq!(kind.to_string(), "namespace import cycle: a -> b -> a");
    }

    #[test]
    fn test_lexical_codes() {
        let err = CompileError::Lexical {
            file: Arc::from("x"),
            line: 1,
            kind: LexErrorKind::UnexpectedChar('$'),
        };

        assert_eq!(err.code(), codes::UNKNOWN_CHARACTER);
        assert!(err.to_string().ends_with("unknown character '$'"));
    }
}
