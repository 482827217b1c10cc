//! Recursive-descent parser building the schema registry.
//!
//! One call to [`parse`] consumes the token stream of one file:
//!
//! ```text
//! file       := "namespace" STRING (metatag | record | packet | enum)* EOF
//! metatag    := "[" NAME "]"
//! record     := "record" NAME "{" field* "}"
//! packet     := "packet" NAME "{" field* "}"
//! enum       := "enum" NAME "{" (NAME ("," NAME)* ","?)? "}"
//! field      := NAME ":" type ("=" literal)? ";"
//! type       := "List" "[" type "]" | PRIMITIVE | NAME ("." NAME)*
//! ```
//!
//! Declarations are collected into a private bucket and only merged into
//! the registry once the whole file parsed, so a failing file leaves no
//! trace behind.

use std::mem;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::FileId;
use crate::error::{CompileError, Result, SemanticErrorKind, SyntaxErrorKind};
use crate::hir::{Enum, Field, Literal, Packet, Record, Registry, StructHolder, Type};

use super::token::{Keyword, Token, TokenKind};

static EOF: TokenKind = TokenKind::Eof;

/// Deepest `List[...]` nesting accepted in a field type.
pub const MAX_LIST_DEPTH: usize = 256;

/// Parse one file's tokens into `registry`.
///
/// Files must be parsed in dependency order; a namespace path that is
/// already registered gets this file's declarations added as a new bucket.
pub fn parse(
    file: FileId,
    file_name: Arc<str>,
    tokens: &[Token],
    registry: &mut Registry,
) -> Result<()> {
    Parser::new(file, file_name, tokens, registry).parse_file()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    file: FileId,
    file_name: Arc<str>,
    registry: &'a mut Registry,
    namespace: SmolStr,
    holder: StructHolder,
    metatags: Vec<SmolStr>,
}

impl<'a> Parser<'a> {
    fn new(
        file: FileId,
        file_name: Arc<str>,
        tokens: &'a [Token],
        registry: &'a mut Registry,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            file,
            file_name,
            registry,
            namespace: SmolStr::default(),
            holder: StructHolder::new(),
            metatags: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn peek(&self) -> &TokenKind {
        self.tokens.get(self.pos).map_or(&EOF, |t| &t.kind)
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    /// Line of the previously consumed token.
    fn line(&self) -> u32 {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn syntax(&self, kind: SyntaxErrorKind) -> CompileError {
        CompileError::Syntax {
            file: self.file_name.clone(),
            line: self.line(),
            kind,
        }
    }

    fn semantic(&self, kind: SemanticErrorKind) -> CompileError {
        CompileError::Semantic {
            file: self.file_name.clone(),
            line: self.line(),
            kind,
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> CompileError {
        self.syntax(SyntaxErrorKind::UnexpectedToken {
            expected: expected.into(),
            found: self.peek().describe(),
        })
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.at(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn expect_name(&mut self) -> Result<SmolStr> {
        match self.peek() {
            TokenKind::Name(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    /// Consume the closing delimiter of a block, reporting an unclosed
    /// block when the input ends first.
    fn close(&mut self, close: TokenKind, open: char) -> Result<()> {
        if self.at(&TokenKind::Eof) {
            return Err(self.syntax(SyntaxErrorKind::UnclosedBlock { delimiter: open }));
        }
        self.expect(close)
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn parse_file(mut self) -> Result<()> {
        if !self.at(&TokenKind::Keyword(Keyword::Namespace)) {
            return Err(self.unexpected("'namespace' at the top of file"));
        }
        self.advance();

        self.namespace = match self.peek() {
            TokenKind::Str(path) => path.clone(),
            _ => return Err(self.unexpected("a namespace name string")),
        };
        self.advance();

        loop {
            match self.advance() {
                TokenKind::LBracket => self.metatag()?,
                TokenKind::Keyword(Keyword::Record) => self.record(false)?,
                TokenKind::Keyword(Keyword::Packet) => self.record(true)?,
                TokenKind::Keyword(Keyword::Enum) => self.enumeration()?,
                TokenKind::Eof => break,
                _ => {
                    self.pos -= 1;
                    return Err(self.unexpected("a record, packet, enum or metatag"));
                }
            }
        }

        if !self.metatags.is_empty() {
            let names = self.metatags.iter().map(SmolStr::to_string).collect();
            return Err(self.semantic(SemanticErrorKind::DanglingMetatag { names }));
        }

        self.commit();
        Ok(())
    }

    /// Merge this file's bucket into the registry.
    fn commit(self) {
        let declarations = self.holder.len();
        let namespace = self.registry.namespace_mut(&self.namespace);
        if !self.holder.is_empty() {
            let holder = namespace.holder_mut(self.file);
            holder.enums.extend(self.holder.enums);
            holder.records.extend(self.holder.records);
            holder.packets.extend(self.holder.packets);
        }
        tracing::debug!(
            file = %self.file_name,
            namespace = %self.namespace,
            declarations,
            "parsed file"
        );
    }

    fn metatag(&mut self) -> Result<()> {
        let name = self.expect_name()?;
        self.close(TokenKind::RBracket, '[')?;
        if !self.metatags.contains(&name) {
            self.metatags.push(name);
        }
        Ok(())
    }

    /// Claim a declaration name, failing if the namespace already has it.
    fn declare(&mut self) -> Result<SmolStr> {
        let name = self.expect_name()?;
        let taken = self.holder.contains(&name)
            || self
                .registry
                .get(&self.namespace)
                .is_some_and(|ns| ns.contains(&name));
        if taken {
            return Err(self.semantic(SemanticErrorKind::DuplicateDeclaration {
                namespace: self.namespace.to_string(),
                name: name.to_string(),
            }));
        }
        Ok(name)
    }

    fn record(&mut self, is_packet: bool) -> Result<()> {
        let name = self.declare()?;
        let owner = if is_packet { "packet" } else { "record" };

        let mut record = Record::new(name);
        record.metatags = mem::take(&mut self.metatags);

        self.expect(TokenKind::LBrace)?;
        while !self.at(&TokenKind::RBrace) {
            if self.at(&TokenKind::Eof) {
                return Err(self.syntax(SyntaxErrorKind::UnclosedBlock { delimiter: '{' }));
            }
            let field = self.field()?;
            if record.field(&field.name).is_some() {
                return Err(self.semantic(SemanticErrorKind::DuplicateField {
                    owner: format!("{} {}", owner, record.name),
                    field: field.name.to_string(),
                }));
            }
            record.fields.push(field);
        }

        tracing::trace!(name = %record.name, fields = record.fields.len(), owner, "declared");

        if is_packet {
            let packet = Packet::from_record(record).map_err(|record| {
                self.semantic(SemanticErrorKind::MissingPacketId {
                    packet: record.name.to_string(),
                })
            })?;
            self.advance();
            self.holder.packets.push(packet);
        } else {
            self.advance();
            self.holder.records.push(record);
        }
        Ok(())
    }

    fn enumeration(&mut self) -> Result<()> {
        let name = self.declare()?;
        let mut value = Enum::new(name);

        self.expect(TokenKind::LBrace)?;
        while !self.at(&TokenKind::RBrace) {
            if self.at(&TokenKind::Eof) {
                return Err(self.syntax(SyntaxErrorKind::UnclosedBlock { delimiter: '{' }));
            }
            let item = self.expect_name()?;
            if value.has_value(&item) {
                return Err(self.semantic(SemanticErrorKind::DuplicateEnumValue {
                    owner: value.name.to_string(),
                    value: item.to_string(),
                }));
            }
            value.values.push(item);
            if !self.at(&TokenKind::RBrace) && !self.at(&TokenKind::Eof) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.advance();

        tracing::trace!(name = %value.name, values = value.values.len(), "declared enum");
        self.holder.enums.push(value);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Fields and types
    // ------------------------------------------------------------------

    fn field(&mut self) -> Result<Field> {
        let name = self.expect_name()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.ty()?;

        let value = if self.at(&TokenKind::Assign) {
            self.advance();
            Some(self.default_value(&ty)?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon)?;
        Ok(Field::new(name, ty, value))
    }

    fn default_value(&mut self, ty: &Type) -> Result<Literal> {
        match ty {
            Type::Primitive(p) if p.accepts_default() => {}
            other => {
                return Err(self.semantic(SemanticErrorKind::InvalidDefault {
                    ty: other.to_string(),
                }));
            }
        }
        match self.peek().literal() {
            Some(literal) => {
                self.advance();
                Ok(literal)
            }
            None => Err(self.unexpected("a string or number")),
        }
    }

    /// Parse a type. `List[` openings are counted first and the list
    /// layers are wrapped around the element type afterwards, so nesting
    /// never recurses.
    fn ty(&mut self) -> Result<Type> {
        let mut depth = 0;
        while self.at(&TokenKind::Keyword(Keyword::List)) {
            self.advance();
            self.expect(TokenKind::LBracket)?;
            depth += 1;
            if depth > MAX_LIST_DEPTH {
                return Err(self.syntax(SyntaxErrorKind::ListTooDeep {
                    limit: MAX_LIST_DEPTH,
                }));
            }
        }

        let mut ty = self.element_type()?;
        for _ in 0..depth {
            if !self.at(&TokenKind::RBracket) {
                return Err(self.syntax(SyntaxErrorKind::UnclosedBlock { delimiter: '[' }));
            }
            self.advance();
            ty = Type::list(ty);
        }
        Ok(ty)
    }

    fn element_type(&mut self) -> Result<Type> {
        match self.peek().clone() {
            TokenKind::Keyword(keyword) => match keyword.as_primitive() {
                Some(primitive) => {
                    self.advance();
                    Ok(Type::Primitive(primitive))
                }
                None => Err(self.unexpected("a record, packet, enum or primitive type")),
            },
            TokenKind::Name(first) => {
                self.advance();
                let mut path = first.to_string();
                while self.at(&TokenKind::Dot) {
                    self.advance();
                    path.push('.');
                    path.push_str(&self.expect_name()?);
                }
                Ok(Type::Reference(SmolStr::new(path)))
            }
            _ => Err(self.unexpected("a name or primitive type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;
    use crate::hir::Primitive;
    use crate::syntax::lex;

    fn parse_one(source: &str) -> Result<Registry> {
        let mut registry = Registry::new();
        let tokens = lex(source).unwrap();
        parse(FileId::new(0), Arc::from("test.pidl"), &tokens, &mut registry)?;
        Ok(registry)
    }

    #[test]
    fn test_parse_record_with_metatags() {
        let registry = parse_one(
            r#"namespace "net.types"
            [Serializable]
            [Serializable]
            [Compact]
            record Vec3 {
                x: double;
                y: double = 1.5;
                z: double;
            }"#,
        )
        .unwrap();

        let ns = registry.get("net.types").unwrap();
        let record = ns.record_named("Vec3").unwrap();
        assert_eq!(record.metatags, vec![SmolStr::new("Serializable"), SmolStr::new("Compact")]);
        assert_eq!(record.fields.len(), 3);
        assert_eq!(record.field("y").and_then(|f| f.value.clone()), Some(Literal::Float(1.5)));
    }

    #[test]
    fn test_parse_nested_list_type() {
        let registry = parse_one(
            r#"namespace "a" record R { grid: List[List[int]]; refs: List[b.c.D]; }"#,
        )
        .unwrap();

        let record = registry.get("a").unwrap().record_named("R").unwrap();
        let grid = &record.field("grid").unwrap().ty;
        assert!(grid.is_list());
        assert!(grid.sub_type().unwrap().is_list());
        assert_eq!(
            grid.sub_type().unwrap().sub_type(),
            Some(&Type::Primitive(Primitive::Int))
        );
        assert_eq!(
            record.field("refs").unwrap().ty,
            Type::list(Type::Reference("b.c.D".into()))
        );
    }

    fn nested_list_source(depth: usize) -> String {
        format!(
            r#"namespace "a" record R {{ v: {}int{}; }}"#,
            "List[".repeat(depth),
            "]".repeat(depth)
        )
    }

    #[test]
    fn test_list_nesting_up_to_limit() {
        let registry = parse_one(&nested_list_source(MAX_LIST_DEPTH)).unwrap();
        let ty = &registry.get("a").unwrap().record_named("R").unwrap().fields[0].ty;

        assert_eq!(ty.list_depth(), MAX_LIST_DEPTH);
        assert_eq!(ty.innermost(), &Type::Primitive(Primitive::Int));
    }

    #[test]
    fn test_list_nesting_past_limit_is_an_error() {
        for depth in [MAX_LIST_DEPTH + 1, 5000] {
            let err = parse_one(&nested_list_source(depth)).unwrap_err();
            assert_eq!(err.code(), codes::LIST_TOO_DEEP);
            assert!(matches!(
                err,
                CompileError::Syntax { kind: SyntaxErrorKind::ListTooDeep { limit: MAX_LIST_DEPTH }, .. }
            ));
        }
    }

    #[test]
    fn test_packet_with_id() {
        let registry = parse_one(r#"namespace "a" packet Foo { packetID: int = 5; }"#).unwrap();
        let packet = registry.get("a").unwrap().packet_named("Foo").unwrap();

        assert!(packet.has_packet_id());
        assert_eq!(packet.packet_id(), Some(&Literal::Int(5)));
    }

    #[test]
    fn test_packet_without_id_value() {
        let err = parse_one(r#"namespace "a" packet Foo { packetID: int; }"#).unwrap_err();
        assert_eq!(err.code(), codes::MISSING_PACKET_ID);
    }

    #[test]
    fn test_enum_values_and_trailing_comma() {
        let registry = parse_one(r#"namespace "a" enum Color { Red, Green, Blue, }"#).unwrap();
        let color = registry.get("a").unwrap().enum_named("Color").unwrap();
        assert_eq!(color.values, vec!["Red", "Green", "Blue"]);
    }

    #[test]
    fn test_duplicate_enum_value() {
        let err = parse_one(r#"namespace "a" enum Color { Red, Green, Red }"#).unwrap_err();
        assert_eq!(err.code(), codes::DUPLICATE_ENUM_VALUE);
    }

    #[test]
    fn test_unclosed_list_bracket() {
        let err = parse_one(r#"namespace "a" record R { v: List[List[int]; }"#).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Syntax { kind: SyntaxErrorKind::UnclosedBlock { delimiter: '[' }, .. }
        ));
    }

    #[test]
    fn test_unclosed_record_block() {
        let err = parse_one("namespace \"a\"\nrecord R {\n v: int;\n").unwrap_err();
        assert_eq!(err.code(), codes::UNCLOSED_BLOCK);
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_default_on_disallowed_type() {
        let err = parse_one(r#"namespace "a" record R { v: bool = 1; }"#).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_DEFAULT);
        let err = parse_one(r#"namespace "a" record R { v: List[int] = 1; }"#).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_DEFAULT);
        let err = parse_one(r#"namespace "a" record R { v: b.C = 1; }"#).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_DEFAULT);
    }

    #[test]
    fn test_dangling_metatag() {
        let err = parse_one(r#"namespace "a" record R { } [Orphan]"#).unwrap_err();
        assert_eq!(err.code(), codes::DANGLING_METATAG);
    }

    #[test]
    fn test_failed_file_leaves_registry_untouched() {
        let mut registry = Registry::new();
        let tokens = lex(r#"namespace "a" record R { } record R { }"#).unwrap();
        let result = parse(FileId::new(0), Arc::from("x"), &tokens, &mut registry);

        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
