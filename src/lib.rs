//! # pidl-base
//!
//! Front-end compiler for the packet IDL: namespaced `record`, `packet` and
//! `enum` declarations spread over many source files, turned into a
//! resolved in-memory schema graph for a code generator.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! compiler → order files, lex them, parse them into one Registry
//!   ↓
//! project  → namespace scan + define-before-use file ordering
//! syntax   → logos lexer + recursive-descent parser
//!   ↓
//! hir      → Registry, Namespace, Record, Packet, Enum, Type
//!   ↓
//! base     → Primitives (FileId, LineIndex, SourceSet)
//! ```
//!
//! ## Usage
//!
//! ```
//! use pidl::{CompileOptions, SourceSet, compile};
//!
//! let mut sources = SourceSet::new();
//! sources.add("types.pidl", r#"namespace "net.types" record Vec3 { x: double; }"#);
//! sources.add("play.pidl", r#"namespace "net.play"
//!     packet Move { packetID: VarInt = 0x12; to: net.types.Vec3; }"#);
//!
//! let registry = compile(&sources, &CompileOptions::default()).unwrap();
//! let play = registry.get("net.play").unwrap();
//! assert!(play.packet_named("Move").unwrap().has_packet_id());
//! ```

/// Foundation types: FileId, LineIndex, SourceSet
pub mod base;

/// The pipeline driver
pub mod compiler;

/// Compile options
pub mod config;

/// Typed compile errors
pub mod error;

/// The schema graph handed to code generators
pub mod hir;

/// Cross-file dependency resolution
pub mod project;

/// Lexer and parser
pub mod syntax;

pub use base::{FileId, SourceFile, SourceSet};
pub use compiler::compile;
pub use config::{CompileOptions, ReferenceScan};
pub use error::{CompileError, Result};
pub use hir::{Enum, Field, Literal, Namespace, Packet, Primitive, Record, Registry, StructHolder, Type};
