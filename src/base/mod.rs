//! Foundation types for the pidl toolchain.
//!
//! - [`FileId`] - Input file identifiers
//! - [`LineCol`], [`LineIndex`] - Offset to line conversion for diagnostics
//! - [`SourceSet`] - The `(file name, source text)` input contract
//!
//! This module has NO dependencies on other pidl modules.

mod file_id;
mod source;
mod span;

pub use file_id::FileId;
pub use source::{SourceFile, SourceSet};
pub use span::{LineCol, LineIndex, TextSize};
