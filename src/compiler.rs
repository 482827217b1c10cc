//! The compile pipeline: order, lex, parse.

use rayon::prelude::*;

use crate::base::{FileId, SourceSet};
use crate::config::CompileOptions;
use crate::error::{CompileError, Result};
use crate::hir::Registry;
use crate::project;
use crate::syntax::{self, LexError, Token};

/// Compile a set of sources into a namespace registry.
///
/// Fails on the first error; no partial registry is returned.
pub fn compile(sources: &SourceSet, options: &CompileOptions) -> Result<Registry> {
    let result = run(sources, options);
    match &result {
        Ok(registry) => tracing::info!(
            files = sources.len(),
            namespaces = registry.len(),
            declarations = registry.declaration_count(),
            "compiled"
        ),
        Err(err) => tracing::debug!(code = err.code(), file = err.file(), line = err.line(), "compile failed"),
    }
    result
}

fn run(sources: &SourceSet, options: &CompileOptions) -> Result<Registry> {
    let ordered = project::order(sources, options.reference_scan)?;
    let tokens = lex_all(sources, &ordered, options.parallel_lex)?;

    let mut registry = Registry::new();
    for (file, tokens) in ordered.iter().zip(&tokens) {
        syntax::parse(*file, sources.name(*file), tokens, &mut registry)?;
    }
    Ok(registry)
}

/// Tokenize files in processing order, reporting the earliest failure.
fn lex_all(sources: &SourceSet, ordered: &[FileId], parallel: bool) -> Result<Vec<Vec<Token>>> {
    let lex_one = |file: &FileId| -> std::result::Result<Vec<Token>, LexError> {
        let text = sources.get(*file).map(|s| &*s.text).unwrap_or_default();
        let tokens = syntax::lex(text)?;
        tracing::debug!(file = %sources.name(*file), tokens = tokens.len(), "lexed file");
        Ok(tokens)
    };

    let results: Vec<_> = if parallel {
        ordered.par_iter().map(lex_one).collect()
    } else {
        ordered.iter().map(lex_one).collect()
    };

    results
        .into_iter()
        .zip(ordered)
        .map(|(result, file)| {
            result.map_err(|err| CompileError::Lexical {
                file: sources.name(*file),
                line: err.line,
                kind: err.kind,
            })
        })
        .collect()
}
