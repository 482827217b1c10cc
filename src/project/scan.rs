//! Lexical extraction of a file's namespace and the namespaces it uses.
//!
//! This is a heuristic over raw text, not a parse: any dotted path after
//! the `namespace "..."` header is taken as `<namespace>.<member>`. Paths
//! whose first segment starts with a digit are number literals and are
//! ignored. Depending on [`ReferenceScan`], text inside `//` comments is
//! either scanned too or blanked out first.

use std::borrow::Cow;

use indexmap::IndexMap;
use logos::Logos;
use smol_str::SmolStr;

use crate::base::LineIndex;
use crate::config::ReferenceScan;
use crate::error::ImportErrorKind;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Fragment<'src> {
    #[regex(r#"namespace[ \t]+"[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*""#, |lex| {
        let slice = lex.slice();
        let open = slice.find('"').unwrap_or(0);
        &slice[open + 1..slice.len() - 1]
    })]
    Header(&'src str),

    #[regex(r"[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)+", |lex| lex.slice())]
    Path(&'src str),

    #[regex(r"[A-Za-z0-9_]+")]
    Word,
}

/// What the scanner learned about one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileImports {
    /// Declared namespace path.
    pub namespace: SmolStr,
    /// Referenced namespace paths with the line of their first use, in
    /// order of first use. May include the file's own namespace.
    pub references: IndexMap<SmolStr, u32>,
}

impl FileImports {
    /// Referenced namespaces other than the file's own.
    pub fn foreign(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.references
            .iter()
            .filter(move |(ns, _)| **ns != self.namespace)
            .map(|(ns, &line)| (ns.as_str(), line))
    }
}

/// Scan one file's raw text.
pub fn scan(source: &str, mode: ReferenceScan) -> Result<FileImports, ImportErrorKind> {
    let text = match mode {
        ReferenceScan::Raw => Cow::Borrowed(source),
        ReferenceScan::SkipComments => Cow::Owned(blank_comments(source)),
    };
    let index = LineIndex::new(&text);
    let mut lexer = Fragment::lexer(&text);

    let mut namespace = None;
    let mut header_line = 0;
    let mut references = IndexMap::new();

    while let Some(fragment) = lexer.next() {
        let line = index.line_of(lexer.span().start);
        match fragment {
            Ok(Fragment::Header(path)) if namespace.is_none() => {
                namespace = Some(SmolStr::new(path));
                header_line = line;
            }
            Ok(Fragment::Path(path)) if namespace.is_some() && line > header_line => {
                if let Some(ns) = namespace_of(path) {
                    references.entry(SmolStr::new(ns)).or_insert(line);
                }
            }
            _ => {}
        }
    }

    let namespace = namespace.ok_or(ImportErrorKind::MissingNamespace)?;
    Ok(FileImports {
        namespace,
        references,
    })
}

/// Namespace prefix of a dotted member path: everything but the last
/// segment.
fn namespace_of(path: &str) -> Option<&str> {
    if path.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    path.rsplit_once('.').map(|(ns, _)| ns)
}

/// Replace `//` comment bodies with spaces, keeping byte offsets and
/// newlines. A `//` inside a `"..."` literal does not start a comment.
fn blank_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;
    let mut in_comment = false;

    while let Some(c) = chars.next() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
                out.push(c);
            } else {
                out.extend(std::iter::repeat_n(' ', c.len_utf8()));
            }
            continue;
        }
        match c {
            '"' => in_string = !in_string,
            '/' if !in_string && chars.peek() == Some(&'/') => {
                in_comment = true;
                out.push(' ');
                continue;
            }
            _ => {}
        }
        out.push(c);
    }
    out
}
