//! Define-before-use ordering of source files.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::{FileId, SourceSet};
use crate::config::ReferenceScan;
use crate::error::{CompileError, ImportErrorKind, Result};

use super::scan::{FileImports, scan};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Pending,
    Visiting,
    Done,
}

/// A scanned file waiting to be ordered.
#[derive(Clone, Debug)]
struct Node {
    file: FileId,
    name: Arc<str>,
    imports: FileImports,
}

/// Compute the processing order of `sources`.
///
/// Every file comes after all files declaring a namespace it references,
/// except for references to its own namespace. Files that do not depend on
/// each other keep their input order.
pub fn order(sources: &SourceSet, mode: ReferenceScan) -> Result<Vec<FileId>> {
    let nodes = sources
        .iter()
        .map(|(file, source)| {
            let imports = scan(&source.text, mode).map_err(|kind| CompileError::Import {
                file: source.name.clone(),
                line: 1,
                kind,
            })?;
            Ok(Node {
                file,
                name: source.name.clone(),
                imports,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let ordered = Resolver::new(&nodes).run()?;
    tracing::debug!(files = ordered.len(), "resolved file order");
    Ok(ordered)
}

struct Resolver<'a> {
    nodes: &'a [Node],
    declaring: FxHashMap<&'a str, Vec<usize>>,
    marks: Vec<Mark>,
    stack: Vec<usize>,
    ordered: Vec<FileId>,
}

impl<'a> Resolver<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        let mut declaring: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        for (idx, node) in nodes.iter().enumerate() {
            declaring
                .entry(node.imports.namespace.as_str())
                .or_default()
                .push(idx);
        }

        Self {
            nodes,
            declaring,
            marks: vec![Mark::Pending; nodes.len()],
            stack: Vec::new(),
            ordered: Vec::with_capacity(nodes.len()),
        }
    }

    fn run(mut self) -> Result<Vec<FileId>> {
        for idx in 0..self.nodes.len() {
            if self.marks[idx] == Mark::Pending {
                self.visit(idx)?;
            }
        }
        Ok(self.ordered)
    }

    fn visit(&mut self, idx: usize) -> Result<()> {
        let nodes = self.nodes;
        let node = &nodes[idx];
        tracing::trace!(file = %node.name, namespace = %node.imports.namespace, "visiting");

        self.marks[idx] = Mark::Visiting;
        self.stack.push(idx);

        for (namespace, line) in node.imports.foreign() {
            let Some(declaring) = self.declaring.get(namespace).cloned() else {
                return Err(CompileError::Import {
                    file: node.name.clone(),
                    line,
                    kind: ImportErrorKind::UndefinedImport {
                        namespace: namespace.to_string(),
                    },
                });
            };

            for dep in declaring {
                match self.marks[dep] {
                    Mark::Done => {}
                    Mark::Pending => self.visit(dep)?,
                    Mark::Visiting => {
                        return Err(CompileError::Import {
                            file: node.name.clone(),
                            line,
                            kind: ImportErrorKind::Cycle {
                                cycle: self.cycle_through(dep),
                            },
                        });
                    }
                }
            }
        }

        self.stack.pop();
        self.marks[idx] = Mark::Done;
        self.ordered.push(node.file);
        Ok(())
    }

    /// Namespaces on the visiting stack from `dep` back around to `dep`.
    fn cycle_through(&self, dep: usize) -> Vec<String> {
        let start = self
            .stack
            .iter()
            .position(|&idx| idx == dep)
            .unwrap_or(0);
        self.stack[start..]
            .iter()
            .chain(std::iter::once(&dep))
            .map(|&idx| self.nodes[idx].imports.namespace.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    fn names(sources: &SourceSet, order: &[FileId]) -> Vec<String> {
        order.iter().map(|&f| sources.name(f).to_string()).collect()
    }

    #[test]
    fn test_single_file_is_unchanged() {
        let sources: SourceSet = [("a", "namespace \"a\"\nrecord X { }")].into_iter().collect();
        let ordered = order(&sources, ReferenceScan::Raw).unwrap();

        assert_eq!(names(&sources, &ordered), ["a"]);
    }

    #[test]
    fn test_dependencies_come_first() {
        let sources: SourceSet = [
            ("play", "namespace \"game.play\"\nrecord P { v: game.types.Vec3; }"),
            ("types", "namespace \"game.types\"\nrecord Vec3 { x: core.Num; }"),
            ("core", "namespace \"core\"\nrecord Num { }"),
        ]
        .into_iter()
        .collect();
        let ordered = order(&sources, ReferenceScan::Raw).unwrap();

        assert_eq!(names(&sources, &ordered), ["core", "types", "play"]);
    }

    #[test]
    fn test_all_files_of_a_namespace_come_first() {
        let sources: SourceSet = [
            ("user", "namespace \"app\"\nrecord U { a: lib.A; }"),
            ("lib1", "namespace \"lib\"\nrecord A { }"),
            ("other", "namespace \"misc\"\nrecord M { }"),
            ("lib2", "namespace \"lib\"\nrecord B { }"),
        ]
        .into_iter()
        .collect();
        let ordered = order(&sources, ReferenceScan::Raw).unwrap();

        assert_eq!(names(&sources, &ordered), ["lib1", "lib2", "user", "other"]);
    }

    #[test]
    fn test_own_namespace_references_do_not_reorder() {
        let sources: SourceSet = [
            ("a1", "namespace \"a\"\nrecord X { y: a.Y; }"),
            ("a2", "namespace \"a\"\nrecord Y { x: a.X; }"),
        ]
        .into_iter()
        .collect();
        let ordered = order(&sources, ReferenceScan::Raw).unwrap();

        assert_eq!(names(&sources, &ordered), ["a1", "a2"]);
    }

    #[test]
    fn test_undefined_import() {
        let sources: SourceSet = [("a", "namespace \"a\"\n\nrecord X { y: nowhere.Y; }")]
            .into_iter()
            .collect();
        let err = order(&sources, ReferenceScan::Raw).unwrap_err();

        assert_eq!(err.code(), codes::UNDEFINED_IMPORT);
        assert_eq!(err.file(), "a");
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_cycle_is_reported() {
        let sources: SourceSet = [
            ("a", "namespace \"a\"\nrecord X { y: b.Y; }"),
            ("b", "namespace \"b\"\nrecord Y { x: a.X; }"),
        ]
        .into_iter()
        .collect();
        let err = order(&sources, ReferenceScan::Raw).unwrap_err();

        match err {
            CompileError::Import {
                kind: ImportErrorKind::Cycle { cycle },
                ..
            } => assert_eq!(cycle, ["a", "b", "a"]),
            other => panic!("expected cycle, got {other}"),
        }
    }

    #[test]
    fn test_missing_namespace_names_the_file() {
        let sources: SourceSet = [("bad.pidl", "record X { }")].into_iter().collect();
        let err = order(&sources, ReferenceScan::Raw).unwrap_err();

        assert_eq!(err.code(), codes::MISSING_NAMESPACE);
        assert_eq!(err.file(), "bad.pidl");
    }
}
