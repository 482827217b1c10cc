//! The set of schema sources handed to the compiler.

use std::sync::Arc;

use indexmap::IndexMap;

use super::FileId;

/// One input file: a display name and its raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub name: Arc<str>,
    pub text: Arc<str>,
}

/// Ordered set of `(file name, source text)` pairs.
///
/// Reading files from disk is left to the caller; the set only assigns
/// stable [`FileId`]s in insertion order. The order carries no meaning for
/// the compiler, which computes its own processing order.
#[derive(Clone, Debug, Default)]
pub struct SourceSet {
    files: IndexMap<FileId, SourceFile>,
    next_id: u32,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file and return its id.
    ///
    /// Adding a name that is already present replaces its text and keeps
    /// the original id.
    pub fn add(&mut self, name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> FileId {
        let name = name.into();
        let text = text.into();

        if let Some((&id, file)) = self.files.iter_mut().find(|(_, f)| f.name == name) {
            file.text = text;
            return id;
        }

        let id = FileId::new(self.next_id);
        self.next_id += 1;
        self.files.insert(id, SourceFile { name, text });
        id
    }

    pub fn get(&self, file: FileId) -> Option<&SourceFile> {
        self.files.get(&file)
    }

    /// Display name of a file, or `"<unknown>"` for a foreign id.
    pub fn name(&self, file: FileId) -> Arc<str> {
        self.files
            .get(&file)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| Arc::from("<unknown>"))
    }

    /// Iterate over all files in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> + '_ {
        self.files.iter().map(|(&id, file)| (id, file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<N, T> FromIterator<(N, T)> for SourceSet
where
    N: Into<Arc<str>>,
    T: Into<Arc<str>>,
{
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut set = SourceSet::new();
        for (name, text) in iter {
            set.add(name, text);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_set_id_assignment() {
        let mut set = SourceSet::new();

        let a = set.add("a.pidl", "namespace \"a\"");
        let b = set.add("b.pidl", "namespace \"b\"");

        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
        assert_eq!(&*set.name(a), "a.pidl");
    }

    #[test]
    fn test_source_set_replaces_same_name() {
        let mut set = SourceSet::new();

        let first = set.add("a.pidl", "old");
        let second = set.add("a.pidl", "new");

        assert_eq!(first, second);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(first).map(|f| &*f.text), Some("new"));
    }

    #[test]
    fn test_source_set_from_iter_keeps_order() {
        let set: SourceSet = [("z.pidl", ""), ("a.pidl", "")].into_iter().collect();
        let names: Vec<_> = set.iter().map(|(_, f)| f.name.to_string()).collect();

        assert_eq!(names, ["z.pidl", "a.pidl"]);
    }
}
