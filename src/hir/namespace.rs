//! Namespaces and the registry that merges them across files.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::FileId;

use super::decl::{Enum, Packet, Record};

/// Declarations one file contributed to one namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructHolder {
    pub enums: Vec<Enum>,
    pub records: Vec<Record>,
    pub packets: Vec<Packet>,
}

impl StructHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.records.is_empty() && self.packets.is_empty()
    }

    /// Whether any enum, record or packet in this bucket is called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.enums.iter().any(|e| e.name == name)
            || self.records.iter().any(|r| r.name == name)
            || self.packets.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.enums.len() + self.records.len() + self.packets.len()
    }
}

/// A dotted-path scope owning declarations from one or more files.
///
/// Two files declaring the same path share one `Namespace`; each file gets
/// its own [`StructHolder`] bucket. Names are unique across all buckets.
#[derive(Clone, Debug, PartialEq)]
pub struct Namespace {
    path: SmolStr,
    structs: IndexMap<FileId, StructHolder>,
}

impl Namespace {
    pub fn new(path: impl Into<SmolStr>) -> Self {
        Self {
            path: path.into(),
            structs: IndexMap::new(),
        }
    }

    /// Full dotted path, e.g. `net.play.client`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(self.path.as_str())
    }

    /// Bucket of a file, created empty on first use.
    pub fn holder_mut(&mut self, file: FileId) -> &mut StructHolder {
        self.structs.entry(file).or_default()
    }

    /// Files that contributed declarations, in parse order.
    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.structs.keys().copied()
    }

    /// Per-file buckets in parse order.
    pub fn structs(&self) -> impl Iterator<Item = (FileId, &StructHolder)> + '_ {
        self.structs.iter().map(|(&file, holder)| (file, holder))
    }

    pub fn enums(&self) -> impl Iterator<Item = &Enum> + '_ {
        self.structs.values().flat_map(|h| h.enums.iter())
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.structs.values().flat_map(|h| h.records.iter())
    }

    pub fn packets(&self) -> impl Iterator<Item = &Packet> + '_ {
        self.structs.values().flat_map(|h| h.packets.iter())
    }

    pub fn enum_named(&self, name: &str) -> Option<&Enum> {
        self.enums().find(|e| e.name == name)
    }

    pub fn record_named(&self, name: &str) -> Option<&Record> {
        self.records().find(|r| r.name == name)
    }

    pub fn packet_named(&self, name: &str) -> Option<&Packet> {
        self.packets().find(|p| p.name == name)
    }

    /// Whether any file already declared `name` in this namespace.
    pub fn contains(&self, name: &str) -> bool {
        self.structs.values().any(|h| h.contains(name))
    }

    /// Total declarations over all files.
    pub fn len(&self) -> usize {
        self.structs.values().map(StructHolder::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All namespaces of a compile run, keyed by path.
///
/// Iteration follows the order in which namespaces were first registered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    namespaces: IndexMap<SmolStr, Namespace>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Namespace> {
        self.namespaces.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.namespaces.contains_key(path)
    }

    /// The namespace at `path`, registering an empty one if needed.
    pub fn namespace_mut(&mut self, path: &str) -> &mut Namespace {
        self.namespaces
            .entry(SmolStr::new(path))
            .or_insert_with(|| Namespace::new(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Namespace> + '_ {
        self.namespaces.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.namespaces.keys().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Declarations over every namespace.
    pub fn declaration_count(&self) -> usize {
        self.namespaces.values().map(Namespace::len).sum()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Namespace;
    type IntoIter = indexmap::map::Values<'a, SmolStr, Namespace>;

    fn into_iter(self) -> Self::IntoIter {
        self.namespaces.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_name_is_last_segment() {
        assert_eq!(Namespace::new("net.play.client").name(), "client");
        assert_eq!(Namespace::new("core").name(), "core");
    }

    #[test]
    fn test_names_are_checked_across_files() {
        let mut ns = Namespace::new("a");
        ns.holder_mut(FileId::new(0)).records.push(Record::new("Foo"));
        ns.holder_mut(FileId::new(1)).enums.push(Enum::new("Bar"));

        assert!(ns.contains("Foo"));
        assert!(ns.contains("Bar"));
        assert!(!ns.contains("Baz"));
        assert_eq!(ns.files().collect::<Vec<_>>(), vec![FileId::new(0), FileId::new(1)]);
        assert_eq!(ns.len(), 2);
    }

    #[test]
    fn test_registry_reuses_namespace_by_path() {
        let mut registry = Registry::new();
        registry
            .namespace_mut("a.b")
            .holder_mut(FileId::new(0))
            .records
            .push(Record::new("X"));
        registry
            .namespace_mut("a.b")
            .holder_mut(FileId::new(1))
            .records
            .push(Record::new("Y"));

        assert_eq!(registry.len(), 1);
        let ns = registry.get("a.b").unwrap();
        assert_eq!(ns.records().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["X", "Y"]);
    }
}
