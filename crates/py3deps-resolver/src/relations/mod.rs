//! Order-preserving relation accumulation
//!
//! Provides OrderedSet, an insertion-ordered duplicate-free collection, and
//! RelationSet, the per-package accumulator that the resolution pass fills
//! and the exporter drains into packaging metadata.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{Serialize, Serializer};

use py3deps_core::types::RelationKind;

/// Insertion-ordered set: a sequence plus a membership index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T: Eq + Hash + Clone> {
    /// Values in first-insertion order
    items: Vec<T>,
    /// Membership index over `items`
    index: HashSet<T>,
}

/// Maintenance-script registration for one private directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MaintenanceScript {
    /// Directory the byte-compile/clean invocation is scoped to
    pub dir: String,
    /// Argument string, e.g. `-V 3.5-3.7 -X '*.pyc'`
    pub args: String,
}

/// Relations and maintenance scripts collected for one binary package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationSet {
    package: String,
    depends: OrderedSet<String>,
    recommends: OrderedSet<String>,
    suggests: OrderedSet<String>,
    enhances: OrderedSet<String>,
    breaks: OrderedSet<String>,
    scripts: OrderedSet<MaintenanceScript>,
}

/// Packaging metadata system the relations are exported into
pub trait MetadataSink {
    /// Register one value under a substitution variable such as `python3:Depends`
    fn add_substvar(&mut self, package: &str, name: &str, value: &str);

    /// Schedule a post-install/post-removal byte-compile invocation
    fn add_rtupdate(&mut self, package: &str, dir: &str, args: &str);
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Append a value unless already present; returns true if it was added
    pub fn insert(&mut self, value: T) -> bool {
        if self.index.contains(&value) {
            return false;
        }
        self.index.insert(value.clone());
        self.items.push(value);
        true
    }

    /// Check membership
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains(value)
    }

    /// Values in first-insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Eq + Hash + Clone> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Eq + Hash + Clone + Serialize> Serialize for OrderedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl MaintenanceScript {
    pub fn new(dir: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            args: args.into(),
        }
    }
}

impl RelationSet {
    /// Create an empty relation set for a package
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            depends: OrderedSet::new(),
            recommends: OrderedSet::new(),
            suggests: OrderedSet::new(),
            enhances: OrderedSet::new(),
            breaks: OrderedSet::new(),
            scripts: OrderedSet::new(),
        }
    }

    /// Binary package the relations belong to
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Add a relation of the given kind; empty values are ignored
    pub fn add(&mut self, kind: RelationKind, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.kind_mut(kind).insert(value)
    }

    pub fn add_depends(&mut self, value: impl Into<String>) -> bool {
        self.add(RelationKind::Depends, value)
    }

    pub fn add_recommends(&mut self, value: impl Into<String>) -> bool {
        self.add(RelationKind::Recommends, value)
    }

    pub fn add_suggests(&mut self, value: impl Into<String>) -> bool {
        self.add(RelationKind::Suggests, value)
    }

    pub fn add_enhances(&mut self, value: impl Into<String>) -> bool {
        self.add(RelationKind::Enhances, value)
    }

    pub fn add_breaks(&mut self, value: impl Into<String>) -> bool {
        self.add(RelationKind::Breaks, value)
    }

    /// Register a maintenance-script invocation (deduplicated on the full pair)
    pub fn add_script(&mut self, dir: impl Into<String>, args: impl Into<String>) -> bool {
        self.scripts.insert(MaintenanceScript::new(dir, args))
    }

    /// Relations of one kind in first-insertion order
    pub fn get(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::Depends => self.depends.as_slice(),
            RelationKind::Recommends => self.recommends.as_slice(),
            RelationKind::Suggests => self.suggests.as_slice(),
            RelationKind::Enhances => self.enhances.as_slice(),
            RelationKind::Breaks => self.breaks.as_slice(),
        }
    }

    pub fn depends(&self) -> &[String] {
        self.depends.as_slice()
    }

    pub fn recommends(&self) -> &[String] {
        self.recommends.as_slice()
    }

    pub fn suggests(&self) -> &[String] {
        self.suggests.as_slice()
    }

    pub fn enhances(&self) -> &[String] {
        self.enhances.as_slice()
    }

    pub fn breaks(&self) -> &[String] {
        self.breaks.as_slice()
    }

    pub fn scripts(&self) -> &[MaintenanceScript] {
        self.scripts.as_slice()
    }

    /// True when no relation and no script was collected
    pub fn is_empty(&self) -> bool {
        RelationKind::ALL.iter().all(|k| self.get(*k).is_empty()) && self.scripts.is_empty()
    }

    /// Push every relation and script into the metadata sink
    pub fn export<S: MetadataSink + ?Sized>(&self, sink: &mut S) {
        for kind in RelationKind::ALL {
            for value in self.get(kind) {
                sink.add_substvar(&self.package, kind.substvar(), value);
            }
        }
        for script in &self.scripts {
            sink.add_rtupdate(&self.package, &script.dir, &script.args);
        }
    }

    fn kind_mut(&mut self, kind: RelationKind) -> &mut OrderedSet<String> {
        match kind {
            RelationKind::Depends => &mut self.depends,
            RelationKind::Recommends => &mut self.recommends,
            RelationKind::Suggests => &mut self.suggests,
            RelationKind::Enhances => &mut self.enhances,
            RelationKind::Breaks => &mut self.breaks,
        }
    }
}

impl fmt::Display for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scripts: Vec<(&str, &str)> = self
            .scripts
            .iter()
            .map(|s| (s.dir.as_str(), s.args.as_str()))
            .collect();
        write!(
            f,
            "D={:?}; R={:?}; S={:?}; E={:?}, B={:?}; RT={:?}",
            self.depends.as_slice(),
            self.recommends.as_slice(),
            self.suggests.as_slice(),
            self.enhances.as_slice(),
            self.breaks.as_slice(),
            scripts
        )
    }
}
