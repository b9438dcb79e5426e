//! # Symbol Tables — scoped name resolution
//!
//! A [`Table`] mirrors the recursive shape of the tree for the subset of
//! kinds that matter to name resolution. Each [`Entry`] pairs an optional
//! identifier with a value that is either a nested table (for the four
//! recursive kinds: path, composon, nest, deref) or a terminal payload
//! (manifold, positional, group reference). The pairing is a single enum,
//! so a recursive kind without a nested table is unrepresentable — the
//! construction invariant needs no runtime check.
//!
//! Lookup comes in four flavors: exact ([`Table::get`]), recursive by id
//! ([`Table::recursive_get`]), by kind alone ([`Table::recursive_get_kind`])
//! and path-qualified ([`Table::path_get`]), which walks nested scopes
//! segment by segment. Named scopes only admit descent when the qualifier
//! matches; anonymous wrappers (composons, nests) are transparent.
//!
//! Tables are owned values: [`Table::join`] consumes its right operand and
//! [`Table::add`] takes the entry by value, so no entry is ever shared
//! between two tables.

use std::fmt;

use tracing::warn;

use crate::error::WeftError;
use crate::node::{GroupRef, Manifold};

// ============================================================================
// Identifiers and paths
// ============================================================================

/// A resolved identifier. Entries without one are anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id {
    pub name: String,
}

impl Id {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An ordered run of identifier segments qualifying a lookup through
/// nested scopes. The final segment is the *base*: descent stops there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Id>,
}

impl Path {
    pub fn new(segments: impl IntoIterator<Item = Id>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Build a path from name segments, e.g. `Path::from_names(["a", "b"])`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Id::new))
    }

    /// The current segment, if any.
    pub fn head(&self) -> Option<&Id> {
        self.segments.first()
    }

    /// True when only the base segment remains.
    pub fn is_base(&self) -> bool {
        self.segments.len() == 1
    }

    /// The path without its current segment.
    pub fn rest(&self) -> Path {
        Path {
            segments: self.segments.iter().skip(1).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.segments {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
            first = false;
        }
        Ok(())
    }
}

/// An ordered set of paths queried together; lookup results concatenate
/// in selection order, duplicates permitted.
pub type Selection = Vec<Path>;

// ============================================================================
// Entries
// ============================================================================

/// The kind tag of an entry, for type-filtered lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Path,
    Composon,
    Nest,
    Deref,
    Manifold,
    Positional,
    GroupRef,
}

impl EntryKind {
    /// The four kinds that hold a nested table.
    pub fn is_recursive(self) -> bool {
        matches!(
            self,
            EntryKind::Path | EntryKind::Composon | EntryKind::Nest | EntryKind::Deref
        )
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Path => "path",
            EntryKind::Composon => "composon",
            EntryKind::Nest => "nest",
            EntryKind::Deref => "deref",
            EntryKind::Manifold => "manifold",
            EntryKind::Positional => "positional",
            EntryKind::GroupRef => "group-ref",
        };
        write!(f, "{name}")
    }
}

/// An entry's payload. The kind tag and the payload shape are fused, so
/// only the four recursive kinds can carry a nested table.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    Path(Table),
    Composon(Table),
    Nest(Table),
    Deref(Table),
    Manifold(Manifold),
    Positional(String),
    GroupRef(GroupRef),
}

impl EntryValue {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryValue::Path(_) => EntryKind::Path,
            EntryValue::Composon(_) => EntryKind::Composon,
            EntryValue::Nest(_) => EntryKind::Nest,
            EntryValue::Deref(_) => EntryKind::Deref,
            EntryValue::Manifold(_) => EntryKind::Manifold,
            EntryValue::Positional(_) => EntryKind::Positional,
            EntryValue::GroupRef(_) => EntryKind::GroupRef,
        }
    }

    /// The nested table of a recursive-kind value.
    pub fn table(&self) -> Option<&Table> {
        match self {
            EntryValue::Path(t)
            | EntryValue::Composon(t)
            | EntryValue::Nest(t)
            | EntryValue::Deref(t) => Some(t),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut Table> {
        match self {
            EntryValue::Path(t)
            | EntryValue::Composon(t)
            | EntryValue::Nest(t)
            | EntryValue::Deref(t) => Some(t),
            _ => None,
        }
    }
}

/// One symbol-table entry: an optional identifier plus its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: Option<Id>,
    pub value: EntryValue,
}

impl Entry {
    pub fn new(id: impl Into<Option<Id>>, value: EntryValue) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    /// A named scope backed by a nested table.
    pub fn path(id: Id, table: Table) -> Self {
        Self::new(id, EntryValue::Path(table))
    }

    /// An anonymous composition stage.
    pub fn composon(table: Table) -> Self {
        Self::new(None, EntryValue::Composon(table))
    }

    /// An anonymous grouping.
    pub fn nest(table: Table) -> Self {
        Self::new(None, EntryValue::Nest(table))
    }

    pub fn deref(id: impl Into<Option<Id>>, table: Table) -> Self {
        Self::new(id, EntryValue::Deref(table))
    }

    pub fn manifold(id: impl Into<Option<Id>>, manifold: Manifold) -> Self {
        Self::new(id, EntryValue::Manifold(manifold))
    }

    pub fn positional(arg: impl Into<String>) -> Self {
        Self::new(None, EntryValue::Positional(arg.into()))
    }

    pub fn group_ref(name: impl Into<String>) -> Self {
        Self::new(None, EntryValue::GroupRef(GroupRef::unresolved(name)))
    }

    pub fn kind(&self) -> EntryKind {
        self.value.kind()
    }

    pub fn table(&self) -> Option<&Table> {
        self.value.table()
    }

    pub fn is_anonymous(&self) -> bool {
        self.id.is_none()
    }

    /// Exact match on both identifier and kind. Anonymous entries never
    /// match.
    fn matches(&self, id: &Id, kind: EntryKind) -> bool {
        self.id.as_ref() == Some(id) && self.kind() == kind
    }

    /// Deep copy with a fresh, empty manifold slot instead of the shared
    /// payload. String payloads are copied; nested tables recurse.
    fn duplicate(&self) -> Entry {
        let value = match &self.value {
            EntryValue::Path(t) => EntryValue::Path(t.duplicate()),
            EntryValue::Composon(t) => EntryValue::Composon(t.duplicate()),
            EntryValue::Nest(t) => EntryValue::Nest(t.duplicate()),
            EntryValue::Deref(t) => EntryValue::Deref(t.duplicate()),
            EntryValue::Manifold(_) => EntryValue::Manifold(Manifold::new()),
            EntryValue::Positional(s) => EntryValue::Positional(s.clone()),
            EntryValue::GroupRef(g) => EntryValue::GroupRef(g.clone()),
        };
        Entry {
            id: self.id.clone(),
            value,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{id}")?,
            None => write!(f, "_")?,
        }
        write!(f, " :: {}", self.kind())?;
        match &self.value {
            EntryValue::Positional(s) => write!(f, " '{s}'"),
            EntryValue::GroupRef(g) => write!(f, " '{}'", g.name),
            EntryValue::Manifold(m) => match m.function() {
                Some(function) => write!(f, " {function}"),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Table
// ============================================================================

/// A scoped symbol table: an ordered run of entries, possibly nested.
/// The empty table is the default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    entries: Vec<Entry>,
}

impl Table {
    /// A single-entry table.
    pub fn new(entry: Entry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Append one entry at the tail.
    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Splice `other` after this table's tail, consuming it. Either side
    /// empty is the identity.
    pub fn join(&mut self, mut other: Table) {
        self.entries.append(&mut other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn head(&self) -> Option<&Entry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entry> {
        self.entries.iter_mut()
    }

    /// Deep copy preserving order: nested tables recurse, string payloads
    /// are copied, and every manifold entry gets a fresh empty slot — the
    /// duplicate never shares manifold state with the original.
    pub fn duplicate(&self) -> Table {
        Table {
            entries: self.entries.iter().map(Entry::duplicate).collect(),
        }
    }

    /// Top-level entries matching both identifier and kind.
    pub fn get(&self, id: &Id, kind: EntryKind) -> Table {
        self.entries
            .iter()
            .filter(|e| e.matches(id, kind))
            .cloned()
            .collect()
    }

    /// Like [`Table::get`], but additionally descends into every
    /// recursive-kind entry's nested table regardless of name,
    /// accumulating matches from the whole subtree in pre-order.
    pub fn recursive_get(&self, id: &Id, kind: EntryKind) -> Table {
        let mut out = Table::empty();
        for e in &self.entries {
            if e.matches(id, kind) {
                out.add(e.clone());
            }
            if let Some(t) = e.table() {
                out.join(t.recursive_get(id, kind));
            }
        }
        out
    }

    /// Recursive lookup on kind alone, ignoring identifiers.
    pub fn recursive_get_kind(&self, kind: EntryKind) -> Table {
        let mut out = Table::empty();
        for e in &self.entries {
            if e.kind() == kind {
                out.add(e.clone());
            }
            if let Some(t) = e.table() {
                out.join(t.recursive_get_kind(kind));
            }
        }
        out
    }

    /// Path-qualified lookup.
    ///
    /// At the base segment this is an exact lookup, plus a full recursive
    /// search by id inside any recursive-kind entry at this level — an
    /// exact match does not preclude deeper ones. Before the base, descent
    /// is only admitted into recursive-kind entries that are anonymous
    /// (composons, nests) or whose id matches the current segment: named
    /// scopes only open when the qualifier says so.
    pub fn path_get(&self, path: &Path, kind: EntryKind) -> Table {
        let mut out = Table::empty();
        let Some(head) = path.head() else {
            return out;
        };
        for e in &self.entries {
            if path.is_base() {
                if e.matches(head, kind) {
                    out.add(e.clone());
                }
                if let Some(t) = e.table() {
                    out.join(t.recursive_get(head, kind));
                }
            } else if let Some(t) = e.table() {
                if e.is_anonymous() || e.id.as_ref() == Some(head) {
                    out.join(t.path_get(&path.rest(), kind));
                }
            }
        }
        out
    }

    /// Union of path-qualified lookups over every path in the selection,
    /// concatenated in selection order.
    pub fn selection_get(&self, selection: &Selection, kind: EntryKind) -> Table {
        let mut out = Table::empty();
        for path in selection {
            out.join(self.path_get(path, kind));
        }
        out
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for e in &self.entries {
            for i in 0..depth {
                f.write_str(if i % 2 == 0 { "  " } else { ". " })?;
            }
            writeln!(f, "{e}")?;
            if let Some(t) = e.table() {
                t.render(f, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Deterministic textual dump: one entry per line, indented by recursion
/// depth with an alternating two-character pattern, bracketed by a fixed
/// separator line. Stable enough to diff in tests.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!(" {} ", "-".repeat(43));
        writeln!(f, "{separator}")?;
        self.render(f, 0)?;
        writeln!(f, "{separator}")
    }
}

impl FromIterator<Entry> for Table {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Composition input/output extraction
// ============================================================================

/// The entries a composon consumes: data flows *into* the last (innermost)
/// stage of a nested composition.
pub fn composon_inputs(entry: &Entry) -> Result<Table, WeftError> {
    composon_io(entry, true)
}

/// The entries a composon produces: data flows *out of* the first
/// (outermost) stage of a nested composition.
pub fn composon_outputs(entry: &Entry) -> Result<Table, WeftError> {
    composon_io(entry, false)
}

fn composon_io(entry: &Entry, is_input: bool) -> Result<Table, WeftError> {
    let table = match &entry.value {
        EntryValue::Composon(t) | EntryValue::Nest(t) => t,
        _ => return Err(WeftError::NotComposon { kind: entry.kind() }),
    };
    let mut out = Table::empty();
    for e in table {
        match &e.value {
            EntryValue::Manifold(_) | EntryValue::Positional(_) | EntryValue::Deref(_) => {
                out.add(e.clone());
            }
            EntryValue::Path(nested) | EntryValue::Nest(nested) => {
                let inner = if is_input {
                    nested.last()
                } else {
                    nested.head()
                };
                match inner {
                    Some(inner) => out.join(composon_io(inner, is_input)?),
                    None => warn!(entry = %e, "empty scope in composition"),
                }
            }
            EntryValue::GroupRef(g) => {
                warn!(group = %g.name, "unresolved group reference in composition");
            }
            EntryValue::Composon(_) => {
                warn!(kind = %e.kind(), "illegal entry kind in composition");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifold_entry(name: &str) -> Entry {
        Entry::manifold(Id::new(name), Manifold::named(name))
    }

    /// Bindings `a.b.c = manifold(c)`: nested named scopes with the
    /// manifold entry at the bottom.
    fn abc_table() -> Table {
        let c_scope = Entry::path(Id::new("c"), Table::new(manifold_entry("c")));
        let b_scope = Entry::path(Id::new("b"), Table::new(c_scope));
        Table::new(Entry::path(Id::new("a"), Table::new(b_scope)))
    }

    #[test]
    fn test_add_and_join_preserve_order() {
        let mut t = Table::new(manifold_entry("f"));
        t.add(manifold_entry("g"));

        let mut u = Table::new(manifold_entry("h"));
        u.join(t);
        let ids: Vec<_> = u.iter().map(|e| e.id.clone().unwrap().name).collect();
        assert_eq!(ids, vec!["h", "f", "g"]);
    }

    #[test]
    fn test_join_identities_and_associativity() {
        let a = Table::new(manifold_entry("a"));
        let b = Table::new(manifold_entry("b"));
        let c = Table::new(manifold_entry("c"));

        // join(a, empty) == a
        let mut left = a.clone();
        left.join(Table::empty());
        assert_eq!(left, a);

        // join(empty, b) == b
        let mut right = Table::empty();
        right.join(b.clone());
        assert_eq!(right, b);

        // join(join(a, b), c) == join(a, join(b, c))
        let mut lhs = a.clone();
        lhs.join(b.clone());
        lhs.join(c.clone());

        let mut inner = b.clone();
        inner.join(c.clone());
        let mut rhs = a.clone();
        rhs.join(inner);

        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut t = abc_table();
        t.add(Entry::positional("1"));
        t.add(Entry::group_ref("sources"));

        let copy = t.duplicate();

        // structurally equal apart from manifold payloads
        assert_eq!(copy.len(), t.len());
        assert_eq!(copy.last(), t.last());

        // mutating the copy never affects the original
        let mut mutated = copy.clone();
        mutated.add(Entry::positional("2"));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_duplicate_gives_fresh_manifold_slots() {
        let m = Manifold::named("f");
        let t = Table::new(Entry::manifold(Id::new("f"), m.clone()));
        let copy = t.duplicate();

        let EntryValue::Manifold(dup) = &copy.head().unwrap().value else {
            panic!("manifold entry expected");
        };
        assert!(dup.is_blank());
        assert!(!dup.shares_payload_with(&m));

        // writing through the original is invisible to the duplicate
        m.add_input("x");
        assert!(dup.inputs().is_empty());
    }

    #[test]
    fn test_get_is_exact_and_top_level() {
        let t = abc_table();
        let a = Id::new("a");
        assert_eq!(t.get(&a, EntryKind::Path).len(), 1);
        // wrong kind
        assert!(t.get(&a, EntryKind::Manifold).is_empty());
        // nested ids are not visible to the exact lookup
        assert!(t.get(&Id::new("c"), EntryKind::Path).is_empty());
    }

    #[test]
    fn test_recursive_get_descends_every_scope() {
        let t = abc_table();
        let hits = t.recursive_get(&Id::new("c"), EntryKind::Manifold);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.head().unwrap().kind(), EntryKind::Manifold);
    }

    #[test]
    fn test_recursive_get_kind_ignores_ids() {
        let mut t = abc_table();
        t.add(Entry::composon(Table::new(manifold_entry("g"))));
        let hits = t.recursive_get_kind(EntryKind::Manifold);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_path_get_resolves_qualified_binding() {
        let t = abc_table();
        let hits = t.path_get(&Path::from_names(["a", "b", "c"]), EntryKind::Manifold);
        assert_eq!(hits.len(), 1);
        let EntryValue::Manifold(m) = &hits.head().unwrap().value else {
            panic!("manifold entry expected");
        };
        assert_eq!(m.function().as_deref(), Some("c"));
    }

    #[test]
    fn test_path_get_stops_short_of_base() {
        let t = abc_table();
        // a.b does not reach the manifold: at the base segment "b" the
        // recursive search looks for id "b", not "c"
        let hits = t.path_get(&Path::from_names(["a", "b"]), EntryKind::Manifold);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_path_get_named_scopes_shadow() {
        // z.c must not resolve through scope a
        let t = abc_table();
        let hits = t.path_get(&Path::from_names(["z", "c"]), EntryKind::Manifold);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_path_get_anonymous_wrappers_are_transparent() {
        // a = composon[ nest[ m ] ]: the anonymous layers do not consume
        // qualifier segments
        let inner = Entry::nest(Table::new(manifold_entry("m")));
        let stage = Entry::composon(Table::new(inner));
        let t = Table::new(Entry::path(Id::new("a"), Table::new(stage)));

        let hits = t.path_get(&Path::from_names(["a", "m"]), EntryKind::Manifold);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_path_get_base_also_searches_deeper() {
        // an exact match at the base does not preclude deeper matches
        let deep = Entry::composon(Table::new(manifold_entry("x")));
        let mut scope = Table::new(manifold_entry("x"));
        scope.add(deep);
        let t = Table::new(Entry::path(Id::new("a"), scope));

        let hits = t.path_get(&Path::from_names(["a", "x"]), EntryKind::Manifold);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_selection_get_concatenates_in_order() {
        let t = abc_table();
        let selection: Selection = vec![
            Path::from_names(["a", "b", "c"]),
            Path::from_names(["a", "b", "c"]),
        ];
        let hits = t.selection_get(&selection, EntryKind::Manifold);
        // duplicates permitted, one per path
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_composon_io_direct_contributors() {
        let mut inner = Table::new(manifold_entry("f"));
        inner.add(Entry::positional("1"));
        inner.add(Entry::deref(None, Table::empty()));
        let stage = Entry::composon(inner);

        let inputs = composon_inputs(&stage).unwrap();
        assert_eq!(inputs.len(), 3);
        let outputs = composon_outputs(&stage).unwrap();
        assert_eq!(outputs.len(), 3);
    }

    #[test]
    fn test_composon_io_nested_head_and_tail() {
        // a nested path entry: first stage produces "out", last stage
        // consumes "in"
        let first = Entry::composon(Table::new(manifold_entry("out")));
        let last = Entry::composon(Table::new(manifold_entry("in")));
        let mut pipeline = Table::new(first);
        pipeline.add(last);
        let nested = Entry::path(Id::new("p"), pipeline);
        let stage = Entry::composon(Table::new(nested));

        let inputs = composon_inputs(&stage).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs.head().unwrap().id, Some(Id::new("in")));

        let outputs = composon_outputs(&stage).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.head().unwrap().id, Some(Id::new("out")));
    }

    #[test]
    fn test_composon_io_skips_group_refs() {
        let mut inner = Table::new(Entry::group_ref("sources"));
        inner.add(manifold_entry("f"));
        let stage = Entry::composon(inner);

        let inputs = composon_inputs(&stage).unwrap();
        // the unresolved reference contributes nothing
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs.head().unwrap().kind(), EntryKind::Manifold);
    }

    #[test]
    fn test_composon_io_rejects_non_composons() {
        let entry = manifold_entry("f");
        assert_eq!(
            composon_inputs(&entry),
            Err(WeftError::NotComposon {
                kind: EntryKind::Manifold
            })
        );
    }

    #[test]
    fn test_dump_format_is_stable() {
        let mut scope = Table::new(manifold_entry("f"));
        scope.add(Entry::positional("1"));
        let inner = Entry::composon(Table::new(Entry::group_ref("more")));
        let mut top = Table::new(Entry::path(Id::new("main"), scope));
        top.add(inner);

        let separator = format!(" {} ", "-".repeat(43));
        let expected = format!(
            "{separator}\n\
             main :: path\n\
             \x20\x20f :: manifold f\n\
             \x20\x20_ :: positional '1'\n\
             _ :: composon\n\
             \x20\x20_ :: group-ref 'more'\n\
             {separator}\n"
        );
        assert_eq!(top.to_string(), expected);
    }

    #[test]
    fn test_dump_alternates_indent_pattern() {
        let innermost = Table::new(manifold_entry("m"));
        let mid = Table::new(Entry::composon(innermost));
        let top = Table::new(Entry::path(Id::new("a"), mid));

        let dump = top.to_string();
        // depth 2 renders as "  . "
        assert!(dump.contains("\n  . m :: manifold m\n"));
    }
}
