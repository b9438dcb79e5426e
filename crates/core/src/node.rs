//! # Nodes and Sequences — the tree substrate
//!
//! A weft program is a tree of [`Node`]s. Every later pass — filtering,
//! wiring, table construction — traverses this one structure, so its shape
//! is deliberately small and closed:
//!
//! - **Sequence-valued** kinds hold an ordered [`Sequence`] of children:
//!   [`Node::List`], [`Node::Nest`], [`Node::Composon`], [`Node::Deref`],
//!   and [`Node::Path`] (qualifier segments).
//! - **Pair-valued** kinds hold a left/right pair: [`Node::Couplet`]
//!   (a binding `lhs ⟹ rhs`) and [`Node::Qualified`] (a qualified path:
//!   head segment ⟹ remaining sequence).
//! - **Terminal** kinds hold a primitive payload: names, labels, positional
//!   references, group references, and manifolds.
//!
//! A [`Sequence`] exclusively owns its nodes. Moving a node between
//! sequences is always a clone — there is no link surgery and no aliasing
//! of structure. The one intentionally shared thing is the [`Manifold`]
//! payload: cloning a manifold node shares the underlying descriptor, so a
//! pass that wires manifolds through a filtered view still updates the
//! manifolds in the original tree.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::table::Id;

// ============================================================================
// Sequence
// ============================================================================

/// An ordered, owned sequence of nodes.
///
/// Replaces the intrusive linked list of older designs with a growable
/// array: `push` is amortized O(1), `append` splices another sequence onto
/// the tail (an empty right operand is a no-op).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    nodes: Vec<Node>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-node sequence.
    pub fn single(node: Node) -> Self {
        Self { nodes: vec![node] }
    }

    /// Append one node to the tail.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Splice `other` onto the tail, consuming it.
    pub fn append(&mut self, mut other: Sequence) {
        self.nodes.append(&mut other.nodes);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first node, if any.
    pub fn head(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// The last node, if any.
    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// A copy of the sequence without its head. Used when consuming one
    /// qualifier segment per recursion step.
    pub fn rest(&self) -> Sequence {
        Sequence {
            nodes: self.nodes.iter().skip(1).cloned().collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }
}

impl FromIterator<Node> for Sequence {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Node>> for Sequence {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl IntoIterator for Sequence {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a mut Sequence {
    type Item = &'a mut Node;
    type IntoIter = std::slice::IterMut<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter_mut()
    }
}

// ============================================================================
// Label
// ============================================================================

/// A comparable name derived from a couplet's left-hand side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Manifold
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
struct ManifoldState {
    /// The externally-defined function this manifold stands for.
    function: Option<String>,
    /// Wiring recorded by later passes (which outputs feed this manifold).
    inputs: Vec<String>,
}

/// An opaque function descriptor carried by manifold nodes.
///
/// The front end never interprets the payload — it only hands out slots
/// that later passes fill in. Cloning a `Manifold` shares the payload;
/// [`crate::table::Table::duplicate`] allocates a fresh empty one instead.
#[derive(Debug, Clone, Default)]
pub struct Manifold {
    state: Rc<RefCell<ManifoldState>>,
}

impl Manifold {
    /// A fresh manifold with an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// A manifold standing for the named function.
    pub fn named(function: impl Into<String>) -> Self {
        let m = Self::new();
        m.state.borrow_mut().function = Some(function.into());
        m
    }

    pub fn function(&self) -> Option<String> {
        self.state.borrow().function.clone()
    }

    pub fn set_function(&self, function: impl Into<String>) {
        self.state.borrow_mut().function = Some(function.into());
    }

    /// Record one wired input. Later passes use this to accumulate
    /// candidate producers.
    pub fn add_input(&self, input: impl Into<String>) {
        self.state.borrow_mut().inputs.push(input.into());
    }

    pub fn inputs(&self) -> Vec<String> {
        self.state.borrow().inputs.clone()
    }

    /// True when no pass has written to this manifold yet.
    pub fn is_blank(&self) -> bool {
        let state = self.state.borrow();
        state.function.is_none() && state.inputs.is_empty()
    }

    /// True when both handles point at the same payload.
    pub fn shares_payload_with(&self, other: &Manifold) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl PartialEq for Manifold {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) || *self.state.borrow() == *other.state.borrow()
    }
}

// ============================================================================
// GroupRef
// ============================================================================

/// A reference to a named group of compositions.
///
/// Resolution happens in a later pass; this layer only ever sees the
/// unresolved form and reports it as a diagnostic wherever a resolved
/// target would be required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub name: String,
    /// Filled in by the resolution pass.
    pub target: Option<Id>,
}

impl GroupRef {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*{}", self.name)
    }
}

// ============================================================================
// Node
// ============================================================================

/// The left/right pair carried by [`Node::Couplet`] and [`Node::Qualified`].
#[derive(Debug, Clone, PartialEq)]
pub struct Couplet {
    pub lhs: Node,
    pub rhs: Node,
}

/// One node of the weft tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Plain ordered wrapper; also the shape of a list of left-hand-side
    /// alternatives.
    List(Sequence),
    /// Anonymous grouping, transparent to path-qualified lookup.
    Nest(Sequence),
    /// One stage of a composition.
    Composon(Sequence),
    /// Dereference of a bound value.
    Deref(Sequence),
    /// Qualifier segments of a scope path (each a `Name` or `Label`).
    Path(Sequence),
    /// A binding: left-hand qualifier ⟹ right-hand body.
    Couplet(Box<Couplet>),
    /// A qualified path: head segment ⟹ remaining sequence.
    Qualified(Box<Couplet>),
    /// A bare name.
    Name(String),
    /// A labelled name.
    Label(Label),
    /// A positional argument reference.
    Positional(String),
    /// An unresolved reference to a named group of compositions.
    GroupRef(GroupRef),
    /// A composition-language function unit.
    Manifold(Manifold),
}

/// The bare kind tag of a [`Node`], for membership tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    List,
    Nest,
    Composon,
    Deref,
    Path,
    Couplet,
    Qualified,
    Name,
    Label,
    Positional,
    GroupRef,
    Manifold,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::List => "list",
            NodeKind::Nest => "nest",
            NodeKind::Composon => "composon",
            NodeKind::Deref => "deref",
            NodeKind::Path => "path",
            NodeKind::Couplet => "couplet",
            NodeKind::Qualified => "qualified",
            NodeKind::Name => "name",
            NodeKind::Label => "label",
            NodeKind::Positional => "positional",
            NodeKind::GroupRef => "group-ref",
            NodeKind::Manifold => "manifold",
        };
        write!(f, "{name}")
    }
}

impl Node {
    /// Convenience constructor for a binding couplet.
    pub fn couplet(lhs: Node, rhs: Node) -> Self {
        Node::Couplet(Box::new(Couplet { lhs, rhs }))
    }

    /// Convenience constructor for a qualified path node.
    pub fn qualified(head: Node, rest: Node) -> Self {
        Node::Qualified(Box::new(Couplet { lhs: head, rhs: rest }))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Node::Name(name.into())
    }

    pub fn label(name: impl Into<String>) -> Self {
        Node::Label(Label::new(name))
    }

    pub fn positional(arg: impl Into<String>) -> Self {
        Node::Positional(arg.into())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::List(_) => NodeKind::List,
            Node::Nest(_) => NodeKind::Nest,
            Node::Composon(_) => NodeKind::Composon,
            Node::Deref(_) => NodeKind::Deref,
            Node::Path(_) => NodeKind::Path,
            Node::Couplet(_) => NodeKind::Couplet,
            Node::Qualified(_) => NodeKind::Qualified,
            Node::Name(_) => NodeKind::Name,
            Node::Label(_) => NodeKind::Label,
            Node::Positional(_) => NodeKind::Positional,
            Node::GroupRef(_) => NodeKind::GroupRef,
            Node::Manifold(_) => NodeKind::Manifold,
        }
    }

    /// The nested sequence of a sequence-valued node.
    pub fn sequence(&self) -> Option<&Sequence> {
        match self {
            Node::List(s) | Node::Nest(s) | Node::Composon(s) | Node::Deref(s) | Node::Path(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    pub fn sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Node::List(s) | Node::Nest(s) | Node::Composon(s) | Node::Deref(s) | Node::Path(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    /// The pair of a pair-valued node.
    pub fn as_couplet(&self) -> Option<&Couplet> {
        match self {
            Node::Couplet(c) | Node::Qualified(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_couplet_mut(&mut self) -> Option<&mut Couplet> {
        match self {
            Node::Couplet(c) | Node::Qualified(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_manifold(&self) -> bool {
        matches!(self, Node::Manifold(_))
    }

    /// Rebuild this node's pair-valued variant around a new pair.
    /// Returns `None` for non-pair nodes.
    pub(crate) fn with_couplet(&self, pair: Couplet) -> Option<Node> {
        match self {
            Node::Couplet(_) => Some(Node::Couplet(Box::new(pair))),
            Node::Qualified(_) => Some(Node::Qualified(Box::new(pair))),
            _ => None,
        }
    }
}
