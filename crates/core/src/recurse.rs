//! # Recursion Rules — which children a traversal may descend into
//!
//! A recursion rule looks at one node and reports the child sequences that
//! are eligible for further traversal. The traversal combinators in
//! [`crate::traverse`] never inspect node kinds themselves — the rule is
//! the whole recursion policy, so the same combinator can linearize a full
//! tree, stop at manifolds, or walk only composition structure.
//!
//! Two flavors exist:
//!
//! - [`Recurse`]: the rule depends on the node alone ([`Never`], [`Full`],
//!   [`Most`], [`Composition`]).
//! - [`RecurseWith`]: the rule additionally sees a state node threaded
//!   through the traversal, e.g. the couplet currently being resolved
//!   ([`PathAware`]). Every plain rule lifts to this flavor by ignoring
//!   the state.
//!
//! Each rule answers in two borrow modes, `children` and `children_mut`,
//! so one policy serves both the filtering and the mutating combinators.

use tracing::warn;

use crate::node::{Couplet, Label, Node, Sequence};

/// A recursion policy over the tree.
pub trait Recurse {
    /// Child sequences of `node` eligible for further traversal.
    fn children<'a>(&self, node: &'a Node) -> Vec<&'a Sequence>;

    /// Mutable flavor of [`Recurse::children`]. Must report the same
    /// branches for the same node.
    fn children_mut<'a>(&self, node: &'a mut Node) -> Vec<&'a mut Sequence>;
}

/// A recursion policy that also sees a traversal state node.
pub trait RecurseWith {
    fn children_with<'a>(&self, node: &'a Node, state: &Node) -> Vec<&'a Sequence>;

    fn children_with_mut<'a>(&self, node: &'a mut Node, state: &Node) -> Vec<&'a mut Sequence>;
}

impl<T: Recurse> RecurseWith for T {
    fn children_with<'a>(&self, node: &'a Node, _state: &Node) -> Vec<&'a Sequence> {
        self.children(node)
    }

    fn children_with_mut<'a>(&self, node: &'a mut Node, _state: &Node) -> Vec<&'a mut Sequence> {
        self.children_mut(node)
    }
}

// ============================================================================
// Plain rules
// ============================================================================

/// Never recurses. Turns any recursive combinator into its flat,
/// single-level variant.
pub struct Never;

impl Recurse for Never {
    fn children<'a>(&self, _node: &'a Node) -> Vec<&'a Sequence> {
        Vec::new()
    }

    fn children_mut<'a>(&self, _node: &'a mut Node) -> Vec<&'a mut Sequence> {
        Vec::new()
    }
}

/// Recurses into every sequence-valued node, and for pair-valued nodes
/// into whichever of the two branches is itself sequence-valued.
pub struct Full;

impl Recurse for Full {
    fn children<'a>(&self, node: &'a Node) -> Vec<&'a Sequence> {
        match node {
            Node::Couplet(c) | Node::Qualified(c) => branch_sequences(c),
            _ => node.sequence().into_iter().collect(),
        }
    }

    fn children_mut<'a>(&self, node: &'a mut Node) -> Vec<&'a mut Sequence> {
        match node {
            Node::Couplet(c) | Node::Qualified(c) => branch_sequences_mut(c),
            _ => node.sequence_mut().into_iter().collect(),
        }
    }
}

/// Like [`Full`], but a couplet with a manifold branch is a leaf:
/// manifold bindings are terminal for most passes.
pub struct Most;

impl Most {
    fn is_leaf(pair: &Couplet) -> bool {
        pair.lhs.is_manifold() || pair.rhs.is_manifold()
    }
}

impl Recurse for Most {
    fn children<'a>(&self, node: &'a Node) -> Vec<&'a Sequence> {
        match node {
            Node::Couplet(c) | Node::Qualified(c) if Self::is_leaf(c) => Vec::new(),
            Node::Couplet(c) | Node::Qualified(c) => branch_sequences(c),
            _ => node.sequence().into_iter().collect(),
        }
    }

    fn children_mut<'a>(&self, node: &'a mut Node) -> Vec<&'a mut Sequence> {
        match node {
            Node::Couplet(c) | Node::Qualified(c) if Self::is_leaf(c) => Vec::new(),
            Node::Couplet(c) | Node::Qualified(c) => branch_sequences_mut(c),
            _ => node.sequence_mut().into_iter().collect(),
        }
    }
}

/// Recurses only through composition structure: composon, nest and deref
/// bodies, and the right-hand remainder of a qualified path.
pub struct Composition;

impl Recurse for Composition {
    fn children<'a>(&self, node: &'a Node) -> Vec<&'a Sequence> {
        match node {
            Node::Composon(s) | Node::Nest(s) | Node::Deref(s) => vec![s],
            Node::Qualified(c) => c.rhs.sequence().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn children_mut<'a>(&self, node: &'a mut Node) -> Vec<&'a mut Sequence> {
        match node {
            Node::Composon(s) | Node::Nest(s) | Node::Deref(s) => vec![s],
            Node::Qualified(c) => c.rhs.sequence_mut().into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

fn branch_sequences(pair: &Couplet) -> Vec<&Sequence> {
    let mut out = Vec::new();
    if let Some(s) = pair.lhs.sequence() {
        out.push(s);
    }
    if let Some(s) = pair.rhs.sequence() {
        out.push(s);
    }
    out
}

fn branch_sequences_mut(pair: &mut Couplet) -> Vec<&mut Sequence> {
    let Couplet { lhs, rhs } = pair;
    let mut out = Vec::new();
    if let Some(s) = lhs.sequence_mut() {
        out.push(s);
    }
    if let Some(s) = rhs.sequence_mut() {
        out.push(s);
    }
    out
}

// ============================================================================
// Path-aware rule
// ============================================================================

/// The scope-shadowing rule used to resolve composition wiring.
///
/// The state node is the couplet being processed. A nest body is always
/// transparent. A qualified path only admits descent while it still claims
/// the branch: either the couplet's qualifier is fully consumed (a single
/// remaining segment), or its label matches the candidate's label. A
/// mismatched name means the binding in scope shadows this branch, so the
/// rule yields nothing.
pub struct PathAware;

impl PathAware {
    fn admits(node: &Node, state: &Node) -> bool {
        let Some(pair) = state.as_couplet() else {
            warn!(kind = %state.kind(), "path-aware recursion expects a couplet state");
            return false;
        };
        let remaining = pair.lhs.sequence().map_or(0, Sequence::len);
        remaining == 1 || cmp_lhs(node, state)
    }
}

impl RecurseWith for PathAware {
    fn children_with<'a>(&self, node: &'a Node, state: &Node) -> Vec<&'a Sequence> {
        match node {
            Node::Nest(s) => vec![s],
            Node::Qualified(c) if Self::admits(node, state) => {
                c.rhs.sequence().into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn children_with_mut<'a>(&self, node: &'a mut Node, state: &Node) -> Vec<&'a mut Sequence> {
        let admit = !matches!(node, Node::Qualified(_)) || Self::admits(node, state);
        match node {
            Node::Nest(s) => vec![s],
            Node::Qualified(c) if admit => c.rhs.sequence_mut().into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Label extraction
// ============================================================================

/// The comparable label of a couplet's left-hand side.
///
/// Bare lists of alternatives carry no single name; recursion through them
/// is unsupported and reported as a diagnostic.
pub fn lhs_label(lhs: &Node) -> Option<Label> {
    match lhs {
        Node::Name(name) => Some(Label::new(name.clone())),
        Node::Label(label) => Some(label.clone()),
        Node::Path(segments) => segments.head().and_then(lhs_label),
        Node::List(_) => {
            warn!("recursion into a list-shaped left-hand side is not supported");
            None
        }
        other => {
            warn!(kind = %other.kind(), "illegal left-hand side");
            None
        }
    }
}

/// Compare the left-hand labels of two pair-valued nodes. Uncomparable
/// sides (anonymous lists, non-couplets) never match.
pub fn cmp_lhs(a: &Node, b: &Node) -> bool {
    let la = a.as_couplet().and_then(|c| lhs_label(&c.lhs));
    let lb = b.as_couplet().and_then(|c| lhs_label(&c.lhs));
    match (la, lb) {
        (Some(la), Some(lb)) => la == lb,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Manifold;

    fn manifold_binding(name: &str) -> Node {
        Node::couplet(Node::name(name), Node::Manifold(Manifold::named(name)))
    }

    #[test]
    fn test_never_yields_nothing() {
        let nest = Node::Nest(Sequence::single(Node::name("x")));
        assert!(Never.children(&nest).is_empty());
    }

    #[test]
    fn test_full_descends_into_sequences_and_branches() {
        let nest = Node::Nest(Sequence::single(Node::name("x")));
        assert_eq!(Full.children(&nest).len(), 1);

        // couplet with a path lhs and a nest rhs: both branches eligible
        let c = Node::couplet(
            Node::Path(Sequence::single(Node::name("a"))),
            Node::Nest(Sequence::new()),
        );
        assert_eq!(Full.children(&c).len(), 2);

        // terminal nodes have no children
        assert!(Full.children(&Node::name("x")).is_empty());
    }

    #[test]
    fn test_most_treats_manifold_bindings_as_leaves() {
        let binding = manifold_binding("f");
        assert!(Most.children(&binding).is_empty());

        // a non-manifold couplet still descends
        let c = Node::couplet(
            Node::Path(Sequence::single(Node::name("a"))),
            Node::Nest(Sequence::new()),
        );
        assert_eq!(Most.children(&c).len(), 2);
    }

    #[test]
    fn test_composition_walks_composition_structure_only() {
        let composon = Node::Composon(Sequence::single(manifold_binding("f")));
        assert_eq!(Composition.children(&composon).len(), 1);

        let qualified = Node::qualified(
            Node::label("x"),
            Node::List(Sequence::single(Node::Composon(Sequence::new()))),
        );
        assert_eq!(Composition.children(&qualified).len(), 1);

        assert!(Composition.children(&Node::name("x")).is_empty());
        assert!(Composition
            .children(&Node::List(Sequence::single(Node::name("x"))))
            .is_empty());
    }

    #[test]
    fn test_path_aware_requires_matching_label() {
        let qualified = Node::qualified(
            Node::label("x"),
            Node::List(Sequence::single(Node::Composon(Sequence::new()))),
        );

        // qualifier x.y, currently at "x": labels match, descend
        let state = Node::couplet(
            Node::Path(vec![Node::name("x"), Node::name("y")].into_iter().collect()),
            Node::Manifold(Manifold::new()),
        );
        assert_eq!(PathAware.children_with(&qualified, &state).len(), 1);

        // qualifier z.y: shadowed, no descent
        let shadowed = Node::couplet(
            Node::Path(vec![Node::name("z"), Node::name("y")].into_iter().collect()),
            Node::Manifold(Manifold::new()),
        );
        assert!(PathAware.children_with(&qualified, &shadowed).is_empty());

        // fully consumed qualifier always descends
        let consumed = Node::couplet(
            Node::Path(Sequence::single(Node::name("z"))),
            Node::Manifold(Manifold::new()),
        );
        assert_eq!(PathAware.children_with(&qualified, &consumed).len(), 1);
    }

    #[test]
    fn test_path_aware_nest_is_transparent() {
        let nest = Node::Nest(Sequence::single(Node::name("x")));
        let state = Node::couplet(
            Node::Path(Sequence::single(Node::name("z"))),
            Node::Manifold(Manifold::new()),
        );
        assert_eq!(PathAware.children_with(&nest, &state).len(), 1);
    }

    #[test]
    fn test_lhs_label_shapes() {
        assert_eq!(lhs_label(&Node::name("x")), Some(Label::new("x")));
        assert_eq!(lhs_label(&Node::label("y")), Some(Label::new("y")));

        let path = Node::Path(vec![Node::name("a"), Node::name("b")].into_iter().collect());
        assert_eq!(lhs_label(&path), Some(Label::new("a")));

        // lists of alternatives are uncomparable
        let list = Node::List(Sequence::single(Node::name("a")));
        assert_eq!(lhs_label(&list), None);
    }

    #[test]
    fn test_cmp_lhs() {
        let a = Node::couplet(Node::name("x"), Node::Nest(Sequence::new()));
        let b = Node::qualified(Node::label("x"), Node::List(Sequence::new()));
        let c = Node::couplet(Node::name("y"), Node::Nest(Sequence::new()));
        assert!(cmp_lhs(&a, &b));
        assert!(!cmp_lhs(&a, &c));
        // uncomparable side never matches
        let anon = Node::couplet(Node::List(Sequence::new()), Node::Nest(Sequence::new()));
        assert!(!cmp_lhs(&a, &anon));
    }
}
