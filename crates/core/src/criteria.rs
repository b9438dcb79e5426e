//! # Criteria and State-Advance Functions
//!
//! Small plug-ins for the traversal combinators:
//!
//! - **Criteria** are plain predicates over nodes, used as the `keep`
//!   argument of the filter family. Most are kind-membership tests;
//!   [`keep_all`] turns a filter into a flatten.
//! - **Nextval** functions compute the next state threaded through a
//!   parameterized traversal, given the node being descended through and
//!   the current state. Returning `None` means the state cannot advance
//!   and the descent stops there.

use tracing::warn;

use crate::node::{Node, Sequence};

// ============================================================================
// Criteria
// ============================================================================

/// Accepts everything. `rfilter` with this criterion is a flatten.
pub fn keep_all(_node: &Node) -> bool {
    true
}

pub fn is_manifold(node: &Node) -> bool {
    matches!(node, Node::Manifold(_))
}

pub fn is_composon(node: &Node) -> bool {
    matches!(node, Node::Composon(_))
}

pub fn is_nest(node: &Node) -> bool {
    matches!(node, Node::Nest(_))
}

pub fn is_couplet(node: &Node) -> bool {
    matches!(node, Node::Couplet(_))
}

pub fn is_name(node: &Node) -> bool {
    matches!(node, Node::Name(_))
}

/// A qualified path node (a named composition branch).
pub fn is_qualified(node: &Node) -> bool {
    matches!(node, Node::Qualified(_))
}

pub fn is_group_ref(node: &Node) -> bool {
    matches!(node, Node::GroupRef(_))
}

// ============================================================================
// Nextval functions
// ============================================================================

/// State is invariant across recursion.
pub fn nextval_never(_node: &Node, state: &Node) -> Option<Node> {
    Some(state.clone())
}

/// The state is a run of qualifier segments; advancing pops the front one.
/// An exhausted or segment-less state cannot advance.
pub fn nextval_always(_node: &Node, state: &Node) -> Option<Node> {
    match state {
        Node::Path(s) if !s.is_empty() => Some(Node::Path(s.rest())),
        Node::List(s) if !s.is_empty() => Some(Node::List(s.rest())),
        _ => None,
    }
}

/// Consume one level of qualification when descending a qualified path.
///
/// The state is the couplet being resolved. While its left-hand path still
/// has more than one segment and the descent passes through a qualified
/// node, the head segment is stripped; once a single segment remains, the
/// state rides along unchanged. A list-shaped left-hand side (alternatives
/// not yet split apart) is unsupported here and yields no advance.
pub fn nextval_ifpath(node: &Node, state: &Node) -> Option<Node> {
    let Some(pair) = state.as_couplet() else {
        return Some(state.clone());
    };
    let remaining = pair.lhs.sequence().map_or(0, Sequence::len);
    if !matches!(node, Node::Qualified(_)) || remaining <= 1 {
        return Some(state.clone());
    }
    match &pair.lhs {
        Node::Path(segments) => {
            let mut advanced = pair.clone();
            advanced.lhs = Node::Path(segments.rest());
            state.with_couplet(advanced)
        }
        Node::List(_) => {
            warn!("cannot advance a list-shaped left-hand side through a qualified path");
            None
        }
        _ => None,
    }
}
