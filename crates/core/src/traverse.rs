//! # Traversal Combinators
//!
//! The generic engine every compiler pass is built on. All combinators are
//! depth-first, left-to-right, synchronous, and run to completion before
//! returning. They split into two families with different contracts:
//!
//! - **Filters** ([`rfilter`], [`prfilter`], [`flatten`], ...) collect
//!   isolated clones of qualifying nodes into a new [`Sequence`]; the input
//!   tree is never touched. A node and its descendants may both appear when
//!   both satisfy the criterion; order is pre-order.
//! - **Modifiers** ([`rcmod`], [`prmod`], [`reduce_mod`], the cross-product
//!   and zip families) mutate the caller-owned tree in place and produce no
//!   new sequence (except for the threaded accumulators of [`scrap`] and
//!   [`zip_fold`]).
//!
//! Recursion policy always comes from the caller as a [`Recurse`] /
//! [`RecurseWith`] rule; criteria, mutations and state advances are plain
//! closures. No combinator keeps hidden state between calls.

use crate::criteria::{is_manifold, is_qualified, keep_all};
use crate::error::WeftError;
use crate::node::{Node, Sequence};
use crate::recurse::{Most, Never, Recurse, RecurseWith};

// ============================================================================
// Filter family
// ============================================================================

/// Recursive filter: collect a clone of every node satisfying `keep`,
/// in pre-order, descending wherever `rule` allows.
pub fn rfilter<R, C>(seq: &Sequence, rule: &R, keep: C) -> Sequence
where
    R: Recurse + ?Sized,
    C: Fn(&Node) -> bool,
{
    fn go<R, C>(seq: &Sequence, rule: &R, keep: &C, out: &mut Sequence)
    where
        R: Recurse + ?Sized,
        C: Fn(&Node) -> bool,
    {
        for node in seq {
            if keep(node) {
                out.push(node.clone());
            }
            for child in rule.children(node) {
                go(child, rule, keep, out);
            }
        }
    }

    let mut out = Sequence::new();
    go(seq, rule, &keep, &mut out);
    out
}

/// Non-recursive filter over the top level only.
pub fn filter<C>(seq: &Sequence, keep: C) -> Sequence
where
    C: Fn(&Node) -> bool,
{
    rfilter(seq, &Never, keep)
}

/// Linearize a tree into its pre-order node sequence under `rule`.
/// With [`crate::recurse::Never`] this is the identity (as a copy).
pub fn flatten<R>(seq: &Sequence, rule: &R) -> Sequence
where
    R: Recurse + ?Sized,
{
    rfilter(seq, rule, keep_all)
}

/// Non-recursive parameterized filter.
pub fn pfilter<C>(seq: &Sequence, state: &Node, keep: C) -> Sequence
where
    C: Fn(&Node, &Node) -> bool,
{
    seq.iter().filter(|n| keep(n, state)).cloned().collect()
}

/// Parameterized recursive filter: like [`rfilter`], but the rule and the
/// criterion see a state node, transformed by `nextval` before each
/// descent. This is how scope-sensitive lookups thread the current binding
/// through recursion without global state. A `None` from `nextval` stops
/// the descent at that point.
pub fn prfilter<R, C, N>(seq: &Sequence, state: &Node, rule: &R, keep: C, nextval: N) -> Sequence
where
    R: RecurseWith + ?Sized,
    C: Fn(&Node, &Node) -> bool,
    N: Fn(&Node, &Node) -> Option<Node>,
{
    fn go<R, C, N>(seq: &Sequence, state: &Node, rule: &R, keep: &C, nextval: &N, out: &mut Sequence)
    where
        R: RecurseWith + ?Sized,
        C: Fn(&Node, &Node) -> bool,
        N: Fn(&Node, &Node) -> Option<Node>,
    {
        for node in seq {
            if keep(node, state) {
                out.push(node.clone());
            }
            if let Some(next) = nextval(node, state) {
                for child in rule.children_with(node, state) {
                    go(child, &next, rule, keep, nextval, out);
                }
            }
        }
    }

    let mut out = Sequence::new();
    go(seq, state, rule, &keep, &nextval, &mut out);
    out
}

// ============================================================================
// Modify family
// ============================================================================

/// Apply `mutate` to every node at the top level.
pub fn mod_each<M>(seq: &mut Sequence, mut mutate: M)
where
    M: FnMut(&mut Node),
{
    for node in seq.iter_mut() {
        mutate(node);
    }
}

/// Recursive conditional modify: apply `mutate` in place to every node
/// satisfying `keep`, descending wherever `rule` allows.
pub fn rcmod<R, C, M>(seq: &mut Sequence, rule: &R, keep: C, mut mutate: M)
where
    R: Recurse + ?Sized,
    C: Fn(&Node) -> bool,
    M: FnMut(&mut Node),
{
    fn go<R, C, M>(seq: &mut Sequence, rule: &R, keep: &C, mutate: &mut M)
    where
        R: Recurse + ?Sized,
        C: Fn(&Node) -> bool,
        M: FnMut(&mut Node),
    {
        for node in seq.iter_mut() {
            if keep(node) {
                mutate(node);
            }
            for child in rule.children_mut(node) {
                go(child, rule, keep, mutate);
            }
        }
    }

    go(seq, rule, &keep, &mut mutate);
}

/// Parameterized recursive modify: the traversal shape of [`prfilter`],
/// applying `mutate` destructively instead of collecting.
pub fn prmod<R, C, M, N>(seq: &mut Sequence, state: &Node, rule: &R, keep: C, mut mutate: M, nextval: N)
where
    R: RecurseWith + ?Sized,
    C: Fn(&Node, &Node) -> bool,
    M: FnMut(&mut Node, &Node),
    N: Fn(&Node, &Node) -> Option<Node>,
{
    fn go<R, C, M, N>(
        seq: &mut Sequence,
        state: &Node,
        rule: &R,
        keep: &C,
        mutate: &mut M,
        nextval: &N,
    ) where
        R: RecurseWith + ?Sized,
        C: Fn(&Node, &Node) -> bool,
        M: FnMut(&mut Node, &Node),
        N: Fn(&Node, &Node) -> Option<Node>,
    {
        for node in seq.iter_mut() {
            if keep(node, state) {
                mutate(node, state);
            }
            if let Some(next) = nextval(node, state) {
                for child in rule.children_with_mut(node, state) {
                    go(child, &next, rule, keep, mutate, nextval);
                }
            }
        }
    }

    go(seq, state, rule, &keep, &mut mutate, &nextval);
}

/// Recursive modify in the context of a reference sequence (e.g. a symbol
/// table rendered as nodes): `mutate` sees each qualifying node together
/// with `context`.
pub fn ref_rmod<R, C, M>(seq: &mut Sequence, context: &Sequence, rule: &R, keep: C, mut mutate: M)
where
    R: Recurse + ?Sized,
    C: Fn(&Node) -> bool,
    M: FnMut(&mut Node, &Sequence),
{
    rcmod(seq, rule, keep, |node| mutate(node, context));
}

/// Map a parameterized modify over a parameter sequence: `pmod` runs once
/// per parameter, in order, over the same tree.
pub fn map_pmod<M>(seq: &mut Sequence, params: &Sequence, mut pmod: M)
where
    M: FnMut(&mut Sequence, &Node),
{
    for p in params {
        pmod(seq, p);
    }
}

/// Recursive reduce-modify: flatten once under `rule`, partition by the
/// two criteria, and apply `mutate` across the Cartesian product of the
/// partitions. The left side is mutated in place; the right side is a
/// pre-mutation snapshot of the qualifying nodes.
///
/// This is the quadratic combinator that wires every candidate producer to
/// every candidate consumer before a later pass narrows the pairing down.
pub fn reduce_mod<R, L, Rt, M>(seq: &mut Sequence, rule: &R, left: L, right: Rt, mut mutate: M)
where
    R: Recurse + ?Sized,
    L: Fn(&Node) -> bool,
    Rt: Fn(&Node) -> bool,
    M: FnMut(&mut Node, &Node),
{
    let rights = rfilter(seq, rule, right);
    rcmod(seq, rule, left, |l| {
        for r in &rights {
            mutate(l, r);
        }
    });
}

// ============================================================================
// Cross-product and zip family
// ============================================================================

/// Apply `mutate` to every ordered pair drawn one from each sequence.
/// Quadratic; the first operand is mutated in place.
pub fn mod2<M>(xs: &mut Sequence, ys: &Sequence, mut mutate: M)
where
    M: FnMut(&mut Node, &Node),
{
    for x in xs.iter_mut() {
        for y in ys {
            mutate(x, y);
        }
    }
}

/// Apply `mutate` to every ordered triple. Cubic.
pub fn mod3<M>(xs: &mut Sequence, ys: &Sequence, zs: &Sequence, mut mutate: M)
where
    M: FnMut(&mut Node, &Node, &Node),
{
    for x in xs.iter_mut() {
        for y in ys {
            for z in zs {
                mutate(x, y, z);
            }
        }
    }
}

/// Apply `mutate(x_i, y_i)` for each index. Sequences of unequal length
/// are a fatal error; no partial zip is permitted.
pub fn zip_mod<M>(xs: &mut Sequence, ys: &Sequence, mut mutate: M) -> Result<(), WeftError>
where
    M: FnMut(&mut Node, &Node),
{
    if xs.len() != ys.len() {
        return Err(WeftError::ZipLength {
            left: xs.len(),
            right: ys.len(),
        });
    }
    for (x, y) in xs.iter_mut().zip(ys) {
        mutate(x, y);
    }
    Ok(())
}

/// Stateful zipped apply: thread an accumulator through each index pair,
/// in order, and return the final state. Length mismatch is fatal.
pub fn zip_fold<S, F>(xs: &Sequence, ys: &Sequence, init: S, mut fold: F) -> Result<S, WeftError>
where
    F: FnMut(&Node, &Node, S) -> S,
{
    if xs.len() != ys.len() {
        return Err(WeftError::ZipLength {
            left: xs.len(),
            right: ys.len(),
        });
    }
    let mut state = init;
    for (x, y) in xs.iter().zip(ys) {
        state = fold(x, y, state);
    }
    Ok(state)
}

/// Stateful conditional recursive apply: depth-first traversal threading
/// one accumulator through every qualifying node exactly once, in
/// traversal order. The node is mutable, so numbering and context-building
/// passes can write back while they fold.
pub fn scrap<R, C, S, M>(seq: &mut Sequence, init: S, rule: &R, keep: C, mut mutate: M) -> S
where
    R: Recurse + ?Sized,
    C: Fn(&Node) -> bool,
    M: FnMut(&mut Node, S) -> S,
{
    fn go<R, C, S, M>(seq: &mut Sequence, mut state: S, rule: &R, keep: &C, mutate: &mut M) -> S
    where
        R: Recurse + ?Sized,
        C: Fn(&Node) -> bool,
        M: FnMut(&mut Node, S) -> S,
    {
        for node in seq.iter_mut() {
            if keep(node) {
                state = mutate(node, state);
            }
            for child in rule.children_mut(node) {
                state = go(child, state, rule, keep, mutate);
            }
        }
        state
    }

    go(seq, init, rule, &keep, &mut mutate)
}

// ============================================================================
// Filtered cross-product conveniences
// ============================================================================

/// Filter `top` by `xfilter`, then apply `mutate` to each result.
/// Structural mutation stays on the derived copies; manifold payloads are
/// shared, so wiring written through the copies lands in the tree.
pub fn filter_mod<FX, M>(top: &Sequence, xfilter: FX, mutate: M)
where
    FX: Fn(&Sequence) -> Sequence,
    M: FnMut(&mut Node),
{
    let mut xs = xfilter(top);
    mod_each(&mut xs, mutate);
}

/// Filter `top` independently by two filters, then apply the 2-ary
/// cross-product combinator over the results.
pub fn filter_2mod<FX, FY, M>(top: &Sequence, xfilter: FX, yfilter: FY, mutate: M)
where
    FX: Fn(&Sequence) -> Sequence,
    FY: Fn(&Sequence) -> Sequence,
    M: FnMut(&mut Node, &Node),
{
    let mut xs = xfilter(top);
    let ys = yfilter(top);
    mod2(&mut xs, &ys, mutate);
}

/// Filter `top` independently by three filters, then apply the 3-ary
/// cross-product combinator over the results.
pub fn filter_3mod<FX, FY, FZ, M>(top: &Sequence, xfilter: FX, yfilter: FY, zfilter: FZ, mutate: M)
where
    FX: Fn(&Sequence) -> Sequence,
    FY: Fn(&Sequence) -> Sequence,
    FZ: Fn(&Sequence) -> Sequence,
    M: FnMut(&mut Node, &Node, &Node),
{
    let mut xs = xfilter(top);
    let ys = yfilter(top);
    let zs = zfilter(top);
    mod3(&mut xs, &ys, &zs, mutate);
}

// ============================================================================
// Splits
// ============================================================================

/// Map a one-to-many transform over a sequence and concatenate the results
/// in order. The flattening is the point: the output is `[b]`, not `[[b]]`.
pub fn map_split<F>(seq: &Sequence, split: F) -> Result<Sequence, WeftError>
where
    F: Fn(&Node) -> Result<Sequence, WeftError>,
{
    let mut out = Sequence::new();
    for node in seq {
        out.append(split(node)?);
    }
    Ok(out)
}

/// Turn one couplet into a sequence of couplets, each with a single
/// left-hand side.
///
/// A list-shaped left-hand side produces one couplet per alternative, each
/// an isolated copy with that alternative substituted in. A couplet whose
/// left-hand side is already singular (path, label, or name) passes
/// through unchanged. Any other shape is a fatal construction error.
pub fn split_couplet(node: &Node) -> Result<Sequence, WeftError> {
    let Some(pair) = node.as_couplet() else {
        return Err(WeftError::ExpectedCouplet { kind: node.kind() });
    };
    match &pair.lhs {
        Node::List(alternatives) => {
            let mut out = Sequence::new();
            for alt in alternatives {
                let mut single = pair.clone();
                single.lhs = alt.clone();
                // with_couplet cannot fail here: node is pair-valued
                if let Some(n) = node.with_couplet(single) {
                    out.push(n);
                }
            }
            Ok(out)
        }
        Node::Path(_) | Node::Label(_) | Node::Name(_) => Ok(Sequence::single(node.clone())),
        other => Err(WeftError::InvalidCoupletLhs { kind: other.kind() }),
    }
}

// ============================================================================
// Access-layer conveniences
// ============================================================================

/// All manifold nodes of a tree, with manifold bindings treated as leaves.
pub fn manifolds(seq: &Sequence) -> Sequence {
    rfilter(seq, &Most, is_manifold)
}

/// All top-level qualified path nodes.
pub fn qualified_paths(seq: &Sequence) -> Sequence {
    filter(seq, is_qualified)
}
