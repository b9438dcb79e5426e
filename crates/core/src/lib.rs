//! # Weft Core - Tree Traversal and Name Resolution
//!
//! This crate provides the middle layer of the weft front end:
//!
//! - **Nodes**: The heterogeneous syntax tree — sequences, couplets,
//!   manifolds, and the rest of the node kinds
//! - **Recursion rules**: Pluggable policies deciding which branches a
//!   traversal descends into
//! - **Criteria**: Predicates and state-advance functions the combinators
//!   are parameterized over
//! - **Traversals**: The combinator library — recursive filters, in-place
//!   modifiers, cross products, zips, and stateful walks
//! - **Tables**: Scoped symbol tables mirroring the tree's shape, with
//!   path-qualified lookup and composition I/O extraction
//! - **Errors**: First-class structural failures
//!
//! ## Design Philosophy
//!
//! "Traversal-first" means the passes of the front end never hand-roll
//! recursion. Each pass is a criterion plus a recursion rule handed to a
//! generic combinator, so the walking logic is written once, inspected
//! once, and shared by every pass.

pub mod criteria;
pub mod error;
pub mod node;
pub mod recurse;
pub mod table;
pub mod traverse;

// Re-export key types at crate root for convenience
pub use error::WeftError;
pub use node::{Couplet, GroupRef, Label, Manifold, Node, NodeKind, Sequence};
pub use recurse::{Composition, Full, Most, Never, PathAware, Recurse, RecurseWith};
pub use table::{Entry, EntryKind, EntryValue, Id, Path, Selection, Table};
