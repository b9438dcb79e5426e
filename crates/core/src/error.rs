//! # Error Types
//!
//! Fatal errors are typed values, never process aborts: every fallible
//! operation returns a `Result` and the driving pass decides whether to
//! stop the compilation. Anything the compiler can limp past — unresolved
//! group references, uncomparable list-shaped left-hand sides — is not an
//! error at all; it is reported through `tracing` and contributes nothing
//! to the result, leaving the gap for a later pass.

use thiserror::Error;

use crate::node::NodeKind;
use crate::table::EntryKind;

/// Fatal errors of the weft front-end core.
///
/// Each variant marks a structurally malformed tree that no recovery
/// policy can safely continue past.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeftError {
    /// Zipped apply over sequences of unequal length. No partial zip is
    /// permitted.
    #[error("zipped apply over unequal sequences: {left} vs {right} nodes")]
    ZipLength { left: usize, right: usize },

    /// An operation that consumes a couplet was handed something else.
    #[error("expected a couplet, got {kind}")]
    ExpectedCouplet { kind: NodeKind },

    /// A couplet's left-hand side has a shape that cannot qualify a
    /// binding (not a path, label, name, or list of those).
    #[error("invalid couplet left-hand side: {kind}")]
    InvalidCoupletLhs { kind: NodeKind },

    /// Composition input/output extraction requires a composon or nest
    /// entry.
    #[error("composition I/O requires a composon or nest entry, got {kind}")]
    NotComposon { kind: EntryKind },
}
