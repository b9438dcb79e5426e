//! Composition Wiring - Traversals and Scoped Lookup
//!
//! Run with: cargo run --example composition_wiring
//!
//! This example demonstrates:
//! - Building a small tree (bindings plus a composition)
//! - Extracting manifolds with a recursive filter
//! - Wiring input names into manifolds in place
//! - Building a symbol table and resolving a qualified path
//! - Pulling the inputs and outputs of a composition stage

use weft_core::table::{composon_inputs, composon_outputs};
use weft_core::traverse::{manifolds, scrap};
use weft_core::{
    Composition, Entry, EntryKind, Id, Manifold, Node, Path, Sequence, Table,
};

fn main() -> Result<(), weft_core::WeftError> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== Composition Wiring ===\n");

    // -------------------------------------------------------------------------
    // Building a Tree
    // -------------------------------------------------------------------------
    println!("1. Building a Tree");
    println!("-------------------");

    // main :: grep . sort, with grep and sort bound below main
    let grep = Manifold::named("grep");
    let sort = Manifold::named("sort");

    let mut stage_a = Sequence::single(Node::Manifold(grep.clone()));
    stage_a.push(Node::positional("'^fn '"));
    let stage_b = Sequence::single(Node::Manifold(sort.clone()));

    let mut pipeline = Sequence::single(Node::Composon(stage_a));
    pipeline.push(Node::Composon(stage_b));

    let tree = Sequence::single(Node::couplet(
        Node::name("main"),
        Node::Nest(pipeline),
    ));
    println!("tree has {} top-level nodes\n", tree.len());

    // -------------------------------------------------------------------------
    // Recursive Filtering
    // -------------------------------------------------------------------------
    println!("2. Extracting Manifolds");
    println!("------------------------");

    let body = tree
        .head()
        .and_then(Node::as_couplet)
        .and_then(|pair| pair.rhs.sequence())
        .unwrap_or_else(|| unreachable!("main is bound to a nest"));
    let found = manifolds(body);
    println!("composition uses {} manifolds", found.len());

    // -------------------------------------------------------------------------
    // In-Place Wiring
    // -------------------------------------------------------------------------
    println!("\n3. Wiring Inputs");
    println!("-----------------");

    // number every manifold in composition order; the filtered views share
    // payloads with the tree, so the wiring lands in the original
    let mut numbered = found;
    let total = scrap(
        &mut numbered,
        0usize,
        &Composition,
        |n: &Node| n.is_manifold(),
        |node, n| {
            if let Node::Manifold(m) = node {
                m.add_input(format!("${n}"));
            }
            n + 1
        },
    );
    println!("wired {total} inputs");
    println!("grep now reads from: {:?}", grep.inputs());

    // -------------------------------------------------------------------------
    // Symbol Tables
    // -------------------------------------------------------------------------
    println!("\n4. Scoped Lookup");
    println!("-----------------");

    let mut scope = Table::new(Entry::manifold(Id::new("grep"), grep));
    scope.add(Entry::manifold(Id::new("sort"), sort));
    let table = Table::new(Entry::path(Id::new("main"), scope));
    print!("{table}");

    let hits = table.path_get(&Path::from_names(["main", "grep"]), EntryKind::Manifold);
    println!("main.grep resolves to {} entry(ies)", hits.len());

    // -------------------------------------------------------------------------
    // Composition I/O
    // -------------------------------------------------------------------------
    println!("\n5. Composition I/O");
    println!("-------------------");

    let mut stage = Table::new(Entry::manifold(None, Manifold::named("uniq")));
    stage.add(Entry::positional("-c"));
    let stage = Entry::composon(stage);

    let inputs = composon_inputs(&stage)?;
    let outputs = composon_outputs(&stage)?;
    println!("stage consumes {} and produces {}", inputs.len(), outputs.len());

    Ok(())
}
