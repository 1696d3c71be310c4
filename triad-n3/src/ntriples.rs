//! NTriples output.
//!
//! NTriples is the ground subset of the N3 grammar, and the canonical
//! text form used by round-trip tests: one `<s> <p> o .` line per
//! triple, with `\" \\ \n \r \t` and `\uXXXX`/`\UXXXXXXXX` escaping in
//! literals. Reading NTriples back is just parsing it as N3.

use triad_graph::{Graph, Triple};

/// Write one triple as an NTriples line (no trailing newline).
pub fn write_triple(triple: &Triple) -> String {
    triple.to_ntriples()
}

/// Write a whole graph as NTriples text, one line per triple in
/// insertion order.
pub fn write_graph(graph: &Graph) -> String {
    let mut out = String::new();
    for triple in graph.iter() {
        out.push_str(&triple.to_ntriples());
        out.push('\n');
    }
    out
}
