//! Graph equivalence up to blank-node renaming
//!
//! Two graphs are equivalent when some bijection over the blank nodes of
//! one makes the triple multisets identical; every non-blank term must
//! match literally. Ground triples (no blank nodes) are compared as
//! multisets up front, then a backtracking search assigns blank nodes,
//! pruning candidates whose position-usage fingerprints differ.
//!
//! Worst-case cost is exponential in the number of blank nodes. The
//! graphs this crate deals in carry a handful of blank nodes, where the
//! fingerprint pruning makes the search terminate quickly; do not feed
//! this adversarially sized inputs. Callers that need bounded latency
//! must bound input size externally.

use std::collections::HashMap;

use crate::graph::Graph;
use crate::term::{BlankId, Term};
use crate::triple::Triple;

/// Check two graphs for equivalence up to blank-node renaming.
pub fn isomorphic(a: &Graph, b: &Graph) -> bool {
    isomorphic_triples(a.triples(), b.triples())
}

/// Positional comparison: the two triple sequences must be identical,
/// with no renaming. Used where exact emission order is part of the
/// contract.
pub fn ordered_eq(a: &Graph, b: &Graph) -> bool {
    a.triples() == b.triples()
}

/// Check two triple multisets for equivalence up to blank-node renaming.
pub fn isomorphic_triples(left: &[Triple], right: &[Triple]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let (left_ground, left_blank): (Vec<&Triple>, Vec<&Triple>) =
        left.iter().partition(|t| !has_blank(t));
    let (right_ground, right_blank): (Vec<&Triple>, Vec<&Triple>) =
        right.iter().partition(|t| !has_blank(t));

    if left_blank.len() != right_blank.len() {
        return false;
    }

    // Ground triples must match as multisets, no renaming involved.
    if !multiset_eq(&left_ground, &right_ground) {
        return false;
    }

    if left_blank.is_empty() {
        return true;
    }

    // Fingerprints prune the mapping search: a blank node can only map to
    // one used the same number of times in each position.
    let left_prints = fingerprints(&left_blank);
    let right_prints = fingerprints(&right_blank);
    if left_prints.len() != right_prints.len() {
        return false;
    }
    let mut left_counts: Vec<_> = left_prints.values().collect();
    let mut right_counts: Vec<_> = right_prints.values().collect();
    left_counts.sort();
    right_counts.sort();
    if left_counts != right_counts {
        return false;
    }

    let mut mapping = Mapping::default();
    let mut used = vec![false; right_blank.len()];
    match_triples(
        &left_blank,
        &right_blank,
        0,
        &mut mapping,
        &mut used,
        &left_prints,
        &right_prints,
    )
}

/// Position-usage counts for one blank node: (subject, predicate, object).
type Fingerprint = (usize, usize, usize);

#[derive(Clone, Default)]
struct Mapping {
    forward: HashMap<BlankId, BlankId>,
    reverse: HashMap<BlankId, BlankId>,
}

fn has_blank(triple: &Triple) -> bool {
    triple.subject.is_blank() || triple.predicate.is_blank() || triple.object.is_blank()
}

fn multiset_eq(left: &[&Triple], right: &[&Triple]) -> bool {
    let mut counts: HashMap<&Triple, i64> = HashMap::new();
    for &t in left {
        *counts.entry(t).or_insert(0) += 1;
    }
    for &t in right {
        *counts.entry(t).or_insert(0) -= 1;
    }
    counts.values().all(|&c| c == 0)
}

fn fingerprints(triples: &[&Triple]) -> HashMap<BlankId, Fingerprint> {
    let mut prints: HashMap<BlankId, Fingerprint> = HashMap::new();
    for &t in triples {
        if let Term::Blank(id) = &t.subject {
            prints.entry(id.clone()).or_default().0 += 1;
        }
        if let Term::Blank(id) = &t.predicate {
            prints.entry(id.clone()).or_default().1 += 1;
        }
        if let Term::Blank(id) = &t.object {
            prints.entry(id.clone()).or_default().2 += 1;
        }
    }
    prints
}

/// Match left triples to unused right triples with backtracking, keeping
/// the blank-node mapping consistent and bijective.
fn match_triples(
    left: &[&Triple],
    right: &[&Triple],
    index: usize,
    mapping: &mut Mapping,
    used: &mut [bool],
    left_prints: &HashMap<BlankId, Fingerprint>,
    right_prints: &HashMap<BlankId, Fingerprint>,
) -> bool {
    if index >= left.len() {
        return true;
    }

    let candidate = left[index];
    for (i, target) in right.iter().copied().enumerate() {
        if used[i] {
            continue;
        }

        let saved = mapping.clone();
        if triple_matches(candidate, target, mapping, left_prints, right_prints) {
            used[i] = true;
            if match_triples(left, right, index + 1, mapping, used, left_prints, right_prints) {
                return true;
            }
            used[i] = false;
        }
        *mapping = saved;
    }

    false
}

fn triple_matches(
    left: &Triple,
    right: &Triple,
    mapping: &mut Mapping,
    left_prints: &HashMap<BlankId, Fingerprint>,
    right_prints: &HashMap<BlankId, Fingerprint>,
) -> bool {
    terms_match(&left.subject, &right.subject, mapping, left_prints, right_prints)
        && terms_match(
            &left.predicate,
            &right.predicate,
            mapping,
            left_prints,
            right_prints,
        )
        && terms_match(&left.object, &right.object, mapping, left_prints, right_prints)
}

fn terms_match(
    left: &Term,
    right: &Term,
    mapping: &mut Mapping,
    left_prints: &HashMap<BlankId, Fingerprint>,
    right_prints: &HashMap<BlankId, Fingerprint>,
) -> bool {
    match (left, right) {
        (Term::Blank(l), Term::Blank(r)) => {
            if let Some(mapped) = mapping.forward.get(l) {
                return mapped == r;
            }
            if mapping.reverse.contains_key(r) {
                return false;
            }
            if left_prints.get(l) != right_prints.get(r) {
                return false;
            }
            mapping.forward.insert(l.clone(), r.clone());
            mapping.reverse.insert(r.clone(), l.clone());
            true
        }
        (Term::Blank(_), _) | (_, Term::Blank(_)) => false,
        (l, r) => l == r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Literal;

    fn iri(s: &str) -> Term {
        Term::iri(s).unwrap()
    }

    fn add(graph: &mut Graph, s: Term, p: Term, o: Term) {
        graph.add(Triple::new(s, p, o).unwrap());
    }

    #[test]
    fn test_ground_graphs_compare_as_multisets() {
        let mut a = Graph::new();
        let mut b = Graph::new();

        add(&mut a, iri("http://e/s"), iri("http://e/p"), Term::literal("1"));
        add(&mut a, iri("http://e/s"), iri("http://e/p"), Term::literal("2"));

        // Same triples, reversed insertion order
        add(&mut b, iri("http://e/s"), iri("http://e/p"), Term::literal("2"));
        add(&mut b, iri("http://e/s"), iri("http://e/p"), Term::literal("1"));

        assert!(isomorphic(&a, &b));
        assert!(!ordered_eq(&a, &b));
    }

    #[test]
    fn test_blank_nodes_match_up_to_renaming() {
        let mut a = Graph::new();
        let mut b = Graph::new();

        add(&mut a, Term::blank("x"), iri("http://e/p"), Term::literal("v"));
        add(&mut b, Term::blank("y"), iri("http://e/p"), Term::literal("v"));

        assert!(isomorphic(&a, &b));
    }

    #[test]
    fn test_mapping_must_be_consistent() {
        let mut a = Graph::new();
        let mut b = Graph::new();

        // One shared blank node on the left...
        add(&mut a, Term::blank("x"), iri("http://e/p"), Term::literal("1"));
        add(&mut a, Term::blank("x"), iri("http://e/q"), Term::literal("2"));

        // ...two distinct ones on the right.
        add(&mut b, Term::blank("y"), iri("http://e/p"), Term::literal("1"));
        add(&mut b, Term::blank("z"), iri("http://e/q"), Term::literal("2"));

        assert!(!isomorphic(&a, &b));
    }

    #[test]
    fn test_mapping_must_be_bijective() {
        let mut a = Graph::new();
        let mut b = Graph::new();

        add(&mut a, Term::blank("x"), iri("http://e/p"), Term::literal("1"));
        add(&mut a, Term::blank("y"), iri("http://e/p"), Term::literal("1"));

        add(&mut b, Term::blank("z"), iri("http://e/p"), Term::literal("1"));
        add(&mut b, Term::blank("z"), iri("http://e/p"), Term::literal("1"));

        assert!(!isomorphic(&a, &b));
    }

    #[test]
    fn test_chain_renaming() {
        // A two-cell list chain with shifted labels
        let first = iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#first");
        let rest = iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest");
        let nil = iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");

        let mut a = Graph::new();
        add(&mut a, Term::blank("b0"), first.clone(), Term::literal("a"));
        add(&mut a, Term::blank("b0"), rest.clone(), Term::blank("b1"));
        add(&mut a, Term::blank("b1"), first.clone(), Term::literal("b"));
        add(&mut a, Term::blank("b1"), rest.clone(), nil.clone());

        let mut b = Graph::new();
        add(&mut b, Term::blank("c9"), first.clone(), Term::literal("b"));
        add(&mut b, Term::blank("c9"), rest.clone(), nil.clone());
        add(&mut b, Term::blank("c3"), first.clone(), Term::literal("a"));
        add(&mut b, Term::blank("c3"), rest.clone(), Term::blank("c9"));

        assert!(isomorphic(&a, &b));
    }

    #[test]
    fn test_ground_term_mismatch() {
        let mut a = Graph::new();
        let mut b = Graph::new();

        add(&mut a, Term::blank("x"), iri("http://e/p"), Term::literal("v"));
        add(&mut b, Term::blank("x"), iri("http://e/OTHER"), Term::literal("v"));

        assert!(!isomorphic(&a, &b));
    }

    #[test]
    fn test_literal_details_must_match() {
        let dt = crate::iri::IriRef::new("http://www.w3.org/2001/XMLSchema#integer").unwrap();
        let mut a = Graph::new();
        let mut b = Graph::new();

        add(
            &mut a,
            iri("http://e/s"),
            iri("http://e/p"),
            Term::Literal(Literal::typed("1", dt).unwrap()),
        );
        add(&mut b, iri("http://e/s"), iri("http://e/p"), Term::literal("1"));

        assert!(!isomorphic(&a, &b));
    }

    #[test]
    fn test_size_mismatch() {
        let mut a = Graph::new();
        let b = Graph::new();
        add(&mut a, iri("http://e/s"), iri("http://e/p"), Term::literal("v"));
        assert!(!isomorphic(&a, &b));
    }
}
