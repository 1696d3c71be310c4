//! End-to-end suite: N3 documents checked against their expected
//! NTriples renderings, using the graph equivalence checker for
//! blank-node-bearing cases and positional comparison elsewhere.

use pretty_assertions::assert_eq;
use triad_graph::iso;
use triad_n3::{ntriples, N3Parser};

const BASE: &str = "http://a/b";

fn parse(input: &str) -> triad_graph::Graph {
    N3Parser::strict()
        .parse(input, BASE)
        .unwrap_or_else(|e| panic!("parse failed for {:?}: {}", input, e))
}

/// Assert that an N3 document and an expected NTriples document describe
/// equivalent graphs (blank nodes matched up to renaming).
fn assert_equivalent(n3: &str, expected_nt: &str) {
    let actual = parse(n3);
    let expected = parse(expected_nt);
    assert!(
        iso::isomorphic(&actual, &expected),
        "graphs not equivalent for {:?}\nactual:\n{}expected:\n{}",
        n3,
        ntriples::write_graph(&actual),
        ntriples::write_graph(&expected),
    );
}

#[test]
fn ntriples_battery_round_trips_exactly() {
    let statements = [
        "<http://example.org/resource1> <http://example.org/property> <http://example.org/resource2> .",
        "<http://example.org/resource7> <http://example.org/property> \"simple literal\" .",
        "<http://example.org/resource8> <http://example.org/property> \"backslash:\\\\\" .",
        "<http://example.org/resource9> <http://example.org/property> \"dquote:\\\"\" .",
        "<http://example.org/resource10> <http://example.org/property> \"newline:\\n\" .",
        "<http://example.org/resource11> <http://example.org/property> \"return:\\r\" .",
        "<http://example.org/resource12> <http://example.org/property> \"tab:\\t\" .",
        "<http://example.org/resource21> <http://example.org/property> \"\"^^<http://www.w3.org/2000/01/rdf-schema#XMLLiteral> .",
        "<http://example.org/resource23> <http://example.org/property> \"\\\"\"^^<http://www.w3.org/2000/01/rdf-schema#XMLLiteral> .",
        "<http://example.org/resource25> <http://example.org/property> \"a <b></b>\"^^<http://www.w3.org/2000/01/rdf-schema#XMLLiteral> .",
        "<http://example.org/resource26> <http://example.org/property> \"a\\n<b></b>\\nc\"^^<http://www.w3.org/2000/01/rdf-schema#XMLLiteral> .",
        "<http://example.org/resource30> <http://example.org/property> \"chat\"@fr .",
        "<http://example.org/resource31> <http://example.org/property> \"chat\"@en .",
        "<http://example.org/resource32> <http://example.org/property> \"abc\"^^<http://example.org/datatype1> .",
    ];

    for statement in statements {
        let graph = parse(statement);
        assert_eq!(graph.len(), 1, "for {:?}", statement);
        assert_eq!(ntriples::write_triple(&graph[0]), statement);
    }
}

#[test]
fn literal_escape_decoding() {
    let cases = [
        ("Dürst", r#":a :b "Dürst" ."#),
        ("é", r#":a :b "é" ."#),
        ("€", r#":a :b "€" ."#),
        ("\u{15678}another", r#":a :b "\U00015678another" ."#),
        ("backslash:\\", r#":a :b "backslash:\\" ."#),
        ("dquote:\"", r#":a :b "dquote:\"" ."#),
        ("newline:\n", r#":a :b "newline:\n" ."#),
        ("tab:\t", r#":a :b "tab:\t" ."#),
    ];

    for (expected, statement) in cases {
        let graph = parse(statement);
        let literal = graph[0].object.as_literal().unwrap();
        assert_eq!(literal.value(), expected, "for {:?}", statement);
    }
}

#[test]
fn round_trip_preserves_equivalence() {
    let documents = [
        // Plain ground graph
        "@prefix ex: <http://example.org/> . ex:a ex:p ex:b ; ex:q \"v\"@en, 42 .",
        // Blank-node heavy: nested property lists and a collection
        "@prefix a: <http://foo/a#> .
         a:a a:p [ a:p2 [ a:p3 \"v1\", \"v2\" ] ; a:p5 \"v4\" ] .
         a:a a:list (\"x\" \"y\" [ a:q \"z\" ]) .",
        // Shared user-labeled blank nodes
        "@prefix a: <http://foo/a#> .
         a:b1 a:twoRef _:a . a:b2 a:twoRef _:a . _:a a:pred \"end\" .",
        // Paths
        ":x2.:y2 :p2 \"3\" . :x9^:y9 :p9 \"4\" .",
    ];

    for document in documents {
        let graph = parse(document);
        let text = ntriples::write_graph(&graph);
        let reparsed = parse(&text);
        assert!(
            iso::isomorphic(&graph, &reparsed),
            "round trip broke equivalence for {:?}:\n{}",
            document,
            text
        );
    }
}

#[test]
fn inverse_shorthand_is_equivalent_to_explicit_triple() {
    let inverted = parse(r#""value" is :prop of :b ."#);
    let explicit = parse(r#":b :prop "value" ."#);
    assert!(iso::ordered_eq(&inverted, &explicit));
    assert!(iso::isomorphic(&inverted, &explicit));
}

#[test]
fn path_desugaring_matches_expected_graphs() {
    assert_equivalent(
        r#":x2.:y2 :p2 "3" ."#,
        r#":x2 :y2 _:b0 . _:b0 :p2 "3" ."#,
    );
    assert_equivalent(
        r#":x2^:y2 :p2 "3" ."#,
        r#"_:b0 :y2 :x2 . _:b0 :p2 "3" ."#,
    );
    assert_equivalent(
        "@prefix fam: <http://foo/fam#> .
         @prefix loc: <http://foo/loc#> .
         :joe!fam:mother!loc:office!loc:zip .",
        ":joe <http://foo/fam#mother> _:b0 .
         _:b0 <http://foo/loc#office> _:b1 .
         _:b1 <http://foo/loc#zip> _:b2 .",
    );
}

#[test]
fn nested_bnode_structures_match_expected_graphs() {
    assert_equivalent(
        "@prefix a: <http://foo/a#> .
         a:a a:p [ a:p2 [ a:p3 \"v1\" , \"v2\" ; a:p4 \"v3\" ] ; a:p5 \"v4\" ] .",
        "_:b0 <http://foo/a#p3> \"v1\" .
         _:b0 <http://foo/a#p3> \"v2\" .
         _:b0 <http://foo/a#p4> \"v3\" .
         _:b1 <http://foo/a#p2> _:b0 .
         _:b1 <http://foo/a#p5> \"v4\" .
         <http://foo/a#a> <http://foo/a#p> _:b1 .",
    );
}

#[test]
fn collection_desugaring_matches_expected_graphs() {
    assert_equivalent(
        "@prefix : <http://example.com/>. :gregg :wrote (\"RdfContext\").",
        "_:b0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> \"RdfContext\" .
         _:b0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> .
         <http://example.com/gregg> <http://example.com/wrote> _:b0 .",
    );

    // Two-cell chain plus the attaching triple
    let graph = parse(r#":g :w ("a" "b") ."#);
    assert_eq!(graph.len(), 5);

    // Empty collection mints nothing
    let graph = parse(":g :w () .");
    assert_eq!(graph.len(), 1);
    assert_eq!(
        graph[0].object.as_iri(),
        Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil")
    );
    assert!(graph.bnode_degrees().is_empty());
}

#[test]
fn namespace_shadowing_leaves_emitted_triples_alone() {
    assert_equivalent(
        "@prefix a: <http://host/A#>.
         a:b a:p a:v .
         @prefix a: <http://host/Z#>.
         a:b a:p a:v .",
        "<http://host/A#b> <http://host/A#p> <http://host/A#v> .
         <http://host/Z#b> <http://host/Z#p> <http://host/Z#v> .",
    );
}

#[test]
fn rdf_core_manifest_round_trips() {
    let sampledoc = "\
<http://www.w3.org/2000/10/rdf-tests/rdfcore/xmlbase/Manifest.rdf#test001> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2000/10/rdf-tests/rdfcore/testSchema#PositiveParserTest> .
<http://www.w3.org/2000/10/rdf-tests/rdfcore/xmlbase/Manifest.rdf#test001> <http://www.w3.org/2000/10/rdf-tests/rdfcore/testSchema#status> \"APPROVED\" .
<http://www.w3.org/2000/10/rdf-tests/rdfcore/xmlbase/test001.nt> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2000/10/rdf-tests/rdfcore/testSchema#NT-Document> .
";

    let graph = N3Parser::strict()
        .parse(
            sampledoc,
            "http://www.w3.org/2000/10/rdf-tests/rdfcore/amp-in-url/Manifest.rdf",
        )
        .unwrap();

    assert_eq!(ntriples::write_graph(&graph), sampledoc);
}

#[test]
fn equivalence_checker_rejects_structural_differences() {
    // Same sizes, same ground terms, different blank wiring
    let a = parse("_:x :p _:x .");
    let b = parse("_:x :p _:y .");
    assert!(!iso::isomorphic(&a, &b));

    // Ordered comparison is positional
    let one = parse(":a :p \"1\" . :a :p \"2\" .");
    let two = parse(":a :p \"2\" . :a :p \"1\" .");
    assert!(iso::isomorphic(&one, &two));
    assert!(!iso::ordered_eq(&one, &two));
}

#[test]
fn graph_query_interface_over_parsed_document() {
    use triad_graph::{Term, TriplePattern};

    let graph = parse(
        "@prefix ex: <http://example.org/> .
         ex:alice ex:knows ex:bob, ex:carol .
         ex:bob ex:knows ex:carol .",
    );

    let knows = Term::iri("http://example.org/knows").unwrap();
    let pattern = TriplePattern::any().with_predicate(knows);
    assert_eq!(graph.matching(&pattern).count(), 3);

    let from_alice = pattern
        .clone()
        .with_subject(Term::iri("http://example.org/alice").unwrap());
    assert_eq!(graph.matching(&from_alice).count(), 2);

    assert_eq!(graph.subjects().len(), 2);
    assert_eq!(graph.objects().len(), 2);
}
