//! End-to-end tests of the parse pipeline through the public API.

use sprig::grammar::OpKey;
use sprig::parse;
use sprig_syntax::pretty;
use sprig_syntax::{ErrorKind, Span};

fn expr(source: &str) -> String {
    let parsed = parse(source).expect("parse should succeed");
    assert!(
        parsed.errors.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        parsed.errors
    );
    pretty::subtree_to_string(&parsed.tree, parsed.tree.top_level(), source)
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let parsed = parse("a + b * c").unwrap();
    let tree = &parsed.tree;
    let top = tree.top_level();
    assert_eq!(tree.operator_key_of(top), Some(OpKey::Plus));
    let (left, right) = tree.children_of(top);
    assert_eq!(tree.operator_key_of(left.unwrap()), None);
    let star = right.unwrap();
    assert_eq!(tree.operator_key_of(star), Some(OpKey::Star));
    let (b, c) = tree.children_of(star);
    assert_eq!(tree.span_of(b.unwrap()), Span::new(4, 5));
    assert_eq!(tree.span_of(c.unwrap()), Span::new(8, 9));
}

#[test]
fn colon_chains_nest_to_the_right() {
    let parsed = parse("a : b : c").unwrap();
    let tree = &parsed.tree;
    let outer = tree.top_level();
    assert_eq!(tree.operator_key_of(outer), Some(OpKey::Colon));
    let (_, right) = tree.children_of(outer);
    assert_eq!(tree.operator_key_of(right.unwrap()), Some(OpKey::Colon));
}

#[test]
fn juxtaposition_call_has_exact_spans() {
    let parsed = parse("f x").unwrap();
    let tree = &parsed.tree;
    let apply = tree.top_level();
    assert_eq!(tree.operator_key_of(apply), Some(OpKey::Apply));
    // Whole call covers `f` through `x`; the operator itself is zero-width
    // at the boundary between them.
    assert_eq!(tree.span_of(apply), Span::new(0, 3));
    assert!(tree.token_span(apply).is_empty());
    let (f, x) = tree.children_of(apply);
    assert_eq!(tree.span_of(f.unwrap()), Span::new(0, 1));
    assert_eq!(tree.span_of(x.unwrap()), Span::new(2, 3));
}

#[test]
fn indent_block_closes_on_dedent() {
    assert_eq!(expr("a:\n  b\nc"), "(seq (: a (block b)) c)");
}

#[test]
fn deeper_lines_stay_in_the_block() {
    assert_eq!(expr("a:\n  b\n  c + d"), "(: a (block (seq b (+ c d))))");
}

#[test]
fn unterminated_open_delimiter_is_a_single_error() {
    let errors = parse("(a").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Structure);
    assert!(errors[0].message.contains("unmatched open delimiter"));
    assert_eq!(errors[0].span, Span::new(0, 1));
}

#[test]
fn stray_close_delimiter_is_a_single_error() {
    let errors = parse("a)").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Structure);
    assert!(errors[0].message.contains("unmatched close delimiter"));
    assert_eq!(errors[0].span, Span::new(1, 2));
}

#[test]
fn empty_source_parses_to_an_empty_atom() {
    let parsed = parse("").unwrap();
    assert!(parsed.errors.is_empty());
    let tree = &parsed.tree;
    let top = tree.top_level();
    assert_eq!(tree.operator_key_of(top), Some(OpKey::Empty));
    assert_eq!(tree.token_span(top), Span::new(0, 0));
}

#[test]
fn parses_are_structurally_deterministic() {
    let source = "f x:\n  y = 1 + 2 * 3\n  g -y\nf 'done'";
    let first = parse(source).unwrap();
    let second = parse(source).unwrap();
    assert_eq!(first.tree.len(), second.tree.len());
    for ((id, a), (_, b)) in first.tree.iter().zip(second.tree.iter()) {
        assert_eq!(a.parent, b.parent, "parent mismatch at {id:?}");
        assert_eq!(a.token.span, b.token.span, "span mismatch at {id:?}");
    }
}

#[test]
fn node_segments_reproduce_the_source() {
    // Every node's covering span must equal its children's covering spans
    // plus its own token segment, concatenated in lexical order with no
    // gaps or overlaps.
    for source in [
        "a + b * c",
        "f x",
        "a:\n  b\nc",
        "(a + b) * [c, d]",
        "- x ^ 2\nf y!",
    ] {
        let parsed = parse(source).unwrap();
        let tree = &parsed.tree;
        for (id, _) in tree.iter() {
            let (left, right) = tree.children_of(id);
            let mut pieces = Vec::new();
            if let Some(l) = left {
                pieces.push(tree.covering_span(l));
            }
            pieces.push(tree.trivia_span(id));
            if let Some(r) = right {
                pieces.push(tree.covering_span(r));
            }
            pieces.sort_by_key(|s| (s.start, s.end));

            let whole = tree.covering_span(id);
            let mut cursor = whole.start;
            for piece in &pieces {
                assert_eq!(piece.start, cursor, "gap inside node {id:?} of {source:?}");
                cursor = piece.end;
            }
            assert_eq!(cursor, whole.end, "node {id:?} of {source:?} not covered");
        }
    }
}

#[test]
fn sticky_spacing_changes_the_tree() {
    assert_eq!(expr("a+ b"), "(apply (+ a) b)");
    assert_eq!(expr("a -b"), "(apply a (- b))");
    assert_eq!(expr("a + b"), "(+ a b)");
}
