//! Property-based tests over generated source strings.

use proptest::prelude::*;
use sprig::parse;

proptest! {
    /// Parsing twice yields structurally identical results, success or not.
    #[test]
    fn parsing_is_deterministic(source in r"[abf0-9+\-*:;()\[\] \n]{0,32}") {
        match (parse(&source), parse(&source)) {
            (Ok(first), Ok(second)) => {
                prop_assert_eq!(first.tree.len(), second.tree.len());
                for ((_, a), (_, b)) in first.tree.iter().zip(second.tree.iter()) {
                    prop_assert_eq!(a.parent, b.parent);
                    prop_assert_eq!(a.token.span, b.token.span);
                }
                prop_assert_eq!(first.errors.len(), second.errors.len());
            }
            (Err(first), Err(second)) => {
                prop_assert_eq!(first.len(), second.len());
                for (a, b) in first.iter().zip(second.iter()) {
                    prop_assert_eq!(a.kind, b.kind);
                    prop_assert_eq!(a.span, b.span);
                }
            }
            _ => prop_assert!(false, "one parse succeeded and the other failed"),
        }
    }

    /// On success, node segments tile each subtree with no gaps or overlaps,
    /// and the root covers the entire source.
    #[test]
    fn node_segments_tile_the_source(source in r"[abf0-9+\-*:;()\[\] \n]{0,32}") {
        if let Ok(parsed) = parse(&source) {
            let tree = &parsed.tree;
            let root_cover = tree.covering_span(tree.root());
            prop_assert_eq!(root_cover.start, 0);
            prop_assert_eq!(root_cover.end, source.len());

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
                    prop_assert_eq!(piece.start, cursor, "gap inside {:?} of {:?}", id, source);
                    cursor = piece.end;
                }
                prop_assert_eq!(cursor, whole.end);
            }
        }
    }

    /// Nodes are appended in lexical order of span start, and every node
    /// except the root has a parent.
    #[test]
    fn node_order_and_parent_invariants(source in r"[abf0-9+\-*:;()\[\] \n]{0,32}") {
        if let Ok(parsed) = parse(&source) {
            let tree = &parsed.tree;
            let mut prev_start = 0;
            let mut rootless = 0;
            for (id, node) in tree.iter() {
                prop_assert!(node.token.span.start >= prev_start, "order broken at {:?}", id);
                prev_start = node.token.span.start;
                if node.parent.is_none() {
                    rootless += 1;
                }
            }
            prop_assert_eq!(rootless, 1);
            prop_assert_eq!(tree.root().index(), tree.len() - 1);
        }
    }
}
