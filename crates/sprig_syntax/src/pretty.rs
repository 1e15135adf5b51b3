//! S-expression rendering of syntax trees.
//!
//! Used by tests and the CLI `parse` command. Atoms print as their source
//! text; operators print as `(name left right)`; a matched delimiter pair
//! prints as one node: `(paren …)`, `(bracket …)`, `(block …)`, and
//! `(program …)` for the outer begin/end pair.

use sprig_core::grammar::{self, OpKey, Role};

use crate::token::TokenKind;
use crate::tree::{NodeId, SyntaxTree};

/// Render the whole tree, starting at the root pair.
pub fn tree_to_string(tree: &SyntaxTree, source: &str) -> String {
    subtree_to_string(tree, tree.root(), source)
}

/// Render one subtree.
pub fn subtree_to_string(tree: &SyntaxTree, id: NodeId, source: &str) -> String {
    let mut out = String::new();
    render(tree, id, source, &mut out);
    out
}

fn render(tree: &SyntaxTree, id: NodeId, source: &str, out: &mut String) {
    let node = tree.node(id);
    let Some(def) = node.def else {
        match &node.token.kind {
            TokenKind::Error => out.push_str("<error>"),
            _ => {
                let span = node.token.span;
                out.push_str(&source[span.start..span.end]);
            }
        }
        return;
    };

    match def.role {
        Role::Expression => out.push_str("(empty)"),
        Role::CloseDelim | Role::OpenDelim => {
            let open_key = match def.role {
                Role::CloseDelim => def.partner.unwrap_or(def.key),
                _ => def.key,
            };
            out.push('(');
            out.push_str(pair_name(open_key));
            // The inner expression hangs off the open node's right side.
            let inner = match def.role {
                Role::CloseDelim => {
                    let (open, _) = tree.children_of(id);
                    open.and_then(|o| tree.children_of(o).1)
                }
                _ => tree.children_of(id).1,
            };
            if let Some(inner) = inner {
                out.push(' ');
                render(tree, inner, source, out);
            }
            out.push(')');
        }
        _ => {
            out.push('(');
            out.push_str(grammar::name(def.key));
            let (left, right) = tree.children_of(id);
            for child in [left, right].into_iter().flatten() {
                out.push(' ');
                render(tree, child, source, out);
            }
            out.push(')');
        }
    }
}

fn pair_name(open_key: OpKey) -> &'static str {
    match open_key {
        OpKey::LParen => "paren",
        OpKey::LBracket => "bracket",
        OpKey::Indent => "block",
        OpKey::Begin => "program",
        other => grammar::name(other),
    }
}

// ============================================================================
// TESTS
// ============================================================================
