//! Append-only syntax tree with parent-pointer encoding.
//!
//! Nodes are appended in strict lexical order and never moved or deleted;
//! tree shape lives entirely in each node's `parent` index. A parent index
//! **smaller** than the node's own means the node is a right child; a
//! **larger** parent index means a left child (the parent was appended
//! later and adopted it).
//!
//! The builder implements precedence climbing over the parent chain: a new
//! infix/postfix operator walks up from the previous node, swallowing
//! ancestors that bind tighter, and takes over the old parent slot of the
//! node where the climb stops. Close delimiters climb to their matching
//! open and adopt it, so a delimited pair reads as one node.
//!
//! ## Notes
//! - Node 0 is always the synthetic `begin` open delimiter, so every
//!   operand-position node has a parent to hang from.
//! - `trivia_end` extends each token's span to the start of the next node's
//!   token; the segments tile the source exactly, which is what makes
//!   subtree spans gap-free.

use sprig_core::grammar::{self, OperatorDef, Role, Side};

use crate::diagnostics::ParseError;
use crate::token::{Span, Token};

/// Index of one node in the append-only arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn new(index: usize) -> Self {
        Self(index as u32)
    }
}

/// One resolved (token, role) pair at a fixed arena index.
#[derive(Debug, Clone)]
pub struct Node {
    pub token: Token,
    /// The picked role definition; `None` for plain expression atoms.
    pub def: Option<&'static OperatorDef>,
    pub parent: Option<NodeId>,
    /// End of this node's token segment including trailing trivia.
    pub trivia_end: usize,
}

/// The finished tree: node arena plus root index.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    /// The root node: the `end` close of the synthetic begin/end pair.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The program's top-level expression: the sole inner child of the
    /// begin/end pair (an empty-expression atom for an empty program).
    pub fn top_level(&self) -> NodeId {
        let (left, _) = self.children_of(self.root);
        let begin = left.unwrap_or(self.root);
        let (_, inner) = self.children_of(begin);
        inner.unwrap_or(begin)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId::new(i), n))
    }

    /// Left and right children of a node.
    ///
    /// Encoded by parent direction: a child appended before its parent is a
    /// left child, one appended after is a right child. Binary shape means
    /// at most one of each.
    pub fn children_of(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let mut left = None;
        let mut right = None;
        for (i, n) in self.nodes.iter().enumerate() {
            if n.parent == Some(id) {
                if i < id.index() {
                    left = Some(NodeId::new(i));
                } else {
                    right = Some(NodeId::new(i));
                }
            }
        }
        (left, right)
    }

    /// The operator key of a node, or `None` for plain atoms.
    pub fn operator_key_of(&self, id: NodeId) -> Option<grammar::OpKey> {
        self.node(id).def.map(|d| d.key)
    }

    /// The node's own token span.
    pub fn token_span(&self, id: NodeId) -> Span {
        self.node(id).token.span
    }

    /// The node's token segment extended over its trailing trivia.
    pub fn trivia_span(&self, id: NodeId) -> Span {
        let n = self.node(id);
        Span::new(n.token.span.start, n.trivia_end)
    }

    /// The span covered by the whole subtree rooted at `id`.
    pub fn span_of(&self, id: NodeId) -> Span {
        let mut span = self.token_span(id);
        for i in 0..self.nodes.len() {
            if self.is_descendant(NodeId::new(i), id) {
                span = span.merge(self.nodes[i].token.span);
            }
        }
        span
    }

    /// Like [`SyntaxTree::span_of`] but over trivia-extended segments; the
    /// covering spans of a node's children plus its own segment tile the
    /// parent's covering span with no gaps.
    pub fn covering_span(&self, id: NodeId) -> Span {
        let mut span = self.trivia_span(id);
        for i in 0..self.nodes.len() {
            if self.is_descendant(NodeId::new(i), id) {
                span = span.merge(self.trivia_span(NodeId::new(i)));
            }
        }
        span
    }

    fn is_descendant(&self, mut node: NodeId, ancestor: NodeId) -> bool {
        while let Some(p) = self.nodes[node.index()].parent {
            if p == ancestor {
                return true;
            }
            node = p;
        }
        false
    }
}

/// Incremental builder receiving resolved (token, role) pairs in lexical
/// order.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the most recently appended node.
    fn prev(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId::new(self.nodes.len() - 1))
        }
    }

    fn append(&mut self, token: Token, def: Option<&'static OperatorDef>) -> NodeId {
        // The previous node's trailing trivia runs up to this token.
        if let Some(last) = self.nodes.last_mut() {
            last.trivia_end = token.span.start;
        }
        let trivia_end = token.span.end;
        self.nodes.push(Node {
            token,
            def,
            parent: None,
            trivia_end,
        });
        NodeId::new(self.nodes.len() - 1)
    }

    /// Append an operand-position node: an atom, a prefix operator, or an
    /// open delimiter. It hangs as the right child of the operator that was
    /// waiting for it (the previously appended node).
    pub fn push_operand(&mut self, token: Token, def: Option<&'static OperatorDef>) -> NodeId {
        let parent = self.prev();
        let id = self.append(token, def);
        self.nodes[id.index()].parent = parent;
        id
    }

    /// Attach an infix or postfix operator by precedence climbing: walk up
    /// from the previous node while each ancestor binds tight enough to be
    /// adopted as this operator's left child, then splice in.
    pub fn push_operator(&mut self, token: Token, def: &'static OperatorDef) -> NodeId {
        let mut child = self
            .prev()
            .expect("operator attachment requires a previous node");
        while let Some(p) = self.nodes[child.index()].parent {
            if grammar::can_hold(def, self.nodes[p.index()].def, Side::Left) {
                child = p;
            } else {
                break;
            }
        }
        let vacated = self.nodes[child.index()].parent;
        let id = self.append(token, Some(def));
        self.nodes[child.index()].parent = Some(id);
        self.nodes[id.index()].parent = vacated;
        id
    }

    /// Attach a close delimiter: climb to the matching open, adopt it as
    /// this node's left child, and take over its parent slot.
    ///
    /// ## Errors
    /// - An open delimiter of the wrong kind found first: "unmatched close
    ///   delimiter", or "unmatched open delimiter" when closing `end`
    ///   (end of input reached with something still open).
    pub fn push_close(&mut self, token: Token, def: &'static OperatorDef) -> Result<NodeId, ParseError> {
        let mut n = self
            .prev()
            .expect("close attachment requires a previous node");
        let open = loop {
            let node = &self.nodes[n.index()];
            if let Some(d) = node.def {
                if d.role == Role::OpenDelim {
                    if def.partner == Some(d.key) {
                        break n;
                    }
                    return Err(self.mismatch_error(&token, def, n));
                }
            }
            match node.parent {
                Some(p) => n = p,
                None => {
                    return Err(ParseError::structure(
                        format!(
                            "unmatched close delimiter `{}`",
                            grammar::name(def.key)
                        ),
                        token.span,
                    )
                    .with_remedy("remove it or add a matching open delimiter"));
                }
            }
        };

        let vacated = self.nodes[open.index()].parent;
        let id = self.append(token, Some(def));
        self.nodes[open.index()].parent = Some(id);
        self.nodes[id.index()].parent = vacated;
        Ok(id)
    }

    fn mismatch_error(&self, token: &Token, def: &'static OperatorDef, open: NodeId) -> ParseError {
        let open_node = &self.nodes[open.index()];
        let open_key = open_node.def.map(|d| d.key);
        // Synthetic closes (end of input, dedent) blame the stale open; a
        // stray bracket blames itself.
        if matches!(def.key, grammar::OpKey::End | grammar::OpKey::Undent) {
            let name = open_key.map(grammar::name).unwrap_or("?");
            let partner = open_key
                .and_then(|k| grammar::lookup(k, Role::OpenDelim))
                .and_then(|d| d.partner)
                .map(grammar::name)
                .unwrap_or("close delimiter");
            ParseError::structure(
                format!("unmatched open delimiter `{name}`"),
                open_node.token.span,
            )
            .with_remedy(format!("add the matching `{partner}` before the end of input"))
        } else {
            ParseError::structure(
                format!("unmatched close delimiter `{}`", grammar::name(def.key)),
                token.span,
            )
            .with_remedy("remove it or add a matching open delimiter")
        }
    }

    /// Seal the arena. Must be called after the final `end` close matched.
    pub fn finish(self) -> SyntaxTree {
        debug_assert!(
            self.nodes
                .iter()
                .filter(|n| n.parent.is_none())
                .count()
                == 1,
            "tree must have exactly one root after the final close"
        );
        let root = NodeId::new(self.nodes.len() - 1);
        debug_assert!(self.nodes[root.index()].parent.is_none());
        SyntaxTree { nodes: self.nodes, root }
    }
}

// ============================================================================
// TESTS
// ============================================================================
