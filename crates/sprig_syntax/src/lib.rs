//! Shared syntax frontend for the Sprig language: lexer, arity resolver,
//! tree builder, diagnostics.
//!
//! Sprig is a whitespace/indentation-sensitive expression language whose
//! operators are deliberately overloaded across grammatical roles (`+` is a
//! valid prefix, infix, and postfix operator at once). This crate turns
//! source text into a precedence-correct syntax tree in a single
//! left-to-right pass, synthesizing the operators that never appear
//! literally in the source: juxtaposition-as-call, newline-as-separator,
//! empty-expression placeholders, and indent/undent block delimiters.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not evaluate,
//!   typecheck, or lower anything.
//! - Operator identity (roles, precedence, delimiter pairing) comes from
//!   the `sprig_core::grammar` registry.
//!
//! ## Examples
//! ```rust
//! let parsed = sprig_syntax::parse("a + b * c").unwrap();
//! assert!(parsed.errors.is_empty());
//! let root = parsed.tree.top_level();
//! assert_eq!(
//!     parsed.tree.operator_key_of(root),
//!     Some(sprig_core::grammar::OpKey::Plus)
//! );
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod pretty;
pub mod resolver;
pub mod source_map;
pub mod token;
pub mod tree;

pub use diagnostics::{ErrorKind, ParseError};
pub use resolver::{Parse, parse};
pub use source_map::LineMap;
pub use token::{Span, Token, TokenKind};
pub use tree::{NodeId, SyntaxTree};
