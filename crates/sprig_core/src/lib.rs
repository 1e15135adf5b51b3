//! Provide the canonical grammar vocabulary for the Sprig front end.
//!
//! This crate is intentionally small and dependency-light. It contains the
//! static operator table (symbols, grammatical roles, precedence,
//! associativity, delimiter pairing) that the lexer, resolver, and tree
//! builder all consult, so that every stage agrees on one vocabulary.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no
//!   parser-specific types.
//! - Precedence is a relative ordering where a **larger number binds
//!   tighter**. The absolute scale is an implementation detail, but must be
//!   consistent across the resolver and tree builder.

pub mod grammar;

pub use grammar::{Associativity, OpKey, OperatorDef, Role, Side};
