//! Parsing and the owned syntax arena.
//!
//! swc owns the real AST; the engine works on a lowered arena of
//! [`SyntaxNode`]s with explicit parent links, so upward root resolution
//! never fights the borrow checker over mutually-owning references.

pub mod lower;
pub mod parse;
pub mod tree;

pub use lower::lower;
pub use parse::{ParsedModule, parse_tsx_source};
pub use tree::{BinOp, NodeId, NodeKind, Slot, SyntaxNode, SyntaxTree, TextRange};
