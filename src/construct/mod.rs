//! The expression tree and the operations defined directly on it.

pub mod tree;

pub use tree::Expr;
