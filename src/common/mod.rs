//! Datastructures shared by the lexer, parser, and evaluator:
//! source-code representation and span annotations used for error
//! reporting.

pub mod source;
pub mod span;

pub use source::Source;
pub use span::{Span, Spanned};
