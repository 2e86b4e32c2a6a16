//! # reduce
//!
//! `reduce` is a normal-order evaluator for a small untyped lambda
//! calculus extended with numeric literals and arithmetic, booleans
//! encoded as numbers, non-recursive and recursive local bindings,
//! sequencing, and lazy cons-lists.
//!
//! ## Overview of the pipeline
//! Source code is represented as a `Source`: a reference to some code
//! together with the path (or a synthetic path) it came from. Regions
//! of source are marked with `Span`s, reference-counted back to their
//! `Source`, used throughout the compiler to report errors. Compiler
//! datastructures can be `Spanned` to indicate where they originated.
//!
//! Compilation steps raise `Err(Syntax)` on malformed input; `Syntax`
//! carries a `Span` and a message, and pretty-prints source context.
//!
//! The first phase is lexing: `compiler::lex::Lexer` reads through a
//! `Source` and produces a stream of `Spanned<Token>`s, greedily
//! looking for the longest next token.
//!
//! The second phase is parsing: `compiler::parse::Parser` takes that
//! token stream and builds an `Expr` tree by recursive descent,
//! following the precedence order in the grammar.
//!
//! The tree is then reduced to normal form by `compiler::eval::eval`,
//! a normal-order (leftmost-outermost, lazy) rewriting engine. Normal
//! form is itself an `Expr` tree — possibly containing stuck
//! subterms — linearized back to text by `Expr`'s `Display` impl.
//!
//! ```
//! let result = reduce::interpret("(\\x. x + 1) 41").unwrap();
//! assert_eq!(result, "42.0");
//! ```

pub mod common;
pub mod compiler;
pub mod construct;

pub use common::{Source, Span, Spanned};
pub use compiler::Syntax;
pub use construct::Expr;

/// Parses and reduces a complete program to normal form, returning its
/// canonical linearization. This is the single entry point used by the
/// CLI and by the test suite.
pub fn interpret(source: &str) -> Result<String, Syntax> {
    let source = Source::source(source);
    let normal_form = compiler::compile(source)?;
    Ok(normal_form.to_string())
}
