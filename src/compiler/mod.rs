//! Each step in the pipeline turns one datatype into another:
//!
//! ~> Source (string)
//! -> Tokens     : lex.rs
//! -> Expr tree  : parse.rs
//! ~> Expr tree  : eval.rs (normal form)
//!
//! The free functions below compose the pipeline; `src/lib.rs` exposes
//! the whole thing as `reduce::interpret`.

use std::rc::Rc;

use crate::common::source::Source;
use crate::common::span::Spanned;
use crate::construct::tree::Expr;

pub mod eval;
pub mod lex;
pub mod parse;

pub mod syntax;
pub mod token;

pub use syntax::Syntax;

/// Source -> Tokens.
pub fn lex(source: Rc<Source>) -> Result<Vec<Spanned<token::Token>>, Syntax> {
    lex::Lexer::lex(source)
}

/// Source -> Expr tree, unevaluated.
pub fn parse(source: Rc<Source>) -> Result<Expr, Syntax> {
    let tokens = lex(source)?;
    parse::Parser::parse(tokens)
}

/// Source -> Expr tree, reduced to normal form.
pub fn compile(source: Rc<Source>) -> Result<Expr, Syntax> {
    let tree = parse(source)?;
    Ok(eval::eval(&tree))
}
