use crate::common::span::Span;
use std::fmt;

/// A static error — malformed surface syntax, found during lexing or
/// parsing. `Syntax` carries the span it occurred at so the CLI can
/// print a source excerpt alongside the message.
#[derive(Debug, PartialEq, Eq)]
pub struct Syntax {
    pub reason: String,
    pub span: Span,
}

impl Syntax {
    /// Creates a new syntax error at a given span.
    pub fn error(reason: &str, span: &Span) -> Syntax {
        Syntax {
            reason: reason.to_string(),
            span: span.clone(),
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.span.is_empty() {
            fmt::Display::fmt(&self.span, f)?;
        }
        write!(f, "Syntax Error: {}", self.reason)
    }
}

impl std::error::Error for Syntax {}
