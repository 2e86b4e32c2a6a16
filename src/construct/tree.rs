//! The expression tree this crate reduces, plus the two operations that
//! are defined directly over it: capture-avoiding substitution and
//! linearization (the `Display` impl). The evaluator (`compiler::eval`)
//! is kept in its own module since it's substantial enough to deserve
//! one, but conceptually belongs here too.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A single recursive expression type for the whole language: lambda
/// calculus plus numbers, arithmetic, booleans-as-numbers, bindings,
/// sequencing, and lazy cons-lists.
///
/// Trees are finite, acyclic, and immutable once built. Every `Lam`,
/// `Let`, and `LetRec` binds exactly one name whose scope is its body;
/// name equality is textual identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A free or bound variable occurrence.
    Var(String),
    /// A numeric literal.
    Num(f64),
    /// A single-parameter abstraction: `\param.body`.
    Lam(String, Box<Expr>),
    /// Function application.
    App(Box<Expr>, Box<Expr>),

    Plus(Box<Expr>, Box<Expr>),
    Minus(Box<Expr>, Box<Expr>),
    Times(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),

    /// Result is encoded as `Num(1.0)`/`Num(0.0)`.
    Eq(Box<Expr>, Box<Expr>),
    Leq(Box<Expr>, Box<Expr>),

    /// `cond` is numeric; `0.0` is false, anything else is true.
    If(Box<Expr>, Box<Expr>, Box<Expr>),

    /// Non-recursive local binding: `let name = bound in body`.
    Let(String, Box<Expr>, Box<Expr>),
    /// Recursive local binding: `letrec name = bound in body`.
    LetRec(String, Box<Expr>, Box<Expr>),

    /// Sequencing. Unlike most of the other constructors this one is a
    /// *value* former: both sides survive in the result.
    Seq(Box<Expr>, Box<Expr>),

    /// The empty list, printed as `#`.
    Nil,
    /// A non-strict list cell.
    Cons(Box<Expr>, Box<Expr>),
    Hd(Box<Expr>),
    Tl(Box<Expr>),
}

/// Process-wide monotonic counter backing [`Expr::fresh_name`]. Confined
/// to this module: it is the only mechanism substitution needs to make
/// alpha-renaming hygienic without a free-variable scan.
static FRESH_COUNTER: AtomicUsize = AtomicUsize::new(1);

impl Expr {
    /// Draws a name guaranteed to be distinct from every other name this
    /// call has ever returned, and from any name a user can write
    /// (generated names lead with an uppercase letter; surface
    /// identifiers must start with a lowercase one).
    pub fn fresh_name() -> String {
        let n = FRESH_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("Var{}", n)
    }

    /// Capture-avoiding substitution: `self[r/x]`.
    pub fn subst(&self, x: &str, r: &Expr) -> Expr {
        use Expr::*;
        match self {
            Var(y) => {
                if y == x { r.clone() } else { Var(y.clone()) }
            }
            Num(n) => Num(*n),
            Nil => Nil,

            Lam(y, body) => {
                if y == x {
                    Lam(y.clone(), body.clone())
                } else {
                    let z = Expr::fresh_name();
                    let renamed = body.subst(y, &Var(z.clone()));
                    Lam(z, Box::new(renamed.subst(x, r)))
                }
            }

            App(f, a) => App(Box::new(f.subst(x, r)), Box::new(a.subst(x, r))),

            Plus(l, rhs) => Plus(Box::new(l.subst(x, r)), Box::new(rhs.subst(x, r))),
            Minus(l, rhs) => Minus(Box::new(l.subst(x, r)), Box::new(rhs.subst(x, r))),
            Times(l, rhs) => Times(Box::new(l.subst(x, r)), Box::new(rhs.subst(x, r))),
            Eq(l, rhs) => Eq(Box::new(l.subst(x, r)), Box::new(rhs.subst(x, r))),
            Leq(l, rhs) => Leq(Box::new(l.subst(x, r)), Box::new(rhs.subst(x, r))),
            Cons(h, t) => Cons(Box::new(h.subst(x, r)), Box::new(t.subst(x, r))),
            Seq(h, t) => Seq(Box::new(h.subst(x, r)), Box::new(t.subst(x, r))),

            Neg(e) => Neg(Box::new(e.subst(x, r))),
            Hd(e) => Hd(Box::new(e.subst(x, r))),
            Tl(e) => Tl(Box::new(e.subst(x, r))),

            If(c, t, e) => If(
                Box::new(c.subst(x, r)),
                Box::new(t.subst(x, r)),
                Box::new(e.subst(x, r)),
            ),

            Let(y, bound, body) => {
                let new_bound = bound.subst(x, r);
                if y == x {
                    Let(y.clone(), Box::new(new_bound), body.clone())
                } else {
                    let z = Expr::fresh_name();
                    let renamed_body = body.subst(y, &Var(z.clone()));
                    Let(z, Box::new(new_bound), Box::new(renamed_body.subst(x, r)))
                }
            }

            LetRec(y, bound, body) => {
                if y == x {
                    LetRec(y.clone(), bound.clone(), body.clone())
                } else {
                    let z = Expr::fresh_name();
                    let renamed_bound = bound.subst(y, &Var(z.clone()));
                    let renamed_body = body.subst(y, &Var(z.clone()));
                    LetRec(
                        z,
                        Box::new(renamed_bound.subst(x, r)),
                        Box::new(renamed_body.subst(x, r)),
                    )
                }
            }
        }
    }

    /// Does this node's outermost constructor make it "list-shaped" —
    /// i.e. is it a candidate to be compared as a list by `==`?
    pub fn is_list_shape(&self) -> bool {
        matches!(self, Expr::Nil | Expr::Cons(..))
    }
}

/// Canonical decimal rendering: shortest round-tripping representation,
/// with a forced `.0` suffix when the value is integral (so `3.0`
/// doesn't print as `3`, and `-0.0` keeps its sign).
pub fn format_num(n: f64) -> String {
    let s = format!("{}", n);
    if s.contains('.') || s.contains('e') || s.contains("inf") || s.contains("NaN") {
        s
    } else {
        format!("{}.0", s)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Var(x) => write!(f, "{}", x),
            Num(n) => write!(f, "{}", format_num(*n)),
            Lam(x, body) => write!(f, "(\\{}.{})", x, body),
            App(fun, arg) => write!(f, "({} {})", fun, arg),

            Plus(l, r) => write!(f, "({} + {})", l, r),
            Minus(l, r) => write!(f, "({} - {})", l, r),
            Times(l, r) => write!(f, "({} * {})", l, r),
            Neg(e) => write!(f, "(-{})", e),

            Eq(l, r) => write!(f, "({} == {})", l, r),
            Leq(l, r) => write!(f, "({} <= {})", l, r),

            If(c, t, e) => write!(f, "(if {} then {} else {})", c, t, e),

            Let(x, b, body) => write!(f, "(let {} = {} in {})", x, b, body),
            LetRec(x, b, body) => write!(f, "(letrec {} = {} in {})", x, b, body),

            Seq(h, t) => write!(f, "{} ;; {}", h, t),

            Nil => write!(f, "#"),
            Cons(h, t) => write!(f, "({} : {})", h, t),
            Hd(e) => write!(f, "(hd {})", e),
            Tl(e) => write!(f, "(tl {})", e),
        }
    }
}
