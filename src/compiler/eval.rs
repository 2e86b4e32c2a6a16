//! The normal-order reduction engine: spec §4.C (the evaluator driver)
//! and §4.D (the primitive reduction laws for arithmetic, comparison,
//! conditionals, lists, and sequencing).
//!
//! `eval` never reduces under a `Lam`, never forces an `App`'s argument
//! before substituting it into the function body, and leaves residual
//! syntax in place of any stuck redex rather than failing — the
//! evaluator doubles as a term rewriter (spec §7c, §9).

use log::{debug, trace};

use crate::construct::tree::Expr;

/// Reduces `e` to normal form under normal-order (leftmost-outermost,
/// lazy) evaluation. Never introduces an artificial step limit — a
/// divergent program diverges.
pub fn eval(e: &Expr) -> Expr {
    // The outer loop lets App/Let/LetRec/If/Hd/Tl chains step in place
    // instead of recursing, so that a long chain of beta-reductions
    // (e.g. an unrolling recursive `letrec`) doesn't grow the Rust call
    // stack by one frame per step; only genuinely nested sub-evaluation
    // (operands, branches not taken, list elements) recurses.
    let mut current = e.clone();
    loop {
        trace!("eval step: {}", current);
        match current {
            Expr::Var(_) | Expr::Num(_) | Expr::Nil | Expr::Lam(..) => return current,

            Expr::App(f, a) => {
                let f_val = eval(&f);
                match f_val {
                    Expr::Lam(x, body) => {
                        debug!("beta-reducing application of \\{}", x);
                        current = body.subst(&x, &a);
                    }
                    _ => return Expr::App(Box::new(f_val), a),
                }
            }

            Expr::Let(x, bound, body) => {
                current = body.subst(&x, &bound);
            }

            Expr::LetRec(x, bound, body) => {
                // Tie the knot: each occurrence of `x` forced inside
                // `bound`'s body yields another copy of this same
                // letrec, unfolding on demand.
                let unfolding =
                    Expr::LetRec(x.clone(), bound.clone(), Box::new(Expr::Var(x.clone())));
                let bound_star = bound.subst(&x, &unfolding);
                current = body.subst(&x, &bound_star);
            }

            Expr::If(cond, then_branch, else_branch) => {
                let cond_val = eval(&cond);
                match &cond_val {
                    Expr::Num(n) if *n == 0.0 => current = *else_branch,
                    Expr::Num(_) => current = *then_branch,
                    _ => return Expr::If(Box::new(cond_val), then_branch, else_branch),
                }
            }

            Expr::Plus(l, r) => return eval_arith(*l, *r, "+", |a, b| a + b, Expr::Plus),
            Expr::Minus(l, r) => return eval_arith(*l, *r, "-", |a, b| a - b, Expr::Minus),
            Expr::Times(l, r) => return eval_arith(*l, *r, "*", |a, b| a * b, Expr::Times),

            Expr::Neg(e) => {
                let v = eval(&e);
                return match v {
                    Expr::Num(n) => Expr::Num(-n),
                    _ => Expr::Neg(Box::new(v)),
                };
            }

            Expr::Eq(l, r) => return eval_eq(*l, *r),
            Expr::Leq(l, r) => return eval_leq(*l, *r),

            Expr::Seq(h, t) => return Expr::Seq(Box::new(eval(&h)), Box::new(eval(&t))),

            Expr::Cons(h, t) => return Expr::Cons(Box::new(eval(&h)), Box::new(eval(&t))),

            Expr::Hd(xs) => {
                let xs_val = eval(&xs);
                match xs_val {
                    Expr::Cons(h, _) => current = *h,
                    _ => return Expr::Hd(Box::new(xs_val)),
                }
            }

            Expr::Tl(xs) => {
                let xs_val = eval(&xs);
                match xs_val {
                    Expr::Cons(_, t) => current = *t,
                    _ => return Expr::Tl(Box::new(xs_val)),
                }
            }
        }
    }
}

fn eval_arith(
    l: Expr,
    r: Expr,
    _op: &str,
    f: impl Fn(f64, f64) -> f64,
    residual: impl Fn(Box<Expr>, Box<Expr>) -> Expr,
) -> Expr {
    let l_val = eval(&l);
    let r_val = eval(&r);
    match (&l_val, &r_val) {
        (Expr::Num(a), Expr::Num(b)) => Expr::Num(f(*a, *b)),
        _ => residual(Box::new(l_val), Box::new(r_val)),
    }
}

fn eval_leq(l: Expr, r: Expr) -> Expr {
    let l_val = eval(&l);
    let r_val = eval(&r);
    match (&l_val, &r_val) {
        (Expr::Num(a), Expr::Num(b)) => Expr::Num(if a <= b { 1.0 } else { 0.0 }),
        _ => Expr::Leq(Box::new(l_val), Box::new(r_val)),
    }
}

fn eval_eq(l: Expr, r: Expr) -> Expr {
    let l_val = eval(&l);
    let r_val = eval(&r);
    match (&l_val, &r_val) {
        (Expr::Num(a), Expr::Num(b)) => Expr::Num(if a == b { 1.0 } else { 0.0 }),
        _ if l_val.is_list_shape() && r_val.is_list_shape() => match list_eq(&l_val, &r_val) {
            Some(equal) => Expr::Num(if equal { 1.0 } else { 0.0 }),
            None => Expr::Eq(Box::new(l_val), Box::new(r_val)),
        },
        _ => Expr::Eq(Box::new(l_val), Box::new(r_val)),
    }
}

/// Structural equality between two already-WHNF list values. Returns
/// `None` if some pair of corresponding elements can't be compared
/// (mismatched kinds), in which case the caller falls back to a
/// residual `==` rather than guessing an answer.
fn list_eq(a: &Expr, b: &Expr) -> Option<bool> {
    match (a, b) {
        (Expr::Nil, Expr::Nil) => Some(true),
        (Expr::Nil, Expr::Cons(..)) | (Expr::Cons(..), Expr::Nil) => Some(false),
        (Expr::Cons(h1, t1), Expr::Cons(h2, t2)) => {
            let h1v = eval(h1);
            let h2v = eval(h2);
            let heads_equal = match (&h1v, &h2v) {
                (Expr::Num(x), Expr::Num(y)) => Some(x == y),
                _ if h1v.is_list_shape() && h2v.is_list_shape() => list_eq(&h1v, &h2v),
                _ => None,
            }?;
            if !heads_equal {
                return Some(false);
            }

            let t1v = eval(t1);
            let t2v = eval(t2);
            if t1v.is_list_shape() && t2v.is_list_shape() {
                list_eq(&t1v, &t2v)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn num(n: f64) -> Expr {
        Expr::Num(n)
    }

    fn var(x: &str) -> Expr {
        Expr::Var(x.to_string())
    }

    fn lam(x: &str, body: Expr) -> Expr {
        Expr::Lam(x.to_string(), Box::new(body))
    }

    fn app(f: Expr, a: Expr) -> Expr {
        Expr::App(Box::new(f), Box::new(a))
    }

    #[test]
    fn values_are_fixed_points() {
        let values = vec![
            num(1.0),
            Expr::Nil,
            lam("x", var("x")),
            Expr::App(Box::new(var("f")), Box::new(var("x"))), // stuck, residual
        ];
        for v in values {
            assert_eq!(eval(&v), v);
        }
    }

    #[test]
    fn no_reduction_under_lambda() {
        // eval(\x. (\y.y) x) == (\x.((\y.y) x)) -- the inner redex is
        // not reduced since it's under a binder.
        let e = lam("x", app(lam("y", var("y")), var("x")));
        let result = eval(&e);
        assert_eq!(format!("{}", result), "(\\x.((\\y.y) x))");
    }

    #[test]
    fn normal_order_does_not_force_unused_argument() {
        // (\x. 1) applied to a non-terminating argument still reduces,
        // because the argument is substituted, not evaluated first.
        let omega = app(lam("x", app(var("x"), var("x"))), lam("x", app(var("x"), var("x"))));
        let e = app(lam("x", num(1.0)), omega);
        assert_eq!(eval(&e), num(1.0));
    }

    #[test]
    fn alpha_hygiene_on_application() {
        // eval((\x.\y.x) y) must alpha-rename the bound y so the free
        // argument y isn't captured.
        let e = app(lam("x", lam("y", var("x"))), var("y"));
        let result = eval(&e);
        match result {
            Expr::Lam(bound, body) => {
                assert_ne!(bound, "y");
                assert_eq!(*body, var("y"));
            }
            other => panic!("expected Lam, got {:?}", other),
        }
    }

    #[test]
    fn arithmetic_reduces_left_to_right() {
        let e = Expr::Minus(
            Box::new(Expr::Minus(
                Box::new(num(1.0)),
                Box::new(Expr::Times(Box::new(num(2.0)), Box::new(num(3.0)))),
            )),
            Box::new(num(4.0)),
        );
        assert_eq!(eval(&e), num(-9.0));
    }

    #[test]
    fn if_picks_else_on_zero() {
        let e = Expr::If(Box::new(num(0.0)), Box::new(num(1.0)), Box::new(num(2.0)));
        assert_eq!(eval(&e), num(2.0));
    }

    #[test]
    fn if_picks_then_on_negative_zero() {
        let e = Expr::If(Box::new(num(-0.0)), Box::new(num(1.0)), Box::new(num(2.0)));
        assert_eq!(eval(&e), num(2.0));
    }

    #[test]
    fn if_does_not_force_the_untaken_branch() {
        let omega = app(lam("x", app(var("x"), var("x"))), lam("x", app(var("x"), var("x"))));
        let e = Expr::If(Box::new(num(1.0)), Box::new(num(42.0)), Box::new(omega));
        assert_eq!(eval(&e), num(42.0));
    }

    #[test]
    fn hd_of_nil_is_a_residual() {
        let e = Expr::Hd(Box::new(Expr::Nil));
        assert_eq!(eval(&e), Expr::Hd(Box::new(Expr::Nil)));
    }

    #[test]
    fn hd_and_tl_force_the_spine_not_the_elements() {
        let list = Expr::Cons(
            Box::new(Expr::Plus(Box::new(num(1.0)), Box::new(num(1.0)))),
            Box::new(Expr::Nil),
        );
        assert_eq!(eval(&Expr::Hd(Box::new(list))), num(2.0));
    }

    #[test]
    fn seq_forces_both_sides() {
        let e = Expr::Seq(
            Box::new(Expr::Plus(Box::new(num(1.0)), Box::new(num(1.0)))),
            Box::new(Expr::Plus(Box::new(num(2.0)), Box::new(num(2.0)))),
        );
        assert_eq!(
            eval(&e),
            Expr::Seq(Box::new(num(2.0)), Box::new(num(4.0)))
        );
    }

    #[test]
    fn list_equality_on_identical_finite_lists() {
        let list = || {
            Expr::Cons(
                Box::new(num(1.0)),
                Box::new(Expr::Cons(Box::new(num(2.0)), Box::new(Expr::Nil))),
            )
        };
        let e = Expr::Eq(Box::new(list()), Box::new(list()));
        assert_eq!(eval(&e), num(1.0));
    }

    #[test]
    fn list_with_mismatched_kind_element_residualizes() {
        // comparing (1:#) == (x:#): the heads are a Num and a free Var,
        // which can't be compared, so the whole Eq stays a residual
        // rather than being reported unequal.
        let lhs = Expr::Cons(Box::new(num(1.0)), Box::new(Expr::Nil));
        let rhs = Expr::Cons(Box::new(var("x")), Box::new(Expr::Nil));
        let e = Expr::Eq(Box::new(lhs.clone()), Box::new(rhs.clone()));
        assert_eq!(eval(&e), Expr::Eq(Box::new(lhs), Box::new(rhs)));
    }

    #[test]
    fn empty_vs_nonempty_list_is_not_equal() {
        let e = Expr::Eq(
            Box::new(Expr::Nil),
            Box::new(Expr::Cons(Box::new(num(1.0)), Box::new(Expr::Nil))),
        );
        assert_eq!(eval(&e), num(0.0));
    }

    #[test]
    fn mismatched_kind_equality_is_residual_not_false() {
        let e = Expr::Eq(Box::new(num(1.0)), Box::new(var("x")));
        let result = eval(&e);
        assert_eq!(result, Expr::Eq(Box::new(num(1.0)), Box::new(var("x"))));
    }

    #[test]
    fn letrec_factorial() {
        // letrec f = \n. if n == 0 then 1 else n * f (n - 1) in f 4
        let body = Expr::If(
            Box::new(Expr::Eq(Box::new(var("n")), Box::new(num(0.0)))),
            Box::new(num(1.0)),
            Box::new(Expr::Times(
                Box::new(var("n")),
                Box::new(app(
                    var("f"),
                    Expr::Minus(Box::new(var("n")), Box::new(num(1.0))),
                )),
            )),
        );
        let e = Expr::LetRec(
            "f".into(),
            Box::new(lam("n", body)),
            Box::new(app(var("f"), num(4.0))),
        );
        assert_eq!(eval(&e), num(24.0));
    }
}
