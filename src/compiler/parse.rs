use crate::common::span::{Span, Spanned};
use crate::compiler::syntax::Syntax;
use crate::compiler::token::Token;
use crate::construct::tree::Expr;

/// Recursive-descent / precedence-climbing parser over a token stream.
/// Implements the grammar in spec §6, lowest to highest precedence:
/// `;;` < `if`/`let`/`letrec` < `==`/`<=` < `+`/`-` < `*` < unary `-`
/// < `:` < `hd`/`tl` < application.
pub struct Parser {
    tokens: Vec<Spanned<Token>>,
    pos: usize,
}

impl Parser {
    pub fn parse(tokens: Vec<Spanned<Token>>) -> Result<Expr, Syntax> {
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expr()?;
        if let Some(extra) = parser.peek() {
            return Err(Syntax::error(
                &format!("unexpected {} after a complete expression", extra.item),
                &extra.span,
            ));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Spanned<Token>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned<Token>> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map(|t| t.span.clone())
            .unwrap_or_else(Span::empty)
    }

    fn eof_error(&self, expected: &str) -> Syntax {
        Syntax::error(
            &format!("unexpected end of input, expected {}", expected),
            &self.end_span(),
        )
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<Span, Syntax> {
        match self.advance() {
            Some(t) if t.item == expected => Ok(t.span),
            Some(t) => Err(Syntax::error(
                &format!("expected {}, found {}", what, t.item),
                &t.span,
            )),
            None => Err(self.eof_error(what)),
        }
    }

    /// Entry point: a full expression, used both at the top level and
    /// anywhere spec §6 says a construct "extends as far right as
    /// possible" (lambda bodies, let/letrec bound expressions and
    /// bodies, if/then/else branches).
    fn expr(&mut self) -> Result<Expr, Syntax> {
        self.seq()
    }

    // `;;`, right-associative, value-forming.
    fn seq(&mut self) -> Result<Expr, Syntax> {
        let left = self.control()?;
        if matches!(self.peek().map(|t| &t.item), Some(Token::SeqSep)) {
            self.advance();
            let right = self.seq()?;
            return Ok(Expr::Seq(Box::new(left), Box::new(right)));
        }
        Ok(left)
    }

    // `if`/`then`/`else`, `let ... in`, `letrec ... in`.
    fn control(&mut self) -> Result<Expr, Syntax> {
        match self.peek().map(|t| &t.item) {
            Some(Token::If) => {
                self.advance();
                let cond = self.expr()?;
                self.expect(Token::Then, "`then`")?;
                let then_branch = self.expr()?;
                self.expect(Token::Else, "`else`")?;
                let else_branch = self.expr()?;
                Ok(Expr::If(
                    Box::new(cond),
                    Box::new(then_branch),
                    Box::new(else_branch),
                ))
            }
            Some(Token::Let) => {
                self.advance();
                let name = self.ident()?;
                self.expect(Token::Equals, "`=`")?;
                let bound = self.expr()?;
                self.expect(Token::In, "`in`")?;
                let body = self.expr()?;
                Ok(Expr::Let(name, Box::new(bound), Box::new(body)))
            }
            Some(Token::LetRec) => {
                self.advance();
                let name = self.ident()?;
                self.expect(Token::Equals, "`=`")?;
                let bound = self.expr()?;
                self.expect(Token::In, "`in`")?;
                let body = self.expr()?;
                Ok(Expr::LetRec(name, Box::new(bound), Box::new(body)))
            }
            _ => self.comparison(),
        }
    }

    // `==`, `<=` — non-chained.
    fn comparison(&mut self) -> Result<Expr, Syntax> {
        let left = self.add_sub()?;
        match self.peek().map(|t| &t.item) {
            Some(Token::EqEq) => {
                self.advance();
                let right = self.add_sub()?;
                Ok(Expr::Eq(Box::new(left), Box::new(right)))
            }
            Some(Token::Leq) => {
                self.advance();
                let right = self.add_sub()?;
                Ok(Expr::Leq(Box::new(left), Box::new(right)))
            }
            _ => Ok(left),
        }
    }

    // `+`, `-` — left-associative.
    fn add_sub(&mut self) -> Result<Expr, Syntax> {
        let mut left = self.mul()?;
        loop {
            match self.peek().map(|t| &t.item) {
                Some(Token::Plus) => {
                    self.advance();
                    let right = self.mul()?;
                    left = Expr::Plus(Box::new(left), Box::new(right));
                }
                Some(Token::Minus) => {
                    self.advance();
                    let right = self.mul()?;
                    left = Expr::Minus(Box::new(left), Box::new(right));
                }
                _ => return Ok(left),
            }
        }
    }

    // `*` — left-associative.
    fn mul(&mut self) -> Result<Expr, Syntax> {
        let mut left = self.unary()?;
        while matches!(self.peek().map(|t| &t.item), Some(Token::Star)) {
            self.advance();
            let right = self.unary()?;
            left = Expr::Times(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // unary `-` — right-associative, stackable.
    fn unary(&mut self) -> Result<Expr, Syntax> {
        if matches!(self.peek().map(|t| &t.item), Some(Token::Minus)) {
            self.advance();
            let operand = self.unary()?;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.cons()
    }

    // `:` — right-associative.
    fn cons(&mut self) -> Result<Expr, Syntax> {
        let left = self.hd_tl()?;
        if matches!(self.peek().map(|t| &t.item), Some(Token::Colon)) {
            self.advance();
            let right = self.cons()?;
            return Ok(Expr::Cons(Box::new(left), Box::new(right)));
        }
        Ok(left)
    }

    // `hd`, `tl` — prefix.
    fn hd_tl(&mut self) -> Result<Expr, Syntax> {
        match self.peek().map(|t| &t.item) {
            Some(Token::Hd) => {
                self.advance();
                let operand = self.hd_tl()?;
                Ok(Expr::Hd(Box::new(operand)))
            }
            Some(Token::Tl) => {
                self.advance();
                let operand = self.hd_tl()?;
                Ok(Expr::Tl(Box::new(operand)))
            }
            _ => self.application(),
        }
    }

    // application — left-associative, binds tighter than everything else.
    fn application(&mut self) -> Result<Expr, Syntax> {
        let mut result = self.atom()?;
        while self.starts_atom() {
            let arg = self.atom()?;
            result = Expr::App(Box::new(result), Box::new(arg));
        }
        Ok(result)
    }

    fn starts_atom(&self) -> bool {
        matches!(
            self.peek().map(|t| &t.item),
            Some(Token::Ident(_))
                | Some(Token::Num(_))
                | Some(Token::Lambda)
                | Some(Token::Hash)
                | Some(Token::LParen)
        )
    }

    fn atom(&mut self) -> Result<Expr, Syntax> {
        match self.advance() {
            Some(Spanned { item: Token::Ident(name), .. }) => Ok(Expr::Var(name)),
            Some(Spanned { item: Token::Num(n), .. }) => Ok(Expr::Num(n)),
            Some(Spanned { item: Token::Hash, .. }) => Ok(Expr::Nil),
            Some(Spanned { item: Token::Lambda, .. }) => {
                let param = self.ident()?;
                self.expect(Token::Dot, "`.`")?;
                let body = self.expr()?;
                Ok(Expr::Lam(param, Box::new(body)))
            }
            Some(Spanned { item: Token::LParen, .. }) => {
                let inner = self.expr()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            Some(t) => Err(Syntax::error(
                &format!("expected an expression, found {}", t.item),
                &t.span,
            )),
            None => Err(self.eof_error("an expression")),
        }
    }

    fn ident(&mut self) -> Result<String, Syntax> {
        match self.advance() {
            Some(Spanned { item: Token::Ident(name), .. }) => Ok(name),
            Some(t) => Err(Syntax::error(
                &format!("expected an identifier, found {}", t.item),
                &t.span,
            )),
            None => Err(self.eof_error("an identifier")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::source::Source;
    use crate::compiler::lex::Lexer;

    fn parse(src: &str) -> Expr {
        let tokens = Lexer::lex(Source::source(src)).unwrap();
        Parser::parse(tokens).unwrap()
    }

    #[test]
    fn parses_application_tighter_than_arithmetic() {
        // `a b + c` is `(a b) + c`, not `a (b + c)`.
        let e = parse("a b + c");
        assert_eq!(
            e,
            Expr::Plus(
                Box::new(Expr::App(
                    Box::new(Expr::Var("a".into())),
                    Box::new(Expr::Var("b".into())),
                )),
                Box::new(Expr::Var("c".into())),
            )
        );
    }

    #[test]
    fn parses_left_associative_arithmetic() {
        let e = parse("1 - 2 - 3");
        assert_eq!(
            e,
            Expr::Minus(
                Box::new(Expr::Minus(
                    Box::new(Expr::Num(1.0)),
                    Box::new(Expr::Num(2.0)),
                )),
                Box::new(Expr::Num(3.0)),
            )
        );
    }

    #[test]
    fn parses_let_body_as_far_right_as_possible() {
        // the let's body extends through the `;;`, rather than the `;;`
        // splitting the let from a trailing `2`.
        let e = parse("let x = 1 in x + 1 ;; 2");
        match e {
            Expr::Let(name, bound, body) => {
                assert_eq!(name, "x");
                assert_eq!(*bound, Expr::Num(1.0));
                assert!(matches!(*body, Expr::Seq(..)));
            }
            other => panic!("expected Let, got {:?}", other),
        }
    }

    #[test]
    fn parses_cons_right_associative() {
        let e = parse("1 : 2 : #");
        assert_eq!(
            e,
            Expr::Cons(
                Box::new(Expr::Num(1.0)),
                Box::new(Expr::Cons(Box::new(Expr::Num(2.0)), Box::new(Expr::Nil))),
            )
        );
    }

    #[test]
    fn rejects_trailing_garbage() {
        let tokens = Lexer::lex(Source::source("1 2 )")).unwrap();
        assert!(Parser::parse(tokens).is_err());
    }
}
