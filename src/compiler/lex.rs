use std::rc::Rc;

use crate::common::source::Source;
use crate::common::span::{Span, Spanned};
use crate::compiler::syntax::Syntax;
use crate::compiler::token::Token;

/// Lexes a source file into a stream of spanned tokens.
///
/// The lexer greedily looks for the longest next token, consumes it,
/// and advances past it; whitespace between tokens is stripped and
/// discarded (there's no significant-whitespace or comment syntax in
/// this language — `#` is itself a token, the empty-list literal, not
/// a comment marker).
pub struct Lexer {
    source: Rc<Source>,
    index: usize,
}

impl Lexer {
    pub fn lex(source: Rc<Source>) -> Result<Vec<Spanned<Token>>, Syntax> {
        let mut lexer = Lexer { source, index: 0 };
        let mut tokens = vec![];

        lexer.strip();
        while lexer.index < lexer.source.contents.len() {
            tokens.push(lexer.next_token()?);
            lexer.strip();
        }

        Ok(tokens)
    }

    fn remaining(&self) -> &str {
        &self.source.contents[self.index..]
    }

    fn strip(&mut self) {
        let consumed = self
            .remaining()
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum::<usize>();
        self.index += consumed;
    }

    fn span(&self, start: usize) -> Span {
        Span::new(&self.source, start, self.index - start)
    }

    fn next_token(&mut self) -> Result<Spanned<Token>, Syntax> {
        let start = self.index;
        let c = self.remaining().chars().next().unwrap();

        let token = if c.is_ascii_digit() {
            self.lex_number()
        } else if c.is_ascii_lowercase() {
            self.lex_word()
        } else if c.is_ascii_uppercase() {
            return Err(Syntax::error(
                "identifiers must start with a lowercase letter \
                 (names starting uppercase are reserved for the interpreter)",
                &self.span_at(start, 1),
            ));
        } else {
            self.lex_symbol()?
        };

        Ok(Spanned::new(token, self.span(start)))
    }

    fn span_at(&self, start: usize, len: usize) -> Span {
        Span::new(&self.source, start, len)
    }

    fn lex_number(&mut self) -> Token {
        let start = self.index;
        let mut chars = self.remaining().chars().peekable();

        let mut len = 0;
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                len += 1;
                chars.next();
            } else {
                break;
            }
        }
        if let Some('.') = chars.peek() {
            let mut lookahead = chars.clone();
            lookahead.next();
            if matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
                len += 1;
                chars.next();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        len += 1;
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
        }

        let text = &self.source.contents[start..start + len];
        let value: f64 = text.parse().expect("lexed number literal must parse");
        self.index += len;
        Token::Num(value)
    }

    fn lex_word(&mut self) -> Token {
        let start = self.index;
        let len = self
            .remaining()
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .map(char::len_utf8)
            .sum::<usize>();
        self.index += len;

        let word = &self.source.contents[start..start + len];
        match word {
            "if" => Token::If,
            "then" => Token::Then,
            "else" => Token::Else,
            "let" => Token::Let,
            "letrec" => Token::LetRec,
            "in" => Token::In,
            "hd" => Token::Hd,
            "tl" => Token::Tl,
            _ => Token::Ident(word.to_string()),
        }
    }

    fn lex_symbol(&mut self) -> Result<Token, Syntax> {
        let start = self.index;
        let two = {
            let mut chars = self.remaining().chars();
            match (chars.next(), chars.next()) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            }
        };

        if let Some(token) = match two {
            Some(('=', '=')) => Some(Token::EqEq),
            Some(('<', '=')) => Some(Token::Leq),
            Some((';', ';')) => Some(Token::SeqSep),
            _ => None,
        } {
            self.index += 2;
            return Ok(token);
        }

        let c = self.remaining().chars().next().unwrap();
        let token = match c {
            '\\' => Token::Lambda,
            '.' => Token::Dot,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '=' => Token::Equals,
            '#' => Token::Hash,
            ':' => Token::Colon,
            other => {
                return Err(Syntax::error(
                    &format!("unexpected character '{}'", other),
                    &self.span_at(start, other.len_utf8()),
                ));
            }
        };
        self.index += c.len_utf8();
        Ok(token)
    }
}
