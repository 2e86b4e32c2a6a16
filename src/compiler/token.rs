use std::fmt;

/// A single lexical token of the surface grammar in spec §6. `Token`s
/// carry their own data (a number literal holds its `f64`, an
/// identifier holds its name) and are spanned with `Spanned<Token>`
/// by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Num(f64),

    Lambda, // \
    Dot,    // .
    LParen,
    RParen,

    Plus,
    Minus,
    Star,
    EqEq,  // ==
    Leq,   // <=

    If,
    Then,
    Else,
    Let,
    LetRec,
    Equals, // =
    In,

    SeqSep, // ;;
    Hash,   // #
    Colon,  // :
    Hd,
    Tl,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Token::Ident(i) => return write!(f, "identifier `{}`", i),
            Token::Num(n) => return write!(f, "number `{}`", n),
            Token::Lambda => "`\\`",
            Token::Dot => "`.`",
            Token::LParen => "`(`",
            Token::RParen => "`)`",
            Token::Plus => "`+`",
            Token::Minus => "`-`",
            Token::Star => "`*`",
            Token::EqEq => "`==`",
            Token::Leq => "`<=`",
            Token::If => "`if`",
            Token::Then => "`then`",
            Token::Else => "`else`",
            Token::Let => "`let`",
            Token::LetRec => "`letrec`",
            Token::Equals => "`=`",
            Token::In => "`in`",
            Token::SeqSep => "`;;`",
            Token::Hash => "`#`",
            Token::Colon => "`:`",
            Token::Hd => "`hd`",
            Token::Tl => "`tl`",
        };
        write!(f, "{}", message)
    }
}
