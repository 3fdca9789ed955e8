//! Token types produced by the lexer and consumed by the parser.
//!
//! The lexer itself lives outside this crate; only the exchange format is
//! defined here. A token stream is terminated by a single [`TokenKind::Eof`]
//! token.

use crate::Position;
use std::fmt;

/// A lexical unit with its source span.
///
/// Tokens are immutable after construction; `pos_start`/`pos_end` are
/// independent copies, never shared mutable references.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos_start: Position,
    pub pos_end: Position,
    /// Whether an adjacent string literal permits implicit concatenation.
    ///
    /// Single-purpose parse-time metadata, modeled as an explicit field
    /// rather than a generic side-channel bag.
    pub allows_concat: bool,
}

impl Token {
    pub fn new(kind: TokenKind, pos_start: Position, pos_end: Position) -> Self {
        Token {
            kind,
            pos_start,
            pos_end,
            allows_concat: false,
        }
    }

    /// A token that permits implicit string concatenation with a neighbor.
    #[must_use]
    pub fn with_concat(mut self) -> Self {
        self.allows_concat = true;
        self
    }

    /// The textual payload of an identifier, keyword, or string token.
    ///
    /// Name-carrying AST nodes (variable names, property names, HTML tag
    /// names) read their token through this accessor.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(s) | TokenKind::Keyword(s) | TokenKind::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Token kinds.
///
/// Literal kinds carry their decoded payload; punctuation kinds are unit
/// variants. Operator tokens are listed roughly in precedence-table order.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Number literal: `42`, `3.14`.
    Number(f64),
    /// String literal, escapes already decoded.
    Str(String),
    /// Identifier.
    Ident(String),
    /// Reserved word: `var`, `define`, `class`, `tag`, ...
    Keyword(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    DoubleStar,
    DoubleLess,
    DoubleGreater,
    TripleGreater,
    Ampersand,
    Pipe,
    Caret,
    Tilde,

    DoubleEquals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    DoubleAmpersand,
    DoublePipe,
    DoubleQuestion,
    Bang,
    QuestionDot,
    QuestionDoubleColon,

    Equals,
    PlusEquals,
    MinusEquals,
    DoubleQuestionEquals,
    DoubleAmpersandEquals,
    DoublePipeEquals,
    DoublePlus,
    DoubleMinus,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    DoubleColon,
    Dot,
    TripleDot,
    Semicolon,
    Arrow,
    Hash,
    At,

    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Str(s) => write!(f, "\"{s}\""),
            TokenKind::Ident(s) | TokenKind::Keyword(s) => f.write_str(s),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::DoubleStar => f.write_str("**"),
            TokenKind::DoubleLess => f.write_str("<<"),
            TokenKind::DoubleGreater => f.write_str(">>"),
            TokenKind::TripleGreater => f.write_str(">>>"),
            TokenKind::Ampersand => f.write_str("&"),
            TokenKind::Pipe => f.write_str("|"),
            TokenKind::Caret => f.write_str("^"),
            TokenKind::Tilde => f.write_str("~"),
            TokenKind::DoubleEquals => f.write_str("=="),
            TokenKind::NotEquals => f.write_str("!="),
            TokenKind::LessThan => f.write_str("<"),
            TokenKind::LessThanOrEqual => f.write_str("<="),
            TokenKind::GreaterThan => f.write_str(">"),
            TokenKind::GreaterThanOrEqual => f.write_str(">="),
            TokenKind::DoubleAmpersand => f.write_str("&&"),
            TokenKind::DoublePipe => f.write_str("||"),
            TokenKind::DoubleQuestion => f.write_str("??"),
            TokenKind::Bang => f.write_str("!"),
            TokenKind::QuestionDot => f.write_str("?."),
            TokenKind::QuestionDoubleColon => f.write_str("?::"),
            TokenKind::Equals => f.write_str("="),
            TokenKind::PlusEquals => f.write_str("+="),
            TokenKind::MinusEquals => f.write_str("-="),
            TokenKind::DoubleQuestionEquals => f.write_str("??="),
            TokenKind::DoubleAmpersandEquals => f.write_str("&&="),
            TokenKind::DoublePipeEquals => f.write_str("||="),
            TokenKind::DoublePlus => f.write_str("++"),
            TokenKind::DoubleMinus => f.write_str("--"),
            TokenKind::LeftParen => f.write_str("("),
            TokenKind::RightParen => f.write_str(")"),
            TokenKind::LeftBracket => f.write_str("["),
            TokenKind::RightBracket => f.write_str("]"),
            TokenKind::LeftBrace => f.write_str("{"),
            TokenKind::RightBrace => f.write_str("}"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::DoubleColon => f.write_str("::"),
            TokenKind::Dot => f.write_str("."),
            TokenKind::TripleDot => f.write_str("..."),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Arrow => f.write_str("->"),
            TokenKind::Hash => f.write_str("#"),
            TokenKind::At => f.write_str("@"),
            TokenKind::Newline => f.write_str("\\n"),
            TokenKind::Eof => f.write_str("<eof>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dummy(kind: TokenKind) -> Token {
        let pos = Position::start("test.wf", "");
        Token::new(kind, pos.clone(), pos)
    }

    #[test]
    fn text_reads_name_payloads() {
        assert_eq!(dummy(TokenKind::Ident("title".into())).text(), Some("title"));
        assert_eq!(dummy(TokenKind::Str("hi".into())).text(), Some("hi"));
        assert_eq!(dummy(TokenKind::Plus).text(), None);
    }

    #[test]
    fn concat_flag_defaults_off() {
        let tok = dummy(TokenKind::Str("a".into()));
        assert!(!tok.allows_concat);
        assert!(tok.with_concat().allows_concat);
    }
}
