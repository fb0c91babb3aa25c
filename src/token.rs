use std::mem;

use crate::location::Location;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    NumberLiteral(f64),
    Semicolon,
    Plus,
    Minus,
    Asterisk,
    Frontslash,
    OpenParen,
    CloseParen,
    /// An unrecognized run of characters. Carries the source along to the
    /// parser so recovery can skip it like any other token.
    Unknown,
    /// Synthesized by the token cursor, never produced by the lexer.
    EndOfFile,
}

impl TokenKind {
    /// Compares kinds, ignoring any literal payload.
    pub fn matches(&self, other: &TokenKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}
