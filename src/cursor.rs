use std::rc::Rc;

use crate::{
    error::Error,
    location::{Line, Location},
    token::{Token, TokenKind},
};

/// An immutable, forward-only view over source text.
///
/// Advancing returns a new cursor and leaves the original usable, so
/// speculative scanning is "advance a copy, keep whichever cursor you need".
/// There is no way to move backwards.
#[derive(Clone, Debug)]
pub struct CharCursor {
    text: Rc<str>,
    lines: Rc<[Rc<Line>]>,
    line: usize,
    column: usize,
    offset: usize,
}

impl CharCursor {
    pub fn new(filename: &str, source: &str) -> Self {
        CharCursor {
            text: Rc::from(source),
            lines: Line::split(filename, source).into(),
            line: 0,
            column: 0,
            offset: 0,
        }
    }

    /// The character `offset` characters ahead, if any.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.text[self.offset..].chars().nth(offset)
    }

    /// Returns a cursor moved forward by `count` characters, saturating at
    /// the end of the text.
    pub fn advance(&self, count: usize) -> Self {
        let mut cursor = self.clone();

        for _ in 0..count {
            let Some(next) = cursor.peek(0) else {
                break;
            };

            cursor.offset += next.len_utf8();
            cursor.column += next.len_utf8();

            // Lines keep their terminators, so the columns of a line tile it
            // exactly and the boundary check is a plain length comparison.
            if cursor.column >= cursor.lines[cursor.line].text.len()
                && cursor.line + 1 < cursor.lines.len()
            {
                cursor.line += 1;
                cursor.column = 0;
            }
        }

        cursor
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// Location of the character under the cursor.
    pub fn location(&self) -> Location {
        Location {
            line: self.lines[self.line].clone(),
            position: self.column,
            length: 1,
        }
    }

    /// The span from this cursor up to `end`, which must not precede it.
    ///
    /// A span that crosses a line boundary is truncated to the rest of the
    /// starting line; the grammar never produces such a span, so the exact
    /// multi-line extent is not modeled.
    pub fn span_to(&self, end: &CharCursor) -> Location {
        assert!(end.offset >= self.offset, "span end precedes its start");

        let line = &self.lines[self.line];
        let length = if self.line == end.line {
            end.column - self.column
        } else {
            line.trimmed().len().saturating_sub(self.column)
        };

        Location {
            line: line.clone(),
            position: self.column,
            length: length.max(1),
        }
    }

    /// The exact source text between this cursor and `end`, which must not
    /// precede it.
    pub fn text_between(&self, end: &CharCursor) -> &str {
        assert!(end.offset >= self.offset, "span end precedes its start");

        &self.text[self.offset..end.offset]
    }

    /// A diagnostic pointing at the character under the cursor.
    pub fn error(&self, message: impl ToString) -> Error {
        Error::new(self.location(), message)
    }

    /// A diagnostic spanning from this cursor up to `end`.
    pub fn error_to(&self, end: &CharCursor, message: impl ToString) -> Error {
        Error::new(self.span_to(end), message)
    }
}

/// An immutable, forward-only view over a token sequence.
///
/// Reads past the last token return a synthetic [`TokenKind::EndOfFile`]
/// token instead of failing, so lookahead never needs an emptiness check.
/// The sentinel is built once and shared by every cursor derived from this
/// one.
#[derive(Clone, Debug)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    end_of_file: Rc<Token>,
    position: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let location = match tokens.last() {
            Some(last) => {
                let line = last.location.line.clone();
                Location {
                    position: line.trimmed().len(),
                    length: 1,
                    line,
                }
            }
            None => Location {
                line: Rc::new(Line {
                    filename: Rc::from("<unknown>"),
                    text: String::new(),
                    number: 1,
                }),
                position: 0,
                length: 1,
            },
        };

        TokenCursor {
            tokens,
            end_of_file: Rc::new(Token {
                kind: TokenKind::EndOfFile,
                location,
            }),
            position: 0,
        }
    }

    /// The token `offset` tokens ahead; past the end of the sequence this is
    /// the end-of-file sentinel.
    pub fn peek(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.position + offset)
            .unwrap_or(&self.end_of_file)
    }

    /// Returns a cursor moved forward by `count` tokens. The position may
    /// pass the end of the sequence; every read out there yields the
    /// sentinel.
    pub fn advance(&self, count: usize) -> Self {
        let mut cursor = self.clone();
        cursor.position += count;
        cursor
    }

    /// Returns a cursor placed on the first token matching one of `kinds`,
    /// or at the end of the sequence if none does.
    pub fn advance_until(&self, kinds: &[TokenKind]) -> Self {
        let mut cursor = self.clone();

        while !cursor.at_end() {
            if kinds.iter().any(|kind| kind.matches(&cursor.peek(0).kind)) {
                break;
            }
            cursor = cursor.advance(1);
        }

        cursor
    }

    /// Like [`TokenCursor::advance_until`], but consumes the matching token
    /// as well.
    pub fn advance_through(&self, kinds: &[TokenKind]) -> Self {
        let cursor = self.advance_until(kinds);

        if cursor.at_end() {
            cursor
        } else {
            cursor.advance(1)
        }
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// A diagnostic pointing at the token under the cursor.
    pub fn error(&self, message: impl ToString) -> Error {
        Error::new(self.peek(0).location.clone(), message)
    }
}
