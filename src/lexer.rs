use crate::{
    cursor::CharCursor,
    error::Error,
    token::{Token, TokenKind},
};

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Splits `source` into tokens.
///
/// Lexing is error-tolerant: an unrecognized run of characters becomes one
/// [`TokenKind::Unknown`] token plus a diagnostic and scanning continues, so
/// a single bad character does not hide the tokens after it. The returned
/// sequence has no end-of-file token; the token cursor synthesizes one.
pub fn tokenize(filename: &str, source: &str) -> (Vec<Token>, Vec<Error>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let mut cursor = CharCursor::new(filename, source);

    loop {
        while cursor.peek(0).is_some_and(is_whitespace) {
            cursor = cursor.advance(1);
        }

        let Some(first) = cursor.peek(0) else {
            break;
        };

        let kind = match first {
            c if c.is_ascii_digit() => {
                // Maximal digit run, stored as a 64-bit float.
                let mut end = cursor.advance(1);
                while end.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                    end = end.advance(1);
                }

                let kind = match cursor.text_between(&end).parse::<f64>() {
                    Ok(value) => TokenKind::NumberLiteral(value),
                    Err(_) => {
                        errors.push(cursor.error_to(&end, "Invalid number literal"));
                        TokenKind::Unknown
                    }
                };

                tokens.push(Token {
                    kind,
                    location: cursor.span_to(&end),
                });
                cursor = end;
                continue;
            }
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Frontslash,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            _ => {
                // Maximal run of non-whitespace characters.
                let mut end = cursor.advance(1);
                while end.peek(0).is_some_and(|c| !is_whitespace(c)) {
                    end = end.advance(1);
                }

                errors.push(cursor.error_to(&end, "Unexpected token"));
                tokens.push(Token {
                    kind: TokenKind::Unknown,
                    location: cursor.span_to(&end),
                });
                cursor = end;
                continue;
            }
        };

        let end = cursor.advance(1);
        tokens.push(Token {
            kind,
            location: cursor.span_to(&end),
        });
        cursor = end;
    }

    (tokens, errors)
}
