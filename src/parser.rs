//! Grammar parser.
//!
//! This module parses the following grammar:
//!
//! ```text
//! program -> statement* EOF ;
//! statement -> expression ';' ;
//!
//! expression -> add_sub ;
//! add_sub -> mul_div ( ( '+' | '-' ) mul_div )* ;
//! mul_div -> atom ( ( '*' | '/' ) atom )* ;
//! atom -> NUMBER | '(' expression ')' ;
//! ```
//!
//! `NUMBER`: Non-negative decimal integers, stored as 64-bit floats.
//!
//! Every `try_parse` function follows the same contract. `Ok(None)` means
//! the production did not match and nothing was consumed; the caller is free
//! to try an alternative. `Ok(Some((cursor, node)))` is a match, with the
//! returned cursor placed past the node. `Err` means the production matched
//! partially and then failed; backtracking past the partial match would hide
//! the real failure point, so the error propagates to [`parse`], the only
//! place that recovers: it skips through the next `';'`, records a
//! [`Statement::Unknown`], and carries on with the next statement.

use crate::{
    ast::{Expression, Statement},
    cursor::TokenCursor,
    error::Error,
    token::{Token, TokenKind},
};

impl Statement {
    fn try_parse(cursor: TokenCursor<'_>) -> Result<Option<(TokenCursor<'_>, Self)>, Error> {
        let Some((cursor, expression)) = Expression::try_parse(cursor)? else {
            return Ok(None);
        };

        if !cursor.peek(0).kind.matches(&TokenKind::Semicolon) {
            return Err(cursor.error("Expected semicolon"));
        }

        Ok(Some((cursor.advance(1), Statement::Print(expression))))
    }
}

impl Expression {
    fn try_parse(cursor: TokenCursor<'_>) -> Result<Option<(TokenCursor<'_>, Self)>, Error> {
        // Binary operator levels from the lowest precedence to the highest.
        // Each level folds to the left, so `1 - 2 - 3` is `(1 - 2) - 3`.
        let levels: &[&[TokenKind]] = &[
            &[TokenKind::Plus, TokenKind::Minus],
            &[TokenKind::Asterisk, TokenKind::Frontslash],
        ];

        Self::try_parse_binary(cursor, levels)
    }

    fn try_parse_binary<'t>(
        cursor: TokenCursor<'t>,
        levels: &[&[TokenKind]],
    ) -> Result<Option<(TokenCursor<'t>, Self)>, Error> {
        let Some((current, higher)) = levels.split_first() else {
            return Self::try_parse_atom(cursor);
        };

        let Some((mut cursor, mut expression)) = Self::try_parse_binary(cursor, higher)? else {
            return Ok(None);
        };

        while current.iter().any(|kind| kind.matches(&cursor.peek(0).kind)) {
            let operator = cursor.peek(0).clone();
            let operand = cursor.advance(1);

            // The operator commits this level: a missing right-hand side is
            // an error, not a silent rewind.
            let Some((next, rhs)) = Self::try_parse_binary(operand.clone(), higher)? else {
                return Err(operand.error("Expected expression"));
            };

            cursor = next;
            expression = Self::binary(operator, expression, rhs);
        }

        Ok(Some((cursor, expression)))
    }

    fn binary(operator: Token, left: Expression, right: Expression) -> Expression {
        let left = Box::new(left);
        let right = Box::new(right);

        match operator.kind {
            TokenKind::Plus => Expression::Add {
                token: operator,
                left,
                right,
            },
            TokenKind::Minus => Expression::Subtract {
                token: operator,
                left,
                right,
            },
            TokenKind::Asterisk => Expression::Multiply {
                token: operator,
                left,
                right,
            },
            TokenKind::Frontslash => Expression::Divide {
                token: operator,
                left,
                right,
            },
            _ => unreachable!("Not a binary operator: {:?}", operator.kind),
        }
    }

    fn try_parse_atom(cursor: TokenCursor<'_>) -> Result<Option<(TokenCursor<'_>, Self)>, Error> {
        if let Some(parsed) = Self::try_parse_literal(cursor.clone())? {
            return Ok(Some(parsed));
        }

        Self::try_parse_paren(cursor)
    }

    fn try_parse_literal(
        cursor: TokenCursor<'_>,
    ) -> Result<Option<(TokenCursor<'_>, Self)>, Error> {
        let token = cursor.peek(0).clone();
        let TokenKind::NumberLiteral(value) = token.kind else {
            return Ok(None);
        };

        Ok(Some((
            cursor.advance(1),
            Expression::NumberLiteral { value, token },
        )))
    }

    fn try_parse_paren(cursor: TokenCursor<'_>) -> Result<Option<(TokenCursor<'_>, Self)>, Error> {
        if !cursor.peek(0).kind.matches(&TokenKind::OpenParen) {
            return Ok(None);
        }

        // The paren commits only once the inner expression matches; until
        // then the caller reports the failure at its own level.
        let Some((cursor, expression)) = Self::try_parse(cursor.advance(1))? else {
            return Ok(None);
        };

        if !cursor.peek(0).kind.matches(&TokenKind::CloseParen) {
            return Err(cursor.error("Expected ')'"));
        }

        Ok(Some((cursor.advance(1), expression)))
    }
}

/// Parses `tokens` into statements.
///
/// Parsing always returns: syntax errors go into the second list, the
/// statement they poisoned is replaced by [`Statement::Unknown`], and
/// parsing resumes after the statement's terminating `';'`. One malformed
/// statement therefore costs exactly one statement and one diagnostic.
pub fn parse(tokens: &[Token]) -> (Vec<Statement>, Vec<Error>) {
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    let mut cursor = TokenCursor::new(tokens);
    while !cursor.at_end() {
        match Statement::try_parse(cursor.clone()) {
            Ok(Some((next, statement))) => {
                cursor = next;
                statements.push(statement);
            }
            Ok(None) => {
                errors.push(cursor.error("Expected statement"));
                cursor = cursor.advance_through(&[TokenKind::Semicolon]);
                statements.push(Statement::Unknown);
            }
            Err(error) => {
                errors.push(error);
                cursor = cursor.advance_through(&[TokenKind::Semicolon]);
                statements.push(Statement::Unknown);
            }
        }
    }

    (statements, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_source(source: &str) -> (Vec<Statement>, Vec<Error>) {
        let (tokens, errors) = tokenize("test.tally", source);
        assert!(errors.is_empty(), "unexpected lexer errors: {errors:?}");

        parse(&tokens)
    }

    fn shape(expression: &Expression) -> String {
        match expression {
            Expression::NumberLiteral { value, .. } => format!("{value}"),
            Expression::Add { left, right, .. } => {
                format!("(+ {} {})", shape(left), shape(right))
            }
            Expression::Subtract { left, right, .. } => {
                format!("(- {} {})", shape(left), shape(right))
            }
            Expression::Multiply { left, right, .. } => {
                format!("(* {} {})", shape(left), shape(right))
            }
            Expression::Divide { left, right, .. } => {
                format!("(/ {} {})", shape(left), shape(right))
            }
        }
    }

    fn statement_shapes(statements: &[Statement]) -> Vec<String> {
        statements
            .iter()
            .map(|statement| match statement {
                Statement::Print(expression) => shape(expression),
                Statement::Unknown => String::from("<error>"),
            })
            .collect()
    }

    #[test]
    fn test_left_associativity() {
        let (statements, errors) = parse_source("1 - 2 - 3;10 / 5 / 2;");

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            vec!["(- (- 1 2) 3)", "(/ (/ 10 5) 2)"],
            statement_shapes(&statements)
        );
    }

    #[test]
    fn test_precedence() {
        let (statements, errors) = parse_source("1 + 2 * 3; 1 * 2 - 3; 1 - 2 / 3 + 4;");

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            vec!["(+ 1 (* 2 3))", "(- (* 1 2) 3)", "(+ (- 1 (/ 2 3)) 4)"],
            statement_shapes(&statements)
        );
    }

    #[test]
    fn test_parens_override_precedence() {
        let (statements, errors) = parse_source("(1 + 2) * 3; ((4)); 2 * (3 + 4) * 5;");

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            vec!["(* (+ 1 2) 3)", "4", "(* (* 2 (+ 3 4)) 5)"],
            statement_shapes(&statements)
        );
    }

    #[test]
    fn test_one_statement_per_semicolon() {
        let (statements, errors) = parse_source("1;\n2 + 3;\n4 * 5;\n");

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(3, statements.len());
    }

    #[test]
    fn test_empty_token_list() {
        let (statements, errors) = parse(&[]);

        assert!(statements.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_operand() {
        let (statements, errors) = parse_source("1 +;2 + 3;");

        assert_eq!(vec!["<error>", "(+ 2 3)"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        pretty_assertions::assert_eq!(
            "test.tally:1:4: Expected expression\n\
             1 +;2 + 3;\n\
             \x20  ^\n",
            errors[0].to_string()
        );
    }

    #[test]
    fn test_missing_semicolon() {
        let (statements, errors) = parse_source("1 + 2");

        assert_eq!(vec!["<error>"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        // Points one past the visible end of the line.
        pretty_assertions::assert_eq!(
            "test.tally:1:6: Expected semicolon\n\
             1 + 2\n\
             \x20    ^\n",
            errors[0].to_string()
        );
    }

    #[test]
    fn test_missing_close_paren() {
        let (statements, errors) = parse_source("(1 + 2;3;");

        assert_eq!(vec!["<error>", "3"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        assert_eq!("Expected ')'", errors[0].message);
        assert_eq!(";", errors[0].location.extract());
    }

    #[test]
    fn test_empty_parens_are_not_a_statement() {
        let (statements, errors) = parse_source("();1;");

        assert_eq!(vec!["<error>", "1"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        assert_eq!("Expected statement", errors[0].message);
        assert_eq!("(", errors[0].location.extract());
    }

    #[test]
    fn test_missing_operand_inside_parens() {
        let (statements, errors) = parse_source("1 + (;2;");

        assert_eq!(vec!["<error>", "2"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        assert_eq!("Expected expression", errors[0].message);
        assert_eq!("(", errors[0].location.extract());
    }

    #[test]
    fn test_statement_starting_with_operator() {
        let (statements, errors) = parse_source("* 1;2;");

        assert_eq!(vec!["<error>", "2"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        assert_eq!("Expected statement", errors[0].message);
        assert_eq!("*", errors[0].location.extract());
    }

    #[test]
    fn test_unknown_token_poisons_its_statement() {
        let (tokens, lex_errors) = tokenize("test.tally", "1 $ 2;3;");
        assert_eq!(1, lex_errors.len());

        let (statements, errors) = parse(&tokens);

        assert_eq!(vec!["<error>", "3"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        assert_eq!("Expected semicolon", errors[0].message);
        assert_eq!("$", errors[0].location.extract());
    }

    #[test]
    fn test_each_bad_statement_gets_one_diagnostic() {
        let (statements, errors) = parse_source("1 +;+ 2;(3;4;");

        assert_eq!(
            vec!["<error>", "<error>", "<error>", "4"],
            statement_shapes(&statements)
        );
        assert_eq!(
            vec!["Expected expression", "Expected statement", "Expected ')'"],
            errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_error_without_semicolon_consumes_the_rest() {
        let (statements, errors) = parse_source("1 + (2");

        assert_eq!(vec!["<error>"], statement_shapes(&statements));
        assert_eq!(1, errors.len());
        assert_eq!("Expected ')'", errors[0].message);
    }

    #[test]
    fn test_statements_keep_source_order() {
        let (statements, errors) = parse_source("5 - 4;6/(3*2);");

        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            vec!["(- 5 4)", "(/ 6 (* 3 2))"],
            statement_shapes(&statements)
        );
    }

    #[test]
    fn test_expression_nodes_carry_their_tokens() {
        let (statements, errors) = parse_source("1 + 2;");

        assert!(errors.is_empty(), "{errors:?}");
        let Statement::Print(expression) = &statements[0] else {
            panic!("expected a parsed statement");
        };

        assert_eq!("+", expression.location().extract());
        let Expression::Add { left, right, .. } = expression else {
            panic!("expected an addition");
        };
        assert_eq!("1", left.token().location.extract());
        assert_eq!("2", right.token().location.extract());
    }
}
