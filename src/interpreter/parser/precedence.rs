use crate::{
    ast::OperatorTags,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Precedence of prefix operators. Binds tighter than any binary operator.
pub const UNARY_PRECEDENCE: u8 = 7;

const fn binary(precedence: u8, left_associative: bool) -> OperatorTags {
    OperatorTags { precedence,
                   arity: 2,
                   left_associative }
}

const fn unary() -> OperatorTags {
    OperatorTags { precedence:       UNARY_PRECEDENCE,
                   arity:            1,
                   left_associative: false, }
}

/// Looks up the static tags of a binary operator.
///
/// From tightest to loosest: `^`, multiplicative, additive and the cast `:`,
/// `%`, relational, logical. Only `^` groups to the right.
#[must_use]
pub fn binary_tags(symbol: &str) -> Option<OperatorTags> {
    let tags = match symbol {
        "^" => binary(6, false),
        "*" | "/" => binary(5, true),
        "+" | "-" | ":" => binary(4, true),
        "%" => binary(3, true),
        "==" | "!=" | "<" | ">" | "<=" | ">=" => binary(2, true),
        "&&" | "||" | "^|" => binary(1, true),
        _ => return None,
    };
    Some(tags)
}

/// Tests whether a token closes an operand, so that a following `+` or `-`
/// is binary.
fn ends_operand(previous: Option<&Token>) -> bool {
    previous.is_some_and(|token| {
                matches!(token.kind,
                         TokenKind::Number
                         | TokenKind::String
                         | TokenKind::Identifier
                         | TokenKind::RPrt)
            })
}

/// Classifies one occurrence of an operator.
///
/// `!` is always prefix. `+` and `-` are prefix unless the previous token
/// ends an operand. Everything else comes from [`binary_tags`].
///
/// # Errors
/// `ParseError::UnknownOperator` for symbols without an entry.
///
/// # Example
/// ```
/// use tea::interpreter::{
///     lexer::{Token, TokenKind},
///     parser::precedence::tags_for,
/// };
///
/// let three = Token::new(TokenKind::Number, "3");
/// let plus = Token::new(TokenKind::Operator, "+");
///
/// assert_eq!(tags_for("-", Some(&three)).unwrap().arity, 2);
/// assert_eq!(tags_for("-", Some(&plus)).unwrap().arity, 1);
/// assert_eq!(tags_for("-", None).unwrap().arity, 1);
/// assert!(tags_for("=", None).is_err());
/// ```
pub fn tags_for(symbol: &str, previous: Option<&Token>) -> ParseResult<OperatorTags> {
    match symbol {
        "!" => Ok(unary()),
        "+" | "-" if !ends_operand(previous) => Ok(unary()),
        _ => binary_tags(symbol).ok_or_else(|| ParseError::UnknownOperator { operator: symbol.to_string() }),
    }
}

/// Decides whether the operator on top of the stack is reduced before
/// `incoming` is pushed.
///
/// A left-associative operator lets equal precedence reduce first, a
/// right-associative one only strictly higher precedence.
#[must_use]
pub const fn should_reduce(top: OperatorTags, incoming: OperatorTags) -> bool {
    if incoming.left_associative {
        top.precedence >= incoming.precedence
    } else {
        top.precedence > incoming.precedence
    }
}
