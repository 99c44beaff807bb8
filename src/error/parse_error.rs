use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Parse errors are reported before any evaluation takes place. Every variant
/// carries the offending token, symbol or keyword so that the message can be
/// shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokenizer met a character that starts no token.
    #[error("ParseException: Unexpected character '{text}'")]
    UnexpectedCharacter {
        /// The unrecognised source text.
        text: String,
    },
    /// A token appeared where the grammar does not allow it.
    #[error("ParseException: Unexpected token {token}")]
    UnexpectedToken {
        /// Description of the token.
        token: String,
    },
    /// An operator was reduced with fewer operands than its arity requires.
    #[error("ParseException: {operator} is missing operands")]
    MissingOperand {
        /// The operator symbol.
        operator: String,
    },
    /// An operator symbol has no precedence/arity entry.
    #[error("ParseException: Unknown operator {operator}")]
    UnknownOperator {
        /// The operator symbol.
        operator: String,
    },
    /// A number literal could not be represented.
    #[error("ParseException: Invalid number literal {text}")]
    InvalidNumber {
        /// The literal as written.
        text: String,
    },
    /// A keyword that is reserved but not supported yet.
    #[error("ParseException: Functionality not implemented: {keyword}")]
    NotImplemented {
        /// The keyword that was used.
        keyword: String,
    },
    /// A `var` statement did not follow `var <name> [: <name>]* <type> [= <expr>] ;`.
    #[error("ParseException: Invalid declaration: Unexpected {found}")]
    InvalidDeclaration {
        /// Description of what was found instead.
        found: String,
    },
    /// An assignment without target or value.
    #[error("ParseException: Invalid assignment")]
    InvalidAssignment,
    /// A body was not enclosed in matching braces.
    #[error("ParseException: Missing block borders")]
    InvalidBlock,
    /// An expression left more or fewer than one operand.
    #[error("ParseException: Invalid expression")]
    InvalidExpression,
    /// A parenthesis without its partner.
    #[error("ParseException: Unbalanced parentheses")]
    UnbalancedParentheses,
    /// An `if`/`while` condition was empty or not parenthesised.
    #[error("ParseException: Invalid condition")]
    InvalidCondition,
    /// The right-hand side of the cast operator `:` was not a type name.
    #[error("ParseException: Invalid cast target {found}")]
    InvalidCast {
        /// Description of the node found instead of a type name.
        found: String,
    },
}
