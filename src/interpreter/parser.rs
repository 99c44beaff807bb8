/// Parser entry point and configuration.
///
/// Defines `Parser`, `ParserConfig` and `ParseResult`, and turns a token
/// stream into an optimized root sequence.
pub mod core;

/// Expression parsing.
///
/// A two-stack operator precedence parser for operands, operators, calls and
/// parenthesised groups.
pub mod expression;

/// Operator classification.
///
/// Infers precedence, arity and associativity of each operator occurrence
/// from the token in front of it.
pub mod precedence;

/// Statement parsing.
///
/// Declarations, assignments, control flow exits and expression statements.
pub mod statement;

/// Block, branch and loop parsing.
///
/// Handles every construct whose body is delimited by braces.
pub mod block;

/// Bracket scanning and token helpers shared by the sub-parsers.
pub mod utils;

/// Post-parse rewrites.
///
/// Turns cast operations into dedicated cast nodes.
pub mod optimizer;
