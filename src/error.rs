use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur during tokenizing and parsing of
/// source code: unknown characters, malformed statements, operators without
/// operands, unsupported keywords and invalid cast targets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unresolved
/// overloads, cross-type comparisons, division by zero, failed casts and
/// unknown names.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure surfaced by [`crate::Session::interpret`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Tokenizing or parsing failed; nothing was evaluated.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
