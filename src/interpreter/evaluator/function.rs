/// Signatures, functions and calls.
///
/// Defines `Parameter`, `Signature`, `Body` and `Function`, and implements
/// first-match overload resolution and the call protocol.
pub mod core;

/// Operators.
///
/// Binds one symbol to a primary function and an optional function of a
/// different arity, e.g. binary and unary `-`.
pub mod operator;
