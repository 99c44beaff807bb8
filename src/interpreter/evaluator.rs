/// Core evaluation logic and context management.
///
/// Contains the runtime context, the control flags and the dispatch from
/// syntax tree nodes to their evaluation.
pub mod core;

/// Scope and name handling.
///
/// Pushing and popping scopes, name lookup, declarations, assignments and
/// module loading.
pub mod utils;

/// Control flow evaluation.
///
/// Sequences, branches, loops and the handling of raised control flags at
/// callable and program boundaries.
pub mod control;

/// Function and operator dispatch.
///
/// Signatures, first-match overload resolution and operators that bind one
/// symbol to functions of different arity.
pub mod function;
