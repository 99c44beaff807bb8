/// The evaluator module executes syntax trees and computes results.
///
/// The evaluator walks the tree produced by the parser, resolves names in a
/// stack of scopes, dispatches operators and calls to the first matching
/// signature and propagates non-local exits through control flags.
///
/// # Responsibilities
/// - Evaluates every node kind against a mutable `Context`.
/// - Handles declarations, casts to declared datatypes and scoping.
/// - Reports runtime errors such as failed casts or unresolved overloads.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces a flat stream of tokens:
/// numbers, strings, identifiers, operators, separators, brackets and
/// whitespace runs. Keywords are ordinary identifiers at this stage.
pub mod lexer;
/// Loadable modules.
///
/// Defines the `Module` trait and the modules every session starts with:
/// the standard library of datatypes, operators and their functions, and
/// console output.
pub mod library;
/// The parser module builds the syntax tree from tokens.
///
/// The parser turns the token stream into a root sequence of statements,
/// inferring operator arity and associativity from neighbouring tokens, and
/// rewrites cast operations in a final pass.
///
/// # Responsibilities
/// - Converts tokens into `Node` trees.
/// - Validates the grammar and reports the offending token.
/// - Emits trace events when configured to.
pub mod parser;
/// The value module defines the runtime data types.
///
/// Values are a datatype tag plus a payload. Datatypes form a lattice with
/// `any` at the top; each datatype knows how to cast foreign values into
/// itself and how to format its payloads.
pub mod value;
