//! # tea
//!
//! tea is a small expression-oriented scripting language written in Rust.
//! It tokenizes, parses and evaluates programs made of typed declarations,
//! branches, loops and operator expressions over a lattice of datatypes.
//!
//! # Debugging
//!
//! Call [`init_tracing`] and set `RUST_LOG`:
//! - `RUST_LOG=tea=debug` logs module loading and every generated tree.
//! - `RUST_LOG=tea=trace` also logs overload selection and, with parser
//!   tracing enabled, every consumed token.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::sync::Once;

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::{Context, ControlFlags},
        library::{StandardLibrary, console::Console},
        parser::core::{Parser, ParserConfig},
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of a program as a tree. The tree is built by the
/// parser, rewritten by the optimizer and evaluated by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement nodes for all language constructs.
/// - Serializes nodes back to source-like text for logs and messages.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing or evaluating code, and a wrapper over both for front ends.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the loadable library modules.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing if `RUST_LOG` is unset. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
                    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

                    if std::env::var("RUST_LOG").is_ok() {
                        tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                                        .with_level(true))
                                                      .with(EnvFilter::from_default_env())
                                                      .init();
                    }
                });
}

/// An evaluation context and a parser, shared by every program a front end
/// runs.
///
/// Declarations made by one program are visible to the next, which is what
/// an interactive session needs.
///
/// # Example
/// ```
/// use tea::{Session, interpreter::value::core::Value};
///
/// let mut session = Session::new();
/// session.interpret("var x int = 20;").unwrap();
///
/// assert_eq!(session.interpret("x + 22;").unwrap(), Value::integer(42));
/// ```
#[derive(Debug)]
pub struct Session {
    /// The evaluation context with the standard library and console loaded.
    pub context: Context,
    /// The parser used for every program.
    pub parser:  Parser,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with the standard library and the console module
    /// loaded.
    #[must_use]
    pub fn new() -> Self {
        let mut context = Context::new();
        context.load(&StandardLibrary);
        context.load(&Console);
        Self { context,
               parser: Parser::default() }
    }

    /// Parses and runs a program.
    ///
    /// # Returns
    /// The value of the last evaluated statement, or the value of a
    /// top-level `return`.
    pub fn interpret(&mut self, source: &str) -> Result<Value, Error> {
        let root = self.parser.parse(source)?;
        Ok(self.context.run(&root)?)
    }

    /// Turns parser tracing on or off.
    pub const fn set_trace(&mut self, trace: bool) {
        self.parser.config = ParserConfig { trace };
    }

    /// Whether a program raised the exit flag.
    #[must_use]
    pub const fn exited(&self) -> bool {
        self.context.flags.contains(ControlFlags::EXIT)
    }

    /// Raises the exit flag.
    pub fn exit(&mut self) {
        self.context.flags.insert(ControlFlags::EXIT);
    }
}

/// Runs a program in a fresh session.
///
/// If `auto_print` is set, the final value is written to standard output
/// unless it is `null`.
///
/// # Examples
/// ```
/// use tea::get_result;
///
/// let source = "var result int = 2 + 2;";
/// assert!(get_result(source, false).is_ok());
///
/// // 'x' is not defined
/// let source = "var y int = x + 1;";
/// assert!(get_result(source, false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<Value, Error> {
    let value = Session::new().interpret(source)?;

    if auto_print && value != Value::null() {
        println!("{value}");
    }

    Ok(value)
}
