use tracing::debug;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, strip_whitespace, tokenize},
        parser::optimizer::optimize,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Options consulted by every sub-parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Emit `tracing` events for every consumed token and the final tree.
    pub trace: bool,
}

/// Turns tokens into syntax trees.
///
/// The parser holds no state besides its configuration, so one instance can
/// parse any number of programs.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    /// The active configuration.
    pub config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Builds the optimized root sequence of a program.
    ///
    /// Whitespace tokens are removed first. The root sequence must consume
    /// every token; a stray `}` is rejected.
    ///
    /// # Parameters
    /// - `tokens`: The complete token stream of a program.
    ///
    /// # Returns
    /// A [`Node::Sequence`] holding the program's statements.
    ///
    /// # Errors
    /// Any `ParseError` raised by a sub-parser or by the optimizer.
    pub fn generate(&self, tokens: &[Token]) -> ParseResult<Node> {
        let tokens = strip_whitespace(tokens.to_vec());

        let (statements, consumed) = self.parse_statements(&tokens)?;
        if consumed < tokens.len() {
            return Err(ParseError::InvalidBlock);
        }

        let root = optimize(Node::Sequence(statements))?;
        if self.config.trace {
            debug!(tree = %root, "generated syntax tree");
        }
        Ok(root)
    }

    /// Tokenizes and parses source text in one step.
    ///
    /// # Errors
    /// Any tokenizer or parser error.
    ///
    /// # Example
    /// ```
    /// use tea::{ast::Node, interpreter::parser::core::Parser};
    ///
    /// let root = Parser::default().parse("1 + 2;").unwrap();
    ///
    /// assert!(matches!(root, Node::Sequence(ref children) if children.len() == 1));
    /// ```
    pub fn parse(&self, source: &str) -> ParseResult<Node> {
        self.generate(&tokenize(source)?)
    }
}
