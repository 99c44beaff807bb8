use tracing::trace;

use crate::{
    ast::{Node, Operation, OperatorTags},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind, unquote},
        parser::{
            core::{ParseResult, Parser},
            precedence::{should_reduce, tags_for},
        },
        value::core::Value,
    },
};

/// An entry of the operator stack.
#[derive(Debug)]
enum OperatorEntry {
    /// A pending operator application.
    Operation {
        symbol: String,
        tags:   OperatorTags,
    },
    /// A call whose arguments are collected by the next closing parenthesis.
    Call(String),
    /// An open parenthesis.
    Group,
}

/// An entry of the operand stack.
#[derive(Debug)]
enum OperandEntry {
    Node(Node),
    /// An open parenthesis; operands above it belong to the group.
    Group,
}

/// The two stacks of the expression parser.
#[derive(Debug, Default)]
struct Stacks {
    operators: Vec<OperatorEntry>,
    operands:  Vec<OperandEntry>,
}

impl Stacks {
    fn push_operand(&mut self, node: Node) {
        self.operands.push(OperandEntry::Node(node));
    }

    /// Pops the operator on top and reattaches its operands in source order.
    fn reduce(&mut self) -> ParseResult<()> {
        let Some(OperatorEntry::Operation { symbol, tags }) = self.operators.pop() else {
            return Err(ParseError::InvalidExpression);
        };

        let mut children = Vec::with_capacity(tags.arity);
        for _ in 0..tags.arity {
            match self.operands.pop() {
                Some(OperandEntry::Node(node)) => children.push(node),
                Some(OperandEntry::Group) => {
                    self.operands.push(OperandEntry::Group);
                    return Err(ParseError::MissingOperand { operator: symbol });
                },
                None => return Err(ParseError::MissingOperand { operator: symbol }),
            }
        }
        children.reverse();

        self.push_operand(Node::Operation(Operation { symbol,
                                                      children,
                                                      tags }));
        Ok(())
    }

    /// Reduces operators until the top of the operator stack is no longer an
    /// operation.
    fn reduce_pending(&mut self) -> ParseResult<()> {
        while let Some(OperatorEntry::Operation { .. }) = self.operators.last() {
            self.reduce()?;
        }
        Ok(())
    }

    /// Pops operands down to the nearest group marker, marker included.
    fn take_group(&mut self) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            match self.operands.pop() {
                Some(OperandEntry::Node(node)) => nodes.push(node),
                Some(OperandEntry::Group) => break,
                None => return Err(ParseError::UnbalancedParentheses),
            }
        }
        nodes.reverse();
        Ok(nodes)
    }

    /// Closes the innermost parenthesis.
    ///
    /// If a call is waiting below it, the operands of the group become the
    /// call's arguments. Otherwise the group must hold exactly one operand.
    fn close_group(&mut self) -> ParseResult<()> {
        self.reduce_pending()?;
        if !matches!(self.operators.pop(), Some(OperatorEntry::Group)) {
            return Err(ParseError::UnbalancedParentheses);
        }

        let nodes = self.take_group()?;
        if let Some(OperatorEntry::Call(_)) = self.operators.last() {
            let Some(OperatorEntry::Call(name)) = self.operators.pop() else {
                return Err(ParseError::InvalidExpression);
            };
            self.push_operand(Node::Call { name,
                                           arguments: nodes });
            return Ok(());
        }

        let mut nodes = nodes.into_iter();
        match (nodes.next(), nodes.next()) {
            (Some(node), None) => {
                self.push_operand(node);
                Ok(())
            },
            _ => Err(ParseError::InvalidExpression),
        }
    }

    /// Reduces everything and returns the single remaining operand.
    fn finish(mut self) -> ParseResult<Node> {
        self.reduce_pending()?;
        if !self.operators.is_empty() {
            return Err(ParseError::UnbalancedParentheses);
        }

        match (self.operands.pop(), self.operands.is_empty()) {
            (Some(OperandEntry::Node(node)), true) => Ok(node),
            (Some(OperandEntry::Group), _) => Err(ParseError::UnbalancedParentheses),
            _ => Err(ParseError::InvalidExpression),
        }
    }
}

/// Parses a NUMBER token. A decimal point makes it a float.
fn number_literal(text: &str) -> ParseResult<Value> {
    let invalid = || ParseError::InvalidNumber { text: text.to_string() };
    if text.contains('.') {
        text.parse::<f64>().map(Value::float).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map(Value::integer).map_err(|_| invalid())
    }
}

/// Maps the literal keywords to their values.
fn keyword_literal(text: &str) -> Option<Value> {
    match text {
        "true" => Some(Value::boolean(true)),
        "false" => Some(Value::boolean(false)),
        "null" => Some(Value::null()),
        _ => None,
    }
}

impl Parser {
    /// Parses one expression.
    ///
    /// The expression ends at `;`, which is consumed, at `}`, which is left
    /// for the enclosing block, or at the end of the tokens.
    ///
    /// # Parameters
    /// - `tokens`: Whitespace-free tokens starting at the expression.
    ///
    /// # Returns
    /// The expression tree and the number of tokens consumed.
    ///
    /// # Errors
    /// - `MissingOperand` if an operator lacks operands.
    /// - `UnknownOperator` for symbols that are not expression operators.
    /// - `UnbalancedParentheses` for unmatched parentheses.
    /// - `InvalidExpression` unless exactly one operand remains.
    ///
    /// # Example
    /// ```
    /// use tea::interpreter::{lexer::tokenize, parser::core::Parser};
    ///
    /// let tokens = tokenize("2+3*4;x").unwrap();
    /// let (node, consumed) = Parser::default().parse_expression(&tokens).unwrap();
    ///
    /// assert_eq!(node.to_string(), "(2 + (3 * 4))");
    /// assert_eq!(consumed, 6);
    /// ```
    pub fn parse_expression(&self, tokens: &[Token]) -> ParseResult<(Node, usize)> {
        let mut stacks = Stacks::default();
        let mut previous: Option<&Token> = None;
        let mut consumed = tokens.len();

        for (i, token) in tokens.iter().enumerate() {
            if self.config.trace {
                trace!(%token, operators = ?stacks.operators, "expression token");
            }

            match token.kind {
                TokenKind::Statement => {
                    consumed = i + 1;
                    break;
                },
                TokenKind::RBlock => {
                    consumed = i;
                    break;
                },
                TokenKind::Whitespace => continue,
                TokenKind::Number => stacks.push_operand(Node::Literal(number_literal(&token.text)?)),
                TokenKind::String => stacks.push_operand(Node::literal(Value::string(unquote(&token.text)))),
                TokenKind::Identifier => {
                    if let Some(value) = keyword_literal(&token.text) {
                        stacks.push_operand(Node::Literal(value));
                    } else if tokens.get(i + 1).is_some_and(|next| next.kind == TokenKind::LPrt) {
                        stacks.operators.push(OperatorEntry::Call(token.text.clone()));
                    } else {
                        stacks.push_operand(Node::identifier(&token.text));
                    }
                },
                TokenKind::Operator => {
                    let tags = tags_for(&token.text, previous)?;
                    while let Some(OperatorEntry::Operation { tags: top, .. }) = stacks.operators.last()
                          && should_reduce(*top, tags)
                    {
                        stacks.reduce()?;
                    }
                    stacks.operators.push(OperatorEntry::Operation { symbol: token.text.clone(),
                                                                     tags });
                },
                TokenKind::Separator => {
                    stacks.reduce_pending()?;
                    if !matches!(stacks.operators.last(), Some(OperatorEntry::Group)) {
                        return Err(ParseError::UnexpectedToken { token: token.to_string() });
                    }
                },
                TokenKind::LPrt => {
                    stacks.operators.push(OperatorEntry::Group);
                    stacks.operands.push(OperandEntry::Group);
                },
                TokenKind::RPrt => stacks.close_group()?,
                TokenKind::LBlock => {
                    return Err(ParseError::UnexpectedToken { token: token.to_string() });
                },
            }

            previous = Some(token);
        }

        let node = stacks.finish()?;
        if self.config.trace {
            trace!(%node, consumed, "parsed expression");
        }
        Ok((node, consumed))
    }
}
