use std::fmt;

use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Parse-time facts about one occurrence of an operator.
///
/// The same symbol may be tagged differently depending on its neighbours,
/// e.g. `-` is unary after an operator and binary after an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorTags {
    /// Binding strength; higher binds tighter.
    pub precedence:       u8,
    /// Number of operands the operator takes.
    pub arity:            usize,
    /// Whether equal precedence groups to the left.
    pub left_associative: bool,
}

/// An operator applied to its operands, e.g. `a + b` or `-x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// The operator symbol as written.
    pub symbol:   String,
    /// Operands in source order.
    pub children: Vec<Node>,
    /// How the parser classified the operator.
    pub tags:     OperatorTags,
}

/// One `if`/`else if` arm: the body runs when the condition is truthy.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    /// The tested expression.
    pub condition: Node,
    /// The body, always a [`Node::Sequence`].
    pub body:      Node,
}

/// A node of the abstract syntax tree.
///
/// Trees are strictly owned; nothing is shared between nodes. The parser
/// builds them bottom-up, the optimizer rewrites cast operations into
/// [`Node::Cast`] and evaluation never changes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A constant.
    Literal(Value),
    /// A reference to a name.
    Identifier(String),
    /// An operator application.
    Operation(Operation),
    /// A call such as `print(x)`.
    Call {
        /// The called name.
        name:      String,
        /// Arguments in source order.
        arguments: Vec<Node>,
    },
    /// A conversion of the child to a named datatype.
    Cast {
        /// The datatype name.
        datatype: String,
        /// The converted expression.
        child:    Box<Node>,
    },
    /// Statements evaluated in order in a child scope.
    Sequence(Vec<Node>),
    /// Introduces a variable of a declared datatype, initialised to `null`.
    Declaration {
        /// The variable name.
        name:     String,
        /// The declared datatype name.
        datatype: String,
    },
    /// Rebinds a variable.
    Assignment {
        /// The variable name.
        name:  String,
        /// The assigned expression.
        child: Box<Node>,
    },
    /// An `if` chain.
    Branch {
        /// Arms tested in order.
        conditionals: Vec<Conditional>,
        /// The `else` body.
        otherwise:    Option<Box<Node>>,
    },
    /// A `while` loop.
    Loop {
        /// Checked before every iteration.
        condition: Box<Node>,
        /// The loop body.
        body:      Box<Node>,
    },
    /// Leaves the enclosing callable body with a value.
    Return(Box<Node>),
    /// Leaves the enclosing loop.
    Break,
    /// Skips to the next condition check of the enclosing loop.
    Continue,
}

impl Node {
    /// Creates a literal node.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates an identifier node.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Evaluates the node in `context`.
    ///
    /// # Errors
    /// Propagates any `RuntimeError` raised while evaluating the tree.
    ///
    /// # Example
    /// ```
    /// use tea::{
    ///     ast::Node,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::new();
    /// let node = Node::literal(42_i64);
    ///
    /// assert_eq!(node.eval(&mut context).unwrap(), Value::integer(42));
    /// ```
    pub fn eval(&self, context: &mut Context) -> EvalResult<Value> {
        context.eval(self)
    }
}

fn join(nodes: &[Node], separator: &str) -> String {
    nodes.iter()
         .map(ToString::to_string)
         .collect::<Vec<_>>()
         .join(separator)
}

/// Renders the node back into source text that parses to the same tree.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Operation(Operation { symbol, children, .. }) => match children.as_slice() {
                [operand] => write!(f, "({symbol}{operand})"),
                [left, right] => write!(f, "({left} {symbol} {right})"),
                _ => write!(f, "{symbol}({})", join(children, ", ")),
            },
            Self::Call { name, arguments } => write!(f, "{name}({})", join(arguments, ", ")),
            Self::Cast { datatype, child } => write!(f, "({child} : {datatype})"),
            Self::Sequence(children) => {
                write!(f, "{{ ")?;
                for child in children {
                    write!(f, "{child}; ")?;
                }
                write!(f, "}}")
            },
            Self::Declaration { name, datatype } => write!(f, "var {name} {datatype}"),
            Self::Assignment { name, child } => write!(f, "{name} = {child}"),
            Self::Branch { conditionals, otherwise } => {
                for (i, Conditional { condition, body }) in conditionals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " else ")?;
                    }
                    write!(f, "if ({condition}) {body}")?;
                }
                if let Some(otherwise) = otherwise {
                    write!(f, " else {otherwise}")?;
                }
                Ok(())
            },
            Self::Loop { condition, body } => write!(f, "while ({condition}) {body}"),
            Self::Return(child) => write!(f, "return {child}"),
            Self::Break => write!(f, "break"),
            Self::Continue => write!(f, "continue"),
        }
    }
}
