use std::{collections::HashMap, rc::Rc};

use bitflags::bitflags;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::function::{core::Function, operator::Operator},
        value::{core::Value, datatype::DatatypeRef},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

bitflags! {
    /// Non-local exits raised during evaluation.
    ///
    /// A raised flag makes every enclosing sequence stop early until the
    /// construct that handles it is reached.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ControlFlags: u8 {
        /// Leave the enclosing loop.
        const BREAK    = 1;
        /// Skip to the next condition check of the enclosing loop.
        const CONTINUE = 1 << 1;
        /// Leave the enclosing callable body; the value waits in
        /// [`Context::return_value`].
        const RETURN   = 1 << 2;
        /// Stop the program or session.
        const EXIT     = 1 << 3;
    }
}

/// A variable slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The datatype assignments are cast to, if the variable was declared.
    pub declared: Option<DatatypeRef>,
    /// The current value.
    pub value:    Value,
}

/// Anything a name can be bound to.
#[derive(Debug, Clone)]
pub enum Entry {
    /// A variable.
    Variable(Binding),
    /// A datatype usable in declarations and casts.
    Datatype(DatatypeRef),
    /// A callable function.
    Function(Rc<Function>),
    /// An operator symbol.
    Operator(Rc<Operator>),
}

/// Stores the runtime evaluation context.
///
/// The context holds a stack of scopes, the innermost last. The first scope
/// is global: loaded modules and top-level declarations live there and
/// survive between programs run in the same context.
///
/// ## Usage
///
/// `Context` is created once per session and reused for every program.
/// Evaluation of any node goes through [`Context::eval`].
#[derive(Debug)]
pub struct Context {
    /// Scopes from global to innermost.
    pub scope_stack:  Vec<HashMap<String, Entry>>,
    /// The raised control flags.
    pub flags:        ControlFlags,
    /// The value carried by a raised [`ControlFlags::RETURN`].
    pub return_value: Option<Value>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with an empty global scope and no raised flags.
    ///
    /// Nothing is loaded; see [`Context::load`].
    #[must_use]
    pub fn new() -> Self {
        Self { scope_stack:  vec![HashMap::new()],
               flags:        ControlFlags::empty(),
               return_value: None, }
    }

    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for node evaluation. Statements that
    /// produce nothing meaningful evaluate to `null`.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    ///
    /// # Returns
    /// The value of the node.
    ///
    /// # Errors
    /// Any `RuntimeError` raised below this node.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Literal(value) => Ok(value.clone()),
            Node::Identifier(name) => self.find(name),
            Node::Operation(operation) => self.eval_operation(operation),
            Node::Call { name, arguments } => self.eval_call(name, arguments),
            Node::Cast { datatype, child } => {
                let value = self.eval(child)?;
                self.datatype(datatype)?.cast(&value)
            },
            Node::Sequence(children) => self.scoped(|context| context.eval_statements(children)),
            Node::Declaration { name, datatype } => self.declare(name, datatype),
            Node::Assignment { name, child } => {
                let value = self.eval(child)?;
                self.assign(name, value)
            },
            Node::Branch { conditionals,
                           otherwise, } => self.eval_branch(conditionals, otherwise.as_deref()),
            Node::Loop { condition, body } => self.eval_loop(condition, body),
            Node::Return(child) => {
                let value = self.eval(child)?;
                self.return_value = Some(value);
                self.flags.insert(ControlFlags::RETURN);
                Ok(Value::null())
            },
            Node::Break => {
                self.flags.insert(ControlFlags::BREAK);
                Ok(Value::null())
            },
            Node::Continue => {
                self.flags.insert(ControlFlags::CONTINUE);
                Ok(Value::null())
            },
        }
    }

    /// Runs a program.
    ///
    /// The statements of a root sequence are evaluated directly in the
    /// current scope, so declarations persist for later programs run in the
    /// same context. A `return` ends the program with its value.
    ///
    /// # Returns
    /// The value of the last evaluated statement, or the returned value.
    ///
    /// # Errors
    /// Any evaluation error, and `StrayControl` for a `break` or `continue`
    /// outside of every loop.
    ///
    /// # Example
    /// ```
    /// use tea::interpreter::{
    ///     evaluator::core::Context, library::StandardLibrary, parser::core::Parser,
    ///     value::core::Value,
    /// };
    ///
    /// let mut context = Context::new();
    /// context.load(&StandardLibrary);
    ///
    /// let root = Parser::default().parse("var x int = 2; x * 21;").unwrap();
    /// assert_eq!(context.run(&root).unwrap(), Value::integer(42));
    /// ```
    pub fn run(&mut self, root: &Node) -> EvalResult<Value> {
        let result = match root {
            Node::Sequence(children) => self.eval_statements(children),
            other => self.eval(other),
        };
        self.settle(result)
    }
}
