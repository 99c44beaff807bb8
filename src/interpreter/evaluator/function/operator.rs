use std::rc::Rc;

use crate::{
    ast::Operation,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, Entry, EvalResult},
            function::core::{Function, describe_arguments},
        },
        value::core::Value,
    },
};

/// An operator symbol bound to up to two functions of different arity.
#[derive(Debug, Clone)]
pub struct Operator {
    /// The symbol as written in source.
    pub symbol:    String,
    /// The function registered at construction.
    pub primary:   Rc<Function>,
    /// A function of another arity, registered later.
    pub secondary: Option<Rc<Function>>,
}

impl Operator {
    /// Creates an operator with one function.
    #[must_use]
    pub fn new(symbol: impl Into<String>, primary: Rc<Function>) -> Self {
        Self { symbol: symbol.into(),
               primary,
               secondary: None }
    }

    /// Registers a function for a second arity, replacing any earlier one.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use tea::interpreter::{
    ///     evaluator::function::{core::Function, operator::Operator},
    ///     value::{core::Value, datatype::NUMBER},
    /// };
    ///
    /// let sub = Rc::new(Function::native("#sub", &[&[&NUMBER, &NUMBER]], |_| Ok(Value::null())));
    /// let neg = Rc::new(Function::native("#unmi", &[&[&NUMBER]], |_| Ok(Value::null())));
    ///
    /// let mut minus = Operator::new("-", sub);
    /// minus.add_overload(neg);
    ///
    /// assert_eq!(minus.function_for(1).map(|f| f.name.as_str()), Some("#unmi"));
    /// assert_eq!(minus.function_for(2).map(|f| f.name.as_str()), Some("#sub"));
    /// assert!(minus.function_for(3).is_none());
    /// ```
    pub fn add_overload(&mut self, function: Rc<Function>) {
        self.secondary = Some(function);
    }

    /// Picks the function taking `arity` operands.
    #[must_use]
    pub fn function_for(&self, arity: usize) -> Option<&Rc<Function>> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
                                      .find(|function| function.arity() == Some(arity))
    }
}

impl Context {
    /// Evaluates an operator application.
    ///
    /// Operands are evaluated left to right; the operand count picks the
    /// operator's function, which is then called like any other function.
    ///
    /// # Errors
    /// - `UnknownOperator` if the symbol is not bound to an operator.
    /// - `UnresolvedOverload` if no function or signature fits.
    pub(crate) fn eval_operation(&mut self, operation: &Operation) -> EvalResult<Value> {
        let arguments = operation.children
                                 .iter()
                                 .map(|child| self.eval(child))
                                 .collect::<EvalResult<Vec<_>>>()?;

        let operator = match self.entry(&operation.symbol) {
            Some(Entry::Operator(operator)) => Rc::clone(operator),
            _ => return Err(RuntimeError::UnknownOperator { symbol: operation.symbol.clone() }),
        };

        let Some(function) = operator.function_for(arguments.len()) else {
            return Err(RuntimeError::UnresolvedOverload { function:  operator.symbol.clone(),
                                                          arguments: describe_arguments(&arguments), });
        };

        self.call(function, arguments)
    }
}
