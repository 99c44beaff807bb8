use crate::{
    ast::{Conditional, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, ControlFlags, EvalResult},
        value::{
            core::{Payload, Value},
            datatype::BOOLEAN,
        },
    },
};

/// Casts a value to `bool` and reads it.
///
/// # Errors
/// `Cast` for values without a boolean interpretation.
///
/// # Example
/// ```
/// use tea::interpreter::{evaluator::control::truthy, value::core::Value};
///
/// assert!(truthy(&Value::integer(3)).unwrap());
/// assert!(!truthy(&Value::null()).unwrap());
/// assert!(truthy(&Value::string("yes")).is_err());
/// ```
pub fn truthy(value: &Value) -> EvalResult<bool> {
    Ok(matches!(BOOLEAN.cast(value)?.payload, Payload::Boolean(true)))
}

impl Context {
    /// Evaluates statements in order in the current scope.
    ///
    /// Stops after the first statement that raises a control flag.
    ///
    /// # Returns
    /// The value of the last evaluated statement, `null` if there was none.
    pub fn eval_statements(&mut self, statements: &[Node]) -> EvalResult<Value> {
        let mut last = Value::null();
        for statement in statements {
            last = self.eval(statement)?;
            if !self.flags.is_empty() {
                break;
            }
        }
        Ok(last)
    }

    /// Evaluates the body of the first arm whose condition is truthy, or
    /// the `else` body if none is.
    pub(crate) fn eval_branch(&mut self,
                              conditionals: &[Conditional],
                              otherwise: Option<&Node>)
                              -> EvalResult<Value> {
        for Conditional { condition, body } in conditionals {
            if truthy(&self.eval(condition)?)? {
                return self.eval(body);
            }
        }
        otherwise.map_or_else(|| Ok(Value::null()), |body| self.eval(body))
    }

    /// Evaluates a `while` loop.
    ///
    /// `continue` is cleared at the end of every iteration, `break` is
    /// cleared and ends the loop. `return` and `exit` end the loop and stay
    /// raised for the enclosing constructs.
    pub(crate) fn eval_loop(&mut self, condition: &Node, body: &Node) -> EvalResult<Value> {
        while truthy(&self.eval(condition)?)? {
            self.eval(body)?;
            self.flags.remove(ControlFlags::CONTINUE);

            if self.flags.contains(ControlFlags::BREAK) {
                self.flags.remove(ControlFlags::BREAK);
                break;
            }
            if self.flags.intersects(ControlFlags::RETURN | ControlFlags::EXIT) {
                break;
            }
        }
        Ok(Value::null())
    }

    /// Handles the flags still raised when a callable body or a program
    /// finishes.
    ///
    /// A raised `return` is consumed and its value replaces the result.
    /// `break` and `continue` have escaped every loop and are errors. `exit`
    /// stays raised for the front end. On error all flags but `exit` are
    /// cleared.
    pub(crate) fn settle(&mut self, result: EvalResult<Value>) -> EvalResult<Value> {
        let transient = ControlFlags::BREAK | ControlFlags::CONTINUE | ControlFlags::RETURN;
        let raised = self.flags & transient;
        self.flags.remove(transient);
        let returned = self.return_value.take();

        let value = result?;
        if raised.contains(ControlFlags::BREAK) {
            return Err(RuntimeError::StrayControl { keyword: "break".to_string() });
        }
        if raised.contains(ControlFlags::CONTINUE) {
            return Err(RuntimeError::StrayControl { keyword: "continue".to_string() });
        }
        if raised.contains(ControlFlags::RETURN) {
            return Ok(returned.unwrap_or_else(Value::null));
        }
        Ok(value)
    }
}
