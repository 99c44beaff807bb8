use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Binding, Context, EvalResult, Entry},
        library::Module,
        value::{core::Value, datatype::DatatypeRef},
    },
};

impl Context {
    /// Pushes a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Pops the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scope_stack.len() > 1 {
            self.scope_stack.pop();
        }
    }

    /// Runs `f` in a child scope that is removed afterwards, also on error.
    ///
    /// # Example
    /// ```
    /// use tea::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut ctx = Context::new();
    /// let inner = ctx.scoped(|ctx| {
    ///                    ctx.define_local("x", Value::integer(1));
    ///                    ctx.find("x")
    ///                })
    ///                .unwrap();
    ///
    /// assert_eq!(inner, Value::integer(1));
    /// assert!(ctx.find("x").is_err());
    /// ```
    pub fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        self.push_scope();
        let result = f(self);
        self.pop_scope();
        result
    }

    /// Looks a name up from the innermost scope outwards.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.scope_stack
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Resolves a name to a value.
    ///
    /// Variables yield their value, functions a `func` value referring to
    /// them.
    ///
    /// # Errors
    /// - `UnknownName` if the name is bound nowhere.
    /// - `NotAValue` if the name is a datatype or an operator.
    pub fn find(&self, name: &str) -> EvalResult<Value> {
        match self.entry(name) {
            Some(Entry::Variable(binding)) => Ok(binding.value.clone().with_name(name)),
            Some(Entry::Function(function)) => Ok(Value::function(function.clone())),
            Some(Entry::Datatype(_) | Entry::Operator(_)) => {
                Err(RuntimeError::NotAValue { name: name.to_string() })
            },
            None => Err(RuntimeError::UnknownName { name: name.to_string() }),
        }
    }

    /// Resolves a name to a datatype.
    ///
    /// # Errors
    /// `UnknownDatatype` if the name is not bound to a datatype.
    pub fn datatype(&self, name: &str) -> EvalResult<DatatypeRef> {
        match self.entry(name) {
            Some(Entry::Datatype(datatype)) => Ok(datatype),
            _ => Err(RuntimeError::UnknownDatatype { name: name.to_string() }),
        }
    }

    /// Binds an untyped variable in the innermost scope.
    pub fn define_local(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.insert(name.to_string(),
                         Entry::Variable(Binding { declared: None,
                                                   value }));
        }
    }

    /// Declares a variable of a named datatype in the innermost scope,
    /// initialised to `null`.
    ///
    /// # Errors
    /// `UnknownDatatype` if `datatype` names no datatype.
    pub fn declare(&mut self, name: &str, datatype: &str) -> EvalResult<Value> {
        let declared = self.datatype(datatype)?;
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.insert(name.to_string(),
                         Entry::Variable(Binding { declared: Some(declared),
                                                   value:    Value::null(), }));
        }
        Ok(Value::null())
    }

    /// Assigns to the nearest variable called `name`.
    ///
    /// The value is cast to the variable's declared datatype, if it has one.
    /// An unknown name becomes an untyped variable in the innermost scope.
    ///
    /// # Returns
    /// The value as stored.
    ///
    /// # Errors
    /// - `Cast` if the value does not convert to the declared datatype.
    /// - `NotAValue` if the name is bound to something other than a
    ///   variable.
    ///
    /// # Example
    /// ```
    /// use tea::interpreter::{
    ///     evaluator::core::{Context, Entry},
    ///     value::{core::Value, datatype::INTEGER},
    /// };
    ///
    /// let mut ctx = Context::new();
    /// ctx.scope_stack[0].insert("int".to_string(), Entry::Datatype(&INTEGER));
    /// ctx.declare("x", "int").unwrap();
    ///
    /// assert_eq!(ctx.assign("x", Value::float(2.9)).unwrap(), Value::integer(2));
    /// ```
    pub fn assign(&mut self, name: &str, value: Value) -> EvalResult<Value> {
        let Some(entry) = self.scope_stack
                              .iter_mut()
                              .rev()
                              .find_map(|scope| scope.get_mut(name))
        else {
            self.define_local(name, value.clone());
            return Ok(value);
        };

        let Entry::Variable(binding) = entry else {
            return Err(RuntimeError::NotAValue { name: name.to_string() });
        };

        let value = match binding.declared {
            Some(datatype) => datatype.cast(&value)?,
            None => value,
        };
        binding.value = value.clone();
        Ok(value)
    }

    /// Copies every export of a module into the global scope, in order.
    /// Later exports shadow earlier ones of the same name.
    pub fn load(&mut self, module: &dyn Module) {
        for export in module.exports() {
            let name = export.name().to_string();
            debug!(module = module.name(), %name, "loading export");
            self.scope_stack[0].insert(name, export.into());
        }
    }
}
