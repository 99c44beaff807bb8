use std::{fmt, rc::Rc};

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Binding, Context, Entry, EvalResult},
        value::{
            core::{Payload, Value},
            datatype::DatatypeRef,
        },
    },
};

/// Type alias for host-implemented function bodies.
///
/// A native body runs in the call's child scope and reads its arguments from
/// there by parameter name.
pub type NativeFn = fn(&mut Context) -> EvalResult<Value>;

/// Names used for the parameters of native functions, in order.
pub const PARAMETER_NAMES: [&str; 4] = ["a", "b", "c", "d"];

/// A typed formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Arguments must be of this datatype or one of its subtypes.
    pub datatype: DatatypeRef,
    /// The name the argument is bound to.
    pub name:     String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(datatype: DatatypeRef, name: impl Into<String>) -> Self {
        Self { datatype,
               name: name.into() }
    }
}

/// What a signature executes.
#[derive(Clone)]
pub enum Body {
    /// Host code.
    Native(NativeFn),
    /// A syntax tree, evaluated like any other node.
    Tree(Node),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => write!(f, "Native"),
            Self::Tree(node) => write!(f, "Tree({node})"),
        }
    }
}

/// One overload: typed parameters and the body they are bound for.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Parameters in positional order.
    pub parameters: Vec<Parameter>,
    /// The executed body.
    pub body:       Body,
}

impl Signature {
    /// Creates a signature.
    #[must_use]
    pub const fn new(parameters: Vec<Parameter>, body: Body) -> Self {
        Self { parameters, body }
    }

    /// Tests whether the signature accepts the arguments.
    ///
    /// The counts must agree and every argument's datatype must equal its
    /// parameter's datatype or reach it through supertype links. Narrowing
    /// casts are never considered.
    #[must_use]
    pub fn matches(&self, arguments: &[Value]) -> bool {
        self.parameters.len() == arguments.len()
        && self.parameters
               .iter()
               .zip(arguments)
               .all(|(parameter, argument)| argument.datatype.is_subtype_of(parameter.datatype))
    }
}

/// A named list of overloads.
#[derive(Debug, Clone)]
pub struct Function {
    /// The name used in messages.
    pub name:       String,
    /// Overloads in declaration order.
    pub signatures: Vec<Signature>,
}

impl Function {
    /// Creates a function.
    #[must_use]
    pub fn new(name: impl Into<String>, signatures: Vec<Signature>) -> Self {
        Self { name: name.into(),
               signatures }
    }

    /// Creates a function whose overloads share one native body.
    ///
    /// Each entry of `overloads` lists the parameter datatypes of one
    /// signature; parameters are named `a`, `b` and so on.
    ///
    /// # Example
    /// ```
    /// use tea::interpreter::{
    ///     evaluator::function::core::Function,
    ///     value::{
    ///         core::Value,
    ///         datatype::{ANY, NUMBER, STRING},
    ///     },
    /// };
    ///
    /// let add = Function::native("#add", &[&[&NUMBER, &NUMBER], &[&STRING, &ANY]], |_| {
    ///     Ok(Value::null())
    /// });
    ///
    /// assert_eq!(add.signatures.len(), 2);
    /// assert_eq!(add.signatures[1].parameters[1].name, "b");
    /// ```
    #[must_use]
    pub fn native(name: &str, overloads: &[&[DatatypeRef]], body: NativeFn) -> Self {
        let signatures = overloads.iter()
                                  .map(|datatypes| {
                                      let parameters =
                                          datatypes.iter()
                                                   .copied()
                                                   .zip(PARAMETER_NAMES)
                                                   .map(|(datatype, name)| Parameter::new(datatype, name))
                                                   .collect();
                                      Signature::new(parameters, Body::Native(body))
                                  })
                                  .collect();
        Self::new(name, signatures)
    }

    /// Returns the first signature that accepts the arguments.
    ///
    /// Resolution is first-match, not best-match: the declaration order of
    /// the signatures decides.
    #[must_use]
    pub fn resolve(&self, arguments: &[Value]) -> Option<(usize, &Signature)> {
        self.signatures
            .iter()
            .enumerate()
            .find(|(_, signature)| signature.matches(arguments))
    }

    /// The parameter count of the first signature.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        self.signatures.first().map(|signature| signature.parameters.len())
    }
}

/// Lists the datatypes of arguments for messages, e.g. `int, string`.
#[must_use]
pub fn describe_arguments(arguments: &[Value]) -> String {
    arguments.iter()
             .map(|argument| argument.datatype.name)
             .collect::<Vec<_>>()
             .join(", ")
}

impl Context {
    /// Calls a function.
    ///
    /// Resolves the first matching signature, binds the arguments to its
    /// parameter names in a child scope and evaluates the body there. A
    /// `return` inside the body ends the call with its value.
    ///
    /// # Errors
    /// - `UnresolvedOverload` if no signature accepts the arguments.
    /// - `StrayControl` if `break` or `continue` escape the body.
    /// - Anything the body raises.
    pub fn call(&mut self, function: &Function, arguments: Vec<Value>) -> EvalResult<Value> {
        let Some((index, signature)) = function.resolve(&arguments) else {
            return Err(RuntimeError::UnresolvedOverload { function:  function.name.clone(),
                                                          arguments: describe_arguments(&arguments), });
        };
        trace!(function = %function.name, signature = index, "resolved overload");

        let result = self.scoped(|context| {
                             for (parameter, argument) in signature.parameters.iter().zip(arguments) {
                                 context.define_local(&parameter.name, argument);
                             }
                             match &signature.body {
                                 Body::Native(native) => native(context),
                                 Body::Tree(node) => context.eval(node),
                             }
                         });
        self.settle(result)
    }

    /// Evaluates `name(arguments...)`.
    ///
    /// Arguments are evaluated left to right first. The callee is a function
    /// bound to `name` or a variable holding a `func` value.
    pub(crate) fn eval_call(&mut self, name: &str, arguments: &[Node]) -> EvalResult<Value> {
        let arguments = arguments.iter()
                                 .map(|argument| self.eval(argument))
                                 .collect::<EvalResult<Vec<_>>>()?;

        let function = match self.entry(name) {
            Some(Entry::Function(function)) => Rc::clone(function),
            Some(Entry::Variable(Binding { value: Value { payload: Payload::Function(function), .. },
                                           .. })) => Rc::clone(function),
            Some(_) => return Err(RuntimeError::NotCallable { name: name.to_string() }),
            None => return Err(RuntimeError::UnknownName { name: name.to_string() }),
        };

        self.call(&function, arguments)
    }
}
