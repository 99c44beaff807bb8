use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// Each variant is a reportable condition; a front end may keep accepting
/// input after any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// No signature of a function accepts the supplied argument datatypes.
    #[error("FunctionException: No signature of {function} matches ({arguments})")]
    UnresolvedOverload {
        /// The function or operator name.
        function:  String,
        /// The argument datatypes, comma separated.
        arguments: String,
    },
    /// Equality or ordering between values of different datatypes.
    #[error("RuntimeException: Two values of different types may not be compared ({left}, {right})")]
    IncomparableTypes {
        /// Datatype of the left operand.
        left:  String,
        /// Datatype of the right operand.
        right: String,
    },
    /// Division or modulo by zero.
    #[error("RuntimeException: Can not divide by 0")]
    DivisionByZero,
    /// Integer arithmetic left the representable range.
    #[error("RuntimeException: Integer overflow while computing {operation}")]
    Overflow {
        /// The operation that overflowed.
        operation: String,
    },
    /// There is no lattice path from a value to the requested datatype.
    #[error("CastException: Can not cast {value} to {datatype}")]
    Cast {
        /// The formatted source value.
        value:    String,
        /// The requested datatype.
        datatype: String,
    },
    /// A name that is bound nowhere in the scope chain.
    #[error("RuntimeException: Unknown name '{name}'")]
    UnknownName {
        /// The name that was looked up.
        name: String,
    },
    /// A declaration or cast refers to a name that is not a datatype.
    #[error("RuntimeException: Unknown datatype '{name}'")]
    UnknownDatatype {
        /// The name that was looked up.
        name: String,
    },
    /// An operation refers to a symbol that is not a loaded operator.
    #[error("OperatorException: Unknown operator '{symbol}'")]
    UnknownOperator {
        /// The operator symbol.
        symbol: String,
    },
    /// A call target that is neither a function nor a function value.
    #[error("FunctionException: '{name}' is not callable")]
    NotCallable {
        /// The called name.
        name: String,
    },
    /// A datatype or operator was used where a value is required.
    #[error("RuntimeException: '{name}' is not a value")]
    NotAValue {
        /// The referenced name.
        name: String,
    },
    /// `break` or `continue` escaped every enclosing loop.
    #[error("RuntimeException: '{keyword}' outside of a loop")]
    StrayControl {
        /// The offending keyword.
        keyword: String,
    },
}
