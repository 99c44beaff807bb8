use std::{any::Any, collections::HashSet, fmt, rc::Rc};

use crate::interpreter::{
    evaluator::function::core::Function,
    value::{
        datatype::{BOOLEAN, Datatype, DatatypeRef, FLOAT, FUNCTION, INTEGER, LIST, NULL, STRING},
        set_value::SetValue,
    },
};

/// The raw content of a value.
///
/// The shape is chosen by the datatype that owns the value. A payload on its
/// own carries no type information and is never compared or displayed
/// without its datatype outside of this module.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Absence of a value.
    Null,
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision float.
    Float(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// UTF-8 text.
    String(String),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// Distinct hashable elements.
    Set(HashSet<SetValue>),
    /// Key/value pairs in insertion order.
    Map(Vec<(Value, Value)>),
    /// A callable function.
    Function(Rc<Function>),
    /// An opaque host object.
    Object(Rc<dyn Any>),
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        use Payload::{Boolean, Float, Function, Integer, List, Map, Null, Object, Set, String};

        match (self, other) {
            (Null, Null) => true,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Set(a), Set(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Function(a), Function(b)) => Rc::ptr_eq(a, b),
            (Object(a), Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            },
            Self::Set(elements) => {
                let elements: Vec<String> = elements.iter().map(ToString::to_string).collect();
                write!(f, "{{{}}}", elements.join(", "))
            },
            Self::Map(entries) => {
                let entries: Vec<String> =
                    entries.iter().map(|(key, value)| format!("{key}: {value}")).collect();
                write!(f, "{{{}}}", entries.join(", "))
            },
            Self::Function(function) => write!(f, "function {}", function.name),
            Self::Object(_) => write!(f, "object"),
        }
    }
}

/// Represents a runtime value in the interpreter.
///
/// A value is a datatype tag plus a payload. Identifiers that resolve to a
/// variable carry the variable's name along, which is used in messages.
#[derive(Debug, Clone)]
pub struct Value {
    /// The datatype that owns the payload.
    pub datatype: DatatypeRef,
    /// The raw content.
    pub payload:  Payload,
    /// The name the value was bound to, if it was read from a variable.
    pub name:     Option<String>,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.datatype == other.datatype && self.payload == other.payload
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datatype.format(&self.payload))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::string(v)
    }
}

impl Value {
    /// Wraps a payload in the given datatype.
    #[must_use]
    pub const fn new(datatype: DatatypeRef, payload: Payload) -> Self {
        Self { datatype,
               payload,
               name: None }
    }

    /// The `null` value.
    #[must_use]
    pub fn null() -> Self {
        Self::new(&NULL, Payload::Null)
    }

    /// An `int` value.
    #[must_use]
    pub fn integer(i: i64) -> Self {
        Self::new(&INTEGER, Payload::Integer(i))
    }

    /// A `float` value.
    #[must_use]
    pub fn float(x: f64) -> Self {
        Self::new(&FLOAT, Payload::Float(x))
    }

    /// A `bool` value.
    #[must_use]
    pub fn boolean(b: bool) -> Self {
        Self::new(&BOOLEAN, Payload::Boolean(b))
    }

    /// A `string` value.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::new(&STRING, Payload::String(s.into()))
    }

    /// A `list` value.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::new(&LIST, Payload::List(items))
    }

    /// A `func` value referring to `function`.
    #[must_use]
    pub fn function(function: Rc<Function>) -> Self {
        Self::new(&FUNCTION, Payload::Function(function))
    }

    /// Attaches the name the value was read from.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Tests whether the value is tagged with exactly `datatype`.
    ///
    /// # Example
    /// ```
    /// use tea::interpreter::value::{
    ///     core::Value,
    ///     datatype::{INTEGER, NUMBER},
    /// };
    ///
    /// let x = Value::integer(3);
    /// assert!(x.is(&INTEGER));
    /// assert!(!x.is(&NUMBER));
    /// ```
    #[must_use]
    pub fn is(&self, datatype: &Datatype) -> bool {
        *self.datatype == *datatype
    }

    /// Returns the integer payload, if there is one.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self.payload {
            Payload::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the float payload, if there is one.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self.payload {
            Payload::Float(x) => Some(x),
            _ => None,
        }
    }

    /// Returns the boolean payload, if there is one.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self.payload {
            Payload::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the text payload, if there is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    /// Formats the value together with its datatype for messages, e.g.
    /// `3.700000 (float)`.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} = {self} ({})", self.datatype),
            None => format!("{self} ({})", self.datatype),
        }
    }
}
