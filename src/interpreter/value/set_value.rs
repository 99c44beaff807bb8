use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::value::{
        core::{Payload, Value},
        datatype::{BOOLEAN, FLOAT, INTEGER, LIST, NULL, SET, STRING},
    },
};

/// Enum representing values allowed in sets.
///
/// Only datatypes with a structural notion of equality can be hashed; maps,
/// functions, objects and nested sets are rejected on conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetValue {
    /// `null`.
    Null,
    /// An integer such as `-4` or `42`.
    Integer(i64),
    /// A float such as `3.141592653589793`.
    Float(OrderedFloat<f64>),
    /// A boolean such as `true`.
    Boolean(bool),
    /// A string such as `"tea"`.
    String(String),
    /// A list such as the characters of a string.
    List(Vec<SetValue>),
}

impl TryFrom<&Value> for SetValue {
    type Error = RuntimeError;

    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match &v.payload {
            Payload::Null if v.is(&NULL) => Ok(Self::Null),
            Payload::Integer(i) if v.is(&INTEGER) => Ok(Self::Integer(*i)),
            Payload::Float(x) if v.is(&FLOAT) => Ok(Self::Float(OrderedFloat(*x))),
            Payload::Boolean(b) if v.is(&BOOLEAN) => Ok(Self::Boolean(*b)),
            Payload::String(s) if v.is(&STRING) => Ok(Self::String(s.clone())),
            Payload::List(items) if v.is(&LIST) => {
                Ok(Self::List(items.iter().map(Self::try_from).collect::<Result<_, _>>()?))
            },
            _ => Err(RuntimeError::Cast { value:    v.describe(),
                                          datatype: SET.name.to_string(), }),
        }
    }
}

impl From<SetValue> for Value {
    fn from(s: SetValue) -> Self {
        match s {
            SetValue::Null => Self::null(),
            SetValue::Integer(i) => Self::integer(i),
            SetValue::Float(x) => Self::float(x.into_inner()),
            SetValue::Boolean(b) => Self::boolean(b),
            SetValue::String(s) => Self::string(s),
            SetValue::List(items) => Self::list(items.into_iter().map(Self::from).collect()),
        }
    }
}

impl Hash for SetValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use SetValue::{Boolean, Float, Integer, List, Null, String};
        match self {
            Null => state.write_u8(0),
            Integer(i) => {
                state.write_u8(1);
                i.hash(state);
            },
            Float(x) => {
                state.write_u8(2);
                x.hash(state);
            },
            Boolean(b) => {
                state.write_u8(3);
                b.hash(state);
            },
            String(s) => {
                state.write_u8(4);
                s.hash(state);
            },
            List(items) => {
                state.write_u8(5);
                items.hash(state);
            },
        }
    }
}

impl Display for SetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: Value = self.clone().into();
        write!(f, "{value}")
    }
}
