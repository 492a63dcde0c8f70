//! Task arguments and how they are encoded into a task's `Args` list.
//!
//! Scalars travel as plain strings. Structured values (JSON objects and
//! arrays) are serialized to JSON and then base64-encoded, so they sit inside
//! the outer record as opaque strings. Entries carry no tag saying which form
//! they use; the worker has to know per argument position.

use crate::{QueueError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
    Float32(f32),
}

/// A single positional argument handed to [`crate::QueueClient::enqueue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Number(Number),
    Structured(Value),
    /// Null, booleans and anything else without an encoding. Dropped on enqueue.
    Unsupported,
}

impl Arg {
    /// Builds a structured argument from any serializable value.
    ///
    /// Values that serialize to a JSON scalar are classified like their
    /// scalar counterparts.
    pub fn structured<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::from(value),
            Err(_) => Arg::Unsupported,
        }
    }

    /// Returns the encoded form, or `None` when this argument has no encoding.
    pub fn encode(&self) -> Option<String> {
        match self {
            Arg::Text(text) => Some(text.clone()),
            Arg::Number(number) => number.encode(),
            Arg::Structured(value) => {
                let json = serde_json::to_vec(value).ok()?;
                Some(STANDARD.encode(json))
            }
            Arg::Unsupported => None,
        }
    }
}

impl Number {
    fn encode(&self) -> Option<String> {
        match self {
            Number::Int(n) => Some(n.to_string()),
            Number::UInt(n) => Some(n.to_string()),
            Number::Float(n) if n.is_finite() => Some(n.to_string()),
            Number::Float32(n) if n.is_finite() => Some(n.to_string()),
            Number::Float(_) | Number::Float32(_) => None,
        }
    }
}

/// Reverses the structured encoding: base64, then JSON.
pub fn decode_structured(encoded: &str) -> Result<Value> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| QueueError::DeserializationError(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| QueueError::DeserializationError(e.to_string()))
}

/// Encodes every argument in order, skipping the ones without an encoding.
pub(crate) fn encode_args<I, A>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = A>,
    A: Into<Arg>,
{
    args.into_iter()
        .filter_map(|arg| {
            let arg = arg.into();
            let encoded = arg.encode();
            if encoded.is_none() {
                log::debug!("Dropping argument without an encoding: {:?}", arg);
            }
            encoded
        })
        .collect()
}

/// Builds a `Vec<Arg>` from values of mixed types.
///
/// ```
/// let args = listq::args!["img1.png", 42, 0.5];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Arg>::new() };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($value)),+]
    };
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Arg::Text(text),
            Value::Number(number) => {
                if let Some(n) = number.as_i64() {
                    Arg::Number(Number::Int(n))
                } else if let Some(n) = number.as_u64() {
                    Arg::Number(Number::UInt(n))
                } else if let Some(n) = number.as_f64() {
                    Arg::Number(Number::Float(n))
                } else {
                    Arg::Unsupported
                }
            }
            Value::Array(_) | Value::Object(_) => Arg::Structured(value),
            Value::Null | Value::Bool(_) => Arg::Unsupported,
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl From<bool> for Arg {
    fn from(_: bool) -> Self {
        Arg::Unsupported
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Unsupported, Into::into)
    }
}

macro_rules! impl_from_number {
    ($variant:ident, $target:ty; $($source:ty),+) => {
        $(
            impl From<$source> for Arg {
                fn from(value: $source) -> Self {
                    Arg::Number(Number::$variant(<$target>::from(value)))
                }
            }
        )+
    };
}

impl_from_number!(Int, i64; i8, i16, i32, i64);
impl_from_number!(UInt, u64; u8, u16, u32, u64);
impl_from_number!(Float, f64; f64);
impl_from_number!(Float32, f32; f32);

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::Number(Number::UInt(value as u64))
    }
}

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        Arg::Number(Number::Int(value as i64))
    }
}
