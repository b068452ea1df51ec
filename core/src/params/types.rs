//! params/types.rs
//! Parameter map value model and errors.

use std::collections::BTreeMap;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

/// Serialization version written by this crate.
pub const VARIANT_MAP_VERSION: u16 = 0x0100;
/// Only the high byte is critical; newer minor versions stay readable.
pub const VARIANT_MAP_CRITICAL_MASK: u16 = 0xFF00;

/// Wire type tags.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum ValueType {
    End       = 0x00,
    UInt32    = 0x04,
    UInt64    = 0x05,
    Bool      = 0x08,
    Int32     = 0x0C,
    Int64     = 0x0D,
    String    = 0x18,
    ByteArray = 0x42,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    UInt32(u32),
    UInt64(u64),
    Bool(bool),
    Int32(i32),
    Int64(i64),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::UInt32(_) => ValueType::UInt32,
            Value::UInt64(_) => ValueType::UInt64,
            Value::Bool(_)   => ValueType::Bool,
            Value::Int32(_)  => ValueType::Int32,
            Value::Int64(_)  => ValueType::Int64,
            Value::String(_) => ValueType::String,
            Value::Bytes(_)  => ValueType::ByteArray,
        }
    }
}

/// Ordered map of named values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariantDictionary {
    entries: BTreeMap<String, Value>,
}

impl VariantDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.entries.get(key) {
            Some(Value::Bytes(b)) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        match self.entries.get(key) {
            Some(Value::UInt32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match self.entries.get(key) {
            Some(Value::UInt64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn set_bytes(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), Value::Bytes(value.into()));
    }

    pub fn set_u32(&mut self, key: impl Into<String>, value: u32) {
        self.entries.insert(key.into(), Value::UInt32(value));
    }

    pub fn set_u64(&mut self, key: impl Into<String>, value: u64) {
        self.entries.insert(key.into(), Value::UInt64(value));
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Value::String(value.into()));
    }
}

#[derive(Debug, Error)]
pub enum ParamsError {
    /// Input ended inside an entry.
    #[error("parameter map truncated")]
    Truncated,

    /// Major version newer than this reader understands.
    #[error("unsupported parameter map version: 0x{version:04x}")]
    UnsupportedVersion { version: u16 },

    #[error("unknown parameter value type: 0x{raw:02x}")]
    UnknownType { raw: u8 },

    /// Negative or out-of-range length prefix.
    #[error("invalid length {len} for parameter entry")]
    InvalidLength { len: i32 },

    /// Fixed-width value with the wrong byte count.
    #[error("parameter '{key}' has {actual} bytes, expected {expected}")]
    ValueSize { key: String, expected: usize, actual: usize },

    #[error("parameter name is not valid UTF-8")]
    InvalidName,

    #[error("parameter '{key}' is not valid UTF-8")]
    InvalidString { key: String },

    /// Bytes left over after the end marker.
    #[error("{remaining} trailing bytes after parameter map")]
    TrailingBytes { remaining: usize },
}

impl From<std::io::Error> for ParamsError {
    fn from(_: std::io::Error) -> Self {
        // Only reachable through short reads from an in-memory cursor.
        ParamsError::Truncated
    }
}
