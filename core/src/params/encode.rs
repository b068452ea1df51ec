//! params/encode.rs
//!
//! Parameter map encoding.
//!
//! Wire layout (little-endian):
//! ```text
//! version   u16
//! repeat:
//!   type    u8
//!   name    i32 length + UTF-8 bytes
//!   value   i32 length + bytes
//! end       u8 (0x00)
//! ```

use crate::params::types::{Value, ValueType, VariantDictionary, VARIANT_MAP_VERSION};

/// Serialize a parameter map. Entries are written in key order.
pub fn encode_variant_map(map: &VariantDictionary) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);

    fn put_len_prefixed(out: &mut Vec<u8>, b: &[u8]) {
        out.extend_from_slice(&(b.len() as i32).to_le_bytes());
        out.extend_from_slice(b);
    }

    out.extend_from_slice(&VARIANT_MAP_VERSION.to_le_bytes());

    for (key, value) in map.iter() {
        out.push(value.value_type().into());
        put_len_prefixed(&mut out, key.as_bytes());
        match value {
            Value::UInt32(v) => put_len_prefixed(&mut out, &v.to_le_bytes()),
            Value::UInt64(v) => put_len_prefixed(&mut out, &v.to_le_bytes()),
            Value::Bool(v)   => put_len_prefixed(&mut out, &[u8::from(*v)]),
            Value::Int32(v)  => put_len_prefixed(&mut out, &v.to_le_bytes()),
            Value::Int64(v)  => put_len_prefixed(&mut out, &v.to_le_bytes()),
            Value::String(s) => put_len_prefixed(&mut out, s.as_bytes()),
            Value::Bytes(b)  => put_len_prefixed(&mut out, b),
        }
    }

    out.push(ValueType::End.into());
    out
}
