//! params/decode.rs
//!
//! Parameter map decoding. Mirrors `encode.rs`; see there for the layout.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::params::types::{
    ParamsError, Value, ValueType, VariantDictionary, VARIANT_MAP_CRITICAL_MASK,
    VARIANT_MAP_VERSION,
};

/// Deserialize a parameter map from `buf`, which must hold exactly one map.
pub fn decode_variant_map(buf: &[u8]) -> Result<VariantDictionary, ParamsError> {
    let mut cur = Cursor::new(buf);

    let version = cur.read_u16::<LittleEndian>()?;
    if (version & VARIANT_MAP_CRITICAL_MASK) > (VARIANT_MAP_VERSION & VARIANT_MAP_CRITICAL_MASK) {
        return Err(ParamsError::UnsupportedVersion { version });
    }

    let mut map = VariantDictionary::new();
    loop {
        let raw = cur.read_u8()?;
        let ty = ValueType::try_from(raw).map_err(|_| ParamsError::UnknownType { raw })?;
        if ty == ValueType::End {
            break;
        }

        let name = read_len_prefixed(&mut cur)?;
        let key = String::from_utf8(name).map_err(|_| ParamsError::InvalidName)?;
        let data = read_len_prefixed(&mut cur)?;

        let value = decode_value(ty, &key, data)?;
        map.insert(key, value);
    }

    let remaining = buf.len() - cur.position() as usize;
    if remaining != 0 {
        return Err(ParamsError::TrailingBytes { remaining });
    }

    Ok(map)
}

fn read_len_prefixed(cur: &mut Cursor<&[u8]>) -> Result<Vec<u8>, ParamsError> {
    let len = cur.read_i32::<LittleEndian>()?;
    if len < 0 {
        return Err(ParamsError::InvalidLength { len });
    }
    let remaining = cur.get_ref().len() - cur.position() as usize;
    if len as usize > remaining {
        return Err(ParamsError::Truncated);
    }
    let mut out = vec![0u8; len as usize];
    cur.read_exact(&mut out)?;
    Ok(out)
}

fn fixed<const N: usize>(key: &str, data: &[u8]) -> Result<[u8; N], ParamsError> {
    data.try_into().map_err(|_| ParamsError::ValueSize {
        key: key.to_owned(),
        expected: N,
        actual: data.len(),
    })
}

fn decode_value(ty: ValueType, key: &str, data: Vec<u8>) -> Result<Value, ParamsError> {
    Ok(match ty {
        ValueType::UInt32 => Value::UInt32(u32::from_le_bytes(fixed(key, &data)?)),
        ValueType::UInt64 => Value::UInt64(u64::from_le_bytes(fixed(key, &data)?)),
        ValueType::Bool => {
            let [b] = fixed::<1>(key, &data)?;
            Value::Bool(b != 0)
        }
        ValueType::Int32 => Value::Int32(i32::from_le_bytes(fixed(key, &data)?)),
        ValueType::Int64 => Value::Int64(i64::from_le_bytes(fixed(key, &data)?)),
        ValueType::String => Value::String(
            String::from_utf8(data).map_err(|_| ParamsError::InvalidString { key: key.to_owned() })?,
        ),
        ValueType::ByteArray => Value::Bytes(data),
        // Handled by the caller before reaching here.
        ValueType::End => return Err(ParamsError::UnknownType { raw: 0 }),
    })
}
