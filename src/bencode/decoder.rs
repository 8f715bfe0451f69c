use crate::error::{MagnetizeError, Result};
use super::BencodeValue;
use indexmap::IndexMap;

/// Decode a single bencoded value from the front of `data`
pub fn decode(data: &[u8]) -> Result<BencodeValue> {
    let mut pos = 0;
    decode_value(data, &mut pos)
}

fn malformed(offset: usize, reason: impl Into<String>) -> MagnetizeError {
    MagnetizeError::MalformedEncoding {
        offset,
        reason: reason.into(),
    }
}

fn decode_value(data: &[u8], pos: &mut usize) -> Result<BencodeValue> {
    if *pos >= data.len() {
        return Err(MagnetizeError::UnexpectedEnd { offset: *pos });
    }

    match data[*pos] {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos),
        b'd' => decode_dict(data, pos),
        b'0'..=b'9' => Ok(BencodeValue::String(decode_string(data, pos)?)),
        c => Err(malformed(*pos, format!("invalid token '{}'", c as char))),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<BencodeValue> {
    let token_start = *pos;
    *pos += 1; // Skip 'i'

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(MagnetizeError::UnexpectedEnd { offset: data.len() });
    }

    let num_str = std::str::from_utf8(&data[start..*pos])
        .map_err(|_| malformed(token_start, "invalid integer"))?;

    // Grammar: optional '-' then digits, no leading zeros, no "-0"
    let digits = num_str.strip_prefix('-').unwrap_or(num_str);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(token_start, "invalid integer"));
    }
    if num_str.starts_with("-0") || (digits.len() > 1 && digits.starts_with('0')) {
        return Err(malformed(token_start, "leading zeros in integer"));
    }

    let num = num_str
        .parse::<i64>()
        .map_err(|_| malformed(token_start, "integer out of range"))?;

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::Integer(num))
}

fn decode_string(data: &[u8], pos: &mut usize) -> Result<Vec<u8>> {
    let start = *pos;
    while *pos < data.len() && data[*pos].is_ascii_digit() {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(MagnetizeError::UnexpectedEnd { offset: data.len() });
    }

    if data[*pos] != b':' {
        return Err(malformed(*pos, "expected ':' after string length"));
    }

    let len_digits = &data[start..*pos];
    if len_digits.is_empty() {
        return Err(malformed(start, "missing string length"));
    }
    if len_digits.len() > 1 && len_digits[0] == b'0' {
        return Err(malformed(start, "leading zeros in string length"));
    }

    let len_str = std::str::from_utf8(len_digits)
        .map_err(|_| malformed(start, "invalid string length"))?;

    let len = len_str
        .parse::<usize>()
        .map_err(|_| malformed(start, "string length out of range"))?;

    *pos += 1; // Skip ':'

    // Bounds-check the declared length before allocating
    if len > data.len() - *pos {
        return Err(MagnetizeError::UnexpectedEnd { offset: data.len() });
    }

    let string = data[*pos..*pos + len].to_vec();
    *pos += len;

    Ok(string)
}

fn decode_list(data: &[u8], pos: &mut usize) -> Result<BencodeValue> {
    *pos += 1; // Skip 'l'

    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos)?);
    }

    if *pos >= data.len() {
        return Err(MagnetizeError::UnexpectedEnd { offset: data.len() });
    }

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize) -> Result<BencodeValue> {
    *pos += 1; // Skip 'd'

    let mut dict = IndexMap::new();

    while *pos < data.len() && data[*pos] != b'e' {
        // Keys must be byte strings
        if !data[*pos].is_ascii_digit() {
            return Err(malformed(*pos, "dictionary key must be a byte string"));
        }

        let key = decode_string(data, pos)?;
        let value = decode_value(data, pos)?;

        // Duplicate keys: the last value wins, the key keeps its first
        // position
        dict.insert(key, value);
    }

    if *pos >= data.len() {
        return Err(MagnetizeError::UnexpectedEnd { offset: data.len() });
    }

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::Dict(dict))
}
