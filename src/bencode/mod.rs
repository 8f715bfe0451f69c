mod decoder;
mod encoder;
mod value;

pub use decoder::decode;
pub use encoder::encode;
pub use value::BencodeValue;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MagnetizeError;

    #[test]
    fn test_integer_encoding() {
        let value = BencodeValue::Integer(42);
        let encoded = encode(&value);
        assert_eq!(encoded, b"i42e");
    }

    #[test]
    fn test_negative_integer_roundtrip() {
        let decoded = decode(b"i-17e").unwrap();
        assert_eq!(decoded, BencodeValue::Integer(-17));
        assert_eq!(encode(&decoded), b"i-17e");
    }

    #[test]
    fn test_string_encoding() {
        let value = BencodeValue::String(b"spam".to_vec());
        let encoded = encode(&value);
        assert_eq!(encoded, b"4:spam");
    }

    #[test]
    fn test_empty_string_roundtrip() {
        let decoded = decode(b"0:").unwrap();
        assert_eq!(decoded, BencodeValue::String(Vec::new()));
        assert_eq!(encode(&decoded), b"0:");
    }

    #[test]
    fn test_list_encoding() {
        let value = BencodeValue::List(vec![
            BencodeValue::String(b"spam".to_vec()),
            BencodeValue::Integer(42),
        ]);
        let encoded = encode(&value);
        assert_eq!(encoded, b"l4:spami42ee");
    }

    #[test]
    fn test_dict_encoding() {
        let mut dict = indexmap::IndexMap::new();
        dict.insert(b"foo".to_vec(), BencodeValue::Integer(42));
        dict.insert(b"bar".to_vec(), BencodeValue::String(b"spam".to_vec()));
        let value = BencodeValue::Dict(dict);
        let encoded = encode(&value);
        // Insertion order, not sorted order
        assert_eq!(encoded, b"d3:fooi42e3:bar4:spame");
    }

    #[test]
    fn test_roundtrip() {
        let original = BencodeValue::List(vec![
            BencodeValue::Integer(123),
            BencodeValue::String(b"test".to_vec()),
        ]);
        let encoded = encode(&original);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_unsorted_dict_reencodes_to_original_bytes() {
        // "name" before "length": not ascending byte order
        let input = b"d4:name4:spam6:lengthi42ee";
        let decoded = decode(input).unwrap();
        assert_eq!(encode(&decoded), input);
    }

    #[test]
    fn test_nested_structure_reencodes_to_original_bytes() {
        let input = b"d4:infod5:filesld6:lengthi10e4:pathl1:aeee4:name1:xee";
        let decoded = decode(input).unwrap();
        assert_eq!(encode(&decoded), input);
    }

    #[test]
    fn test_info_subtree_reencodes_to_original_bytes() {
        // The identifier is a hash of these exact bytes, so the subtree
        // must survive decode/encode untouched even with unsorted keys
        let input = b"d4:infod4:name1:x6:lengthi1e12:piece lengthi1eee";
        let decoded = decode(input).unwrap();
        let info = decoded.dict_get(b"info").unwrap();
        let start = b"d4:info".len();
        assert_eq!(encode(info), &input[start..input.len() - 1]);
    }

    #[test]
    fn test_duplicate_keys_last_value_wins() {
        let decoded = decode(b"d3:keyi1e3:keyi2ee").unwrap();
        assert_eq!(decoded.dict_get_int(b"key"), Some(2));
        assert_eq!(decoded.as_dict().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let err = decode(b"").unwrap_err();
        assert!(matches!(err, MagnetizeError::UnexpectedEnd { offset: 0 }));
    }

    #[test]
    fn test_invalid_token_names_offset() {
        let err = decode(b"x").unwrap_err();
        assert!(matches!(
            err,
            MagnetizeError::MalformedEncoding { offset: 0, .. }
        ));
    }

    #[test]
    fn test_truncated_string_is_not_silently_shortened() {
        // Declared length exceeds remaining bytes
        let err = decode(b"10:abc").unwrap_err();
        assert!(matches!(err, MagnetizeError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_unterminated_integer() {
        let err = decode(b"i42").unwrap_err();
        assert!(matches!(err, MagnetizeError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_unterminated_list() {
        let err = decode(b"li1e").unwrap_err();
        assert!(matches!(err, MagnetizeError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_unterminated_dict() {
        let err = decode(b"d3:foo").unwrap_err();
        assert!(matches!(err, MagnetizeError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_integer_leading_zero_rejected() {
        assert!(decode(b"i03e").is_err());
        assert!(decode(b"i-0e").is_err());
        assert!(decode(b"ie").is_err());
        assert!(decode(b"i+5e").is_err());
    }

    #[test]
    fn test_plain_zero_accepted() {
        assert_eq!(decode(b"i0e").unwrap(), BencodeValue::Integer(0));
    }

    #[test]
    fn test_string_length_leading_zero_rejected() {
        assert!(decode(b"04:spam").is_err());
    }

    #[test]
    fn test_non_string_dict_key_rejected() {
        let err = decode(b"di1ei2ee").unwrap_err();
        assert!(matches!(
            err,
            MagnetizeError::MalformedEncoding { offset: 1, .. }
        ));
    }

    #[test]
    fn test_non_utf8_string_is_preserved() {
        let decoded = decode(b"4:\xde\xad\xbe\xef").unwrap();
        assert_eq!(decoded.as_bytes(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
        assert_eq!(decoded.as_str(), None);
    }
}
