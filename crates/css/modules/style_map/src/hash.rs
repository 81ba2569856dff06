//! Stable content hashing for identifiers.

use serde::Serialize;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hash `text` into a short base-36 string.
///
/// djb2 with xor, walking UTF-16 code units from the end and wrapping at 32
/// bits. The output only depends on the input text, never on the process or
/// platform, so identifiers stay the same between server and client.
pub fn hash_string(text: &str) -> String {
    let units: Vec<u16> = text.encode_utf16().collect();
    let digest = units
        .iter()
        .rev()
        .fold(5381_u32, |hash, unit| hash.wrapping_mul(33) ^ u32::from(*unit));
    to_base36(digest)
}

/// Hash the canonical JSON form of `value`.
pub fn hash_object<T: Serialize + ?Sized>(value: &T) -> String {
    hash_string(&serde_json::to_string(value).unwrap_or_default())
}

/// Render `value` in lowercase base 36.
pub fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::with_capacity(7);
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleMap;

    #[test]
    fn known_digests() {
        assert_eq!(hash_string(""), "45h");
        assert_eq!(hash_string("a"), "3t1g");
    }

    #[test]
    fn base36_rendering() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
    }

    #[test]
    fn object_hash_follows_serialized_content() {
        let first = StyleMap::new().with("color", "red");
        let same = StyleMap::new().with("color", "red");
        let other = StyleMap::new().with("color", "blue");
        assert_eq!(hash_object(&first), hash_object(&same));
        assert_ne!(hash_object(&first), hash_object(&other));
    }
}
