//! Base62 encoding over the `0-9a-zA-Z` alphabet.

/// Symbols in value order: digits, lowercase, uppercase.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

/// Encodes a number, most significant symbol first.
///
/// Zero encodes to the empty string.
pub fn encode(mut n: u64) -> String {
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();
    // every byte comes from ALPHABET, which is ASCII
    digits.into_iter().map(char::from).collect()
}

/// Decodes a base62 string back into a number.
///
/// Returns `None` for symbols outside the alphabet or values that overflow `u64`.
pub fn decode(s: &str) -> Option<u64> {
    s.bytes().try_fold(0u64, |acc, b| {
        let digit = value_of(b)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

fn value_of(b: u8) -> Option<u64> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u64),
        b'a'..=b'z' => Some((b - b'a') as u64 + 10),
        b'A'..=b'Z' => Some((b - b'A') as u64 + 36),
        _ => None,
    }
}
