//! Lowercase hexadecimal encoding.

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode `bytes` as lowercase hex, high nibble first.
///
/// Returns `None` if the output buffer cannot be allocated; nothing is
/// returned partially filled. Empty input gives an empty string.
pub fn encode_hex(bytes: &[u8]) -> Option<String> {
    let hex_len = bytes.len().checked_mul(2)?;
    let mut hex = String::new();
    hex.try_reserve_exact(hex_len).ok()?;

    for &byte in bytes {
        hex.push(HEX_DIGITS[usize::from(byte >> 4)] as char);
        hex.push(HEX_DIGITS[usize::from(byte & 0x0f)] as char);
    }
    Some(hex)
}
