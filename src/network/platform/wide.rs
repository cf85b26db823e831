//! Conversion of wide-character buffers returned by Windows APIs.
//!
//! Kept platform-neutral so the buffer handling is tested everywhere.

/// Reinterprets a little-endian byte buffer as UTF-16 code units.
///
/// A trailing odd byte is ignored.
#[must_use]
pub fn wide_bytes_to_units(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Returns the first NUL-terminated string in a UTF-16 buffer.
///
/// For a `REG_MULTI_SZ` value this is the first entry. A buffer without a
/// terminator is read to its end. Invalid UTF-16 is replaced lossily.
#[must_use]
pub fn first_wide_string(units: &[u16]) -> String {
    let len = units.iter().position(|&c| c == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..len])
}
