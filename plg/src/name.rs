//! 32-byte legacy name field codec
//!
//! Object names are code page 932 text, null-terminated and null-padded
//! to exactly 32 bytes on disk.

use encoding_rs::SHIFT_JIS;

use crate::error::PlgError;

/// Byte width of the on-disk name field.
pub const NAME_LEN: usize = 32;

/// Decode a raw name field.
///
/// The field must contain a null terminator; the preceding bytes are
/// decoded as code page 932 and trailing whitespace/control characters
/// are stripped.
pub fn decode_name(field: &[u8; NAME_LEN]) -> Result<String, PlgError> {
    let nul = field
        .iter()
        .position(|&b| b == 0)
        .ok_or(PlgError::MalformedName)?;
    let (text, _, had_errors) = SHIFT_JIS.decode(&field[..nul]);
    if had_errors {
        return Err(PlgError::MalformedName);
    }
    Ok(text.trim_end_matches([' ', '\r', '\n', '\t']).to_string())
}

/// Encode a name into a raw field, null-padded to 32 bytes.
///
/// The encoding may use at most 31 bytes so the terminator always fits;
/// longer names fail with [`PlgError::NameTooLong`].
pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN], PlgError> {
    let (bytes, _, had_errors) = SHIFT_JIS.encode(name);
    if had_errors {
        // Characters with no code page 932 mapping
        return Err(PlgError::MalformedName);
    }
    if bytes.len() > NAME_LEN - 1 {
        return Err(PlgError::NameTooLong {
            name: name.to_string(),
        });
    }
    let mut field = [0u8; NAME_LEN];
    field[..bytes.len()].copy_from_slice(&bytes);
    Ok(field)
}
