//! PLG codec error types

/// Errors produced while encoding or decoding PLG files.
///
/// Every failure aborts the whole operation: the codec never returns a
/// partially populated collection and never emits a partial byte stream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlgError {
    /// File does not start with the "PLG0" magic
    #[error("not a PLG file (bad magic)")]
    InvalidMagic,

    /// Version tag is not one of the four known variants
    #[error("unsupported PLG version tag 0x{0:08X}")]
    UnsupportedVariant(u32),

    /// Declared layout-size code disagrees with the tag's registered size
    #[error(
        "layout size 0x{declared:02X} does not match 0x{expected:02X} registered for version tag 0x{version:08X}"
    )]
    VariantMismatch {
        version: u32,
        declared: u32,
        expected: u32,
    },

    /// Fewer bytes or pool elements available than a record requires
    #[error("truncated data: {what} at offset {offset} needs {needed}, {available} available")]
    Truncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// An object's faces do not all share one vertex count
    #[error("object '{name}': face with {found} vertices in an object with arity {expected}")]
    MixedArity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Name field has no null terminator or is not valid code page 932 text
    #[error("malformed object name field")]
    MalformedName,

    /// Encoded name leaves no room for the null terminator
    #[error("object name '{name}' exceeds 31 bytes when encoded")]
    NameTooLong { name: String },

    /// Face-index count is not a multiple of the object's arity
    #[error("object '{name}': face index count {count} is not a multiple of arity {arity}")]
    InvalidFaceCount {
        name: String,
        count: usize,
        arity: usize,
    },

    /// A scene item offered for export is not a mesh
    #[error("'{name}' is not a mesh object")]
    NonMeshInput { name: String },

    /// A count or arity exceeds its binary field width
    #[error("{what} ({value}) exceeds the format limit of {max}")]
    LimitExceeded { what: String, value: u64, max: u64 },
}
