//! PLG mesh-collection binary format codec
//!
//! PLG files store an ordered set of named sub-meshes, each with its own
//! vertex pool (RGBA color, 2D position, flag word) and face index list,
//! packed into one flat little-endian blob. Four known version tags share
//! two physical record layouts; the codec reproduces each layout byte for
//! byte, including the derived offset fields and the trailing padding.
//!
//! # Layout
//! ```text
//! 0x00: signature (12 bytes): "PLG0" + version tag u32 + layout code u32
//! 0x0C: header (20 or 44 bytes, by layout)
//! code: object entry table (object_count x 64 or 72 bytes)
//! var:  vertex pool (total_vertex_count x 16 bytes, all objects)
//! var:  face index pool (total_face_index_count x 2 bytes)
//! var:  zero padding to a multiple of 4
//! ```
//!
//! The layout code in the signature (0x20 or 0x38) is the combined span of
//! signature + header, i.e. the file offset of the object entry table.
//! Decoding slices both pools purely by counts, consumed sequentially in
//! object order; stored per-object offsets are never trusted (one variant
//! leaves them zeroed on disk).
//!
//! # Usage
//! ```ignore
//! use plg::{decode_plg, encode_plg, Variant};
//!
//! let data = std::fs::read("stage.plg")?;
//! let collection = decode_plg(&data)?;
//! let rebuilt = encode_plg(&collection, Variant::Rev4)?;
//! assert_eq!(rebuilt, data);
//! ```

mod collection;
mod decode;
mod encode;
mod error;
mod layout;
mod name;
mod records;
mod variant;


pub use collection::{PlgCollection, PlgObject};
pub use decode::decode_plg;
pub use encode::encode_plg;
pub use error::PlgError;
pub use name::{NAME_LEN, decode_name, encode_name};
pub use records::{Header, ObjectEntry, Signature, Vertex};
pub use variant::{LayoutSize, Variant};

/// File magic, the first four bytes of every PLG file.
pub const PLG_MAGIC: &[u8; 4] = b"PLG0";

/// Vertex flag bit set on boundary vertices by the exporting side.
/// All other flag bits are opaque and carried through unchanged.
pub const BOUNDARY_VERTEX_FLAG: u32 = 0x0001_0000;
