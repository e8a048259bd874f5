//! Fixed-size PLG records and their binary codecs
//!
//! Every record is little-endian with no padding beyond the explicit
//! field widths. Header and object entry records come in two shapes; the
//! [`LayoutSize`] passed to their codecs selects shape and field widths.
//! `from_bytes` returns `None` when fewer bytes remain than the record
//! needs; callers attach offset context.

use serde::{Deserialize, Serialize};

use crate::error::PlgError;
use crate::name::NAME_LEN;
use crate::variant::{LayoutSize, Variant};

/// Signature (12 bytes): file magic, version tag, layout-size code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub variant: Variant,
}

impl Signature {
    pub const SIZE: usize = 12;

    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    /// Write signature to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(crate::PLG_MAGIC);
        bytes[4..8].copy_from_slice(&self.variant.tag().to_le_bytes());
        bytes[8..12].copy_from_slice(&self.variant.layout_size().code().to_le_bytes());
        bytes
    }

    /// Parse and validate a signature.
    ///
    /// The declared layout-size code must equal the size registered for
    /// the version tag; the same two codes are reused across tags, so a
    /// disagreement means the file is inconsistent, not merely unknown.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlgError> {
        if bytes.len() < Self::SIZE {
            return Err(PlgError::Truncated {
                what: "signature",
                offset: 0,
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }
        if &bytes[0..4] != crate::PLG_MAGIC {
            return Err(PlgError::InvalidMagic);
        }
        let tag = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let declared = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let variant = Variant::from_tag(tag).ok_or(PlgError::UnsupportedVariant(tag))?;
        let expected = variant.layout_size().code();
        if declared != expected {
            return Err(PlgError::VariantMismatch {
                version: tag,
                declared,
                expected,
            });
        }
        Ok(Self { variant })
    }
}

/// File header: global counts and derived pool offsets.
///
/// Compact shape stores the four counts as u16; the extended shape widens
/// them to u32 and adds the padded total file size. `file_size` is only
/// meaningful under the extended layout and stays 0 otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// Absolute file offset of the vertex pool
    pub vertex_data_offset: u32,
    /// Absolute file offset of the face-index pool
    pub face_data_offset: u32,
    /// Total file size rounded up to a multiple of 4 (extended only)
    pub file_size: u32,
    pub object_count: u32,
    pub total_vertex_count: u32,
    /// Largest per-object vertex count, 0 for empty files
    pub max_vertex_count: u32,
    pub total_face_index_count: u32,
}

impl Header {
    /// Write header to bytes in the given layout's shape
    pub fn to_bytes(&self, layout: LayoutSize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(layout.header_len());
        bytes.extend_from_slice(&self.vertex_data_offset.to_le_bytes());
        bytes.extend_from_slice(&self.face_data_offset.to_le_bytes());
        match layout {
            LayoutSize::Compact => {
                bytes.extend_from_slice(&(self.object_count as u16).to_le_bytes());
                bytes.extend_from_slice(&(self.total_vertex_count as u16).to_le_bytes());
                bytes.extend_from_slice(&(self.max_vertex_count as u16).to_le_bytes());
                bytes.extend_from_slice(&(self.total_face_index_count as u16).to_le_bytes());
                bytes.extend_from_slice(&0u32.to_le_bytes());
            }
            LayoutSize::Extended => {
                bytes.extend_from_slice(&self.file_size.to_le_bytes());
                bytes.extend_from_slice(&0u32.to_le_bytes());
                bytes.extend_from_slice(&self.object_count.to_le_bytes());
                bytes.extend_from_slice(&self.total_vertex_count.to_le_bytes());
                bytes.extend_from_slice(&self.max_vertex_count.to_le_bytes());
                bytes.extend_from_slice(&self.total_face_index_count.to_le_bytes());
                bytes.extend_from_slice(&[0u8; 12]);
            }
        }
        bytes
    }

    /// Read header from bytes in the given layout's shape
    pub fn from_bytes(bytes: &[u8], layout: LayoutSize) -> Option<Self> {
        if bytes.len() < layout.header_len() {
            return None;
        }
        let u32_at = |o: usize| u32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);
        let u16_at = |o: usize| u16::from_le_bytes([bytes[o], bytes[o + 1]]);
        Some(match layout {
            LayoutSize::Compact => Self {
                vertex_data_offset: u32_at(0),
                face_data_offset: u32_at(4),
                file_size: 0,
                object_count: u16_at(8) as u32,
                total_vertex_count: u16_at(10) as u32,
                max_vertex_count: u16_at(12) as u32,
                total_face_index_count: u16_at(14) as u32,
            },
            LayoutSize::Extended => Self {
                vertex_data_offset: u32_at(0),
                face_data_offset: u32_at(4),
                file_size: u32_at(8),
                object_count: u32_at(16),
                total_vertex_count: u32_at(20),
                max_vertex_count: u32_at(24),
                total_face_index_count: u32_at(28),
            },
        })
    }
}

/// One object entry: per-object counts, derived offsets, 2D bounding box
/// and the raw 32-byte name field.
///
/// `face_index_count` is total indices, i.e. faces x arity. `end_offset`
/// only exists on disk in the extended shape; it is measured back from
/// the padded file tail and is write-side metadata only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectEntry {
    pub vertex_data_offset: u32,
    pub face_data_offset: u32,
    pub end_offset: u32,
    pub vertex_count: u16,
    pub face_index_count: u16,
    /// Vertices per face, uniform across the object; 0 for faceless objects
    pub face_arity: u16,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
    pub name: [u8; NAME_LEN],
}

impl Default for ObjectEntry {
    fn default() -> Self {
        Self {
            vertex_data_offset: 0,
            face_data_offset: 0,
            end_offset: 0,
            vertex_count: 0,
            face_index_count: 0,
            face_arity: 0,
            x_min: 0.0,
            y_min: 0.0,
            x_max: 0.0,
            y_max: 0.0,
            name: [0; NAME_LEN],
        }
    }
}

impl ObjectEntry {
    /// Write entry to bytes in the given layout's shape
    pub fn to_bytes(&self, layout: LayoutSize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(layout.entry_len());
        bytes.extend_from_slice(&self.vertex_data_offset.to_le_bytes());
        bytes.extend_from_slice(&self.face_data_offset.to_le_bytes());
        match layout {
            LayoutSize::Compact => {
                bytes.extend_from_slice(&self.vertex_count.to_le_bytes());
                bytes.extend_from_slice(&self.face_index_count.to_le_bytes());
                bytes.extend_from_slice(&self.face_arity.to_le_bytes());
                bytes.extend_from_slice(&0u16.to_le_bytes());
            }
            LayoutSize::Extended => {
                bytes.extend_from_slice(&self.end_offset.to_le_bytes());
                bytes.extend_from_slice(&self.vertex_count.to_le_bytes());
                bytes.extend_from_slice(&self.face_index_count.to_le_bytes());
                bytes.extend_from_slice(&0u32.to_le_bytes());
                bytes.extend_from_slice(&self.face_arity.to_le_bytes());
                bytes.extend_from_slice(&0u16.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&self.x_min.to_le_bytes());
        bytes.extend_from_slice(&self.y_min.to_le_bytes());
        bytes.extend_from_slice(&self.x_max.to_le_bytes());
        bytes.extend_from_slice(&self.y_max.to_le_bytes());
        bytes.extend_from_slice(&self.name);
        bytes
    }

    /// Read entry from bytes in the given layout's shape
    pub fn from_bytes(bytes: &[u8], layout: LayoutSize) -> Option<Self> {
        if bytes.len() < layout.entry_len() {
            return None;
        }
        let u32_at = |o: usize| u32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);
        let u16_at = |o: usize| u16::from_le_bytes([bytes[o], bytes[o + 1]]);
        let f32_at = |o: usize| f32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);

        // Tail fields (bbox + name) sit after the shape-specific middle
        let (end_offset, vertex_count, face_index_count, face_arity, tail) = match layout {
            LayoutSize::Compact => (0, u16_at(8), u16_at(10), u16_at(12), 16),
            LayoutSize::Extended => (u32_at(8), u16_at(12), u16_at(14), u16_at(20), 24),
        };
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&bytes[tail + 16..tail + 16 + NAME_LEN]);
        Some(Self {
            vertex_data_offset: u32_at(0),
            face_data_offset: u32_at(4),
            end_offset,
            vertex_count,
            face_index_count,
            face_arity,
            x_min: f32_at(tail),
            y_min: f32_at(tail + 4),
            x_max: f32_at(tail + 8),
            y_max: f32_at(tail + 12),
            name,
        })
    }
}

/// Vertex (16 bytes): RGBA color, 2D position, flag word.
///
/// No third axis is stored; consumers reconstruct z = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub x: f32,
    pub y: f32,
    pub flag: u32,
}

impl Vertex {
    pub const SIZE: usize = 16;

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            r: 0xFF,
            g: 0xFF,
            b: 0xFF,
            a: 0xFF,
            x,
            y,
            flag: 0,
        }
    }

    /// Whether the boundary marker bit is set
    pub fn is_boundary(&self) -> bool {
        self.flag & crate::BOUNDARY_VERTEX_FLAG != 0
    }

    /// Write vertex to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.r;
        bytes[1] = self.g;
        bytes[2] = self.b;
        bytes[3] = self.a;
        bytes[4..8].copy_from_slice(&self.x.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.y.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.flag.to_le_bytes());
        bytes
    }

    /// Read vertex from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
            x: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            y: f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            flag: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_roundtrip() {
        for variant in Variant::ALL {
            let bytes = Signature::new(variant).to_bytes();
            let parsed = Signature::from_bytes(&bytes).unwrap();
            assert_eq!(parsed.variant, variant);
        }
    }

    #[test]
    fn test_signature_rejects_bad_magic() {
        let mut bytes = Signature::new(Variant::Rev3).to_bytes();
        bytes[0] = b'X';
        assert_eq!(Signature::from_bytes(&bytes), Err(PlgError::InvalidMagic));
    }

    #[test]
    fn test_signature_rejects_unknown_tag() {
        let mut bytes = Signature::new(Variant::Rev3).to_bytes();
        bytes[4..8].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        assert_eq!(
            Signature::from_bytes(&bytes),
            Err(PlgError::UnsupportedVariant(0x1234_5678))
        );
    }

    #[test]
    fn test_signature_rejects_size_mismatch() {
        // Rev3 registers the compact size; declare the extended one
        let mut bytes = Signature::new(Variant::Rev3).to_bytes();
        bytes[8..12].copy_from_slice(&0x38u32.to_le_bytes());
        assert_eq!(
            Signature::from_bytes(&bytes),
            Err(PlgError::VariantMismatch {
                version: 0x0100_0300,
                declared: 0x38,
                expected: 0x20,
            })
        );
    }

    #[test]
    fn test_header_roundtrip_both_shapes() {
        let header = Header {
            vertex_data_offset: 96,
            face_data_offset: 160,
            file_size: 200,
            object_count: 1,
            total_vertex_count: 4,
            max_vertex_count: 4,
            total_face_index_count: 4,
        };
        for layout in [LayoutSize::Compact, LayoutSize::Extended] {
            let bytes = header.to_bytes(layout);
            assert_eq!(bytes.len(), layout.header_len());
            let parsed = Header::from_bytes(&bytes, layout).unwrap();
            assert_eq!(parsed.object_count, 1);
            assert_eq!(parsed.total_vertex_count, 4);
            assert_eq!(parsed.max_vertex_count, 4);
            assert_eq!(parsed.total_face_index_count, 4);
            // file_size only survives the extended shape
            let expected_fs = match layout {
                LayoutSize::Compact => 0,
                LayoutSize::Extended => 200,
            };
            assert_eq!(parsed.file_size, expected_fs);
        }
    }

    #[test]
    fn test_entry_roundtrip_both_shapes() {
        let mut name = [0u8; NAME_LEN];
        name[..5].copy_from_slice(b"floor");
        let entry = ObjectEntry {
            vertex_data_offset: 64,
            face_data_offset: 128,
            end_offset: 144,
            vertex_count: 4,
            face_index_count: 4,
            face_arity: 4,
            x_min: -1.5,
            y_min: 0.0,
            x_max: 2.5,
            y_max: 8.0,
            name,
        };
        for layout in [LayoutSize::Compact, LayoutSize::Extended] {
            let bytes = entry.to_bytes(layout);
            assert_eq!(bytes.len(), layout.entry_len());
            let parsed = ObjectEntry::from_bytes(&bytes, layout).unwrap();
            let expected = ObjectEntry {
                end_offset: match layout {
                    LayoutSize::Compact => 0,
                    LayoutSize::Extended => 144,
                },
                ..entry
            };
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_vertex_roundtrip() {
        let vertex = Vertex {
            r: 1,
            g: 2,
            b: 3,
            a: 4,
            x: -0.5,
            y: 12.25,
            flag: crate::BOUNDARY_VERTEX_FLAG,
        };
        let bytes = vertex.to_bytes();
        assert_eq!(bytes.len(), Vertex::SIZE);
        let parsed = Vertex::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, vertex);
        assert!(parsed.is_boundary());
    }

    #[test]
    fn test_from_bytes_insufficient() {
        assert!(Header::from_bytes(&[0; 19], LayoutSize::Compact).is_none());
        assert!(Header::from_bytes(&[0; 43], LayoutSize::Extended).is_none());
        assert!(ObjectEntry::from_bytes(&[0; 63], LayoutSize::Compact).is_none());
        assert!(ObjectEntry::from_bytes(&[0; 71], LayoutSize::Extended).is_none());
        assert!(Vertex::from_bytes(&[0; 15]).is_none());
    }
}
