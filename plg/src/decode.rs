//! PLG decoding

use crate::collection::{PlgCollection, PlgObject};
use crate::error::PlgError;
use crate::name::decode_name;
use crate::records::{Header, ObjectEntry, Signature, Vertex};

/// Decode a PLG byte stream into a collection.
///
/// The variant is auto-detected from the signature. Both pools are sliced
/// purely by counts, consumed sequentially in object order; stored
/// per-object offsets are never trusted, which keeps decoding correct for
/// the variant that writes no offsets at all. Trailing padding bytes are
/// ignored.
pub fn decode_plg(data: &[u8]) -> Result<PlgCollection, PlgError> {
    let signature = Signature::from_bytes(data)?;
    let layout = signature.variant.layout_size();
    let mut pos = Signature::SIZE;

    let header = Header::from_bytes(&data[pos..], layout).ok_or(PlgError::Truncated {
        what: "header",
        offset: pos,
        needed: layout.header_len(),
        available: data.len() - pos,
    })?;
    pos += layout.header_len();

    let mut entries = Vec::new();
    for _ in 0..header.object_count {
        let entry = ObjectEntry::from_bytes(&data[pos..], layout).ok_or(PlgError::Truncated {
            what: "object entry",
            offset: pos,
            needed: layout.entry_len(),
            available: data.len() - pos,
        })?;
        pos += layout.entry_len();
        entries.push(entry);
    }

    let mut vertex_pool = Vec::new();
    for _ in 0..header.total_vertex_count {
        let vertex = Vertex::from_bytes(&data[pos..]).ok_or(PlgError::Truncated {
            what: "vertex",
            offset: pos,
            needed: Vertex::SIZE,
            available: data.len() - pos,
        })?;
        pos += Vertex::SIZE;
        vertex_pool.push(vertex);
    }

    let mut index_pool = Vec::new();
    for _ in 0..header.total_face_index_count {
        let bytes = data.get(pos..pos + 2).ok_or(PlgError::Truncated {
            what: "face index",
            offset: pos,
            needed: 2,
            available: data.len() - pos,
        })?;
        index_pool.push(u16::from_le_bytes([bytes[0], bytes[1]]));
        pos += 2;
    }

    rebuild_objects(&entries, &vertex_pool, &index_pool)
}

/// Slice the flat pools back into per-object vertex and face lists.
fn rebuild_objects(
    entries: &[ObjectEntry],
    vertex_pool: &[Vertex],
    index_pool: &[u16],
) -> Result<PlgCollection, PlgError> {
    let mut objects = Vec::with_capacity(entries.len());
    let mut vertex_cursor = 0usize;
    let mut index_cursor = 0usize;

    for entry in entries {
        let name = decode_name(&entry.name)?;
        let vertex_count = entry.vertex_count as usize;
        let face_index_count = entry.face_index_count as usize;
        let arity = entry.face_arity as usize;

        let vertices = vertex_pool
            .get(vertex_cursor..vertex_cursor + vertex_count)
            .ok_or(PlgError::Truncated {
                what: "vertex pool",
                offset: vertex_cursor,
                needed: vertex_count,
                available: vertex_pool.len().saturating_sub(vertex_cursor),
            })?
            .to_vec();
        vertex_cursor += vertex_count;

        let mut faces = Vec::new();
        if face_index_count > 0 && arity > 0 {
            if face_index_count % arity != 0 {
                return Err(PlgError::InvalidFaceCount {
                    name,
                    count: face_index_count,
                    arity,
                });
            }
            let indices = index_pool
                .get(index_cursor..index_cursor + face_index_count)
                .ok_or(PlgError::Truncated {
                    what: "face index pool",
                    offset: index_cursor,
                    needed: face_index_count,
                    available: index_pool.len().saturating_sub(index_cursor),
                })?;
            faces = indices.chunks_exact(arity).map(<[u16]>::to_vec).collect();
        }
        // The flat cursor advances by the declared count even when a zero
        // arity yields no faces
        index_cursor += face_index_count;

        objects.push(PlgObject {
            name,
            vertices,
            faces,
        });
    }

    Ok(PlgCollection { objects })
}
