//! PLG encoding

use crate::collection::PlgCollection;
use crate::error::PlgError;
use crate::layout::plan_layout;
use crate::records::Signature;
use crate::variant::Variant;

/// Encode a collection under the given version tag.
///
/// The byte stream is assembled fully in memory and nothing is produced
/// on error. Objects are written in collection order: all entry records,
/// then the flat vertex pool, then the flat face-index pool, then zero
/// padding to a multiple of 4. Callers that need a name-sorted file must
/// sort the collection before encoding.
pub fn encode_plg(collection: &PlgCollection, variant: Variant) -> Result<Vec<u8>, PlgError> {
    let plan = plan_layout(collection, variant)?;
    let layout = variant.layout_size();

    let mut out = Vec::with_capacity(plan.padded_len);
    out.extend_from_slice(&Signature::new(variant).to_bytes());
    out.extend_from_slice(&plan.header.to_bytes(layout));
    for entry in &plan.entries {
        out.extend_from_slice(&entry.to_bytes(layout));
    }
    for object in &collection.objects {
        for vertex in &object.vertices {
            out.extend_from_slice(&vertex.to_bytes());
        }
    }
    for object in &collection.objects {
        for face in &object.faces {
            for &index in face {
                out.extend_from_slice(&index.to_le_bytes());
            }
        }
    }

    // Trailing zeros up to the padded length; some variants declare the
    // padded size in the header, all variants pad on disk
    out.resize(plan.padded_len, 0);
    Ok(out)
}
