//! Encode-path layout planning
//!
//! Derives every count, bounding box and offset field the header and
//! object entry records need before any bytes are written. A plan is only
//! produced once every object has passed validation; nothing partial
//! escapes.

use crate::collection::{PlgCollection, PlgObject};
use crate::error::PlgError;
use crate::name::encode_name;
use crate::records::{Header, ObjectEntry, Vertex};
use crate::variant::{LayoutSize, Variant};

/// Fully derived header and entry records, ready for serialization.
#[derive(Debug)]
pub(crate) struct LayoutPlan {
    pub header: Header,
    pub entries: Vec<ObjectEntry>,
    /// Total encoded length including trailing padding
    pub padded_len: usize,
}

/// Plan the layout for a collection under the given version tag.
pub(crate) fn plan_layout(
    collection: &PlgCollection,
    variant: Variant,
) -> Result<LayoutPlan, PlgError> {
    let mut planner = LayoutPlanner::new(variant);
    for object in &collection.objects {
        planner.add_object(object)?;
    }
    planner.finish()
}

struct LayoutPlanner {
    variant: Variant,
    entries: Vec<ObjectEntry>,
    total_vertices: u64,
    total_face_indices: u64,
}

impl LayoutPlanner {
    fn new(variant: Variant) -> Self {
        Self {
            variant,
            entries: Vec::new(),
            total_vertices: 0,
            total_face_indices: 0,
        }
    }

    fn add_object(&mut self, object: &PlgObject) -> Result<(), PlgError> {
        let arity = object.face_arity();
        for face in &object.faces {
            if face.len() != arity {
                return Err(PlgError::MixedArity {
                    name: object.name.clone(),
                    expected: arity,
                    found: face.len(),
                });
            }
        }

        let vertex_count = object.vertices.len();
        let face_index_count = object.faces.len() * arity;
        check_limit(
            format!("object '{}' vertex count", object.name),
            vertex_count as u64,
            u16::MAX as u64,
        )?;
        check_limit(
            format!("object '{}' face arity", object.name),
            arity as u64,
            u16::MAX as u64,
        )?;
        check_limit(
            format!("object '{}' face index count", object.name),
            face_index_count as u64,
            u16::MAX as u64,
        )?;

        let (x_min, y_min, x_max, y_max) = bounding_box(&object.vertices);

        self.entries.push(ObjectEntry {
            vertex_count: vertex_count as u16,
            face_index_count: face_index_count as u16,
            face_arity: arity as u16,
            x_min,
            y_min,
            x_max,
            y_max,
            name: encode_name(&object.name)?,
            ..ObjectEntry::default()
        });
        self.total_vertices += vertex_count as u64;
        self.total_face_indices += face_index_count as u64;
        Ok(())
    }

    fn finish(mut self) -> Result<LayoutPlan, PlgError> {
        let layout = self.variant.layout_size();
        let code = layout.code() as u64;
        let entry_len = layout.entry_len() as u64;
        let object_count = self.entries.len() as u64;

        // Global counts must fit the header's field widths
        let count_max = match layout {
            LayoutSize::Compact => u16::MAX as u64,
            LayoutSize::Extended => u32::MAX as u64,
        };
        check_limit("object count".to_string(), object_count, count_max)?;
        check_limit("total vertex count".to_string(), self.total_vertices, count_max)?;
        check_limit(
            "total face index count".to_string(),
            self.total_face_indices,
            count_max,
        )?;

        let vertex_pool_offset = code + object_count * entry_len;
        let face_pool_offset = vertex_pool_offset + Vertex::SIZE as u64 * self.total_vertices;
        let file_end = face_pool_offset + 2 * self.total_face_indices;
        let file_size = file_end.next_multiple_of(4);
        check_limit("file size".to_string(), file_size, u32::MAX as u64)?;

        let max_vertex_count = self
            .entries
            .iter()
            .map(|e| e.vertex_count as u32)
            .max()
            .unwrap_or(0);

        let header = Header {
            vertex_data_offset: vertex_pool_offset as u32,
            face_data_offset: face_pool_offset as u32,
            file_size: match layout {
                LayoutSize::Compact => 0,
                LayoutSize::Extended => file_size as u32,
            },
            object_count: object_count as u32,
            total_vertex_count: self.total_vertices as u32,
            max_vertex_count,
            total_face_index_count: self.total_face_indices as u32,
        };

        // Per-object offsets use the format's interleaved relative
        // addressing: each pool offset advances by that object's pool
        // bytes minus one entry record. One tag stores no offsets at all.
        if self.variant.stores_object_offsets() {
            let mut vertex_run = vertex_pool_offset - code;
            let mut face_run = face_pool_offset - code;
            let mut end_run = file_size - code;
            for entry in &mut self.entries {
                entry.vertex_data_offset = vertex_run as u32;
                entry.face_data_offset = face_run as u32;
                vertex_run = vertex_run + Vertex::SIZE as u64 * entry.vertex_count as u64 - entry_len;
                face_run = face_run + 2 * entry.face_index_count as u64 - entry_len;
                if layout == LayoutSize::Extended {
                    entry.end_offset = end_run as u32;
                    end_run -= entry_len;
                }
            }
        }

        Ok(LayoutPlan {
            header,
            entries: self.entries,
            padded_len: file_size as usize,
        })
    }
}

/// Min/max over vertex x/y; the all-zero box for vertexless objects.
fn bounding_box(vertices: &[Vertex]) -> (f32, f32, f32, f32) {
    if vertices.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let x_min = vertices.iter().map(|v| v.x).fold(f32::INFINITY, f32::min);
    let y_min = vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
    let x_max = vertices.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max);
    let y_max = vertices.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max);
    (x_min, y_min, x_max, y_max)
}

fn check_limit(what: String, value: u64, max: u64) -> Result<(), PlgError> {
    if value > max {
        return Err(PlgError::LimitExceeded { what, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str) -> PlgObject {
        let mut object = PlgObject::new(name);
        object.vertices = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(0.0, 1.0),
        ];
        object.faces = vec![vec![0, 1, 2, 3]];
        object
    }

    #[test]
    fn test_bounding_box() {
        let vertices = [
            Vertex::new(-2.0, 3.5),
            Vertex::new(4.0, -1.0),
            Vertex::new(0.0, 0.0),
        ];
        assert_eq!(bounding_box(&vertices), (-2.0, -1.0, 4.0, 3.5));
        assert_eq!(bounding_box(&[]), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_plan_offsets_compact() {
        let mut collection = PlgCollection::new();
        collection.push(square("floor"));
        collection.push(square("wall"));
        let plan = plan_layout(&collection, Variant::Rev3).unwrap();

        // 12 + 20 sig/header + 2 x 64 entries
        assert_eq!(plan.header.vertex_data_offset, 0x20 + 2 * 64);
        assert_eq!(plan.header.face_data_offset, 0x20 + 2 * 64 + 8 * 16);
        assert_eq!(plan.header.object_count, 2);
        assert_eq!(plan.header.total_vertex_count, 8);
        assert_eq!(plan.header.max_vertex_count, 4);
        assert_eq!(plan.header.total_face_index_count, 8);

        // Relative interleaved addressing: first object's vertex offset is
        // the full entry table span, then +16*vc-64 per step
        assert_eq!(plan.entries[0].vertex_data_offset, 128);
        assert_eq!(plan.entries[1].vertex_data_offset, 128 + 64 - 64);
        assert_eq!(plan.entries[0].face_data_offset, 256);
        assert_eq!(plan.entries[1].face_data_offset, 256 + 8 - 64);
        assert_eq!(plan.padded_len, 0x20 + 2 * 64 + 8 * 16 + 8 * 2);
    }

    #[test]
    fn test_plan_end_offsets_extended() {
        let mut collection = PlgCollection::new();
        collection.push(square("floor"));
        collection.push(square("wall"));
        let plan = plan_layout(&collection, Variant::Rev4).unwrap();

        let file_size = 0x38 + 2 * 72 + 8 * 16 + 8 * 2;
        assert_eq!(plan.header.file_size, file_size);
        assert_eq!(plan.padded_len as u32, file_size);
        assert_eq!(plan.entries[0].end_offset, file_size - 0x38);
        assert_eq!(plan.entries[1].end_offset, file_size - 0x38 - 72);
    }

    #[test]
    fn test_plan_skips_offsets_for_fcl_item() {
        let mut collection = PlgCollection::new();
        collection.push(square("floor"));
        let plan = plan_layout(&collection, Variant::FclItem).unwrap();

        // Header offsets are still derived; only per-object offsets stay 0
        assert_eq!(plan.header.vertex_data_offset, 0x20 + 64);
        assert_eq!(plan.entries[0].vertex_data_offset, 0);
        assert_eq!(plan.entries[0].face_data_offset, 0);
        assert_eq!(plan.entries[0].vertex_count, 4);
    }

    #[test]
    fn test_mixed_arity_rejected() {
        let mut object = square("floor");
        object.faces.push(vec![0, 1, 2]);
        let mut collection = PlgCollection::new();
        collection.push(object);

        let err = plan_layout(&collection, Variant::Rev3).unwrap_err();
        assert_eq!(
            err,
            PlgError::MixedArity {
                name: "floor".to_string(),
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn test_faceless_object_has_zero_arity() {
        let mut object = PlgObject::new("points");
        object.vertices = vec![Vertex::new(5.0, -5.0)];
        let mut collection = PlgCollection::new();
        collection.push(object);

        let plan = plan_layout(&collection, Variant::Rev3).unwrap();
        assert_eq!(plan.entries[0].face_arity, 0);
        assert_eq!(plan.entries[0].face_index_count, 0);
        assert_eq!(plan.header.total_face_index_count, 0);
    }

    #[test]
    fn test_empty_collection_plans() {
        let plan = plan_layout(&PlgCollection::new(), Variant::Rev3).unwrap();
        assert_eq!(plan.header.object_count, 0);
        assert_eq!(plan.header.max_vertex_count, 0);
        assert_eq!(plan.header.vertex_data_offset, 0x20);
        assert_eq!(plan.header.face_data_offset, 0x20);
        assert_eq!(plan.padded_len, 0x20);
    }

    #[test]
    fn test_vertex_count_limit() {
        let mut object = PlgObject::new("huge");
        object.vertices = vec![Vertex::new(0.0, 0.0); u16::MAX as usize + 1];
        let mut collection = PlgCollection::new();
        collection.push(object);

        assert!(matches!(
            plan_layout(&collection, Variant::Rev4),
            Err(PlgError::LimitExceeded { .. })
        ));
    }
}
