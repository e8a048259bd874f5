//! In-memory PLG collection model
//!
//! The exchange shape between the codec and the mesh-integration side:
//! an ordered sequence of named sub-meshes. Insertion order is
//! significant and survives a round trip; name uniqueness is the
//! producer's contract and is not enforced here.

use serde::{Deserialize, Serialize};

use crate::records::Vertex;

/// One named sub-mesh: vertices plus faces as index tuples.
///
/// Face indices are 0-based into this object's own vertex list. All faces
/// of one object must share one arity; mixed arities are rejected when
/// the object is encoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlgObject {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Vec<u16>>,
}

impl PlgObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Vertices per face, taken from the first face; 0 for faceless
    /// objects (not an error, the entry records arity 0).
    pub fn face_arity(&self) -> usize {
        self.faces.first().map_or(0, Vec::len)
    }
}

/// Ordered collection of named sub-meshes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlgCollection {
    pub objects: Vec<PlgObject>,
}

impl PlgCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn push(&mut self, object: PlgObject) {
        self.objects.push(object);
    }

    /// Find an object by name (first match in insertion order)
    pub fn find_object(&self, name: &str) -> Option<&PlgObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection() {
        let collection = PlgCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.object_count(), 0);
        assert!(collection.find_object("floor").is_none());
    }

    #[test]
    fn test_find_object() {
        let mut collection = PlgCollection::new();
        collection.push(PlgObject::new("floor"));
        collection.push(PlgObject::new("wall"));
        assert_eq!(collection.object_count(), 2);
        assert!(collection.find_object("wall").is_some());
        assert!(collection.find_object("ceiling").is_none());
    }

    #[test]
    fn test_face_arity() {
        let mut object = PlgObject::new("floor");
        assert_eq!(object.face_arity(), 0);
        object.faces.push(vec![0, 1, 2, 3]);
        assert_eq!(object.face_arity(), 4);
    }
}
