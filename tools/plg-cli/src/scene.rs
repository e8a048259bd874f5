//! JSON scene documents and export-side conventions
//!
//! The scene document mirrors the codec's collection model one-to-one,
//! plus a per-item `kind` so non-mesh scene items can be represented and
//! rejected at pack time. The codec itself performs no transforms; the
//! conventions of the authoring side live here: mesh-only input, objects
//! sorted by name, and `tag~name` items keeping only the part after the
//! tilde.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use plg::{PlgCollection, PlgError, PlgObject, Variant, Vertex};

/// One scene item. Anything whose `kind` is not `"mesh"` can be carried
/// in a document but refuses to pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub faces: Vec<Vec<u16>>,
}

/// A scene document: the JSON exchange shape of a PLG collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDoc {
    pub objects: Vec<SceneObject>,
}

fn default_kind() -> String {
    "mesh".to_string()
}

/// Build a collection ready for encoding.
///
/// Every item must be a mesh (checked up front, before any layout work);
/// objects are sorted by their full scene name ascending, then tilde tags
/// are stripped.
pub fn scene_to_collection(doc: &SceneDoc) -> Result<PlgCollection, PlgError> {
    for object in &doc.objects {
        if object.kind != "mesh" {
            return Err(PlgError::NonMeshInput {
                name: object.name.clone(),
            });
        }
    }

    let mut items: Vec<&SceneObject> = doc.objects.iter().collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));

    let mut collection = PlgCollection::new();
    for item in items {
        let name = match item.name.split_once('~') {
            Some((_, suffix)) => suffix,
            None => item.name.as_str(),
        };
        collection.push(PlgObject {
            name: name.to_string(),
            vertices: item.vertices.clone(),
            faces: item.faces.clone(),
        });
    }
    Ok(collection)
}

/// Expose a decoded collection as a scene document.
pub fn collection_to_scene(collection: &PlgCollection) -> SceneDoc {
    SceneDoc {
        objects: collection
            .objects
            .iter()
            .map(|object| SceneObject {
                name: object.name.clone(),
                kind: default_kind(),
                vertices: object.vertices.clone(),
                faces: object.faces.clone(),
            })
            .collect(),
    }
}

/// Resolve a version tag from a CLI name (`rev4`, `rev3`, `fcl-item`,
/// `gen2`) or a hex tag like `0x01000400`.
pub fn parse_variant(s: &str) -> Result<Variant> {
    match s.to_ascii_lowercase().as_str() {
        "rev4" => Ok(Variant::Rev4),
        "rev3" => Ok(Variant::Rev3),
        "fcl-item" | "fclitem" => Ok(Variant::FclItem),
        "gen2" => Ok(Variant::Gen2),
        other => {
            let digits = other.strip_prefix("0x").unwrap_or(other);
            let tag = u32::from_str_radix(digits, 16)
                .map_err(|_| anyhow!("unknown variant '{s}' (expected a name or hex tag)"))?;
            Variant::from_tag(tag).ok_or_else(|| anyhow!("unsupported version tag 0x{tag:08X}"))
        }
    }
}

/// Write a file all-or-nothing: the bytes go to a temp file in the
/// destination directory, which is persisted over the target only after
/// the write completed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(bytes)?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
