//! plg-cli library
//!
//! Scene-document conversion and output helpers used by the `plg-cli`
//! binary and its integration tests.

pub mod scene;

pub use scene::{
    SceneDoc, SceneObject, collection_to_scene, parse_variant, scene_to_collection, write_atomic,
};
