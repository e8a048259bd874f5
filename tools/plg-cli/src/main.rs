//! plg-cli - PLG mesh-collection import/export tool
//!
//! Converts PLG files to and from JSON scene documents and inspects their
//! headers without converting.
//!
//! # Commands
//!
//! - `plg-cli info <file.plg>` - Inspect signature, header and objects
//! - `plg-cli unpack <file.plg>` - Decode to a JSON scene document
//! - `plg-cli pack <scene.json>` - Encode a scene document to PLG
//!
//! # Usage
//!
//! ```bash
//! # Round-trip a file through JSON
//! plg-cli unpack stage.plg -o stage.json
//! plg-cli pack stage.json -o stage.plg --variant rev4
//!
//! # Pick a different version tag by name or hex
//! plg-cli pack stage.json --variant fcl-item
//! plg-cli pack stage.json --variant 0x02000000
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use plg::{Header, Signature, decode_plg, encode_plg};
use plg_cli::scene;

#[derive(Parser)]
#[command(name = "plg-cli")]
#[command(about = "PLG mesh-collection import/export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a PLG file without converting it
    Info {
        /// Input .plg file
        input: PathBuf,
    },

    /// Decode a PLG file to a JSON scene document
    Unpack {
        /// Input .plg file
        input: PathBuf,

        /// Output .json file (defaults to the input with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode a JSON scene document to a PLG file
    Pack {
        /// Input .json scene document
        input: PathBuf,

        /// Output .plg file (defaults to the input with a .plg extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Version tag: rev4, rev3, fcl-item, gen2, or a hex tag
        #[arg(short, long, default_value = "rev4")]
        variant: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => info(&input),
        Commands::Unpack { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("json"));
            unpack(&input, &output)
        }
        Commands::Pack {
            input,
            output,
            variant,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("plg"));
            pack(&input, &output, &variant)
        }
    }
}

fn info(input: &Path) -> Result<()> {
    let data =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let signature = Signature::from_bytes(&data)?;
    let layout = signature.variant.layout_size();
    let header = Header::from_bytes(&data[Signature::SIZE..], layout)
        .context("file too short for its header")?;
    let collection = decode_plg(&data)?;

    println!(
        "{}: {:?} (tag 0x{:08X}, layout 0x{:02X}), {} bytes",
        input.display(),
        signature.variant,
        signature.variant.tag(),
        layout.code(),
        data.len(),
    );
    println!(
        "  objects: {}  vertices: {} (max {})  face indices: {}",
        header.object_count,
        header.total_vertex_count,
        header.max_vertex_count,
        header.total_face_index_count,
    );
    for object in &collection.objects {
        println!(
            "  {:<32} {:>5} verts  {:>5} faces (arity {})",
            object.name,
            object.vertices.len(),
            object.faces.len(),
            object.face_arity(),
        );
    }
    Ok(())
}

fn unpack(input: &Path, output: &Path) -> Result<()> {
    tracing::info!("Unpacking {:?} -> {:?}", input, output);
    let data =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let collection = decode_plg(&data)?;
    let doc = scene::collection_to_scene(&collection);
    let json = serde_json::to_string_pretty(&doc)?;
    scene::write_atomic(output, json.as_bytes())?;
    tracing::info!("Done! {} objects", collection.object_count());
    Ok(())
}

fn pack(input: &Path, output: &Path, variant: &str) -> Result<()> {
    let variant = scene::parse_variant(variant)?;
    tracing::info!("Packing {:?} -> {:?} ({:?})", input, output, variant);
    let json =
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let doc: scene::SceneDoc =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", input.display()))?;
    let collection = scene::scene_to_collection(&doc)?;
    let bytes = encode_plg(&collection, variant)?;
    scene::write_atomic(output, &bytes)?;
    tracing::info!("Done! {} bytes", bytes.len());
    Ok(())
}
