//! `lunavox`: inspect, mesh and dump the palette of MagicaVoxel `.vox` files.
//!
//! ```text
//! lunavox inspect castle.vox
//! lunavox --config import.toml mesh castle.vox --model 2
//! lunavox -vv palette castle.vox
//! ```

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use lunavox::{import_file, ImportConfig, ImportResult, ImportedModel};
use lunavox_format::{decode_file, PositionedKind, PositionedNode, Scene};
use tracing::{error, Level};

#[derive(Parser)]
#[command(name = "lunavox", version, about = "Inspect and mesh MagicaVoxel .vox files")]
struct Cli {
    /// Import configuration (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print models, node hierarchy and decode warnings
    Inspect {
        /// The .vox file
        file: PathBuf,
    },
    /// Mesh models and print per-batch statistics
    Mesh {
        /// The .vox file
        file: PathBuf,
        /// Only this model
        #[arg(long)]
        model: Option<usize>,
    },
    /// Print the usable palette entries with their material class
    Palette {
        /// The .vox file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ImportResult<()> {
    match cli.command {
        Command::Inspect { file } => inspect(&file),
        Command::Mesh { file, model } => {
            let config = match &cli.config {
                Some(path) => ImportConfig::load(path)?,
                None => ImportConfig::default(),
            };
            mesh(&file, model, &config)
        }
        Command::Palette { file } => palette(&file),
    }
}

// =============================================================================
// INSPECT
// =============================================================================

fn inspect(file: &Path) -> ImportResult<()> {
    let scene = decode_file(file)?;

    println!("{}", file.display());
    println!("  version        {}", scene.version);
    if let Some(declared) = scene.declared_model_count {
        println!("  declared       {declared} models");
    }
    println!(
        "  models         {} ({} voxels read, {} stored)",
        scene.models.len(),
        scene.total_voxels_read,
        scene.voxel_count()
    );
    println!(
        "  palette        {}",
        if scene.has_custom_palette { "custom" } else { "default" }
    );
    println!("  materials      {} declared", scene.materials.declared_count());
    println!("  cameras        {}", scene.cameras.len());

    println!();
    for (index, grid) in scene.models.iter().enumerate() {
        let size = grid.size();
        println!(
            "  vox_model #{index:<4} {:>3} x {:>3} x {:>3}  {:>7} voxels",
            size.x,
            size.y,
            size.z,
            grid.voxel_count()
        );
    }

    print_hierarchy(&scene)?;

    if !scene.warnings.is_empty() {
        println!();
        println!("  warnings:");
        for warning in &scene.warnings {
            println!("    {warning}");
        }
    }
    Ok(())
}

fn print_hierarchy(scene: &Scene) -> ImportResult<()> {
    let tree = scene.resolve()?;
    if let Some(root) = &tree.root {
        println!();
        print_node(root, 1);
    }
    Ok(())
}

fn print_node(node: &PositionedNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let offset = node.world_offset;
    match node.kind {
        PositionedKind::Transform { rotation: Some(r) } => println!(
            "{indent}{}  @ ({}, {}, {})  r={r}",
            node.label, offset.x, offset.y, offset.z
        ),
        _ => println!(
            "{indent}{}  @ ({}, {}, {})",
            node.label, offset.x, offset.y, offset.z
        ),
    }
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

// =============================================================================
// MESH
// =============================================================================

fn mesh(file: &Path, model: Option<usize>, config: &ImportConfig) -> ImportResult<()> {
    let output = import_file(file, config)?;

    if !config.build_geometry {
        println!("geometry disabled by configuration");
        return Ok(());
    }

    match model {
        Some(index) => print_model(output.model(index)?),
        None => output.models.iter().for_each(print_model),
    }
    Ok(())
}

fn print_model(model: &ImportedModel) {
    let size = model.size;
    println!(
        "{}  {} x {} x {}  {} voxels  {} triangles",
        model.name,
        size.x,
        size.y,
        size.z,
        model.voxel_count,
        model.mesh.triangle_count()
    );
    for (batch, template) in model.mesh.batches.iter().zip(&model.material_slots) {
        println!(
            "  {:<8} {:>7} vertices {:>7} triangles  {:?}  {template}",
            format!("{:?}", batch.material),
            batch.vertex_count(),
            batch.triangle_count(),
            batch.index_format()
        );
    }
}

// =============================================================================
// PALETTE
// =============================================================================

fn palette(file: &Path) -> ImportResult<()> {
    let scene = decode_file(file)?;
    for index in 1..=u8::MAX {
        let c = scene.palette.get(index);
        println!(
            "{index:>3}  #{:02x}{:02x}{:02x}{:02x}  {:?}",
            c.r,
            c.g,
            c.b,
            c.a,
            scene.material_of(index)
        );
    }
    Ok(())
}
