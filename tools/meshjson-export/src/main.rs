//! meshjson-export - mesh JSON array export tool
//!
//! Converts triangle meshes (OBJ, glTF, GLB) to the compact
//! `[positions, normals, indices]` JSON format, and back to OBJ.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use meshjson_common::MESH_JSON_EXT;
use meshjson_export::{Precision, export, import, manifest};

#[derive(Parser)]
#[command(name = "meshjson-export")]
#[command(about = "Mesh JSON array export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a single mesh file to JSON
    Export {
        /// Input mesh file (OBJ/glTF/GLB)
        input: PathBuf,

        /// Output .json file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Decimal places kept per coordinate (1-10)
        #[arg(short, long, default_value_t = Precision::DEFAULT)]
        precision: Precision,

        /// glTF mesh index (default: first mesh)
        #[arg(short, long)]
        mesh: Option<usize>,
    },

    /// Rebuild a mesh from JSON as Wavefront OBJ
    Import {
        /// Input .json file
        input: PathBuf,

        /// Output .obj file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export all meshes from a manifest file
    Build {
        /// Path to meshjson.toml manifest
        #[arg(default_value = manifest::DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without exporting
    Check {
        /// Path to meshjson.toml manifest
        #[arg(default_value = manifest::DEFAULT_MANIFEST)]
        manifest: PathBuf,
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
        Commands::Export {
            input,
            output,
            precision,
            mesh,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(MESH_JSON_EXT));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            export::export_mesh(&input, &output, precision, mesh)?;
            tracing::info!("Done!");
        }

        Commands::Import { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("obj"));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            import::import_mesh(&input, &output)?;
            tracing::info!("Done!");
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building meshes from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            let summaries = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} meshes exported", summaries.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
