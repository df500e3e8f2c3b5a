//! Pravasi CLI binary.
//!
//! `fuse` runs the batch pipeline end to end, `coords` annotates an
//! existing artifact with map coordinates, and `serve` exposes the
//! artifact over a read-only HTTP API.

mod server;

use clap::{Parser, Subcommand};
use pravasi::{DESTINATION, PipelineConfig, StaticGeocoder};
use pravasi_output::MigrationMaster;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "pravasi")]
#[command(about = "Pravasi: migration-intensity analytics from demographic snapshots", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full fusion pipeline: load, train, export
    Fuse {
        /// Glob matching the demographic CSV source files
        #[arg(long, default_value = "data/demographic/*.csv")]
        input: String,

        /// Output path for the migration master artifact
        #[arg(long, default_value = "data/migration_master.json")]
        artifact: PathBuf,

        /// Output path for the trained model snapshot
        #[arg(long, default_value = "models/gbdt_migration_model.json")]
        model: PathBuf,

        /// Annotate the artifact with map coordinates after the run
        #[arg(long)]
        coords: bool,
    },

    /// Inject map coordinates into an existing artifact
    Coords {
        /// Path of the artifact to annotate in place
        #[arg(long, default_value = "data/migration_master.json")]
        artifact: PathBuf,
    },

    /// Serve the artifact over a read-only HTTP API
    Serve {
        /// Path of the artifact to serve
        #[arg(long, default_value = "data/migration_master.json")]
        artifact: PathBuf,

        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fuse {
            input,
            artifact,
            model,
            coords,
        } => {
            let config = PipelineConfig {
                input_glob: input,
                artifact_path: artifact.clone(),
                model_path: model,
                ..Default::default()
            };
            let report = pravasi::run(&config)?;

            println!(
                "Loaded {} observations ({} kept after the date filter)",
                report.observations_loaded, report.observations_kept
            );
            println!(
                "Exported {} district/month rows to {}",
                report.feature_rows,
                report.artifact_path.display()
            );
            println!("Model snapshot written to {}", report.model_path.display());

            if coords {
                annotate(&artifact)?;
            }
            Ok(())
        }
        Commands::Coords { artifact } => annotate(&artifact),
        Commands::Serve { artifact, port } => server::serve(artifact, port).await,
    }
}

fn annotate(artifact: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut master = MigrationMaster::read_json(artifact)?;
    master.annotate_coordinates(&StaticGeocoder, DESTINATION);
    master.write_json(artifact)?;
    println!("Coordinates injected into {}", artifact.display());
    Ok(())
}
