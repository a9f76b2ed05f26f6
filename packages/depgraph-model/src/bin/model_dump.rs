//! Model dump CLI
//!
//! Builds a tooling model from JSON snapshots of variant artifact queries
//! and prints it as JSON. Sync issues go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Simple graph of one variant
//! cargo run --bin model-dump -- --scope app-debug.json
//!
//! # Full graphs of two variants, then the library map
//! cargo run --bin model-dump -- --scope app-debug.json --scope lib-debug.json --full --with-library-map
//!
//! # Level-1 dependencies with a config file
//! cargo run --bin model-dump -- --scope app-debug.json --config depgraph.yaml --model LegacyDependencies
//! ```

use clap::Parser;
use depgraph_model::shared::ports::StaticVariantScope;
use depgraph_model::{GraphBuildConfig, GraphBuildSession, ModelRegistry, VariantScope};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "model-dump")]
#[command(about = "Build IDE dependency models from variant snapshots", long_about = None)]
struct Cli {
    /// Variant snapshot (JSON); repeat for several variants
    #[arg(short, long, required = true)]
    scope: Vec<PathBuf>,

    /// Session configuration (YAML v1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model to build
    #[arg(short, long, default_value = "VariantDependencies")]
    model: String,

    /// Build compile and runtime graphs
    #[arg(long)]
    full: bool,

    /// Print the global library map after the model
    #[arg(long)]
    with_library_map: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GraphBuildConfig::from_yaml(path)?,
        None => GraphBuildConfig::default(),
    };
    if cli.full {
        config.full_dependencies = true;
    }

    let registry = ModelRegistry::new();
    if !registry.can_build(&cli.model) {
        return Err(format!(
            "Unknown model '{}'. Available: {}",
            cli.model,
            registry.model_names().join(", ")
        )
        .into());
    }

    let scopes = cli
        .scope
        .iter()
        .map(StaticVariantScope::from_json_file)
        .collect::<Result<Vec<_>, _>>()?;
    let scope_refs: Vec<&dyn VariantScope> =
        scopes.iter().map(|s| s as &dyn VariantScope).collect();

    let session = GraphBuildSession::new(config)?;
    let model = registry.build_all(&cli.model, &session, &scope_refs)?;

    for issue in model.issues() {
        eprintln!("{}", issue);
    }
    println!("{}", model.to_json()?);

    if cli.with_library_map {
        let map = registry.build_all("GlobalLibraryMap", &session, &[])?;
        println!("{}", map.to_json()?);
    }

    Ok(())
}
