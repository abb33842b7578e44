// src/main.rs

// Declare modules
pub mod catalog;
pub mod emit;
pub mod encode;
pub mod error;
pub mod labels;
pub mod marshal;
pub mod op;
pub mod registry;

use std::path::PathBuf;

use anyhow::Context; // For context on Results
use log::info;

use crate::catalog::{Catalog, CATALOG};
use crate::registry::Registry;

/// Default artifact path, matching the name the runtime includes.
const DEFAULT_OUTPUT: &str = "mathreplace-funcs.h";

/// Main entry point for the `mathwrap-gen` generator.
///
/// Usage: `mathwrap-gen [OUTPUT] [--catalog FILE.json]`. With no catalog
/// argument the built-in registration sequence is used.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut output = PathBuf::from(DEFAULT_OUTPUT);
    let mut catalog_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--catalog" {
            let path = args.next().context("--catalog requires a file path")?;
            catalog_path = Some(PathBuf::from(path));
        } else {
            output = PathBuf::from(arg);
        }
    }

    let catalog: Catalog = match &catalog_path {
        Some(path) => {
            let catalog = Catalog::from_json_file(path)
                .with_context(|| format!("failed to load catalog from {}", path.display()))?;
            info!("Catalog loaded from {}.", path.display());
            catalog
        }
        None => {
            info!("Using built-in catalog.");
            CATALOG.clone()
        }
    };
    info!("Catalog holds {} entries.", catalog.entries.len());

    let registry = Registry::from_catalog(&catalog).context("invalid operation catalog")?;
    info!(
        "Registry built: {} operations ({} unary, {} binary, {} ternary), {} extra identities.",
        registry.ops().len(),
        registry.arity_ops(1).len(),
        registry.arity_ops(2).len(),
        registry.arity_ops(3).len(),
        registry.extras().len()
    );

    // The artifact is written in one shot only after emission fully succeeds;
    // a failed run leaves no partial dispatch table behind.
    let artifact = emit::write_dispatch_tables(&registry);
    std::fs::write(&output, &artifact)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Wrote {} ({} bytes).", output.display(), artifact.len());

    Ok(())
}
