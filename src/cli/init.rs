//! Init command implementation.
//!
//! Generates a `gabarito.yaml` manifest holding the built-in defaults.

use std::fs;
use std::path::Path;

use clap::Args;

use crate::config::{Manifest, MANIFEST_FILENAME};
use crate::error::{LayoutError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize a project by generating a gabarito.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing gabarito.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, root: &Path, printer: &Printer) -> Result<()> {
    let manifest_path = root.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(LayoutError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest::default();
    let yaml = manifest.to_yaml()?;
    fs::write(&manifest_path, yaml).map_err(|e| LayoutError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    let public_dir = root.join(&manifest.public_dir);
    if !public_dir.is_dir() {
        printer.warning(
            "Missing",
            &format!("{} (vector sources go here)", display_path(&public_dir)),
        );
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} declared)",
            display_path(&manifest_path),
            plural(manifest.regions.len(), "region", "regions")
        ),
    );

    Ok(())
}
