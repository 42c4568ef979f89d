//! Sync command implementation.
//!
//! Resolves every declared region from the vector source and rewrites the
//! scene's baseline JSON and generated module.

use std::path::Path;

use clap::Args;

use crate::baseline::{BaselineWriter, WrittenBaseline};
use crate::config::Project;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::resolve::RegionResolver;
use crate::source::{locate_source, MarkupIndex};
use crate::token::build_tokens;

use super::report_source;

/// Resolve regions and write the baseline and generated module
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Scene to sync (default: the canonical scene from gabarito.yaml)
    #[arg(long)]
    pub scene: Option<String>,
}

pub fn run(args: SyncArgs, root: &Path, printer: &Printer) -> Result<()> {
    let project = Project::open(root)?;
    let scene = args
        .scene
        .unwrap_or_else(|| project.manifest.canonical_scene.clone());
    sync_scene(&project, &scene, printer)?;
    Ok(())
}

/// Resolve all regions of `scene` and write its artifacts.
///
/// Nothing is written when any region fails to resolve.
pub fn sync_scene(project: &Project, scene: &str, printer: &Printer) -> Result<WrittenBaseline> {
    let manifest = &project.manifest;
    let location = locate_source(&project.public_dir(), scene, &manifest.default_source)?;
    report_source(&location, scene, printer);

    let text = location.read()?;
    let index = MarkupIndex::parse(&text)?;

    printer.status(
        "Resolving",
        &format!(
            "{} from {}",
            plural(manifest.regions.len(), "region", "regions"),
            display_path(&location.path)
        ),
    );
    let resolved = RegionResolver::new(&index).resolve_all(&manifest.regions)?;
    for region in &resolved {
        let b = &region.bounds;
        printer.verbose(
            &region.key,
            &format!(
                "{} {}x{} at ({}, {})",
                printer.dim(&format!("[{:?}]", region.source).to_lowercase()),
                b.width,
                b.height,
                b.x,
                b.y
            ),
        );
    }

    let tokens = build_tokens(&resolved);
    let written = BaselineWriter::new(project).write(scene, &tokens)?;

    printer.success("Wrote", &display_path(&written.module_path));
    printer.success("Wrote", &display_path(&written.baseline_path));
    if let Some(default_path) = &written.default_path {
        printer.success("Wrote", &display_path(default_path));
    }

    Ok(written)
}
