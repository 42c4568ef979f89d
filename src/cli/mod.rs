pub mod completions;
pub mod init;
pub mod regions;
pub mod slice;
pub mod sync;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::baseline::{Baseline, LoadedBaseline};
use crate::config::Project;
use crate::error::{LayoutError, Result};
use crate::output::{display_path, Printer};
use crate::source::SourceLocation;

/// gabarito - layout tokens and slices from a vector design reference
#[derive(Parser, Debug)]
#[command(name = "gabarito")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root (where gabarito.yaml lives)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Print per-region details
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve regions and write the baseline and generated module
    Sync(sync::SyncArgs),

    /// Rasterize each region of a scene into a PNG slice
    Slice(slice::SliceArgs),

    /// Check slice dimensions against the baseline
    Validate(validate::ValidateArgs),

    /// Initialize a project (generates gabarito.yaml)
    Init(init::InitArgs),

    /// List declared regions
    Regions(regions::RegionsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Positional scene argument that a command cannot run without.
fn require_scene(scene: Option<String>, command: &str) -> Result<String> {
    match scene {
        Some(scene) if !scene.trim().is_empty() => Ok(scene),
        _ => Err(LayoutError::Usage {
            message: format!("`gabarito {}` needs a scene", command),
            help: Some(format!("Example: gabarito {} game", command)),
        }),
    }
}

/// Load the baseline for `scene`, warning about unusable candidates.
fn load_baseline(project: &Project, scene: &str, printer: &Printer) -> Result<LoadedBaseline> {
    let candidates = project.baseline_candidates(scene);
    let (loaded, skipped) = Baseline::load_first(scene, &candidates)?;
    for candidate in skipped {
        printer.warning(
            "Ignoring",
            &format!("{} ({})", display_path(&candidate.path), candidate.reason),
        );
    }
    printer.verbose("Baseline", &display_path(&loaded.path));
    Ok(loaded)
}

fn report_source(location: &SourceLocation, scene: &str, printer: &Printer) {
    if location.is_fallback {
        printer.warning(
            "Fallback",
            &format!(
                "no source for scene '{}', using {}",
                scene,
                display_path(&location.path)
            ),
        );
    } else {
        printer.verbose("Source", &display_path(&location.path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_require_scene() {
        assert_eq!(require_scene(Some("game".to_string()), "slice").unwrap(), "game");
        let err = require_scene(None, "slice").unwrap_err();
        assert!(matches!(err, LayoutError::Usage { .. }));
        assert!(require_scene(Some("  ".to_string()), "slice").is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gabarito", "slice", "game", "--root", "web", "-v"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("web"));
        assert!(cli.verbose);
        match cli.command {
            Commands::Slice(args) => assert_eq!(args.scene.as_deref(), Some("game")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
