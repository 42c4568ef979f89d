//! Validate command implementation.
//!
//! Compares the slices on disk with the scene's baseline and reports
//! every discrepancy before failing.

use std::path::Path;

use clap::Args;

use crate::config::Project;
use crate::error::{LayoutError, Result};
use crate::output::{display_path, plural, Printer};
use crate::validation::{validate_slices, ValidationReport};

use super::{load_baseline, require_scene};

/// Check slice dimensions against the baseline
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Scene to validate
    pub scene: Option<String>,

    /// Print the failure list as JSON to stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ValidateArgs, root: &Path, printer: &Printer) -> Result<()> {
    let scene = require_scene(args.scene, "validate")?;
    let project = Project::open(root)?;
    let report = validate_scene(&project, &scene, printer)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report.failures).map_err(|e| LayoutError::Parse {
            message: format!("Failed to serialize validation report: {}", e),
            help: None,
        })?;
        println!("{}", json);
    }

    if report.is_ok() {
        return Ok(());
    }
    Err(LayoutError::Validation {
        message: format!(
            "{} of {} differ from the baseline",
            report.failure_count(),
            plural(report.checked, "slice", "slices")
        ),
        help: Some(format!("Run `gabarito slice {}` to regenerate them", scene)),
    })
}

/// Validate the slices of `scene`, printing each failure.
pub fn validate_scene(project: &Project, scene: &str, printer: &Printer) -> Result<ValidationReport> {
    let loaded = load_baseline(project, scene, printer)?;
    let slices_dir = project.slices_dir(scene);

    printer.status(
        "Checking",
        &format!(
            "{} against {}",
            display_path(&slices_dir),
            display_path(&loaded.path)
        ),
    );
    let report = validate_slices(&loaded.baseline, &slices_dir)?;

    for failure in report.iter() {
        printer.error(&failure.kind.to_string(), &failure.to_string());
    }
    if report.is_ok() {
        printer.success(
            "Validated",
            &format!(
                "{} of scene '{}' match {}",
                plural(report.checked, "slice", "slices"),
                scene,
                display_path(&loaded.path)
            ),
        );
    }

    Ok(report)
}
