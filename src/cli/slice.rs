//! Slice command implementation.
//!
//! Rasterizes the scene's vector source once and writes one PNG per
//! region. A region that fails is reported and the run moves on.

use std::path::Path;

use clap::Args;

use crate::config::Project;
use crate::error::{LayoutError, Result};
use crate::output::{display_path, plural, Printer};
use crate::resolve::RegionResolver;
use crate::slice::{plan_slices, FrameOrigin, Rasterizer, SliceGenerator, SliceOutcome, SliceReport};
use crate::source::{locate_source, MarkupIndex};

use super::{load_baseline, report_source, require_scene};

/// Rasterize each region of a scene into a PNG slice
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// Scene to slice
    pub scene: Option<String>,

    /// Print the slice report as JSON to stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SliceArgs, root: &Path, printer: &Printer) -> Result<()> {
    let scene = require_scene(args.scene, "slice")?;
    let project = Project::open(root)?;
    let report = slice_scene(&project, &scene, printer)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| LayoutError::Parse {
            message: format!("Failed to serialize slice report: {}", e),
            help: None,
        })?;
        println!("{}", json);
    }

    Ok(())
}

/// Slice every declared region of `scene`.
///
/// Fails before touching any region when there is no baseline or no
/// source. Per-region failures are recorded in the report.
pub fn slice_scene(project: &Project, scene: &str, printer: &Printer) -> Result<SliceReport> {
    let manifest = &project.manifest;
    let loaded = load_baseline(project, scene, printer)?;

    let location = locate_source(&project.public_dir(), scene, &manifest.default_source)?;
    report_source(&location, scene, printer);
    let data = location.read_bytes()?;
    let text = std::str::from_utf8(&data).map_err(|e| LayoutError::Parse {
        message: format!("{} is not valid UTF-8: {}", display_path(&location.path), e),
        help: None,
    })?;

    let index = MarkupIndex::parse(text)?;
    let resolver = RegionResolver::new(&index);
    let plans = plan_slices(&manifest.regions, &resolver, &loaded.baseline);

    printer.status(
        "Rendering",
        &format!("{} at {} dpi", display_path(&location.path), manifest.density),
    );
    let rasterizer = Rasterizer::render(&data, manifest.supersample())?;
    let generator = SliceGenerator::new(rasterizer, &project.slices_dir(scene))?;

    let mut report = SliceReport::new(scene, generator.output_dir());
    for plan in plans {
        let plan = match plan {
            Ok(plan) => plan,
            Err(key) => {
                printer.warning("Skipped", &format!("{}: could not resolve bounds", key));
                report.push(SliceOutcome::Skipped { key });
                continue;
            }
        };

        if plan.origin == FrameOrigin::Source {
            printer.verbose(&plan.key, "no baseline frame, using bounds from the source");
        }

        let outcome = generator.generate(&plan);
        match &outcome {
            SliceOutcome::Written { rect, .. } => printer.status(
                "Sliced",
                &format!("{} ({}x{})", plan.file_name, rect.width, rect.height),
            ),
            SliceOutcome::Failed { key, error, .. } => {
                printer.error("Failed", &format!("{}: {}", key, error))
            }
            SliceOutcome::Skipped { .. } => {}
        }
        report.push(outcome);
    }

    let mut summary = plural(report.written(), "slice", "slices");
    if report.skipped() > 0 {
        summary.push_str(&format!(", {} skipped", report.skipped()));
    }
    if report.failed() > 0 {
        summary.push_str(&format!(", {} failed", report.failed()));
    }
    printer.success(
        "Finished",
        &format!("{} in {}", summary, display_path(generator.output_dir())),
    );

    Ok(report)
}
