//! Regions command implementation.
//!
//! Prints the declared regions in resolution order.

use std::path::Path;

use clap::Args;

use crate::config::{Project, RegionDescriptor, Strategy};
use crate::error::{LayoutError, Result};
use crate::output::{plural, Printer};

/// List declared regions
#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Print the region list as JSON to stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RegionsArgs, root: &Path, printer: &Printer) -> Result<()> {
    let project = Project::open(root)?;
    let regions = &project.manifest.regions;

    if args.json {
        let json = serde_json::to_string_pretty(regions).map_err(|e| LayoutError::Parse {
            message: format!("Failed to serialize regions: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    for region in regions {
        printer.info(strategy_label(region), &describe(region, printer));
    }

    let origin = if project.has_manifest {
        "gabarito.yaml"
    } else {
        "built-in defaults"
    };
    printer.success(
        "Listed",
        &format!("{} from {}", plural(regions.len(), "region", "regions"), origin),
    );
    Ok(())
}

fn strategy_label(region: &RegionDescriptor) -> &'static str {
    match region.strategy {
        Strategy::Direct => "Direct",
        Strategy::Composite => "Composite",
    }
}

fn describe(region: &RegionDescriptor, printer: &Printer) -> String {
    let source = match region.strategy {
        Strategy::Direct => region.id.clone().unwrap_or_default(),
        Strategy::Composite => region.composite_of.join(" + "),
    };

    let mut line = format!("{} {}", region.key, printer.dim(&format!("<- {}", source)));
    if !region.description.is_empty() {
        line.push_str(&format!(" {}", printer.dim(&format!("({})", region.description))));
    }
    line
}
