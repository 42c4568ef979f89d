//! Slice generation: one PNG per region, cut at its published coordinates.
//!
//! Slicing can run long after the last sync, so a region's persisted
//! baseline frame always wins over bounds resolved from the current
//! source. Resolution still happens for every region: it decides which
//! regions are sliceable, and composites fall back to their dependencies
//! when the baseline has no entry for them.

mod raster;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::baseline::Baseline;
use crate::config::{RegionDescriptor, Strategy};
use crate::error::{LayoutError, Result};
use crate::geometry::RawBounds;
use crate::resolve::{RegionResolver, ResolutionContext};
use crate::source::VectorSourceIndex;

pub use raster::{write_png, Rasterizer};

/// Integer pixel rectangle of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Round the origin and size; width and height are at least 1.
    pub fn from_bounds(bounds: &RawBounds) -> Self {
        Self {
            left: bounds.x.round() as i64,
            top: bounds.y.round() as i64,
            width: bounds.width.round().max(1.0) as u32,
            height: bounds.height.round().max(1.0) as u32,
        }
    }
}

/// Where the bounds of a planned slice came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameOrigin {
    /// The region's own baseline frame.
    Baseline,
    /// Resolved from the current source (no baseline frame for the key).
    Source,
}

/// A region ready to be rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePlan {
    pub key: String,
    pub file_name: String,
    pub bounds: RawBounds,
    pub rect: PixelRect,
    pub origin: FrameOrigin,
}

/// Decide the slice rectangle of every region, in declaration order.
///
/// Returns one entry per region: `Ok` with the plan, or `Err` with the key
/// when nothing (source, dependencies or baseline) gives it bounds.
pub fn plan_slices<I: VectorSourceIndex + ?Sized>(
    regions: &[RegionDescriptor],
    resolver: &RegionResolver<'_, I>,
    baseline: &Baseline,
) -> Vec<std::result::Result<SlicePlan, String>> {
    let mut chosen = ResolutionContext::new();
    regions
        .iter()
        .map(|region| {
            let fresh = match region.strategy {
                Strategy::Direct => region
                    .id
                    .as_deref()
                    .and_then(|id| resolver.resolve_direct(id))
                    .map(|(bounds, _)| bounds),
                Strategy::Composite => {
                    let parts: Vec<RawBounds> = region
                        .composite_of
                        .iter()
                        .filter_map(|dep| {
                            chosen
                                .get(dep)
                                .or_else(|| baseline.frame(dep).map(|frame| frame.to_raw()))
                        })
                        .collect();
                    RawBounds::union(&parts)
                }
            };

            let own = baseline.frame(&region.key).map(|frame| frame.to_raw());
            let (bounds, origin) = match (own, fresh) {
                (Some(frame), _) => (frame, FrameOrigin::Baseline),
                (None, Some(bounds)) => (bounds, FrameOrigin::Source),
                (None, None) => return Err(region.key.clone()),
            };

            chosen.insert(&region.key, bounds);
            Ok(SlicePlan {
                key: region.key.clone(),
                file_name: region.slice_file_name(),
                bounds,
                rect: PixelRect::from_bounds(&bounds),
                origin,
            })
        })
        .collect()
}

/// Outcome of one region in a slice run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SliceOutcome {
    Written {
        key: String,
        file: PathBuf,
        rect: PixelRect,
    },
    Skipped {
        key: String,
    },
    Failed {
        key: String,
        file: PathBuf,
        rect: PixelRect,
        error: String,
    },
}

/// Per-region results of a slice run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SliceReport {
    pub scene: String,
    pub output_dir: PathBuf,
    pub regions: Vec<SliceOutcome>,
}

impl SliceReport {
    pub fn new(scene: &str, output_dir: &Path) -> Self {
        Self {
            scene: scene.to_string(),
            output_dir: output_dir.to_path_buf(),
            regions: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: SliceOutcome) {
        self.regions.push(outcome);
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, SliceOutcome::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, SliceOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SliceOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&SliceOutcome) -> bool) -> usize {
        self.regions.iter().filter(|o| predicate(o)).count()
    }
}

/// Writes planned slices into one output directory.
pub struct SliceGenerator {
    rasterizer: Rasterizer,
    output_dir: PathBuf,
}

impl SliceGenerator {
    /// Create the output directory and wrap a rendered source.
    pub fn new(rasterizer: Rasterizer, output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| LayoutError::Io {
            path: output_dir.to_path_buf(),
            message: format!("Failed to create slice directory: {}", e),
        })?;
        Ok(Self {
            rasterizer,
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Rasterize one planned region. Failures are returned, never raised,
    /// so the caller can carry on with the next region.
    pub fn generate(&self, plan: &SlicePlan) -> SliceOutcome {
        let file = self.output_dir.join(&plan.file_name);
        let written = self
            .rasterizer
            .crop(&plan.rect)
            .and_then(|image| write_png(&image, &file));

        match written {
            Ok(()) => SliceOutcome::Written {
                key: plan.key.clone(),
                file,
                rect: plan.rect,
            },
            Err(e) => SliceOutcome::Failed {
                key: plan.key.clone(),
                file,
                rect: plan.rect,
                error: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MarkupIndex;
    use crate::token::LayoutToken;
    use image::RgbaImage;
    use tempfile::tempdir;

    const SOURCE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <mask id="a" x="0" y="0" width="40" height="20"/>
  <mask id="b" x="50" y="50" width="40" height="20"/>
</svg>"#;

    fn regions() -> Vec<RegionDescriptor> {
        vec![
            RegionDescriptor::direct("A", "a", ""),
            RegionDescriptor::direct("B", "b", ""),
            RegionDescriptor::composite("AB", &["A", "B"], ""),
            RegionDescriptor::direct("GONE", "gone", ""),
        ]
    }

    #[test]
    fn test_pixel_rect_rounding() {
        let rect = PixelRect::from_bounds(&RawBounds::new(10.4, 10.5, 99.6, 0.2));
        assert_eq!(
            rect,
            PixelRect {
                left: 10,
                top: 11,
                width: 100,
                height: 1,
            }
        );
    }

    #[test]
    fn test_zero_size_is_one_pixel() {
        let rect = PixelRect::from_bounds(&RawBounds::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!((rect.width, rect.height), (1, 1));
    }

    #[test]
    fn test_plan_prefers_baseline_frame() {
        let index = MarkupIndex::parse(SOURCE).unwrap();
        let resolver = RegionResolver::new(&index);
        let baseline = Baseline::from_tokens(&[LayoutToken::new(
            "A",
            "",
            &RawBounds::new(1.0, 1.0, 30.0, 10.0),
        )]);

        let plans = plan_slices(&regions(), &resolver, &baseline);
        let a = plans[0].as_ref().unwrap();
        assert_eq!(a.origin, FrameOrigin::Baseline);
        assert_eq!(a.bounds, RawBounds::new(1.0, 1.0, 30.0, 10.0));

        let b = plans[1].as_ref().unwrap();
        assert_eq!(b.origin, FrameOrigin::Source);
        assert_eq!(b.file_name, "b.png");

        // The composite uses the chosen bounds of A, not the source mask.
        let ab = plans[2].as_ref().unwrap();
        assert_eq!(ab.bounds, RawBounds::new(1.0, 1.0, 89.0, 69.0));

        assert_eq!(plans[3], Err("GONE".to_string()));
    }

    #[test]
    fn test_plan_composite_falls_back_to_baseline_dependencies() {
        let index = MarkupIndex::parse("<svg/>").unwrap();
        let resolver = RegionResolver::new(&index);
        let baseline = Baseline::from_tokens(&[
            LayoutToken::new("A", "", &RawBounds::new(0.0, 0.0, 10.0, 10.0)),
            LayoutToken::new("B", "", &RawBounds::new(20.0, 20.0, 10.0, 10.0)),
        ]);
        let regions = vec![RegionDescriptor::composite("AB", &["A", "B"], "")];

        let plans = plan_slices(&regions, &resolver, &baseline);
        let ab = plans[0].as_ref().unwrap();
        assert_eq!(ab.origin, FrameOrigin::Source);
        assert_eq!(ab.bounds, RawBounds::new(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_region_known_only_to_baseline() {
        let index = MarkupIndex::parse("<svg/>").unwrap();
        let resolver = RegionResolver::new(&index);
        let baseline = Baseline::from_tokens(&[LayoutToken::new(
            "A",
            "",
            &RawBounds::new(5.0, 5.0, 10.0, 10.0),
        )]);
        let regions = vec![RegionDescriptor::direct("A", "a", "")];

        let plans = plan_slices(&regions, &resolver, &baseline);
        assert_eq!(plans[0].as_ref().unwrap().origin, FrameOrigin::Baseline);
    }

    #[test]
    fn test_generate_continues_after_failure() {
        let dir = tempdir().unwrap();
        let rasterizer = Rasterizer::from_canvas(RgbaImage::new(100, 100), 1.0);
        let generator = SliceGenerator::new(rasterizer, &dir.path().join("game")).unwrap();

        let plan = |key: &str, bounds: RawBounds| SlicePlan {
            key: key.to_string(),
            file_name: format!("{}.png", key.to_lowercase()),
            bounds,
            rect: PixelRect::from_bounds(&bounds),
            origin: FrameOrigin::Source,
        };

        let mut report = SliceReport::new("game", generator.output_dir());
        for p in [
            plan("OFF", RawBounds::new(500.0, 500.0, 10.0, 10.0)),
            plan("HUGE", RawBounds::new(0.0, 0.0, 1e9, 1e9)),
            plan("ON", RawBounds::new(10.0, 10.0, 20.0, 5.0)),
        ] {
            report.push(generator.generate(&p));
        }

        assert_eq!(report.failed(), 2);
        assert_eq!(report.written(), 1);
        let written = image::image_dimensions(dir.path().join("game/on.png")).unwrap();
        assert_eq!(written, (20, 5));
    }

    #[test]
    fn test_report_json() {
        let mut report = SliceReport::new("game", Path::new("out"));
        report.push(SliceOutcome::Skipped {
            key: "A".to_string(),
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["regions"][0]["status"], "skipped");
        assert_eq!(json["regions"][0]["key"], "A");
    }
}
