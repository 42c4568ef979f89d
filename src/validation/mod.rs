//! Slice validation.
//!
//! Compares every slice on disk against the frame recorded in the
//! baseline. All regions are checked; failures are collected, never
//! raised. Used by `gabarito validate`.

mod failure;

use std::path::Path;

pub use failure::{Dimensions, FailureKind, ValidationFailure, ValidationReport};

use crate::baseline::Baseline;
use crate::config::slice_file_name;
use crate::error::{LayoutError, Result};
use crate::slice::PixelRect;
use crate::token::CanonicalFrame;

/// Expected pixel size of a frame's slice, using the slicer's rounding.
pub fn expected_dimensions(frame: &CanonicalFrame) -> Dimensions {
    let rect = PixelRect::from_bounds(&frame.to_raw());
    Dimensions {
        width: rect.width,
        height: rect.height,
    }
}

/// Check one region's slice in `slices_dir`.
pub fn check_slice(key: &str, frame: &CanonicalFrame, slices_dir: &Path) -> Option<ValidationFailure> {
    let file = slice_file_name(key);
    let path = slices_dir.join(&file);
    let expected = expected_dimensions(frame);

    if !path.is_file() {
        return Some(ValidationFailure::missing(key, &file, expected));
    }

    match image::image_dimensions(&path) {
        Ok((width, height)) => {
            let actual = Dimensions { width, height };
            (actual != expected).then(|| ValidationFailure::mismatch(key, &file, expected, actual))
        }
        Err(e) => Some(ValidationFailure::unreadable(key, &file, expected, e.to_string())),
    }
}

/// Validate every baseline region that has a frame.
///
/// Fails only when `slices_dir` does not exist; everything else ends up in
/// the report.
pub fn validate_slices(baseline: &Baseline, slices_dir: &Path) -> Result<ValidationReport> {
    if !slices_dir.is_dir() {
        return Err(LayoutError::SlicesNotFound {
            path: slices_dir.to_path_buf(),
        });
    }

    let mut report = ValidationReport::new();
    for entry in baseline.entries() {
        let Some(frame) = &entry.frame else {
            continue;
        };
        report.checked += 1;
        if let Some(failure) = check_slice(&entry.key, frame, slices_dir) {
            report.push(failure);
        }
    }
    Ok(report)
}
