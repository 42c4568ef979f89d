//! gabarito - layout token extraction and slice validation
//!
//! Reads a vector design reference, resolves named rectangular regions from
//! it, publishes them as canonical layout tokens, rasterizes each region
//! into a PNG slice and checks that the slices still match the published
//! coordinates.

pub mod baseline;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod output;
pub mod resolve;
pub mod slice;
pub mod source;
pub mod token;
pub mod validation;

pub use baseline::{Baseline, BaselineEntry, BaselineWriter, WrittenBaseline};
pub use config::{Manifest, Project, RegionDescriptor, Strategy, MANIFEST_FILENAME};
pub use error::{LayoutError, Result};
pub use geometry::{path_bounds, RawBounds};
pub use resolve::{BoundsSource, RegionResolver, ResolutionContext, ResolvedRegion};
pub use slice::{PixelRect, Rasterizer, SliceGenerator, SliceOutcome, SliceReport};
pub use source::{locate_source, MarkupIndex, SourceLocation, VectorSourceIndex};
pub use token::{build_tokens, CanonicalCenter, CanonicalFrame, Coord, LayoutToken};
pub use validation::{validate_slices, FailureKind, ValidationFailure, ValidationReport};
