//! Region resolution.
//!
//! Direct regions are read from the source: the `<mask>` element first,
//! then the drawable it masks. Composite regions are the union of regions
//! declared before them. Resolved bounds accumulate in an explicit
//! [`ResolutionContext`] owned by the caller, so every run is isolated.

mod composite;
mod element;
mod mask;

use std::collections::HashMap;

use crate::config::{RegionDescriptor, Strategy};
use crate::error::{LayoutError, Result};
use crate::geometry::RawBounds;
use crate::source::VectorSourceIndex;

pub use composite::composite_union;
pub use element::{element_bounds, masked_element_bounds};
pub use mask::mask_bounds;

/// Which extractor produced a region's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsSource {
    Mask,
    Path,
    Composite,
}

/// A region with its freshly resolved bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRegion {
    pub key: String,
    pub description: String,
    pub bounds: RawBounds,
    pub source: BoundsSource,
}

/// Bounds resolved so far in one run, keyed by region key.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    resolved: HashMap<String, RawBounds>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<RawBounds> {
        self.resolved.get(key).copied()
    }

    pub fn insert(&mut self, key: &str, bounds: RawBounds) {
        self.resolved.insert(key.to_string(), bounds);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resolved.contains_key(key)
    }
}

/// Resolves declared regions against one vector source.
pub struct RegionResolver<'a, I: VectorSourceIndex + ?Sized> {
    index: &'a I,
}

impl<'a, I: VectorSourceIndex + ?Sized> RegionResolver<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self { index }
    }

    /// Extract a direct region from the source: mask first, then the
    /// element it masks.
    pub fn resolve_direct(&self, id: &str) -> Option<(RawBounds, BoundsSource)> {
        if let Some(bounds) = mask_bounds(self.index, id) {
            return Some((bounds, BoundsSource::Mask));
        }
        masked_element_bounds(self.index, id).map(|bounds| (bounds, BoundsSource::Path))
    }

    /// Resolve one region and record it in `context`.
    pub fn resolve_region(
        &self,
        region: &RegionDescriptor,
        context: &mut ResolutionContext,
    ) -> Result<ResolvedRegion> {
        let (bounds, source) = match region.strategy {
            Strategy::Direct => {
                let id = region.id.as_deref().unwrap_or_default();
                self.resolve_direct(id)
                    .ok_or_else(|| LayoutError::RegionUnresolved {
                        key: region.key.clone(),
                        help: Some(format!(
                            "No mask or masked element with id '{}' has usable geometry",
                            id
                        )),
                    })?
            }
            Strategy::Composite => (
                composite_union(&region.key, &region.composite_of, context)?,
                BoundsSource::Composite,
            ),
        };

        context.insert(&region.key, bounds);
        Ok(ResolvedRegion {
            key: region.key.clone(),
            description: region.description.clone(),
            bounds,
            source,
        })
    }

    /// Resolve every region in declaration order.
    ///
    /// Stops at the first region that cannot be resolved: a partial set is
    /// never returned.
    pub fn resolve_all(&self, regions: &[RegionDescriptor]) -> Result<Vec<ResolvedRegion>> {
        let mut context = ResolutionContext::new();
        regions
            .iter()
            .map(|region| self.resolve_region(region, &mut context))
            .collect()
    }
}
