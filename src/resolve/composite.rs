use crate::error::{LayoutError, Result};
use crate::geometry::RawBounds;

use super::ResolutionContext;

/// Union of already-resolved dependency bounds.
///
/// Every dependency must be present in `context`; the first missing one
/// fails the composite `key`.
pub fn composite_union(key: &str, dependencies: &[String], context: &ResolutionContext) -> Result<RawBounds> {
    let mut parts = Vec::with_capacity(dependencies.len());
    for dependency in dependencies {
        let bounds = context.get(dependency).ok_or_else(|| LayoutError::RegionUnresolved {
            key: key.to_string(),
            help: Some(format!(
                "Dependency {} is not resolved; declare it before {}",
                dependency, key
            )),
        })?;
        parts.push(bounds);
    }

    RawBounds::union(&parts).ok_or_else(|| LayoutError::RegionUnresolved {
        key: key.to_string(),
        help: Some("A composite region needs at least one dependency".to_string()),
    })
}
