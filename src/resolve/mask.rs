use crate::geometry::RawBounds;
use crate::source::VectorSourceIndex;

/// Read a region's bounds straight from its `<mask>` element.
///
/// Returns `None` when the mask is missing or lacks any of `x`, `y`,
/// `width`, `height`; the caller then tries the masked element.
pub fn mask_bounds<I: VectorSourceIndex + ?Sized>(index: &I, id: &str) -> Option<RawBounds> {
    let tag = index.mask_tag(id)?;
    Some(RawBounds::new(
        tag.number("x")?,
        tag.number("y")?,
        tag.number("width")?,
        tag.number("height")?,
    ))
}
