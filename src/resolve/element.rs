use crate::geometry::{path_bounds, RawBounds};
use crate::source::{Tag, VectorSourceIndex};

/// Bounds of the drawable that uses `id` as its mask or clip target.
pub fn masked_element_bounds<I: VectorSourceIndex + ?Sized>(
    index: &I,
    id: &str,
) -> Option<RawBounds> {
    let tag = index.masked_element_tag(id)?;
    element_bounds(&tag)
}

/// Bounding box of a single drawable element.
///
/// Path data wins over everything else. Without it, a complete
/// `x`/`y`/`width`/`height` set is used as is, then `cx`/`cy` with `r`
/// (circle) or `rx`/`ry` (ellipse). Anything else is `None`.
pub fn element_bounds(tag: &Tag<'_>) -> Option<RawBounds> {
    if let Some(d) = tag.attr("d") {
        return path_bounds(d);
    }

    if let (Some(x), Some(y), Some(width), Some(height)) = (
        tag.number("x"),
        tag.number("y"),
        tag.number("width"),
        tag.number("height"),
    ) {
        return Some(RawBounds::new(x, y, width, height));
    }

    let (cx, cy) = (tag.number("cx")?, tag.number("cy")?);
    if let Some(r) = tag.number("r") {
        return Some(RawBounds::new(cx - r, cy - r, r * 2.0, r * 2.0));
    }
    match (tag.number("rx"), tag.number("ry")) {
        (Some(rx), Some(ry)) => Some(RawBounds::new(cx - rx, cy - ry, rx * 2.0, ry * 2.0)),
        _ => None,
    }
}
