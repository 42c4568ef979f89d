//! Vector design sources.
//!
//! Locates the design file for a scene and exposes the lookups the region
//! extractors need through the [`VectorSourceIndex`] trait. The only
//! implementation, [`MarkupIndex`], walks a `roxmltree` document.
//!
//! # Example
//!
//! ```ignore
//! use gabarito::source::{locate_source, MarkupIndex, VectorSourceIndex};
//!
//! let location = locate_source(Path::new("public"), "game", "figma-gabarito.svg")?;
//! let text = location.read()?;
//! let index = MarkupIndex::parse(&text)?;
//! let mask = index.mask_tag("path-87-outside-1_2238_4227");
//! ```

mod markup;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LayoutError, Result};

pub use markup::Tag;

/// Element names that can carry region geometry.
const DRAWABLES: [&str; 4] = ["path", "rect", "ellipse", "circle"];

/// Attributes through which a drawable can reference a mask or clip id.
const REFERENCE_ATTRIBUTES: [&str; 2] = ["mask", "clip-path"];

/// The lookups region extraction performs against a vector source.
pub trait VectorSourceIndex {
    /// The first `<mask>` whose `id` matches, ignoring ASCII case.
    fn mask_tag(&self, id: &str) -> Option<Tag<'_>>;

    /// The first drawable (`path`, `rect`, `ellipse`, `circle`) that uses
    /// `id` as its mask or clip target.
    fn masked_element_tag(&self, id: &str) -> Option<Tag<'_>>;
}

/// [`VectorSourceIndex`] over a parsed XML document.
pub struct MarkupIndex<'input> {
    document: roxmltree::Document<'input>,
}

impl<'input> MarkupIndex<'input> {
    /// Parse the source text. A DOCTYPE is allowed, as design tools still
    /// emit one.
    pub fn parse(text: &'input str) -> Result<Self> {
        let mut options = roxmltree::ParsingOptions::default();
        options.allow_dtd = true;

        let document =
            roxmltree::Document::parse_with_options(text, options).map_err(|e| {
                LayoutError::Parse {
                    message: format!("Vector source is not well-formed XML: {}", e),
                    help: Some("Re-export the design file".to_string()),
                }
            })?;
        Ok(Self { document })
    }

    /// Every element in document order.
    pub fn elements(&self) -> impl Iterator<Item = Tag<'_>> + '_ {
        self.document
            .descendants()
            .filter(|node| node.is_element())
            .map(Tag::from_node)
    }
}

impl VectorSourceIndex for MarkupIndex<'_> {
    fn mask_tag(&self, id: &str) -> Option<Tag<'_>> {
        self.elements().find(|tag| tag.is("mask") && tag.has_id(id))
    }

    fn masked_element_tag(&self, id: &str) -> Option<Tag<'_>> {
        self.elements().find(|tag| {
            DRAWABLES.iter().any(|name| tag.is(name))
                && REFERENCE_ATTRIBUTES
                    .iter()
                    .any(|attribute| tag.references(attribute, id))
        })
    }
}

/// Where a scene's vector source was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: PathBuf,
    /// True when the scene-specific file was missing and the default was used.
    pub is_fallback: bool,
}

impl SourceLocation {
    /// Read the source text.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| LayoutError::Io {
            path: self.path.clone(),
            message: format!("Failed to read vector source: {}", e),
        })
    }

    /// Read the raw source bytes (for rasterization).
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| LayoutError::Io {
            path: self.path.clone(),
            message: format!("Failed to read vector source: {}", e),
        })
    }
}

/// File name of the scene-specific source: `gabarito-<scene>.svg`.
pub fn scene_source_name(scene: &str) -> String {
    format!("gabarito-{}.svg", scene)
}

/// Find the vector source for `scene`.
///
/// Prefers `<public_dir>/gabarito-<scene>.svg`, falls back to
/// `<public_dir>/<default_source>`, and fails naming both paths when
/// neither exists.
pub fn locate_source(public_dir: &Path, scene: &str, default_source: &str) -> Result<SourceLocation> {
    let preferred = public_dir.join(scene_source_name(scene));
    if preferred.is_file() {
        return Ok(SourceLocation {
            path: preferred,
            is_fallback: false,
        });
    }

    let fallback = public_dir.join(default_source);
    if fallback.is_file() {
        return Ok(SourceLocation {
            path: fallback,
            is_fallback: true,
        });
    }

    Err(LayoutError::SourceNotFound {
        attempted: vec![preferred, fallback],
    })
}
