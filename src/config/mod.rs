//! Project configuration (gabarito.yaml).
//!
//! The manifest is optional: every field has a default matching the
//! conventional project layout, so a bare project with a `public/`
//! directory works out of the box.

mod regions;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

pub use regions::{check_regions, default_regions, slice_file_name, RegionDescriptor, Strategy};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "gabarito.yaml";

/// Project manifest loaded from gabarito.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory holding the vector sources.
    pub public_dir: PathBuf,

    /// Directory receiving baselines and generated modules.
    pub config_dir: PathBuf,

    /// Root directory for slices; each scene gets a subdirectory.
    pub assets_dir: PathBuf,

    /// Source used when `gabarito-<scene>.svg` does not exist.
    pub default_source: String,

    /// Scene whose baseline doubles as the default baseline.
    pub canonical_scene: String,

    /// Rasterization density in DPI.
    pub density: f32,

    /// Declared regions, in resolution order.
    pub regions: Vec<RegionDescriptor>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            config_dir: PathBuf::from("src/config"),
            assets_dir: PathBuf::from("public/assets/layout"),
            default_source: "figma-gabarito.svg".to_string(),
            canonical_scene: "game".to_string(),
            density: 300.0,
            regions: default_regions(),
        }
    }
}

impl Manifest {
    /// Load manifest from a gabarito.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LayoutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string and check it.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| LayoutError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })?;
        manifest.check()?;
        Ok(manifest)
    }

    /// Validate settings that serde cannot express.
    pub fn check(&self) -> Result<()> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(LayoutError::Config {
                message: format!("density must be a positive number, got {}", self.density),
                help: Some("300 matches the reference export".to_string()),
            });
        }
        check_regions(&self.regions)
    }

    /// Render the manifest as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| LayoutError::Config {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Supersampling factor relative to the 72 DPI of the source units.
    pub fn supersample(&self) -> f32 {
        self.density / 72.0
    }
}

/// A project root together with its manifest.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: Manifest,
    /// Whether a gabarito.yaml was found.
    pub has_manifest: bool,
}

impl Project {
    /// Open the project at `root`, loading gabarito.yaml when present.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILENAME);
        let (manifest, has_manifest) = if manifest_path.exists() {
            (Manifest::load(&manifest_path)?, true)
        } else {
            (Manifest::default(), false)
        };

        Ok(Self {
            root,
            manifest,
            has_manifest,
        })
    }

    /// Use an in-memory manifest (no file lookup).
    pub fn with_manifest(root: impl AsRef<Path>, manifest: Manifest) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            manifest,
            has_manifest: false,
        }
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.manifest.public_dir)
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(&self.manifest.config_dir)
    }

    /// Directory holding the slices of `scene`.
    pub fn slices_dir(&self, scene: &str) -> PathBuf {
        self.root.join(&self.manifest.assets_dir).join(scene)
    }

    /// `layoutBaseline-<scene>.json`.
    pub fn scene_baseline_path(&self, scene: &str) -> PathBuf {
        self.config_dir().join(format!("layoutBaseline-{}.json", scene))
    }

    /// `layoutBaseline.json`.
    pub fn default_baseline_path(&self) -> PathBuf {
        self.config_dir().join("layoutBaseline.json")
    }

    /// Baseline candidates for `scene`, in lookup order.
    pub fn baseline_candidates(&self, scene: &str) -> Vec<PathBuf> {
        vec![self.scene_baseline_path(scene), self.default_baseline_path()]
    }

    /// Generated module path: `generatedLayout.ts` for the canonical scene,
    /// `generatedLayout-<scene>.ts` otherwise.
    pub fn module_path(&self, scene: &str) -> PathBuf {
        if self.is_canonical(scene) {
            self.config_dir().join("generatedLayout.ts")
        } else {
            self.config_dir().join(format!("generatedLayout-{}.ts", scene))
        }
    }

    pub fn is_canonical(&self, scene: &str) -> bool {
        scene == self.manifest.canonical_scene
    }
}
