//! Baselines: the persisted token set of one scene.
//!
//! A baseline is written as two artifacts with the same numbers: a flat
//! JSON map (`layoutBaseline-<scene>.json`) and a generated TypeScript
//! constants module. Loading only ever reads the JSON.

mod module;
mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{LayoutError, Result};
use crate::token::{CanonicalCenter, CanonicalFrame, LayoutToken};

pub use module::render_module;
pub use writer::{BaselineWriter, WrittenBaseline};

/// One region in a baseline file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineEntry {
    #[serde(skip)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<CanonicalFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<CanonicalCenter>,
}

impl From<&LayoutToken> for BaselineEntry {
    fn from(token: &LayoutToken) -> Self {
        Self {
            key: token.key.clone(),
            frame: Some(token.frame),
            center: Some(token.center),
        }
    }
}

/// Ordered mapping of region key to frame and center.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    entries: Vec<BaselineEntry>,
}

/// A baseline together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedBaseline {
    pub baseline: Baseline,
    pub path: PathBuf,
}

/// A baseline candidate that exists but could not be used.
#[derive(Debug, Clone)]
pub struct SkippedCandidate {
    pub path: PathBuf,
    pub reason: String,
}

impl Baseline {
    pub fn from_tokens(tokens: &[LayoutToken]) -> Self {
        Self {
            entries: tokens.iter().map(BaselineEntry::from).collect(),
        }
    }

    pub fn entries(&self) -> &[BaselineEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&BaselineEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// The frame recorded for `key`, if any.
    pub fn frame(&self, key: &str) -> Option<CanonicalFrame> {
        self.get(key).and_then(|entry| entry.frame)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse baseline JSON, keeping the key order of the file.
    pub fn parse(content: &str) -> Result<Self> {
        let map: Map<String, Value> = serde_json::from_str(content).map_err(|e| LayoutError::Parse {
            message: format!("Invalid baseline: {}", e),
            help: None,
        })?;

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let mut entry: BaselineEntry =
                serde_json::from_value(value).map_err(|e| LayoutError::Parse {
                    message: format!("Invalid baseline entry {}: {}", key, e),
                    help: None,
                })?;
            entry.key = key;
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    /// Read and parse a baseline file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LayoutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read baseline: {}", e),
        })?;
        Self::parse(&content)
    }

    /// Load the first usable baseline among `candidates`.
    ///
    /// Missing files are passed over silently. Files that exist but fail to
    /// read or parse are reported in the returned skip list and the next
    /// candidate is tried. Fails with `BaselineNotFound` when none is usable.
    pub fn load_first(
        scene: &str,
        candidates: &[PathBuf],
    ) -> Result<(LoadedBaseline, Vec<SkippedCandidate>)> {
        let mut skipped = Vec::new();
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::load(path) {
                Ok(baseline) => {
                    return Ok((
                        LoadedBaseline {
                            baseline,
                            path: path.clone(),
                        },
                        skipped,
                    ))
                }
                Err(e) => skipped.push(SkippedCandidate {
                    path: path.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        Err(LayoutError::BaselineNotFound {
            scene: scene.to_string(),
            attempted: candidates.to_vec(),
        })
    }

    /// Serialize as pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut map = Map::new();
        for entry in &self.entries {
            let value = serde_json::to_value(entry).map_err(|e| LayoutError::Parse {
                message: format!("Failed to serialize baseline entry {}: {}", entry.key, e),
                help: None,
            })?;
            map.insert(entry.key.clone(), value);
        }

        let mut json = serde_json::to_string_pretty(&map).map_err(|e| LayoutError::Parse {
            message: format!("Failed to serialize baseline: {}", e),
            help: None,
        })?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RawBounds;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample() -> Baseline {
        Baseline::from_tokens(&[
            LayoutToken::new("QUESTION_CARD", "Card", &RawBounds::new(339.5, 196.0, 1243.0, 100.0)),
            LayoutToken::new("HEADER", "Header", &RawBounds::new(0.0, 0.0, 1920.0, 120.2504)),
        ])
    }

    #[test]
    fn test_to_json_shape() {
        let expected = r#"{
  "QUESTION_CARD": {
    "frame": {
      "x": 339.5,
      "y": 196,
      "width": 1243,
      "height": 100,
      "right": 1582.5,
      "bottom": 296
    },
    "center": {
      "x": 961,
      "y": 246
    }
  },
  "HEADER": {
    "frame": {
      "x": 0,
      "y": 0,
      "width": 1920,
      "height": 120.25,
      "right": 1920,
      "bottom": 120.25
    },
    "center": {
      "x": 960,
      "y": 60.125
    }
  }
}
"#;
        assert_eq!(sample().to_json().unwrap(), expected);
    }

    #[test]
    fn test_parse_round_trip_is_byte_identical() {
        let json = sample().to_json().unwrap();
        let reparsed = Baseline::parse(&json).unwrap();
        assert_eq!(reparsed.to_json().unwrap(), json);
        assert_eq!(reparsed.entries()[0].key, "QUESTION_CARD");
    }

    #[test]
    fn test_parse_preserves_file_order() {
        let json = r#"{"Z":{"frame":{"x":0,"y":0,"width":1,"height":1}},"A":{}}"#;
        let baseline = Baseline::parse(json).unwrap();
        let keys: Vec<&str> = baseline.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Z", "A"]);
        assert!(baseline.frame("A").is_none());
        assert_eq!(baseline.frame("Z").unwrap().right.value(), 1.0);
    }

    #[test]
    fn test_load_first_prefers_scene_file() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("layoutBaseline-menu.json");
        let default = dir.path().join("layoutBaseline.json");
        fs::write(&scene, sample().to_json().unwrap()).unwrap();
        fs::write(&default, "{}").unwrap();

        let (loaded, skipped) = Baseline::load_first("menu", &[scene.clone(), default]).unwrap();
        assert_eq!(loaded.path, scene);
        assert_eq!(loaded.baseline.len(), 2);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_load_first_skips_unparsable_candidate() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("layoutBaseline-menu.json");
        let default = dir.path().join("layoutBaseline.json");
        fs::write(&scene, "{ not json").unwrap();
        fs::write(&default, sample().to_json().unwrap()).unwrap();

        let (loaded, skipped) = Baseline::load_first("menu", &[scene.clone(), default.clone()]).unwrap();
        assert_eq!(loaded.path, default);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path, scene);
    }

    #[test]
    fn test_load_first_without_any_file() {
        let dir = tempdir().unwrap();
        let candidates = vec![
            dir.path().join("layoutBaseline-menu.json"),
            dir.path().join("layoutBaseline.json"),
        ];
        let err = Baseline::load_first("menu", &candidates).unwrap_err();
        match err {
            LayoutError::BaselineNotFound { scene, attempted } => {
                assert_eq!(scene, "menu");
                assert_eq!(attempted, candidates);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
