//! Region descriptors: the declared list of regions a run must resolve.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// How a region's bounds are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Extracted from the source by mask/clip identifier.
    Direct,
    /// Union of other, earlier-declared regions.
    Composite,
}

/// A named region of the design canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    pub key: String,
    #[serde(default)]
    pub description: String,
    pub strategy: Strategy,
    /// Mask or clip identifier, for direct regions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Dependency keys, for composite regions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_of: Vec<String>,
}

impl RegionDescriptor {
    pub fn direct(key: &str, id: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
            strategy: Strategy::Direct,
            id: Some(id.to_string()),
            composite_of: Vec::new(),
        }
    }

    pub fn composite(key: &str, of: &[&str], description: &str) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
            strategy: Strategy::Composite,
            id: None,
            composite_of: of.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// File name of this region's slice: lower-cased, `_` → `-`, `.png`.
    pub fn slice_file_name(&self) -> String {
        slice_file_name(&self.key)
    }
}

/// Deterministic slice file name for a region key.
pub fn slice_file_name(key: &str) -> String {
    format!("{}.png", key.to_lowercase().replace('_', "-"))
}

/// The regions of the game scene, in declaration order.
///
/// Composite regions come after every region they are built from.
pub fn default_regions() -> Vec<RegionDescriptor> {
    vec![
        RegionDescriptor::direct("HEADER", "path-158-outside-15_2238_4227", "Full header"),
        RegionDescriptor::direct(
            "QUESTION_CARD",
            "path-87-outside-1_2238_4227",
            "Main question card",
        ),
        RegionDescriptor::direct(
            "ALTERNATIVE_TOP_STRIP",
            "path-102-outside-5_2238_4227",
            "Top strip of the alternatives",
        ),
        RegionDescriptor::direct(
            "ALTERNATIVE_LEFT_COL",
            "path-93-outside-3_2238_4227",
            "Left column of the lower alternatives",
        ),
        RegionDescriptor::direct(
            "ALTERNATIVE_RIGHT_COL",
            "path-96-outside-4_2238_4227",
            "Right column of the lower alternatives",
        ),
        RegionDescriptor::direct(
            "FOOTER_PANEL",
            "path-90-outside-2_2238_4227",
            "Lower side panel (main button)",
        ),
        RegionDescriptor::composite(
            "ALTERNATIVES_GRID",
            &[
                "ALTERNATIVE_TOP_STRIP",
                "ALTERNATIVE_LEFT_COL",
                "ALTERNATIVE_RIGHT_COL",
                "FOOTER_PANEL",
            ],
            "Full alternatives area",
        ),
        RegionDescriptor::direct(
            "FOOTER_STRIP",
            "path-160-inside-16_2238_4227",
            "Full footer strip (HUD footer)",
        ),
        RegionDescriptor::direct(
            "FOOTER_POWERUP_LEFT",
            "path-162-outside-17_2238_4227",
            "Left power-up button",
        ),
        RegionDescriptor::direct(
            "FOOTER_POWERUP_CENTER",
            "path-170-outside-19_2238_4227",
            "Center power-up button",
        ),
        RegionDescriptor::direct(
            "FOOTER_POWERUP_RIGHT",
            "path-178-outside-21_2238_4227",
            "Right power-up button",
        ),
    ]
}

/// Check a region list before any resolution happens.
///
/// Keys must be identifiers (`[A-Za-z_][A-Za-z0-9_]*`) with distinct slice
/// file names. Direct regions need an id. Composite regions need at least
/// one dependency and may only depend on regions declared earlier.
pub fn check_regions(regions: &[RegionDescriptor]) -> Result<()> {
    if regions.is_empty() {
        return Err(config_error(
            "no regions declared",
            "Declare at least one region under `regions:` or remove the key to use the defaults",
        ));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut files: HashMap<String, &str> = HashMap::new();
    for region in regions {
        if region.key.trim().is_empty() {
            return Err(config_error("region with an empty key", "Give every region a key"));
        }
        if !is_identifier(&region.key) {
            return Err(config_error(
                &format!("region key {:?} is not an identifier", region.key),
                "Use letters, digits and `_` only, not starting with a digit",
            ));
        }

        match region.strategy {
            Strategy::Direct => {
                if region.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
                    return Err(config_error(
                        &format!("direct region {} has no id", region.key),
                        "Set `id:` to the mask identifier in the vector source",
                    ));
                }
            }
            Strategy::Composite => {
                if region.composite_of.is_empty() {
                    return Err(config_error(
                        &format!("composite region {} has no dependencies", region.key),
                        "List the regions it is built from under `composite_of:`",
                    ));
                }
                for dependency in &region.composite_of {
                    if !seen.contains(dependency.as_str()) {
                        return Err(config_error(
                            &format!(
                                "composite region {} depends on {}, which is not declared before it",
                                region.key, dependency
                            ),
                            "Declare dependencies before the composite regions that use them",
                        ));
                    }
                }
            }
        }

        if !seen.insert(region.key.as_str()) {
            return Err(config_error(
                &format!("region {} is declared more than once", region.key),
                "Region keys must be unique",
            ));
        }
        if let Some(other) = files.insert(region.slice_file_name(), region.key.as_str()) {
            return Err(config_error(
                &format!(
                    "regions {} and {} both slice to {}",
                    other,
                    region.key,
                    region.slice_file_name()
                ),
                "Keys must differ by more than letter case",
            ));
        }
    }

    Ok(())
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn config_error(message: &str, help: &str) -> LayoutError {
    LayoutError::Config {
        message: message.to_string(),
        help: Some(help.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_regions_are_valid() {
        check_regions(&default_regions()).unwrap();
    }

    #[test]
    fn test_default_regions_cover_the_game_scene() {
        let keys: Vec<String> = default_regions().into_iter().map(|r| r.key).collect();
        assert_eq!(keys.len(), 11);
        assert!(keys.contains(&"ALTERNATIVES_GRID".to_string()));
        assert!(keys.contains(&"FOOTER_POWERUP_RIGHT".to_string()));
    }

    #[test]
    fn test_slice_file_name() {
        assert_eq!(slice_file_name("QUESTION_CARD"), "question-card.png");
        assert_eq!(slice_file_name("HEADER"), "header.png");
        assert_eq!(
            slice_file_name("FOOTER_POWERUP_LEFT"),
            "footer-powerup-left.png"
        );
    }

    #[test]
    fn test_composite_before_dependency_is_rejected() {
        let regions = vec![
            RegionDescriptor::composite("GRID", &["CELL"], ""),
            RegionDescriptor::direct("CELL", "cell-mask", ""),
        ];
        let err = check_regions(&regions).unwrap_err();
        assert!(err.to_string().contains("GRID depends on CELL"));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let regions = vec![
            RegionDescriptor::direct("CELL", "a", ""),
            RegionDescriptor::direct("CELL", "b", ""),
        ];
        assert!(check_regions(&regions).is_err());
    }

    #[test]
    fn test_direct_without_id_is_rejected() {
        let mut region = RegionDescriptor::direct("CELL", "a", "");
        region.id = None;
        assert!(check_regions(&[region]).is_err());
    }

    #[test]
    fn test_composite_without_dependencies_is_rejected() {
        let regions = vec![RegionDescriptor::composite("GRID", &[], "")];
        assert!(check_regions(&regions).is_err());
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let regions = vec![RegionDescriptor::composite("GRID", &["GRID"], "")];
        assert!(check_regions(&regions).is_err());
    }

    #[test]
    fn test_keys_must_be_identifiers() {
        for key in ["SCORE-BOX", "2ND_ROW", "SCORE BOX", "Ação"] {
            let regions = vec![RegionDescriptor::direct(key, "a", "")];
            let err = check_regions(&regions).unwrap_err();
            assert!(err.to_string().contains("not an identifier"), "{key}: {err}");
        }
        let regions = vec![
            RegionDescriptor::direct("_private", "a", ""),
            RegionDescriptor::direct("Row2", "b", ""),
        ];
        assert!(check_regions(&regions).is_ok());
    }

    #[test]
    fn test_keys_colliding_on_slice_file_are_rejected() {
        let regions = vec![
            RegionDescriptor::direct("SCORE_BOX", "a", ""),
            RegionDescriptor::direct("score_box", "b", ""),
        ];
        let err = check_regions(&regions).unwrap_err();
        assert!(err.to_string().contains("score-box.png"));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(check_regions(&[]).is_err());
    }

    #[test]
    fn test_descriptor_yaml_shape() {
        let yaml = "key: GRID\nstrategy: composite\ncomposite_of: [A, B]\n";
        let region: RegionDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(region.strategy, Strategy::Composite);
        assert_eq!(region.composite_of, vec!["A", "B"]);
        assert_eq!(region.description, "");
        assert_eq!(region.id, None);
    }
}
