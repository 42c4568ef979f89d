use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Project;
use crate::error::{LayoutError, Result};
use crate::token::LayoutToken;

use super::{render_module, Baseline};

/// Files produced by one [`BaselineWriter::write`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenBaseline {
    pub baseline_path: PathBuf,
    pub module_path: PathBuf,
    /// Default baseline copy, written for the canonical scene only.
    pub default_path: Option<PathBuf>,
}

/// Writes a scene's token set as baseline JSON and generated module.
///
/// Every write fully replaces the previous artifacts.
pub struct BaselineWriter<'a> {
    project: &'a Project,
}

impl<'a> BaselineWriter<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Render both artifacts: `(module_text, baseline_json)`.
    pub fn render(scene: &str, tokens: &[LayoutToken]) -> Result<(String, String)> {
        let module = render_module(scene, tokens);
        let json = Baseline::from_tokens(tokens).to_json()?;
        Ok((module, json))
    }

    pub fn write(&self, scene: &str, tokens: &[LayoutToken]) -> Result<WrittenBaseline> {
        let (module, json) = Self::render(scene, tokens)?;

        let config_dir = self.project.config_dir();
        fs::create_dir_all(&config_dir).map_err(|e| LayoutError::Io {
            path: config_dir.clone(),
            message: format!("Failed to create config directory: {}", e),
        })?;

        let module_path = self.project.module_path(scene);
        write_file(&module_path, &module)?;

        let baseline_path = self.project.scene_baseline_path(scene);
        write_file(&baseline_path, &json)?;

        let default_path = if self.project.is_canonical(scene) {
            let path = self.project.default_baseline_path();
            write_file(&path, &json)?;
            Some(path)
        } else {
            None
        };

        Ok(WrittenBaseline {
            baseline_path,
            module_path,
            default_path,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| LayoutError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write: {}", e),
    })
}
