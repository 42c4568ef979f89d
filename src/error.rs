use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for gabarito operations
#[derive(Error, Diagnostic, Debug)]
pub enum LayoutError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(gabarito::io))]
    Io { path: PathBuf, message: String },

    #[error("No vector source found (tried {})", join_paths(.attempted))]
    #[diagnostic(
        code(gabarito::source_not_found),
        help("Save one of the files listed above in the public directory")
    )]
    SourceNotFound { attempted: Vec<PathBuf> },

    #[error("No baseline found for scene '{scene}' (tried {})", join_paths(.attempted))]
    #[diagnostic(
        code(gabarito::baseline_not_found),
        help("Run `gabarito sync --scene <scene>` first")
    )]
    BaselineNotFound { scene: String, attempted: Vec<PathBuf> },

    #[error("Slice directory {path} not found")]
    #[diagnostic(
        code(gabarito::slices_not_found),
        help("Run `gabarito slice <scene>` before validating")
    )]
    SlicesNotFound { path: PathBuf },

    #[error("Could not resolve region {key}")]
    #[diagnostic(code(gabarito::region_unresolved))]
    RegionUnresolved {
        key: String,
        #[help]
        help: Option<String>,
    },

    #[error("Raster error: {message}")]
    #[diagnostic(code(gabarito::raster))]
    Raster {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(gabarito::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(gabarito::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{message}")]
    #[diagnostic(code(gabarito::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(gabarito::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_names_every_path() {
        let err = LayoutError::SourceNotFound {
            attempted: vec![
                PathBuf::from("public/gabarito-game.svg"),
                PathBuf::from("public/figma-gabarito.svg"),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("public/gabarito-game.svg"));
        assert!(message.contains("public/figma-gabarito.svg"));
    }

    #[test]
    fn test_region_unresolved_names_key() {
        let err = LayoutError::RegionUnresolved {
            key: "QUESTION_CARD".to_string(),
            help: None,
        };
        assert_eq!(err.to_string(), "Could not resolve region QUESTION_CARD");
    }
}
