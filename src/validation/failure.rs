//! Failure types for slice validation.

use std::fmt;

use serde::Serialize;

/// What went wrong with a region's slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    MissingFile,
    ReadError,
    DimensionMismatch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingFile => write!(f, "missing-file"),
            FailureKind::ReadError => write!(f, "read-error"),
            FailureKind::DimensionMismatch => write!(f, "dimension-mismatch"),
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A single slice that does not match the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    pub key: String,
    pub kind: FailureKind,
    pub file: String,
    pub expected: Dimensions,
    /// Dimensions read from the file, when it could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Dimensions>,
    /// Reader error, for `ReadError`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationFailure {
    pub fn missing(key: &str, file: &str, expected: Dimensions) -> Self {
        Self {
            key: key.to_string(),
            kind: FailureKind::MissingFile,
            file: file.to_string(),
            expected,
            actual: None,
            reason: None,
        }
    }

    pub fn unreadable(key: &str, file: &str, expected: Dimensions, reason: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            kind: FailureKind::ReadError,
            file: file.to_string(),
            expected,
            actual: None,
            reason: Some(reason.into()),
        }
    }

    pub fn mismatch(key: &str, file: &str, expected: Dimensions, actual: Dimensions) -> Self {
        Self {
            key: key.to_string(),
            kind: FailureKind::DimensionMismatch,
            file: file.to_string(),
            expected,
            actual: Some(actual),
            reason: None,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::MissingFile => write!(f, "{}: file {} missing", self.key, self.file),
            FailureKind::ReadError => write!(
                f,
                "{}: failed to read {} ({})",
                self.key,
                self.file,
                self.reason.as_deref().unwrap_or("unknown error")
            ),
            FailureKind::DimensionMismatch => match self.actual {
                Some(actual) => write!(f, "{}: expected {}, got {}", self.key, self.expected, actual),
                None => write!(f, "{}: expected {}", self.key, self.expected),
            },
        }
    }
}

/// Collects every failure of one validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Regions with a frame that were checked.
    pub checked: usize,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// True when nothing failed.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Count failures of one kind.
    pub fn count(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: Dimensions = Dimensions {
        width: 100,
        height: 50,
    };

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationFailure::missing("HEADER", "header.png", EXPECTED).to_string(),
            "HEADER: file header.png missing"
        );
        assert_eq!(
            ValidationFailure::unreadable("HEADER", "header.png", EXPECTED, "bad signature")
                .to_string(),
            "HEADER: failed to read header.png (bad signature)"
        );
        assert_eq!(
            ValidationFailure::mismatch(
                "HEADER",
                "header.png",
                EXPECTED,
                Dimensions {
                    width: 101,
                    height: 50
                }
            )
            .to_string(),
            "HEADER: expected 100x50, got 101x50"
        );
    }

    #[test]
    fn test_empty_report() {
        let report = ValidationReport::new();
        assert!(report.is_ok());
        assert_eq!(report.failure_count(), 0);
    }

    #[test]
    fn test_report_counts() {
        let mut report = ValidationReport::new();
        report.push(ValidationFailure::missing("A", "a.png", EXPECTED));
        report.push(ValidationFailure::missing("B", "b.png", EXPECTED));
        report.push(ValidationFailure::unreadable("C", "c.png", EXPECTED, "eof"));

        assert!(!report.is_ok());
        assert_eq!(report.failure_count(), 3);
        assert_eq!(report.count(FailureKind::MissingFile), 2);
        assert_eq!(report.count(FailureKind::DimensionMismatch), 0);
    }

    #[test]
    fn test_failure_json() {
        let failure = ValidationFailure::missing("A", "a.png", EXPECTED);
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "missing-file");
        assert_eq!(json["expected"]["width"], 100);
        assert!(json.get("actual").is_none());
    }
}
