use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{info, warn};

use crate::{detector::Detector, error::Result};

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Written { output: PathBuf },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Written { .. })
    }
}

/// Per-file outcomes of one batch run, in processing order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub detector: Detector,
    pub outcomes: Vec<FileOutcome>,
    /// Set when the run stopped early on a cancellation request
    pub cancelled: bool,
}

impl BatchReport {
    pub fn new(detector: Detector) -> Self {
        Self {
            detector,
            outcomes: Vec::new(),
            cancelled: false,
        }
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.processed() - self.succeeded()
    }

    /// Failed inputs with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FileStatus::Failed { reason } => Some((o.input.as_path(), reason.as_str())),
            FileStatus::Written { .. } => None,
        })
    }

    /// Output paths written during the run
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FileStatus::Written { output } => Some(output.as_path()),
            FileStatus::Failed { .. } => None,
        })
    }

    pub fn log_summary(&self) {
        info!(
            "Processed {} image(s) with {}: {} succeeded, {} failed",
            self.processed(),
            self.detector.method(),
            self.succeeded(),
            self.failed()
        );
        for (input, reason) in self.failures() {
            warn!("  {}: {}", input.display(), reason);
        }
        if self.cancelled {
            warn!("Batch was cancelled before all images were processed");
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> BatchReport {
        let mut report = BatchReport::new(Detector::default());
        report.outcomes.push(FileOutcome {
            input: PathBuf::from("in/a.png"),
            status: FileStatus::Written {
                output: PathBuf::from("out/a.png"),
            },
        });
        report.outcomes.push(FileOutcome {
            input: PathBuf::from("in/b.png"),
            status: FileStatus::Failed {
                reason: "broken".to_string(),
            },
        });
        report
    }

    #[test]
    fn test_counts() {
        let report = report();
        assert_eq!(report.processed(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.failures().collect::<Vec<_>>(),
            vec![(Path::new("in/b.png"), "broken")]
        );
        assert_eq!(report.outputs().collect::<Vec<_>>(), vec![Path::new("out/a.png")]);
    }

    #[test]
    fn test_json_layout() {
        let json: serde_json::Value =
            serde_json::from_str(&report().to_json().expect("Should serialize")).expect("Should parse");
        assert_eq!(json["detector"]["method"], "canny");
        assert_eq!(json["outcomes"][0]["status"], "written");
        assert_eq!(json["outcomes"][0]["output"], "out/a.png");
        assert_eq!(json["outcomes"][1]["status"], "failed");
        assert_eq!(json["outcomes"][1]["reason"], "broken");
        assert_eq!(json["cancelled"], false);
    }
}
