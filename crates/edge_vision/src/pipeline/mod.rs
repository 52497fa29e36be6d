pub mod builder;
pub mod report;

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::{debug, info, warn};

use crate::{
    detector::{Detector, detect},
    error::{EdgeError, Result},
    io::{ImageSource, codec},
    traits::Visualizer,
};
use report::{BatchReport, FileOutcome, FileStatus};

/// Cooperative cancellation flag, checked between files
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs one detector over every image of a source tree, mirroring results
/// into an output tree
pub struct BatchRunner {
    source: ImageSource,
    output_root: PathBuf,
    detector: Detector,
    output_extension: String,
    load_as_gray: bool,
    visualize: bool,
    visualizer: Box<dyn Visualizer>,
    cancel: CancelToken,
}

impl BatchRunner {
    /// Create a new batch builder
    pub fn builder(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> builder::BatchBuilder {
        builder::BatchBuilder::new(input_root, output_root)
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Process every discovered image in enumeration order.
    ///
    /// The input set is listed once before the first write, so files produced
    /// by this run are never picked up as inputs. Fails before touching any
    /// file when the source yields nothing. Per-file errors are recorded in
    /// the report and do not stop the run.
    pub fn run(&self) -> Result<BatchReport> {
        let inputs = self.source.list();
        if inputs.is_empty() {
            return Err(EdgeError::NoImages(self.source.root().to_path_buf()));
        }

        info!(
            "Running {} over {} images in {} -> {}",
            self.detector.method(),
            inputs.len(),
            self.source.root().display(),
            self.output_root.display()
        );

        let mut report = BatchReport::new(self.detector.clone());
        let mut written = HashSet::new();
        for input in inputs {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let status = match self.process_one(&input, &mut written) {
                Ok(output) => {
                    debug!("{} -> {}", input.display(), output.display());
                    FileStatus::Written { output }
                }
                Err(err) => {
                    warn!("Failed to process {}: {}", input.display(), err);
                    FileStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            report.outcomes.push(FileOutcome { input, status });
        }

        Ok(report)
    }

    fn process_one(&self, input: &Path, written: &mut HashSet<PathBuf>) -> Result<PathBuf> {
        let image = codec::load(input, self.load_as_gray)?;
        let edges = detect(&image, &self.detector)?;

        let output = self.mirrored_path(input)?;
        if written.contains(&output) {
            return Err(EdgeError::encode(
                &output,
                "output already written for another input in this run",
            ));
        }
        codec::save_gray(&edges, &output)?;
        written.insert(output.clone());

        if self.visualize {
            let title = format!("{} Edges", self.detector.method().title());
            if let Err(err) = self.visualizer.show(&image, &edges, ("Original", &title)) {
                warn!("Visualization failed for {}: {}", input.display(), err);
            }
        }

        Ok(output)
    }

    /// Same relative path under the output root, with the output extension
    pub fn mirrored_path(&self, input: &Path) -> Result<PathBuf> {
        let relative = input.strip_prefix(self.source.root()).map_err(|_| {
            EdgeError::Config(format!(
                "{} is outside the input root {}",
                input.display(),
                self.source.root().display()
            ))
        })?;
        Ok(self
            .output_root
            .join(relative)
            .with_extension(&self.output_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types::{EdgeMap, PixelBuffer}, visualize::NoopVisualizer};
    use image::{GrayImage, Luma};
    use std::{fs, sync::Mutex};

    #[derive(Default)]
    struct RecordingVisualizer {
        titles: Mutex<Vec<(String, String)>>,
    }

    impl Visualizer for Arc<RecordingVisualizer> {
        fn show(&self, original: &PixelBuffer, processed: &EdgeMap, titles: (&str, &str)) -> Result<()> {
            assert_eq!(original.dimensions(), processed.dimensions());
            self.titles
                .lock()
                .expect("Lock should not be poisoned")
                .push((titles.0.to_string(), titles.1.to_string()));
            Ok(())
        }
    }

    fn write_square(path: &Path) {
        let image = GrayImage::from_fn(32, 32, |x, y| {
            if (8..24).contains(&x) && (8..24).contains(&y) {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        codec::save_gray(&image, path).expect("Should write fixture");
    }

    #[test]
    fn test_mirrored_path_keeps_structure() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let runner = BatchRunner::builder(dir.path(), "out")
            .build()
            .expect("Should build runner");

        let mirrored = runner
            .mirrored_path(&dir.path().join("sub").join("photo.JPG"))
            .expect("Should mirror path");
        assert_eq!(mirrored, Path::new("out").join("sub").join("photo.png"));
        assert!(runner.mirrored_path(Path::new("/elsewhere/x.png")).is_err());
    }

    #[test]
    fn test_empty_input_fails_fast() {
        let input = tempfile::tempdir().expect("Should create temp dir");
        let output = tempfile::tempdir().expect("Should create temp dir");
        fs::write(input.path().join("notes.txt"), b"no images here").expect("Should write file");

        let runner = BatchRunner::builder(input.path(), output.path().join("edges"))
            .build()
            .expect("Should build runner");
        assert!(matches!(runner.run(), Err(EdgeError::NoImages(_))));
        assert!(!output.path().join("edges").exists());
    }

    #[test]
    fn test_visualizer_called_only_when_enabled() {
        let input = tempfile::tempdir().expect("Should create temp dir");
        let output = tempfile::tempdir().expect("Should create temp dir");
        write_square(&input.path().join("a.png"));
        write_square(&input.path().join("b.png"));

        let recorder = Arc::new(RecordingVisualizer::default());
        let runner = BatchRunner::builder(input.path(), output.path())
            .detector(Detector::Sobel(Default::default()))
            .with_visualizer(recorder.clone())
            .build()
            .expect("Should build runner");
        runner.run().expect("Should run batch");
        assert!(recorder.titles.lock().expect("Lock").is_empty());

        let runner = BatchRunner::builder(input.path(), output.path())
            .detector(Detector::Sobel(Default::default()))
            .with_visualizer(recorder.clone())
            .visualize(true)
            .build()
            .expect("Should build runner");
        runner.run().expect("Should run batch");
        let titles = recorder.titles.lock().expect("Lock");
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0], ("Original".to_string(), "Sobel Edges".to_string()));
    }

    #[test]
    fn test_cancelled_run_stops_between_files() {
        let input = tempfile::tempdir().expect("Should create temp dir");
        let output = tempfile::tempdir().expect("Should create temp dir");
        write_square(&input.path().join("a.png"));
        write_square(&input.path().join("b.png"));

        let cancel = CancelToken::new();
        cancel.cancel();
        let runner = BatchRunner::builder(input.path(), output.path())
            .with_visualizer(NoopVisualizer)
            .with_cancel_token(cancel)
            .build()
            .expect("Should build runner");
        let report = runner.run().expect("Should run batch");
        assert!(report.cancelled);
        assert_eq!(report.processed(), 0);
    }

    #[test]
    fn test_output_collision_is_recorded() {
        let input = tempfile::tempdir().expect("Should create temp dir");
        let output = tempfile::tempdir().expect("Should create temp dir");
        write_square(&input.path().join("shot.bmp"));
        write_square(&input.path().join("shot.png"));

        let runner = BatchRunner::builder(input.path(), output.path())
            .build()
            .expect("Should build runner");
        let report = runner.run().expect("Should run batch");
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        let (failed, _) = report.failures().next().expect("Should record the collision");
        assert_eq!(failed, input.path().join("shot.png"));
    }

    #[test]
    fn test_output_nested_in_input_is_not_reprocessed() {
        let input = tempfile::tempdir().expect("Should create temp dir");
        write_square(&input.path().join("a.png"));
        let output = input.path().join("edges");

        let runner = BatchRunner::builder(input.path(), &output)
            .recursive(true)
            .detector(Detector::Sobel(Default::default()))
            .build()
            .expect("Should build runner");

        for _ in 0..2 {
            let report = runner.run().expect("Should run batch");
            assert_eq!(report.processed(), 1);
            assert_eq!(report.succeeded(), 1);
        }
        assert!(output.join("a.png").is_file());
        assert!(!output.join("edges").exists());
    }

    #[test]
    fn test_failed_save_does_not_claim_output() {
        let input = tempfile::tempdir().expect("Should create temp dir");
        let output = tempfile::tempdir().expect("Should create temp dir");
        write_square(&input.path().join("shot.bmp"));
        write_square(&input.path().join("shot.png"));
        // A directory squatting on the target makes the first save fail
        fs::create_dir_all(output.path().join("shot.png").join("blocker"))
            .expect("Should create dir");

        let runner = BatchRunner::builder(input.path(), output.path())
            .build()
            .expect("Should build runner");
        let report = runner.run().expect("Should run batch");
        assert_eq!(report.failed(), 2);
        for (_, reason) in report.failures() {
            assert!(!reason.contains("already written"), "unexpected collision: {reason}");
        }
    }
}
