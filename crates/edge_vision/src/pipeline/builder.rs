use std::path::PathBuf;

use crate::{
    config::EdgeConfig,
    detector::Detector,
    error::Result,
    io::{ImageSource, codec},
    pipeline::{BatchRunner, CancelToken},
    traits::Visualizer,
    visualize::NoopVisualizer,
};

/// Builder for batch runs with a fluent API
pub struct BatchBuilder {
    input_root: PathBuf,
    output_root: PathBuf,
    detector: Option<Detector>,
    recursive: bool,
    follow_links: bool,
    extensions: Vec<String>,
    output_extension: String,
    load_as_gray: bool,
    visualize: bool,
    visualizer: Option<Box<dyn Visualizer>>,
    cancel: Option<CancelToken>,
}

impl BatchBuilder {
    /// Create a builder using the built-in defaults
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self::from_config(&EdgeConfig::default())
            .input_root(input_root)
            .output_root(output_root)
    }

    /// Create a builder from a resolved configuration
    pub fn from_config(config: &EdgeConfig) -> Self {
        Self {
            input_root: config.input_dir.clone(),
            output_root: config.output_dir.clone(),
            detector: None,
            recursive: config.recursive,
            follow_links: config.follow_links,
            extensions: config.extensions.clone(),
            output_extension: config.output_extension.clone(),
            load_as_gray: config.load_as_gray,
            visualize: false,
            visualizer: None,
            cancel: None,
        }
    }

    pub fn input_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.input_root = root.into();
        self
    }

    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Set the detector (defaults to Canny with default thresholds)
    pub fn detector(mut self, detector: Detector) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    pub fn load_as_gray(mut self, as_gray: bool) -> Self {
        self.load_as_gray = as_gray;
        self
    }

    /// Show every result through the visualizer
    pub fn visualize(mut self, enabled: bool) -> Self {
        self.visualize = enabled;
        self
    }

    /// Set the visualizer (replaces any existing one)
    pub fn with_visualizer<V>(mut self, visualizer: V) -> Self
    where
        V: Visualizer + 'static,
    {
        self.visualizer = Some(Box::new(visualizer));
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Validate the input root and output format, then freeze the configuration
    pub fn build(self) -> Result<BatchRunner> {
        let output_extension = self.output_extension.trim_start_matches('.').to_ascii_lowercase();
        codec::gray_output_format(&output_extension)?;

        let source = ImageSource::new(self.input_root, self.recursive, &self.extensions)?
            .follow_links(self.follow_links)
            .exclude(&self.output_root);

        Ok(BatchRunner {
            source,
            output_root: self.output_root,
            detector: self.detector.unwrap_or_default(),
            output_extension,
            load_as_gray: self.load_as_gray,
            visualize: self.visualize,
            visualizer: self.visualizer.unwrap_or_else(|| Box::new(NoopVisualizer)),
            cancel: self.cancel.unwrap_or_default(),
        })
    }
}
