//! # Batch Edge Detection Library
//!
//! Discovers images below a directory, runs one of three gradient edge
//! detectors over each of them and mirrors the single-channel results into
//! an output tree.
//!
//! ## Core Features
//!
//! - **Closed detector set**: [`Detector`] is `Canny`, `Sobel` or `Laplacian`,
//!   each carrying its frozen parameter set
//! - **Deterministic traversal**: sorted, depth-first, symlink-cycle safe
//! - **Atomic output**: edge maps are encoded fully before they appear on disk
//! - **Per-file failures**: one broken image never aborts the batch
//! - **Pluggable visualization**: previews go through the [`Visualizer`] port
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edge_vision::{BatchRunner, Detector, EdgeConfig, EdgeMethod};
//!
//! let config = EdgeConfig::default();
//! let runner = BatchRunner::builder("data/raw", "data/edges")
//!     .detector(Detector::with_defaults(EdgeMethod::Sobel, &config))
//!     .recursive(true)
//!     .build()?;
//!
//! let report = runner.run()?;
//! println!("{} succeeded, {} failed", report.succeeded(), report.failed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Single Image
//!
//! ```rust,no_run
//! use edge_vision::{EdgeConfig, detect_by_name, io};
//!
//! let image = io::load("photo.jpg", false)?;
//! let edges = detect_by_name(&image, "laplacian", &EdgeConfig::default())?;
//! io::save_gray(&edges, "photo_edges.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod detector;
pub mod io;
pub mod pipeline;
pub mod visualize;
pub mod samples;

// Re-exports for convenience
pub use error::{EdgeError, Result};
pub use types::{EdgeMap, PixelBuffer};
pub use config::EdgeConfig;
pub use traits::*;
pub use algorithms::{CannyParams, LaplacianParams, SobelParams};
pub use detector::{Detector, EdgeMethod, ParamOverrides, available_methods, detect, detect_by_name};
pub use pipeline::{
    BatchRunner, CancelToken,
    builder::BatchBuilder,
    report::{BatchReport, FileOutcome, FileStatus},
};
pub use visualize::{NoopVisualizer, SideBySideViewer};
