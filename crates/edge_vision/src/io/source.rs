//! Discovery of input images under a root directory.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;
use walkdir::WalkDir;

use crate::{
    config::{EdgeConfig, has_extension, normalize_extensions},
    error::{EdgeError, Result},
};

/// Lazily enumerates image files below a root directory.
///
/// Entries are sorted by file name within each directory and visited
/// depth-first. Every call to [`ImageSource::iter`] walks the tree afresh.
#[derive(Debug, Clone)]
pub struct ImageSource {
    root: PathBuf,
    recursive: bool,
    follow_links: bool,
    extensions: Vec<String>,
    excluded: Vec<PathBuf>,
}

impl ImageSource {
    /// Fails with `NotFound` unless `root` is an existing directory
    pub fn new(root: impl Into<PathBuf>, recursive: bool, extensions: &[String]) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(EdgeError::NotFound(root));
        }
        Ok(Self {
            root,
            recursive,
            follow_links: false,
            extensions: normalize_extensions(extensions),
            excluded: Vec::new(),
        })
    }

    /// Source configured from the defaults in `config`
    pub fn from_config(root: impl Into<PathBuf>, config: &EdgeConfig) -> Result<Self> {
        Ok(Self::new(root, config.recursive, &config.extensions)?.follow_links(config.follow_links))
    }

    /// Descend through symbolic links to directories
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Never descend into `dir` (e.g. an output tree nested in the input)
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn iter(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        // Real paths of directories already entered; a link back into one of
        // them is pruned so traversal always terminates.
        let follow = self.follow_links;
        let mut visited: HashSet<PathBuf> = fs::canonicalize(&self.root).into_iter().collect();
        let excluded: HashSet<PathBuf> = self
            .excluded
            .iter()
            .filter_map(|dir| fs::canonicalize(dir).ok())
            .collect();

        walker
            .into_iter()
            .filter_entry(move |entry| {
                if !entry.file_type().is_dir() || (!follow && excluded.is_empty()) {
                    return true;
                }
                match fs::canonicalize(entry.path()) {
                    Ok(real) if excluded.contains(&real) => false,
                    Ok(real) => !follow || visited.insert(real),
                    Err(_) => !follow,
                }
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .map(walkdir::DirEntry::into_path)
            .filter(|path| path.is_file())
            .filter(move |path| has_extension(path, &self.extensions))
    }

    /// Collect every matching path
    pub fn list(&self) -> Vec<PathBuf> {
        self.iter().collect()
    }
}
