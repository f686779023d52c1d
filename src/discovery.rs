use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::HarnessError;

/// Extension of shipped example programs.
pub const DEFAULT_EXTENSION: &str = "franz";

/// One discovered example file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    path: PathBuf,
    basename: String,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, basename }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// The path as matched by substring exclusion rules.
    pub fn path_str(&self) -> std::borrow::Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

/// A directory tree of example files sharing one extension.
///
/// Opening a corpus validates the root; [`Corpus::candidates`] can then be
/// called any number of times, each call walking the tree afresh.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    extension: String,
}

impl Corpus {
    pub fn open(root: impl Into<PathBuf>, extension: impl Into<String>) -> Result<Self, HarnessError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(HarnessError::MissingCorpus { path: root });
        }
        if let Err(source) = fs::read_dir(&root) {
            return Err(HarnessError::UnreadableCorpus { path: root, source });
        }
        let extension = extension.into();
        debug!(root = %root.display(), %extension, "opened example corpus");
        Ok(Self { root, extension })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields every matching file below the root.
    ///
    /// Entries are sorted by file name within each directory, so the
    /// depth-first walk comes out in full-path lexicographic order. Symlinks
    /// to files are yielded; symlinked directories are not descended into.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping unreadable entry in example corpus: {}", e);
                    None
                }
            })
            .filter(|entry| entry.path().is_file())
            .filter(move |entry| self.has_extension(entry.path()))
            .map(|entry| Candidate::new(entry.into_path()))
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }
}
