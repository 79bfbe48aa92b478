//! Source root table
//!
//! Maps each source to the directory its logs live under. The table is built
//! by the caller and handed to the collector, so tests can point sources at
//! synthetic trees.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::SourceKind;

#[derive(Debug, Clone, Default)]
pub(crate) struct SourceRoots {
    roots: HashMap<SourceKind, PathBuf>,
}

impl SourceRoots {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_root(mut self, kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        self.set_root(kind, path);
        self
    }

    pub(crate) fn set_root(&mut self, kind: SourceKind, path: impl Into<PathBuf>) {
        self.roots.insert(kind, path.into());
    }

    /// Configured root, whether or not it exists
    pub(crate) fn root(&self, kind: SourceKind) -> Option<&Path> {
        self.roots.get(&kind).map(PathBuf::as_path)
    }

    /// Root directory of a source, only if it exists and can be listed
    pub(crate) fn locate(&self, kind: SourceKind) -> Option<PathBuf> {
        let root = self.root(kind)?;
        if !root.is_dir() {
            debug!(source = %kind, root = %root.display(), "source root missing");
            return None;
        }
        match fs::read_dir(root) {
            Ok(_) => Some(root.to_path_buf()),
            Err(err) => {
                debug!(source = %kind, root = %root.display(), %err, "source root unreadable");
                None
            }
        }
    }
}
