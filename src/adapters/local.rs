use std::path::PathBuf;

/// Base directory that import source names are resolved against.
#[derive(Debug, Clone)]
pub struct ImportDirectory {
    base_path: PathBuf,
}

impl ImportDirectory {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Absolute sources are used as given.
    pub fn resolve(&self, source: &str) -> PathBuf {
        self.base_path.join(source)
    }
}
