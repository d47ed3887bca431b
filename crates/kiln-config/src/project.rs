use std::path::{Path, PathBuf};

/// Absolute project root every relative configuration path is joined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Use the current working directory as the project root.
    pub fn current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a project-relative directory onto the root.
    pub fn resolve(&self, dir: impl AsRef<Path>) -> PathBuf {
        self.root.join(dir)
    }

    /// Directory holding SVG icons that are bundled as sprite symbols.
    pub fn icons_dir(&self) -> PathBuf {
        self.resolve("src/assets/icons")
    }
}
