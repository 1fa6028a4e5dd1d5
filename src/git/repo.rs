use crate::error::{PieError, Result};
use gix::discover;
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: gix::Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Paths of all files tracked in the index, sorted.
    pub fn tracked_files(&self) -> Result<Vec<String>> {
        let index = self
            .repo
            .index()
            .map_err(|e| PieError::Repo(format!("Failed to read index: {e}")))?;
        let mut files: Vec<String> = index
            .entries()
            .iter()
            .map(|entry| entry.path(&index).to_string())
            .collect();
        files.sort();
        Ok(files)
    }
}
