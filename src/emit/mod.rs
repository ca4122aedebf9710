//! artifact emission
//!
//! an [`Emitter`] receives every synthesized [`Artifact`] and produces its
//! output only once all of them were accepted.

mod rust;

pub use rust::RustEmitter;

use crate::error::Result;
use crate::synth::Artifact;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// renders artifacts for one target language
pub trait Emitter {
    type Output;

    /// accept one artifact
    fn emit(&mut self, artifact: &Artifact) -> Result<()>;

    /// produce the output for every accepted artifact
    fn finish(self) -> Result<Self::Output>;
}

/// rendered files keyed by relative path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTree {
    files: BTreeMap<PathBuf, String>,
}

impl SourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: String) {
        self.files.insert(path.into(), contents);
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files
            .iter()
            .map(|(path, contents)| (path.as_path(), contents.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// write every file below `dir`, creating directories as needed
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for (path, contents) in &self.files {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, contents)?;
        }
        info!(files = self.files.len(), dir = %dir.display(), "sources written");
        Ok(())
    }
}
