//! Staged regeneration of the documentation artifacts
//!
//! A [`SyncPlan`] holds the freshly generated content of every output file.
//! Building the plan reads and validates everything up front; nothing touches
//! disk until [`SyncPlan::apply`], so a failed extraction leaves both the type
//! file and the README as they were.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::docs::{ReadmeSync, TypeExtractor};
use crate::error::{DocsyncError, Result};
use crate::syntax::QueryEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    UpToDate,
    Stale,
    Missing,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::UpToDate => "up to date",
            FileStatus::Stale => "stale",
            FileStatus::Missing => "missing",
        }
    }
}

/// Generated content for one output file alongside what is on disk now
#[derive(Debug, Clone)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub current: Option<String>,
    pub generated: String,
}

impl PendingWrite {
    pub fn status(&self) -> FileStatus {
        match &self.current {
            None => FileStatus::Missing,
            Some(current) if *current == self.generated => FileStatus::UpToDate,
            Some(_) => FileStatus::Stale,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.status() != FileStatus::UpToDate
    }
}

/// Per-file status, serialized for `check --format json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

#[derive(Debug)]
pub struct SyncPlan {
    writes: Vec<PendingWrite>,
}

impl SyncPlan {
    pub fn build(root: &Path, config: &Config) -> Result<Self> {
        Self::build_with(&QueryEngine::default(), root, config)
    }

    pub fn build_with(engine: &QueryEngine, root: &Path, config: &Config) -> Result<Self> {
        let parser = engine.parser();

        let source_path = config.source_path(root);
        let source = parser.parse_file(&source_path)?;
        tracing::debug!("Parsed {}", source_path.display());

        let types_path = config.types_path(root);
        let types = TypeExtractor::new(engine, &config.strip_prefix).extract(&source)?;

        let readme_path = config.readme_path(root);
        let readme = parser.parse_file(&readme_path)?;
        let readme_text =
            ReadmeSync::new(engine, &config.module, &config.marker).render(&source, &readme)?;

        let writes = vec![
            PendingWrite {
                current: read_optional(&types_path)?,
                path: types_path,
                generated: types,
            },
            PendingWrite {
                path: readme_path,
                current: Some(readme.source.clone()),
                generated: readme_text,
            },
        ];

        Ok(Self { writes })
    }

    pub fn writes(&self) -> &[PendingWrite] {
        &self.writes
    }

    pub fn get(&self, path: &Path) -> Option<&PendingWrite> {
        self.writes.iter().find(|w| w.path == path)
    }

    pub fn stale(&self) -> Vec<&PendingWrite> {
        self.writes.iter().filter(|w| w.is_stale()).collect()
    }

    pub fn report(&self) -> Vec<FileReport> {
        self.writes
            .iter()
            .map(|w| FileReport {
                path: w.path.clone(),
                status: w.status(),
            })
            .collect()
    }

    /// Fails with [`DocsyncError::Stale`] if any output differs from what would be generated.
    pub fn check(&self) -> Result<()> {
        let stale: Vec<PathBuf> = self.stale().into_iter().map(|w| w.path.clone()).collect();
        if stale.is_empty() {
            Ok(())
        } else {
            Err(DocsyncError::Stale(stale))
        }
    }

    /// Writes every stale output and returns the paths written.
    pub fn apply(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for write in self.stale() {
            if let Some(parent) = write.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| DocsyncError::io(parent, e))?;
            }
            std::fs::write(&write.path, &write.generated)
                .map_err(|e| DocsyncError::io(&write.path, e))?;
            tracing::info!("Updated {}", write.path.display());
            written.push(write.path.clone());
        }
        Ok(written)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DocsyncError::io(path, e)),
    }
}
