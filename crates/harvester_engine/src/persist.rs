use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use harvester_core::{ArtifactKind, Provenance};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::{artifact_filename, random_token, TokenAlphabet};

/// Fresh names drawn before giving up on a write.
const MAX_NAME_ATTEMPTS: usize = 8;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("no free artifact name after {0} attempts")]
    NameSpaceExhausted(usize),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes harvested artifacts under one directory with random, never-reused names.
///
/// Each artifact is staged in a temp file and published with a no-clobber rename,
/// so two writers can never end up sharing a name and readers never see a
/// partially written file.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    alphabet: TokenAlphabet,
}

impl ArtifactStore {
    /// Prepares `dir` (creating it if needed) for writing.
    pub fn open(dir: impl Into<PathBuf>, alphabet: TokenAlphabet) -> Result<Self, PersistError> {
        let dir = dir.into();
        ensure_output_dir(&dir)?;
        Ok(Self { dir, alphabet })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the provenance comment block followed by `content`.
    pub fn persist(
        &self,
        content: &[u8],
        provenance: &Provenance,
        kind: ArtifactKind,
    ) -> Result<PathBuf, PersistError> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(provenance.render(kind).as_bytes())?;
        tmp.write_all(content)?;
        tmp.flush()?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let target = self
                .dir
                .join(artifact_filename(&random_token(self.alphabet), kind));
            match tmp.persist_noclobber(&target) {
                Ok(_) => return Ok(target),
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    tmp = err.file;
                }
                Err(err) => return Err(PersistError::Io(err.error)),
            }
        }
        Err(PersistError::NameSpaceExhausted(MAX_NAME_ATTEMPTS))
    }
}
