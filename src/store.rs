/// Best-score persistence: one named integer that outlives the process.

use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value {0:?} is not a score")]
    Malformed(String),
}

pub trait ScoreStore {
    fn best(&self) -> Result<u32, StoreError>;
    fn set_best(&mut self, score: u32) -> Result<(), StoreError>;
}

// ── File-backed ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }

    /// `$HOME/.alien_turret_score`, or the working directory without a HOME.
    pub fn in_home() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        FileScoreStore::new(PathBuf::from(home).join(".alien_turret_score"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn best(&self) -> Result<u32, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => s
                .trim()
                .parse()
                .map_err(|_| StoreError::Malformed(s.trim().to_string())),
            // Nothing saved yet
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn set_best(&mut self, score: u32) -> Result<(), StoreError> {
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        MemoryScoreStore { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best(&self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn set_best(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}
