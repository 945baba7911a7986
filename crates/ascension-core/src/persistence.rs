//! Save/Load functionality for persisting tracker state
//!
//! Uses bincode for the compact binary save file and serde_json for the
//! human-readable export. Both carry the same versioned snapshot.

use std::io::{Read, Write};

use ascension_logic::expedition::ExpeditionState;
use ascension_logic::pulls::PullCounter;
use ascension_logic::resin::ResinState;
use serde::{Deserialize, Serialize};

use crate::store::{CompletionStore, ProgressStore};

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of everything the player entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Per-item material counts
    pub progress: ProgressStore,
    /// Per-item section flags
    pub completion: CompletionStore,
    pub resin: ResinState,
    pub pulls: PullCounter,
    pub expedition: ExpeditionState,
}

impl SaveData {
    pub fn new(
        progress: ProgressStore,
        completion: CompletionStore,
        resin: ResinState,
        pulls: PullCounter,
        expedition: ExpeditionState,
    ) -> Self {
        Self {
            version: SAVE_VERSION,
            progress,
            completion,
            resin,
            pulls,
            expedition,
        }
    }

    fn check_version(self) -> Result<Self, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(self)
    }
}

/// Write the binary save
pub fn save<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    bincode::serialize_into(writer, data)?;
    Ok(())
}

/// Read a binary save
pub fn load<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    data.check_version()
}

/// Write the pretty-printed JSON export
pub fn export_json<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}

/// Read a JSON export
pub fn import_json<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let data: SaveData = serde_json::from_reader(reader)?;
    data.check_version()
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
