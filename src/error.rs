use std::path::PathBuf;

use thiserror::Error;

use crate::reader::ReaderError;

/// Errors surfaced by [`Player`](crate::player::Player).
///
/// Playback itself never fails: clock anomalies are clamped and reported
/// to the [`PlaybackObserver`](crate::scheduler::PlaybackObserver).
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The reader could not open or recognize the file. No player was created.
    #[error("Could not open `{}`: {source}", .path.display())]
    FileOpen {
        /// The path that was asked for
        path: PathBuf,
        /// Why the reader gave up
        #[source]
        source: ReaderError,
    },
}

impl PlayerError {
    /// Create a [`PlayerError::FileOpen`]
    pub fn file_open(path: impl Into<PathBuf>, source: ReaderError) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }
}

/// The result type of fallible [`Player`](crate::player::Player) operations
pub type PlayerResult<T> = Result<T, PlayerError>;
