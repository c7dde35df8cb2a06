use std::io;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while loading a MIDI file into a reader
"#]
#[derive(Debug, Error)]
#[error("Reading MIDI file, {kind}")]
pub struct ReaderError {
    #[source]
    kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The file could not be read
    #[error("I/O: {0}")]
    Io(#[from] io::Error),
    /// The bytes are not a Standard MIDI File
    #[error("Decoding: {0}")]
    Decode(#[from] midly::Error),
}

impl ReaderError {
    /// Create a reader error from its kind
    pub const fn new(kind: ReaderErrorKind) -> Self {
        Self { kind }
    }
    /// Returns the error kind of the reader.
    pub const fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// True if the file could not be read at all
    pub const fn is_io(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::Io(_))
    }
    /// True if the file was read but not recognized
    pub const fn is_decode(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::Decode(_))
    }
}

impl From<io::Error> for ReaderError {
    fn from(value: io::Error) -> Self {
        Self::new(value.into())
    }
}

impl From<midly::Error> for ReaderError {
    fn from(value: midly::Error) -> Self {
        Self::new(value.into())
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
