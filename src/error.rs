use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a ROM could not be loaded. A failed load never changes the machine's state.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM {} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read ROM {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A line of assembly that isn't any known instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized instruction `{0}`")]
pub struct ParseInstructionError(pub String);
