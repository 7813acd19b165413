use std::fmt::Debug;

use thiserror::Error;

#[derive(Error)]
pub enum OatError {
    #[error("Bad {format} magic at offset {offset:#x}: {found:02x?}")]
    BadMagic {
        format: &'static str,
        offset: usize,
        found: [u8; 4],
    },

    #[error("Unexpected end of data: {needed} bytes requested at offset {offset:#x}, but only {available} remain")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Access of {size} bytes at offset {offset:#x} is outside of the buffer (size: {len})")]
    OutOfBounds {
        offset: i64,
        size: usize,
        len: usize,
    },

    #[error("{format} file declares {expected} dex files but only {actual} checksums were supplied")]
    ChecksumCountMismatch {
        format: &'static str,
        expected: u32,
        actual: usize,
    },

    #[error("Unrecognized file format (neither dex, odex nor vdex)")]
    UnrecognizedFormat,

    #[error("Bad checksum on line {line}: {value:?} is not a 32-bit hexadecimal value")]
    BadChecksumEntry { line: usize, value: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[macro_export]
macro_rules! oat_err {
    ($name:ident) => {
        Err(OatError::$name)
    };
    ($name:ident { $($arg:tt)* }) => {
        Err(OatError::$name { $($arg)* })
    };
}

impl Debug for OatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
