use std::sync::Arc;

/// A result from the byte access layer.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// A result describing a whole parsing session.
///
/// If it's the `Err` variant, nothing could be traversed at all. `Ok` means
/// traversal happened; per-tag problems are recorded on each directory
/// instead.
pub type TiffResult<T> = Result<T, TiffError>;

/// A failed read from one of the byte readers.
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum ReaderError {
    /// The read would have gone past the end of the data.
    OutOfBounds {
        /// The index the read started at.
        index: usize,

        /// How many bytes the read wanted.
        bytes: usize,

        /// The total length of the data.
        len: usize,
    },

    /// The requested length doesn't fit in memory addressing.
    ///
    /// This only happens with absurd component counts.
    LengthOverflow { index: usize, bytes: u64 },
}

/// Something that stopped a session before (or while) starting traversal.
#[derive(Clone, Debug)]
pub enum TiffError {
    /// The input was too short to provide a byte order marker.
    NoByteOrderMarker { len: usize },

    /// The byte order marker was weird - it's not one of the two expected
    /// values (in ASCII, should be either `II` or `MM`).
    WeirdByteOrderMarker { found: [u8; 2] },

    /// The TIFF marker (usually `42`) wasn't one we know how to walk.
    UnexpectedTiffMarker { found: u16 },

    /// The eight-byte TIFF header was cut short.
    TruncatedHeader(ReaderError),

    /// Reading the underlying stream failed.
    Io(
        // note: `Arc` allows us to impl `Clone`
        Arc<std::io::Error>,
    ),
}

impl PartialEq for TiffError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoByteOrderMarker { len: a }, Self::NoByteOrderMarker { len: b }) => a == b,
            (Self::WeirdByteOrderMarker { found: a }, Self::WeirdByteOrderMarker { found: b }) => {
                a == b
            }
            (Self::UnexpectedTiffMarker { found: a }, Self::UnexpectedTiffMarker { found: b }) => {
                a == b
            }
            (Self::TruncatedHeader(a), Self::TruncatedHeader(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl core::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds { index, bytes, len } => write!(
                f,
                "Attempted to read {bytes} byte(s) from index {index}, \
                but the data is only {len} byte(s) long."
            ),
            Self::LengthOverflow { index, bytes } => write!(
                f,
                "Attempted to read an impossible number of bytes. index: `{index}`, bytes: `{bytes}`"
            ),
        }
    }
}

impl core::fmt::Display for TiffError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoByteOrderMarker { len } => {
                write!(f, "No byte order marker was found. len: `{len}`")
            }
            Self::WeirdByteOrderMarker { found } => match core::str::from_utf8(found.as_slice()) {
                Ok(found_utf8_bom) => {
                    write!(f, "Got a weird byte-order marker: `{found_utf8_bom}`")
                }
                Err(_) => write!(f, "Got a weird byte-order marker - wasn't ASCII: {found:?}"),
            },
            Self::UnexpectedTiffMarker { found } => {
                write!(f, "Unexpected TIFF marker: `{found:#06X}`")
            }
            Self::TruncatedHeader(e) => write!(f, "The TIFF header was cut short. err: {e}"),
            Self::Io(e) => write!(f, "Failed to read the underlying stream. err: {e}"),
        }
    }
}

impl core::error::Error for ReaderError {}

impl core::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            TiffError::TruncatedHeader(e) => Some(e),
            TiffError::Io(e) => Some(e.as_ref()),
            TiffError::NoByteOrderMarker { .. }
            | TiffError::WeirdByteOrderMarker { .. }
            | TiffError::UnexpectedTiffMarker { .. } => None,
        }
    }
}

impl From<std::io::Error> for TiffError {
    fn from(value: std::io::Error) -> Self {
        TiffError::Io(value.into())
    }
}
