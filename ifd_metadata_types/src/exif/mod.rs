//! Plain data types describing Exif/TIFF structures.
//!
//! Nothing in here does any parsing. For that, see the `ifd_metadata` crate.

pub mod ifd;
pub mod primitives;
pub mod tags;

/// Each blob of Exif will start with a byte order marker - its endianness.
///
/// It's either `II` (Intel, for little-endian) or `MM` (Motorola, for
/// big-endian).
///
/// Keeping this info around is vital for correct parsing and maintaining the
/// many proprietary blocks.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Endianness {
    /// `II` for Intel, little-endian.
    Little,

    /// `MM` for Motorola. Big-endian.
    Big,
}

impl Endianness {
    /// Reads a two-byte byte order marker.
    ///
    /// ```
    /// use ifd_metadata_types::exif::Endianness;
    ///
    /// assert_eq!(Endianness::from_marker(*b"II"), Some(Endianness::Little));
    /// assert_eq!(Endianness::from_marker(*b"MM"), Some(Endianness::Big));
    /// assert_eq!(Endianness::from_marker(*b"IM"), None);
    /// ```
    pub const fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match marker {
            [b'I', b'I'] => Some(Self::Little),
            [b'M', b'M'] => Some(Self::Big),
            _ => None,
        }
    }

    /// The opposite byte order.
    pub const fn swapped(self) -> Self {
        match self {
            Self::Little => Self::Big,
            Self::Big => Self::Little,
        }
    }
}
