//! Hand-built TIFF fixtures.

#![allow(dead_code)]

use ifd_metadata::metadata::Metadata;
use ifd_metadata_types::exif::{Endianness, ifd::DirectoryKind};

pub fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

pub const BYTE: u16 = 1;
pub const ASCII: u16 = 2;
pub const SHORT: u16 = 3;
pub const LONG: u16 = 4;
pub const RATIONAL: u16 = 5;
pub const UNDEFINED: u16 = 7;
pub const SLONG: u16 = 9;
pub const SRATIONAL: u16 = 10;

/// One IFD entry: tag, field type, count, and the value/offset word.
pub type Entry = (u16, u16, u32, [u8; 4]);

pub fn u16_bytes(endianness: Endianness, value: u16) -> [u8; 2] {
    match endianness {
        Endianness::Little => value.to_le_bytes(),
        Endianness::Big => value.to_be_bytes(),
    }
}

pub fn u32_bytes(endianness: Endianness, value: u32) -> [u8; 4] {
    match endianness {
        Endianness::Little => value.to_le_bytes(),
        Endianness::Big => value.to_be_bytes(),
    }
}

/// A `SHORT` stored inline: two bytes, then padding.
pub fn short(endianness: Endianness, value: u16) -> [u8; 4] {
    let mut word = [0_u8; 4];
    word[..2].copy_from_slice(u16_bytes(endianness, value).as_slice());
    word
}

/// A `LONG` (or an offset) stored inline.
pub fn long(endianness: Endianness, value: u32) -> [u8; 4] {
    u32_bytes(endianness, value)
}

/// Lays out a TIFF blob piece by piece, at absolute positions.
///
/// Gaps are zero-filled. The header is written up front, pointing at an IFD
/// at 8.
pub struct TiffBuilder {
    data: Vec<u8>,
    endianness: Endianness,
}

impl TiffBuilder {
    pub fn new(endianness: Endianness) -> Self {
        let mut builder = Self {
            data: Vec::new(),
            endianness,
        };

        let bom = match endianness {
            Endianness::Little => b"II",
            Endianness::Big => b"MM",
        };
        builder.put(0, bom.as_slice());
        builder.marker(42);
        builder.first_ifd(8);
        builder
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn marker(&mut self, marker: u16) {
        let bytes = u16_bytes(self.endianness, marker);
        self.put(2, bytes.as_slice());
    }

    pub fn first_ifd(&mut self, offset: u32) {
        let bytes = u32_bytes(self.endianness, offset);
        self.put(4, bytes.as_slice());
    }

    pub fn short(&self, value: u16) -> [u8; 4] {
        short(self.endianness, value)
    }

    pub fn long(&self, value: u32) -> [u8; 4] {
        long(self.endianness, value)
    }

    /// Writes raw bytes at `at`, growing the data if needed.
    pub fn put(&mut self, at: usize, bytes: &[u8]) {
        let end = at + bytes.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[at..end].copy_from_slice(bytes);
    }

    /// Makes sure the data is at least `len` bytes long.
    pub fn pad_to(&mut self, len: usize) {
        if self.data.len() < len {
            self.data.resize(len, 0);
        }
    }

    /// Writes an IFD in the file's byte order.
    pub fn ifd(&mut self, at: usize, entries: &[Entry], next: u32) {
        self.ifd_with(self.endianness, at, entries, next);
    }

    /// Writes an IFD in a specific byte order.
    pub fn ifd_with(&mut self, endianness: Endianness, at: usize, entries: &[Entry], next: u32) {
        let mut out = u16_bytes(endianness, entries.len() as u16).to_vec();
        for (tag, ty, count, value) in entries {
            out.extend_from_slice(u16_bytes(endianness, *tag).as_slice());
            out.extend_from_slice(u16_bytes(endianness, *ty).as_slice());
            out.extend_from_slice(u32_bytes(endianness, *count).as_slice());
            out.extend_from_slice(value.as_slice());
        }
        out.extend_from_slice(u32_bytes(endianness, next).as_slice());
        self.put(at, &out);
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// The index of the first directory of `kind`.
pub fn index_of(metadata: &Metadata, kind: DirectoryKind) -> usize {
    metadata
        .directories()
        .iter()
        .position(|d| d.kind() == kind)
        .unwrap_or_else(|| panic!("there should be a `{kind}` directory"))
}
