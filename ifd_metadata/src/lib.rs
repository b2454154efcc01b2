//! # `ifd_metadata`
//!
//! Reads TIFF-structured metadata: Exif blocks, TIFF files, and the raw
//! formats built on top of them.
//!
//! Parsing produces a [`Metadata`]: an ordered list of [`Directory`]
//! instances (IFD0, Exif, GPS, thumbnails, makernotes, ...) holding typed tag
//! values and any problems found along the way.
//!
//! ## Quick start
//!
//! ```
//! use ifd_metadata::read_metadata;
//! use ifd_metadata_types::exif::{ifd::DirectoryKind, tags};
//!
//! // `II`, 42, IFD at 8. one entry: `Orientation` (SHORT) = 6
//! let mut data = b"II*\0\x08\0\0\0\x01\0".to_vec();
//! data.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 1, 0, 0, 0, 6, 0, 0, 0]);
//! data.extend_from_slice(&[0, 0, 0, 0]);
//!
//! let metadata = read_metadata(&data).unwrap();
//! let ifd0 = metadata.first_directory_of_kind(DirectoryKind::Ifd0).unwrap();
//! assert_eq!(ifd0.get_u32(tags::ifd0::ORIENTATION), Some(6));
//! ```
//!
//! ## Layers
//!
//! - [`reader`]: bounds-checked, endian-aware byte access.
//! - [`tiff`]: the IFD walker. It knows the layout, but not what tags mean.
//! - [`exif`]: the handler that gives tags meaning, including makernotes.
//! - [`metadata`]: the directories everything ends up in.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

use std::{io::Read, sync::Arc};

use parking_lot::RwLock;

use crate::{error::TiffError, tiff::ReadOptions};

pub mod error;
pub mod exif;
pub mod metadata;
pub mod reader;
pub mod tiff;

pub use error::{ReaderError, TiffResult};
pub use metadata::{Directory, Metadata, TagValue};

/// The bytes that start a JPEG `APP1` Exif segment, right before the TIFF
/// header.
pub const EXIF_PREAMBLE: &[u8] = b"Exif\0\0";

/// Reads the metadata in a TIFF blob starting at its first byte.
pub fn read_metadata(data: &[u8]) -> TiffResult<Metadata> {
    exif::parse(data, 0, &ReadOptions::default())
}

/// Reads a whole stream, then its metadata.
///
/// # Errors
///
/// Along with the usual parsing errors, this fails with [`TiffError::Io`] if
/// the stream can't be read.
pub fn read_metadata_from(mut source: impl Read) -> TiffResult<Metadata> {
    let mut data = Vec::new();
    source.read_to_end(&mut data).map_err(|e| {
        log::error!("Failed to read the input stream! err: {e}");
        TiffError::from(e)
    })?;
    read_metadata(&data)
}

/// TIFF data that's parsed on first use, then cached.
///
/// Clones share the same cache.
#[derive(Clone, Debug)]
pub struct TiffSource {
    data: Arc<[u8]>,
    tiff_header_offset: usize,
    options: ReadOptions,
    state: Arc<RwLock<MaybeParsed>>,
}

/// Metadata that might have been parsed already.
///
/// This allows for caching metadata such that the data is not reprocessed
/// each additional time it's asked for.
#[derive(Clone, Debug)]
pub enum MaybeParsed {
    /// Nobody has asked yet.
    Raw,

    /// Parsed into its directories.
    ///
    /// `Parsed` metadata can be edited, and everyone holding it sees the
    /// edits.
    Parsed(Arc<RwLock<Metadata>>),

    /// Parsing failed. It won't be tried again.
    Failed(TiffError),
}

impl TiffSource {
    /// Wraps TIFF data whose header is at its first byte.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self::with_header_offset(data, 0)
    }

    /// Wraps data with a TIFF header at `tiff_header_offset`.
    pub fn with_header_offset(data: impl Into<Arc<[u8]>>, tiff_header_offset: usize) -> Self {
        Self {
            data: data.into(),
            tiff_header_offset,
            options: ReadOptions::default(),
            state: Arc::new(RwLock::new(MaybeParsed::Raw)),
        }
    }

    /// Wraps a JPEG `APP1` payload, skipping its `Exif\0\0` preamble (if it
    /// has one).
    pub fn from_exif_segment(segment: impl Into<Arc<[u8]>>) -> Self {
        let data: Arc<[u8]> = segment.into();
        let tiff_header_offset = if data.starts_with(EXIF_PREAMBLE) {
            log::trace!("Skipping the Exif preamble.");
            EXIF_PREAMBLE.len()
        } else {
            0
        };
        Self::with_header_offset(data, tiff_header_offset)
    }

    /// Changes how the data will be parsed.
    ///
    /// Has no effect once the metadata was parsed.
    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    /// The underlying data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn tiff_header_offset(&self) -> usize {
        self.tiff_header_offset
    }

    /// The cache, as-is.
    pub fn raw_state(&self) -> Arc<RwLock<MaybeParsed>> {
        Arc::clone(&self.state)
    }

    /// Parses the data, or returns what an earlier call parsed.
    ///
    /// # Errors
    ///
    /// Fails when the TIFF header is unusable. Problems past the header are
    /// recorded on the directories instead.
    pub fn metadata(&self) -> TiffResult<Arc<RwLock<Metadata>>> {
        // checked once with a read lock, then again under the write lock,
        // since another thread may have parsed in between
        match &*self.state.read() {
            MaybeParsed::Raw => (),
            MaybeParsed::Parsed(p) => {
                log::trace!("Cached metadata found! Returning...");
                return Ok(Arc::clone(p));
            }
            MaybeParsed::Failed(e) => return Err(e.clone()),
        }

        let locked = &mut *self.state.write();
        match locked {
            MaybeParsed::Raw => {
                match exif::parse(&self.data, self.tiff_header_offset, &self.options) {
                    Ok(metadata) => {
                        let wrapped = Arc::new(RwLock::new(metadata));
                        log::trace!("Completed TIFF parsing! Cached internally.");
                        *locked = MaybeParsed::Parsed(Arc::clone(&wrapped));
                        Ok(wrapped)
                    }
                    Err(e) => {
                        log::error!("Failed to parse TIFF metadata! err: {e}");
                        *locked = MaybeParsed::Failed(e.clone());
                        Err(e)
                    }
                }
            }

            MaybeParsed::Parsed(p) => Ok(Arc::clone(p)),
            MaybeParsed::Failed(e) => Err(e.clone()),
        }
    }
}

/// Internal utility methods.
pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
