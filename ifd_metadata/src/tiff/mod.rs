//! The TIFF/IFD traversal engine.
//!
//! TIFF is the container Exif lives in. It's a tree of IFDs (Image File
//! Directories): each IFD is a list of tagged entries, some of which point at
//! further IFDs, and each IFD may name a "follower" IFD after it.
//!
//! This module only knows the layout. What each tag *means* is up to a
//! [`TiffHandler`], which also decides where decoded values go. The engine
//! never fails once the header is read: bad entries and bad offsets are
//! reported to the handler, and traversal carries on with whatever's left.

use crate::{
    error::{TiffError, TiffResult},
    reader::{RandomAccessReader, SequentialReader},
};
use ifd_metadata_types::exif::Endianness;

mod decode;
pub mod handler;
pub mod walker;

pub use handler::TiffHandler;
pub use walker::IfdWalker;

/// How many IFDs a session walks by default.
pub const DEFAULT_MAX_IFDS: usize = 512;

/// How deeply IFDs may nest by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs for one parsing session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReadOptions {
    /// The most IFDs a session will walk.
    ///
    /// Cycle detection already stops loops. This keeps files with thousands
    /// of distinct (but bogus) IFD offsets from taking forever.
    pub max_ifds: usize,

    /// The most sub-IFDs (and makernotes) that may be nested inside each
    /// other, counting the root. Follower chains don't nest.
    pub max_depth: usize,

    /// Whether the Exif handler copies out thumbnail bytes once traversal is
    /// done.
    pub store_thumbnail_bytes: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_ifds: DEFAULT_MAX_IFDS,
            max_depth: DEFAULT_MAX_DEPTH,
            store_thumbnail_bytes: true,
        }
    }
}

impl ReadOptions {
    pub const fn with_max_ifds(mut self, max_ifds: usize) -> Self {
        self.max_ifds = max_ifds;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_thumbnail_bytes(mut self, store_thumbnail_bytes: bool) -> Self {
        self.store_thumbnail_bytes = store_thumbnail_bytes;
        self
    }
}

/// Walks the TIFF structure starting at `tiff_header_offset` in `data`.
///
/// The header is `II`/`MM`, a 16-bit marker, and the offset of the first IFD.
/// All offsets in the structure are relative to `tiff_header_offset`.
///
/// Only a broken header gives an `Err`. Everything after that is recorded on
/// the handler, and the handler's [`TiffHandler::completed`] is always called.
pub fn process_tiff<H: TiffHandler + ?Sized>(
    data: &[u8],
    handler: &mut H,
    tiff_header_offset: usize,
    options: &ReadOptions,
) -> TiffResult<()> {
    let header_bytes = data.get(tiff_header_offset..).unwrap_or_default();
    let mut header = SequentialReader::new(header_bytes, Endianness::Little);

    let endianness = parse_byte_order(&mut header)?;
    header.set_endianness(endianness);

    let marker = header.get_u16().map_err(|e| {
        log::error!("Didn't find a TIFF marker! err: {e}");
        TiffError::TruncatedHeader(e)
    })?;
    let first_ifd = header.get_u32().map_err(|e| {
        log::error!("Didn't find the first IFD offset! err: {e}");
        TiffError::TruncatedHeader(e)
    })?;
    log::trace!("TIFF header: `{endianness:?}`, marker `{marker:#06X}`, first IFD at `{first_ifd}`");

    // this is where the handler enters its root directory
    handler.set_byte_order_marker(marker)?;

    let reader = RandomAccessReader::new(data, endianness);
    let mut first_ifd_offset = tiff_header_offset.saturating_add(first_ifd as usize);
    if first_ifd_offset >= reader.len().saturating_sub(1) {
        handler.warn(
            "First IFD offset is beyond the end of the TIFF data segment. Trying the default offset.",
        );
        first_ifd_offset = tiff_header_offset + 8;
    }

    let mut walker = IfdWalker::new(options);
    if !walker.visit(handler, reader, first_ifd_offset, tiff_header_offset, |_| ()) {
        log::trace!("There's no room for the first IFD. Assuming there are zero IFDs.");
        handler.ending_ifd();
    }

    log::debug!("Walked `{}` IFD(s).", walker.processed_count());
    handler.completed(&reader, tiff_header_offset);
    Ok(())
}

/// Reads the byte order marker.
fn parse_byte_order(header: &mut SequentialReader<'_>) -> TiffResult<Endianness> {
    let len = header.remaining();
    let bom: [u8; 2] = header
        .get_bytes(2)
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            log::error!("Couldn't find endianness marker!");
            TiffError::NoByteOrderMarker { len }
        })?;

    Endianness::from_marker(bom)
        .inspect(|e| log::trace!("Found byte order: {e:?}"))
        .ok_or_else(|| {
            let e = TiffError::WeirdByteOrderMarker { found: bom };
            log::error!("Couldn't read the TIFF header! err: {e}");
            e
        })
}
