//! Exif is a media metadata format primarily used by cameras.
//!
//! It's stored as a TIFF structure, so the [`crate::tiff`] engine does the
//! walking. This module gives that structure meaning: which pointer tags lead
//! to the Exif, GPS, and Interop IFDs, how the IFD chain splits into images
//! and thumbnails, and how each camera maker's makernote is laid out.
//!
//! Makernotes are proprietary blobs. The ones recognized by a
//! [`MakernoteRegistry`] are walked like any other IFD. The rest are kept as
//! raw bytes.

use crate::{
    error::TiffResult,
    metadata::Metadata,
    tiff::{ReadOptions, process_tiff},
};

mod handler;
pub mod makernote;

pub use handler::{
    ExifTiffHandler, OLYMPUS_RAW_TIFF_MARKER, OLYMPUS_RAW_TIFF_MARKER_2,
    PANASONIC_RAW_TIFF_MARKER, STANDARD_TIFF_MARKER,
};
pub use makernote::{MakernoteFormat, MakernoteLayout, MakernoteProbe, MakernoteRegistry};

/// Reads every directory out of TIFF data whose header starts at
/// `tiff_header_offset`.
pub fn parse(data: &[u8], tiff_header_offset: usize, options: &ReadOptions) -> TiffResult<Metadata> {
    let mut handler = ExifTiffHandler::new(options);
    process_tiff(data, &mut handler, tiff_header_offset, options)?;
    Ok(handler.into_metadata())
}
