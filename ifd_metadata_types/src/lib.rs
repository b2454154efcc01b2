//! # `ifd_metadata_types`
//!
//! Shared types for `ifd_metadata`: byte order, field types, rationals,
//! directory kinds, and the tag-name tables.

#![forbid(unsafe_code)]

pub mod exif;
