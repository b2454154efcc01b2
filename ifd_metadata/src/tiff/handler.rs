use ifd_metadata_types::exif::primitives::{Rational, SRational};

use super::walker::IfdWalker;
use crate::{
    error::TiffResult,
    metadata::{StringValue, TagArray, TagValue},
    reader::RandomAccessReader,
};

/// Receives everything the [`IfdWalker`] finds.
///
/// The walker knows how IFDs are laid out, but not what any tag means. A
/// handler supplies the meaning: which tags point at sub-IFDs, which kind of
/// directory a sub-IFD becomes, and where decoded values end up.
///
/// # Directory protocol
///
/// The walker calls `enter_sub_ifd` or `enter_follower_ifd` right before it
/// starts on a new IFD, and `ending_ifd` once that IFD (and everything below
/// it) is done. Those calls always come in pairs.
///
/// # Values
///
/// Only [`TiffHandler::set_value`] is required. Each typed setter forwards to
/// it by default, so implementors override only the ones they care about.
pub trait TiffHandler {
    /// Receives the 16-bit marker following the byte order marker (`42` for
    /// plain TIFF).
    ///
    /// This is where the root directory gets entered. Returning an error
    /// stops the whole session.
    fn set_byte_order_marker(&mut self, marker: u16) -> TiffResult<()>;

    /// Whether `tag_id`, in the current directory, holds offsets to sub-IFDs.
    fn is_tag_ifd_pointer(&self, tag_id: u16) -> bool;

    /// Enters the directory a sub-IFD pointer leads to.
    ///
    /// Only called after [`TiffHandler::is_tag_ifd_pointer`] said yes.
    fn enter_sub_ifd(&mut self, tag_id: u16);

    /// Whether the current directory's "next IFD" pointer should be followed.
    fn has_follower_ifd(&self) -> bool;

    /// Enters the directory for the next IFD in the chain.
    fn enter_follower_ifd(&mut self);

    /// Leaves the current directory.
    fn ending_ifd(&mut self);

    /// Called once, after traversal.
    fn completed(&mut self, _reader: &RandomAccessReader<'_>, _tiff_header_offset: usize) {}

    /// Gives the handler a chance to process a tag itself.
    ///
    /// Returning `true` skips standard decoding for the tag. Handlers may
    /// recurse into nested IFDs with [`IfdWalker::visit`], which refuses
    /// IFDs that were already walked or that would nest too deeply.
    fn custom_process_tag(
        &mut self,
        _walker: &mut IfdWalker,
        _reader: &RandomAccessReader<'_>,
        _value_offset: usize,
        _tiff_header_offset: usize,
        _tag_id: u16,
        _byte_count: usize,
    ) -> bool {
        false
    }

    /// Asked for the byte length of an entry using a non-standard field type.
    ///
    /// `None` skips the entry with a warning.
    fn try_custom_process_format(
        &mut self,
        _tag_id: u16,
        _format_code: u16,
        _component_count: u32,
    ) -> Option<usize> {
        None
    }

    /// Records a recoverable problem.
    fn warn(&mut self, message: &str);

    /// Records a problem that lost data.
    fn error(&mut self, message: &str);

    /// Stores an already-decoded value.
    fn set_value(&mut self, tag_id: u16, value: TagValue);

    fn set_i8(&mut self, tag_id: u16, value: i8) {
        self.set_value(tag_id, TagValue::I8(value));
    }

    fn set_i8_array(&mut self, tag_id: u16, values: Vec<i8>) {
        self.set_value(tag_id, TagValue::Array(TagArray::I8(values)));
    }

    fn set_u8(&mut self, tag_id: u16, value: u8) {
        self.set_value(tag_id, TagValue::U8(value));
    }

    fn set_u8_array(&mut self, tag_id: u16, values: Vec<u8>) {
        self.set_value(tag_id, TagValue::Array(TagArray::U8(values)));
    }

    fn set_i16(&mut self, tag_id: u16, value: i16) {
        self.set_value(tag_id, TagValue::I16(value));
    }

    fn set_i16_array(&mut self, tag_id: u16, values: Vec<i16>) {
        self.set_value(tag_id, TagValue::Array(TagArray::I16(values)));
    }

    fn set_u16(&mut self, tag_id: u16, value: u16) {
        self.set_value(tag_id, TagValue::U16(value));
    }

    fn set_u16_array(&mut self, tag_id: u16, values: Vec<u16>) {
        self.set_value(tag_id, TagValue::Array(TagArray::U16(values)));
    }

    fn set_i32(&mut self, tag_id: u16, value: i32) {
        self.set_value(tag_id, TagValue::I32(value));
    }

    fn set_i32_array(&mut self, tag_id: u16, values: Vec<i32>) {
        self.set_value(tag_id, TagValue::Array(TagArray::I32(values)));
    }

    fn set_u32(&mut self, tag_id: u16, value: u32) {
        self.set_value(tag_id, TagValue::U32(value));
    }

    fn set_u32_array(&mut self, tag_id: u16, values: Vec<u32>) {
        self.set_value(tag_id, TagValue::Array(TagArray::U32(values)));
    }

    fn set_f32(&mut self, tag_id: u16, value: f32) {
        self.set_value(tag_id, TagValue::F32(value));
    }

    fn set_f32_array(&mut self, tag_id: u16, values: Vec<f32>) {
        self.set_value(tag_id, TagValue::Array(TagArray::F32(values)));
    }

    fn set_f64(&mut self, tag_id: u16, value: f64) {
        self.set_value(tag_id, TagValue::F64(value));
    }

    fn set_f64_array(&mut self, tag_id: u16, values: Vec<f64>) {
        self.set_value(tag_id, TagValue::Array(TagArray::F64(values)));
    }

    fn set_rational(&mut self, tag_id: u16, value: Rational) {
        self.set_value(tag_id, TagValue::Rational(value));
    }

    fn set_rational_array(&mut self, tag_id: u16, values: Vec<Rational>) {
        self.set_value(tag_id, TagValue::Array(TagArray::Rational(values)));
    }

    fn set_srational(&mut self, tag_id: u16, value: SRational) {
        self.set_value(tag_id, TagValue::SRational(value));
    }

    fn set_srational_array(&mut self, tag_id: u16, values: Vec<SRational>) {
        self.set_value(tag_id, TagValue::Array(TagArray::SRational(values)));
    }

    fn set_string(&mut self, tag_id: u16, value: StringValue) {
        self.set_value(tag_id, TagValue::String(value));
    }

    fn set_byte_array(&mut self, tag_id: u16, bytes: Vec<u8>) {
        self.set_value(tag_id, TagValue::Bytes(bytes));
    }
}
