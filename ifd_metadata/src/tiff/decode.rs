//! Turns an entry's raw bytes into typed handler calls.

use super::handler::TiffHandler;
use crate::{
    error::ReaderResult,
    metadata::StringValue,
    reader::RandomAccessReader,
};
use ifd_metadata_types::exif::primitives::FieldType;

/// Decodes `count` components of `ty` at `offset` and passes them to the
/// matching setter.
///
/// A count of one gives a scalar. Anything else (zero included) gives an
/// array. Strings and `Undefined` bytes are always one value.
pub(super) fn store_value<H: TiffHandler + ?Sized>(
    handler: &mut H,
    reader: &RandomAccessReader<'_>,
    tag_id: u16,
    ty: FieldType,
    offset: usize,
    count: u32,
) -> ReaderResult<()> {
    let count = count as usize;
    log::trace!("Decoding tag `{tag_id:#06X}`: `{count}` x `{ty:?}` at `{offset}`.");

    match ty {
        FieldType::Undefined => {
            handler.set_byte_array(tag_id, reader.get_bytes(offset, count)?.to_vec());
        }
        FieldType::Ascii | FieldType::Utf8 => {
            let bytes = reader.get_null_terminated_bytes(offset, count)?;
            handler.set_string(tag_id, StringValue(bytes.to_vec()));
        }

        FieldType::Byte => match count {
            1 => handler.set_u8(tag_id, reader.get_u8(offset)?),
            _ => handler.set_u8_array(tag_id, reader.get_bytes(offset, count)?.to_vec()),
        },
        FieldType::SByte => match count {
            1 => handler.set_i8(tag_id, reader.get_i8(offset)?),
            _ => handler.set_i8_array(tag_id, read_array(offset, count, 1, |i| reader.get_i8(i))?),
        },
        FieldType::Short => match count {
            1 => handler.set_u16(tag_id, reader.get_u16(offset)?),
            _ => handler.set_u16_array(tag_id, read_array(offset, count, 2, |i| reader.get_u16(i))?),
        },
        FieldType::SShort => match count {
            1 => handler.set_i16(tag_id, reader.get_i16(offset)?),
            _ => handler.set_i16_array(tag_id, read_array(offset, count, 2, |i| reader.get_i16(i))?),
        },
        FieldType::Long => match count {
            1 => handler.set_u32(tag_id, reader.get_u32(offset)?),
            _ => handler.set_u32_array(tag_id, read_array(offset, count, 4, |i| reader.get_u32(i))?),
        },
        FieldType::SLong => match count {
            1 => handler.set_i32(tag_id, reader.get_i32(offset)?),
            _ => handler.set_i32_array(tag_id, read_array(offset, count, 4, |i| reader.get_i32(i))?),
        },
        FieldType::Float => match count {
            1 => handler.set_f32(tag_id, reader.get_f32(offset)?),
            _ => handler.set_f32_array(tag_id, read_array(offset, count, 4, |i| reader.get_f32(i))?),
        },
        FieldType::Double => match count {
            1 => handler.set_f64(tag_id, reader.get_f64(offset)?),
            _ => handler.set_f64_array(tag_id, read_array(offset, count, 8, |i| reader.get_f64(i))?),
        },
        FieldType::Rational => match count {
            1 => handler.set_rational(tag_id, reader.get_rational(offset)?),
            _ => handler.set_rational_array(
                tag_id,
                read_array(offset, count, 8, |i| reader.get_rational(i))?,
            ),
        },
        FieldType::SRational => match count {
            1 => handler.set_srational(tag_id, reader.get_srational(offset)?),
            _ => handler.set_srational_array(
                tag_id,
                read_array(offset, count, 8, |i| reader.get_srational(i))?,
            ),
        },
    }

    Ok(())
}

/// Reads `count` fixed-size components, one after another.
fn read_array<T>(
    offset: usize,
    count: usize,
    size: usize,
    read: impl Fn(usize) -> ReaderResult<T>,
) -> ReaderResult<Vec<T>> {
    (0..count).map(|i| read(offset + i * size)).collect()
}
