//! Byte readers that know about endianness.
//!
//! Two flavors are provided:
//!
//! - [`RandomAccessReader`]: reads at absolute indices. This is what the IFD
//!   walker uses, since IFDs point all over the place.
//! - [`SequentialReader`]: a forward-only cursor, handy for headers.
//!
//! Both are bounds-checked. An out-of-range read returns
//! [`ReaderError::OutOfBounds`] rather than panicking.

use winnow::{
    Parser as _,
    binary::{self, Endianness as WinnowEndianness},
    error::EmptyError,
};

use crate::error::{ReaderError, ReaderResult};
use ifd_metadata_types::exif::{
    Endianness,
    primitives::{Rational, SRational},
};

mod sequential;

pub use sequential::SequentialReader;

/// Converts our endianness into the one `winnow` uses.
pub(crate) const fn winnow_endianness(endianness: Endianness) -> WinnowEndianness {
    match endianness {
        Endianness::Little => WinnowEndianness::Little,
        Endianness::Big => WinnowEndianness::Big,
    }
}

/// A reader over a byte slice, reading at absolute indices.
///
/// This type is `Copy`: "changing" the byte order creates a new view with
/// [`RandomAccessReader::with_endianness`] and leaves the original alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomAccessReader<'a> {
    data: &'a [u8],
    endianness: Endianness,
}

impl<'a> RandomAccessReader<'a> {
    pub const fn new(data: &'a [u8], endianness: Endianness) -> Self {
        Self { data, endianness }
    }

    /// The byte order used for multi-byte reads.
    pub const fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Returns a view of the same data with another byte order.
    pub const fn with_endianness(&self, endianness: Endianness) -> Self {
        Self {
            data: self.data,
            endianness,
        }
    }

    /// The total length of the underlying data.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The full underlying slice.
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Checks whether `bytes` bytes can be read starting at `index`.
    pub fn is_valid_index(&self, index: usize, bytes: usize) -> bool {
        index
            .checked_add(bytes)
            .is_some_and(|end| end <= self.data.len())
    }

    /// Grabs `bytes` bytes at `index` or reports how the read went wrong.
    fn window(&self, index: usize, bytes: usize) -> ReaderResult<&'a [u8]> {
        index
            .checked_add(bytes)
            .and_then(|end| self.data.get(index..end))
            .ok_or(ReaderError::OutOfBounds {
                index,
                bytes,
                len: self.data.len(),
            })
    }

    fn out_of_bounds(&self, index: usize, bytes: usize) -> ReaderError {
        ReaderError::OutOfBounds {
            index,
            bytes,
            len: self.data.len(),
        }
    }

    pub fn get_u8(&self, index: usize) -> ReaderResult<u8> {
        let mut input = self.window(index, 1)?;
        binary::u8
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 1))
    }

    pub fn get_i8(&self, index: usize) -> ReaderResult<i8> {
        let mut input = self.window(index, 1)?;
        binary::i8
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 1))
    }

    pub fn get_u16(&self, index: usize) -> ReaderResult<u16> {
        let mut input = self.window(index, 2)?;
        binary::u16(winnow_endianness(self.endianness))
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 2))
    }

    pub fn get_i16(&self, index: usize) -> ReaderResult<i16> {
        let mut input = self.window(index, 2)?;
        binary::i16(winnow_endianness(self.endianness))
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 2))
    }

    pub fn get_u32(&self, index: usize) -> ReaderResult<u32> {
        let mut input = self.window(index, 4)?;
        binary::u32(winnow_endianness(self.endianness))
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 4))
    }

    pub fn get_i32(&self, index: usize) -> ReaderResult<i32> {
        let mut input = self.window(index, 4)?;
        binary::i32(winnow_endianness(self.endianness))
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 4))
    }

    pub fn get_f32(&self, index: usize) -> ReaderResult<f32> {
        let mut input = self.window(index, 4)?;
        binary::f32(winnow_endianness(self.endianness))
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 4))
    }

    pub fn get_f64(&self, index: usize) -> ReaderResult<f64> {
        let mut input = self.window(index, 8)?;
        binary::f64(winnow_endianness(self.endianness))
            .parse_next(&mut input)
            .map_err(|_: EmptyError| self.out_of_bounds(index, 8))
    }

    /// Reads an unsigned numerator, then an unsigned denominator.
    pub fn get_rational(&self, index: usize) -> ReaderResult<Rational> {
        Ok(Rational {
            numerator: self.get_u32(index)?,
            denominator: self.get_u32(index.saturating_add(4))?,
        })
    }

    /// Reads a signed numerator, then a signed denominator.
    pub fn get_srational(&self, index: usize) -> ReaderResult<SRational> {
        Ok(SRational {
            numerator: self.get_i32(index)?,
            denominator: self.get_i32(index.saturating_add(4))?,
        })
    }

    /// Borrows `count` raw bytes starting at `index`.
    pub fn get_bytes(&self, index: usize, count: usize) -> ReaderResult<&'a [u8]> {
        self.window(index, count)
    }

    /// Borrows up to `max_len` bytes at `index`, stopping before the first
    /// NUL byte.
    pub fn get_null_terminated_bytes(&self, index: usize, max_len: usize) -> ReaderResult<&'a [u8]> {
        let bytes = self.window(index, max_len)?;
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        Ok(&bytes[..end])
    }

    /// Checks whether the data at `index` starts with `prefix`.
    ///
    /// Running out of data counts as "no".
    pub fn starts_with(&self, index: usize, prefix: &[u8]) -> bool {
        self.window(index, prefix.len())
            .is_ok_and(|bytes| bytes == prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomAccessReader;
    use crate::{error::ReaderError, util::logger};
    use ifd_metadata_types::exif::{Endianness, primitives::Rational};

    #[test]
    fn reads_respect_endianness() {
        logger();

        let data = [0x12_u8, 0x34, 0x56, 0x78];
        let le = RandomAccessReader::new(&data, Endianness::Little);
        let be = le.with_endianness(Endianness::Big);

        assert_eq!(le.get_u16(0), Ok(0x3412));
        assert_eq!(be.get_u16(0), Ok(0x1234));
        assert_eq!(le.get_u32(0), Ok(0x7856_3412));
        assert_eq!(be.get_u32(0), Ok(0x1234_5678));

        // the original view is untouched
        assert_eq!(le.endianness(), Endianness::Little);
    }

    #[test]
    fn signed_and_float_reads() {
        logger();

        let mut data = Vec::new();
        data.extend_from_slice((-2_i16).to_be_bytes().as_slice());
        data.extend_from_slice((-70_000_i32).to_be_bytes().as_slice());
        data.extend_from_slice(1.5_f32.to_be_bytes().as_slice());
        data.extend_from_slice((-0.25_f64).to_be_bytes().as_slice());
        data.push(0xFF);

        let reader = RandomAccessReader::new(&data, Endianness::Big);
        assert_eq!(reader.get_i16(0), Ok(-2));
        assert_eq!(reader.get_i32(2), Ok(-70_000));
        assert_eq!(reader.get_f32(6), Ok(1.5));
        assert_eq!(reader.get_f64(10), Ok(-0.25));
        assert_eq!(reader.get_i8(18), Ok(-1));
        assert_eq!(reader.get_u8(18), Ok(255));
    }

    #[test]
    fn out_of_bounds_reads_are_errors() {
        logger();

        let data = [1_u8, 2, 3];
        let reader = RandomAccessReader::new(&data, Endianness::Little);

        assert_eq!(
            reader.get_u32(0),
            Err(ReaderError::OutOfBounds {
                index: 0,
                bytes: 4,
                len: 3
            })
        );
        assert!(reader.get_u8(3).is_err());
        assert!(reader.get_bytes(usize::MAX, 2).is_err(), "overflow must not panic");
        assert!(!reader.is_valid_index(2, 2));
        assert!(reader.is_valid_index(1, 2));
    }

    #[test]
    fn rationals_stay_undivided() {
        logger();

        let mut data = Vec::new();
        data.extend_from_slice(3_u32.to_le_bytes().as_slice());
        data.extend_from_slice(0_u32.to_le_bytes().as_slice());

        let reader = RandomAccessReader::new(&data, Endianness::Little);
        let rational = reader.get_rational(0).unwrap();
        assert_eq!(rational, Rational::new(3, 0));
        assert_eq!(rational.to_f64(), 0.0);
    }

    #[test]
    fn null_terminated_bytes_stop_at_nul() {
        logger();

        let data = b"Canon\0\0\0junk";
        let reader = RandomAccessReader::new(data, Endianness::Little);

        assert_eq!(reader.get_null_terminated_bytes(0, 8), Ok(b"Canon".as_slice()));
        assert_eq!(reader.get_null_terminated_bytes(8, 4), Ok(b"junk".as_slice()));
        assert!(reader.starts_with(0, b"Can"));
        assert!(!reader.starts_with(10, b"junk"));
    }
}
