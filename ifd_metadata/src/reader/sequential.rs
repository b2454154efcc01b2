use winnow::{
    Parser as _,
    binary,
    error::EmptyError,
    token::take,
};

use super::winnow_endianness;
use crate::error::{ReaderError, ReaderResult};
use ifd_metadata_types::exif::{
    Endianness,
    primitives::{Rational, SRational},
};

/// A forward-only reader.
///
/// Each read consumes bytes from the front of the remaining input.
#[derive(Clone, Debug)]
pub struct SequentialReader<'a> {
    input: &'a [u8],
    position: usize,
    len: usize,
    endianness: Endianness,
}

impl<'a> SequentialReader<'a> {
    pub const fn new(input: &'a [u8], endianness: Endianness) -> Self {
        Self {
            input,
            position: 0,
            len: input.len(),
            endianness,
        }
    }

    pub const fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Changes the byte order for all following reads.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// How many bytes were consumed so far.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// How many bytes are left.
    pub const fn remaining(&self) -> usize {
        self.input.len()
    }

    fn out_of_bounds(&self, bytes: usize) -> ReaderError {
        ReaderError::OutOfBounds {
            index: self.position,
            bytes,
            len: self.len,
        }
    }

    /// Moves past `count` bytes without looking at them.
    pub fn skip(&mut self, count: usize) -> ReaderResult<()> {
        self.get_bytes(count).map(|_| ())
    }

    pub fn get_bytes(&mut self, count: usize) -> ReaderResult<&'a [u8]> {
        let bytes = take(count)
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(count))?;
        self.position += count;
        Ok(bytes)
    }

    pub fn get_u8(&mut self) -> ReaderResult<u8> {
        let value = binary::u8
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(1))?;
        self.position += 1;
        Ok(value)
    }

    pub fn get_i8(&mut self) -> ReaderResult<i8> {
        let value = binary::i8
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(1))?;
        self.position += 1;
        Ok(value)
    }

    pub fn get_u16(&mut self) -> ReaderResult<u16> {
        let value = binary::u16(winnow_endianness(self.endianness))
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(2))?;
        self.position += 2;
        Ok(value)
    }

    pub fn get_i16(&mut self) -> ReaderResult<i16> {
        let value = binary::i16(winnow_endianness(self.endianness))
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(2))?;
        self.position += 2;
        Ok(value)
    }

    pub fn get_u32(&mut self) -> ReaderResult<u32> {
        let value = binary::u32(winnow_endianness(self.endianness))
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(4))?;
        self.position += 4;
        Ok(value)
    }

    pub fn get_i32(&mut self) -> ReaderResult<i32> {
        let value = binary::i32(winnow_endianness(self.endianness))
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(4))?;
        self.position += 4;
        Ok(value)
    }

    pub fn get_f32(&mut self) -> ReaderResult<f32> {
        let value = binary::f32(winnow_endianness(self.endianness))
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(4))?;
        self.position += 4;
        Ok(value)
    }

    pub fn get_f64(&mut self) -> ReaderResult<f64> {
        let value = binary::f64(winnow_endianness(self.endianness))
            .parse_next(&mut self.input)
            .map_err(|_: EmptyError| self.out_of_bounds(8))?;
        self.position += 8;
        Ok(value)
    }

    /// Reads an unsigned numerator, then an unsigned denominator.
    ///
    /// Nothing is consumed unless both fit.
    pub fn get_rational(&mut self) -> ReaderResult<Rational> {
        let endianness = winnow_endianness(self.endianness);
        let mut pair = self.get_bytes(8)?;
        let (numerator, denominator) = (binary::u32(endianness), binary::u32(endianness))
            .parse_next(&mut pair)
            .map_err(|_: EmptyError| self.out_of_bounds(8))?;
        Ok(Rational {
            numerator,
            denominator,
        })
    }

    /// Reads a signed numerator, then a signed denominator.
    ///
    /// Nothing is consumed unless both fit.
    pub fn get_srational(&mut self) -> ReaderResult<SRational> {
        let endianness = winnow_endianness(self.endianness);
        let mut pair = self.get_bytes(8)?;
        let (numerator, denominator) = (binary::i32(endianness), binary::i32(endianness))
            .parse_next(&mut pair)
            .map_err(|_: EmptyError| self.out_of_bounds(8))?;
        Ok(SRational {
            numerator,
            denominator,
        })
    }
}
