//! Decoded tag values.
//!
//! Every value is stored exactly as decoded. Nothing is re-interpreted, and
//! rationals are never divided until asked.

use ifd_metadata_types::exif::primitives::{Rational, SRational};

/// One tag's value, already decoded from its field type.
#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
    Rational(Rational),
    SRational(SRational),

    /// An ASCII (or UTF-8) string.
    String(StringValue),

    /// Opaque bytes, from the `Undefined` field type.
    Bytes(Vec<u8>),

    /// A homogeneous list of scalars.
    Array(TagArray),

    /// A value a handler assembled itself, rather than one decoded from a
    /// single field.
    Object(ObjectValue),
}

/// A homogeneous list of scalars.
#[derive(Clone, Debug, PartialEq)]
pub enum TagArray {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Rational(Vec<Rational>),
    SRational(Vec<SRational>),
}

impl TagArray {
    pub fn len(&self) -> usize {
        match self {
            TagArray::I8(v) => v.len(),
            TagArray::U8(v) => v.len(),
            TagArray::I16(v) => v.len(),
            TagArray::U16(v) => v.len(),
            TagArray::I32(v) => v.len(),
            TagArray::U32(v) => v.len(),
            TagArray::F32(v) => v.len(),
            TagArray::F64(v) => v.len(),
            TagArray::Rational(v) => v.len(),
            TagArray::SRational(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// String bytes, kept raw.
///
/// Exif says ASCII, but cameras write Latin-1, Shift-JIS, and worse. We hold
/// onto the original bytes (up to the first NUL) and decode lossily on
/// request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringValue(pub Vec<u8>);

impl StringValue {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decodes as UTF-8, replacing anything invalid.
    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl core::fmt::Display for StringValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

/// Values built by handlers out of several fields.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectValue {
    /// Thumbnail bytes resolved after traversal.
    Thumbnail(Thumbnail),
}

/// An embedded thumbnail image (usually a JPEG).
#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    /// Absolute index of the first thumbnail byte in the original data.
    pub offset: usize,

    /// The thumbnail itself.
    pub data: Vec<u8>,
}

impl TagValue {
    /// Reads an unsigned integer, widening as needed.
    ///
    /// Single-element arrays are accepted since some writers store scalars
    /// that way. Negative numbers give `None`.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TagValue::U8(v) => Some(u32::from(*v)),
            TagValue::U16(v) => Some(u32::from(*v)),
            TagValue::U32(v) => Some(*v),
            TagValue::I8(v) => u32::try_from(*v).ok(),
            TagValue::I16(v) => u32::try_from(*v).ok(),
            TagValue::I32(v) => u32::try_from(*v).ok(),
            TagValue::Array(TagArray::U8(v)) if v.len() == 1 => Some(u32::from(v[0])),
            TagValue::Array(TagArray::U16(v)) if v.len() == 1 => Some(u32::from(v[0])),
            TagValue::Array(TagArray::U32(v)) if v.len() == 1 => Some(v[0]),
            _ => None,
        }
    }

    /// Reads any integer as an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::I8(v) => Some(i64::from(*v)),
            TagValue::U8(v) => Some(i64::from(*v)),
            TagValue::I16(v) => Some(i64::from(*v)),
            TagValue::U16(v) => Some(i64::from(*v)),
            TagValue::I32(v) => Some(i64::from(*v)),
            TagValue::U32(v) => Some(i64::from(*v)),
            _ => self.as_u32().map(i64::from),
        }
    }

    /// Reads any number as an `f64`.
    ///
    /// Rationals are divided here. A zero denominator gives `0.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::F32(v) => Some(f64::from(*v)),
            TagValue::F64(v) => Some(*v),
            TagValue::Rational(r) => Some(r.to_f64()),
            TagValue::SRational(r) => Some(r.to_f64()),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Returns the string bytes, if this is a string.
    pub fn as_string(&self) -> Option<&StringValue> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns raw bytes for `Undefined` values and byte arrays.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TagValue::Bytes(b) => Some(b),
            TagValue::Array(TagArray::U8(b)) => Some(b),
            TagValue::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Returns the thumbnail, if this is one.
    pub fn as_thumbnail(&self) -> Option<&Thumbnail> {
        match self {
            TagValue::Object(ObjectValue::Thumbnail(t)) => Some(t),
            _ => None,
        }
    }
}

impl core::fmt::Display for TagValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TagValue::I8(v) => write!(f, "{v}"),
            TagValue::U8(v) => write!(f, "{v}"),
            TagValue::I16(v) => write!(f, "{v}"),
            TagValue::U16(v) => write!(f, "{v}"),
            TagValue::I32(v) => write!(f, "{v}"),
            TagValue::U32(v) => write!(f, "{v}"),
            TagValue::F32(v) => write!(f, "{v}"),
            TagValue::F64(v) => write!(f, "{v}"),
            TagValue::Rational(v) => write!(f, "{v}"),
            TagValue::SRational(v) => write!(f, "{v}"),
            TagValue::String(s) => write!(f, "{s}"),
            TagValue::Bytes(b) => write!(f, "[{} bytes]", b.len()),
            TagValue::Array(a) => write!(f, "[{} values]", a.len()),
            TagValue::Object(ObjectValue::Thumbnail(t)) => {
                write!(f, "[thumbnail: {} bytes]", t.data.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StringValue, TagArray, TagValue};
    use ifd_metadata_types::exif::primitives::{Rational, SRational};

    #[test]
    fn numeric_conversions() {
        assert_eq!(TagValue::U16(123).as_u32(), Some(123));
        assert_eq!(TagValue::I16(-1).as_u32(), None);
        assert_eq!(TagValue::I16(-1).as_i64(), Some(-1));
        assert_eq!(TagValue::Array(TagArray::U16(vec![7])).as_u32(), Some(7));
        assert_eq!(TagValue::Array(TagArray::U16(vec![7, 8])).as_u32(), None);
        assert_eq!(TagValue::Rational(Rational::new(1, 2)).as_f64(), Some(0.5));
    }

    #[test]
    fn zero_denominator_converts_to_zero() {
        assert_eq!(TagValue::Rational(Rational::new(9, 0)).as_f64(), Some(0.0));
        assert_eq!(TagValue::SRational(SRational::new(-9, 0)).as_f64(), Some(0.0));
    }

    #[test]
    fn strings_decode_lossily() {
        let value = StringValue(vec![b'a', 0xFF, b'b']);
        assert_eq!(value.to_string_lossy(), "a\u{FFFD}b");
        assert_eq!(TagValue::String(StringValue::from("hi")).to_string(), "hi");
    }
}
