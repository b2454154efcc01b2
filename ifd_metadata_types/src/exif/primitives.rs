/// An enumeration of the field types an IFD entry may declare.
///
/// Used in each IFD entry, right after the tag ID.
#[repr(u16)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum FieldType {
    Byte = 1,
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
    SByte = 6,
    Undefined = 7,
    SShort = 8,
    SLong = 9,
    SRational = 10,
    Float = 11,
    Double = 12,

    /// Exif 3.0 introduced UTF-8 strings. It's treated exactly like `Ascii`.
    Utf8 = 129,
}

impl FieldType {
    /// Grabs the field type's component size in bytes.
    ///
    /// ```
    /// use ifd_metadata_types::exif::primitives::FieldType;
    ///
    /// let slong: FieldType = FieldType::SLong;
    /// assert_eq!(slong.size_bytes(), 4_u8);
    /// ```
    pub const fn size_bytes(&self) -> u8 {
        match self {
            FieldType::Byte
            | FieldType::Ascii
            | FieldType::SByte
            | FieldType::Undefined
            | FieldType::Utf8 => 1_u8,
            FieldType::Short | FieldType::SShort => 2_u8,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4_u8,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8_u8,
        }
    }

    /// Returns the raw code stored in an IFD entry.
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl TryFrom<u16> for FieldType {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Ascii),
            3 => Ok(Self::Short),
            4 => Ok(Self::Long),
            5 => Ok(Self::Rational),
            6 => Ok(Self::SByte),
            7 => Ok(Self::Undefined),
            8 => Ok(Self::SShort),
            9 => Ok(Self::SLong),
            10 => Ok(Self::SRational),
            11 => Ok(Self::Float),
            12 => Ok(Self::Double),
            129 => Ok(Self::Utf8),

            _ => Err(()),
        }
    }
}

/// A fraction that can't be negative.
///
/// Both the numerator (top number) and denominator (bottom number) are kept
/// exactly as stored. Nothing is divided until you ask for it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Divides the fraction.
    ///
    /// A zero denominator yields `0.0`.
    ///
    /// ```
    /// use ifd_metadata_types::exif::primitives::Rational;
    ///
    /// assert_eq!(Rational::new(1, 4).to_f64(), 0.25);
    /// assert_eq!(Rational::new(1, 0).to_f64(), 0.0);
    /// ```
    pub fn to_f64(&self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }

        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl core::fmt::Display for Rational {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A signed fraction.
///
/// Both the numerator (top number) and denominator (bottom number) can be
/// negative.
#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Divides the fraction. A zero denominator yields `0.0`.
    pub fn to_f64(&self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }

        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl core::fmt::Display for SRational {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
