//! Contains stuff related to IFDs.
//!
//! For more info, see the [`DirectoryKind`] enumeration.

/// The kind of logical directory an IFD was decoded into.
///
/// IFDs aren't self-describing in their type. Instead, IFD 0 will
/// (optionally) contain keys indicating the locations of sub-IFDs within the
/// metadata slice. These are like pointers, not direct embeds. The pointer
/// used to reach an IFD decides its kind.
///
/// Several directories of the same kind may exist in one parse. For example,
/// a CR2 file chains three thumbnail IFDs together.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum DirectoryKind {
    /// Refers to "IFD 0", the first IFD in the chain.
    ///
    /// This one stems from TIFF. Exif matches the TIFF v6.0 (1992)
    /// specification with the provided keys in this group.
    #[doc(alias = "IFD0")]
    #[doc(alias = "TIFF")]
    Ifd0,

    /// The "Exif" IFD provides camera-based metadata.
    ///
    /// For example, it's home to important values like exposure information.
    #[doc(alias = "ExifIFD")]
    #[doc(alias = "SubIFD")]
    Exif,

    /// The GPS IFD contains location metadata.
    #[doc(alias = "GPSIFD")]
    Gps,

    /// The interoperability IFD specifies info about what software was used to
    /// write the Exif metadata.
    #[doc(alias = "InteropIFD")]
    Interop,

    /// IFD 1 in JPEG Exif, describing the embedded thumbnail.
    #[doc(alias = "IFD1")]
    Thumbnail,

    /// An additional image: either a `SubIFDs` entry or the next page of a
    /// multi-page TIFF.
    Image,

    /// IFD 0 of a Panasonic RW2 file.
    PanasonicRawIfd0,

    OlympusMakernote,
    OlympusEquipment,
    OlympusCameraSettings,
    OlympusRawDevelopment,
    OlympusRawDevelopment2,
    OlympusImageProcessing,
    OlympusFocusInfo,
    OlympusRawInfo,
    NikonType1Makernote,
    NikonType2Makernote,
    SonyType1Makernote,
    SonyType6Makernote,
    SigmaMakernote,
    CanonMakernote,
    CasioType1Makernote,
    CasioType2Makernote,
    FujifilmMakernote,
    KyoceraMakernote,
    LeicaMakernote,
    LeicaType5Makernote,
    PanasonicMakernote,
    PentaxMakernote,
    SanyoMakernote,
    RicohMakernote,
    AppleMakernote,
    SamsungType2Makernote,

    /// Collects diagnostics and values that arrived while no directory was
    /// active.
    Error,
}

impl DirectoryKind {
    /// A human-readable name for the directory kind.
    ///
    /// ```
    /// use ifd_metadata_types::exif::ifd::DirectoryKind;
    ///
    /// assert_eq!(DirectoryKind::Gps.name(), "GPS");
    /// ```
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ifd0 => "Exif IFD0",
            Self::Exif => "Exif SubIFD",
            Self::Gps => "GPS",
            Self::Interop => "Interoperability",
            Self::Thumbnail => "Exif Thumbnail",
            Self::Image => "Exif Image",
            Self::PanasonicRawIfd0 => "PanasonicRaw Exif IFD0",
            Self::OlympusMakernote => "Olympus Makernote",
            Self::OlympusEquipment => "Olympus Equipment",
            Self::OlympusCameraSettings => "Olympus Camera Settings",
            Self::OlympusRawDevelopment => "Olympus Raw Development",
            Self::OlympusRawDevelopment2 => "Olympus Raw Development 2",
            Self::OlympusImageProcessing => "Olympus Image Processing",
            Self::OlympusFocusInfo => "Olympus Focus Info",
            Self::OlympusRawInfo => "Olympus Raw Info",
            Self::NikonType1Makernote => "Nikon Makernote",
            Self::NikonType2Makernote => "Nikon Makernote",
            Self::SonyType1Makernote => "Sony Makernote",
            Self::SonyType6Makernote => "Sony Makernote",
            Self::SigmaMakernote => "Sigma Makernote",
            Self::CanonMakernote => "Canon Makernote",
            Self::CasioType1Makernote => "Casio Makernote",
            Self::CasioType2Makernote => "Casio Makernote",
            Self::FujifilmMakernote => "Fujifilm Makernote",
            Self::KyoceraMakernote => "Kyocera/Contax Makernote",
            Self::LeicaMakernote => "Leica Makernote",
            Self::LeicaType5Makernote => "Leica Makernote",
            Self::PanasonicMakernote => "Panasonic Makernote",
            Self::PentaxMakernote => "Pentax Makernote",
            Self::SanyoMakernote => "Sanyo Makernote",
            Self::RicohMakernote => "Ricoh Makernote",
            Self::AppleMakernote => "Apple Makernote",
            Self::SamsungType2Makernote => "Samsung Makernote",
            Self::Error => "Error",
        }
    }

    /// Whether this directory kind holds a camera maker's proprietary data.
    pub const fn is_makernote(&self) -> bool {
        !matches!(
            self,
            Self::Ifd0
                | Self::Exif
                | Self::Gps
                | Self::Interop
                | Self::Thumbnail
                | Self::Image
                | Self::PanasonicRawIfd0
                | Self::Error
        )
    }

    /// Whether this kind can start an Exif chain (i.e. it's an IFD 0).
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Ifd0 | Self::PanasonicRawIfd0)
    }
}

impl core::fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
