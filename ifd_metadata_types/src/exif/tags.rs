//! Definitions for tags in each directory kind.
//!
//! # `tags`
//!
//! Each module below (`ifd0`, `exif`, `gps`, ...) exposes the tag IDs of one
//! directory kind as constants, plus a private table of their names.
//!
//! ## What's this for?
//!
//! The constants are used by handlers to route pointer tags and makernotes.
//! The names are purely a presentation concern: the IFD walker never looks at
//! them. Use [`tag_name`] to find one.
//!
//! ## For contributors
//!
//! To add a tag, add a line to the matching `make_tag_table!` call:
//!
//! ```no_compile
//! make_tag_table!(mod not_real => [DirectoryKind::NotReal],
//!     // ...snip!
//!     YOUR_NEW_KEY = 0x03E8 => "Your New Key",
//! );
//! ```
//!
//! To add a table, create a new `make_tag_table!` call and list it in
//! [`TAG_NAMES`].

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::exif::ifd::DirectoryKind;

/// Creates a module of tag constants for one or more directory kinds.
///
/// These may include duplicate tag IDs from other tables.
macro_rules! make_tag_table {
    (mod $mod_name:ident => [$($kind:expr),+ $(,)?],
        $( $const_ident:ident = $tag:expr => $name:expr, )+
    ) => {
        #[doc = concat!("Tag IDs found in the `", stringify!($mod_name), "` table.")]
        pub mod $mod_name {
            #[allow(unused_imports)]
            use crate::exif::ifd::DirectoryKind;

            $(
                #[doc = $name]
                pub const $const_ident: u16 = $tag;
            )+

            /// Every directory kind this table names tags for.
            pub(super) const KINDS: &[DirectoryKind] = &[$($kind),+];

            /// `(tag id, name)` pairs.
            pub(super) const TABLE: &[(u16, &str)] = &[
                $( ($tag, $name), )+
            ];
        }
    };
}

make_tag_table!(mod ifd0 => [
        DirectoryKind::Ifd0,
        DirectoryKind::Thumbnail,
        DirectoryKind::Image,
        DirectoryKind::PanasonicRawIfd0,
    ],
    NEW_SUBFILE_TYPE = 0x00FE => "New Subfile Type",
    IMAGE_WIDTH = 0x0100 => "Image Width",
    IMAGE_HEIGHT = 0x0101 => "Image Height",
    BITS_PER_SAMPLE = 0x0102 => "Bits Per Sample",
    COMPRESSION = 0x0103 => "Compression",
    PHOTOMETRIC_INTERPRETATION = 0x0106 => "Photometric Interpretation",
    IMAGE_DESCRIPTION = 0x010E => "Image Description",
    MAKE = 0x010F => "Make",
    MODEL = 0x0110 => "Model",
    STRIP_OFFSETS = 0x0111 => "Strip Offsets",
    ORIENTATION = 0x0112 => "Orientation",
    SAMPLES_PER_PIXEL = 0x0115 => "Samples Per Pixel",
    ROWS_PER_STRIP = 0x0116 => "Rows Per Strip",
    STRIP_BYTE_COUNTS = 0x0117 => "Strip Byte Counts",
    X_RESOLUTION = 0x011A => "X Resolution",
    Y_RESOLUTION = 0x011B => "Y Resolution",
    PLANAR_CONFIGURATION = 0x011C => "Planar Configuration",
    RESOLUTION_UNIT = 0x0128 => "Resolution Unit",
    PAGE_NUMBER = 0x0129 => "Page Number",
    TRANSFER_FUNCTION = 0x012D => "Transfer Function",
    SOFTWARE = 0x0131 => "Software",
    DATE_TIME = 0x0132 => "Date/Time",
    ARTIST = 0x013B => "Artist",
    WHITE_POINT = 0x013E => "White Point",
    PRIMARY_CHROMATICITIES = 0x013F => "Primary Chromaticities",
    SUB_IFDS = 0x014A => "Sub IFD Pointer(s)",
    THUMBNAIL_OFFSET = 0x0201 => "Thumbnail Offset",
    THUMBNAIL_LENGTH = 0x0202 => "Thumbnail Length",
    YCBCR_COEFFICIENTS = 0x0211 => "YCbCr Coefficients",
    YCBCR_SUBSAMPLING = 0x0212 => "YCbCr Sub-Sampling",
    YCBCR_POSITIONING = 0x0213 => "YCbCr Positioning",
    REFERENCE_BLACK_WHITE = 0x0214 => "Reference Black/White",
    XMP = 0x02BC => "XMP",
    COPYRIGHT = 0x8298 => "Copyright",
    IPTC_NAA = 0x83BB => "IPTC-NAA",
    EXIF_IFD_POINTER = 0x8769 => "Exif Offset",
    GPS_INFO_POINTER = 0x8825 => "GPS Info",
    PRINT_IM = 0xC4A5 => "Print Image Matching (PIM) Info",
    THUMBNAIL_DATA = 0xFFFE => "Thumbnail Data",
);

make_tag_table!(mod exif => [DirectoryKind::Exif],
    EXPOSURE_TIME = 0x829A => "Exposure Time",
    F_NUMBER = 0x829D => "F-Number",
    EXPOSURE_PROGRAM = 0x8822 => "Exposure Program",
    ISO_SPEED = 0x8827 => "ISO Speed Ratings",
    EXIF_VERSION = 0x9000 => "Exif Version",
    DATE_TIME_ORIGINAL = 0x9003 => "Date/Time Original",
    DATE_TIME_DIGITIZED = 0x9004 => "Date/Time Digitized",
    OFFSET_TIME = 0x9010 => "Time Zone",
    COMPONENTS_CONFIGURATION = 0x9101 => "Components Configuration",
    SHUTTER_SPEED = 0x9201 => "Shutter Speed Value",
    APERTURE = 0x9202 => "Aperture Value",
    BRIGHTNESS = 0x9203 => "Brightness Value",
    EXPOSURE_BIAS = 0x9204 => "Exposure Bias Value",
    MAX_APERTURE = 0x9205 => "Max Aperture Value",
    SUBJECT_DISTANCE = 0x9206 => "Subject Distance",
    METERING_MODE = 0x9207 => "Metering Mode",
    FLASH = 0x9209 => "Flash",
    FOCAL_LENGTH = 0x920A => "Focal Length",
    MAKERNOTE = 0x927C => "Makernote",
    USER_COMMENT = 0x9286 => "User Comment",
    SUBSEC_TIME = 0x9290 => "Sub-Sec Time",
    FLASHPIX_VERSION = 0xA000 => "FlashPix Version",
    COLOR_SPACE = 0xA001 => "Color Space",
    EXIF_IMAGE_WIDTH = 0xA002 => "Exif Image Width",
    EXIF_IMAGE_HEIGHT = 0xA003 => "Exif Image Height",
    INTEROP_POINTER = 0xA005 => "Interoperability Offset",
    SENSING_METHOD = 0xA217 => "Sensing Method",
    EXPOSURE_MODE = 0xA402 => "Exposure Mode",
    WHITE_BALANCE_MODE = 0xA403 => "White Balance Mode",
    FOCAL_LENGTH_35MM = 0xA405 => "Focal Length 35",
    SCENE_CAPTURE_TYPE = 0xA406 => "Scene Capture Type",
    BODY_SERIAL_NUMBER = 0xA431 => "Body Serial Number",
    LENS_SPECIFICATION = 0xA432 => "Lens Specification",
    LENS_MAKE = 0xA433 => "Lens Make",
    LENS_MODEL = 0xA434 => "Lens Model",
);

make_tag_table!(mod gps => [DirectoryKind::Gps],
    VERSION_ID = 0x0000 => "GPS Version ID",
    LATITUDE_REF = 0x0001 => "GPS Latitude Ref",
    LATITUDE = 0x0002 => "GPS Latitude",
    LONGITUDE_REF = 0x0003 => "GPS Longitude Ref",
    LONGITUDE = 0x0004 => "GPS Longitude",
    ALTITUDE_REF = 0x0005 => "GPS Altitude Ref",
    ALTITUDE = 0x0006 => "GPS Altitude",
    TIME_STAMP = 0x0007 => "GPS Time-Stamp",
    SATELLITES = 0x0008 => "GPS Satellites",
    STATUS = 0x0009 => "GPS Status",
    MEASURE_MODE = 0x000A => "GPS Measure Mode",
    DOP = 0x000B => "GPS DOP",
    SPEED_REF = 0x000C => "GPS Speed Ref",
    SPEED = 0x000D => "GPS Speed",
    IMG_DIRECTION_REF = 0x0010 => "GPS Img Direction Ref",
    IMG_DIRECTION = 0x0011 => "GPS Img Direction",
    MAP_DATUM = 0x0012 => "GPS Map Datum",
    PROCESSING_METHOD = 0x001B => "GPS Processing Method",
    DATE_STAMP = 0x001D => "GPS Date Stamp",
    H_POSITIONING_ERROR = 0x001F => "GPS Horizontal Positioning Error",
);

make_tag_table!(mod interop => [DirectoryKind::Interop],
    INTEROP_INDEX = 0x0001 => "Interoperability Index",
    INTEROP_VERSION = 0x0002 => "Interoperability Version",
    RELATED_IMAGE_FILE_FORMAT = 0x1000 => "Related Image File Format",
    RELATED_IMAGE_WIDTH = 0x1001 => "Related Image Width",
    RELATED_IMAGE_HEIGHT = 0x1002 => "Related Image Height",
);

make_tag_table!(mod olympus => [DirectoryKind::OlympusMakernote],
    MAKERNOTE_VERSION = 0x0000 => "Makernote Version",
    CAMERA_SETTINGS_1 = 0x0001 => "Camera Settings",
    SPECIAL_MODE = 0x0200 => "Special Mode",
    JPEG_QUALITY = 0x0201 => "JPEG Quality",
    MACRO = 0x0202 => "Macro",
    DIGITAL_ZOOM = 0x0204 => "Digital Zoom",
    CAMERA_ID = 0x0209 => "Camera Id",
    EQUIPMENT = 0x2010 => "Equipment",
    CAMERA_SETTINGS = 0x2020 => "Camera Settings",
    RAW_DEVELOPMENT = 0x2030 => "Raw Development",
    RAW_DEVELOPMENT_2 = 0x2031 => "Raw Development 2",
    IMAGE_PROCESSING = 0x2040 => "Image Processing",
    FOCUS_INFO = 0x2050 => "Focus Info",
    RAW_INFO = 0x3000 => "Raw Info",
    MAIN_INFO = 0x4000 => "Main Info",
);

make_tag_table!(mod olympus_equipment => [DirectoryKind::OlympusEquipment],
    EQUIPMENT_VERSION = 0x0000 => "Equipment Version",
    CAMERA_TYPE = 0x0100 => "Camera Type 2",
    SERIAL_NUMBER = 0x0101 => "Serial Number",
    LENS_TYPE = 0x0201 => "Lens Type",
    LENS_SERIAL_NUMBER = 0x0202 => "Lens Serial Number",
    LENS_MODEL = 0x0203 => "Lens Model",
);

make_tag_table!(mod nikon => [DirectoryKind::NikonType1Makernote, DirectoryKind::NikonType2Makernote],
    FIRMWARE_VERSION = 0x0001 => "Firmware Version",
    ISO = 0x0002 => "ISO",
    COLOR_MODE = 0x0003 => "Color Mode",
    QUALITY_AND_FILE_FORMAT = 0x0004 => "Quality & File Format",
    CAMERA_WHITE_BALANCE = 0x0005 => "White Balance",
    CAMERA_SHARPENING = 0x0006 => "Sharpening",
    AF_TYPE = 0x0007 => "AF Type",
    LENS_TYPE = 0x0083 => "Lens Type",
    LENS = 0x0084 => "Lens",
    SHUTTER_COUNT = 0x00A7 => "Shutter Count",
);

make_tag_table!(mod canon => [DirectoryKind::CanonMakernote],
    CAMERA_SETTINGS = 0x0001 => "Camera Settings",
    FOCAL_LENGTH = 0x0002 => "Focal Length",
    SHOT_INFO = 0x0004 => "Shot Info",
    IMAGE_TYPE = 0x0006 => "Image Type",
    FIRMWARE_VERSION = 0x0007 => "Firmware Version",
    IMAGE_NUMBER = 0x0008 => "Image Number",
    OWNER_NAME = 0x0009 => "Owner Name",
    SERIAL_NUMBER = 0x000C => "Camera Serial Number",
    MODEL_ID = 0x0010 => "Canon Model ID",
);

make_tag_table!(mod fujifilm => [DirectoryKind::FujifilmMakernote],
    MAKERNOTE_VERSION = 0x0000 => "Makernote Version",
    SERIAL_NUMBER = 0x0010 => "Serial Number",
    QUALITY = 0x1000 => "Quality",
    SHARPNESS = 0x1001 => "Sharpness",
    WHITE_BALANCE = 0x1002 => "White Balance",
    FILM_MODE = 0x1401 => "Film Mode",
);

make_tag_table!(mod apple => [DirectoryKind::AppleMakernote],
    MAKERNOTE_VERSION = 0x0001 => "Makernote Version",
    AE_MATRIX = 0x0002 => "AE Matrix",
    RUN_TIME = 0x0003 => "Run Time",
    ACCELERATION_VECTOR = 0x0008 => "Acceleration Vector",
    HDR_IMAGE_TYPE = 0x000A => "HDR Image Type",
    BURST_UUID = 0x000B => "Burst UUID",
    CONTENT_IDENTIFIER = 0x0011 => "Content Identifier",
);

make_tag_table!(mod panasonic => [DirectoryKind::PanasonicMakernote],
    QUALITY_MODE = 0x0001 => "Quality Mode",
    FIRMWARE_VERSION = 0x0002 => "Version",
    WHITE_BALANCE = 0x0003 => "White Balance",
    FOCUS_MODE = 0x0007 => "Focus Mode",
    LENS_TYPE = 0x0051 => "Lens Type",
    LENS_SERIAL_NUMBER = 0x0052 => "Lens Serial Number",
);

/// Every table, merged into one lookup map keyed by directory kind.
///
/// Built once, on first use.
static TAG_NAMES: LazyLock<FxHashMap<DirectoryKind, FxHashMap<u16, &'static str>>> =
    LazyLock::new(|| {
        let tables: &[(&[DirectoryKind], &[(u16, &'static str)])] = &[
            (ifd0::KINDS, ifd0::TABLE),
            (exif::KINDS, exif::TABLE),
            (gps::KINDS, gps::TABLE),
            (interop::KINDS, interop::TABLE),
            (olympus::KINDS, olympus::TABLE),
            (olympus_equipment::KINDS, olympus_equipment::TABLE),
            (nikon::KINDS, nikon::TABLE),
            (canon::KINDS, canon::TABLE),
            (fujifilm::KINDS, fujifilm::TABLE),
            (apple::KINDS, apple::TABLE),
            (panasonic::KINDS, panasonic::TABLE),
        ];

        let mut map: FxHashMap<DirectoryKind, FxHashMap<u16, &'static str>> =
            FxHashMap::default();
        for (kinds, table) in tables {
            for kind in *kinds {
                map.entry(*kind)
                    .or_default()
                    .extend(table.iter().copied());
            }
        }
        map
    });

/// Finds the human-readable name of a tag within a directory kind.
///
/// ```
/// use ifd_metadata_types::exif::{ifd::DirectoryKind, tags::{self, tag_name}};
///
/// assert_eq!(tag_name(DirectoryKind::Ifd0, tags::ifd0::MAKE), Some("Make"));
/// assert_eq!(tag_name(DirectoryKind::Gps, 0xBEEF), None);
/// ```
pub fn tag_name(kind: DirectoryKind, tag_id: u16) -> Option<&'static str> {
    TAG_NAMES
        .get(&kind)
        .and_then(|table| table.get(&tag_id))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::{exif, gps, ifd0, olympus, tag_name};
    use crate::exif::ifd::DirectoryKind;

    #[test]
    fn same_id_differs_by_kind() {
        // `0x0001` means something different in every table
        assert_eq!(
            tag_name(DirectoryKind::Gps, gps::LATITUDE_REF),
            Some("GPS Latitude Ref")
        );
        assert_eq!(
            tag_name(DirectoryKind::Interop, 0x0001),
            Some("Interoperability Index")
        );
        assert_eq!(
            tag_name(DirectoryKind::OlympusMakernote, olympus::CAMERA_SETTINGS_1),
            Some("Camera Settings")
        );
    }

    #[test]
    fn thumbnails_share_the_ifd0_table() {
        assert_eq!(
            tag_name(DirectoryKind::Thumbnail, ifd0::THUMBNAIL_OFFSET),
            Some("Thumbnail Offset")
        );
        assert_eq!(tag_name(DirectoryKind::Thumbnail, exif::MAKERNOTE), None);
    }

    #[test]
    fn error_directories_have_no_names() {
        assert_eq!(tag_name(DirectoryKind::Error, ifd0::MAKE), None);
    }
}
