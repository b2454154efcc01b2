use super::makernote::{MakernoteProbe, MakernoteRegistry};
use crate::{
    error::{TiffError, TiffResult},
    metadata::{Directory, DirectoryStack, Metadata, ObjectValue, TagValue, Thumbnail},
    reader::RandomAccessReader,
    tiff::{IfdWalker, ReadOptions, TiffHandler},
};
use ifd_metadata_types::exif::{
    ifd::DirectoryKind,
    tags::{exif, ifd0, olympus},
};

/// The usual TIFF marker, `42`.
pub const STANDARD_TIFF_MARKER: u16 = 0x002A;

/// Olympus ORF raw files use `RO` in place of `42`.
pub const OLYMPUS_RAW_TIFF_MARKER: u16 = 0x4F52;

/// ...and some use `RS`.
pub const OLYMPUS_RAW_TIFF_MARKER_2: u16 = 0x5352;

/// Panasonic RW2 raw files.
pub const PANASONIC_RAW_TIFF_MARKER: u16 = 0x0055;

/// A tag that points at a sub-IFD, and the directory it becomes.
struct SubIfdPointer {
    /// Where the tag has this meaning. Empty means "anywhere".
    parents: &'static [DirectoryKind],
    tag_id: u16,
    child: DirectoryKind,
}

const ROOTS: &[DirectoryKind] = &[DirectoryKind::Ifd0, DirectoryKind::PanasonicRawIfd0];
const OLYMPUS: &[DirectoryKind] = &[DirectoryKind::OlympusMakernote];

const SUB_IFD_POINTERS: &[SubIfdPointer] = &[
    SubIfdPointer {
        parents: ROOTS,
        tag_id: ifd0::EXIF_IFD_POINTER,
        child: DirectoryKind::Exif,
    },
    SubIfdPointer {
        parents: ROOTS,
        tag_id: ifd0::GPS_INFO_POINTER,
        child: DirectoryKind::Gps,
    },
    SubIfdPointer {
        parents: &[],
        tag_id: ifd0::SUB_IFDS,
        child: DirectoryKind::Image,
    },
    SubIfdPointer {
        parents: &[DirectoryKind::Exif],
        tag_id: exif::INTEROP_POINTER,
        child: DirectoryKind::Interop,
    },
    SubIfdPointer {
        parents: OLYMPUS,
        tag_id: olympus::EQUIPMENT,
        child: DirectoryKind::OlympusEquipment,
    },
    SubIfdPointer {
        parents: OLYMPUS,
        tag_id: olympus::CAMERA_SETTINGS,
        child: DirectoryKind::OlympusCameraSettings,
    },
    SubIfdPointer {
        parents: OLYMPUS,
        tag_id: olympus::RAW_DEVELOPMENT,
        child: DirectoryKind::OlympusRawDevelopment,
    },
    SubIfdPointer {
        parents: OLYMPUS,
        tag_id: olympus::RAW_DEVELOPMENT_2,
        child: DirectoryKind::OlympusRawDevelopment2,
    },
    SubIfdPointer {
        parents: OLYMPUS,
        tag_id: olympus::IMAGE_PROCESSING,
        child: DirectoryKind::OlympusImageProcessing,
    },
    SubIfdPointer {
        parents: OLYMPUS,
        tag_id: olympus::FOCUS_INFO,
        child: DirectoryKind::OlympusFocusInfo,
    },
    SubIfdPointer {
        parents: OLYMPUS,
        tag_id: olympus::RAW_INFO,
        child: DirectoryKind::OlympusRawInfo,
    },
];

/// Finds the directory a pointer tag leads to from `parent`.
fn sub_ifd_kind(parent: Option<DirectoryKind>, tag_id: u16) -> Option<DirectoryKind> {
    SUB_IFD_POINTERS
        .iter()
        .find(|p| {
            p.tag_id == tag_id
                && (p.parents.is_empty() || parent.is_some_and(|k| p.parents.contains(&k)))
        })
        .map(|p| p.child)
}

/// Fills a [`Metadata`] with standard Exif directories (and makernotes).
///
/// ```
/// use ifd_metadata::{exif::ExifTiffHandler, tiff::{ReadOptions, process_tiff}};
/// use ifd_metadata_types::exif::ifd::DirectoryKind;
///
/// // a little-endian TIFF with one empty IFD
/// let data = b"II*\0\x08\0\0\0\0\0\0\0\0\0";
///
/// let options = ReadOptions::default();
/// let mut handler = ExifTiffHandler::new(&options);
/// process_tiff(data, &mut handler, 0, &options).unwrap();
///
/// let metadata = handler.into_metadata();
/// assert_eq!(metadata.len(), 1);
/// assert_eq!(metadata.directories()[0].kind(), DirectoryKind::Ifd0);
/// ```
#[derive(Clone, Debug)]
pub struct ExifTiffHandler {
    directories: DirectoryStack,
    makernotes: MakernoteRegistry,
    store_thumbnail_bytes: bool,
}

impl ExifTiffHandler {
    pub fn new(options: &ReadOptions) -> Self {
        Self {
            directories: DirectoryStack::new(),
            makernotes: MakernoteRegistry::builtin(),
            store_thumbnail_bytes: options.store_thumbnail_bytes,
        }
    }

    /// Swaps out the makernote formats this handler recognizes.
    pub fn with_makernotes(mut self, makernotes: MakernoteRegistry) -> Self {
        self.makernotes = makernotes;
        self
    }

    /// Everything found so far.
    pub fn metadata(&self) -> &Metadata {
        self.directories.metadata()
    }

    pub fn into_metadata(self) -> Metadata {
        self.directories.into_metadata()
    }

    fn current_kind(&self) -> Option<DirectoryKind> {
        self.directories.current_kind()
    }

    /// The current directory, or (when none is active) the error directory.
    fn active_directory(&mut self) -> &mut Directory {
        let index = match self.directories.current_index() {
            Some(index) => index,
            None => self.error_directory_index(),
        };
        self.directories.metadata_mut().directory_mut(index)
    }

    fn error_directory_index(&mut self) -> usize {
        let metadata = self.directories.metadata_mut();
        match metadata
            .directories()
            .iter()
            .position(|d| d.kind() == DirectoryKind::Error)
        {
            Some(index) => index,
            None => {
                log::warn!("Got data outside of any directory. Recording it separately.");
                metadata.push(Directory::new(DirectoryKind::Error, None))
            }
        }
    }

    /// The camera's `Make`, taken from the root directory.
    fn make(&self) -> Option<String> {
        self.metadata()
            .directories()
            .iter()
            .find(|d| d.kind().is_root())
            .and_then(|d| d.get_string(ifd0::MAKE))
    }

    /// Walks a makernote's IFD, if its format is recognized.
    fn process_makernote(
        &mut self,
        walker: &mut IfdWalker,
        reader: &RandomAccessReader<'_>,
        makernote_offset: usize,
        tiff_header_offset: usize,
        byte_count: usize,
    ) -> bool {
        let make = self.make();
        let probe = MakernoteProbe {
            reader: *reader,
            offset: makernote_offset,
            len: byte_count,
            make: make.as_deref(),
        };

        let Some((name, layout)) = self.makernotes.identify(&probe) else {
            log::debug!("Makernote at `{makernote_offset}` wasn't recognized. Keeping its bytes.");
            return false;
        };

        let Some(ifd_offset) = makernote_offset.checked_add(layout.ifd_start) else {
            return false;
        };
        let base = layout.resolve_base(makernote_offset, tiff_header_offset);
        let makernote_reader = layout.apply_byte_order(reader);

        log::debug!("Found a `{name}` makernote. Walking its IFD at `{ifd_offset}`...");
        let kind = layout.kind;
        let walked = walker.visit(self, makernote_reader, ifd_offset, base, |h| {
            h.directories.push(kind);
        });
        if !walked {
            self.warn(&format!(
                "`{name}` makernote IFD at `{ifd_offset}` can't be read. Keeping its bytes."
            ));
        }
        walked
    }
}

impl TiffHandler for ExifTiffHandler {
    fn set_byte_order_marker(&mut self, marker: u16) -> TiffResult<()> {
        let root = match marker {
            STANDARD_TIFF_MARKER | OLYMPUS_RAW_TIFF_MARKER | OLYMPUS_RAW_TIFF_MARKER_2 => {
                DirectoryKind::Ifd0
            }
            PANASONIC_RAW_TIFF_MARKER => DirectoryKind::PanasonicRawIfd0,
            found => {
                log::error!("Unexpected TIFF marker: `{found:#06X}`");
                return Err(TiffError::UnexpectedTiffMarker { found });
            }
        };

        self.directories.push(root);
        Ok(())
    }

    fn is_tag_ifd_pointer(&self, tag_id: u16) -> bool {
        sub_ifd_kind(self.current_kind(), tag_id).is_some()
    }

    fn enter_sub_ifd(&mut self, tag_id: u16) {
        let kind = sub_ifd_kind(self.current_kind(), tag_id).unwrap_or_else(|| {
            log::warn!("Tag `{tag_id:#06X}` isn't a known pointer. Treating it as an image IFD.");
            DirectoryKind::Image
        });
        self.directories.push(kind);
    }

    fn has_follower_ifd(&self) -> bool {
        matches!(
            self.current_kind(),
            Some(
                DirectoryKind::Ifd0
                    | DirectoryKind::PanasonicRawIfd0
                    | DirectoryKind::Image
                    | DirectoryKind::Thumbnail
            )
        )
    }

    fn enter_follower_ifd(&mut self) {
        let kind = match self.directories.current() {
            Some(dir) if dir.kind() == DirectoryKind::Thumbnail => DirectoryKind::Thumbnail,

            // multi-page files say so with a page number. otherwise, the
            // second IFD is the thumbnail
            Some(dir) if dir.contains(ifd0::PAGE_NUMBER) => DirectoryKind::Image,
            _ => DirectoryKind::Thumbnail,
        };
        self.directories.push(kind);
    }

    fn ending_ifd(&mut self) {
        self.directories.pop();
    }

    fn completed(&mut self, reader: &RandomAccessReader<'_>, tiff_header_offset: usize) {
        if !self.store_thumbnail_bytes {
            return;
        }

        let Some(thumbnail) = self
            .directories
            .metadata_mut()
            .first_directory_of_kind_mut(DirectoryKind::Thumbnail)
        else {
            return;
        };

        if !thumbnail.contains(ifd0::COMPRESSION) {
            return;
        }
        let (Some(offset), Some(length)) = (
            thumbnail.get_u32(ifd0::THUMBNAIL_OFFSET),
            thumbnail.get_u32(ifd0::THUMBNAIL_LENGTH),
        ) else {
            return;
        };

        let start = tiff_header_offset.saturating_add(offset as usize);
        match reader.get_bytes(start, length as usize) {
            Ok(bytes) => {
                log::debug!("Stored `{length}` thumbnail byte(s) from `{start}`.");
                thumbnail.set(
                    ifd0::THUMBNAIL_DATA,
                    TagValue::Object(ObjectValue::Thumbnail(Thumbnail {
                        offset: start,
                        data: bytes.to_vec(),
                    })),
                );
            }
            Err(e) => thumbnail.add_error(format!("Invalid thumbnail data specification. err: {e}")),
        }
    }

    fn custom_process_tag(
        &mut self,
        walker: &mut IfdWalker,
        reader: &RandomAccessReader<'_>,
        value_offset: usize,
        tiff_header_offset: usize,
        tag_id: u16,
        byte_count: usize,
    ) -> bool {
        match self.current_kind() {
            Some(DirectoryKind::Exif) if tag_id == exif::MAKERNOTE => self.process_makernote(
                walker,
                reader,
                value_offset,
                tiff_header_offset,
                byte_count,
            ),

            // newer Olympus cameras embed these IFDs right in the entry's
            // value instead of pointing at them
            Some(DirectoryKind::OlympusMakernote) => {
                let Some(child) = sub_ifd_kind(Some(DirectoryKind::OlympusMakernote), tag_id) else {
                    return false;
                };
                walker.visit(self, *reader, value_offset, tiff_header_offset, |h| {
                    h.directories.push(child);
                })
            }

            _ => false,
        }
    }

    fn try_custom_process_format(
        &mut self,
        tag_id: u16,
        format_code: u16,
        component_count: u32,
    ) -> Option<usize> {
        // TIFF-EP's `IFD` type: 32-bit offsets, like `Long`
        if format_code == 13 {
            log::trace!("Tag `{tag_id:#06X}` uses the IFD field type.");
            return usize::try_from(u64::from(component_count) * 4).ok();
        }

        None
    }

    fn warn(&mut self, message: &str) {
        log::warn!("{message}");
        self.active_directory().add_error(message);
    }

    fn error(&mut self, message: &str) {
        log::error!("{message}");
        self.active_directory().add_error(message);
    }

    fn set_value(&mut self, tag_id: u16, value: TagValue) {
        self.active_directory().set(tag_id, value);
    }
}

#[cfg(test)]
mod tests {
    use super::{ExifTiffHandler, sub_ifd_kind};
    use crate::{
        error::TiffError,
        metadata::TagValue,
        tiff::{ReadOptions, TiffHandler},
        util::logger,
    };
    use ifd_metadata_types::exif::{ifd::DirectoryKind, tags};

    #[test]
    fn markers_pick_the_root() {
        logger();

        let options = ReadOptions::default();
        for (marker, root) in [
            (0x002A, DirectoryKind::Ifd0),
            (0x4F52, DirectoryKind::Ifd0),
            (0x5352, DirectoryKind::Ifd0),
            (0x0055, DirectoryKind::PanasonicRawIfd0),
        ] {
            let mut handler = ExifTiffHandler::new(&options);
            assert_eq!(handler.set_byte_order_marker(marker), Ok(()));
            assert_eq!(handler.current_kind(), Some(root));
        }

        let mut handler = ExifTiffHandler::new(&options);
        assert_eq!(
            handler.set_byte_order_marker(0x1234),
            Err(TiffError::UnexpectedTiffMarker { found: 0x1234 })
        );
        assert!(handler.metadata().is_empty());
    }

    #[test]
    fn pointers_depend_on_the_parent() {
        assert_eq!(
            sub_ifd_kind(Some(DirectoryKind::Ifd0), tags::ifd0::EXIF_IFD_POINTER),
            Some(DirectoryKind::Exif)
        );
        assert_eq!(
            sub_ifd_kind(Some(DirectoryKind::Exif), tags::ifd0::EXIF_IFD_POINTER),
            None
        );
        assert_eq!(
            sub_ifd_kind(Some(DirectoryKind::Exif), tags::exif::INTEROP_POINTER),
            Some(DirectoryKind::Interop)
        );
        assert_eq!(
            sub_ifd_kind(Some(DirectoryKind::Thumbnail), tags::ifd0::SUB_IFDS),
            Some(DirectoryKind::Image)
        );
        assert_eq!(
            sub_ifd_kind(Some(DirectoryKind::OlympusMakernote), tags::olympus::FOCUS_INFO),
            Some(DirectoryKind::OlympusFocusInfo)
        );
    }

    #[test]
    fn followers_become_thumbnails_or_pages() {
        logger();

        let mut handler = ExifTiffHandler::new(&ReadOptions::default());
        handler.set_byte_order_marker(0x002A).unwrap();
        assert!(handler.has_follower_ifd());

        handler.enter_follower_ifd();
        assert_eq!(handler.current_kind(), Some(DirectoryKind::Thumbnail));
        handler.enter_follower_ifd();
        assert_eq!(handler.current_kind(), Some(DirectoryKind::Thumbnail));
        handler.ending_ifd();
        handler.ending_ifd();

        handler.set_value(tags::ifd0::PAGE_NUMBER, TagValue::U16(0));
        handler.enter_follower_ifd();
        assert_eq!(handler.current_kind(), Some(DirectoryKind::Image));

        handler.enter_sub_ifd(tags::ifd0::SUB_IFDS);
        assert!(!handler.is_tag_ifd_pointer(tags::ifd0::EXIF_IFD_POINTER));
        assert_eq!(handler.current_kind(), Some(DirectoryKind::Image));
    }

    #[test]
    fn stray_values_go_to_an_error_directory() {
        logger();

        let mut handler = ExifTiffHandler::new(&ReadOptions::default());
        handler.set_value(0x0100, TagValue::U8(1));
        handler.warn("no directory");
        handler.error("still no directory");

        let metadata = handler.into_metadata();
        assert_eq!(metadata.len(), 1);

        let error_dir = &metadata.directories()[0];
        assert_eq!(error_dir.kind(), DirectoryKind::Error);
        assert_eq!(error_dir.get(0x0100), Some(&TagValue::U8(1)));
        assert_eq!(error_dir.errors().len(), 2);
    }

    #[test]
    fn custom_format_thirteen_is_four_bytes_per_component() {
        let mut handler = ExifTiffHandler::new(&ReadOptions::default());
        assert_eq!(handler.try_custom_process_format(0x014A, 13, 3), Some(12));
        assert_eq!(handler.try_custom_process_format(0x014A, 14, 3), None);
    }
}
