use rustc_hash::FxHashSet;

use super::{ReadOptions, decode, handler::TiffHandler};
use crate::{error::ReaderError, reader::RandomAccessReader};
use ifd_metadata_types::exif::primitives::FieldType;

/// The size of one IFD entry: tag, type, count, and the value (or offset).
const ENTRY_LEN: usize = 12;

/// Values up to this many bytes sit inside the entry itself.
const INLINE_VALUE_LEN: u64 = 4;

/// Walks IFDs, handing everything it finds to a [`TiffHandler`].
///
/// One walker lives for one parsing session. It remembers every IFD offset
/// it has started on, so cyclic or self-referencing files can't trap it.
///
/// Follower chains are walked in a loop. Only sub-IFDs nest, and how deep
/// they may nest is capped by [`ReadOptions::max_depth`].
#[derive(Clone, Debug)]
pub struct IfdWalker {
    processed: FxHashSet<usize>,
    max_ifds: usize,
    budget_warned: bool,
    depth: usize,
    max_depth: usize,
}

impl IfdWalker {
    pub fn new(options: &ReadOptions) -> Self {
        Self {
            processed: FxHashSet::default(),
            max_ifds: options.max_ifds,
            budget_warned: false,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// How many IFDs were started so far.
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Whether the IFD at `offset` was already started.
    pub fn is_processed(&self, offset: usize) -> bool {
        self.processed.contains(&offset)
    }

    /// How many nested IFDs are being walked right now.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Walks the IFD at `ifd_offset`, if it may be walked at all.
    ///
    /// It may not when it was already walked, when its entry count can't be
    /// read, when the IFD budget ran out, or when it would nest too deeply.
    /// In those cases nothing happens and this returns `false`.
    ///
    /// Otherwise `enter` is called first, so the handler can enter the
    /// directory this IFD fills. The handler then receives the matching
    /// [`TiffHandler::ending_ifd`] before this returns `true`.
    ///
    /// Offsets inside the IFD are relative to `tiff_header_offset`.
    pub fn visit<H: TiffHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        reader: RandomAccessReader<'_>,
        ifd_offset: usize,
        tiff_header_offset: usize,
        enter: impl FnOnce(&mut H),
    ) -> bool {
        if !self.can_visit(&reader, ifd_offset) {
            return false;
        }

        if self.depth >= self.max_depth {
            handler.warn(&format!(
                "IFD at `{ifd_offset}` is nested more than `{}` levels deep. Skipping it.",
                self.max_depth
            ));
            return false;
        }

        enter(handler);
        self.process_ifd(handler, reader, ifd_offset, tiff_header_offset);
        true
    }

    fn can_visit(&mut self, reader: &RandomAccessReader<'_>, offset: usize) -> bool {
        if self.processed.contains(&offset) {
            log::debug!("IFD at `{offset}` was already processed. Skipping...");
            return false;
        }

        if !reader.is_valid_index(offset, 2) {
            log::warn!(
                "IFD offset `{offset}` is outside the data (len: `{}`). Skipping...",
                reader.len()
            );
            return false;
        }

        if self.processed.len() >= self.max_ifds {
            if !self.budget_warned {
                log::warn!(
                    "Hit the limit of `{}` IFDs. The remaining IFDs will be ignored.",
                    self.max_ifds
                );
                self.budget_warned = true;
            }
            return false;
        }

        true
    }

    /// Walks the IFD at `ifd_offset`, then its follower chain.
    ///
    /// The handler must already be in the directory this IFD fills. Each
    /// follower is entered from the directory before it, and every directory
    /// entered here is left before returning.
    fn process_ifd<H: TiffHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        reader: RandomAccessReader<'_>,
        ifd_offset: usize,
        tiff_header_offset: usize,
    ) {
        self.depth += 1;
        let mut entered = 1_usize;
        let mut offset = ifd_offset;

        loop {
            // marked before anything else, so a pointer back to this IFD
            // (from any depth) is refused
            self.processed.insert(offset);
            log::trace!("Processing IFD at `{offset}`...");

            let Some(follower) = self.walk_entries(handler, reader, offset, tiff_header_offset)
            else {
                break;
            };

            if !handler.has_follower_ifd() {
                log::trace!("Handler doesn't want the follower at `{follower}`.");
                break;
            }

            if !self.can_visit(&reader, follower) {
                break;
            }

            handler.enter_follower_ifd();
            entered += 1;
            offset = follower;
        }

        for _ in 0..entered {
            handler.ending_ifd();
        }
        self.depth -= 1;
    }

    /// Walks one IFD's entries, returning the absolute offset of its
    /// follower (if it names one).
    fn walk_entries<H: TiffHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        reader: RandomAccessReader<'_>,
        ifd_offset: usize,
        tiff_header_offset: usize,
    ) -> Option<usize> {
        let raw_entry_count = match reader.get_u16(ifd_offset) {
            Ok(count) => count,
            Err(e) => {
                handler.error(&format!("Unable to read the IFD entry count. err: {e}"));
                return None;
            }
        };

        // some writers flip the byte order of a single IFD. a count like
        // `0x0300` is almost certainly `3`, read the wrong way around
        let (reader, entry_count) = if raw_entry_count > 0xFF && raw_entry_count & 0xFF == 0 {
            let swapped = reader.with_endianness(reader.endianness().swapped());
            log::debug!(
                "IFD at `{ifd_offset}` has a suspicious entry count (`{raw_entry_count:#06X}`). \
                Reading it with swapped byte order."
            );
            (swapped, raw_entry_count.swap_bytes())
        } else {
            (reader, raw_entry_count)
        };
        let entry_count = usize::from(entry_count);

        let entries_start = ifd_offset + 2;
        let room_for = reader.len().saturating_sub(entries_start) / ENTRY_LEN;
        let readable = entry_count.min(room_for);
        if readable < entry_count {
            handler.error(&format!(
                "Illegally sized IFD. It claims `{entry_count}` entries, \
                but there's only room for `{readable}`."
            ));
        }

        for entry in 0..readable {
            let entry_offset = entries_start + entry * ENTRY_LEN;
            self.process_entry(handler, reader, entry_offset, tiff_header_offset);
        }

        if readable < entry_count {
            return None;
        }

        let follower_pointer = entries_start + entry_count * ENTRY_LEN;
        match reader.get_u32(follower_pointer) {
            Ok(0) => {
                log::trace!("IFD at `{ifd_offset}` has no follower.");
                None
            }
            Ok(relative) => {
                let follower = tiff_header_offset.checked_add(relative as usize);
                if follower.is_none() {
                    log::warn!("Follower offset `{relative}` overflowed. Stopping the chain.");
                }
                follower
            }
            Err(e) => {
                log::warn!("IFD at `{ifd_offset}` has no room for a follower pointer. err: {e}");
                None
            }
        }
    }

    fn process_entry<H: TiffHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        reader: RandomAccessReader<'_>,
        entry_offset: usize,
        tiff_header_offset: usize,
    ) {
        let header = (
            reader.get_u16(entry_offset),
            reader.get_u16(entry_offset + 2),
            reader.get_u32(entry_offset + 4),
        );
        let (Ok(tag_id), Ok(format_code), Ok(component_count)) = header else {
            handler.error(&format!("IFD entry at `{entry_offset}` was cut short."));
            return;
        };

        let field_type = FieldType::try_from(format_code).ok();
        let byte_count: u64 = match field_type {
            Some(ty) => u64::from(component_count) * u64::from(ty.size_bytes()),
            None => match handler.try_custom_process_format(tag_id, format_code, component_count) {
                Some(len) => len as u64,
                None => {
                    handler.warn(&format!(
                        "Invalid TIFF tag format code `{format_code}` for tag `{tag_id:#06X}`."
                    ));
                    return;
                }
            },
        };

        let Ok(byte_count) = usize::try_from(byte_count) else {
            let e = ReaderError::LengthOverflow {
                index: entry_offset,
                bytes: byte_count,
            };
            handler.error(&format!("Tag `{tag_id:#06X}` has an impossible length. err: {e}"));
            return;
        };

        let value_offset = if byte_count as u64 > INLINE_VALUE_LEN {
            match reader.get_u32(entry_offset + 8) {
                Ok(relative) => tiff_header_offset.saturating_add(relative as usize),
                Err(e) => {
                    handler.error(&format!("Tag `{tag_id:#06X}` lost its value offset. err: {e}"));
                    return;
                }
            }
        } else {
            entry_offset + 8
        };

        if !reader.is_valid_index(value_offset, byte_count) {
            handler.error(&format!(
                "Illegal pointer offset for tag `{tag_id:#06X}`: `{byte_count}` byte(s) at \
                `{value_offset}` don't fit in `{}` byte(s) of data.",
                reader.len()
            ));
            return;
        }

        if byte_count as u64 == 4 * u64::from(component_count) && handler.is_tag_ifd_pointer(tag_id)
        {
            self.follow_sub_ifds(
                handler,
                reader,
                tag_id,
                value_offset,
                component_count,
                tiff_header_offset,
            );
            return;
        }

        if handler.custom_process_tag(
            self,
            &reader,
            value_offset,
            tiff_header_offset,
            tag_id,
            byte_count,
        ) {
            log::trace!("Tag `{tag_id:#06X}` was processed by the handler.");
            return;
        }

        match field_type {
            Some(ty) => {
                if let Err(e) =
                    decode::store_value(handler, &reader, tag_id, ty, value_offset, component_count)
                {
                    handler.error(&format!("Failed to decode tag `{tag_id:#06X}`. err: {e}"));
                }
            }

            // the handler knew the length, but not what to do with it
            None => match reader.get_bytes(value_offset, byte_count) {
                Ok(bytes) => handler.set_byte_array(tag_id, bytes.to_vec()),
                Err(e) => handler.error(&format!("Failed to read tag `{tag_id:#06X}`. err: {e}")),
            },
        }
    }

    /// Walks every sub-IFD listed by a pointer tag, right away.
    fn follow_sub_ifds<H: TiffHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        reader: RandomAccessReader<'_>,
        tag_id: u16,
        value_offset: usize,
        component_count: u32,
        tiff_header_offset: usize,
    ) {
        for component in 0..component_count as usize {
            let relative = match reader.get_u32(value_offset + component * 4) {
                Ok(relative) => relative,
                Err(e) => {
                    handler.error(&format!("Sub-IFD pointer `{tag_id:#06X}` was cut short. err: {e}"));
                    return;
                }
            };

            let sub_ifd = tiff_header_offset.saturating_add(relative as usize);
            self.visit(handler, reader, sub_ifd, tiff_header_offset, |h| {
                h.enter_sub_ifd(tag_id)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IfdWalker;
    use crate::{
        error::TiffResult,
        metadata::{StringValue, TagArray, TagValue},
        reader::RandomAccessReader,
        tiff::{ReadOptions, handler::TiffHandler},
        util::logger,
    };
    use ifd_metadata_types::exif::{Endianness, primitives::Rational};

    const SUB_IFD_TAG: u16 = 0x8769;

    /// Writes down every call it gets.
    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<String>,
        values: Vec<(u16, TagValue)>,
        problems: Vec<String>,
        follow_chain: bool,
        depth: i32,
        reenter_on: Option<u16>,
    }

    impl TiffHandler for Recorder {
        fn set_byte_order_marker(&mut self, marker: u16) -> TiffResult<()> {
            self.events.push(format!("marker {marker}"));
            Ok(())
        }

        fn is_tag_ifd_pointer(&self, tag_id: u16) -> bool {
            tag_id == SUB_IFD_TAG
        }

        fn enter_sub_ifd(&mut self, tag_id: u16) {
            self.depth += 1;
            self.events.push(format!("enter {tag_id:#06X}"));
        }

        fn has_follower_ifd(&self) -> bool {
            self.follow_chain
        }

        fn enter_follower_ifd(&mut self) {
            self.depth += 1;
            self.events.push("follower".into());
        }

        fn ending_ifd(&mut self) {
            self.depth -= 1;
            self.events.push("end".into());
        }

        fn custom_process_tag(
            &mut self,
            walker: &mut IfdWalker,
            reader: &RandomAccessReader<'_>,
            _: usize,
            _: usize,
            tag_id: u16,
            _: usize,
        ) -> bool {
            if self.reenter_on != Some(tag_id) {
                return false;
            }

            let entered = walker.visit(self, *reader, 0, 0, |h| {
                h.depth += 1;
                h.events.push("reenter".into());
            });
            self.events.push(format!("visited {entered}"));
            true
        }

        fn try_custom_process_format(&mut self, _: u16, format_code: u16, count: u32) -> Option<usize> {
            (format_code == 13).then_some(count as usize * 4)
        }

        fn warn(&mut self, message: &str) {
            self.problems.push(message.into());
        }

        fn error(&mut self, message: &str) {
            self.problems.push(message.into());
        }

        fn set_value(&mut self, tag_id: u16, value: TagValue) {
            self.values.push((tag_id, value));
        }
    }

    /// One little-endian IFD: entries, then the follower offset.
    fn ifd(entries: &[(u16, u16, u32, [u8; 4])], next: u32) -> Vec<u8> {
        let mut out = (entries.len() as u16).to_le_bytes().to_vec();
        for (tag, ty, count, value) in entries {
            out.extend_from_slice(tag.to_le_bytes().as_slice());
            out.extend_from_slice(ty.to_le_bytes().as_slice());
            out.extend_from_slice(count.to_le_bytes().as_slice());
            out.extend_from_slice(value.as_slice());
        }
        out.extend_from_slice(next.to_le_bytes().as_slice());
        out
    }

    fn walk(data: &[u8], handler: &mut Recorder, options: &ReadOptions) -> IfdWalker {
        let reader = RandomAccessReader::new(data, Endianness::Little);
        let mut walker = IfdWalker::new(options);
        handler.depth = 1;
        walker.process_ifd(handler, reader, 0, 0);
        walker
    }

    #[test]
    fn four_byte_values_are_inline_and_five_byte_values_are_not() {
        logger();

        // entry 1: ASCII x4 inline. entry 2: ASCII x5 at offset 30
        let mut data = ifd(
            &[
                (0x0001, 2, 4, *b"abc\0"),
                (0x0002, 2, 5, 30_u32.to_le_bytes()),
            ],
            0,
        );
        assert_eq!(data.len(), 30);
        data.extend_from_slice(b"hello");

        let mut handler = Recorder::default();
        walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(
            handler.values,
            vec![
                (0x0001, TagValue::String(StringValue::from("abc"))),
                (0x0002, TagValue::String(StringValue::from("hello"))),
            ]
        );
        assert!(handler.problems.is_empty());
    }

    #[test]
    fn cycles_terminate() {
        logger();

        // IFD at 0 points at itself as a sub-IFD. its follower (at 18) names
        // itself as the next IFD
        let mut data = ifd(&[(SUB_IFD_TAG, 4, 1, 0_u32.to_le_bytes())], 18);
        data.extend(ifd(&[], 18));
        let mut handler = Recorder {
            follow_chain: true,
            ..Default::default()
        };

        let walker = walk(&data, &mut handler, &ReadOptions::default());
        assert_eq!(walker.processed_count(), 2);
        assert_eq!(handler.events, vec!["follower", "end", "end"]);
        assert_eq!(handler.depth, 0);
    }

    #[test]
    fn sub_ifds_are_walked_before_the_next_entry() {
        logger();

        // IFD0 at 0: [pointer -> 32, SHORT tag 0x0100]. sub-IFD at 32
        let mut data = ifd(
            &[
                (SUB_IFD_TAG, 4, 1, 32_u32.to_le_bytes()),
                (0x0100, 3, 1, [7, 0, 0, 0]),
            ],
            0,
        );
        data.resize(32, 0);
        data.extend(ifd(&[(0x0200, 1, 1, [9, 0, 0, 0])], 0));

        let mut handler = Recorder::default();
        walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(
            handler.values,
            vec![(0x0200, TagValue::U8(9)), (0x0100, TagValue::U16(7))]
        );
        assert_eq!(handler.events, vec!["enter 0x8769", "end", "end"]);
    }

    #[test]
    fn array_pointers_follow_every_component() {
        logger();

        // two offsets stored out of line at 18
        let mut data = ifd(&[(SUB_IFD_TAG, 4, 2, 18_u32.to_le_bytes())], 0);
        data.extend_from_slice(28_u32.to_le_bytes().as_slice());
        data.extend_from_slice(48_u32.to_le_bytes().as_slice());
        data.resize(28, 0);
        data.extend(ifd(&[(0x0001, 1, 1, [1, 0, 0, 0])], 0));
        data.resize(48, 0);
        data.extend(ifd(&[(0x0002, 1, 1, [2, 0, 0, 0])], 0));

        let mut handler = Recorder::default();
        let walker = walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(walker.processed_count(), 3);
        assert_eq!(
            handler.values,
            vec![(0x0001, TagValue::U8(1)), (0x0002, TagValue::U8(2))]
        );
    }

    #[test]
    fn unknown_types_are_skipped_with_a_warning() {
        logger();

        let data = ifd(
            &[(0x0001, 99, 1, [0; 4]), (0x0002, 3, 2, [1, 0, 2, 0])],
            0,
        );
        let mut handler = Recorder::default();
        walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(
            handler.values,
            vec![(0x0002, TagValue::Array(TagArray::U16(vec![1, 2])))]
        );
        assert_eq!(handler.problems.len(), 1);
        assert!(handler.problems[0].contains("99"));
    }

    #[test]
    fn custom_formats_use_the_handlers_length() {
        logger();

        // type 13 (IFD) with one component: four raw bytes
        let data = ifd(&[(0x0001, 13, 1, [1, 2, 3, 4])], 0);
        let mut handler = Recorder::default();
        walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(handler.values, vec![(0x0001, TagValue::Bytes(vec![1, 2, 3, 4]))]);
    }

    #[test]
    fn out_of_range_values_are_errors() {
        logger();

        let data = ifd(
            &[
                (0x0001, 5, 1, 1000_u32.to_le_bytes()),
                (0x0002, 4, 1, 5_u32.to_le_bytes()),
            ],
            0,
        );
        let mut handler = Recorder::default();
        walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(handler.values, vec![(0x0002, TagValue::U32(5))]);
        assert_eq!(handler.problems.len(), 1);
    }

    #[test]
    fn truncated_ifds_keep_the_entries_that_fit() {
        logger();

        let mut data = ifd(
            &[(0x0001, 3, 1, [1, 0, 0, 0]), (0x0002, 3, 1, [2, 0, 0, 0])],
            0,
        );
        data.truncate(2 + 12 + 6);

        let mut handler = Recorder::default();
        walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(handler.values, vec![(0x0001, TagValue::U16(1))]);
        assert!(handler.problems[0].starts_with("Illegally sized IFD"));
        assert_eq!(handler.depth, 0);
    }

    #[test]
    fn byte_swapped_ifds_are_detected() {
        logger();

        // a big-endian IFD inside little-endian data
        let mut data = 1_u16.to_be_bytes().to_vec();
        data.extend_from_slice(0x0100_u16.to_be_bytes().as_slice());
        data.extend_from_slice(5_u16.to_be_bytes().as_slice());
        data.extend_from_slice(1_u32.to_be_bytes().as_slice());
        data.extend_from_slice(18_u32.to_be_bytes().as_slice());
        data.extend_from_slice(0_u32.to_be_bytes().as_slice());
        data.extend_from_slice(1_u32.to_be_bytes().as_slice());
        data.extend_from_slice(3_u32.to_be_bytes().as_slice());

        let mut handler = Recorder::default();
        walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(
            handler.values,
            vec![(0x0100, TagValue::Rational(Rational::new(1, 3)))]
        );
    }

    #[test]
    fn followers_stop_at_the_budget() {
        logger();

        // a chain of three empty IFDs
        let mut data = ifd(&[], 6);
        data.extend(ifd(&[], 12));
        data.extend(ifd(&[], 0));

        let mut handler = Recorder {
            follow_chain: true,
            ..Default::default()
        };
        let walker = walk(&data, &mut handler, &ReadOptions::default().with_max_ifds(2));

        assert_eq!(walker.processed_count(), 2);
        assert!(!walker.is_processed(12));
        assert_eq!(handler.events, vec!["follower", "end", "end"]);
    }

    #[test]
    fn same_data_either_byte_order() {
        logger();

        let le = ifd(&[(0x0001, 8, 2, [0xFE, 0xFF, 3, 0])], 0);
        let mut be = 1_u16.to_be_bytes().to_vec();
        be.extend_from_slice(0x0001_u16.to_be_bytes().as_slice());
        be.extend_from_slice(8_u16.to_be_bytes().as_slice());
        be.extend_from_slice(2_u32.to_be_bytes().as_slice());
        be.extend_from_slice([0xFF, 0xFE, 0, 3].as_slice());
        be.extend_from_slice(0_u32.to_be_bytes().as_slice());

        let mut from_le = Recorder::default();
        walk(&le, &mut from_le, &ReadOptions::default());

        let mut from_be = Recorder::default();
        let reader = RandomAccessReader::new(&be, Endianness::Big);
        IfdWalker::new(&ReadOptions::default()).process_ifd(&mut from_be, reader, 0, 0);

        assert_eq!(from_le.values, from_be.values);
        assert_eq!(
            from_le.values,
            vec![(0x0001, TagValue::Array(TagArray::I16(vec![-2, 3])))]
        );
    }

    #[test]
    fn long_follower_chains_are_walked_in_a_loop() {
        logger();

        const CHAIN: usize = 200_000;

        // empty IFDs, each pointing at the one right after it
        let mut data = Vec::with_capacity(CHAIN * 6);
        for i in 1..=CHAIN {
            let next = if i == CHAIN { 0 } else { (i * 6) as u32 };
            data.extend(ifd(&[], next));
        }

        let mut handler = Recorder {
            follow_chain: true,
            ..Default::default()
        };
        let walker = walk(
            &data,
            &mut handler,
            &ReadOptions::default().with_max_ifds(usize::MAX),
        );

        assert_eq!(walker.processed_count(), CHAIN);
        assert_eq!(walker.depth(), 0);
        assert_eq!(handler.depth, 0);
        assert_eq!(handler.events.len(), (CHAIN - 1) + CHAIN);
    }

    #[test]
    fn handlers_cannot_walk_an_ifd_twice() {
        logger();

        // tag 0x0001 makes the handler try to walk IFD0 again
        let data = ifd(&[(0x0001, 1, 1, [0; 4])], 0);
        let mut handler = Recorder {
            reenter_on: Some(0x0001),
            ..Default::default()
        };
        let walker = walk(&data, &mut handler, &ReadOptions::default());

        assert_eq!(walker.processed_count(), 1);
        assert_eq!(handler.events, vec!["visited false", "end"]);
        assert_eq!(handler.depth, 0);
    }

    #[test]
    fn handlers_cannot_walk_past_the_budget() {
        logger();

        // the handler asks for an unseen IFD at 18 after the budget is spent
        let mut data = ifd(&[(0x0001, 1, 1, [0; 4])], 0);
        data.extend(ifd(&[], 0));
        let mut handler = Recorder {
            reenter_on: Some(0x0001),
            ..Default::default()
        };

        let reader = RandomAccessReader::new(&data, Endianness::Little);
        let mut walker = IfdWalker::new(&ReadOptions::default().with_max_ifds(1));
        handler.depth = 1;
        walker.process_ifd(&mut handler, reader, 0, 0);
        assert_eq!(walker.processed_count(), 1);

        let entered = walker.visit(&mut handler, reader, 18, 0, |h| h.events.push("enter".into()));
        assert!(!entered);
        assert!(!handler.events.iter().any(|e| e == "enter" || e == "reenter"));
        assert_eq!(walker.processed_count(), 1);
    }

    #[test]
    fn nesting_stops_at_the_depth_limit() {
        logger();

        // each IFD holds one sub-IFD pointer to the next, ten levels deep
        let mut data = Vec::new();
        for i in 1..=10_u32 {
            data.extend(ifd(&[(SUB_IFD_TAG, 4, 1, (i * 18).to_le_bytes())], 0));
        }
        data.extend(ifd(&[], 0));

        let mut handler = Recorder::default();
        let reader = RandomAccessReader::new(&data, Endianness::Little);
        let mut walker = IfdWalker::new(&ReadOptions::default().with_max_depth(3));
        let entered = walker.visit(&mut handler, reader, 0, 0, |h| h.depth += 1);

        assert!(entered);
        assert_eq!(walker.processed_count(), 3);
        assert_eq!(walker.depth(), 0);
        assert_eq!(handler.depth, 0);
        assert_eq!(handler.problems.len(), 1);
        assert!(handler.problems[0].contains("nested more than `3` levels"));
    }
}
