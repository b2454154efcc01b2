use std::collections::BTreeMap;

use super::value::TagValue;
use ifd_metadata_types::exif::{ifd::DirectoryKind, tags};

/// A logical directory: a map of tag IDs to their values, plus any errors
/// found while filling it.
///
/// Tags are unique per directory. Setting a tag twice keeps the last value.
#[derive(Clone, Debug, PartialEq)]
pub struct Directory {
    kind: DirectoryKind,
    parent: Option<usize>,
    tags: BTreeMap<u16, TagValue>,
    errors: Vec<String>,
}

impl Directory {
    pub fn new(kind: DirectoryKind, parent: Option<usize>) -> Self {
        Self {
            kind,
            parent,
            tags: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// What kind of directory this is.
    pub fn kind(&self) -> DirectoryKind {
        self.kind
    }

    /// A human-readable name for this directory.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The index (in [`super::Metadata`]) of the directory that was active
    /// when this one was entered.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Stores a value, replacing any earlier one for the same tag.
    pub fn set(&mut self, tag_id: u16, value: TagValue) {
        if let Some(old) = self.tags.insert(tag_id, value) {
            log::trace!(
                "Tag `{tag_id:#06X}` was set twice in `{}`. Replaced `{old}`.",
                self.kind
            );
        }
    }

    pub fn get(&self, tag_id: u16) -> Option<&TagValue> {
        self.tags.get(&tag_id)
    }

    pub fn contains(&self, tag_id: u16) -> bool {
        self.tags.contains_key(&tag_id)
    }

    /// How many tags are stored.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// All tags, ordered by ID.
    pub fn tags(&self) -> impl Iterator<Item = (u16, &TagValue)> {
        self.tags.iter().map(|(id, value)| (*id, value))
    }

    /// Shorthand for reading a tag as an unsigned integer.
    pub fn get_u32(&self, tag_id: u16) -> Option<u32> {
        self.get(tag_id).and_then(TagValue::as_u32)
    }

    /// Shorthand for reading a tag as a (lossy) string.
    pub fn get_string(&self, tag_id: u16) -> Option<String> {
        self.get(tag_id)
            .and_then(TagValue::as_string)
            .map(|s| s.to_string_lossy().into_owned())
    }

    /// The tag's name in this directory's table, if known.
    pub fn tag_name(&self, tag_id: u16) -> Option<&'static str> {
        tags::tag_name(self.kind, tag_id)
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Errors, in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
