//! The directory/tag model filled in by handlers.
//!
//! A parse produces one [`Metadata`]: an ordered list of [`Directory`]
//! instances. Each directory remembers which directory was active when it
//! was entered, so the tree can be recovered even though storage is flat.

use ifd_metadata_types::exif::ifd::DirectoryKind;

mod directory;
mod stack;
mod value;

pub use directory::Directory;
pub use stack::DirectoryStack;
pub use value::{ObjectValue, StringValue, TagArray, TagValue, Thumbnail};

/// Every directory found in one parsing session, in the order they were
/// entered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    directories: Vec<Directory>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory, returning its index.
    pub fn push(&mut self, directory: Directory) -> usize {
        self.directories.push(directory);
        self.directories.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Directory> {
        self.directories.get(index)
    }

    /// All directories, in the order they were entered.
    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    /// All directories of one kind.
    pub fn directories_of_kind(&self, kind: DirectoryKind) -> impl Iterator<Item = &Directory> {
        self.directories.iter().filter(move |d| d.kind() == kind)
    }

    /// The first directory of one kind.
    pub fn first_directory_of_kind(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories_of_kind(kind).next()
    }

    /// Indices handed out by [`Metadata::push`] stay valid, since nothing is
    /// ever removed.
    pub(crate) fn directory_mut(&mut self, index: usize) -> &mut Directory {
        &mut self.directories[index]
    }

    pub(crate) fn first_directory_of_kind_mut(
        &mut self,
        kind: DirectoryKind,
    ) -> Option<&mut Directory> {
        self.directories.iter_mut().find(|d| d.kind() == kind)
    }

    /// Directories whose parent is the directory at `index`.
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &Directory> {
        self.directories
            .iter()
            .filter(move |d| d.parent() == Some(index))
    }

    /// Whether any directory recorded an error.
    pub fn has_errors(&self) -> bool {
        self.directories.iter().any(Directory::has_errors)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = &'a Directory;
    type IntoIter = core::slice::Iter<'a, Directory>;

    fn into_iter(self) -> Self::IntoIter {
        self.directories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Directory, Metadata};
    use ifd_metadata_types::exif::ifd::DirectoryKind;

    #[test]
    fn lookups_by_kind() {
        let mut metadata = Metadata::new();
        let ifd0 = metadata.push(Directory::new(DirectoryKind::Ifd0, None));
        metadata.push(Directory::new(DirectoryKind::Thumbnail, Some(ifd0)));
        metadata.push(Directory::new(DirectoryKind::Thumbnail, Some(ifd0)));

        assert_eq!(metadata.directories_of_kind(DirectoryKind::Thumbnail).count(), 2);
        assert!(metadata.first_directory_of_kind(DirectoryKind::Gps).is_none());
        assert_eq!(metadata.children_of(ifd0).count(), 2);
        assert!(!metadata.has_errors());
    }
}
