use super::{Directory, Metadata};
use ifd_metadata_types::exif::ifd::DirectoryKind;

/// Tracks which directory is "current" while the walker descends into
/// sub-IFDs.
///
/// Directories live in the [`Metadata`] arena. The stack only holds indices,
/// so entering and leaving never moves a directory.
#[derive(Clone, Debug, Default)]
pub struct DirectoryStack {
    metadata: Metadata,
    stack: Vec<usize>,
    current: Option<usize>,
}

impl DirectoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory of `kind` and makes it current. The previously
    /// current directory (if any) becomes its parent.
    pub fn push(&mut self, kind: DirectoryKind) -> usize {
        let index = self.metadata.push(Directory::new(kind, self.current));
        if let Some(previous) = self.current.replace(index) {
            self.stack.push(previous);
        }
        log::debug!("Entered `{kind}` directory. depth: `{}`", self.depth());
        index
    }

    /// Leaves the current directory, restoring its parent.
    ///
    /// Returns the index of the directory that was left.
    pub fn pop(&mut self) -> Option<usize> {
        let left = self.current.take();
        self.current = self.stack.pop();
        log::debug!("Left directory `{left:?}`. now at: `{:?}`", self.current);
        left
    }

    /// Index of the current directory.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Directory> {
        self.current.and_then(|i| self.metadata.get(i))
    }

    /// The kind of the current directory.
    pub fn current_kind(&self) -> Option<DirectoryKind> {
        self.current().map(Directory::kind)
    }

    /// How many directories are active, including the current one.
    pub fn depth(&self) -> usize {
        self.stack.len() + usize::from(self.current.is_some())
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::DirectoryStack;
    use ifd_metadata_types::exif::ifd::DirectoryKind;

    #[test]
    fn push_and_pop_restore_the_parent() {
        let mut stack = DirectoryStack::new();
        assert!(stack.current().is_none());

        let ifd0 = stack.push(DirectoryKind::Ifd0);
        let exif = stack.push(DirectoryKind::Exif);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current_kind(), Some(DirectoryKind::Exif));
        assert_eq!(stack.current().unwrap().parent(), Some(ifd0));

        assert_eq!(stack.pop(), Some(exif));
        assert_eq!(stack.current_index(), Some(ifd0));

        assert_eq!(stack.pop(), Some(ifd0));
        assert!(stack.current().is_none());
        assert_eq!(stack.pop(), None, "popping an empty stack is harmless");

        // both directories stay in the arena
        assert_eq!(stack.into_metadata().len(), 2);
    }
}
