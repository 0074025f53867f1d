/// Document model subsystem - the searchable byte storage behind the editor
///
/// Actions only rely on the `DocumentModel` contract; `ByteDocument` is the
/// in-memory implementation used by the command line driver and the tests.

pub mod byte_document;

pub use byte_document::ByteDocument;

/// Search primitive every document model exposes to the actions.
pub trait DocumentModel {
    /// Find `pattern` starting at byte offset `start`.
    ///
    /// Forward searches return the first match at or after `start`; reverse
    /// searches return the last match starting at or before `start`. `None`
    /// means the pattern was not found.
    fn find(&self, pattern: &[u8], start: usize, reverse: bool) -> Option<usize>;

    /// Document length in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
