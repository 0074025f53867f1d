/// Data selection: a byte offset plus a length.
///
/// No bounds checking against the document; consumers validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub offset: usize,
    pub length: usize,
}

impl Selection {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.offset && offset < self.end()
    }
}
