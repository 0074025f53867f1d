use crate::action::editor::EditorSurface;
use crate::constants::BYTE_BITS;
use crate::document_model::{ByteDocument, DocumentModel};

/// Editor surface over an in-memory document.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    cursor: usize,
    model: ByteDocument,
}

impl Editor {
    pub fn new(model: ByteDocument) -> Self {
        Self { cursor: 0, model }
    }

    /// Byte under the cursor.
    pub fn cursor_byte(&self) -> usize {
        self.cursor / BYTE_BITS
    }

    /// Bit position inside the byte under the cursor.
    pub fn cursor_bit(&self) -> usize {
        self.cursor % BYTE_BITS
    }

    pub fn status_line(&self) -> String {
        format!(
            "cursor: byte {:#x} bit {} ({}/{} bytes)",
            self.cursor_byte(),
            self.cursor_bit(),
            self.cursor_byte(),
            self.model.len()
        )
    }
}

impl EditorSurface for Editor {
    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    fn model(&self) -> &dyn DocumentModel {
        &self.model
    }
}
