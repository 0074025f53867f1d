use std::fs;
use std::io;
use std::path::Path;

use super::DocumentModel;

#[derive(Debug, Clone, Default)]
pub struct ByteDocument {
    data: Vec<u8>,
}

impl ByteDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn open(path: &Path) -> io::Result<Self> {
        let data = fs::read(path)?;
        log::info!("loaded {} bytes from {}", data.len(), path.display());
        Ok(Self { data })
    }

    fn find_forward(&self, pattern: &[u8], start: usize) -> Option<usize> {
        let haystack = self.data.get(start..)?;
        if pattern.is_empty() {
            return Some(start);
        }
        haystack
            .windows(pattern.len())
            .position(|window| window == pattern)
            .map(|offset| start + offset)
    }

    fn find_backward(&self, pattern: &[u8], start: usize) -> Option<usize> {
        let last = self.data.len().checked_sub(pattern.len())?.min(start);
        (0..=last).rev().find(|&offset| self.data[offset..].starts_with(pattern))
    }
}

impl DocumentModel for ByteDocument {
    fn find(&self, pattern: &[u8], start: usize, reverse: bool) -> Option<usize> {
        if reverse {
            self.find_backward(pattern, start)
        } else {
            self.find_forward(pattern, start)
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
