use std::cell::RefCell;
use std::rc::Rc;

use crate::literal::{ByteOrder, display_bytes};

/// Search state that outlives individual find actions. One instance lives for
/// the whole editing session and is handed to every find-family action.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    find_bytes: Option<Vec<u8>>,
    default_order: ByteOrder,
}

pub type SharedSearchContext = Rc<RefCell<SearchContext>>;

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedSearchContext {
        Rc::new(RefCell::new(self))
    }

    /// Most recently published search pattern.
    pub fn find_bytes(&self) -> Option<&[u8]> {
        self.find_bytes.as_deref()
    }

    pub fn publish(&mut self, pattern: &[u8]) {
        if self.find_bytes.as_deref() == Some(pattern) {
            return;
        }
        log::debug!("search pattern is now {}", display_bytes(pattern));
        self.find_bytes = Some(pattern.to_vec());
    }

    /// Byte order applied to integer literals given without an explicit marker.
    pub fn default_order(&self) -> ByteOrder {
        self.default_order
    }

    pub fn set_default_order(&mut self, order: ByteOrder) {
        self.default_order = order;
    }
}
