/// Actions whose target is an editor surface: a bit-addressed cursor over a
/// searchable document.

pub mod find;
pub mod goto;

pub use find::{Find, FindNext, FindPrev};
pub use goto::{Goto, OffsetType};

use std::cell::RefCell;
use std::rc::Rc;

use super::base::{Action, ReversibleAction};
use crate::document_model::DocumentModel;

/// What an editor exposes to the actions bound to it.
pub trait EditorSurface {
    /// Cursor position in bits.
    fn cursor(&self) -> usize;

    fn set_cursor(&mut self, cursor: usize);

    fn model(&self) -> &dyn DocumentModel;
}

pub type EditorTarget = Rc<RefCell<dyn EditorSurface>>;

pub trait EditorAction: Action<Target = dyn EditorSurface> {}

impl<A> EditorAction for A where A: Action<Target = dyn EditorSurface> {}

pub trait ReversibleEditorAction: ReversibleAction<Target = dyn EditorSurface> {}

impl<A> ReversibleEditorAction for A where A: ReversibleAction<Target = dyn EditorSurface> {}
