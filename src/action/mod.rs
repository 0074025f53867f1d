/// Action subsystem - Command execution and undo history
///
/// Every user command becomes one action: its arguments are validated at
/// construction, it is bound to a target, then applied. Reversible actions
/// can be undone and redone through the history kept by the handler.

pub mod action_type;
pub mod base;
pub mod editor;
pub mod error;
pub mod handler;
pub mod history;
pub mod selection;

// Re-export public interface
pub use action_type::{ActionCategory, ActionType};
pub use base::{Action, ActionBase, Arguments, Binding, HandlerAction, ReversibleAction, redo};
pub use editor::{
    EditorAction, EditorSurface, EditorTarget, Find, FindNext, FindPrev, Goto, OffsetType,
    ReversibleEditorAction,
};
pub use error::{ActionError, InvalidCommandError, RedoActionError, UndoActionError};
pub use handler::{ActionHandler, Transition};
pub use history::{ActionHistory, Redo, Undo};
pub use selection::Selection;
