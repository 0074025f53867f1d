use std::fmt;

use super::action_type::ActionType;
use super::base::{Action, ActionBase, Arguments, HandlerAction};
use super::editor::ReversibleEditorAction;
use super::error::{ActionError, InvalidCommandError, RedoActionError, UndoActionError};

pub const DEFAULT_UNDO_LEVELS: usize = 1000;

/// Linear undo/redo history of applied reversible actions.
pub struct ActionHistory {
    undo_stack: Vec<Box<dyn ReversibleEditorAction>>,
    redo_stack: Vec<Box<dyn ReversibleEditorAction>>,
    max_undo_levels: usize,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::with_max_undo_levels(DEFAULT_UNDO_LEVELS)
    }

    pub fn with_max_undo_levels(max_undo_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_levels: max_undo_levels.max(1),
        }
    }

    pub fn max_undo_levels(&self) -> usize {
        self.max_undo_levels
    }

    pub fn set_max_undo_levels(&mut self, max_undo_levels: usize) {
        self.max_undo_levels = max_undo_levels.max(1);
        let excess = self.undo_stack.len().saturating_sub(self.max_undo_levels);
        self.undo_stack.drain(..excess);
    }

    /// Record an action that has just been applied.
    pub fn record(&mut self, action: Box<dyn ReversibleEditorAction>) {
        self.undo_stack.push(action);

        // Limit the undo stack size
        if self.undo_stack.len() > self.max_undo_levels {
            self.undo_stack.remove(0);
        }

        // A new action invalidates everything that was undone
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo the most recent action. A failing action stays on the undo stack.
    pub fn undo(&mut self) -> Result<ActionType, ActionError> {
        let mut action = self.undo_stack.pop().ok_or(UndoActionError::NothingToUndo)?;
        if let Err(err) = action.undo() {
            self.undo_stack.push(action);
            return Err(err);
        }
        let action_type = action.action_type();
        self.redo_stack.push(action);
        Ok(action_type)
    }

    /// Redo the most recently undone action. A failing action stays on the redo stack.
    pub fn redo(&mut self) -> Result<ActionType, ActionError> {
        let mut action = self.redo_stack.pop().ok_or(RedoActionError::NothingToRedo)?;
        if let Err(err) = action.redo() {
            self.redo_stack.push(action);
            return Err(err);
        }
        let action_type = action.action_type();
        self.undo_stack.push(action);
        Ok(action_type)
    }
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHistory")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_undo_levels", &self.max_undo_levels)
            .finish()
    }
}

/// `undo`: reverse the last recorded action.
#[derive(Debug)]
pub struct Undo {
    base: ActionBase<ActionHistory>,
}

impl Undo {
    pub const MIN_ARGS: usize = 0;
    pub const MAX_ARGS: usize = 0;

    pub fn new<I, S>(argv: I) -> Result<Self, InvalidCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = Arguments::new(ActionType::Undo, argv, Self::MIN_ARGS, Self::MAX_ARGS)?;
        Ok(Self {
            base: ActionBase::new(arguments),
        })
    }
}

impl Action for Undo {
    type Target = ActionHistory;

    fn base(&self) -> &ActionBase<ActionHistory> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase<ActionHistory> {
        &mut self.base
    }

    fn apply(&mut self) -> Result<(), ActionError> {
        let history = self.base.require_target()?;
        let undone = history.borrow_mut().undo()?;
        log::info!("undo {undone}");
        self.base.set_applied(true);
        Ok(())
    }
}

impl HandlerAction for Undo {}

/// `redo`: re-apply the last undone action.
#[derive(Debug)]
pub struct Redo {
    base: ActionBase<ActionHistory>,
}

impl Redo {
    pub const MIN_ARGS: usize = 0;
    pub const MAX_ARGS: usize = 0;

    pub fn new<I, S>(argv: I) -> Result<Self, InvalidCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = Arguments::new(ActionType::Redo, argv, Self::MIN_ARGS, Self::MAX_ARGS)?;
        Ok(Self {
            base: ActionBase::new(arguments),
        })
    }
}

impl Action for Redo {
    type Target = ActionHistory;

    fn base(&self) -> &ActionBase<ActionHistory> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase<ActionHistory> {
        &mut self.base
    }

    fn apply(&mut self) -> Result<(), ActionError> {
        let history = self.base.require_target()?;
        let redone = history.borrow_mut().redo()?;
        log::info!("redo {redone}");
        self.base.set_applied(true);
        Ok(())
    }
}

impl HandlerAction for Redo {}
