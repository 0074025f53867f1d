use std::cell::RefCell;
use std::rc::Rc;

use super::action_type::ActionType;
use super::base::{Action, Arguments, HandlerAction};
use super::editor::{EditorAction, EditorTarget, Find, FindNext, FindPrev, Goto, ReversibleEditorAction};
use super::error::{ActionError, InvalidCommandError};
use super::history::{ActionHistory, Redo, Undo};
use crate::command_line::tokenize;
use crate::config::RcConfig;
use crate::search_context::{SearchContext, SharedSearchContext};

/// Result of handling one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Quit,
}

/// Turns `(name, argv)` commands into actions, binds them to the editor and
/// keeps the undo history.
pub struct ActionHandler {
    editor: EditorTarget,
    history: Rc<RefCell<ActionHistory>>,
    search: SharedSearchContext,
}

impl ActionHandler {
    pub fn new(editor: EditorTarget) -> Self {
        Self {
            editor,
            history: Rc::new(RefCell::new(ActionHistory::new())),
            search: SearchContext::new().shared(),
        }
    }

    pub fn with_config(editor: EditorTarget, config: &RcConfig) -> Self {
        let handler = Self::new(editor);
        handler.apply_config(config);
        handler
    }

    pub fn apply_config(&self, config: &RcConfig) {
        self.history.borrow_mut().set_max_undo_levels(config.undo_levels);
        self.search.borrow_mut().set_default_order(config.byte_order);
    }

    pub fn editor(&self) -> &EditorTarget {
        &self.editor
    }

    pub fn history(&self) -> &Rc<RefCell<ActionHistory>> {
        &self.history
    }

    pub fn search_context(&self) -> &SharedSearchContext {
        &self.search
    }

    /// Tokenize and execute one line of input. Blank lines do nothing.
    pub fn execute_line(&mut self, line: &str) -> Result<Transition, ActionError> {
        match tokenize(line) {
            Some((name, argv)) => self.execute(&name, argv),
            None => Ok(Transition::Stay),
        }
    }

    pub fn execute(&mut self, name: &str, argv: Vec<String>) -> Result<Transition, ActionError> {
        let action_type = ActionType::from_keyword(name);
        log::debug!("dispatching {action_type:?} with {argv:?}");

        match action_type {
            ActionType::Goto => self.run_reversible(Box::new(Goto::new(argv)?))?,
            ActionType::Find => self.run(Find::new(argv, &self.search)?)?,
            ActionType::FindNext => self.run(FindNext::new(argv, &self.search)?)?,
            ActionType::FindPrev => self.run(FindPrev::new(argv, &self.search)?)?,
            ActionType::Undo => self.run_handler(Undo::new(argv)?)?,
            ActionType::Redo => self.run_handler(Redo::new(argv)?)?,
            ActionType::Exit | ActionType::Quit => {
                Arguments::new(action_type, argv, 0, 0)?;
                return Ok(Transition::Quit);
            }
            ActionType::Set
            | ActionType::Update
            | ActionType::Insert
            | ActionType::Delete
            | ActionType::Cut
            | ActionType::Copy
            | ActionType::Move
            | ActionType::Paste
            | ActionType::Select
            | ActionType::Unselect
            | ActionType::Highlight
            | ActionType::Match
            | ActionType::Revert
            | ActionType::Save
            | ActionType::SaveAs
            | ActionType::SwitchMode => {
                let command = std::iter::once(name.to_string()).chain(argv).collect::<Vec<_>>();
                return Err(InvalidCommandError::Unsupported(command.join(" ")).into());
            }
            ActionType::Invalid => {
                return Err(InvalidCommandError::Unknown(name.to_string()).into());
            }
        }

        Ok(Transition::Stay)
    }

    /// One-way actions are applied and forgotten.
    fn run<A: EditorAction>(&self, mut action: A) -> Result<(), ActionError> {
        action.set_target(Some(&self.editor));
        action.apply()
    }

    fn run_reversible(&self, mut action: Box<dyn ReversibleEditorAction>) -> Result<(), ActionError> {
        action.set_target(Some(&self.editor));
        action.apply()?;
        self.history.borrow_mut().record(action);
        Ok(())
    }

    fn run_handler<A: HandlerAction<Target = ActionHistory>>(&self, mut action: A) -> Result<(), ActionError> {
        action.set_target(Some(&self.history));
        action.apply()
    }
}
