use std::fmt;

/// Every command keyword the editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Invalid,

    // Cursor commands
    Goto,
    Find,
    FindNext,
    FindPrev,

    // Edit commands
    Set,
    Update,
    Insert,
    Delete,

    // Cut/copy/paste commands
    Cut,
    Copy,
    Move,
    Paste,

    // Selection commands
    Select,
    Unselect,
    Highlight,
    Match,

    // File operations
    Revert,
    Save,
    SaveAs,

    // App commands
    Undo,
    Redo,
    SwitchMode,
    Exit,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Edit,
    Clipboard,
    Selection,
    File,
    Application,
}

impl ActionType {
    pub const ALL: [ActionType; 24] = [
        ActionType::Goto,
        ActionType::Find,
        ActionType::FindNext,
        ActionType::FindPrev,
        ActionType::Set,
        ActionType::Update,
        ActionType::Insert,
        ActionType::Delete,
        ActionType::Cut,
        ActionType::Copy,
        ActionType::Move,
        ActionType::Paste,
        ActionType::Select,
        ActionType::Unselect,
        ActionType::Highlight,
        ActionType::Match,
        ActionType::Revert,
        ActionType::Save,
        ActionType::SaveAs,
        ActionType::Undo,
        ActionType::Redo,
        ActionType::SwitchMode,
        ActionType::Exit,
        ActionType::Quit,
    ];

    /// Unknown keywords map to `Invalid`.
    pub fn from_keyword(keyword: &str) -> ActionType {
        Self::ALL
            .into_iter()
            .find(|action_type| action_type.keyword() == Some(keyword))
            .unwrap_or(ActionType::Invalid)
    }

    pub fn keyword(self) -> Option<&'static str> {
        let keyword = match self {
            ActionType::Invalid => return None,
            ActionType::Goto => "goto",
            ActionType::Find => "find",
            ActionType::FindNext => "findnext",
            ActionType::FindPrev => "findprev",
            ActionType::Set => "set",
            ActionType::Update => "update",
            ActionType::Insert => "insert",
            ActionType::Delete => "delete",
            ActionType::Cut => "cut",
            ActionType::Copy => "copy",
            ActionType::Move => "move",
            ActionType::Paste => "paste",
            ActionType::Select => "select",
            ActionType::Unselect => "unselect",
            ActionType::Highlight => "highlight",
            ActionType::Match => "match",
            ActionType::Revert => "revert",
            ActionType::Save => "save",
            ActionType::SaveAs => "saveas",
            ActionType::Undo => "undo",
            ActionType::Redo => "redo",
            ActionType::SwitchMode => "view-mode",
            ActionType::Exit => "exit",
            ActionType::Quit => "quit",
        };
        Some(keyword)
    }

    pub fn category(self) -> Option<ActionCategory> {
        let category = match self {
            ActionType::Invalid => return None,
            ActionType::Goto | ActionType::Find | ActionType::FindNext | ActionType::FindPrev => {
                ActionCategory::Navigation
            }
            ActionType::Set | ActionType::Update | ActionType::Insert | ActionType::Delete => {
                ActionCategory::Edit
            }
            ActionType::Cut | ActionType::Copy | ActionType::Move | ActionType::Paste => {
                ActionCategory::Clipboard
            }
            ActionType::Select | ActionType::Unselect | ActionType::Highlight | ActionType::Match => {
                ActionCategory::Selection
            }
            ActionType::Revert | ActionType::Save | ActionType::SaveAs => ActionCategory::File,
            ActionType::Undo
            | ActionType::Redo
            | ActionType::SwitchMode
            | ActionType::Exit
            | ActionType::Quit => ActionCategory::Application,
        };
        Some(category)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("<invalid>"))
    }
}
