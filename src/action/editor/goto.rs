use std::fmt;
use std::str::FromStr;

use super::EditorSurface;
use crate::action::action_type::ActionType;
use crate::action::base::{Action, ActionBase, Arguments, ReversibleAction};
use crate::action::error::{ActionError, InvalidCommandError, UndoActionError};
use crate::constants::bytes_to_bits;
use crate::literal::str_to_int;

/// Unit of a `goto` offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetType {
    #[default]
    Byte,
    Bit,
}

impl OffsetType {
    /// Convert an offset in this unit to bits, `None` on overflow.
    pub fn to_bits(self, value: usize) -> Option<usize> {
        match self {
            OffsetType::Byte => bytes_to_bits(value),
            OffsetType::Bit => Some(value),
        }
    }
}

impl FromStr for OffsetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byte" => Ok(OffsetType::Byte),
            "bit" => Ok(OffsetType::Bit),
            _ => Err(format!("unknown offset unit: {s}")),
        }
    }
}

impl fmt::Display for OffsetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetType::Byte => f.write_str("byte"),
            OffsetType::Bit => f.write_str("bit"),
        }
    }
}

/// Move the cursor to an absolute offset.
///
/// ```text
/// goto 0x1000
/// goto byte 0x1000
/// goto bit 0x1000
/// ```
#[derive(Debug)]
pub struct Goto {
    base: ActionBase<dyn EditorSurface>,
    offset_type: OffsetType,
    offset: usize,
    previous_offset: usize,
}

impl Goto {
    pub const MIN_ARGS: usize = 1;
    pub const MAX_ARGS: usize = 2;

    pub fn new<I, S>(argv: I) -> Result<Self, InvalidCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = Arguments::new(ActionType::Goto, argv, Self::MIN_ARGS, Self::MAX_ARGS)?;
        let invalid = |reason: String| InvalidCommandError::invalid(arguments.command_line(), reason);

        let Some((raw_offset, unit)) = arguments.argv().split_last() else {
            return Err(invalid("missing offset".to_string()));
        };
        let offset_type = match unit.first() {
            Some(unit) => unit.parse::<OffsetType>().map_err(invalid)?,
            None => OffsetType::Byte,
        };

        let value = str_to_int(raw_offset).map_err(|err| invalid(err.to_string()))?;
        let offset = usize::try_from(value)
            .ok()
            .and_then(|value| offset_type.to_bits(value))
            .ok_or_else(|| invalid(format!("offset out of range: {value}")))?;

        Ok(Self {
            base: ActionBase::new(arguments),
            offset_type,
            offset,
            previous_offset: 0,
        })
    }

    pub fn offset_type(&self) -> OffsetType {
        self.offset_type
    }

    /// Destination in bits.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Cursor recorded by the last `apply`.
    pub fn previous_offset(&self) -> usize {
        self.previous_offset
    }
}

impl Action for Goto {
    type Target = dyn EditorSurface;

    fn base(&self) -> &ActionBase<dyn EditorSurface> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase<dyn EditorSurface> {
        &mut self.base
    }

    fn apply(&mut self) -> Result<(), ActionError> {
        let target = self.base.require_target()?;
        let mut editor = target.borrow_mut();
        self.previous_offset = editor.cursor();
        editor.set_cursor(self.offset);
        self.base.set_applied(true);
        log::debug!(
            "{}: cursor {} -> {}",
            self.base.arguments().command_line(),
            self.previous_offset,
            self.offset
        );
        Ok(())
    }
}

impl ReversibleAction for Goto {
    fn undo(&mut self) -> Result<(), ActionError> {
        let target = self.base.target().ok_or(UndoActionError::TargetNotSet)?;
        if !self.base.applied() {
            return Err(UndoActionError::NotApplied.into());
        }
        target.borrow_mut().set_cursor(self.previous_offset);
        self.base.set_applied(false);
        Ok(())
    }
}
