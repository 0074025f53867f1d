use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::action_type::ActionType;
use super::error::{ActionError, InvalidCommandError, RedoActionError};

/// Argument vector of one command, validated against the action's arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    action_type: ActionType,
    argv: Vec<String>,
}

impl Arguments {
    pub fn new<I, S>(
        action_type: ActionType,
        argv: I,
        min_args: usize,
        max_args: usize,
    ) -> Result<Self, InvalidCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = Self {
            action_type,
            argv: argv.into_iter().map(Into::into).collect(),
        };
        let argc = arguments.argc();
        if argc < min_args || argc > max_args {
            return Err(InvalidCommandError::ArgumentCount {
                command: arguments.command_line(),
                argc,
                min: min_args,
                max: max_args,
            });
        }
        Ok(arguments)
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn argc(&self) -> usize {
        self.argv.len()
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.argv.get(index).map(String::as_str)
    }

    /// The command as it was typed, e.g. `goto byte 0x10`.
    pub fn command_line(&self) -> String {
        let mut line = self.action_type.to_string();
        for arg in &self.argv {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Target an action operates on. Actions never own their target.
pub enum Binding<T: ?Sized> {
    Unbound,
    Bound(Weak<RefCell<T>>),
}

impl<T: ?Sized> Binding<T> {
    /// `None` when unbound or when the target has been dropped.
    pub fn upgrade(&self) -> Option<Rc<RefCell<T>>> {
        match self {
            Binding::Unbound => None,
            Binding::Bound(target) => target.upgrade(),
        }
    }
}

impl<T: ?Sized> Default for Binding<T> {
    fn default() -> Self {
        Binding::Unbound
    }
}

impl<T: ?Sized> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Unbound => f.write_str("Unbound"),
            Binding::Bound(target) if target.strong_count() > 0 => f.write_str("Bound"),
            Binding::Bound(_) => f.write_str("Bound(dropped)"),
        }
    }
}

/// State shared by every action: arguments, target binding and the applied flag.
pub struct ActionBase<T: ?Sized> {
    arguments: Arguments,
    binding: Binding<T>,
    applied: bool,
}

impl<T: ?Sized> ActionBase<T> {
    pub fn new(arguments: Arguments) -> Self {
        Self {
            arguments,
            binding: Binding::Unbound,
            applied: false,
        }
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn target(&self) -> Option<Rc<RefCell<T>>> {
        self.binding.upgrade()
    }

    pub fn require_target(&self) -> Result<Rc<RefCell<T>>, ActionError> {
        self.target().ok_or(ActionError::TargetNotSet)
    }

    pub fn bind(&mut self, target: Option<&Rc<RefCell<T>>>) {
        self.binding = match target {
            Some(target) => Binding::Bound(Rc::downgrade(target)),
            None => Binding::Unbound,
        };
    }

    pub fn applied(&self) -> bool {
        self.applied
    }

    pub fn set_applied(&mut self, applied: bool) {
        self.applied = applied;
    }
}

impl<T: ?Sized> fmt::Debug for ActionBase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBase")
            .field("command", &self.arguments.command_line())
            .field("binding", &self.binding)
            .field("applied", &self.applied)
            .finish()
    }
}

/// An action that cannot be undone.
pub trait Action {
    type Target: ?Sized;

    fn base(&self) -> &ActionBase<Self::Target>;

    fn base_mut(&mut self) -> &mut ActionBase<Self::Target>;

    /// Implement all changes associated with the action. Fails with
    /// `ActionError::TargetNotSet` when no target is bound.
    fn apply(&mut self) -> Result<(), ActionError>;

    fn action_type(&self) -> ActionType {
        self.base().arguments().action_type()
    }

    fn argc(&self) -> usize {
        self.base().arguments().argc()
    }

    fn argv(&self) -> &[String] {
        self.base().arguments().argv()
    }

    fn command_line(&self) -> String {
        self.base().arguments().command_line()
    }

    fn target(&self) -> Option<Rc<RefCell<Self::Target>>> {
        self.base().target()
    }

    fn set_target(&mut self, target: Option<&Rc<RefCell<Self::Target>>>) {
        self.base_mut().bind(target);
    }

    fn applied(&self) -> bool {
        self.base().applied()
    }
}

/// Special actions involving the action handler rather than document content.
pub trait HandlerAction: Action {}

/// An action that can be undone.
pub trait ReversibleAction: Action {
    /// Reverse all changes performed by `apply`.
    fn undo(&mut self) -> Result<(), ActionError>;

    fn redo(&mut self) -> Result<(), ActionError> {
        redo(self)
    }
}

/// Default redo: re-apply an action that is currently undone.
pub fn redo<A: ReversibleAction + ?Sized>(action: &mut A) -> Result<(), ActionError> {
    if action.target().is_none() {
        return Err(RedoActionError::TargetNotSet.into());
    }
    if action.applied() {
        return Err(RedoActionError::AlreadyApplied.into());
    }
    action.apply()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::error::UndoActionError;

    #[derive(Default)]
    struct Counter {
        value: i64,
    }

    /// Adds its argument to a counter.
    struct Add {
        base: ActionBase<Counter>,
        amount: i64,
        previous: i64,
    }

    impl Add {
        const MIN_ARGS: usize = 1;
        const MAX_ARGS: usize = 1;

        fn new<I, S>(argv: I) -> Result<Self, InvalidCommandError>
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            let arguments = Arguments::new(ActionType::Update, argv, Self::MIN_ARGS, Self::MAX_ARGS)?;
            let amount = arguments.get(0).and_then(|arg| arg.parse().ok()).unwrap_or(0);
            Ok(Self {
                base: ActionBase::new(arguments),
                amount,
                previous: 0,
            })
        }
    }

    impl Action for Add {
        type Target = Counter;

        fn base(&self) -> &ActionBase<Counter> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ActionBase<Counter> {
            &mut self.base
        }

        fn apply(&mut self) -> Result<(), ActionError> {
            let target = self.base.require_target()?;
            let mut counter = target.borrow_mut();
            self.previous = counter.value;
            counter.value += self.amount;
            self.base.set_applied(true);
            Ok(())
        }
    }

    impl ReversibleAction for Add {
        fn undo(&mut self) -> Result<(), ActionError> {
            let target = self.base.target().ok_or(UndoActionError::TargetNotSet)?;
            if !self.base.applied() {
                return Err(UndoActionError::NotApplied.into());
            }
            target.borrow_mut().value = self.previous;
            self.base.set_applied(false);
            Ok(())
        }
    }

    #[test]
    fn test_arity_checked_at_construction() {
        let err = Add::new(Vec::<String>::new()).err().unwrap();
        assert_eq!(
            err,
            InvalidCommandError::ArgumentCount {
                command: "update".into(),
                argc: 0,
                min: 1,
                max: 1,
            }
        );
        assert!(Add::new(["1", "2"]).is_err());
    }

    #[test]
    fn test_arguments_accessors() {
        let add = Add::new(["5"]).unwrap();
        assert_eq!(add.argc(), 1);
        assert_eq!(add.argv(), ["5".to_string()]);
        assert_eq!(add.command_line(), "update 5");
        assert_eq!(add.action_type(), ActionType::Update);
        assert!(!add.applied());
        assert!(add.target().is_none());
    }

    #[test]
    fn test_apply_requires_target() {
        let mut add = Add::new(["5"]).unwrap();
        assert_eq!(add.apply(), Err(ActionError::TargetNotSet));
        assert!(!add.applied());
    }

    #[test]
    fn test_dropped_target_counts_as_unbound() {
        let mut add = Add::new(["5"]).unwrap();
        {
            let counter = Rc::new(RefCell::new(Counter::default()));
            add.set_target(Some(&counter));
            assert!(add.target().is_some());
        }
        assert!(add.target().is_none());
        assert_eq!(add.apply(), Err(ActionError::TargetNotSet));
        assert_eq!(format!("{:?}", add.base), "ActionBase { command: \"update 5\", binding: Bound(dropped), applied: false }");
    }

    #[test]
    fn test_undo_redo_toggle_applied() {
        let counter = Rc::new(RefCell::new(Counter { value: 10 }));
        let mut add = Add::new(["5"]).unwrap();
        add.set_target(Some(&counter));

        add.apply().unwrap();
        assert!(add.applied());
        assert_eq!(counter.borrow().value, 15);

        add.undo().unwrap();
        assert!(!add.applied());
        assert_eq!(counter.borrow().value, 10);

        add.redo().unwrap();
        assert!(add.applied());
        assert_eq!(counter.borrow().value, 15);
    }

    #[test]
    fn test_redo_rejects_applied_or_unbound() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut add = Add::new(["1"]).unwrap();
        assert_eq!(add.redo(), Err(RedoActionError::TargetNotSet.into()));

        add.set_target(Some(&counter));
        add.apply().unwrap();
        assert_eq!(add.redo(), Err(RedoActionError::AlreadyApplied.into()));
        assert_eq!(counter.borrow().value, 1);
    }

    #[test]
    fn test_undo_before_apply() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut add = Add::new(["1"]).unwrap();
        assert_eq!(add.undo(), Err(UndoActionError::TargetNotSet.into()));
        add.set_target(Some(&counter));
        assert_eq!(add.undo(), Err(UndoActionError::NotApplied.into()));
    }

    #[test]
    fn test_unbinding() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut add = Add::new(["1"]).unwrap();
        add.set_target(Some(&counter));
        add.set_target(None);
        assert!(add.target().is_none());
    }
}
