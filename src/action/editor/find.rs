use super::{EditorSurface, EditorTarget};
use crate::action::action_type::ActionType;
use crate::action::base::{Action, ActionBase, Arguments};
use crate::action::error::{ActionError, InvalidCommandError};
use crate::constants::{BYTE_BITS, bits_to_bytes};
use crate::literal::{ByteOrder, LiteralError, display_bytes, parse_literal};
use crate::search_context::SharedSearchContext;

/// Search forward for a literal and move the cursor onto the match.
///
/// ```text
/// find LITERAL
///     find "hello"
///     find b'\xff\xff'
///     find 256
/// find [ @ | < | > | ! ] INTEGER_VALUE
///     find @ 0xffff
///     find < 65535
///     find ! 0b1111111111111111
/// ```
///
/// Integer literals given without a marker use the session's default byte
/// order, native unless configured otherwise.
#[derive(Debug)]
pub struct Find {
    base: ActionBase<dyn EditorSurface>,
    context: SharedSearchContext,
    find_bytes: Vec<u8>,
    previous_offset: usize,
}

impl Find {
    pub const MIN_ARGS: usize = 1;
    pub const MAX_ARGS: usize = 2;

    pub fn new<I, S>(argv: I, context: &SharedSearchContext) -> Result<Self, InvalidCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = Arguments::new(ActionType::Find, argv, Self::MIN_ARGS, Self::MAX_ARGS)?;
        let default_order = context.borrow().default_order();
        let find_bytes = parse_pattern(&arguments, default_order)
            .map_err(|err| InvalidCommandError::invalid(arguments.command_line(), err))?;

        Ok(Self {
            base: ActionBase::new(arguments),
            context: context.clone(),
            find_bytes,
            previous_offset: 0,
        })
    }

    pub fn find_bytes(&self) -> &[u8] {
        &self.find_bytes
    }

    pub fn previous_offset(&self) -> usize {
        self.previous_offset
    }
}

fn parse_pattern(arguments: &Arguments, default_order: ByteOrder) -> Result<Vec<u8>, LiteralError> {
    let Some((raw, marker)) = arguments.argv().split_last() else {
        return Err(LiteralError::EmptyPattern);
    };
    let order = match marker.first() {
        Some(marker) => marker.parse::<ByteOrder>()?,
        None => default_order,
    };
    parse_literal(raw)?.into_pattern(order)
}

impl Action for Find {
    type Target = dyn EditorSurface;

    fn base(&self) -> &ActionBase<dyn EditorSurface> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase<dyn EditorSurface> {
        &mut self.base
    }

    fn apply(&mut self) -> Result<(), ActionError> {
        let target = self.base.require_target()?;
        let start = bits_to_bytes(target.borrow().cursor());
        self.previous_offset = seek(&target, &self.find_bytes, Some(start), false)?;
        self.context.borrow_mut().publish(&self.find_bytes);
        self.base.set_applied(true);
        Ok(())
    }
}

/// Continue the last search forward, strictly past the cursor.
#[derive(Debug)]
pub struct FindNext {
    base: ActionBase<dyn EditorSurface>,
    context: SharedSearchContext,
    find_bytes: Vec<u8>,
    previous_offset: usize,
}

impl FindNext {
    pub const MIN_ARGS: usize = 0;
    pub const MAX_ARGS: usize = 0;

    pub fn new<I, S>(argv: I, context: &SharedSearchContext) -> Result<Self, InvalidCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = Arguments::new(ActionType::FindNext, argv, Self::MIN_ARGS, Self::MAX_ARGS)?;
        let find_bytes = last_pattern(&arguments, context)?;

        Ok(Self {
            base: ActionBase::new(arguments),
            context: context.clone(),
            find_bytes,
            previous_offset: 0,
        })
    }

    pub fn find_bytes(&self) -> &[u8] {
        &self.find_bytes
    }

    pub fn previous_offset(&self) -> usize {
        self.previous_offset
    }
}

impl Action for FindNext {
    type Target = dyn EditorSurface;

    fn base(&self) -> &ActionBase<dyn EditorSurface> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase<dyn EditorSurface> {
        &mut self.base
    }

    fn apply(&mut self) -> Result<(), ActionError> {
        let target = self.base.require_target()?;
        let start = bits_to_bytes(target.borrow().cursor()) + 1;
        self.previous_offset = seek(&target, &self.find_bytes, Some(start), false)?;
        self.context.borrow_mut().publish(&self.find_bytes);
        self.base.set_applied(true);
        Ok(())
    }
}

/// Continue the last search backward, strictly before the cursor.
///
/// The pattern is read from the search context when the action runs, not
/// when it is built.
#[derive(Debug)]
pub struct FindPrev {
    base: ActionBase<dyn EditorSurface>,
    context: SharedSearchContext,
    previous_offset: usize,
}

impl FindPrev {
    pub const MIN_ARGS: usize = 0;
    pub const MAX_ARGS: usize = 0;

    pub fn new<I, S>(argv: I, context: &SharedSearchContext) -> Result<Self, InvalidCommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments = Arguments::new(ActionType::FindPrev, argv, Self::MIN_ARGS, Self::MAX_ARGS)?;
        last_pattern(&arguments, context)?;

        Ok(Self {
            base: ActionBase::new(arguments),
            context: context.clone(),
            previous_offset: 0,
        })
    }

    pub fn previous_offset(&self) -> usize {
        self.previous_offset
    }
}

impl Action for FindPrev {
    type Target = dyn EditorSurface;

    fn base(&self) -> &ActionBase<dyn EditorSurface> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase<dyn EditorSurface> {
        &mut self.base
    }

    fn apply(&mut self) -> Result<(), ActionError> {
        let target = self.base.require_target()?;
        let pattern = last_pattern(self.base.arguments(), &self.context)?;
        // Nothing lies before the first byte
        let start = bits_to_bytes(target.borrow().cursor()).checked_sub(1);
        self.previous_offset = seek(&target, &pattern, start, true)?;
        self.base.set_applied(true);
        Ok(())
    }
}

fn last_pattern(
    arguments: &Arguments,
    context: &SharedSearchContext,
) -> Result<Vec<u8>, InvalidCommandError> {
    context
        .borrow()
        .find_bytes()
        .map(<[u8]>::to_vec)
        .ok_or_else(|| InvalidCommandError::NoPattern(arguments.command_line()))
}

/// Search the target's document and move the cursor onto the match. Returns
/// the cursor that was replaced; on a miss the cursor is left alone.
fn seek(
    target: &EditorTarget,
    pattern: &[u8],
    start: Option<usize>,
    reverse: bool,
) -> Result<usize, ActionError> {
    let mut editor = target.borrow_mut();
    let found = start.and_then(|start| editor.model().find(pattern, start, reverse));
    let Some(offset) = found else {
        log::debug!("search for {} failed", display_bytes(pattern));
        return Err(InvalidCommandError::NotFound(display_bytes(pattern)).into());
    };

    let previous = editor.cursor();
    editor.set_cursor(offset * BYTE_BITS);
    log::debug!("found {} at byte {offset:#x}", display_bytes(pattern));
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::ByteDocument;
    use crate::editor::Editor;
    use crate::search_context::SearchContext;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fixture {
        editor: Rc<RefCell<Editor>>,
        target: EditorTarget,
        context: SharedSearchContext,
    }

    impl Fixture {
        fn new(data: &[u8]) -> Self {
            let editor = Rc::new(RefCell::new(Editor::new(ByteDocument::from_bytes(data.to_vec()))));
            let target: EditorTarget = editor.clone();
            Self {
                editor,
                target,
                context: SearchContext::new().shared(),
            }
        }

        fn cursor(&self) -> usize {
            self.editor.borrow().cursor()
        }

        fn set_cursor(&self, cursor: usize) {
            self.editor.borrow_mut().set_cursor(cursor);
        }

        fn run<A: Action<Target = dyn EditorSurface>>(&self, mut action: A) -> Result<A, ActionError> {
            action.set_target(Some(&self.target));
            action.apply()?;
            Ok(action)
        }

        fn find(&self, argv: &[&str]) -> Result<Find, ActionError> {
            self.run(Find::new(argv.iter().copied(), &self.context)?)
        }

        fn find_next(&self) -> Result<FindNext, ActionError> {
            self.run(FindNext::new(Vec::<String>::new(), &self.context)?)
        }

        fn find_prev(&self) -> Result<FindPrev, ActionError> {
            self.run(FindPrev::new(Vec::<String>::new(), &self.context)?)
        }
    }

    const TWO_MATCHES: &[u8] = b"xxABxxxxABxx";

    #[test]
    fn test_find_moves_cursor_and_publishes() {
        let fixture = Fixture::new(TWO_MATCHES);
        fixture.set_cursor(3);

        let find = fixture.find(&["\"AB\""]).unwrap();
        assert_eq!(fixture.cursor(), 2 * BYTE_BITS);
        assert_eq!(find.previous_offset(), 3);
        assert_eq!(find.find_bytes(), b"AB");
        assert!(find.applied());
        assert_eq!(fixture.context.borrow().find_bytes(), Some(&b"AB"[..]));
    }

    #[test]
    fn test_find_includes_cursor_position() {
        let fixture = Fixture::new(TWO_MATCHES);
        fixture.find(&["AB"]).unwrap();
        fixture.find(&["AB"]).unwrap();
        assert_eq!(fixture.cursor(), 16);
    }

    #[test]
    fn test_find_next_makes_progress() {
        let fixture = Fixture::new(TWO_MATCHES);
        fixture.find(&["'AB'"]).unwrap();
        let first = fixture.cursor();

        let next = fixture.find_next().unwrap();
        assert_ne!(fixture.cursor(), first);
        assert_eq!(fixture.cursor(), 8 * BYTE_BITS);
        assert_eq!(next.previous_offset(), first);
        assert_eq!(next.find_bytes(), b"AB");

        let err = fixture.find_next().unwrap_err();
        assert_eq!(err, InvalidCommandError::NotFound("b'AB'".into()).into());
        assert_eq!(fixture.cursor(), 8 * BYTE_BITS);
    }

    #[test]
    fn test_find_prev_searches_before_cursor() {
        let fixture = Fixture::new(TWO_MATCHES);
        fixture.find(&["AB"]).unwrap();
        fixture.find_next().unwrap();

        fixture.find_prev().unwrap();
        assert_eq!(fixture.cursor(), 2 * BYTE_BITS);

        assert!(fixture.find_prev().is_err());
        assert_eq!(fixture.cursor(), 2 * BYTE_BITS);
    }

    #[test]
    fn test_find_prev_at_document_start() {
        let fixture = Fixture::new(b"ABAB");
        fixture.find(&["AB"]).unwrap();
        assert_eq!(fixture.cursor(), 0);
        assert_eq!(
            fixture.find_prev().unwrap_err(),
            InvalidCommandError::NotFound("b'AB'".into()).into()
        );
    }

    #[test]
    fn test_find_prev_uses_pattern_at_execution() {
        let fixture = Fixture::new(b"xxABxxAB");
        fixture.find(&["AB"]).unwrap();
        let mut find_prev = FindPrev::new(Vec::<String>::new(), &fixture.context).unwrap();

        fixture.set_cursor(0);
        fixture.find(&["xx"]).unwrap();
        assert_eq!(fixture.cursor(), 0);
        fixture.set_cursor(5 * BYTE_BITS);

        find_prev.set_target(Some(&fixture.target));
        find_prev.apply().unwrap();
        assert_eq!(fixture.cursor(), 4 * BYTE_BITS);
    }

    #[test]
    fn test_missing_pattern_leaves_cursor() {
        let fixture = Fixture::new(TWO_MATCHES);
        fixture.set_cursor(5);
        let err = fixture.find(&["ZZ"]).unwrap_err();
        assert_eq!(err.to_string(), "b'ZZ' not found");
        assert_eq!(fixture.cursor(), 5);
        assert_eq!(fixture.context.borrow().find_bytes(), None);
    }

    #[test]
    fn test_continuation_requires_prior_find() {
        let context = SearchContext::new().shared();
        assert_eq!(
            FindPrev::new(Vec::<String>::new(), &context).unwrap_err(),
            InvalidCommandError::NoPattern("findprev".into())
        );
        assert_eq!(
            FindNext::new(Vec::<String>::new(), &context).unwrap_err(),
            InvalidCommandError::NoPattern("findnext".into())
        );
    }

    #[test]
    fn test_integer_byte_orders() {
        // 256 big-endian at offset 1, little-endian at offset 4
        let fixture = Fixture::new(&[0xaa, 0x01, 0x00, 0xaa, 0x00, 0x01]);

        let little = fixture.find(&["<", "256"]).unwrap();
        assert_eq!(fixture.cursor(), 4 * BYTE_BITS);

        fixture.set_cursor(0);
        let big = fixture.find(&[">", "256"]).unwrap();
        assert_eq!(fixture.cursor(), BYTE_BITS);

        fixture.set_cursor(0);
        let network = fixture.find(&["!", "256"]).unwrap();
        assert_eq!(fixture.cursor(), BYTE_BITS);

        fixture.set_cursor(0);
        let native = fixture.find(&["@", "256"]).unwrap();
        let expected = if cfg!(target_endian = "little") { 4 } else { 1 };
        assert_eq!(fixture.cursor(), expected * BYTE_BITS);

        assert_ne!(little.find_bytes(), big.find_bytes());
        assert_eq!(big.find_bytes(), network.find_bytes());
        assert_eq!(native.find_bytes(), 256u16.to_ne_bytes());
    }

    #[test]
    fn test_single_integer_uses_default_order() {
        let fixture = Fixture::new(&[0xaa, 0x01, 0x00, 0xaa, 0x00, 0x01]);
        let find = Find::new(["256"], &fixture.context).unwrap();
        assert_eq!(find.find_bytes(), 256u16.to_ne_bytes());

        fixture.context.borrow_mut().set_default_order(ByteOrder::Big);
        fixture.find(&["256"]).unwrap();
        assert_eq!(fixture.cursor(), BYTE_BITS);
    }

    #[test]
    fn test_bytes_literal() {
        let fixture = Fixture::new(&[0xaa, 0x01, 0x00, 0xaa, 0x00, 0x01]);
        fixture.find(&[r"b'\x00\x01'"]).unwrap();
        assert_eq!(fixture.cursor(), 4 * BYTE_BITS);
    }

    #[test]
    fn test_large_text_literal() {
        let text: String = (0..400_000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let mut data = b"..".to_vec();
        data.extend_from_slice(text.as_bytes());
        data.extend_from_slice(b"..");
        let fixture = Fixture::new(&data);

        fixture.find(&[format!("'{text}'").as_str()]).unwrap();
        assert_eq!(fixture.cursor(), 2 * BYTE_BITS);
        fixture.set_cursor(data.len() * BYTE_BITS);
        fixture.find_prev().unwrap();
        assert_eq!(fixture.cursor(), 2 * BYTE_BITS);
    }

    #[test]
    fn test_invalid_literals() {
        let context = SearchContext::new().shared();
        for argv in [&["1.5"][..], &["=", "256"], &["<", "None"], &["b''"], &["x", "'AB'"]] {
            match Find::new(argv.iter().copied(), &context) {
                Err(InvalidCommandError::Invalid { command, .. }) => {
                    assert_eq!(command, format!("find {}", argv.join(" ")));
                }
                other => panic!("expected invalid command for {argv:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_argument_count() {
        let context = SearchContext::new().shared();
        assert!(matches!(
            Find::new(Vec::<String>::new(), &context),
            Err(InvalidCommandError::ArgumentCount { argc: 0, .. })
        ));
        assert!(matches!(
            Find::new(["<", "1", "2"], &context),
            Err(InvalidCommandError::ArgumentCount { argc: 3, .. })
        ));
        context.borrow_mut().publish(b"AB");
        assert!(matches!(
            FindNext::new(["AB"], &context),
            Err(InvalidCommandError::ArgumentCount { argc: 1, min: 0, max: 0, .. })
        ));
    }

    #[test]
    fn test_requires_target() {
        let context = SearchContext::new().shared();
        let mut find = Find::new(["AB"], &context).unwrap();
        assert_eq!(find.apply(), Err(ActionError::TargetNotSet));
        context.borrow_mut().publish(b"AB");
        let mut find_prev = FindPrev::new(Vec::<String>::new(), &context).unwrap();
        assert_eq!(find_prev.apply(), Err(ActionError::TargetNotSet));
    }
}
