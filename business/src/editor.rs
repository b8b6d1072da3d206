//! Toolbar glue for an external rich-text editing engine.
//!
//! The engine owns the document. The toolbar only issues commands and asks
//! whether a mark or block is active to render a button as pressed.

use std::collections::BTreeMap;
use std::fmt::Display;

use log::trace;

pub type Attrs = BTreeMap<String, String>;

/// What a toolbar button asks the engine about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveQuery {
    Mark(&'static str),
    Block { name: &'static str, attrs: Attrs },
}

pub trait EditorEngine {
    fn toggle_mark(&mut self, name: &str);

    /// Switches the current block to `name`, or back to a paragraph if it already is one.
    fn toggle_block(&mut self, name: &str, attrs: &Attrs);

    fn insert_node(&mut self, name: &str, attrs: &Attrs);

    /// Sets (or with `None` removes) the attribute carried by mark `name`.
    fn set_mark_attribute(&mut self, name: &str, value: Option<&str>);

    fn undo(&mut self) -> bool;

    fn redo(&mut self) -> bool;

    fn is_active(&self, query: &ActiveQuery) -> bool;
}

pub mod names {
    pub const BOLD: &str = "bold";
    pub const ITALIC: &str = "italic";
    pub const STRIKE: &str = "strike";
    pub const CODE: &str = "code";
    pub const LINK: &str = "link";
    pub const TEXT_STYLE: &str = "textStyle";

    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING: &str = "heading";
    pub const BULLET_LIST: &str = "bulletList";
    pub const ORDERED_LIST: &str = "orderedList";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const CODE_BLOCK: &str = "codeBlock";
    pub const HORIZONTAL_RULE: &str = "horizontalRule";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn level(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    fn attrs(self) -> Attrs {
        Attrs::from([("level".to_owned(), self.level().to_string())])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Strike,
    Code,
    Heading(HeadingLevel),
    BulletList,
    OrderedList,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    /// `None` removes the link.
    Link(Option<String>),
    /// CSS colour such as `#e03131`; `None` resets.
    TextColour(Option<String>),
    Undo,
    Redo,
}

impl ToolbarAction {
    /// Buttons in toolbar order. Link and colour carry no value here.
    pub fn buttons() -> Vec<ToolbarAction> {
        vec![
            ToolbarAction::Bold,
            ToolbarAction::Italic,
            ToolbarAction::Strike,
            ToolbarAction::Code,
            ToolbarAction::Heading(HeadingLevel::H1),
            ToolbarAction::Heading(HeadingLevel::H2),
            ToolbarAction::Heading(HeadingLevel::H3),
            ToolbarAction::BulletList,
            ToolbarAction::OrderedList,
            ToolbarAction::Blockquote,
            ToolbarAction::CodeBlock,
            ToolbarAction::HorizontalRule,
            ToolbarAction::Link(None),
            ToolbarAction::TextColour(None),
            ToolbarAction::Undo,
            ToolbarAction::Redo,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolbarAction::Bold => "Bold",
            ToolbarAction::Italic => "Italic",
            ToolbarAction::Strike => "Strikethrough",
            ToolbarAction::Code => "Inline code",
            ToolbarAction::Heading(HeadingLevel::H1) => "Heading 1",
            ToolbarAction::Heading(HeadingLevel::H2) => "Heading 2",
            ToolbarAction::Heading(HeadingLevel::H3) => "Heading 3",
            ToolbarAction::BulletList => "Bullet list",
            ToolbarAction::OrderedList => "Ordered list",
            ToolbarAction::Blockquote => "Quote",
            ToolbarAction::CodeBlock => "Code block",
            ToolbarAction::HorizontalRule => "Divider",
            ToolbarAction::Link(_) => "Link",
            ToolbarAction::TextColour(_) => "Text colour",
            ToolbarAction::Undo => "Undo",
            ToolbarAction::Redo => "Redo",
        }
    }

    /// Query deciding the pressed state; `None` for one-shot buttons.
    pub fn active_query(&self) -> Option<ActiveQuery> {
        use names::{
            BLOCKQUOTE, BOLD, BULLET_LIST, CODE, CODE_BLOCK, HEADING, ITALIC, LINK, ORDERED_LIST,
            STRIKE, TEXT_STYLE,
        };
        let block = |name| ActiveQuery::Block {
            name,
            attrs: Attrs::new(),
        };
        Some(match self {
            ToolbarAction::Bold => ActiveQuery::Mark(BOLD),
            ToolbarAction::Italic => ActiveQuery::Mark(ITALIC),
            ToolbarAction::Strike => ActiveQuery::Mark(STRIKE),
            ToolbarAction::Code => ActiveQuery::Mark(CODE),
            ToolbarAction::Link(_) => ActiveQuery::Mark(LINK),
            ToolbarAction::TextColour(_) => ActiveQuery::Mark(TEXT_STYLE),
            ToolbarAction::Heading(level) => ActiveQuery::Block {
                name: HEADING,
                attrs: level.attrs(),
            },
            ToolbarAction::BulletList => block(BULLET_LIST),
            ToolbarAction::OrderedList => block(ORDERED_LIST),
            ToolbarAction::Blockquote => block(BLOCKQUOTE),
            ToolbarAction::CodeBlock => block(CODE_BLOCK),
            ToolbarAction::HorizontalRule | ToolbarAction::Undo | ToolbarAction::Redo => {
                return None;
            }
        })
    }
}

impl Display for ToolbarAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Translates a toolbar click into engine commands.
pub fn apply_action(engine: &mut dyn EditorEngine, action: &ToolbarAction) {
    use names::{
        BLOCKQUOTE, BOLD, BULLET_LIST, CODE, CODE_BLOCK, HEADING, HORIZONTAL_RULE, ITALIC, LINK,
        ORDERED_LIST, STRIKE, TEXT_STYLE,
    };
    trace!("Toolbar action {action}");
    match action {
        ToolbarAction::Bold => engine.toggle_mark(BOLD),
        ToolbarAction::Italic => engine.toggle_mark(ITALIC),
        ToolbarAction::Strike => engine.toggle_mark(STRIKE),
        ToolbarAction::Code => engine.toggle_mark(CODE),
        ToolbarAction::Heading(level) => engine.toggle_block(HEADING, &level.attrs()),
        ToolbarAction::BulletList => engine.toggle_block(BULLET_LIST, &Attrs::new()),
        ToolbarAction::OrderedList => engine.toggle_block(ORDERED_LIST, &Attrs::new()),
        ToolbarAction::Blockquote => engine.toggle_block(BLOCKQUOTE, &Attrs::new()),
        ToolbarAction::CodeBlock => engine.toggle_block(CODE_BLOCK, &Attrs::new()),
        ToolbarAction::HorizontalRule => engine.insert_node(HORIZONTAL_RULE, &Attrs::new()),
        ToolbarAction::Link(href) => engine.set_mark_attribute(LINK, href.as_deref()),
        ToolbarAction::TextColour(colour) => {
            engine.set_mark_attribute(TEXT_STYLE, colour.as_deref());
        }
        ToolbarAction::Undo => {
            engine.undo();
        }
        ToolbarAction::Redo => {
            engine.redo();
        }
    }
}

pub fn is_pressed(engine: &dyn EditorEngine, action: &ToolbarAction) -> bool {
    action
        .active_query()
        .is_some_and(|query| engine.is_active(&query))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    /// Active marks with their attribute value, if any.
    marks: BTreeMap<String, Option<String>>,
    block: (String, Attrs),
    inserted: Vec<(String, Attrs)>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            marks: BTreeMap::new(),
            block: (names::PARAGRAPH.to_owned(), Attrs::new()),
            inserted: Vec::new(),
        }
    }
}

/// Engine tracking only the formatting state at the cursor, with undo history.
///
/// Stands in for the real editing engine when the console runs without one.
#[derive(Debug, Clone, Default)]
pub struct CursorEngine {
    current: Selection,
    undo: Vec<Selection>,
    redo: Vec<Selection>,
}

impl CursorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn change(&mut self, f: impl FnOnce(&mut Selection)) {
        let before = self.current.clone();
        f(&mut self.current);
        if self.current != before {
            self.undo.push(before);
            self.redo.clear();
        }
    }

    pub fn current_block(&self) -> &str {
        &self.current.block.0
    }

    pub fn mark_attribute(&self, name: &str) -> Option<&str> {
        self.current.marks.get(name).and_then(|v| v.as_deref())
    }

    pub fn inserted_nodes(&self) -> impl Iterator<Item = &str> {
        self.current.inserted.iter().map(|(name, _)| name.as_str())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

impl EditorEngine for CursorEngine {
    fn toggle_mark(&mut self, name: &str) {
        self.change(|s| {
            if s.marks.remove(name).is_none() {
                s.marks.insert(name.to_owned(), None);
            }
        });
    }

    fn toggle_block(&mut self, name: &str, attrs: &Attrs) {
        self.change(|s| {
            if s.block.0 == name && &s.block.1 == attrs {
                s.block = (names::PARAGRAPH.to_owned(), Attrs::new());
            } else {
                s.block = (name.to_owned(), attrs.clone());
            }
        });
    }

    fn insert_node(&mut self, name: &str, attrs: &Attrs) {
        self.change(|s| s.inserted.push((name.to_owned(), attrs.clone())));
    }

    fn set_mark_attribute(&mut self, name: &str, value: Option<&str>) {
        self.change(|s| match value {
            Some(value) => {
                s.marks.insert(name.to_owned(), Some(value.to_owned()));
            }
            None => {
                s.marks.remove(name);
            }
        });
    }

    fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.current, previous);
                self.redo.push(current);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.current, next);
                self.undo.push(current);
                true
            }
            None => false,
        }
    }

    fn is_active(&self, query: &ActiveQuery) -> bool {
        match query {
            ActiveQuery::Mark(name) => self.current.marks.contains_key(*name),
            // A query without attrs matches the block type regardless of its attrs.
            ActiveQuery::Block { name, attrs } => {
                self.current.block.0 == *name
                    && attrs
                        .iter()
                        .all(|(k, v)| self.current.block.1.get(k) == Some(v))
            }
        }
    }
}
