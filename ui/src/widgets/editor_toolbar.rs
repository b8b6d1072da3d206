//! Formatting toolbar for rich-text fields.
//!
//! Buttons come from [`ToolbarAction::buttons`]; pressed state is read back
//! from the engine on every frame.

use agora_business::editor::{CursorEngine, ToolbarAction, apply_action, is_pressed};
use egui::{Response, TextEdit, Ui};

/// Engine plus the values typed for link and colour buttons.
#[derive(Debug, Default)]
pub struct EditorToolbarState {
    pub engine: CursorEngine,
    pub link: String,
    pub colour: String,
}

impl EditorToolbarState {
    /// Fills in the value a link or colour button applies.
    fn with_value(&self, action: ToolbarAction) -> ToolbarAction {
        let value = |text: &str| {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_owned())
        };
        match action {
            ToolbarAction::Link(_) => ToolbarAction::Link(value(&self.link)),
            ToolbarAction::TextColour(_) => ToolbarAction::TextColour(value(&self.colour)),
            other => other,
        }
    }

    fn is_enabled(&self, action: &ToolbarAction) -> bool {
        match action {
            ToolbarAction::Undo => self.engine.can_undo(),
            ToolbarAction::Redo => self.engine.can_redo(),
            _ => true,
        }
    }
}

/// Renders the toolbar. Returns the action that was applied this frame, if any.
pub fn editor_toolbar(state: &mut EditorToolbarState, ui: &mut Ui) -> Option<ToolbarAction> {
    let mut clicked = None;

    ui.horizontal_wrapped(|ui| {
        for action in ToolbarAction::buttons() {
            let pressed = is_pressed(&state.engine, &action);
            let response = ui.add_enabled(
                state.is_enabled(&action),
                egui::Button::selectable(pressed, action.label()),
            );
            if response.clicked() {
                clicked = Some(state.with_value(action));
            }
        }
    });

    ui.horizontal(|ui| {
        value_input(ui, &mut state.link, "https://");
        value_input(ui, &mut state.colour, "#e03131");
    });

    if let Some(action) = &clicked {
        apply_action(&mut state.engine, action);
    }
    clicked
}

fn value_input(ui: &mut Ui, value: &mut String, hint: &str) -> Response {
    ui.add(TextEdit::singleline(value).hint_text(hint).desired_width(140.0))
}
