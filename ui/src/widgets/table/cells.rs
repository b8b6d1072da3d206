//! Cell rendering functions for the record tables.
//!
//! Each function renders a specific type of cell content with
//! centered alignment and appropriate styling.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use egui::{RichText, Stroke, Ui};

use crate::utils::colors::{COLOR_RED, status_color};

/// Renders the ID cell with a border indicator.
#[inline]
pub fn render_id_cell(ui: &mut Ui, id: impl Display) {
    let rect = ui.available_rect_before_wrap();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().vline(
        rect.left(),
        rect.top()..=rect.bottom(),
        Stroke::new(2.0, border_color),
    );

    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(id.to_string()).monospace());
    });
}

#[inline]
pub fn render_text_cell(ui: &mut Ui, text: &str) {
    ui.add(egui::Label::new(text).truncate());
}

/// Secondary text, e.g. an email under a username column.
#[inline]
pub fn render_weak_cell(ui: &mut Ui, text: &str) {
    ui.add(egui::Label::new(RichText::new(text).weak()).truncate());
}

#[inline]
pub fn render_count_cell(ui: &mut Ui, count: u32) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(count.to_string()).monospace());
    });
}

/// Renders a status label coloured by its meaning.
#[inline]
pub fn render_badge_cell(ui: &mut Ui, label: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(label).strong().color(status_color(label)));
    });
}

#[inline]
pub fn render_timestamp_cell(ui: &mut Ui, at: &DateTime<Utc>) {
    ui.centered_and_justified(|ui| {
        ui.label(
            RichText::new(at.format("%Y-%m-%d %H:%M").to_string())
                .monospace()
                .small(),
        );
    });
}

/// Renders a small action button. Returns `true` if it was clicked.
///
/// Busy rows keep their buttons visible but disabled.
#[inline]
pub fn action_button(ui: &mut Ui, text: &str, hover: &str, busy: bool) -> bool {
    ui.add_enabled(!busy, egui::Button::new(text).small())
        .on_hover_text(hover)
        .clicked()
}

/// Same as [`action_button`] with a red label.
#[inline]
pub fn danger_button(ui: &mut Ui, text: &str, hover: &str, busy: bool) -> bool {
    ui.add_enabled(!busy, egui::Button::new(RichText::new(text).color(COLOR_RED)).small())
    .on_hover_text(hover)
    .clicked()
}

/// Draws a bottom border line for a cell.
#[inline]
pub fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
