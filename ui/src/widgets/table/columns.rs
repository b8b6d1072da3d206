//! Column definitions shared by the record tables.

use egui_extras::Column;

/// Fixed column widths for consistent table layout
pub const ID_WIDTH: f32 = 50.0;
pub const BADGE_WIDTH: f32 = 130.0;
pub const TIMESTAMP_WIDTH: f32 = 140.0;
pub const COUNT_WIDTH: f32 = 80.0;
pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;

#[inline]
pub fn id() -> Column {
    Column::exact(ID_WIDTH)
}

/// Flexible text column sharing the remaining width.
#[inline]
pub fn text(min: f32) -> Column {
    Column::remainder().at_least(min).clip(true)
}

#[inline]
pub fn badge() -> Column {
    Column::exact(BADGE_WIDTH)
}

#[inline]
pub fn timestamp() -> Column {
    Column::exact(TIMESTAMP_WIDTH)
}

#[inline]
pub fn count() -> Column {
    Column::exact(COUNT_WIDTH)
}

#[inline]
pub fn actions(width: f32) -> Column {
    Column::exact(width)
}
