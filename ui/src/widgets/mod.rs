mod confirm_delete;
pub mod crop_dialog;
mod detail_modal;
pub mod editor_toolbar;
mod filter_bar;
mod notifications;
pub mod pagination;
pub mod table;

pub use confirm_delete::confirm_delete_dialog;
pub use crop_dialog::{CropDialogState, CropOutcome, CroppedImage, crop_dialog};
pub use detail_modal::{detail_modal, field_errors};
pub use editor_toolbar::{EditorToolbarState, editor_toolbar};
pub use filter_bar::filter_bar;
pub use notifications::{age_label, notification_badge, notification_bar};
pub use pagination::pagination;
pub use table::{RowAction, TableRecord, data_table};
