//! Page navigation below a table.

use agora_business::admin::go_to_page;
use agora_business::{AdminTableState, Record};
use agora_states::StateCtx;
use egui::{Button, Response, Ui};

/// "Showing 11-20 of 25", or "No results" for an empty filtered set.
pub fn range_label(start: usize, end: usize, total: usize) -> String {
    if total == 0 {
        "No results".to_owned()
    } else {
        format!("Showing {}-{end} of {total}", start + 1)
    }
}

pub fn pagination<R: Record>(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let Some(state) = state_ctx.state::<AdminTableState<R>>() else {
        return ui.label("Table not registered");
    };
    let paginator = state.table.paginator();
    let page = paginator.page();
    let total_pages = paginator.total_pages();
    let range = paginator.range();
    let total_items = paginator.total_items();

    ui.horizontal(|ui| {
        let mut target = None;
        if ui.add_enabled(page > 1, Button::new("◀ Prev")).clicked() {
            target = Some(page - 1);
        }
        ui.label(format!("Page {page} of {total_pages}"));
        if ui.add_enabled(page < total_pages, Button::new("Next ▶")).clicked() {
            target = Some(page + 1);
        }
        ui.separator();
        ui.weak(range_label(range.start, range.end, total_items));

        if let Some(page) = target {
            go_to_page::<R>(state_ctx, page);
        }
    })
    .response
}

#[cfg(test)]
mod tests {
    use super::range_label;

    #[test]
    fn range_label_is_one_based() {
        assert_eq!(range_label(10, 20, 25), "Showing 11-20 of 25");
        assert_eq!(range_label(20, 25, 25), "Showing 21-25 of 25");
    }

    #[test]
    fn empty_set_has_no_range() {
        assert_eq!(range_label(0, 0, 0), "No results");
    }
}
