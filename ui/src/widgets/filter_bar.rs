//! Search box and categorical filters above a table.

use agora_business::admin::{clear_criteria, set_filter, set_query};
use agora_business::{AdminTableState, FilterChoice, FilterSpec, Record};
use agora_states::StateCtx;
use egui::{Button, ComboBox, Response, TextEdit, Ui};

use super::table::plural;

/// Text shown in a filter's combo box.
fn choice_text(spec: &FilterSpec, choice: FilterChoice) -> String {
    match choice {
        FilterChoice::All => format!("{}: All", spec.label),
        FilterChoice::Only(value) => format!("{}: {value}", spec.label),
    }
}

/// Renders the filter bar of the `R` table. Every change resets the table to page 1.
pub fn filter_bar<R: Record>(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let Some(state) = state_ctx.state::<AdminTableState<R>>() else {
        return ui.label("Table not registered");
    };
    let criteria = state.table.criteria().clone();
    let matching = state.table.filtered().len();
    let total = state.table.records().len();

    ui.horizontal_wrapped(|ui| {
        let mut query = criteria.query.clone();
        let search = ui.add(
            TextEdit::singleline(&mut query)
                .hint_text(format!("Search {}", plural::<R>()))
                .desired_width(220.0),
        );
        if search.changed() {
            set_query::<R>(state_ctx, &query);
        }

        for spec in R::filters() {
            let current = criteria.filters.get(spec.name);
            let mut selected = current;
            ComboBox::from_id_salt((R::KIND.path(), spec.name))
                .selected_text(choice_text(spec, current))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected, FilterChoice::All, "All");
                    for option in spec.options {
                        ui.selectable_value(&mut selected, FilterChoice::only(option), *option);
                    }
                });
            if selected != current {
                set_filter::<R>(state_ctx, spec.name, selected);
            }
        }

        if ui
            .add_enabled(!criteria.is_unconstrained(), Button::new("Clear filters"))
            .clicked()
        {
            clear_criteria::<R>(state_ctx);
        }

        ui.weak(format!("{matching} of {total}"));
    })
    .response
}
