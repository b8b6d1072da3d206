//! Dashboard: record totals and what needs a moderator's attention.

use agora_business::DashboardStats;
use agora_business::dashboard::StatusCounts;
use egui::{Frame, Margin, RichText, Ui};

use super::Page;
use crate::state::State;
use crate::utils::colors::{COLOR_AMBER, COLOR_RED, status_color};

/// One summary card. Returns `true` when its "Open" button was clicked.
fn stats_card(ui: &mut Ui, title: &str, counts: &StatusCounts) -> bool {
    Frame::group(ui.style())
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_min_width(180.0);
            ui.vertical(|ui| {
                ui.strong(title);
                ui.label(RichText::new(counts.total.to_string()).size(28.0));
                for (status, count) in &counts.by_status {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("●").color(status_color(status)));
                        ui.label(format!("{status}: {count}"));
                    });
                }
                ui.button("Open").clicked()
            })
            .inner
        })
        .inner
}

pub fn dashboard_page(state: &mut State, ui: &mut Ui) {
    let stats = state
        .ctx
        .cached::<DashboardStats>()
        .cloned()
        .unwrap_or_default();

    ui.heading("Dashboard");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let waiting = stats.awaiting_moderation();
        let color = if waiting > 0 { COLOR_AMBER } else { ui.visuals().text_color() };
        ui.label(RichText::new(format!("Awaiting moderation: {waiting}")).color(color));
        ui.separator();
        let failed = stats.failed_audit_events();
        let color = if failed > 0 { COLOR_RED } else { ui.visuals().text_color() };
        ui.label(RichText::new(format!("Failed audit events: {failed}")).color(color));
    });
    ui.add_space(12.0);

    let cards = [
        (Page::Users, &stats.users),
        (Page::Posts, &stats.posts),
        (Page::Comments, &stats.comments),
        (Page::AuditLogs, &stats.audit_logs),
    ];
    ui.horizontal_wrapped(|ui| {
        for (page, counts) in cards {
            if stats_card(ui, page.label(), counts) {
                state.page = page;
            }
        }
    });
}

#[cfg(test)]
mod dashboard_page_test {
    use super::*;
    use egui_kittest::Harness;
    use kittest::Queryable;

    #[tokio::test]
    async fn shows_the_moderation_queue() {
        let mut state = State::seeded();
        agora_business::refresh_all(&mut state.ctx).expect("inside a runtime");
        state.ctx.settle().await;
        let waiting = state
            .ctx
            .cached::<DashboardStats>()
            .map(DashboardStats::awaiting_moderation)
            .expect("stats computed");

        let mut harness =
            Harness::new_ui_state(|ui, state: &mut State| dashboard_page(state, ui), state);
        harness.run();

        harness.get_by_label(&format!("Awaiting moderation: {waiting}"));
        harness.get_by_label("Users");
    }

    #[tokio::test]
    async fn open_button_switches_page() {
        let mut state = State::seeded();
        agora_business::refresh_all(&mut state.ctx).expect("inside a runtime");
        state.ctx.settle().await;

        let mut harness =
            Harness::new_ui_state(|ui, state: &mut State| dashboard_page(state, ui), state);
        harness.run();
        harness
            .query_all_by_label("Open")
            .next()
            .expect("a card")
            .click();
        harness.run();

        assert_eq!(harness.state().page, Page::Users);
    }
}
