//! Notification badge and bar in the top panel.

use agora_business::{Notice, NoticeLevel, Notifications};
use agora_states::{StateCtx, Time};
use chrono::{DateTime, Utc};
use egui::{Color32, Response, RichText, Ui};

use crate::utils::colors::{COLOR_AMBER, COLOR_GREEN, COLOR_RED};

/// Notices shown at once; older ones stay reachable through the badge count.
const VISIBLE_NOTICES: usize = 3;

fn level_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => COLOR_GREEN,
        NoticeLevel::Warning => COLOR_AMBER,
        NoticeLevel::Error => COLOR_RED,
    }
}

/// "just now", "42s ago", "3m ago", "2h ago".
pub fn age_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(created_at).num_seconds();
    if seconds < 5 {
        "just now".to_owned()
    } else if seconds < 60 {
        format!("{seconds}s ago")
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else {
        format!("{}h ago", seconds / 3600)
    }
}

/// Count of pending notices, coloured by the most severe one.
pub fn notification_badge(state_ctx: &StateCtx, ui: &mut Ui) -> Response {
    let Some(notifications) = state_ctx.state::<Notifications>() else {
        return ui.weak("No notifications");
    };
    if notifications.is_empty() {
        return ui.weak("No notifications");
    }

    let worst = notifications
        .iter()
        .map(|n| n.level)
        .max_by_key(|level| match level {
            NoticeLevel::Info => 0,
            NoticeLevel::Warning => 1,
            NoticeLevel::Error => 2,
        })
        .unwrap_or(NoticeLevel::Info);
    ui.label(
        RichText::new(format!("🔔 {}", notifications.len()))
            .strong()
            .color(level_color(worst)),
    )
}

/// The latest notices with a dismiss button each.
pub fn notification_bar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(notifications) = state_ctx.state::<Notifications>() else {
        return;
    };
    if notifications.is_empty() {
        return;
    }
    let now = state_ctx
        .state::<Time>()
        .map(|t| *t.as_ref())
        .unwrap_or_else(Utc::now);
    let mut latest: Vec<Notice> = notifications.iter().cloned().collect();
    latest.reverse();
    latest.truncate(VISIBLE_NOTICES);

    let mut dismissed = None;
    let mut clear = false;
    for notice in &latest {
        ui.horizontal(|ui| {
            ui.label(RichText::new("●").color(level_color(notice.level)));
            ui.label(&notice.message);
            ui.weak(age_label(notice.created_at, now));
            if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                dismissed = Some(notice.id);
            }
        });
    }
    if ui.small_button("Clear all").clicked() {
        clear = true;
    }

    if clear {
        state_ctx.update::<Notifications>(Notifications::clear);
    } else if let Some(id) = dismissed {
        state_ctx.update::<Notifications>(|n| {
            n.dismiss(id);
        });
    }
}
