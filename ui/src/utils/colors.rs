//! Shared color constants for the UI.

use egui::Color32;

/// Forest green color for healthy/published/success status.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red color for banned/spam/failed status.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber color for pending/flagged status.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Neutral grey for hidden/draft status.
pub const COLOR_GREY: Color32 = Color32::from_rgb(128, 128, 128);

/// Colour of a status badge, keyed by the status label.
pub fn status_color(label: &str) -> Color32 {
    match label {
        "Active" | "Published" | "Visible" | "Success" => COLOR_GREEN,
        "Banned" | "Spam" | "Failure" | "Denied" => COLOR_RED,
        "Pending" | "FlaggedForReview" => COLOR_AMBER,
        _ => COLOR_GREY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderation_states_are_amber() {
        assert_eq!(status_color("FlaggedForReview"), COLOR_AMBER);
        assert_eq!(status_color("Pending"), COLOR_AMBER);
    }

    #[test]
    fn unknown_labels_are_neutral() {
        assert_eq!(status_color("Draft"), COLOR_GREY);
        assert_eq!(status_color(""), COLOR_GREY);
    }
}
