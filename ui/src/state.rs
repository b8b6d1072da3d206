use agora_business::{AdminConfig, Providers, register_admin};
use agora_states::{StateCtx, Time};
use log::warn;

use crate::pages::Page;
use crate::widgets::{CropDialogState, CroppedImage, EditorToolbarState};

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// The page shown in the central panel.
    pub page: Page,
    /// Formatting state of the post body editor.
    pub editor: EditorToolbarState,
    /// Open image crop dialog, if any.
    pub crop: Option<CropDialogState>,
    /// Last image cropped through the dialog.
    pub cropped: Option<CroppedImage>,
}

impl Default for State {
    /// Reads `AGORA_*` variables; falls back to the defaults when they are invalid.
    fn default() -> Self {
        let config = AdminConfig::init().unwrap_or_else(|err| {
            warn!("Invalid configuration, using defaults: {err}");
            AdminConfig::default()
        });
        let providers = Providers::from_config(&config);
        Self::with(config, providers)
    }
}

impl State {
    pub fn with(config: AdminConfig, providers: Providers) -> Self {
        let mut ctx = StateCtx::new();
        ctx.add_state(Time::default());
        register_admin(&mut ctx, config, providers);

        Self {
            ctx,
            page: Page::default(),
            editor: EditorToolbarState::default(),
            crop: None,
            cropped: None,
        }
    }

    /// Talks to the HTTP API at `base_url`.
    pub fn test(base_url: String) -> Self {
        let config = AdminConfig::with_api(base_url);
        let providers = Providers::from_config(&config);
        Self::with(config, providers)
    }

    /// In-memory providers over the seed data.
    pub fn seeded() -> Self {
        Self::with(AdminConfig::default(), Providers::seeded())
    }
}
