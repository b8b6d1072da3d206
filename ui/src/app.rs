use std::time::Duration;

use agora_business::{Notifications, refresh_all};
use agora_states::Time;
use log::error;

use crate::pages::{self, Page};
use crate::utils::drop_handler::{DropHandler, SystemDropHandler};
use crate::widgets::{CropDialogState, CropOutcome};
use crate::{state::State, widgets};

/// How often to poll for command results while any are in flight.
const IN_FLIGHT_REPAINT: Duration = Duration::from_millis(50);

pub struct AdminApp {
    state: State,
    started: bool,
    drop_handler: Box<dyn DropHandler>,
}

impl AdminApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            started: false,
            drop_handler: Box::new(SystemDropHandler),
        }
    }

    pub fn with_drop_handler(mut self, handler: impl DropHandler + 'static) -> Self {
        self.drop_handler = Box::new(handler);
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Loads every table the first time a frame is drawn.
    fn start(&mut self) {
        self.started = true;
        if let Err(err) = refresh_all(&mut self.state.ctx) {
            error!("Initial load failed: {err}");
            let message = err.to_string();
            self.state.ctx.update::<Notifications>(|n| {
                n.error(message);
            });
        }
    }

    /// Opens the crop dialog for an image dropped on the window.
    fn accept_drop(&mut self, ctx: &egui::Context) {
        if self.state.crop.is_some() {
            return;
        }
        let Some(image) = self.drop_handler.handle_drop(ctx) else {
            return;
        };
        let name = image.name.clone();
        match CropDialogState::open(image) {
            Ok(dialog) => self.state.crop = Some(dialog),
            Err(err) => {
                self.state.ctx.update::<Notifications>(|n| {
                    n.warning(format!("{name} cannot be cropped: {err}"));
                });
            }
        }
    }

    fn show_crop_dialog(&mut self, ui: &mut egui::Ui) {
        let Some(dialog) = self.state.crop.as_mut() else {
            return;
        };
        match widgets::crop_dialog(dialog, ui) {
            CropOutcome::Open => {}
            CropOutcome::Cancelled => self.state.crop = None,
            CropOutcome::Applied => {
                let cropped = self
                    .state
                    .crop
                    .take()
                    .and_then(|d| d.result().cloned())
                    .and_then(Result::ok);
                if let Some(cropped) = cropped {
                    let message = format!(
                        "{} cropped to {}x{}",
                        cropped.name, cropped.crop.width, cropped.crop.height
                    );
                    self.state.ctx.update::<Notifications>(|n| {
                        n.info(message);
                    });
                    self.state.cropped = Some(cropped);
                }
            }
        }
    }
}

impl eframe::App for AdminApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.started {
            self.start();
        }

        self.state.ctx.update::<Time>(Time::tick);
        self.accept_drop(ctx);
        // Sync Compute for render
        self.state.ctx.sync_computes();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong("Agora Admin");
                ui.separator();
                widgets::notification_badge(&self.state.ctx, ui);
            });
            widgets::notification_bar(&mut self.state.ctx, ui);
        });

        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(150.0)
            .show(ctx, |ui| {
                for page in Page::ALL {
                    ui.selectable_value(&mut self.state.page, page, page.label());
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.page {
                Page::Dashboard => pages::dashboard_page(&mut self.state, ui),
                Page::Users => pages::users_page(&mut self.state, ui),
                Page::Posts => pages::posts_page(&mut self.state, ui),
                Page::Comments => pages::comments_page(&mut self.state, ui),
                Page::AuditLogs => pages::audit_logs_page(&mut self.state, ui),
            }
            self.show_crop_dialog(ui);
        });

        if self.state.ctx.in_flight() > 0 {
            ctx.request_repaint_after(IN_FLIGHT_REPAINT);
        }
    }
}
