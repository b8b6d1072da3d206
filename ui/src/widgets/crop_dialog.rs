//! Avatar crop dialog driving a [`CropSession`].
//!
//! The image is drawn scaled and panned under a fixed frame. Dragging pans,
//! scrolling or the slider zooms. Crop reports from the session arrive over a
//! channel and are shown live.

use agora_business::crop::{self, CropError, CropSession, MAX_ZOOM, MIN_ZOOM, Offset, PixelCrop};
use egui::{
    Color32, ColorImage, Id, Pos2, Rect, Sense, Stroke, StrokeKind, TextureHandle,
    TextureOptions, Ui, Vec2, Window,
};
use flume::{Receiver, Sender};
use log::{info, warn};

use crate::utils::drop_handler::DroppedImage;

/// Size of the crop viewport in points.
pub const VIEWPORT: (f32, f32) = (320.0, 320.0);

/// Zoom change per scrolled point.
const SCROLL_ZOOM: f32 = 0.005;

/// Result of a finished crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    pub name: String,
    pub crop: PixelCrop,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropOutcome {
    Open,
    Applied,
    Cancelled,
}

pub struct CropDialogState {
    name: String,
    bytes: Vec<u8>,
    session: CropSession,
    pixels: Option<ColorImage>,
    texture: Option<TextureHandle>,
    reports: Receiver<PixelCrop>,
    last_report: Option<PixelCrop>,
    result: Option<Result<CroppedImage, CropError>>,
}

impl std::fmt::Debug for CropDialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropDialogState")
            .field("name", &self.name)
            .field("session", &self.session)
            .field("last_report", &self.last_report)
            .finish_non_exhaustive()
    }
}

impl CropDialogState {
    /// Decodes the dropped image and starts a square crop session on it.
    pub fn open(image: DroppedImage) -> Result<Self, CropError> {
        let decoded =
            image::load_from_memory(&image.bytes).map_err(|e| CropError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

        let (sender, reports): (Sender<PixelCrop>, Receiver<PixelCrop>) = flume::unbounded();
        let session = CropSession::new(rgba.width(), rgba.height(), VIEWPORT, 1.0)
            .on_crop_complete(move |crop| {
                let _ = sender.send(crop);
            });
        info!(
            "Cropping {} ({}x{})",
            image.name,
            rgba.width(),
            rgba.height()
        );

        Ok(Self {
            name: image.name,
            bytes: image.bytes,
            session,
            pixels: Some(pixels),
            texture: None,
            reports,
            last_report: None,
            result: None,
        })
    }

    pub fn session(&self) -> &CropSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CropSession {
        &mut self.session
    }

    /// Latest crop the session reported, after draining pending reports.
    pub fn last_report(&mut self) -> Option<PixelCrop> {
        if let Some(latest) = self.reports.try_iter().last() {
            self.last_report = Some(latest);
        }
        self.last_report
    }

    /// Crops the source bytes to the current frame.
    pub fn apply(&mut self) -> Result<CroppedImage, CropError> {
        let crop = self.session.crop_area_pixels();
        let result = crop::finalize(&self.bytes, crop).map(|png| CroppedImage {
            name: self.name.clone(),
            crop,
            png,
        });
        self.result = Some(result.clone());
        result
    }

    pub fn result(&self) -> Option<&Result<CroppedImage, CropError>> {
        self.result.as_ref()
    }

    fn texture(&mut self, ui: &Ui) -> Option<&TextureHandle> {
        if self.texture.is_none()
            && let Some(pixels) = self.pixels.take()
        {
            self.texture = Some(ui.ctx().load_texture(
                format!("crop_{}", self.name),
                pixels,
                TextureOptions::LINEAR,
            ));
        }
        self.texture.as_ref()
    }
}

fn offset_in(rect: Rect, pos: Pos2) -> Offset {
    Offset::new(pos.x - rect.left(), pos.y - rect.top())
}

/// Draws the crop area and feeds pointer and scroll input to the session.
fn crop_area(state: &mut CropDialogState, ui: &mut Ui) {
    let (rect, response) =
        ui.allocate_exact_size(Vec2::new(VIEWPORT.0, VIEWPORT.1), Sense::drag());

    if response.drag_started()
        && let Some(pos) = response.interact_pointer_pos()
    {
        state.session.pointer_down(offset_in(rect, pos));
    }
    if response.dragged()
        && let Some(pos) = response.interact_pointer_pos()
    {
        state.session.pointer_move(offset_in(rect, pos));
    }
    if response.drag_stopped() {
        state.session.pointer_up();
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            state.session.zoom_by(scroll * SCROLL_ZOOM);
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_gray(24));

    let pan = state.session.pan();
    let (dw, dh) = state.session.display_size();
    let (fw, fh) = state.session.frame_size();
    let image_rect =
        Rect::from_center_size(rect.center() + Vec2::new(pan.x, pan.y), Vec2::new(dw, dh));
    let frame_rect = Rect::from_center_size(rect.center(), Vec2::new(fw, fh));

    if let Some(texture) = state.texture(ui) {
        painter.image(
            texture.id(),
            image_rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }
    painter.rect_stroke(
        frame_rect,
        0.0,
        Stroke::new(2.0, Color32::WHITE),
        StrokeKind::Outside,
    );
}

/// Shows the crop dialog. The caller drops the state once the outcome is no longer `Open`.
pub fn crop_dialog(state: &mut CropDialogState, ui: &mut Ui) -> CropOutcome {
    let mut open = true;
    let mut outcome = CropOutcome::Open;

    Window::new(format!("Crop {}", state.name))
        .id(Id::new("crop_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            crop_area(state, ui);

            let mut zoom = state.session.zoom();
            if ui
                .add(egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM).text("Zoom"))
                .changed()
            {
                state.session.set_zoom(zoom);
            }

            if let Some(crop) = state.last_report() {
                ui.weak(format!(
                    "{}x{} at ({}, {})",
                    crop.width, crop.height, crop.x, crop.y
                ));
            }

            if let Some(Err(err)) = state.result() {
                ui.colored_label(Color32::RED, format!("Error: {err}"));
            }

            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    match state.apply() {
                        Ok(cropped) => {
                            info!("Cropped {} to {:?}", cropped.name, cropped.crop);
                            outcome = CropOutcome::Applied;
                        }
                        Err(err) => warn!("Crop failed: {err}"),
                    }
                }
                if ui.button("Cancel").clicked() {
                    outcome = CropOutcome::Cancelled;
                }
            });
        });

    if !open {
        outcome = CropOutcome::Cancelled;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut cursor = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .expect("encode png");
        cursor.into_inner()
    }

    fn dropped(width: u32, height: u32) -> DroppedImage {
        DroppedImage {
            name: "avatar.png".to_owned(),
            bytes: png(width, height),
        }
    }

    #[test]
    fn garbage_bytes_do_not_open() {
        let image = DroppedImage {
            name: "notes.txt".to_owned(),
            bytes: b"not an image".to_vec(),
        };
        assert!(matches!(
            CropDialogState::open(image),
            Err(CropError::Decode(_))
        ));
    }

    #[test]
    fn zoom_reports_reach_the_dialog() {
        let mut state = CropDialogState::open(dropped(200, 100)).expect("valid png");
        assert_eq!(state.last_report(), None);

        state.session_mut().set_zoom(2.0);
        let report = state.last_report().expect("zoom reports the crop");
        assert_eq!(report, state.session().crop_area_pixels());
    }

    #[test]
    fn apply_produces_a_square_png() {
        let mut state = CropDialogState::open(dropped(200, 100)).expect("valid png");
        let cropped = state.apply().expect("crop inside the image");

        assert_eq!(cropped.crop.width, cropped.crop.height);
        let decoded = image::load_from_memory(&cropped.png).expect("png output");
        assert_eq!(decoded.width(), cropped.crop.width);
        assert!(matches!(state.result(), Some(Ok(_))));
    }
}
