//! Pointer-driven crop and zoom over a source image, plus the final pixel crop.
//!
//! The crop frame is fixed in the middle of the viewport. The image is shown
//! scaled to fit the viewport, times the zoom factor, and can be panned under
//! the frame. Pan is clamped so the frame never leaves the image.

use std::fmt;
use std::io::Cursor;

use image::{GenericImageView as _, ImageFormat};
use log::debug;
use thiserror::Error;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 3.0;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CropError {
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("could not encode image: {0}")]
    Encode(String),
    #[error("crop {crop:?} lies outside the {width}x{height} image")]
    OutOfBounds {
        crop: PixelCrop,
        width: u32,
        height: u32,
    },
}

/// Crop rectangle in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Display-space offset, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

type CropCallback = Box<dyn FnMut(PixelCrop) + Send>;

pub struct CropSession {
    image_size: (u32, u32),
    viewport: (f32, f32),
    aspect: f32,
    zoom: f32,
    pan: Offset,
    drag: Option<(Offset, Offset)>,
    on_crop_complete: Option<CropCallback>,
}

impl fmt::Debug for CropSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropSession")
            .field("image_size", &self.image_size)
            .field("zoom", &self.zoom)
            .field("pan", &self.pan)
            .field("dragging", &self.drag.is_some())
            .finish_non_exhaustive()
    }
}

impl CropSession {
    /// `aspect` is the crop frame's width / height, e.g. `1.0` for avatars.
    pub fn new(image_width: u32, image_height: u32, viewport: (f32, f32), aspect: f32) -> Self {
        Self {
            image_size: (image_width.max(1), image_height.max(1)),
            viewport: (viewport.0.max(1.0), viewport.1.max(1.0)),
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
            zoom: MIN_ZOOM,
            pan: Offset::default(),
            drag: None,
            on_crop_complete: None,
        }
    }

    /// Reads the dimensions from an encoded image.
    pub fn for_image(bytes: &[u8], viewport: (f32, f32), aspect: f32) -> Result<Self, CropError> {
        let (width, height) = image::load_from_memory(bytes)
            .map_err(|e| CropError::Decode(e.to_string()))?
            .dimensions();
        Ok(Self::new(width, height, viewport, aspect))
    }

    pub fn on_crop_complete(mut self, callback: impl FnMut(PixelCrop) + Send + 'static) -> Self {
        self.on_crop_complete = Some(Box::new(callback));
        self
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Offset {
        self.pan
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Scale that fits the whole image in the viewport.
    fn base_scale(&self) -> f32 {
        let (iw, ih) = self.image_size;
        (self.viewport.0 / iw as f32).min(self.viewport.1 / ih as f32)
    }

    /// Display size of one source pixel.
    pub fn scale(&self) -> f32 {
        self.base_scale() * self.zoom
    }

    /// Crop frame size in display points: the largest `aspect` rectangle inside the unzoomed image.
    pub fn frame_size(&self) -> (f32, f32) {
        let s = self.base_scale();
        let (iw, ih) = (self.image_size.0 as f32 * s, self.image_size.1 as f32 * s);
        if iw / ih > self.aspect {
            (ih * self.aspect, ih)
        } else {
            (iw, iw / self.aspect)
        }
    }

    /// Displayed image size at the current zoom.
    pub fn display_size(&self) -> (f32, f32) {
        let s = self.scale();
        (self.image_size.0 as f32 * s, self.image_size.1 as f32 * s)
    }

    fn clamp_pan(&mut self) {
        let (dw, dh) = self.display_size();
        let (fw, fh) = self.frame_size();
        let max_x = ((dw - fw) / 2.0).max(0.0);
        let max_y = ((dh - fh) / 2.0).max(0.0);
        self.pan.x = self.pan.x.clamp(-max_x, max_x);
        self.pan.y = self.pan.y.clamp(-max_y, max_y);
    }

    pub fn pointer_down(&mut self, at: Offset) {
        self.drag = Some((at, self.pan));
    }

    pub fn pointer_move(&mut self, at: Offset) {
        if let Some((start, start_pan)) = self.drag {
            self.pan = Offset::new(start_pan.x + at.x - start.x, start_pan.y + at.y - start.y);
            self.clamp_pan();
        }
    }

    /// Ends a drag and reports the crop.
    pub fn pointer_up(&mut self) {
        if self.drag.take().is_some() {
            self.emit();
        }
    }

    /// Sets the zoom (clamped to `MIN_ZOOM..=MAX_ZOOM`) and reports the crop.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_pan();
        self.emit();
    }

    pub fn zoom_by(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    fn emit(&mut self) {
        let crop = self.crop_area_pixels();
        debug!("Crop area {crop:?}");
        if let Some(callback) = self.on_crop_complete.as_mut() {
            callback(crop);
        }
    }

    /// Source pixels under the crop frame, clamped to the image.
    pub fn crop_area_pixels(&self) -> PixelCrop {
        let s = self.scale();
        let (dw, dh) = self.display_size();
        let (fw, fh) = self.frame_size();
        let (iw, ih) = self.image_size;

        let left = ((dw - fw) / 2.0 - self.pan.x) / s;
        let top = ((dh - fh) / 2.0 - self.pan.y) / s;

        let x = (left.round().max(0.0) as u32).min(iw - 1);
        let y = (top.round().max(0.0) as u32).min(ih - 1);
        let width = ((fw / s).round() as u32).clamp(1, iw - x);
        let height = ((fh / s).round() as u32).clamp(1, ih - y);

        PixelCrop {
            x,
            y,
            width,
            height,
        }
    }
}

/// Crops the encoded image and re-encodes the result as PNG.
pub fn finalize(bytes: &[u8], crop: PixelCrop) -> Result<Vec<u8>, CropError> {
    let source = image::load_from_memory(bytes).map_err(|e| CropError::Decode(e.to_string()))?;
    let (width, height) = source.dimensions();

    let fits = crop.width > 0
        && crop.height > 0
        && crop.x.checked_add(crop.width).is_some_and(|r| r <= width)
        && crop.y.checked_add(crop.height).is_some_and(|b| b <= height);
    if !fits {
        return Err(CropError::OutOfBounds {
            crop,
            width,
            height,
        });
    }

    let cropped = source.crop_imm(crop.x, crop.y, crop.width, crop.height);
    let mut cursor = Cursor::new(Vec::new());
    cropped
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| CropError::Encode(e.to_string()))?;
    Ok(cursor.into_inner())
}
