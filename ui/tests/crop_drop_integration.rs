//! Dropping an image opens the crop dialog; applying it reports the crop.

mod common;

use std::io::Cursor;
use std::sync::Mutex;

use agora_ui::AdminApp;
use agora_ui::state::State;
use agora_ui::utils::drop_handler::{DropHandler, DroppedImage};
use kittest::Queryable;

use crate::common::TestCtx;

/// Hands out one queued file on the next frame.
#[derive(Default)]
struct QueuedDrop(Mutex<Option<DroppedImage>>);

impl QueuedDrop {
    fn with(image: DroppedImage) -> Self {
        Self(Mutex::new(Some(image)))
    }
}

impl DropHandler for QueuedDrop {
    fn handle_drop(&self, _ctx: &egui::Context) -> Option<DroppedImage> {
        self.0.lock().ok()?.take()
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut cursor = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("encode png");
    cursor.into_inner()
}

async fn dropped(image: DroppedImage) -> TestCtx<'static> {
    let app = AdminApp::new(State::seeded()).with_drop_handler(QueuedDrop::with(image));
    TestCtx::with_app(app).await
}

#[tokio::test]
async fn test_dropped_image_opens_crop_dialog() {
    let mut ctx = dropped(DroppedImage {
        name: "avatar.png".to_owned(),
        bytes: png(300, 200),
    })
    .await;

    assert!(ctx.state_mut().crop.is_some());
    assert!(ctx.harness().query_by_label("Apply").is_some());
}

#[tokio::test]
async fn test_apply_stores_a_square_crop() {
    let mut ctx = dropped(DroppedImage {
        name: "avatar.png".to_owned(),
        bytes: png(300, 200),
    })
    .await;

    ctx.harness_mut().get_by_label("Apply").click();
    ctx.settle().await;

    let state = ctx.state_mut();
    assert!(state.crop.is_none());
    let cropped = state.cropped.as_ref().expect("crop applied");
    assert_eq!(cropped.crop.width, cropped.crop.height);
    assert!(
        ctx.notices()
            .iter()
            .any(|m| m.starts_with("avatar.png cropped to"))
    );
}

#[tokio::test]
async fn test_cancel_discards_the_dialog() {
    let mut ctx = dropped(DroppedImage {
        name: "avatar.png".to_owned(),
        bytes: png(64, 64),
    })
    .await;

    ctx.harness_mut().get_by_label("Cancel").click();
    ctx.settle().await;

    let state = ctx.state_mut();
    assert!(state.crop.is_none());
    assert!(state.cropped.is_none());
}

#[tokio::test]
async fn test_non_image_drop_is_reported() {
    let mut ctx = dropped(DroppedImage {
        name: "notes.txt".to_owned(),
        bytes: b"plain text".to_vec(),
    })
    .await;

    assert!(ctx.state_mut().crop.is_none());
    assert!(
        ctx.notices()
            .iter()
            .any(|m| m.starts_with("notes.txt cannot be cropped"))
    );
}
