//! Drag-and-drop of avatar images onto the window.
//!
//! `DropHandler` abstracts where dropped files come from so tests can inject
//! bytes without system events.

use log::{debug, warn};

/// Encoded bytes of a dropped file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

pub trait DropHandler {
    /// Returns the first dropped file of this frame, if any.
    fn handle_drop(&self, ctx: &egui::Context) -> Option<DroppedImage>;
}

/// Reads egui's dropped-file events.
#[derive(Debug, Default)]
pub struct SystemDropHandler;

impl DropHandler for SystemDropHandler {
    fn handle_drop(&self, ctx: &egui::Context) -> Option<DroppedImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        dropped.iter().find_map(read_dropped_file)
    }
}

fn read_dropped_file(file: &egui::DroppedFile) -> Option<DroppedImage> {
    if let Some(bytes) = &file.bytes {
        return Some(DroppedImage {
            name: file.name.clone(),
            bytes: bytes.to_vec(),
        });
    }

    let path = file.path.as_ref()?;
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!("Read {} bytes from {}", bytes.len(), path.display());
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.name.clone());
            Some(DroppedImage { name, bytes })
        }
        Err(err) => {
            warn!("Failed to read dropped file {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn in_memory_bytes_are_used_as_is() {
        let file = egui::DroppedFile {
            name: "avatar.png".to_owned(),
            bytes: Some(Arc::from(vec![1_u8, 2, 3])),
            ..Default::default()
        };

        let dropped = read_dropped_file(&file).expect("bytes present");
        assert_eq!(dropped.name, "avatar.png");
        assert_eq!(dropped.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn file_without_content_is_skipped() {
        let file = egui::DroppedFile {
            name: "ghost.png".to_owned(),
            ..Default::default()
        };
        assert!(read_dropped_file(&file).is_none());
    }
}
