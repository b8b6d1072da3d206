#![warn(clippy::all, rust_2018_idioms)]

//! egui front end of the Agora admin console.

pub mod app;
pub mod pages;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::AdminApp;
