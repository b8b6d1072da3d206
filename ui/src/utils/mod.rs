pub mod colors;
pub mod drop_handler;
