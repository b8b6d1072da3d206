//! Dataset provider boundary and its implementations.

mod http;
mod memory;
mod traits;

pub use http::HttpProvider;
pub use memory::MemoryProvider;
pub use traits::{DatasetProvider, ListPage, ListRequest};
