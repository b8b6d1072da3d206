//! Generic table controller shared by every admin page.

mod criteria;
mod data_table;
mod detail;
mod paginator;

pub use criteria::{Criteria, FilterChoice, FilterSet};
pub use data_table::DataTable;
pub use detail::{DetailModal, DetailView};
pub use paginator::Paginator;
