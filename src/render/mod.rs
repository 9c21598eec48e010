pub mod page;

pub use page::{render_view, ViewTemplate};
