mod layout;
mod shelf;

pub use layout::ShelfLayout;
pub use shelf::{AssembleShelf, ShelfPanels};
