pub mod assembly;
pub mod panel;
pub mod query;
