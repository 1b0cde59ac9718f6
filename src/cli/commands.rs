pub mod export;
pub mod predict;
pub mod serve;

pub use export::export_table;
pub use predict::predict;
pub use serve::serve;
