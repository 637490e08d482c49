// mod.rs - Data structures module

pub mod loaders;
pub mod record;
pub mod table;

// Re-export main types for convenience
pub use record::{AlleleCopy, AlleleRecord};
pub use table::{AlleleTable, TableSummary};
