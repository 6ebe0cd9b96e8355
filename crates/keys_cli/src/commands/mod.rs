pub mod duplicates;
pub mod missing;
