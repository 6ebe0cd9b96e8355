//! # Keys Validator
//!
//! Comparison engine for key datasets. This crate provides:
//!
//! - Key normalization (field renaming and order-independent canonical keys)
//! - Foreign-key difference between two datasets
//! - Duplicate key detection within one dataset
//! - Default wording for schema violations
//! - A `KeyValidator` that turns offending rows into validation reports
//!
//! ## Example
//!
//! ```rust
//! use keys_core::IndexedRecord;
//! use keys_validator::{ForeignKeyRule, KeyValidator};
//!
//! let specimens = vec![
//!     IndexedRecord::new(0, [("donor_id", "DO1")].into_iter().collect()),
//!     IndexedRecord::new(1, [("donor_id", "DO7")].into_iter().collect()),
//! ];
//! let donors = vec![IndexedRecord::new(0, [("id", "DO1")].into_iter().collect())];
//!
//! let rule = ForeignKeyRule::builder()
//!     .field("donor_id", "id")
//!     .foreign_schema("donor")
//!     .build()
//!     .unwrap();
//!
//! let report = KeyValidator::new().check_foreign_keys(&rule, &specimens, &donors);
//!
//! if report.passed {
//!     println!("All foreign keys resolved");
//! } else {
//!     for violation in &report.violations {
//!         println!("Row {}: {}", violation.row_index, violation.message);
//!     }
//! }
//! ```

mod duplicates;
mod engine;
mod foreign_keys;
mod messages;
mod normalize;

pub use duplicates::*;
pub use engine::*;
pub use foreign_keys::*;
pub use messages::*;
pub use normalize::*;
