//! # Keys Core
//!
//! Core data structures and types for the key validation engine.
//!
//! This crate provides the building blocks shared by the parser, the comparison
//! engine and the CLI. Datasets are reduced to their key fields before they reach
//! this layer, so every type here describes keys rather than full rows.
//!
//! ## Key Concepts
//!
//! - **Record**: the key fields of one row, field name to a single value or a list of values
//! - **IndexedRecord**: a record tagged with the row it was extracted from
//! - **FieldMapping**: a renaming table reconciling field names between two schemas
//! - **ValidationReport**: violations found by a foreign-key or uniqueness check
//!
//! ## Example
//!
//! ```rust
//! use keys_core::{FieldMapping, IndexedRecord, RecordBuilder};
//!
//! let donor = RecordBuilder::new()
//!     .value("donor_id", "DO-1")
//!     .values("specimens", ["SP-1", "SP-2"])
//!     .build()
//!     .unwrap();
//!
//! let row = IndexedRecord::new(0, donor);
//! assert_eq!(row.record.len(), 2);
//!
//! let mapping: FieldMapping = [("id", "donor_id")].into_iter().collect();
//! assert_eq!(mapping.map_name("id"), "donor_id");
//! ```

pub mod builder;
pub mod error;
pub mod message;
pub mod record;
pub mod report;

pub use builder::*;
pub use error::*;
pub use message::*;
pub use record::*;
pub use report::*;
