//! ig-gases: gas property tables for idealgas.
//!
//! Provides:
//! - `GasProperties`: molar mass, heat capacities and Van der Waals constants
//! - `GasTable`: an immutable species-id → properties mapping with alias search
//! - A built-in table of common gases
//! - YAML/JSON loading of user tables (feature `serde`)
//!
//! The formula library never reads a table. Callers look a gas up here and
//! pass its constants into the formulas as plain parameters, so new gases can
//! be added without touching any computation.
//!
//! # Example
//!
//! ```
//! use ig_gases::GasTable;
//!
//! let table = GasTable::builtin();
//! let n2 = table.find("nitrogen").unwrap();
//! assert_eq!(n2.id, "N2");
//! assert!(n2.properties.gamma() > 1.3);
//! ```

pub mod error;
pub mod properties;
pub mod table;

pub use error::{GasError, GasResult};
pub use properties::GasProperties;
pub use table::{GasEntry, GasTable};
