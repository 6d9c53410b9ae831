//! ig-core: stable foundation for idealgas.
//!
//! Contains:
//! - units (uom temperature type and the Celsius/kelvin conversions)
//! - constants (gas constants and reference values shared by every formula)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{IgError, IgResult};
pub use numeric::*;
pub use units::constants;
pub use units::*;
