//! Per-species property record.

use crate::error::{GasError, GasResult};

/// Constants a formula may need for one gas species.
///
/// Units:
/// - `molar_mass`: g/mol
/// - `cp`, `cv`: J/(mol·K)
/// - `vdw_a`: kPa·L²/mol² (1 bar·L²/mol² = 100 kPa·L²/mol²)
/// - `vdw_b`: L/mol
///
/// With R = 8.314 J/(mol·K) and volumes in liters these give Van der Waals
/// pressures in kPa.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GasProperties {
    pub molar_mass: f64,
    pub cp: f64,
    pub cv: f64,
    pub vdw_a: f64,
    pub vdw_b: f64,
}

impl GasProperties {
    /// Heat capacity ratio γ = Cp/Cv.
    pub fn gamma(&self) -> f64 {
        self.cp / self.cv
    }

    /// Check the constraints every record must satisfy:
    /// M > 0, Cp > Cv > 0, a ≥ 0, b ≥ 0, all finite.
    pub fn validate(&self, gas: &str) -> GasResult<()> {
        let invalid = |what| GasError::InvalidProperty {
            gas: gas.to_string(),
            what,
        };

        let fields = [self.molar_mass, self.cp, self.cv, self.vdw_a, self.vdw_b];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(invalid("all properties must be finite"));
        }
        if self.molar_mass <= 0.0 {
            return Err(invalid("molar mass must be positive"));
        }
        if self.cv <= 0.0 {
            return Err(invalid("cv must be positive"));
        }
        if self.cp <= self.cv {
            return Err(invalid("cp must exceed cv"));
        }
        if self.vdw_a < 0.0 || self.vdw_b < 0.0 {
            return Err(invalid("Van der Waals constants must be non-negative"));
        }
        Ok(())
    }
}
