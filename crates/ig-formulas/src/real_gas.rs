//! Van der Waals real-gas model and its ideal-gas counterpart.
//!
//! Uses R = 8.314 J/(mol·K) with V in liters, so pressures are in kPa when
//! `a` is in kPa·L²/mol² and `b` in L/mol.

use ig_core::constants::R_J;

use crate::error::{FormulaError, FormulaResult, checked_div, finite};

/// Van der Waals constants of one gas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VanDerWaals {
    /// Attraction, kPa·L²/mol²
    pub a: f64,
    /// Excluded volume, L/mol
    pub b: f64,
}

impl VanDerWaals {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Volume occupied by `n` moles of molecules, n·b.
    pub fn excluded_volume(&self, n: f64) -> f64 {
        n * self.b
    }
}

/// P = nRT/(V − nb) − a·n²/V².
///
/// Undefined at and inside the excluded volume (V ≤ nb).
pub fn vdw_pressure(t: f64, v: f64, n: f64, coeffs: VanDerWaals) -> FormulaResult<f64> {
    let excluded = coeffs.excluded_volume(n);
    if v <= excluded {
        return Err(FormulaError::ExcludedVolume {
            volume: v,
            excluded,
        });
    }
    let repulsive = checked_div(n * R_J * t, v - excluded, "free volume")?;
    let attractive = checked_div(coeffs.a * n * n, v * v, "volume")?;
    finite(repulsive - attractive, "Van der Waals pressure")
}

/// Sampling form of [`vdw_pressure`]: undefined points become NaN.
pub fn vdw_pressure_or_nan(t: f64, v: f64, n: f64, coeffs: VanDerWaals) -> f64 {
    vdw_pressure(t, v, n, coeffs).unwrap_or(f64::NAN)
}

/// P = nRT/V in the same unit system as [`vdw_pressure`].
pub fn ideal_pressure_kpa(t: f64, v: f64, n: f64) -> FormulaResult<f64> {
    checked_div(n * R_J * t, v, "volume")
}

/// Compressibility factor Z = P_vdw / P_ideal.
pub fn compressibility(t: f64, v: f64, n: f64, coeffs: VanDerWaals) -> FormulaResult<f64> {
    let real = vdw_pressure(t, v, n, coeffs)?;
    let ideal = ideal_pressure_kpa(t, v, n)?;
    checked_div(real, ideal, "ideal pressure")
}
