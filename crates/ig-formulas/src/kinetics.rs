//! Kinetic theory: characteristic molecular speeds and the Maxwell-Boltzmann
//! speed distribution.
//!
//! Temperature in K, molar mass in g/mol, speeds in m/s.

use std::f64::consts::PI;

use ig_core::constants::R_J;
use ig_core::ensure_positive;

use crate::error::{FormulaError, FormulaResult, checked_div, checked_sqrt, finite};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MolecularSpeeds {
    /// Mean speed, m/s
    pub mean: f64,
    /// Root-mean-square speed, m/s
    pub rms: f64,
    /// Most probable speed, m/s
    pub most_probable: f64,
    /// Mean translational kinetic energy per mole, J/mol
    pub mean_kinetic_energy: f64,
}

pub fn molecular_speeds(t: f64, molar_mass: f64) -> FormulaResult<MolecularSpeeds> {
    if molar_mass < 0.0 {
        return Err(FormulaError::InvalidArg {
            what: "molar mass must be positive",
        });
    }
    let m_kg = molar_mass / 1000.0;
    let rt = R_J * t;

    Ok(MolecularSpeeds {
        mean: checked_sqrt(checked_div(8.0 * rt, PI * m_kg, "molar mass")?, "temperature")?,
        rms: checked_sqrt(checked_div(3.0 * rt, m_kg, "molar mass")?, "temperature")?,
        most_probable: checked_sqrt(checked_div(2.0 * rt, m_kg, "molar mass")?, "temperature")?,
        mean_kinetic_energy: finite(1.5 * rt, "kinetic energy")?,
    })
}

/// Maxwell-Boltzmann speed density for one gas at one temperature.
///
/// f(v) = 4π·(M/(2πRT))^1.5 · v² · exp(−M·v²/(2RT)), M in kg/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxwellBoltzmann {
    /// 4π·(M/(2πRT))^1.5
    norm: f64,
    /// M/(2RT)
    beta: f64,
}

impl MaxwellBoltzmann {
    pub fn new(t: f64, molar_mass: f64) -> FormulaResult<Self> {
        let t = ensure_positive(t, "temperature")?;
        let m_kg = ensure_positive(molar_mass, "molar mass")? / 1000.0;
        let two_rt = 2.0 * R_J * t;
        Ok(Self {
            norm: finite(4.0 * PI * (m_kg / (PI * two_rt)).powf(1.5), "distribution norm")?,
            beta: m_kg / two_rt,
        })
    }

    /// Probability density at speed `v` (s/m). Zero once v² overflows.
    pub fn density(&self, v: f64) -> f64 {
        let v2 = v * v;
        let exponent = self.beta * v2;
        if exponent == f64::INFINITY {
            return 0.0;
        }
        self.norm * v2 * (-exponent).exp()
    }

    /// Lazily map speeds to densities.
    pub fn densities<I>(&self, speeds: I) -> impl Iterator<Item = f64> + use<I>
    where
        I: IntoIterator<Item = f64>,
    {
        let dist = *self;
        speeds.into_iter().map(move |v| dist.density(v))
    }

    /// Speed of the density peak, sqrt(2RT/M).
    pub fn peak_speed(&self) -> f64 {
        (1.0 / self.beta).sqrt()
    }
}

/// Eager form: densities for every speed in `speeds`.
pub fn maxwell_boltzmann(speeds: &[f64], t: f64, molar_mass: f64) -> FormulaResult<Vec<f64>> {
    let dist = MaxwellBoltzmann::new(t, molar_mass)?;
    Ok(dist.densities(speeds.iter().copied()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nitrogen_speeds_at_300k() {
        let s = molecular_speeds(300.0, 28.014).unwrap();
        assert!((s.mean - 476.1547624290384).abs() < 1e-6);
        assert!((s.rms - 516.8192751863191).abs() < 1e-6);
        assert!((s.most_probable - 421.9811711471751).abs() < 1e-6);
        assert!((s.mean_kinetic_energy - 1.5 * 8.314 * 300.0).abs() < 1e-9);
    }

    #[test]
    fn speed_ordering() {
        let s = molecular_speeds(500.0, 4.003).unwrap();
        assert!(s.most_probable < s.mean);
        assert!(s.mean < s.rms);
    }

    #[test]
    fn zero_molar_mass_is_division_by_zero() {
        assert!(matches!(
            molecular_speeds(300.0, 0.0),
            Err(FormulaError::DivisionByZero { .. })
        ));
        assert!(molecular_speeds(300.0, -4.0).is_err());
    }

    #[test]
    fn negative_temperature_is_domain_error() {
        assert!(matches!(
            molecular_speeds(-10.0, 28.0),
            Err(FormulaError::Domain { .. })
        ));
    }

    #[test]
    fn density_vanishes_at_extreme_speeds() {
        let dist = MaxwellBoltzmann::new(300.0, 28.014).unwrap();
        assert_eq!(dist.density(1e200), 0.0);
        assert_eq!(dist.density(-1e200), 0.0);
        assert_eq!(dist.density(1e6), 0.0);
    }

    #[test]
    fn density_integrates_to_one() {
        let dist = MaxwellBoltzmann::new(300.0, 28.014).unwrap();
        let dv = 0.5;
        let total: f64 = dist.densities((0..8000).map(|i| i as f64 * dv)).sum::<f64>() * dv;
        assert!((total - 1.0).abs() < 1e-6, "integral = {total}");
    }

    #[test]
    fn density_peaks_at_most_probable_speed() {
        let dist = MaxwellBoltzmann::new(300.0, 28.014).unwrap();
        let vp = molecular_speeds(300.0, 28.014).unwrap().most_probable;
        assert!((dist.peak_speed() - vp).abs() < 1e-9);
        assert!(dist.density(vp) > dist.density(vp - 5.0));
        assert!(dist.density(vp) > dist.density(vp + 5.0));
        assert_eq!(dist.density(0.0), 0.0);
    }

    #[test]
    fn eager_matches_lazy() {
        let speeds = [100.0, 400.0, 900.0];
        let eager = maxwell_boltzmann(&speeds, 350.0, 31.999).unwrap();
        let dist = MaxwellBoltzmann::new(350.0, 31.999).unwrap();
        let lazy: Vec<f64> = dist.densities(speeds).collect();
        assert_eq!(eager, lazy);
    }

    #[test]
    fn distribution_rejects_non_positive_inputs() {
        assert!(MaxwellBoltzmann::new(0.0, 28.0).is_err());
        assert!(MaxwellBoltzmann::new(300.0, 0.0).is_err());
    }
}
