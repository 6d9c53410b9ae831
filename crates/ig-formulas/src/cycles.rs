//! Carnot and Otto cycle analyzers.
//!
//! Work and heat are in J (R = 8.314 J/(mol·K)); cycle-point pressures are
//! reported in atm from PV = nRT with R = 0.0821 L·atm/(mol·K).

use ig_core::constants::{R_J, R_L_ATM};
use ig_core::ensure_positive;
use tracing::debug;

use crate::error::{FormulaError, FormulaResult, checked_div, checked_ln, finite};

/// One state on a cycle diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CyclePoint {
    pub label: &'static str,
    /// L
    pub volume: f64,
    /// K
    pub temperature: f64,
    /// atm
    pub pressure: f64,
}

impl CyclePoint {
    fn at(label: &'static str, n: f64, volume: f64, temperature: f64) -> FormulaResult<Self> {
        Ok(Self {
            label,
            volume: finite(volume, "cycle volume")?,
            temperature: finite(temperature, "cycle temperature")?,
            pressure: checked_div(n * R_L_ATM * temperature, volume, "cycle volume")?,
        })
    }
}

/// Heat absorbed and work done by the gas on one leg, J.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleLeg {
    pub label: &'static str,
    pub q: f64,
    pub w: f64,
}

fn require_gamma(gamma: f64) -> FormulaResult<f64> {
    if gamma.is_finite() && gamma > 1.0 {
        Ok(gamma)
    } else {
        Err(FormulaError::InvalidArg {
            what: "gamma must exceed 1",
        })
    }
}

/// η = 1 − T_cold/T_hot.
pub fn carnot_efficiency(t_hot: f64, t_cold: f64) -> FormulaResult<f64> {
    let t_cold = ensure_positive(t_cold, "cold reservoir temperature")?;
    if t_hot < t_cold {
        return Err(FormulaError::InvalidArg {
            what: "hot reservoir must be hotter than cold reservoir",
        });
    }
    Ok(1.0 - checked_div(t_cold, t_hot, "hot reservoir temperature")?)
}

/// Work done by the gas on an isothermal leg: nRT·ln(V_end/V_start).
pub fn isothermal_work(n: f64, t: f64, volume_ratio: f64) -> FormulaResult<f64> {
    Ok(n * R_J * t * checked_ln(volume_ratio, "volume ratio")?)
}

/// Work done by the gas on an adiabatic leg: nRT_start/(γ−1)·(1 − T_end/T_start).
pub fn adiabatic_work(n: f64, t_start: f64, temperature_ratio: f64, gamma: f64) -> FormulaResult<f64> {
    checked_div(n * R_J * t_start, gamma - 1.0, "gamma - 1").map(|w| w * (1.0 - temperature_ratio))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarnotInputs {
    pub n: f64,
    /// K
    pub t_hot: f64,
    /// K
    pub t_cold: f64,
    /// Volume at the start of the isothermal expansion, L
    pub v1: f64,
    /// Volume at the end of the isothermal expansion, L
    pub v2: f64,
    pub gamma: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CarnotCycle {
    pub efficiency: f64,
    /// Heat absorbed from the hot reservoir, J
    pub q_in: f64,
    /// Heat rejected to the cold reservoir (positive), J
    pub q_out: f64,
    pub net_work: f64,
    pub gamma: f64,
    pub legs: [CycleLeg; 4],
    pub points: [CyclePoint; 4],
}

/// Four legs: isothermal expansion (1→2), adiabatic expansion (2→3),
/// isothermal compression (3→4), adiabatic compression (4→1).
///
/// V3 and V4 follow from V·T^(1/(γ−1)) being constant along the adiabats.
pub fn carnot_cycle(inputs: &CarnotInputs) -> FormulaResult<CarnotCycle> {
    let CarnotInputs {
        n,
        t_hot,
        t_cold,
        v1,
        v2,
        gamma,
    } = *inputs;
    ensure_positive(n, "amount of substance")?;
    let v1 = ensure_positive(v1, "v1")?;
    let gamma = require_gamma(gamma)?;
    if v2 <= v1 {
        return Err(FormulaError::InvalidArg {
            what: "isothermal expansion needs v2 > v1",
        });
    }
    let efficiency = carnot_efficiency(t_hot, t_cold)?;

    let stretch = (t_hot / t_cold).powf(1.0 / (gamma - 1.0));
    let v3 = v2 * stretch;
    let v4 = v1 * stretch;

    let w12 = isothermal_work(n, t_hot, v2 / v1)?;
    let w23 = adiabatic_work(n, t_hot, t_cold / t_hot, gamma)?;
    let w34 = isothermal_work(n, t_cold, v4 / v3)?;
    let w41 = adiabatic_work(n, t_cold, t_hot / t_cold, gamma)?;

    let legs = [
        CycleLeg {
            label: "isothermal expansion",
            q: w12,
            w: w12,
        },
        CycleLeg {
            label: "adiabatic expansion",
            q: 0.0,
            w: w23,
        },
        CycleLeg {
            label: "isothermal compression",
            q: w34,
            w: w34,
        },
        CycleLeg {
            label: "adiabatic compression",
            q: 0.0,
            w: w41,
        },
    ];
    let net_work = finite(legs.iter().map(|l| l.w).sum(), "net work")?;

    let points = [
        CyclePoint::at("1", n, v1, t_hot)?,
        CyclePoint::at("2", n, v2, t_hot)?,
        CyclePoint::at("3", n, v3, t_cold)?,
        CyclePoint::at("4", n, v4, t_cold)?,
    ];

    let cycle = CarnotCycle {
        efficiency,
        q_in: w12,
        q_out: -w34,
        net_work,
        gamma,
        legs,
        points,
    };
    debug!(efficiency, net_work, "carnot cycle");
    Ok(cycle)
}

/// η = 1 − r^(1−γ).
pub fn otto_efficiency(compression_ratio: f64, gamma: f64) -> FormulaResult<f64> {
    let gamma = require_gamma(gamma)?;
    if !(compression_ratio.is_finite() && compression_ratio >= 1.0) {
        return Err(FormulaError::InvalidArg {
            what: "compression ratio must be at least 1",
        });
    }
    finite(1.0 - compression_ratio.powf(1.0 - gamma), "otto efficiency")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OttoInputs {
    pub n: f64,
    /// Intake temperature, K
    pub t1: f64,
    /// Intake (maximum) volume, L
    pub v1: f64,
    pub compression_ratio: f64,
    /// Heat added during combustion, J
    pub q_in: f64,
    pub gamma: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OttoCycle {
    pub efficiency: f64,
    pub q_in: f64,
    pub q_out: f64,
    pub net_work: f64,
    pub gamma: f64,
    pub points: [CyclePoint; 4],
}

/// Intake (1), compression (2), combustion (3), expansion (4).
///
/// T3 adds Q_in over the constant-volume heat capacity nR/(γ−1).
pub fn otto_cycle(inputs: &OttoInputs) -> FormulaResult<OttoCycle> {
    let OttoInputs {
        n,
        t1,
        v1,
        compression_ratio: r,
        q_in,
        gamma,
    } = *inputs;
    let n = ensure_positive(n, "amount of substance")?;
    let t1 = ensure_positive(t1, "intake temperature")?;
    let v1 = ensure_positive(v1, "intake volume")?;
    let efficiency = otto_efficiency(r, gamma)?;
    if !(q_in.is_finite() && q_in >= 0.0) {
        return Err(FormulaError::InvalidArg {
            what: "combustion heat input must be non-negative",
        });
    }

    let heating = r.powf(gamma - 1.0);
    let t2 = t1 * heating;
    let cv_total = n * R_J / (gamma - 1.0);
    let t3 = t2 + checked_div(q_in, cv_total, "heat capacity")?;
    let t4 = t3 / heating;

    let net_work = efficiency * q_in;
    let v2 = v1 / r;

    let points = [
        CyclePoint::at("intake", n, v1, t1)?,
        CyclePoint::at("compression", n, v2, t2)?,
        CyclePoint::at("combustion", n, v2, t3)?,
        CyclePoint::at("expansion", n, v1, t4)?,
    ];

    let cycle = OttoCycle {
        efficiency,
        q_in,
        q_out: q_in - net_work,
        net_work,
        gamma,
        points,
    };
    debug!(efficiency, t3, "otto cycle");
    Ok(cycle)
}
