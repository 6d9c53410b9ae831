//! Ideal gas law solver: PV = nRT with R = 0.0821 L·atm/(mol·K).
//!
//! Units throughout: P in atm, V in L, n in mol, T in K.

use std::fmt;
use std::str::FromStr;

use ig_core::constants::R_L_ATM;
use ig_core::kelvin_to_celsius;
use tracing::debug;

use crate::error::{FormulaError, FormulaResult, checked_div};

/// P = nRT/V.
pub fn pressure(n: f64, t: f64, v: f64) -> FormulaResult<f64> {
    checked_div(n * R_L_ATM * t, v, "volume")
}

/// V = nRT/P.
pub fn volume(n: f64, t: f64, p: f64) -> FormulaResult<f64> {
    checked_div(n * R_L_ATM * t, p, "pressure")
}

/// n = PV/(RT).
pub fn moles(p: f64, v: f64, t: f64) -> FormulaResult<f64> {
    checked_div(p * v, R_L_ATM * t, "temperature")
}

/// T = PV/(nR), in kelvin.
pub fn temperature(p: f64, v: f64, n: f64) -> FormulaResult<f64> {
    checked_div(p * v, n * R_L_ATM, "amount of substance")
}

/// Which variable of PV = nRT is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveFor {
    Pressure,
    Volume,
    Moles,
    Temperature,
}

impl SolveFor {
    pub const ALL: [SolveFor; 4] = [
        SolveFor::Pressure,
        SolveFor::Volume,
        SolveFor::Moles,
        SolveFor::Temperature,
    ];
}

impl FromStr for SolveFor {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "pressure" => Ok(SolveFor::Pressure),
            "v" | "volume" => Ok(SolveFor::Volume),
            "n" | "mol" | "moles" | "amount" => Ok(SolveFor::Moles),
            "t" | "temp" | "temperature" => Ok(SolveFor::Temperature),
            _ => Err(FormulaError::InvalidArg {
                what: "unknown ideal gas variable",
            }),
        }
    }
}

impl fmt::Display for SolveFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => write!(f, "Pressure (P)"),
            Self::Volume => write!(f, "Volume (V)"),
            Self::Moles => write!(f, "Moles (n)"),
            Self::Temperature => write!(f, "Temperature (T)"),
        }
    }
}

/// Exactly the three knowns needed for each unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdealGasQuery {
    Pressure { n: f64, t: f64, v: f64 },
    Volume { n: f64, t: f64, p: f64 },
    Moles { p: f64, v: f64, t: f64 },
    Temperature { p: f64, v: f64, n: f64 },
}

impl IdealGasQuery {
    pub fn target(&self) -> SolveFor {
        match self {
            Self::Pressure { .. } => SolveFor::Pressure,
            Self::Volume { .. } => SolveFor::Volume,
            Self::Moles { .. } => SolveFor::Moles,
            Self::Temperature { .. } => SolveFor::Temperature,
        }
    }
}

/// All four fields of a calculator form; the one being solved for is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasKnowns {
    pub p: f64,
    pub v: f64,
    pub n: f64,
    pub t: f64,
}

impl IdealGasKnowns {
    pub fn query(&self, target: SolveFor) -> IdealGasQuery {
        let Self { p, v, n, t } = *self;
        match target {
            SolveFor::Pressure => IdealGasQuery::Pressure { n, t, v },
            SolveFor::Volume => IdealGasQuery::Volume { n, t, p },
            SolveFor::Moles => IdealGasQuery::Moles { p, v, t },
            SolveFor::Temperature => IdealGasQuery::Temperature { p, v, n },
        }
    }
}

/// Solved variable, carrying its unit in the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IdealGasSolution {
    /// atm
    Pressure(f64),
    /// L
    Volume(f64),
    /// mol
    Moles(f64),
    Temperature { kelvin: f64, celsius: f64 },
}

impl IdealGasSolution {
    /// Value in the solver's base units (atm, L, mol, K).
    pub fn value(&self) -> f64 {
        match *self {
            Self::Pressure(v) | Self::Volume(v) | Self::Moles(v) => v,
            Self::Temperature { kelvin, .. } => kelvin,
        }
    }
}

impl fmt::Display for IdealGasSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure(p) => write!(f, "P = {p:.4} atm"),
            Self::Volume(v) => write!(f, "V = {v:.4} L"),
            Self::Moles(n) => write!(f, "n = {n:.4} mol"),
            Self::Temperature { kelvin, celsius } => {
                write!(f, "T = {kelvin:.2} K / {celsius:.2} °C")
            }
        }
    }
}

pub fn solve(query: IdealGasQuery) -> FormulaResult<IdealGasSolution> {
    let solution = match query {
        IdealGasQuery::Pressure { n, t, v } => IdealGasSolution::Pressure(pressure(n, t, v)?),
        IdealGasQuery::Volume { n, t, p } => IdealGasSolution::Volume(volume(n, t, p)?),
        IdealGasQuery::Moles { p, v, t } => IdealGasSolution::Moles(moles(p, v, t)?),
        IdealGasQuery::Temperature { p, v, n } => {
            let kelvin = temperature(p, v, n)?;
            IdealGasSolution::Temperature {
                kelvin,
                celsius: kelvin_to_celsius(kelvin),
            }
        }
    };
    debug!(?query, %solution, "solved ideal gas law");
    Ok(solution)
}
