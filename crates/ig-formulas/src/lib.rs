//! ig-formulas: the thermodynamics formula library of idealgas.
//!
//! Stateless, pure functions over plain `f64` inputs:
//! - `ideal_gas`: solve PV = nRT for any one variable
//! - `process`: q, w, ΔU, ΔH for isobaric/isochoric/isothermal/adiabatic processes
//! - `kinetics`: molecular speeds and the Maxwell-Boltzmann distribution
//! - `real_gas`: Van der Waals pressure and compressibility
//! - `cycles`: Carnot and Otto cycle analyzers
//! - `curves`: sampled series for plotting
//!
//! Every formula returns a [`FormulaResult`]. Undefined arithmetic (division
//! by zero, log of a non-positive ratio, a volume inside the Van der Waals
//! excluded volume) comes back as an error value; nothing panics.
//!
//! Gas constants (molar mass, Cp, Cv, a, b) are parameters. Look them up in
//! `ig-gases` or pass your own.
//!
//! # Example
//!
//! ```
//! use ig_formulas::ideal_gas::{IdealGasQuery, solve};
//!
//! let p = solve(IdealGasQuery::Pressure { n: 1.0, t: 298.15, v: 1.0 }).unwrap();
//! assert_eq!(p.to_string(), "P = 24.4781 atm");
//! ```

pub mod curves;
pub mod cycles;
pub mod error;
pub mod ideal_gas;
pub mod kinetics;
pub mod process;
pub mod real_gas;

// Re-exports for ergonomics
pub use curves::{Series, VolumeRange, linspace};
pub use cycles::{
    CarnotCycle, CarnotInputs, CycleLeg, CyclePoint, OttoCycle, OttoInputs, carnot_cycle,
    carnot_efficiency, otto_cycle, otto_efficiency,
};
pub use error::{FormulaError, FormulaResult};
pub use ideal_gas::{IdealGasKnowns, IdealGasQuery, IdealGasSolution, SolveFor};
pub use kinetics::{MaxwellBoltzmann, MolecularSpeeds, maxwell_boltzmann, molecular_speeds};
pub use process::{
    Energetics, FinalSpec, PathInputs, Process, ProcessInputs, ProcessPath, StatePoint,
    path_energetics, process_energetics, process_path, resolve_final_state,
};
pub use real_gas::{VanDerWaals, compressibility, vdw_pressure, vdw_pressure_or_nan};
