//! Heat, work and energy terms for the four basic processes.
//!
//! Two calculators live here:
//! - [`process_energetics`]: the classroom form. Single temperature `t`, with
//!   ΔT measured from the fixed 25 °C reference state.
//! - [`process_path`]: independent initial and final states. The missing
//!   final-state variables come from the gas law matching the process.
//!
//! Energies are in joules; P·V products in L·atm are converted with
//! 101.325 J/(L·atm) where the formulas call for it.

use std::fmt;
use std::str::FromStr;

use ig_core::constants::{L_ATM_TO_J, R_J, T_REF_K};
use ig_core::ensure_positive;
use tracing::debug;

use crate::error::{FormulaError, FormulaResult, checked_div, checked_ln, finite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Process {
    /// Constant pressure
    Isobaric,
    /// Constant volume
    Isochoric,
    /// Constant temperature
    Isothermal,
    /// No heat exchange
    Adiabatic,
}

impl Process {
    pub const ALL: [Process; 4] = [
        Process::Isobaric,
        Process::Isochoric,
        Process::Isothermal,
        Process::Adiabatic,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Process::Isobaric => "Isobaric",
            Process::Isochoric => "Isochoric",
            Process::Isothermal => "Isothermal",
            Process::Adiabatic => "Adiabatic",
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Process {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isobaric" | "constant-pressure" | "p" => Ok(Process::Isobaric),
            "isochoric" | "isovolumetric" | "constant-volume" | "v" => Ok(Process::Isochoric),
            "isothermal" | "constant-temperature" | "t" => Ok(Process::Isothermal),
            "adiabatic" | "isentropic" | "q" => Ok(Process::Adiabatic),
            _ => Err(FormulaError::InvalidArg {
                what: "unknown process",
            }),
        }
    }
}

/// Heat, work, internal energy and enthalpy change, all in J.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Energetics {
    pub q: f64,
    pub w: f64,
    pub delta_u: f64,
    pub delta_h: f64,
}

impl Energetics {
    fn checked(self) -> FormulaResult<Self> {
        Ok(Self {
            q: finite(self.q, "heat")?,
            w: finite(self.w, "work")?,
            delta_u: finite(self.delta_u, "internal energy change")?,
            delta_h: finite(self.delta_h, "enthalpy change")?,
        })
    }
}

impl fmt::Display for Energetics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "q  (heat)            = {:.2} J", self.q)?;
        writeln!(f, "w  (work)            = {:.2} J", self.w)?;
        writeln!(f, "ΔU (internal energy) = {:.2} J", self.delta_u)?;
        write!(f, "ΔH (enthalpy)        = {:.2} J", self.delta_h)
    }
}

/// Inputs of the basic calculator.
///
/// `t` in K, `p` in atm, `v1`/`v2` in L, `cp`/`cv` in J/(mol·K).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessInputs {
    pub n: f64,
    pub t: f64,
    pub p: f64,
    pub v1: f64,
    pub v2: f64,
    pub cp: f64,
    pub cv: f64,
}

/// Basic energetics with ΔT = T − 298.15 K.
///
/// The adiabatic work term uses the single pressure `p` for both volumes and
/// is left in L·atm, exactly as the classroom formula states.
pub fn process_energetics(process: Process, inputs: &ProcessInputs) -> FormulaResult<Energetics> {
    let ProcessInputs {
        n,
        t,
        p,
        v1,
        v2,
        cp,
        cv,
    } = *inputs;
    let delta_t = t - T_REF_K;

    let e = match process {
        Process::Isobaric => Energetics {
            q: n * cp * delta_t,
            w: -p * (v2 - v1) * L_ATM_TO_J,
            delta_u: n * cv * delta_t,
            delta_h: n * cp * delta_t,
        },
        Process::Isochoric => {
            let q = n * cv * delta_t;
            Energetics {
                q,
                w: 0.0,
                delta_u: q,
                delta_h: n * cp * delta_t,
            }
        }
        Process::Isothermal => isothermal(n, t, v1, v2)?,
        Process::Adiabatic => {
            let gamma = checked_div(cp, cv, "cv")?;
            let w = checked_div(p * v1 - p * v2, 1.0 - gamma, "1 - gamma")?;
            let delta_u = -w;
            Energetics {
                q: 0.0,
                w,
                delta_u,
                delta_h: delta_u + p * (v2 - v1) * L_ATM_TO_J,
            }
        }
    };

    let e = e.checked()?;
    debug!(%process, ?e, "process energetics");
    Ok(e)
}

fn isothermal(n: f64, t: f64, v1: f64, v2: f64) -> FormulaResult<Energetics> {
    let ratio = checked_div(v2, v1, "initial volume")?;
    let q = -n * R_J * t * checked_ln(ratio, "volume ratio")?;
    Ok(Energetics {
        q,
        w: -q,
        delta_u: 0.0,
        delta_h: 0.0,
    })
}

/// Temperature (K), pressure (atm) and volume (L) of one equilibrium state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatePoint {
    pub t: f64,
    pub p: f64,
    pub v: f64,
}

impl StatePoint {
    fn validate(&self) -> FormulaResult<()> {
        ensure_positive(self.t, "initial temperature")?;
        ensure_positive(self.p, "initial pressure")?;
        ensure_positive(self.v, "initial volume")?;
        Ok(())
    }
}

/// The one final-state variable the caller supplies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FinalSpec {
    Volume(f64),
    Pressure(f64),
    Temperature(f64),
}

/// Derive the full final state from the initial state and one final variable.
///
/// - Isobaric: Charles's law, V/T constant.
/// - Isochoric: Gay-Lussac's law, P/T constant.
/// - Isothermal: Boyle's law, PV constant.
/// - Adiabatic: P·V^γ and T·V^(γ−1) constant.
///
/// Supplying the variable the process holds fixed is an error: it does not
/// pin down the final state.
pub fn resolve_final_state(
    process: Process,
    initial: &StatePoint,
    spec: FinalSpec,
    gamma: f64,
) -> FormulaResult<StatePoint> {
    initial.validate()?;
    let StatePoint {
        t: t1,
        p: p1,
        v: v1,
    } = *initial;

    let final_state = match (process, spec) {
        (Process::Isobaric, FinalSpec::Volume(v2)) => {
            let v2 = ensure_positive(v2, "final volume")?;
            StatePoint {
                t: t1 * v2 / v1,
                p: p1,
                v: v2,
            }
        }
        (Process::Isobaric, FinalSpec::Temperature(t2)) => {
            let t2 = ensure_positive(t2, "final temperature")?;
            StatePoint {
                t: t2,
                p: p1,
                v: v1 * t2 / t1,
            }
        }
        (Process::Isochoric, FinalSpec::Pressure(p2)) => {
            let p2 = ensure_positive(p2, "final pressure")?;
            StatePoint {
                t: t1 * p2 / p1,
                p: p2,
                v: v1,
            }
        }
        (Process::Isochoric, FinalSpec::Temperature(t2)) => {
            let t2 = ensure_positive(t2, "final temperature")?;
            StatePoint {
                t: t2,
                p: p1 * t2 / t1,
                v: v1,
            }
        }
        (Process::Isothermal, FinalSpec::Volume(v2)) => {
            let v2 = ensure_positive(v2, "final volume")?;
            StatePoint {
                t: t1,
                p: p1 * v1 / v2,
                v: v2,
            }
        }
        (Process::Isothermal, FinalSpec::Pressure(p2)) => {
            let p2 = ensure_positive(p2, "final pressure")?;
            StatePoint {
                t: t1,
                p: p2,
                v: p1 * v1 / p2,
            }
        }
        (Process::Adiabatic, spec) => adiabatic_final_state(initial, spec, gamma)?,
        (Process::Isobaric, FinalSpec::Pressure(_)) => {
            return Err(FormulaError::InvalidArg {
                what: "pressure is held constant in an isobaric process",
            });
        }
        (Process::Isochoric, FinalSpec::Volume(_)) => {
            return Err(FormulaError::InvalidArg {
                what: "volume is held constant in an isochoric process",
            });
        }
        (Process::Isothermal, FinalSpec::Temperature(_)) => {
            return Err(FormulaError::InvalidArg {
                what: "temperature is held constant in an isothermal process",
            });
        }
    };

    Ok(StatePoint {
        t: finite(final_state.t, "final temperature")?,
        p: finite(final_state.p, "final pressure")?,
        v: finite(final_state.v, "final volume")?,
    })
}

fn adiabatic_final_state(
    initial: &StatePoint,
    spec: FinalSpec,
    gamma: f64,
) -> FormulaResult<StatePoint> {
    if !(gamma.is_finite() && gamma > 1.0) {
        return Err(FormulaError::InvalidArg {
            what: "adiabatic process needs gamma > 1",
        });
    }
    let StatePoint {
        t: t1,
        p: p1,
        v: v1,
    } = *initial;

    let v2 = match spec {
        FinalSpec::Volume(v2) => ensure_positive(v2, "final volume")?,
        FinalSpec::Pressure(p2) => {
            let p2 = ensure_positive(p2, "final pressure")?;
            v1 * (p1 / p2).powf(1.0 / gamma)
        }
        FinalSpec::Temperature(t2) => {
            let t2 = ensure_positive(t2, "final temperature")?;
            v1 * (t1 / t2).powf(1.0 / (gamma - 1.0))
        }
    };

    let ratio = v1 / v2;
    Ok(StatePoint {
        t: t1 * ratio.powf(gamma - 1.0),
        p: p1 * ratio.powf(gamma),
        v: v2,
    })
}

/// Inputs of the state-to-state calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInputs {
    pub n: f64,
    pub cp: f64,
    pub cv: f64,
    pub initial: StatePoint,
    pub spec: FinalSpec,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessPath {
    pub process: Process,
    pub initial: StatePoint,
    pub final_state: StatePoint,
    pub energetics: Energetics,
}

/// Resolve the final state, then compute energetics between the two states.
pub fn process_path(process: Process, inputs: &PathInputs) -> FormulaResult<ProcessPath> {
    let gamma = checked_div(inputs.cp, inputs.cv, "cv")?;
    let final_state = resolve_final_state(process, &inputs.initial, inputs.spec, gamma)?;
    debug!(%process, ?final_state, "resolved final state");
    let energetics = path_energetics(
        process,
        inputs.n,
        inputs.cp,
        inputs.cv,
        &inputs.initial,
        &final_state,
    )?;
    Ok(ProcessPath {
        process,
        initial: inputs.initial,
        final_state,
        energetics,
    })
}

/// Energetics between two known states, ΔT = T2 − T1.
pub fn path_energetics(
    process: Process,
    n: f64,
    cp: f64,
    cv: f64,
    initial: &StatePoint,
    final_state: &StatePoint,
) -> FormulaResult<Energetics> {
    let delta_t = final_state.t - initial.t;
    let pv1 = initial.p * initial.v;
    let pv2 = final_state.p * final_state.v;

    let e = match process {
        Process::Isobaric => Energetics {
            q: n * cp * delta_t,
            w: -initial.p * (final_state.v - initial.v) * L_ATM_TO_J,
            delta_u: n * cv * delta_t,
            delta_h: n * cp * delta_t,
        },
        Process::Isochoric => {
            let q = n * cv * delta_t;
            Energetics {
                q,
                w: 0.0,
                delta_u: q,
                delta_h: n * cp * delta_t,
            }
        }
        Process::Isothermal => isothermal(n, initial.t, initial.v, final_state.v)?,
        Process::Adiabatic => {
            let gamma = checked_div(cp, cv, "cv")?;
            let w = checked_div(pv1 - pv2, gamma - 1.0, "gamma - 1")? * L_ATM_TO_J;
            let delta_u = -w;
            Energetics {
                q: 0.0,
                w,
                delta_u,
                delta_h: delta_u + (pv2 - pv1) * L_ATM_TO_J,
            }
        }
    };
    e.checked()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ig_core::constants::{CP_DEFAULT, CV_DEFAULT};

    fn form(t: f64) -> ProcessInputs {
        ProcessInputs {
            n: 1.0,
            t,
            p: 1.0,
            v1: 1.0,
            v2: 2.0,
            cp: CP_DEFAULT,
            cv: CV_DEFAULT,
        }
    }

    #[test]
    fn isobaric_uses_reference_delta_t() {
        let e = process_energetics(Process::Isobaric, &form(308.15)).unwrap();
        assert!((e.q - 10.0 * CP_DEFAULT).abs() < 1e-9);
        assert!((e.w + 101.325).abs() < 1e-9);
        assert!((e.delta_u - 10.0 * CV_DEFAULT).abs() < 1e-9);
        assert_eq!(e.delta_h, e.q);
    }

    #[test]
    fn isochoric_does_no_work() {
        let e = process_energetics(Process::Isochoric, &form(318.15)).unwrap();
        assert_eq!(e.w, 0.0);
        assert_eq!(e.delta_u, e.q);
        assert!((e.q - 20.0 * CV_DEFAULT).abs() < 1e-9);
        assert!((e.delta_h - 20.0 * CP_DEFAULT).abs() < 1e-9);
    }

    #[test]
    fn at_reference_temperature_thermal_terms_vanish() {
        let e = process_energetics(Process::Isochoric, &form(T_REF_K)).unwrap();
        assert_eq!(e, Energetics::default());
    }

    #[test]
    fn isothermal_expansion_sign_convention() {
        let e = process_energetics(Process::Isothermal, &form(298.15)).unwrap();
        let expected = -8.314 * 298.15 * 2.0_f64.ln();
        assert!((e.q - expected).abs() < 1e-9);
        assert_eq!(e.w, -e.q);
        assert_eq!(e.delta_u, 0.0);
        assert_eq!(e.delta_h, 0.0);
    }

    #[test]
    fn isothermal_rejects_zero_initial_volume() {
        let inputs = ProcessInputs {
            v1: 0.0,
            ..form(300.0)
        };
        let err = process_energetics(Process::Isothermal, &inputs).unwrap_err();
        assert!(err.is_undefined_arithmetic());
    }

    #[test]
    fn isothermal_rejects_negative_ratio() {
        let inputs = ProcessInputs {
            v2: -1.0,
            ..form(300.0)
        };
        assert!(matches!(
            process_energetics(Process::Isothermal, &inputs),
            Err(FormulaError::Domain { .. })
        ));
    }

    #[test]
    fn adiabatic_classroom_formula() {
        let e = process_energetics(Process::Adiabatic, &form(300.0)).unwrap();
        let gamma = CP_DEFAULT / CV_DEFAULT;
        let w = (1.0 - 2.0) / (1.0 - gamma);
        assert_eq!(e.q, 0.0);
        assert!((e.w - w).abs() < 1e-12);
        assert_eq!(e.delta_u, -e.w);
        assert!((e.delta_h - (-w + 101.325)).abs() < 1e-9);
    }

    #[test]
    fn adiabatic_rejects_gamma_of_one() {
        let inputs = ProcessInputs {
            cp: 20.0,
            cv: 20.0,
            ..form(300.0)
        };
        assert!(matches!(
            process_energetics(Process::Adiabatic, &inputs),
            Err(FormulaError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn parse_process_names() {
        assert_eq!("Isobaric".parse::<Process>().unwrap(), Process::Isobaric);
        assert_eq!(
            "isovolumetric".parse::<Process>().unwrap(),
            Process::Isochoric
        );
        assert_eq!(" T ".parse::<Process>().unwrap(), Process::Isothermal);
        assert!("polytropic".parse::<Process>().is_err());
    }

    fn initial() -> StatePoint {
        StatePoint {
            t: 300.0,
            p: 2.0,
            v: 10.0,
        }
    }

    #[test]
    fn charles_law_for_isobaric() {
        let s = resolve_final_state(Process::Isobaric, &initial(), FinalSpec::Volume(20.0), 1.4)
            .unwrap();
        assert!((s.t - 600.0).abs() < 1e-9);
        assert_eq!(s.p, 2.0);

        let s = resolve_final_state(
            Process::Isobaric,
            &initial(),
            FinalSpec::Temperature(150.0),
            1.4,
        )
        .unwrap();
        assert!((s.v - 5.0).abs() < 1e-9);
    }

    #[test]
    fn gay_lussac_for_isochoric() {
        let s = resolve_final_state(
            Process::Isochoric,
            &initial(),
            FinalSpec::Temperature(450.0),
            1.4,
        )
        .unwrap();
        assert!((s.p - 3.0).abs() < 1e-9);
        assert_eq!(s.v, 10.0);
    }

    #[test]
    fn boyle_for_isothermal() {
        let s = resolve_final_state(
            Process::Isothermal,
            &initial(),
            FinalSpec::Pressure(4.0),
            1.4,
        )
        .unwrap();
        assert!((s.v - 5.0).abs() < 1e-9);
        assert_eq!(s.t, 300.0);
    }

    #[test]
    fn adiabatic_invariants_hold() {
        let gamma = 1.4;
        let init = initial();
        for spec in [
            FinalSpec::Volume(4.0),
            FinalSpec::Pressure(8.0),
            FinalSpec::Temperature(420.0),
        ] {
            let s = resolve_final_state(Process::Adiabatic, &init, spec, gamma).unwrap();
            let pv1 = init.p * init.v.powf(gamma);
            let pv2 = s.p * s.v.powf(gamma);
            assert!((pv1 - pv2).abs() / pv1 < 1e-9, "{spec:?}");
            let tv1 = init.t * init.v.powf(gamma - 1.0);
            let tv2 = s.t * s.v.powf(gamma - 1.0);
            assert!((tv1 - tv2).abs() / tv1 < 1e-9, "{spec:?}");
        }
    }

    #[test]
    fn held_variable_is_rejected() {
        let init = initial();
        assert!(matches!(
            resolve_final_state(Process::Isobaric, &init, FinalSpec::Pressure(2.0), 1.4),
            Err(FormulaError::InvalidArg { .. })
        ));
        assert!(resolve_final_state(Process::Isochoric, &init, FinalSpec::Volume(1.0), 1.4).is_err());
        assert!(
            resolve_final_state(Process::Isothermal, &init, FinalSpec::Temperature(1.0), 1.4)
                .is_err()
        );
    }

    #[test]
    fn non_positive_states_are_rejected() {
        let bad = StatePoint {
            v: 0.0,
            ..initial()
        };
        assert!(resolve_final_state(Process::Isobaric, &bad, FinalSpec::Volume(1.0), 1.4).is_err());
        assert!(
            resolve_final_state(Process::Isobaric, &initial(), FinalSpec::Volume(-1.0), 1.4)
                .is_err()
        );
        assert!(
            resolve_final_state(Process::Adiabatic, &initial(), FinalSpec::Volume(5.0), 1.0)
                .is_err()
        );
    }

    #[test]
    fn adiabatic_path_energy_balance() {
        let path = process_path(
            Process::Adiabatic,
            &PathInputs {
                n: 1.0,
                cp: CP_DEFAULT,
                cv: CV_DEFAULT,
                initial: initial(),
                spec: FinalSpec::Volume(20.0),
            },
        )
        .unwrap();
        let e = path.energetics;
        assert_eq!(e.q, 0.0);
        assert_eq!(e.delta_u, -e.w);
        // Expansion: the gas does work and cools.
        assert!(e.w > 0.0);
        assert!(path.final_state.t < path.initial.t);
        let gamma = CP_DEFAULT / CV_DEFAULT;
        assert!((e.delta_h - gamma * e.delta_u).abs() < 1e-9 * e.delta_h.abs());
    }

    #[test]
    fn isobaric_path_heat_follows_temperature_change() {
        let path = process_path(
            Process::Isobaric,
            &PathInputs {
                n: 2.0,
                cp: CP_DEFAULT,
                cv: CV_DEFAULT,
                initial: initial(),
                spec: FinalSpec::Temperature(350.0),
            },
        )
        .unwrap();
        let e = path.energetics;
        assert!((e.q - 2.0 * CP_DEFAULT * 50.0).abs() < 1e-9);
        assert!((e.delta_u - 2.0 * CV_DEFAULT * 50.0).abs() < 1e-9);
        let dv = path.final_state.v - 10.0;
        assert!((e.w + 2.0 * dv * 101.325).abs() < 1e-9);
    }

    #[test]
    fn isothermal_path_doubling_volume() {
        let path = process_path(
            Process::Isothermal,
            &PathInputs {
                n: 1.0,
                cp: CP_DEFAULT,
                cv: CV_DEFAULT,
                initial: initial(),
                spec: FinalSpec::Volume(20.0),
            },
        )
        .unwrap();
        assert!((path.final_state.p - 1.0).abs() < 1e-12);
        assert_eq!(path.final_state.t, 300.0);
        let e = path.energetics;
        let q = -8.314 * 300.0 * 2.0_f64.ln();
        assert!((e.q - q).abs() < 1e-9);
        assert!((e.q + 1728.85).abs() < 0.01);
        assert_eq!(e.w, -e.q);
        assert_eq!(e.delta_u, 0.0);
        assert_eq!(e.delta_h, 0.0);
    }

    #[test]
    fn isochoric_path_heating() {
        let path = process_path(
            Process::Isochoric,
            &PathInputs {
                n: 1.0,
                cp: 29.1,
                cv: 20.8,
                initial: initial(),
                spec: FinalSpec::Temperature(400.0),
            },
        )
        .unwrap();
        assert_eq!(path.final_state.v, 10.0);
        assert!((path.final_state.p - 2.0 * 400.0 / 300.0).abs() < 1e-12);
        let e = path.energetics;
        assert!((e.q - 2080.0).abs() < 1e-9);
        assert_eq!(e.w, 0.0);
        assert_eq!(e.delta_u, e.q);
        assert!((e.delta_h - 2910.0).abs() < 1e-9);
    }
}
