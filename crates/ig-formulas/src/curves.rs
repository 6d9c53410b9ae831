//! (x, y, label) series for a plotting layer.
//!
//! Nothing here renders. Each function samples one of the formulas over a
//! range and returns plain vectors; undefined samples are NaN so a plotter
//! leaves a gap instead of drawing through a singularity.

use tracing::warn;

use crate::cycles::{CarnotCycle, CyclePoint, OttoCycle};
use crate::error::{FormulaError, FormulaResult};
use crate::ideal_gas;
use crate::kinetics::MaxwellBoltzmann;
use crate::real_gas::{self, VanDerWaals};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Two-column CSV with a header row. NaN samples are written as empty cells.
    pub fn to_csv(&self, x_header: &str, y_header: &str) -> String {
        let mut out = format!("{x_header},{y_header}\n");
        for (x, y) in self.x.iter().zip(&self.y) {
            if y.is_nan() {
                out.push_str(&format!("{x},\n"));
            } else {
                out.push_str(&format!("{x},{y}\n"));
            }
        }
        out
    }
}

/// `points` evenly spaced values from `start` to `end`, endpoint exact.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| start + i as f64 * delta).collect();
            values[points - 1] = end;
            values
        }
    }
}

/// Volume axis for P–V plots, L.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeRange {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl Default for VolumeRange {
    /// 0.1 L to 5 L in 200 samples.
    fn default() -> Self {
        Self {
            start: 0.1,
            end: 5.0,
            points: 200,
        }
    }
}

impl VolumeRange {
    fn samples(&self) -> FormulaResult<Vec<f64>> {
        if !(self.start > 0.0 && self.end > self.start && self.points >= 2) {
            return Err(FormulaError::InvalidArg {
                what: "volume range must be positive, increasing, with at least 2 points",
            });
        }
        Ok(linspace(self.start, self.end, self.points))
    }
}

/// Isotherm P = nRT/V in atm.
pub fn isotherm(n: f64, t: f64, range: VolumeRange) -> FormulaResult<Series> {
    let x = range.samples()?;
    let y = x
        .iter()
        .map(|&v| ideal_gas::pressure(n, t, v))
        .collect::<FormulaResult<Vec<_>>>()?;
    Ok(Series {
        label: format!("Isothermal {t:.2} K"),
        x,
        y,
    })
}

/// Ideal and Van der Waals isotherms in kPa, `[ideal, real]`.
pub fn vdw_comparison(
    n: f64,
    t: f64,
    coeffs: VanDerWaals,
    range: VolumeRange,
) -> FormulaResult<[Series; 2]> {
    let x = range.samples()?;
    let ideal = x
        .iter()
        .map(|&v| real_gas::ideal_pressure_kpa(t, v, n))
        .collect::<FormulaResult<Vec<_>>>()?;
    let real: Vec<f64> = x
        .iter()
        .map(|&v| real_gas::vdw_pressure_or_nan(t, v, n, coeffs))
        .collect();

    let undefined = real.iter().filter(|p| p.is_nan()).count();
    if undefined > 0 {
        warn!(
            undefined,
            excluded = coeffs.excluded_volume(n),
            "Van der Waals samples inside the excluded volume"
        );
    }

    Ok([
        Series {
            label: "Ideal gas".to_string(),
            x: x.clone(),
            y: ideal,
        },
        Series {
            label: "Van der Waals".to_string(),
            x,
            y: real,
        },
    ])
}

/// Maxwell-Boltzmann density from 0 to `v_max` m/s.
pub fn speed_distribution(
    t: f64,
    molar_mass: f64,
    v_max: f64,
    points: usize,
) -> FormulaResult<Series> {
    if !(v_max > 0.0 && points >= 2) {
        return Err(FormulaError::InvalidArg {
            what: "speed range must be positive with at least 2 points",
        });
    }
    let dist = MaxwellBoltzmann::new(t, molar_mass)?;
    let x = linspace(0.0, v_max, points);
    let y = dist.densities(x.iter().copied()).collect();
    Ok(Series {
        label: format!("{t:.0} K"),
        x,
        y,
    })
}

/// Isotherm through `from`: P·V constant.
fn isothermal_leg(from: &CyclePoint, to: &CyclePoint, samples: usize) -> (Vec<f64>, Vec<f64>) {
    let pv = from.pressure * from.volume;
    let x = linspace(from.volume, to.volume, samples);
    let y = x.iter().map(|v| pv / v).collect();
    (x, y)
}

/// Adiabat through `from`: P·V^γ constant.
fn adiabatic_leg(
    from: &CyclePoint,
    to: &CyclePoint,
    gamma: f64,
    samples: usize,
) -> (Vec<f64>, Vec<f64>) {
    let pvg = from.pressure * from.volume.powf(gamma);
    let x = linspace(from.volume, to.volume, samples);
    let y = x.iter().map(|v| pvg / v.powf(gamma)).collect();
    (x, y)
}

fn isochoric_leg(from: &CyclePoint, to: &CyclePoint) -> (Vec<f64>, Vec<f64>) {
    (vec![from.volume, to.volume], vec![from.pressure, to.pressure])
}

fn join(label: &str, legs: Vec<(Vec<f64>, Vec<f64>)>) -> Series {
    let mut series = Series {
        label: label.to_string(),
        x: Vec::new(),
        y: Vec::new(),
    };
    for (x, y) in legs {
        series.x.extend(x);
        series.y.extend(y);
    }
    series
}

/// Closed P–V trace of a Carnot cycle, `samples` per curved leg.
pub fn carnot_path(cycle: &CarnotCycle, samples: usize) -> Series {
    let [p1, p2, p3, p4] = &cycle.points;
    let g = cycle.gamma;
    join(
        "Carnot cycle",
        vec![
            isothermal_leg(p1, p2, samples),
            adiabatic_leg(p2, p3, g, samples),
            isothermal_leg(p3, p4, samples),
            adiabatic_leg(p4, p1, g, samples),
        ],
    )
}

/// Closed P–V trace of an Otto cycle, `samples` per adiabatic leg.
pub fn otto_path(cycle: &OttoCycle, samples: usize) -> Series {
    let [p1, p2, p3, p4] = &cycle.points;
    let g = cycle.gamma;
    join(
        "Otto cycle",
        vec![
            adiabatic_leg(p1, p2, g, samples),
            isochoric_leg(p2, p3),
            adiabatic_leg(p3, p4, g, samples),
            isochoric_leg(p4, p1),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::{CarnotInputs, OttoInputs, carnot_cycle, otto_cycle};

    #[test]
    fn linspace_endpoints() {
        let v = linspace(0.1, 5.0, 200);
        assert_eq!(v.len(), 200);
        assert_eq!(v[0], 0.1);
        assert_eq!(v[199], 5.0);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        let mid = linspace(300.0, 400.0, 5);
        assert!((mid[2] - 350.0).abs() < 1e-9);
    }

    #[test]
    fn default_isotherm_matches_form() {
        let s = isotherm(1.0, 298.15, VolumeRange::default()).unwrap();
        assert_eq!(s.len(), 200);
        assert!((s.y[0] - 0.0821 * 298.15 / 0.1).abs() < 1e-9);
        assert!(s.y.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn bad_range_is_rejected() {
        let range = VolumeRange {
            start: 0.0,
            end: 5.0,
            points: 10,
        };
        assert!(isotherm(1.0, 300.0, range).is_err());
        let range = VolumeRange {
            start: 1.0,
            end: 5.0,
            points: 1,
        };
        assert!(isotherm(1.0, 300.0, range).is_err());
    }

    #[test]
    fn vdw_comparison_marks_excluded_volume() {
        let co2 = VanDerWaals::new(364.0, 0.04267);
        let range = VolumeRange {
            start: 0.01,
            end: 1.0,
            points: 100,
        };
        let [ideal, real] = vdw_comparison(1.0, 300.0, co2, range).unwrap();
        assert_eq!(ideal.len(), real.len());
        assert!(real.y[0].is_nan());
        assert!(real.y.last().unwrap().is_finite());
        assert!(ideal.y.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn csv_leaves_nan_blank() {
        let s = Series {
            label: "t".into(),
            x: vec![1.0, 2.0],
            y: vec![f64::NAN, 3.5],
        };
        assert_eq!(s.to_csv("V", "P"), "V,P\n1,\n2,3.5\n");
    }

    #[test]
    fn speed_distribution_starts_at_zero() {
        let s = speed_distribution(300.0, 28.014, 2000.0, 101).unwrap();
        assert_eq!(s.y[0], 0.0);
        assert!(s.y.iter().all(|d| *d >= 0.0));
        assert!(speed_distribution(300.0, 28.014, 0.0, 10).is_err());
    }

    #[test]
    fn cycle_paths_close() {
        let carnot = carnot_cycle(&CarnotInputs {
            n: 1.0,
            t_hot: 600.0,
            t_cold: 300.0,
            v1: 1.0,
            v2: 2.0,
            gamma: 1.4,
        })
        .unwrap();
        let path = carnot_path(&carnot, 20);
        assert_eq!(path.len(), 80);
        assert!((path.x[0] - path.x[79]).abs() < 1e-9);
        assert!((path.y[0] - path.y[79]).abs() < 1e-9);

        let otto = otto_cycle(&OttoInputs {
            n: 1.0,
            t1: 300.0,
            v1: 1.0,
            compression_ratio: 8.0,
            q_in: 10_000.0,
            gamma: 1.4,
        })
        .unwrap();
        let path = otto_path(&otto, 10);
        assert_eq!(path.len(), 24);
        assert!((path.y[0] - path.y[23]).abs() < 1e-9);
    }

    #[test]
    fn hand_built_otto_cycle_traces() {
        let point = |label, volume, temperature| CyclePoint {
            label,
            volume,
            temperature,
            pressure: 0.0821 * temperature / volume,
        };
        let cycle = OttoCycle {
            efficiency: 0.5,
            q_in: 1000.0,
            q_out: 500.0,
            net_work: 500.0,
            gamma: 1.4,
            points: [
                point("intake", 2.0, 300.0),
                point("compression", 0.5, 600.0),
                point("combustion", 0.5, 1200.0),
                point("expansion", 2.0, 600.0),
            ],
        };
        let path = otto_path(&cycle, 5);
        assert_eq!(path.len(), 14);
        assert_eq!(path.x[0], 2.0);
        assert!((path.y[0] - 0.0821 * 150.0).abs() < 1e-12);
    }
}
