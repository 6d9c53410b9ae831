// ig-core/src/units.rs

use uom::si::f64::ThermodynamicTemperature as UomThermodynamicTemperature;

// Canonical temperature type (SI, f64)
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Form inputs arrive in °C; every formula works in kelvin.
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    celsius(t_c).get::<kelvin>()
}

pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    k(t_k).get::<degree_celsius>()
}

pub mod constants {
    /// Gas constant in L·atm/(mol·K), as used by the ideal gas law solver.
    pub const R_L_ATM: f64 = 0.0821;

    /// Gas constant in J/(mol·K).
    pub const R_J: f64 = 8.314;

    /// Joules per liter-atmosphere.
    pub const L_ATM_TO_J: f64 = 101.325;

    /// Reference state for ΔT in the basic process calculator (25 °C).
    pub const T_REF_K: f64 = 298.15;

    /// Default heat capacities of the calculator form, J/(mol·K).
    pub const CP_DEFAULT: f64 = 2.5 * R_J;
    pub const CV_DEFAULT: f64 = 1.5 * R_J;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn celsius_and_kelvin_agree() {
        use uom::si::thermodynamic_temperature::kelvin;
        assert!((celsius(0.0).get::<kelvin>() - 273.15).abs() < 1e-9);
        assert!((k(300.0).get::<kelvin>() - 300.0).abs() < 1e-12);
    }

    #[test]
    fn form_default_is_reference_temperature() {
        let t = celsius_to_kelvin(25.0);
        assert!((t - constants::T_REF_K).abs() < 1e-9);
        assert!(kelvin_to_celsius(273.15).abs() < 1e-9);
    }

    #[test]
    fn liter_atmosphere_is_101_325_joules() {
        use uom::si::energy::joule;
        use uom::si::f64::{Energy, Pressure, Volume};
        use uom::si::pressure::atmosphere;
        use uom::si::volume::liter;
        let work: Energy = Pressure::new::<atmosphere>(1.0) * Volume::new::<liter>(1.0);
        assert!(nearly_equal(
            work.get::<joule>(),
            constants::L_ATM_TO_J,
            Tolerances::default()
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn celsius_kelvin_round_trip(t_c in -200.0_f64..2000.0) {
            let back = kelvin_to_celsius(celsius_to_kelvin(t_c));
            prop_assert!((back - t_c).abs() < 1e-9);
        }
    }
}
