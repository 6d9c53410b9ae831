//! Formula errors.

use ig_core::IgError;
use thiserror::Error;

/// Result type for every formula in this crate.
pub type FormulaResult<T> = Result<T, FormulaError>;

/// Why a formula could not produce a value.
///
/// Everything except `InvalidArg` is undefined arithmetic: the formula has no
/// finite answer for the given inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// Denominator evaluated to zero.
    #[error("Division by zero: {what}")]
    DivisionByZero { what: &'static str },

    /// Logarithm or root of a zero/negative argument.
    #[error("Undefined for {what} = {value}")]
    Domain { what: &'static str, value: f64 },

    /// Van der Waals volume at or inside the excluded volume n·b.
    #[error("Volume {volume} L is within the excluded volume n·b = {excluded} L")]
    ExcludedVolume { volume: f64, excluded: f64 },

    /// Result overflowed or turned into NaN.
    #[error("Non-finite result for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Input outside the physical range the formula accepts.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl FormulaError {
    pub fn is_undefined_arithmetic(&self) -> bool {
        !matches!(self, FormulaError::InvalidArg { .. })
    }
}

impl From<IgError> for FormulaError {
    fn from(err: IgError) -> Self {
        match err {
            IgError::NonFinite { what, value } => FormulaError::NonFinite { what, value },
            IgError::InvalidArg { what } => FormulaError::InvalidArg { what },
        }
    }
}

/// `num / den`, failing on a zero denominator instead of yielding inf/NaN.
pub(crate) fn checked_div(num: f64, den: f64, what: &'static str) -> FormulaResult<f64> {
    if den == 0.0 {
        return Err(FormulaError::DivisionByZero { what });
    }
    finite(num / den, what)
}

pub(crate) fn checked_ln(x: f64, what: &'static str) -> FormulaResult<f64> {
    if x.is_nan() || x <= 0.0 {
        return Err(FormulaError::Domain { what, value: x });
    }
    finite(x.ln(), what)
}

pub(crate) fn checked_sqrt(x: f64, what: &'static str) -> FormulaResult<f64> {
    if x < 0.0 {
        return Err(FormulaError::Domain { what, value: x });
    }
    finite(x.sqrt(), what)
}

pub(crate) fn finite(v: f64, what: &'static str) -> FormulaResult<f64> {
    Ok(ig_core::ensure_finite(v, what)?)
}
