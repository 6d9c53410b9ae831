use thiserror::Error;

pub type IgResult<T> = Result<T, IgError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IgError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
