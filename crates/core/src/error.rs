/// Errors raised at the boundary of the PFT core.
///
/// The estimators and the interpreter are total and never return these. They come from
/// configuration parsing and from validating raw intake forms before interpretation.
#[derive(Debug, thiserror::Error)]
pub enum PftError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{field} = {value} is outside the accepted range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error(transparent)]
    Types(#[from] pft_types::TypesError),
}

pub type PftResult<T> = std::result::Result<T, PftError>;
