use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Cannot divide by zero")]
    DivideByZero,
}

pub type CalcResult<T> = Result<T, CalcError>;
