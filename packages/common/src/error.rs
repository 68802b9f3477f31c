use thiserror::Error;

/// Errors raised while editing export trees
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Only element nodes have children")]
    NotAnElement,
}

pub type CommonResult<T> = Result<T, CommonError>;
