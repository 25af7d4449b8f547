use cosmwasm_std::StdError;
use shared::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Identity not found")]
    IdentityNotFound {},

    #[error("Identity already exists")]
    IdentityExists {},
}

impl ContractError {
    /// Stable tag reported to the host; `None` for storage and codec failures
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ContractError::Std(_) => None,
            ContractError::Unauthorized {} => Some(ErrorCode::Unauthorized),
            ContractError::IdentityNotFound {} => Some(ErrorCode::NotFound),
            ContractError::IdentityExists {} => Some(ErrorCode::AlreadyExists),
        }
    }
}
