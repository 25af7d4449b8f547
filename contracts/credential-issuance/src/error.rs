use cosmwasm_std::StdError;
use shared::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Caller is not a registered issuer")]
    NotAnIssuer {},

    #[error("Issuer is deactivated")]
    IssuerInactive {},

    #[error("Issuer not found")]
    IssuerNotFound {},

    #[error("Credential not found")]
    CredentialNotFound {},

    #[error("Invalid name or credential type")]
    InvalidLabel {},

    #[error("Data hash must be {expected} bytes, got {actual}")]
    InvalidDataHash { expected: usize, actual: usize },

    #[error("Expiration {expiration} is not after current height {height}")]
    InvalidExpiration { expiration: u64, height: u64 },
}

impl ContractError {
    /// Stable tag reported to the host; `None` for storage and codec failures
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ContractError::Std(_) => None,
            ContractError::Unauthorized {}
            | ContractError::NotAnIssuer {}
            | ContractError::IssuerInactive {} => Some(ErrorCode::Unauthorized),
            ContractError::IssuerNotFound {} | ContractError::CredentialNotFound {} => {
                Some(ErrorCode::NotFound)
            }
            ContractError::InvalidLabel {}
            | ContractError::InvalidDataHash { .. }
            | ContractError::InvalidExpiration { .. } => Some(ErrorCode::InvalidInput),
        }
    }
}
