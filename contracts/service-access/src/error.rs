use cosmwasm_std::StdError;
use shared::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Caller is not a registered service provider")]
    NotAProvider {},

    #[error("Service provider is deactivated")]
    ProviderInactive {},

    #[error("Service type {service_type} was not declared by the provider")]
    UndeclaredServiceType { service_type: String },

    #[error("Service provider not found")]
    ProviderNotFound {},

    #[error("No requirements set for this service")]
    RequirementsNotFound {},

    #[error("Service access not found")]
    AccessNotFound {},

    #[error("Service provider is not accepting requests")]
    ProviderUnavailable {},

    #[error("Missing valid credential: {credential_type}")]
    MissingCredential { credential_type: String },

    #[error("Invalid name, service type or credential type")]
    InvalidLabel {},

    #[error("At least one service type is required")]
    EmptyServiceTypes {},

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

impl ContractError {
    /// Stable tag reported to the host; `None` for storage and codec failures
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ContractError::Std(_) => None,
            ContractError::Unauthorized {}
            | ContractError::NotAProvider {}
            | ContractError::ProviderInactive {}
            | ContractError::UndeclaredServiceType { .. } => Some(ErrorCode::Unauthorized),
            ContractError::ProviderNotFound {}
            | ContractError::RequirementsNotFound {}
            | ContractError::AccessNotFound {} => Some(ErrorCode::NotFound),
            ContractError::ProviderUnavailable {} | ContractError::MissingCredential { .. } => {
                Some(ErrorCode::RequirementsNotMet)
            }
            ContractError::InvalidLabel {}
            | ContractError::EmptyServiceTypes {}
            | ContractError::Duplicate(_) => Some(ErrorCode::InvalidInput),
        }
    }
}
