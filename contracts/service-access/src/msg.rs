use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::state::{ServiceAccess, ServiceProvider, ServiceRequirement};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Address of the credential issuance contract
    pub credential_contract: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a provider (admin only). Registers the admin itself when `provider` is omitted.
    RegisterServiceProvider {
        name: String,
        service_types: Vec<String>,
        provider: Option<String>,
    },
    /// Deactivate a provider (admin only)
    DeactivateServiceProvider { provider: String },
    /// Set requirements for one of the caller's declared services
    SetServiceRequirements {
        service_type: String,
        required_credentials: Vec<String>,
        min_tx_count: u64,
        min_tx_volume: Uint128,
    },
    /// Request access for an identity
    RequestServiceAccess {
        identity_id: String,
        provider: String,
        service_type: String,
    },
    /// Revoke a grant on one of the caller's services
    RevokeServiceAccess {
        identity_id: String,
        service_type: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Option<ServiceProvider>)]
    GetServiceProvider { provider: String },

    #[returns(Option<ServiceRequirement>)]
    GetServiceRequirements {
        provider: String,
        service_type: String,
    },

    /// All requirement records of a provider
    #[returns(RequirementsResponse)]
    ListProviderRequirements { provider: String },

    #[returns(Option<ServiceAccess>)]
    GetServiceAccess {
        identity_id: String,
        provider: String,
        service_type: String,
    },

    /// Re-evaluate a grant against current credentials and provider status
    #[returns(AccessCheckResponse)]
    CheckServiceAccess {
        identity_id: String,
        provider: String,
        service_type: String,
    },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub credential_contract: Addr,
}

#[cw_serde]
pub struct RequirementEntry {
    pub service_type: String,
    pub requirement: ServiceRequirement,
}

#[cw_serde]
pub struct RequirementsResponse {
    pub requirements: Vec<RequirementEntry>,
}

#[cw_serde]
pub struct AccessCheckResponse {
    pub allowed: bool,
    pub grant_active: bool,
    pub provider_active: bool,
    /// Required credential types that are not currently valid
    pub missing_credentials: Vec<String>,
}
