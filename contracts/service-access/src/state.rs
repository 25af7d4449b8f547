use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Sole principal allowed to register and deactivate providers
    pub admin: Addr,
    /// Credential issuance contract consulted for credential validity
    pub credential_contract: Addr,
}

#[cw_serde]
pub struct ServiceProvider {
    /// Display name
    pub name: String,
    pub active: bool,
    /// Service types declared at registration
    pub service_types: Vec<String>,
}

#[cw_serde]
pub struct ServiceRequirement {
    /// Credential types that must all be valid
    pub required_credentials: Vec<String>,
    /// Advisory, stored and echoed only
    pub min_tx_count: u64,
    /// Advisory, stored and echoed only
    pub min_tx_volume: Uint128,
}

#[cw_serde]
pub struct ServiceAccess {
    pub active: bool,
    /// Block height of the grant
    pub granted_at: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Providers indexed by address
pub const PROVIDERS: Map<&Addr, ServiceProvider> = Map::new("providers");

/// Requirements
/// Key: (provider, service_type)
pub const REQUIREMENTS: Map<(&Addr, &str), ServiceRequirement> = Map::new("requirements");

/// Access grants
/// Key: (identity_id, provider, service_type)
pub const ACCESS: Map<(&str, &Addr, &str), ServiceAccess> = Map::new("access");
