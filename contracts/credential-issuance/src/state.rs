use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::{Item, Map};

/// Byte length of a credential data hash (SHA-256)
pub const DATA_HASH_LEN: usize = 32;

#[cw_serde]
pub struct Config {
    /// Sole principal allowed to register and deactivate issuers
    pub admin: Addr,
}

#[cw_serde]
pub struct Issuer {
    /// Display name
    pub name: String,
    /// Only active issuers may issue credentials
    pub active: bool,
}

#[cw_serde]
pub struct Credential {
    /// Issuing principal, the only one who can revoke
    pub issuer: Addr,
    /// One-way flag
    pub revoked: bool,
    /// Last block height at which the credential is valid
    pub expiration: u64,
    /// Digest of the off-chain credential payload
    pub data_hash: Binary,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Issuers indexed by address
pub const ISSUERS: Map<&Addr, Issuer> = Map::new("issuers");

/// Credentials
/// Key: (identity_id, credential_type)
pub const CREDENTIALS: Map<(&str, &str), Credential> = Map::new("credentials");
