use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

use crate::state::{Credential, Issuer};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register an issuer (admin only). Registers the admin itself when `issuer` is omitted.
    RegisterIssuer {
        name: String,
        issuer: Option<String>,
    },
    /// Deactivate an issuer (admin only)
    DeactivateIssuer { issuer: String },
    /// Issue or re-issue a credential (active issuers only)
    IssueCredential {
        identity_id: String,
        credential_type: String,
        expiration: u64,
        data_hash: Binary,
    },
    /// Revoke a credential (original issuer only)
    RevokeCredential {
        identity_id: String,
        credential_type: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Get issuer by address
    #[returns(Option<Issuer>)]
    GetIssuer { issuer: String },

    /// Get credential by identity and type
    #[returns(Option<Credential>)]
    GetCredential {
        identity_id: String,
        credential_type: String,
    },

    /// Exists, not revoked and not expired at the current height
    #[returns(ValidityResponse)]
    IsValidCredential {
        identity_id: String,
        credential_type: String,
    },

    /// List an identity's credentials ordered by type
    #[returns(CredentialsResponse)]
    ListCredentials {
        identity_id: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
}

#[cw_serde]
pub struct ValidityResponse {
    pub valid: bool,
}

#[cw_serde]
pub struct CredentialEntry {
    pub credential_type: String,
    pub credential: Credential,
}

#[cw_serde]
pub struct CredentialsResponse {
    pub credentials: Vec<CredentialEntry>,
}
