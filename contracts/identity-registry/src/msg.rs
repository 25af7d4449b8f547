use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

use crate::state::Identity;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create the caller's identity
    CreateIdentity {},
    /// Deactivate an identity (owner or admin)
    DeactivateIdentity { identity_id: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Get identity by ID
    #[returns(Option<Identity>)]
    GetIdentity { identity_id: String },

    /// Get identity by owner address
    #[returns(Option<Identity>)]
    IdentityOf { owner: String },

    /// Compute the ID an owner's identity has (or would have)
    #[returns(IdentityIdResponse)]
    DeriveIdentityId { owner: String },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
}

#[cw_serde]
pub struct IdentityIdResponse {
    pub identity_id: String,
}
