use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Administrator allowed to deactivate any identity
    pub admin: Addr,
}

#[cw_serde]
pub struct Identity {
    /// Identity ID (hex digest derived from the owner)
    pub id: String,
    /// Identity owner
    pub owner: Addr,
    /// Cleared on deactivation, never set again
    pub active: bool,
    /// Block height at creation
    pub created_at: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Identities indexed by ID
pub const IDENTITIES: Map<&str, Identity> = Map::new("identities");

/// Reverse lookup: owner address to identity ID
pub const OWNER_IDENTITY: Map<&Addr, String> = Map::new("owner_identity");
