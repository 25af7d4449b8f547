use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult,
};
use cw2::set_contract_version;
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::msg::{ConfigResponse, ExecuteMsg, IdentityIdResponse, InstantiateMsg, QueryMsg};
use crate::state::{Config, Identity, CONFIG, IDENTITIES, OWNER_IDENTITY};

const CONTRACT_NAME: &str = "crates.io:identity-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const ID_DOMAIN: &[u8] = b"identity-registry/id";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let admin = deps.api.addr_validate(&msg.admin)?;
    CONFIG.save(deps.storage, &Config { admin: admin.clone() })?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateIdentity {} => execute_create_identity(deps, env, info),
        ExecuteMsg::DeactivateIdentity { identity_id } => {
            execute_deactivate_identity(deps, info, identity_id)
        }
    }
}

/// Deterministic identity ID: hex SHA-256 over a domain tag and the owner address.
pub fn derive_identity_id(owner: &Addr) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ID_DOMAIN);
    hasher.update(owner.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn execute_create_identity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    if OWNER_IDENTITY.has(deps.storage, &info.sender) {
        return Err(ContractError::IdentityExists {});
    }

    let identity_id = derive_identity_id(&info.sender);
    if IDENTITIES.has(deps.storage, &identity_id) {
        return Err(ContractError::IdentityExists {});
    }

    let identity = Identity {
        id: identity_id.clone(),
        owner: info.sender.clone(),
        active: true,
        created_at: env.block.height,
    };

    IDENTITIES.save(deps.storage, &identity_id, &identity)?;
    OWNER_IDENTITY.save(deps.storage, &info.sender, &identity_id)?;

    Ok(Response::new()
        .add_attribute("method", "create_identity")
        .add_attribute("owner", info.sender)
        .add_attribute("identity_id", identity_id.clone())
        .set_data(to_json_binary(&IdentityIdResponse { identity_id })?))
}

pub fn execute_deactivate_identity(
    deps: DepsMut,
    info: MessageInfo,
    identity_id: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    IDENTITIES.update(deps.storage, &identity_id, |maybe_identity| {
        let mut identity = maybe_identity.ok_or(ContractError::IdentityNotFound {})?;

        if info.sender != identity.owner && info.sender != config.admin {
            return Err(ContractError::Unauthorized {});
        }

        // Deactivating twice is a no-op
        identity.active = false;
        Ok(identity)
    })?;

    Ok(Response::new()
        .add_attribute("method", "deactivate_identity")
        .add_attribute("identity_id", identity_id)
        .add_attribute("by", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetIdentity { identity_id } => {
            to_json_binary(&IDENTITIES.may_load(deps.storage, &identity_id)?)
        }
        QueryMsg::IdentityOf { owner } => to_json_binary(&query_identity_of(deps, owner)?),
        QueryMsg::DeriveIdentityId { owner } => {
            let owner_addr = deps.api.addr_validate(&owner)?;
            to_json_binary(&IdentityIdResponse {
                identity_id: derive_identity_id(&owner_addr),
            })
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
    })
}

fn query_identity_of(deps: Deps, owner: String) -> StdResult<Option<Identity>> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    match OWNER_IDENTITY.may_load(deps.storage, &owner_addr)? {
        Some(identity_id) => IDENTITIES.may_load(deps.storage, &identity_id),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
    };
    use cosmwasm_std::{from_json, OwnedDeps};
    use shared::ErrorCode;

    fn setup() -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        let msg = InstantiateMsg {
            admin: "admin".to_string(),
        };
        let info = mock_info("creator", &[]);
        instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
        deps
    }

    fn create(deps: DepsMut, owner: &str, height: u64) -> Result<Response, ContractError> {
        let mut env = mock_env();
        env.block.height = height;
        execute(deps, env, mock_info(owner, &[]), ExecuteMsg::CreateIdentity {})
    }

    fn get_identity(deps: Deps, identity_id: &str) -> Option<Identity> {
        let res = query(
            deps,
            mock_env(),
            QueryMsg::GetIdentity {
                identity_id: identity_id.to_string(),
            },
        )
        .unwrap();
        from_json(&res).unwrap()
    }

    #[test]
    fn proper_initialization() {
        let deps = setup();
        let res = query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap();
        let config: ConfigResponse = from_json(&res).unwrap();
        assert_eq!(config.admin.as_str(), "admin");
    }

    #[test]
    fn create_identity() {
        let mut deps = setup();
        let res = create(deps.as_mut(), "alice", 42).unwrap();

        let created: IdentityIdResponse = from_json(res.data.unwrap()).unwrap();
        let expected = derive_identity_id(&Addr::unchecked("alice"));
        assert_eq!(created.identity_id, expected);

        let identity = get_identity(deps.as_ref(), &expected).unwrap();
        assert_eq!(identity.owner.as_str(), "alice");
        assert!(identity.active);
        assert_eq!(identity.created_at, 42);

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::IdentityOf {
                owner: "alice".to_string(),
            },
        )
        .unwrap();
        let by_owner: Option<Identity> = from_json(&res).unwrap();
        assert_eq!(by_owner, Some(identity));
    }

    #[test]
    fn duplicate_identity_rejected() {
        let mut deps = setup();
        create(deps.as_mut(), "alice", 1).unwrap();

        let err = create(deps.as_mut(), "alice", 2).unwrap_err();
        assert!(matches!(err, ContractError::IdentityExists {}));
        assert_eq!(err.code().map(ErrorCode::as_u32), Some(2));

        // Another owner is unaffected
        create(deps.as_mut(), "bob", 2).unwrap();
    }

    #[test]
    fn derived_ids_are_stable_and_distinct() {
        let alice = derive_identity_id(&Addr::unchecked("alice"));
        assert_eq!(alice, derive_identity_id(&Addr::unchecked("alice")));
        assert_ne!(alice, derive_identity_id(&Addr::unchecked("bob")));
        assert_eq!(alice.len(), 64);

        let deps = setup();
        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::DeriveIdentityId {
                owner: "alice".to_string(),
            },
        )
        .unwrap();
        let derived: IdentityIdResponse = from_json(&res).unwrap();
        assert_eq!(derived.identity_id, alice);
    }

    #[test]
    fn owner_can_deactivate() {
        let mut deps = setup();
        create(deps.as_mut(), "alice", 1).unwrap();
        let identity_id = derive_identity_id(&Addr::unchecked("alice"));

        let msg = ExecuteMsg::DeactivateIdentity {
            identity_id: identity_id.clone(),
        };
        execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg.clone()).unwrap();
        assert!(!get_identity(deps.as_ref(), &identity_id).unwrap().active);

        // Idempotent
        execute(deps.as_mut(), mock_env(), mock_info("alice", &[]), msg).unwrap();
        assert!(!get_identity(deps.as_ref(), &identity_id).unwrap().active);
    }

    #[test]
    fn admin_can_deactivate_any_identity() {
        let mut deps = setup();
        create(deps.as_mut(), "alice", 1).unwrap();
        let identity_id = derive_identity_id(&Addr::unchecked("alice"));

        let msg = ExecuteMsg::DeactivateIdentity {
            identity_id: identity_id.clone(),
        };
        let res = execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap();
        assert!(res.attributes.iter().any(|attr| attr.key == "by" && attr.value == "admin"));
        assert!(!get_identity(deps.as_ref(), &identity_id).unwrap().active);
    }

    #[test]
    fn stranger_cannot_deactivate() {
        let mut deps = setup();
        create(deps.as_mut(), "alice", 1).unwrap();
        let identity_id = derive_identity_id(&Addr::unchecked("alice"));

        let msg = ExecuteMsg::DeactivateIdentity {
            identity_id: identity_id.clone(),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("bob", &[]), msg).unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized {}));
        assert_eq!(err.code().map(ErrorCode::as_u32), Some(1));
        assert!(get_identity(deps.as_ref(), &identity_id).unwrap().active);
    }

    #[test]
    fn deactivate_unknown_identity() {
        let mut deps = setup();
        let msg = ExecuteMsg::DeactivateIdentity {
            identity_id: "missing".to_string(),
        };
        // Not found takes precedence over authorization
        let err = execute(deps.as_mut(), mock_env(), mock_info("bob", &[]), msg).unwrap_err();
        assert!(matches!(err, ContractError::IdentityNotFound {}));
        assert_eq!(get_identity(deps.as_ref(), "missing"), None);
    }
}
