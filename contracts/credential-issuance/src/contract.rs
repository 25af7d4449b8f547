use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use shared::{is_expired, is_valid_label, page_limit};

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, CredentialEntry, CredentialsResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
    ValidityResponse,
};
use crate::state::{Config, Credential, Issuer, CONFIG, CREDENTIALS, DATA_HASH_LEN, ISSUERS};

const CONTRACT_NAME: &str = "crates.io:credential-issuance";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

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
        ExecuteMsg::RegisterIssuer { name, issuer } => {
            execute_register_issuer(deps, info, name, issuer)
        }
        ExecuteMsg::DeactivateIssuer { issuer } => execute_deactivate_issuer(deps, info, issuer),
        ExecuteMsg::IssueCredential {
            identity_id,
            credential_type,
            expiration,
            data_hash,
        } => execute_issue_credential(
            deps,
            env,
            info,
            identity_id,
            credential_type,
            expiration,
            data_hash,
        ),
        ExecuteMsg::RevokeCredential {
            identity_id,
            credential_type,
        } => execute_revoke_credential(deps, info, identity_id, credential_type),
    }
}

fn ensure_admin(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

pub fn execute_register_issuer(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    issuer: Option<String>,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;

    if !is_valid_label(&name) {
        return Err(ContractError::InvalidLabel {});
    }

    let issuer_addr = match issuer {
        Some(issuer) => deps.api.addr_validate(&issuer)?,
        None => info.sender.clone(),
    };

    // Re-registration overwrites and reactivates
    ISSUERS.save(
        deps.storage,
        &issuer_addr,
        &Issuer {
            name: name.clone(),
            active: true,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "register_issuer")
        .add_attribute("issuer", issuer_addr)
        .add_attribute("name", name))
}

pub fn execute_deactivate_issuer(
    deps: DepsMut,
    info: MessageInfo,
    issuer: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let issuer_addr = deps.api.addr_validate(&issuer)?;

    ISSUERS.update(deps.storage, &issuer_addr, |maybe_issuer| {
        let mut issuer = maybe_issuer.ok_or(ContractError::IssuerNotFound {})?;
        issuer.active = false;
        Ok::<_, ContractError>(issuer)
    })?;

    Ok(Response::new()
        .add_attribute("method", "deactivate_issuer")
        .add_attribute("issuer", issuer_addr))
}

pub fn execute_issue_credential(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    identity_id: String,
    credential_type: String,
    expiration: u64,
    data_hash: Binary,
) -> Result<Response, ContractError> {
    let issuer = ISSUERS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::NotAnIssuer {})?;
    if !issuer.active {
        return Err(ContractError::IssuerInactive {});
    }

    if !is_valid_label(&credential_type) || identity_id.is_empty() {
        return Err(ContractError::InvalidLabel {});
    }

    if data_hash.len() != DATA_HASH_LEN {
        return Err(ContractError::InvalidDataHash {
            expected: DATA_HASH_LEN,
            actual: data_hash.len(),
        });
    }

    if expiration <= env.block.height {
        return Err(ContractError::InvalidExpiration {
            expiration,
            height: env.block.height,
        });
    }

    // Re-issuance replaces the previous credential, including a revoked one
    let credential = Credential {
        issuer: info.sender.clone(),
        revoked: false,
        expiration,
        data_hash,
    };
    CREDENTIALS.save(
        deps.storage,
        (identity_id.as_str(), credential_type.as_str()),
        &credential,
    )?;

    Ok(Response::new()
        .add_attribute("method", "issue_credential")
        .add_attribute("issuer", info.sender)
        .add_attribute("identity_id", identity_id)
        .add_attribute("credential_type", credential_type)
        .add_attribute("expiration", expiration.to_string()))
}

pub fn execute_revoke_credential(
    deps: DepsMut,
    info: MessageInfo,
    identity_id: String,
    credential_type: String,
) -> Result<Response, ContractError> {
    CREDENTIALS.update(
        deps.storage,
        (identity_id.as_str(), credential_type.as_str()),
        |maybe_credential| {
            let mut credential = maybe_credential.ok_or(ContractError::CredentialNotFound {})?;

            // No admin override
            if info.sender != credential.issuer {
                return Err(ContractError::Unauthorized {});
            }

            credential.revoked = true;
            Ok(credential)
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "revoke_credential")
        .add_attribute("identity_id", identity_id)
        .add_attribute("credential_type", credential_type))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetIssuer { issuer } => {
            let issuer_addr = deps.api.addr_validate(&issuer)?;
            to_json_binary(&ISSUERS.may_load(deps.storage, &issuer_addr)?)
        }
        QueryMsg::GetCredential {
            identity_id,
            credential_type,
        } => to_json_binary(&CREDENTIALS.may_load(
            deps.storage,
            (identity_id.as_str(), credential_type.as_str()),
        )?),
        QueryMsg::IsValidCredential {
            identity_id,
            credential_type,
        } => to_json_binary(&ValidityResponse {
            valid: is_valid_credential(deps, &env, &identity_id, &credential_type)?,
        }),
        QueryMsg::ListCredentials {
            identity_id,
            start_after,
            limit,
        } => to_json_binary(&query_list_credentials(
            deps,
            identity_id,
            start_after,
            limit,
        )?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
    })
}

/// Evaluated against the current height on every call; nothing is cached.
pub fn is_valid_credential(
    deps: Deps,
    env: &Env,
    identity_id: &str,
    credential_type: &str,
) -> StdResult<bool> {
    let valid = CREDENTIALS
        .may_load(deps.storage, (identity_id, credential_type))?
        .map_or(false, |credential| {
            !credential.revoked && !is_expired(env.block.height, credential.expiration)
        });
    Ok(valid)
}

fn query_list_credentials(
    deps: Deps,
    identity_id: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<CredentialsResponse> {
    let limit = page_limit(limit);
    let start = start_after.as_deref().map(Bound::exclusive);

    let credentials = CREDENTIALS
        .prefix(identity_id.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (credential_type, credential) = item?;
            Ok(CredentialEntry {
                credential_type,
                credential,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(CredentialsResponse { credentials })
}
