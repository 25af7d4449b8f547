use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult, Uint128,
};
use credential_issuance::msg::{QueryMsg as CredentialQueryMsg, ValidityResponse};
use cw2::set_contract_version;
use shared::{has_duplicates, is_valid_label};

use crate::error::ContractError;
use crate::msg::{
    AccessCheckResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg, RequirementEntry,
    RequirementsResponse,
};
use crate::state::{
    Config, ServiceAccess, ServiceProvider, ServiceRequirement, ACCESS, CONFIG, PROVIDERS,
    REQUIREMENTS,
};

const CONTRACT_NAME: &str = "crates.io:service-access";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        credential_contract: deps.api.addr_validate(&msg.credential_contract)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("credential_contract", config.credential_contract))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterServiceProvider {
            name,
            service_types,
            provider,
        } => execute_register_service_provider(deps, info, name, service_types, provider),
        ExecuteMsg::DeactivateServiceProvider { provider } => {
            execute_deactivate_service_provider(deps, info, provider)
        }
        ExecuteMsg::SetServiceRequirements {
            service_type,
            required_credentials,
            min_tx_count,
            min_tx_volume,
        } => execute_set_service_requirements(
            deps,
            info,
            service_type,
            required_credentials,
            min_tx_count,
            min_tx_volume,
        ),
        ExecuteMsg::RequestServiceAccess {
            identity_id,
            provider,
            service_type,
        } => execute_request_service_access(deps, env, info, identity_id, provider, service_type),
        ExecuteMsg::RevokeServiceAccess {
            identity_id,
            service_type,
        } => execute_revoke_service_access(deps, info, identity_id, service_type),
    }
}

fn ensure_admin(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn validate_labels(labels: &[String]) -> Result<(), ContractError> {
    if !labels.iter().all(|label| is_valid_label(label)) {
        return Err(ContractError::InvalidLabel {});
    }
    if has_duplicates(labels) {
        return Err(ContractError::Duplicate(labels.join(",")));
    }
    Ok(())
}

pub fn execute_register_service_provider(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    service_types: Vec<String>,
    provider: Option<String>,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;

    if !is_valid_label(&name) {
        return Err(ContractError::InvalidLabel {});
    }
    if service_types.is_empty() {
        return Err(ContractError::EmptyServiceTypes {});
    }
    validate_labels(&service_types)?;

    let provider_addr = match provider {
        Some(provider) => deps.api.addr_validate(&provider)?,
        None => info.sender.clone(),
    };

    let service_count = service_types.len();
    PROVIDERS.save(
        deps.storage,
        &provider_addr,
        &ServiceProvider {
            name: name.clone(),
            active: true,
            service_types,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "register_service_provider")
        .add_attribute("provider", provider_addr)
        .add_attribute("name", name)
        .add_attribute("service_count", service_count.to_string()))
}

pub fn execute_deactivate_service_provider(
    deps: DepsMut,
    info: MessageInfo,
    provider: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info)?;
    let provider_addr = deps.api.addr_validate(&provider)?;

    PROVIDERS.update(deps.storage, &provider_addr, |maybe_provider| {
        let mut provider = maybe_provider.ok_or(ContractError::ProviderNotFound {})?;
        provider.active = false;
        Ok::<_, ContractError>(provider)
    })?;

    Ok(Response::new()
        .add_attribute("method", "deactivate_service_provider")
        .add_attribute("provider", provider_addr))
}

pub fn execute_set_service_requirements(
    deps: DepsMut,
    info: MessageInfo,
    service_type: String,
    required_credentials: Vec<String>,
    min_tx_count: u64,
    min_tx_volume: Uint128,
) -> Result<Response, ContractError> {
    let provider = PROVIDERS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::NotAProvider {})?;
    if !provider.active {
        return Err(ContractError::ProviderInactive {});
    }
    if !provider.service_types.contains(&service_type) {
        return Err(ContractError::UndeclaredServiceType { service_type });
    }

    validate_labels(&required_credentials)?;

    let credential_count = required_credentials.len();
    REQUIREMENTS.save(
        deps.storage,
        (&info.sender, service_type.as_str()),
        &ServiceRequirement {
            required_credentials,
            min_tx_count,
            min_tx_volume,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "set_service_requirements")
        .add_attribute("provider", info.sender)
        .add_attribute("service_type", service_type)
        .add_attribute("required_credentials", credential_count.to_string()))
}

pub fn execute_request_service_access(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    identity_id: String,
    provider: String,
    service_type: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let provider_addr = deps.api.addr_validate(&provider)?;

    let requirement = REQUIREMENTS
        .may_load(deps.storage, (&provider_addr, service_type.as_str()))?
        .ok_or(ContractError::RequirementsNotFound {})?;

    let provider_active = PROVIDERS
        .may_load(deps.storage, &provider_addr)?
        .map_or(false, |provider| provider.active);
    if !provider_active {
        return Err(ContractError::ProviderUnavailable {});
    }

    // Stops at the first credential that does not hold
    for credential_type in requirement.required_credentials {
        if !credential_is_valid(
            deps.as_ref(),
            &config.credential_contract,
            &identity_id,
            &credential_type,
        )? {
            return Err(ContractError::MissingCredential { credential_type });
        }
    }

    // A fresh grant replaces any earlier one, revoked or not
    ACCESS.save(
        deps.storage,
        (identity_id.as_str(), &provider_addr, service_type.as_str()),
        &ServiceAccess {
            active: true,
            granted_at: env.block.height,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "request_service_access")
        .add_attribute("requester", info.sender)
        .add_attribute("identity_id", identity_id)
        .add_attribute("provider", provider_addr)
        .add_attribute("service_type", service_type)
        .add_attribute("granted_at", env.block.height.to_string()))
}

pub fn execute_revoke_service_access(
    deps: DepsMut,
    info: MessageInfo,
    identity_id: String,
    service_type: String,
) -> Result<Response, ContractError> {
    // Only the provider owning the service's requirement record may revoke
    if !REQUIREMENTS.has(deps.storage, (&info.sender, service_type.as_str())) {
        return Err(ContractError::Unauthorized {});
    }

    ACCESS.update(
        deps.storage,
        (identity_id.as_str(), &info.sender, service_type.as_str()),
        |maybe_access| {
            let mut access = maybe_access.ok_or(ContractError::AccessNotFound {})?;
            access.active = false;
            Ok::<_, ContractError>(access)
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "revoke_service_access")
        .add_attribute("provider", info.sender)
        .add_attribute("identity_id", identity_id)
        .add_attribute("service_type", service_type))
}

/// Read-only query against the credential contract at the current height.
fn credential_is_valid(
    deps: Deps,
    credential_contract: &Addr,
    identity_id: &str,
    credential_type: &str,
) -> StdResult<bool> {
    let res: ValidityResponse = deps.querier.query_wasm_smart(
        credential_contract.to_string(),
        &CredentialQueryMsg::IsValidCredential {
            identity_id: identity_id.to_string(),
            credential_type: credential_type.to_string(),
        },
    )?;
    Ok(res.valid)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetServiceProvider { provider } => {
            let provider_addr = deps.api.addr_validate(&provider)?;
            to_json_binary(&PROVIDERS.may_load(deps.storage, &provider_addr)?)
        }
        QueryMsg::GetServiceRequirements {
            provider,
            service_type,
        } => {
            let provider_addr = deps.api.addr_validate(&provider)?;
            to_json_binary(
                &REQUIREMENTS.may_load(deps.storage, (&provider_addr, service_type.as_str()))?,
            )
        }
        QueryMsg::ListProviderRequirements { provider } => {
            to_json_binary(&query_provider_requirements(deps, provider)?)
        }
        QueryMsg::GetServiceAccess {
            identity_id,
            provider,
            service_type,
        } => {
            let provider_addr = deps.api.addr_validate(&provider)?;
            to_json_binary(&ACCESS.may_load(
                deps.storage,
                (identity_id.as_str(), &provider_addr, service_type.as_str()),
            )?)
        }
        QueryMsg::CheckServiceAccess {
            identity_id,
            provider,
            service_type,
        } => to_json_binary(&query_check_service_access(
            deps,
            identity_id,
            provider,
            service_type,
        )?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        credential_contract: config.credential_contract,
    })
}

fn query_provider_requirements(deps: Deps, provider: String) -> StdResult<RequirementsResponse> {
    let provider_addr = deps.api.addr_validate(&provider)?;

    let requirements = REQUIREMENTS
        .prefix(&provider_addr)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (service_type, requirement) = item?;
            Ok(RequirementEntry {
                service_type,
                requirement,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RequirementsResponse { requirements })
}

fn query_check_service_access(
    deps: Deps,
    identity_id: String,
    provider: String,
    service_type: String,
) -> StdResult<AccessCheckResponse> {
    let config = CONFIG.load(deps.storage)?;
    let provider_addr = deps.api.addr_validate(&provider)?;

    let grant_active = ACCESS
        .may_load(
            deps.storage,
            (identity_id.as_str(), &provider_addr, service_type.as_str()),
        )?
        .map_or(false, |access| access.active);
    let provider_active = PROVIDERS
        .may_load(deps.storage, &provider_addr)?
        .map_or(false, |provider| provider.active);
    let requirement =
        REQUIREMENTS.may_load(deps.storage, (&provider_addr, service_type.as_str()))?;

    let mut missing_credentials = vec![];
    if let Some(ref requirement) = requirement {
        for credential_type in &requirement.required_credentials {
            if !credential_is_valid(
                deps,
                &config.credential_contract,
                &identity_id,
                credential_type,
            )? {
                missing_credentials.push(credential_type.clone());
            }
        }
    }

    Ok(AccessCheckResponse {
        allowed: grant_active
            && provider_active
            && requirement.is_some()
            && missing_credentials.is_empty(),
        grant_active,
        provider_active,
        missing_credentials,
    })
}
