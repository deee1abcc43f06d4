use std::collections::BTreeSet;

use dk_core::dynakube::{
    OneAgentMode,
    validate_oneagent_version,
};
use dk_core::prelude::*;

use crate::validation::ValidationContext;
use crate::validation::validator::{
    Check,
    Validator,
    error,
    warning,
};

pub const SET_HOST_PROPERTY_ARG: &str = "--set-host-property";
pub const SET_HOST_TAG_ARG: &str = "--set-host-tag";
pub const SET_HOST_ID_SOURCE_ARG: &str = "--set-host-id-source";
pub const INSTALLER_ENV_VARS: [&str; 2] = ["ONEAGENT_INSTALLER_SCRIPT_URL", "ONEAGENT_INSTALLER_TOKEN"];

fn conflicting_modes(_: &ValidationContext, dk: &DynaKube) -> String {
    let modes = dk.configured_modes();
    if modes.len() <= 1 {
        return String::new();
    }

    let names: Vec<_> = modes.iter().map(OneAgentMode::to_string).collect();
    format!("only one OneAgent mode may be configured at a time, found {}", names.join(", "))
}

pub fn conflicting_modes_validator() -> Validator {
    error("conflicting_oneagent_modes", Check::Sync(conflicting_modes))
}

fn version(_: &ValidationContext, dk: &DynaKube) -> String {
    match dk.oneagent_version() {
        Some(v) if validate_oneagent_version(v).is_err() => {
            format!("the OneAgent version {v} is invalid, expected <major>.<minor>.<patch>.<yyyymmdd>-<hhmmss>")
        },
        _ => String::new(),
    }
}

pub fn version_validator() -> Validator {
    error("oneagent_version", Check::Sync(version))
}

fn public_image(_: &ValidationContext, dk: &DynaKube) -> String {
    if dk.oneagent_image().is_some() && !dk.is_read_only_host_fs() {
        return format!(
            "a custom OneAgent image requires {} or {} mode, but the DynaKube uses {}",
            OneAgentMode::CloudNativeFullStack,
            OneAgentMode::HostMonitoring,
            dk.mode(),
        );
    }
    String::new()
}

pub fn public_image_validator() -> Validator {
    error("oneagent_public_image", Check::Sync(public_image))
}

fn csi_required(ctx: &ValidationContext, dk: &DynaKube) -> String {
    if !dk.feature_flags().read_only_csi_volume() {
        return String::new();
    }
    if !ctx.csi_driver_enabled {
        return "the read-only CSI volume feature flag is set, but the CSI driver is not enabled".into();
    }
    if !dk.is_read_only_host_fs() {
        return format!("the read-only CSI volume feature flag is set, but {} mode does not use the CSI driver", dk.mode());
    }
    String::new()
}

pub fn csi_required_validator() -> Validator {
    error("csi_required", Check::Sync(csi_required))
}

fn duplicate_args(_: &ValidationContext, dk: &DynaKube) -> String {
    let duplicates: Vec<_> = dk
        .arguments_map()
        .iter()
        .filter(|(key, values)| values.len() > 1 && *key != SET_HOST_PROPERTY_ARG && *key != SET_HOST_TAG_ARG)
        .map(|(key, _)| key.to_string())
        .collect();

    if duplicates.is_empty() {
        return String::new();
    }
    format!("duplicate OneAgent arguments: {}", duplicates.join(", "))
}

pub fn duplicate_args_validator() -> Validator {
    error("duplicate_oneagent_args", Check::Sync(duplicate_args))
}

fn duplicate_host_tags(_: &ValidationContext, dk: &DynaKube) -> String {
    let args = dk.arguments_map();
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for tag in args.get(SET_HOST_TAG_ARG).unwrap_or_default() {
        if !seen.insert(tag) {
            duplicates.insert(tag.as_str());
        }
    }

    if duplicates.is_empty() {
        return String::new();
    }
    format!("duplicate host tags: {}", duplicates.into_iter().collect::<Vec<_>>().join(", "))
}

pub fn duplicate_host_tags_validator() -> Validator {
    error("duplicate_host_tags", Check::Sync(duplicate_host_tags))
}

fn host_id_source(_: &ValidationContext, dk: &DynaKube) -> String {
    if dk.mode() == OneAgentMode::CloudNativeFullStack && dk.arguments_map().contains_key(SET_HOST_ID_SOURCE_ARG) {
        return format!("{SET_HOST_ID_SOURCE_ARG} is not supported in {} mode", OneAgentMode::CloudNativeFullStack);
    }
    String::new()
}

pub fn host_id_source_validator() -> Validator {
    error("host_id_source", Check::Sync(host_id_source))
}

fn installer_env(_: &ValidationContext, dk: &DynaKube) -> String {
    let env = dk.host_inject_spec().and_then(|his| his.env.as_deref()).unwrap_or_default();
    let used: Vec<_> = INSTALLER_ENV_VARS
        .into_iter()
        .filter(|name| env.iter().any(|e| e.name == *name))
        .collect();

    if used.is_empty() {
        return String::new();
    }
    format!("the OneAgent installer environment variables {} are not supported and will be ignored", used.join(", "))
}

pub fn installer_env_validator() -> Validator {
    warning("oneagent_installer_env", Check::Sync(installer_env))
}

fn host_group(_: &ValidationContext, dk: &DynaKube) -> String {
    let field_set = dk.spec.one_agent.host_group.as_ref().is_some_and(|hg| !hg.is_empty());
    if field_set && dk.host_group_as_param().is_some() {
        return "the host group is set both as a --set-host-group argument and in oneAgent.hostGroup; \
                the hostGroup field takes precedence"
            .into();
    }
    String::new()
}

pub fn host_group_validator() -> Validator {
    warning("host_group", Check::Sync(host_group))
}
