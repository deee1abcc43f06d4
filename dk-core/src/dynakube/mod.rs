mod accessors;
mod arguments;
mod feature_flags;
mod images;
mod names;
mod proxy;
mod tenant;

use std::fmt;

pub use arguments::ArgumentsMap;
use dk_api::latest::{
    AppInjectionSpec,
    HostInjectSpec,
};
pub use feature_flags::*;
pub use images::*;
pub use names::*;
pub use proxy::*;
pub use tenant::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {DynaKubeError,
    #[error("api url is missing")]
    MissingApiUrl(String),

    #[error("problem parsing tenant id from api url: {0}")]
    InvalidTenantUrl(String),

    #[error("failed to read proxy secret: {0}")]
    MissingProxySecret(String),

    #[error("proxy secret {0} does not contain the key \"proxy\"")]
    MissingProxyKey(String),

    #[error("invalid OneAgent version: {0}")]
    InvalidVersion(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OneAgentMode {
    ClassicFullStack,
    CloudNativeFullStack,
    ApplicationMonitoring,
    HostMonitoring,
    None,
}

impl fmt::Display for OneAgentMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OneAgentMode::ClassicFullStack => "classicFullStack",
            OneAgentMode::CloudNativeFullStack => "cloudNativeFullStack",
            OneAgentMode::ApplicationMonitoring => "applicationMonitoring",
            OneAgentMode::HostMonitoring => "hostMonitoring",
            OneAgentMode::None => "none",
        };
        write!(f, "{name}")
    }
}

// Pure projections of the (hub-version) DynaKube that the webhook, the validator and the
// mutators all rely on
pub trait DynaKubeExt {
    fn mode(&self) -> OneAgentMode;
    fn configured_modes(&self) -> Vec<OneAgentMode>;
    fn is_daemonset_required(&self) -> bool;
    fn is_app_injection_needed(&self) -> bool;
    fn is_auto_update_enabled(&self) -> bool;
    fn is_read_only_host_fs(&self) -> bool;

    fn host_inject_spec(&self) -> Option<&HostInjectSpec>;
    fn app_injection_spec(&self) -> Option<&AppInjectionSpec>;
    fn host_group(&self) -> String;
    fn host_group_as_param(&self) -> Option<String>;
    fn arguments_map(&self) -> ArgumentsMap;

    fn oneagent_version(&self) -> Option<&str>;
    fn oneagent_image(&self) -> Option<&str>;
    fn code_modules_image(&self) -> Option<&str>;
    fn init_resources(&self) -> Option<&corev1::ResourceRequirements>;
    fn one_agent_namespace_selector(&self) -> Option<&metav1::LabelSelector>;

    fn metadata_enrichment_enabled(&self) -> bool;
    fn metadata_enrichment_namespace_selector(&self) -> Option<&metav1::LabelSelector>;

    fn active_gate_enabled(&self) -> bool;
    fn has_capability(&self, capability: &str) -> bool;
    fn log_monitoring_enabled(&self) -> bool;
    fn extensions_enabled(&self) -> bool;
    fn kspm_enabled(&self) -> bool;
    fn needs_bootstrapper_certs(&self) -> bool;

    fn tenant_uuid(&self) -> anyhow::Result<String>;
    fn api_request_threshold(&self) -> i32;
    fn feature_flags(&self) -> FeatureFlags<'_>;
    fn pull_secret_names(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests;
