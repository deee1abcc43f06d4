use dk_api::latest::{
    AppInjectionSpec,
    DynaKube,
    HostInjectSpec,
};

use super::*;

const SET_HOST_GROUP_ARG: &str = "--set-host-group";

fn non_empty(s: Option<&String>) -> Option<&str> {
    s.map(String::as_str).filter(|s| !s.is_empty())
}

impl DynaKubeExt for DynaKube {
    // The validator rejects DynaKubes with more than one mode set, so picking the first one here
    // is only a tie-break for objects that never got admitted
    fn mode(&self) -> OneAgentMode {
        self.configured_modes().first().copied().unwrap_or(OneAgentMode::None)
    }

    fn configured_modes(&self) -> Vec<OneAgentMode> {
        let oa = &self.spec.one_agent;
        [
            (oa.classic_full_stack.is_some(), OneAgentMode::ClassicFullStack),
            (oa.cloud_native_full_stack.is_some(), OneAgentMode::CloudNativeFullStack),
            (oa.application_monitoring.is_some(), OneAgentMode::ApplicationMonitoring),
            (oa.host_monitoring.is_some(), OneAgentMode::HostMonitoring),
        ]
        .into_iter()
        .filter_map(|(set, mode)| set.then_some(mode))
        .collect()
    }

    fn is_daemonset_required(&self) -> bool {
        matches!(
            self.mode(),
            OneAgentMode::ClassicFullStack | OneAgentMode::CloudNativeFullStack | OneAgentMode::HostMonitoring
        )
    }

    fn is_app_injection_needed(&self) -> bool {
        matches!(self.mode(), OneAgentMode::ApplicationMonitoring | OneAgentMode::CloudNativeFullStack)
    }

    fn is_auto_update_enabled(&self) -> bool {
        self.is_daemonset_required() && self.oneagent_version().is_none() && self.oneagent_image().is_none()
    }

    fn is_read_only_host_fs(&self) -> bool {
        matches!(self.mode(), OneAgentMode::CloudNativeFullStack | OneAgentMode::HostMonitoring)
    }

    fn host_inject_spec(&self) -> Option<&HostInjectSpec> {
        let oa = &self.spec.one_agent;
        match self.mode() {
            OneAgentMode::ClassicFullStack => oa.classic_full_stack.as_ref(),
            OneAgentMode::CloudNativeFullStack => oa.cloud_native_full_stack.as_ref().map(|cnfs| &cnfs.host_inject),
            OneAgentMode::HostMonitoring => oa.host_monitoring.as_ref(),
            _ => None,
        }
    }

    fn app_injection_spec(&self) -> Option<&AppInjectionSpec> {
        let oa = &self.spec.one_agent;
        match self.mode() {
            OneAgentMode::CloudNativeFullStack => oa.cloud_native_full_stack.as_ref().map(|cnfs| &cnfs.app_injection),
            OneAgentMode::ApplicationMonitoring => oa.application_monitoring.as_ref().map(|am| &am.app_injection),
            _ => None,
        }
    }

    fn host_group(&self) -> String {
        match non_empty(self.spec.one_agent.host_group.as_ref()) {
            Some(hg) => hg.into(),
            None => self.host_group_as_param().unwrap_or_default(),
        }
    }

    fn host_group_as_param(&self) -> Option<String> {
        self.arguments_map().first(SET_HOST_GROUP_ARG).map(String::from)
    }

    fn arguments_map(&self) -> ArgumentsMap {
        let args = self.host_inject_spec().and_then(|his| his.args.as_deref()).unwrap_or_default();
        ArgumentsMap::parse(args)
    }

    fn oneagent_version(&self) -> Option<&str> {
        match self.mode() {
            OneAgentMode::ApplicationMonitoring => {
                non_empty(self.spec.one_agent.application_monitoring.as_ref().and_then(|am| am.version.as_ref()))
            },
            _ => non_empty(self.host_inject_spec().and_then(|his| his.version.as_ref())),
        }
    }

    fn oneagent_image(&self) -> Option<&str> {
        non_empty(self.host_inject_spec().and_then(|his| his.image.as_ref()))
    }

    fn code_modules_image(&self) -> Option<&str> {
        non_empty(self.app_injection_spec().and_then(|ais| ais.code_modules_image.as_ref()))
    }

    fn init_resources(&self) -> Option<&corev1::ResourceRequirements> {
        self.app_injection_spec().and_then(|ais| ais.init_resources.as_ref())
    }

    fn one_agent_namespace_selector(&self) -> Option<&metav1::LabelSelector> {
        self.app_injection_spec().and_then(|ais| ais.namespace_selector.as_ref())
    }

    fn metadata_enrichment_enabled(&self) -> bool {
        self.spec.metadata_enrichment.enabled.unwrap_or(false)
    }

    fn metadata_enrichment_namespace_selector(&self) -> Option<&metav1::LabelSelector> {
        self.spec.metadata_enrichment.namespace_selector.as_ref()
    }

    fn active_gate_enabled(&self) -> bool {
        !self.spec.active_gate.capabilities.is_empty() || self.extensions_enabled()
    }

    fn has_capability(&self, capability: &str) -> bool {
        self.spec.active_gate.capabilities.iter().any(|c| c == capability)
    }

    fn log_monitoring_enabled(&self) -> bool {
        self.spec.log_monitoring.is_some()
    }

    fn extensions_enabled(&self) -> bool {
        self.spec.extensions.as_ref().is_some_and(|ext| ext.prometheus.is_some())
    }

    fn kspm_enabled(&self) -> bool {
        self.spec.kspm.is_some()
    }

    fn needs_bootstrapper_certs(&self) -> bool {
        let has_trusted_cas = non_empty(self.spec.trusted_cas.as_ref()).is_some();
        let has_ag_tls = self.active_gate_enabled() && non_empty(self.spec.active_gate.tls_secret_name.as_ref()).is_some();
        has_trusted_cas || has_ag_tls
    }

    fn tenant_uuid(&self) -> anyhow::Result<String> {
        if self.spec.api_url.is_empty() {
            bail!(DynaKubeError::missing_api_url(&self.name_any()));
        }
        tenant_uuid_from_api_url(&self.spec.api_url)
    }

    fn api_request_threshold(&self) -> i32 {
        match self.spec.dynatrace_api_request_threshold {
            Some(t) if t >= 0 => t,
            _ => DEFAULT_API_REQUEST_THRESHOLD_MINUTES,
        }
    }

    fn feature_flags(&self) -> FeatureFlags<'_> {
        FeatureFlags::new(self.metadata.annotations.as_ref())
    }

    fn pull_secret_names(&self) -> Vec<String> {
        let mut names = vec![self.pull_secret_name()];
        if let Some(custom) = non_empty(self.spec.custom_pull_secret.as_ref()) {
            names.push(custom.into());
        }
        names
    }
}
