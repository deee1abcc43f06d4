use kube::CustomResource;
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

pub use crate::common::{
    ActiveGateSpec,
    AppInjectionSpec,
    DynaKubeStatus,
    ExtensionsSpec,
    LogMonitoringSpec,
    MetadataEnrichmentSpec,
    TemplatesSpec,
    ValueSource,
};
use crate::{
    REMOVED_AUTO_UPDATE_ANNOTATION_KEY,
    common,
    restore_removed_field,
    stash_removed_field,
    v1beta4,
};

pub const API_VERSION: &str = "dynatrace.com/v1beta3";

pub use crate::v1beta4::ApplicationMonitoringSpec;

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInjectSpec {
    #[serde(flatten)]
    pub base: common::HostInjectSpec,

    pub auto_update: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudNativeFullStackSpec {
    #[serde(flatten)]
    pub host_inject: HostInjectSpec,

    #[serde(flatten)]
    pub app_injection: AppInjectionSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OneAgentSpec {
    pub classic_full_stack: Option<HostInjectSpec>,
    pub cloud_native_full_stack: Option<CloudNativeFullStackSpec>,
    pub application_monitoring: Option<ApplicationMonitoringSpec>,
    pub host_monitoring: Option<HostInjectSpec>,
    pub host_group: Option<String>,
}

#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(group = "dynatrace.com", version = "v1beta3", kind = "DynaKube", namespaced)]
#[kube(shortname = "dk", shortname = "dks")]
#[kube(status = "DynaKubeStatus")]
#[kube(derive = "Default", derive = "PartialEq")]
#[kube(
    printcolumn = r#"{"name":"apiurl", "type":"string", "jsonPath":".spec.apiUrl"}"#,
    printcolumn = r#"{"name":"status", "type":"string", "jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct DynaKubeSpec {
    // Required fields
    pub api_url: String,

    // Optional fields
    pub tokens: Option<String>,
    pub proxy: Option<ValueSource>,
    #[serde(rename = "trustedCAs")]
    pub trusted_cas: Option<String>,
    pub network_zone: Option<String>,
    pub custom_pull_secret: Option<String>,
    #[serde(default)]
    pub skip_cert_check: bool,
    #[serde(default)]
    pub enable_istio: bool,
    pub dynatrace_api_request_threshold: Option<i32>,

    #[serde(default)]
    pub one_agent: OneAgentSpec,
    #[serde(default)]
    pub metadata_enrichment: MetadataEnrichmentSpec,
    #[serde(default)]
    pub active_gate: ActiveGateSpec,
    pub log_monitoring: Option<LogMonitoringSpec>,
    pub extensions: Option<ExtensionsSpec>,
    #[serde(default)]
    pub templates: TemplatesSpec,
}

impl OneAgentSpec {
    // Only one of the host-inject modes can be active, so there is at most one autoUpdate value
    // to carry over
    fn auto_update(&self) -> Option<bool> {
        if let Some(cfs) = &self.classic_full_stack {
            return cfs.auto_update;
        }
        if let Some(cnfs) = &self.cloud_native_full_stack {
            return cnfs.host_inject.auto_update;
        }
        if let Some(hm) = &self.host_monitoring {
            return hm.auto_update;
        }
        None
    }
}

fn restore_host_inject(base: &common::HostInjectSpec, auto_update: Option<bool>) -> HostInjectSpec {
    HostInjectSpec { base: base.clone(), auto_update }
}

impl DynaKube {
    pub fn to_next(&self) -> Result<v1beta4::DynaKube, serde_json::Error> {
        let mut metadata = self.metadata.clone();
        let oa = &self.spec.one_agent;
        stash_removed_field(&mut metadata, REMOVED_AUTO_UPDATE_ANNOTATION_KEY, oa.auto_update().as_ref())?;

        let one_agent = v1beta4::OneAgentSpec {
            classic_full_stack: oa.classic_full_stack.as_ref().map(|cfs| cfs.base.clone()),
            cloud_native_full_stack: oa.cloud_native_full_stack.as_ref().map(|cnfs| {
                v1beta4::CloudNativeFullStackSpec {
                    host_inject: cnfs.host_inject.base.clone(),
                    app_injection: cnfs.app_injection.clone(),
                }
            }),
            application_monitoring: oa.application_monitoring.clone(),
            host_monitoring: oa.host_monitoring.as_ref().map(|hm| hm.base.clone()),
            host_group: oa.host_group.clone(),
        };

        let spec = v1beta4::DynaKubeSpec {
            api_url: self.spec.api_url.clone(),
            tokens: self.spec.tokens.clone(),
            proxy: self.spec.proxy.clone(),
            trusted_cas: self.spec.trusted_cas.clone(),
            network_zone: self.spec.network_zone.clone(),
            custom_pull_secret: self.spec.custom_pull_secret.clone(),
            skip_cert_check: self.spec.skip_cert_check,
            enable_istio: self.spec.enable_istio,
            dynatrace_api_request_threshold: self.spec.dynatrace_api_request_threshold,
            one_agent,
            metadata_enrichment: self.spec.metadata_enrichment.clone(),
            active_gate: self.spec.active_gate.clone(),
            log_monitoring: self.spec.log_monitoring.clone(),
            extensions: self.spec.extensions.clone(),
            kspm: None,
            templates: self.spec.templates.clone(),
        };

        Ok(v1beta4::DynaKube { metadata, spec, status: self.status.clone() })
    }

    pub fn from_next(next: &v1beta4::DynaKube) -> Result<DynaKube, serde_json::Error> {
        let mut metadata = next.metadata.clone();
        let auto_update: Option<bool> = restore_removed_field(&mut metadata, REMOVED_AUTO_UPDATE_ANNOTATION_KEY)?;

        let oa = &next.spec.one_agent;
        let one_agent = OneAgentSpec {
            classic_full_stack: oa.classic_full_stack.as_ref().map(|cfs| restore_host_inject(cfs, auto_update)),
            cloud_native_full_stack: oa.cloud_native_full_stack.as_ref().map(|cnfs| CloudNativeFullStackSpec {
                host_inject: restore_host_inject(&cnfs.host_inject, auto_update),
                app_injection: cnfs.app_injection.clone(),
            }),
            application_monitoring: oa.application_monitoring.clone(),
            host_monitoring: oa.host_monitoring.as_ref().map(|hm| restore_host_inject(hm, auto_update)),
            host_group: oa.host_group.clone(),
        };

        let spec = DynaKubeSpec {
            api_url: next.spec.api_url.clone(),
            tokens: next.spec.tokens.clone(),
            proxy: next.spec.proxy.clone(),
            trusted_cas: next.spec.trusted_cas.clone(),
            network_zone: next.spec.network_zone.clone(),
            custom_pull_secret: next.spec.custom_pull_secret.clone(),
            skip_cert_check: next.spec.skip_cert_check,
            enable_istio: next.spec.enable_istio,
            dynatrace_api_request_threshold: next.spec.dynatrace_api_request_threshold,
            one_agent,
            metadata_enrichment: next.spec.metadata_enrichment.clone(),
            active_gate: next.spec.active_gate.clone(),
            log_monitoring: next.spec.log_monitoring.clone(),
            extensions: next.spec.extensions.clone(),
            templates: next.spec.templates.clone(),
        };

        Ok(DynaKube { metadata, spec, status: next.status.clone() })
    }
}
