use kube::CustomResource;
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

pub use crate::common::*;
use crate::{
    REMOVED_USE_CSI_DRIVER_ANNOTATION_KEY,
    restore_removed_field,
    stash_removed_field,
    v1beta5,
};

pub const API_VERSION: &str = "dynatrace.com/v1beta4";

pub use crate::v1beta5::CloudNativeFullStackSpec;

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationMonitoringSpec {
    #[serde(flatten)]
    pub app_injection: AppInjectionSpec,

    pub version: Option<String>,

    #[serde(rename = "useCSIDriver")]
    pub use_csi_driver: Option<bool>,
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
#[kube(group = "dynatrace.com", version = "v1beta4", kind = "DynaKube", namespaced)]
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
    pub kspm: Option<KspmSpec>,
    #[serde(default)]
    pub templates: TemplatesSpec,
}

impl DynaKube {
    pub fn to_next(&self) -> Result<v1beta5::DynaKube, serde_json::Error> {
        let mut metadata = self.metadata.clone();
        let use_csi_driver = self
            .spec
            .one_agent
            .application_monitoring
            .as_ref()
            .and_then(|am| am.use_csi_driver);
        stash_removed_field(&mut metadata, REMOVED_USE_CSI_DRIVER_ANNOTATION_KEY, use_csi_driver.as_ref())?;

        let oa = &self.spec.one_agent;
        let one_agent = v1beta5::OneAgentSpec {
            classic_full_stack: oa.classic_full_stack.clone(),
            cloud_native_full_stack: oa.cloud_native_full_stack.clone(),
            application_monitoring: oa.application_monitoring.as_ref().map(|am| v1beta5::ApplicationMonitoringSpec {
                app_injection: am.app_injection.clone(),
                version: am.version.clone(),
            }),
            host_monitoring: oa.host_monitoring.clone(),
            host_group: oa.host_group.clone(),
        };

        let spec = v1beta5::DynaKubeSpec {
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
            kspm: self.spec.kspm.clone(),
            telemetry_ingest: None,
            templates: self.spec.templates.clone(),
        };

        Ok(v1beta5::DynaKube { metadata, spec, status: self.status.clone() })
    }

    pub fn from_next(next: &v1beta5::DynaKube) -> Result<DynaKube, serde_json::Error> {
        let mut metadata = next.metadata.clone();
        let use_csi_driver: Option<bool> = restore_removed_field(&mut metadata, REMOVED_USE_CSI_DRIVER_ANNOTATION_KEY)?;

        let oa = &next.spec.one_agent;
        let one_agent = OneAgentSpec {
            classic_full_stack: oa.classic_full_stack.clone(),
            cloud_native_full_stack: oa.cloud_native_full_stack.clone(),
            application_monitoring: oa.application_monitoring.as_ref().map(|am| ApplicationMonitoringSpec {
                app_injection: am.app_injection.clone(),
                version: am.version.clone(),
                use_csi_driver,
            }),
            host_monitoring: oa.host_monitoring.clone(),
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
            kspm: next.spec.kspm.clone(),
            templates: next.spec.templates.clone(),
        };

        Ok(DynaKube { metadata, spec, status: next.status.clone() })
    }
}
