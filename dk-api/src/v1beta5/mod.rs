use kube::CustomResource;
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

pub use crate::common::*;

pub const API_VERSION: &str = "dynatrace.com/v1beta5";

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudNativeFullStackSpec {
    #[serde(flatten)]
    pub host_inject: HostInjectSpec,

    #[serde(flatten)]
    pub app_injection: AppInjectionSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationMonitoringSpec {
    #[serde(flatten)]
    pub app_injection: AppInjectionSpec,

    pub version: Option<String>,
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

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TelemetryIngestSpec {
    pub protocols: Vec<String>,
    pub service_name: Option<String>,
    pub tls_ref_name: Option<String>,
}

#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(group = "dynatrace.com", version = "v1beta5", kind = "DynaKube", namespaced)]
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
    pub telemetry_ingest: Option<TelemetryIngestSpec>,
    #[serde(default)]
    pub templates: TemplatesSpec,
}
