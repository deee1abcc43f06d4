use std::collections::BTreeMap;

use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

// Structures in this module have the same shape in every served version, so the versioned
// modules share them instead of redeclaring them.

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSource {
    pub value: Option<String>,
    pub value_from: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRefSpec {
    pub repository: Option<String>,
    pub tag: Option<String>,
}

// Settings for the host-agent daemonset; shared by classicFullStack, hostMonitoring and
// cloudNativeFullStack
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostInjectSpec {
    pub annotations: Option<BTreeMap<String, String>>,
    pub labels: Option<BTreeMap<String, String>>,
    pub node_selector: Option<BTreeMap<String, String>>,
    pub priority_class_name: Option<String>,
    pub tolerations: Option<Vec<corev1::Toleration>>,
    pub one_agent_resources: Option<corev1::ResourceRequirements>,
    pub args: Option<Vec<String>>,
    pub env: Option<Vec<corev1::EnvVar>>,
    pub version: Option<String>,
    pub image: Option<String>,
    pub dns_policy: Option<String>,
    pub sec_comp_profile: Option<String>,
}

// Settings for pod injection; shared by applicationMonitoring and cloudNativeFullStack
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppInjectionSpec {
    pub init_resources: Option<corev1::ResourceRequirements>,
    pub code_modules_image: Option<String>,
    pub namespace_selector: Option<metav1::LabelSelector>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActiveGateSpec {
    pub capabilities: Vec<String>,
    pub image: Option<String>,
    pub replicas: Option<i32>,
    pub group: Option<String>,
    pub tls_secret_name: Option<String>,
    pub custom_properties: Option<ValueSource>,
    pub resources: Option<corev1::ResourceRequirements>,
    pub node_selector: Option<BTreeMap<String, String>>,
    pub tolerations: Option<Vec<corev1::Toleration>>,
    pub labels: Option<BTreeMap<String, String>>,
    pub annotations: Option<BTreeMap<String, String>>,
    pub env: Option<Vec<corev1::EnvVar>>,
    pub priority_class_name: Option<String>,
    pub dns_policy: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataEnrichmentSpec {
    pub enabled: Option<bool>,
    pub namespace_selector: Option<metav1::LabelSelector>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRuleMatcher {
    pub attribute: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogMonitoringSpec {
    pub ingest_rule_matchers: Vec<IngestRuleMatcher>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
pub struct PrometheusSpec {}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionsSpec {
    pub prometheus: Option<PrometheusSpec>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KspmSpec {
    pub mapped_host_paths: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogMonitoringTemplateSpec {
    pub image_ref: Option<ImageRefSpec>,
    pub annotations: Option<BTreeMap<String, String>>,
    pub labels: Option<BTreeMap<String, String>>,
    pub node_selector: Option<BTreeMap<String, String>>,
    pub tolerations: Option<Vec<corev1::Toleration>>,
    pub resources: Option<corev1::ResourceRequirements>,
    pub priority_class_name: Option<String>,
    pub dns_policy: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KspmNodeConfigurationCollectorSpec {
    pub image_ref: Option<ImageRefSpec>,
    pub annotations: Option<BTreeMap<String, String>>,
    pub labels: Option<BTreeMap<String, String>>,
    pub node_selector: Option<BTreeMap<String, String>>,
    pub tolerations: Option<Vec<corev1::Toleration>>,
    pub resources: Option<corev1::ResourceRequirements>,
    pub priority_class_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionExecutionControllerSpec {
    pub image_ref: Option<ImageRefSpec>,
    pub persistent_volume_claim: Option<corev1::PersistentVolumeClaimSpec>,
    pub use_ephemeral_volume: bool,
    pub custom_config: Option<String>,
    pub custom_extension_certificates: Option<String>,
    pub annotations: Option<BTreeMap<String, String>>,
    pub labels: Option<BTreeMap<String, String>>,
    pub tolerations: Option<Vec<corev1::Toleration>>,
    pub resources: Option<corev1::ResourceRequirements>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenTelemetryCollectorSpec {
    pub image_ref: Option<ImageRefSpec>,
    pub replicas: Option<i32>,
    pub annotations: Option<BTreeMap<String, String>>,
    pub labels: Option<BTreeMap<String, String>>,
    pub tolerations: Option<Vec<corev1::Toleration>>,
    pub resources: Option<corev1::ResourceRequirements>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplatesSpec {
    pub log_monitoring: Option<LogMonitoringTemplateSpec>,
    pub kspm_node_configuration_collector: KspmNodeConfigurationCollectorSpec,
    pub extension_execution_controller: ExtensionExecutionControllerSpec,
    pub open_telemetry_collector: OpenTelemetryCollectorSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionStatus {
    pub image_id: Option<String>,
    pub version: Option<String>,
    pub source: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRule {
    #[serde(rename = "type")]
    pub type_: String,
    pub source: String,
    pub target: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataEnrichmentStatus {
    pub rules: Vec<EnrichmentRule>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DynaKubeStatus {
    pub phase: Option<String>,
    #[serde(rename = "kubeSystemUUID")]
    pub kube_system_uuid: Option<String>,
    pub kubernetes_cluster_name: Option<String>,
    #[serde(rename = "kubernetesClusterMEID")]
    pub kubernetes_cluster_meid: Option<String>,
    pub one_agent: VersionStatus,
    pub code_modules: VersionStatus,
    pub active_gate: VersionStatus,
    pub metadata_enrichment: MetadataEnrichmentStatus,
    pub updated_timestamp: Option<metav1::Time>,
}
