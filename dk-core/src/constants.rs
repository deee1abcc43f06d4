// Well-known labels and annotations
pub const KUBERNETES_IO_METADATA_NAME_KEY: &str = "kubernetes.io/metadata.name";
pub const APP_KUBERNETES_IO_NAME_KEY: &str = "app.kubernetes.io/name";
pub const APP_KUBERNETES_IO_VERSION_KEY: &str = "app.kubernetes.io/version";
pub const APP_KUBERNETES_IO_COMPONENT_KEY: &str = "app.kubernetes.io/component";
pub const APP_KUBERNETES_IO_CREATED_BY_KEY: &str = "app.kubernetes.io/created-by";
pub const APP_KUBERNETES_IO_MANAGED_BY_KEY: &str = "app.kubernetes.io/managed-by";

pub const OPERATOR_NAME: &str = "dynatrace-operator";
pub const WEBHOOK_COMPONENT: &str = "webhook";

// Pod annotations written by the mutator
pub const INJECTED_ANNOTATION_KEY: &str = "dynatrace.com/injected";
pub const REASON_ANNOTATION_KEY: &str = "dynatrace.com/reason";
pub const FAILURE_POLICY_ANNOTATION_KEY: &str = "oneagent.dynatrace.com/failure-policy";
pub const CONFIG_VOLUME_SIZE_ANNOTATION_KEY: &str = "volume.dynatrace.com/dynatrace-config";
pub const SPLIT_MOUNTS_ANNOTATION_KEY: &str = "dynatrace.com/split-mounts";
pub const INTERNAL_ANNOTATION_PREFIX: &str = "internal.operator.dynatrace.com/";

// Pod annotations read by the mutator
pub const INJECT_ANNOTATION_KEY: &str = "dynatrace.com/inject";
pub const ONEAGENT_INJECT_ANNOTATION_KEY: &str = "oneagent.dynatrace.com/inject";
pub const ENRICHMENT_INJECT_ANNOTATION_KEY: &str = "metadata-enrichment.dynatrace.com/inject";
pub const CONTAINER_INJECT_ANNOTATION_PREFIX: &str = "container.inject.dynatrace.com/";
pub const TECHNOLOGIES_ANNOTATION_KEY: &str = "oneagent.dynatrace.com/technologies";

// Metadata enrichment
pub const ENRICHMENT_ANNOTATION_PREFIX: &str = "metadata.dynatrace.com/";
pub const WORKLOAD_KIND_ANNOTATION_KEY: &str = "metadata.dynatrace.com/k8s.workload.kind";
pub const WORKLOAD_NAME_ANNOTATION_KEY: &str = "metadata.dynatrace.com/k8s.workload.name";

// Namespace label set by the namespace mapper
pub const INJECTION_INSTANCE_LABEL_KEY: &str = "dynakube.internal.dynatrace.com/instance";

// Feature flags
pub const FEATURE_FLAG_PREFIX: &str = "feature.dynatrace.com/";

// Secrets replicated into the pod's namespace
pub const BOOTSTRAPPER_CONFIG_SECRET_NAME: &str = "dynatrace-bootstrapper-config";
pub const BOOTSTRAPPER_CERTS_SECRET_NAME: &str = "dynatrace-bootstrapper-certs";
pub const BOOTSTRAPPER_CONFIG_SOURCE_SUFFIX: &str = "bootstrapper-config";
pub const BOOTSTRAPPER_CERTS_SOURCE_SUFFIX: &str = "bootstrapper-certs";

// Default object names are "<dynakube>-<suffix>"
pub const TENANT_SECRET_SUFFIX: &str = "activegate-tenant-secret";
pub const ACTIVEGATE_TLS_SECRET_SUFFIX: &str = "activegate-tls-secret";
pub const ACTIVEGATE_AUTH_TOKEN_SECRET_SUFFIX: &str = "activegate-authtoken-secret";
pub const ONEAGENT_CONNECTION_INFO_SUFFIX: &str = "oneagent-connection-info";
pub const ACTIVEGATE_CONNECTION_INFO_SUFFIX: &str = "activegate-connection-info";
pub const PULL_SECRET_SUFFIX: &str = "pull-secret";
pub const EXTENSIONS_TOKEN_SUFFIX: &str = "extensions-token";
pub const LOGMONITORING_DAEMONSET_SUFFIX: &str = "logmonitoring";

// Secret/configmap keys
pub const PROXY_SECRET_KEY: &str = "proxy";
pub const TRUSTED_CAS_CONFIGMAP_KEY: &str = "certs";

// Images
pub const DEFAULT_IMAGE_TAG: &str = "latest";
pub const RAW_IMAGE_SUFFIX: &str = "-raw";
pub const ONEAGENT_IMAGE_COMPONENT: &str = "oneagent";
pub const CODE_MODULES_IMAGE_COMPONENT: &str = "codemodules";
pub const ACTIVEGATE_IMAGE_COMPONENT: &str = "activegate";

// Defaults
pub const DEFAULT_API_REQUEST_THRESHOLD_MINUTES: i32 = 15;
pub const MAX_DYNAKUBE_NAME_LENGTH: usize = 40;
pub const DEFAULT_WEBHOOK_PORT: &str = "8443";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: &str = "10";

// Env vars
pub const POD_NAME_ENV_VAR: &str = "POD_NAME";
pub const POD_NAMESPACE_ENV_VAR: &str = "POD_NAMESPACE";

// Kinds
pub const DYNAKUBE_KIND: &str = "DynaKube";
pub const REPLICASET_KIND: &str = "ReplicaSet";
pub const JOB_KIND: &str = "Job";
