pub const TEST_NAMESPACE: &str = "test-namespace";
pub const TEST_OPERATOR_NAMESPACE: &str = "dynatrace";
pub const TEST_DYNAKUBE: &str = "dynakube";
pub const TEST_DYNAKUBE_UID: &str = "6a2c1f6e-0d3a-4f9e-9d0b-2c0e5a7b1f42";
pub const TEST_POD: &str = "the-pod";
pub const TEST_CONTAINER: &str = "app";
pub const TEST_CONTAINER_IMAGE: &str = "quay.io/example/app:1.0";
pub const TEST_REPLICASET: &str = "the-replicaset";
pub const TEST_DEPLOYMENT: &str = "the-deployment";
pub const TEST_TENANT: &str = "abc12345";
pub const TEST_API_URL: &str = "https://abc12345.live.dynatrace.com/api";
pub const TEST_KUBE_SYSTEM_UUID: &str = "0e5b3a6c-3a4e-4a52-8b7e-41c2b36f9d10";
pub const TEST_CLUSTER_NAME: &str = "test-cluster";
pub const TEST_CLUSTER_MEID: &str = "KUBERNETES_CLUSTER-0123456789ABCDEF";
pub const TEST_BOOTSTRAPPER_IMAGE: &str = "public.ecr.aws/dynatrace/dynatrace-operator:v1.6.0";
