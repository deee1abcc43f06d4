use std::collections::BTreeMap;

use dk_api::latest::*;
use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use rstest::fixture;

use crate::constants::*;

// Cloud-native DynaKube in the operator namespace, with the cluster status the webhook needs
#[fixture]
pub fn test_dynakube(#[default(TEST_DYNAKUBE)] name: &str) -> DynaKube {
    DynaKube {
        metadata: metav1::ObjectMeta {
            namespace: Some(TEST_OPERATOR_NAMESPACE.into()),
            name: Some(name.into()),
            uid: Some(TEST_DYNAKUBE_UID.into()),
            ..Default::default()
        },
        spec: DynaKubeSpec {
            api_url: TEST_API_URL.into(),
            one_agent: OneAgentSpec {
                cloud_native_full_stack: Some(CloudNativeFullStackSpec::default()),
                ..Default::default()
            },
            ..Default::default()
        },
        status: Some(DynaKubeStatus {
            kube_system_uuid: Some(TEST_KUBE_SYSTEM_UUID.into()),
            kubernetes_cluster_name: Some(TEST_CLUSTER_NAME.into()),
            kubernetes_cluster_meid: Some(TEST_CLUSTER_MEID.into()),
            ..Default::default()
        }),
    }
}

#[fixture]
pub fn test_pod(#[default(TEST_POD)] name: &str) -> corev1::Pod {
    corev1::Pod {
        metadata: metav1::ObjectMeta {
            namespace: Some(TEST_NAMESPACE.into()),
            name: Some(name.into()),
            ..Default::default()
        },
        spec: Some(corev1::PodSpec {
            containers: vec![test_container(TEST_CONTAINER)],
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn test_container(name: &str) -> corev1::Container {
    corev1::Container {
        name: name.into(),
        image: Some(TEST_CONTAINER_IMAGE.into()),
        ..Default::default()
    }
}

#[fixture]
pub fn test_namespace(#[default(TEST_NAMESPACE)] name: &str) -> corev1::Namespace {
    corev1::Namespace {
        metadata: metav1::ObjectMeta {
            name: Some(name.into()),
            uid: Some(format!("{name}-uid")),
            labels: Some(BTreeMap::from([("kubernetes.io/metadata.name".into(), name.into())])),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn test_secret(namespace: &str, name: &str, data: &[(&str, &str)]) -> corev1::Secret {
    corev1::Secret {
        metadata: metav1::ObjectMeta {
            namespace: Some(namespace.into()),
            name: Some(name.into()),
            ..Default::default()
        },
        data: Some(
            data.iter()
                .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
                .collect(),
        ),
        ..Default::default()
    }
}
