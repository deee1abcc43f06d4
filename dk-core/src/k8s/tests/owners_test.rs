use httpmock::Method::GET;
use serde_json::json;

use super::*;

fn owned_by(kind: &str, name: &str) -> metav1::OwnerReference {
    metav1::OwnerReference {
        api_version: "apps/v1".into(),
        kind: kind.into(),
        name: name.into(),
        uid: format!("{name}-uid"),
        controller: Some(true),
        ..Default::default()
    }
}

#[rstest]
#[tokio::test]
async fn test_find_root_workload_no_owner(test_pod: corev1::Pod) {
    let (_, client) = make_fake_apiserver();
    let res = find_root_workload(client, &test_pod, TEST_NAMESPACE).await.unwrap();
    assert_eq!(res, WorkloadInfo { kind: "pod".into(), name: TEST_POD.into() });
}

#[rstest]
#[tokio::test]
async fn test_find_root_workload_deployment(mut test_pod: corev1::Pod) {
    test_pod.metadata.owner_references = Some(vec![owned_by(REPLICASET_KIND, TEST_REPLICASET)]);

    let (mut fake_apiserver, client) = make_fake_apiserver();
    let rs_owner = owned_by("Deployment", TEST_DEPLOYMENT);
    fake_apiserver.handle(move |when, then| {
        when.method(GET)
            .path(format!("/apis/apps/v1/namespaces/{TEST_NAMESPACE}/replicasets/{TEST_REPLICASET}"));
        then.json_body(json!({
            "apiVersion": "apps/v1",
            "kind": "ReplicaSet",
            "metadata": {
                "namespace": TEST_NAMESPACE,
                "name": TEST_REPLICASET,
                "ownerReferences": [rs_owner],
            },
        }));
    });
    fake_apiserver.build();

    let res = find_root_workload(client, &test_pod, TEST_NAMESPACE).await.unwrap();

    fake_apiserver.assert();
    assert_eq!(res, WorkloadInfo { kind: "deployment".into(), name: TEST_DEPLOYMENT.into() });
}

#[rstest]
#[tokio::test]
async fn test_find_root_workload_orphaned_replicaset(mut test_pod: corev1::Pod) {
    test_pod.metadata.owner_references = Some(vec![owned_by(REPLICASET_KIND, TEST_REPLICASET)]);

    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver
        .handle_not_found(format!("/apis/apps/v1/namespaces/{TEST_NAMESPACE}/replicasets/{TEST_REPLICASET}"))
        .build();

    let res = find_root_workload(client, &test_pod, TEST_NAMESPACE).await.unwrap();

    fake_apiserver.assert();
    assert_eq!(res, WorkloadInfo { kind: "replicaset".into(), name: TEST_REPLICASET.into() });
}

#[rstest]
#[tokio::test]
async fn test_find_root_workload_statefulset(mut test_pod: corev1::Pod) {
    test_pod.metadata.owner_references = Some(vec![owned_by("StatefulSet", "the-sts")]);

    let (_, client) = make_fake_apiserver();
    let res = find_root_workload(client, &test_pod, TEST_NAMESPACE).await.unwrap();
    assert_eq!(res, WorkloadInfo { kind: "statefulset".into(), name: "the-sts".into() });
}
