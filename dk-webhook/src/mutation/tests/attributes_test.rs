use super::*;

#[rstest]
fn test_pod_attribute_args(test_pod: corev1::Pod, test_dynakube: DynaKube) {
    let req = test_request(test_pod, test_dynakube);
    assert_eq!(
        pod_attribute_args(&req),
        vec![
            format!("--attribute-clusterUID={TEST_KUBE_SYSTEM_UUID}"),
            "--attribute-podName=$(K8S_POD_NAME)".to_string(),
            "--attribute-podUID=$(K8S_POD_UID)".to_string(),
            "--attribute-nodeName=$(K8S_NODE_NAME)".to_string(),
            format!("--attribute-namespaceName={TEST_NAMESPACE}"),
            format!("--attribute-clusterName={TEST_CLUSTER_NAME}"),
            format!("--attribute-dtClusterEntity={TEST_CLUSTER_MEID}"),
            format!("--attribute-dt.kubernetes.cluster.id={TEST_KUBE_SYSTEM_UUID}"),
        ]
    );
}

#[rstest]
fn test_pod_attribute_args_no_status(test_pod: corev1::Pod, mut test_dynakube: DynaKube) {
    test_dynakube.status = None;
    let req = test_request(test_pod, test_dynakube);
    let args = pod_attribute_args(&req);
    assert_contains!(args, &"--attribute-clusterUID=".to_string());
    assert_contains!(args, &"--attribute-dt.kubernetes.cluster.id=".to_string());
}

#[rstest]
fn test_add_container_attributes(test_pod: corev1::Pod, test_dynakube: DynaKube) {
    let mut req = test_request(test_pod, test_dynakube);
    let names = req.new_container_names().unwrap();

    let args = add_container_attributes(&mut req, &names).unwrap();

    assert_eq!(
        args,
        vec![
            r#"--container-attribute={"containerName":"app","image":{"registry":"quay.io","repository":"example/app","tag":"1.0"},"capabilities":["oneAgent"]}"#
        ]
    );
    let mounts = container(&req.pod, TEST_CONTAINER).volume_mounts.clone().unwrap();
    assert_eq!(mounts.len(), 1);
    assert_eq!(mounts[0].sub_path.as_deref(), Some(TEST_CONTAINER));
    assert!(req.new_container_names().unwrap().is_empty());
}

#[rstest]
fn test_add_container_attributes_only_named(mut test_pod: corev1::Pod, test_dynakube: DynaKube) {
    test_pod.spec_mut().unwrap().containers.push(test_container("sidecar"));
    let mut req = test_request(test_pod, test_dynakube);

    let args = add_container_attributes(&mut req, &["sidecar".to_string()]).unwrap();

    assert_eq!(args.len(), 1);
    assert_contains!(args[0], r#""containerName":"sidecar""#);
    assert_none!(container(&req.pod, TEST_CONTAINER).volume_mounts);
}

#[rstest]
fn test_add_container_attributes_bad_image(mut test_pod: corev1::Pod, test_dynakube: DynaKube) {
    test_pod.spec_mut().unwrap().containers[0].image = None;
    let mut req = test_request(test_pod, test_dynakube);
    let names = req.new_container_names().unwrap();

    assert!(add_container_attributes(&mut req, &names).is_err());
}
