use dk_core::image_ref::ImageRef;
use dk_core::prelude::*;
use serde::Serialize;

use super::init_container::{
    K8S_NODE_NAME_ENV,
    K8S_POD_NAME_ENV,
    K8S_POD_UID_ENV,
};
use super::request::MutationRequest;
use super::volumes::add_config_mounts;

pub const CONTAINER_ATTRIBUTE_ARG: &str = "--container-attribute";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerAttribute<'a> {
    container_name: &'a str,
    image: ImageRef,
    capabilities: Vec<&'static str>,
}

pub fn attribute_arg(key: &str, value: &str) -> String {
    format!("--attribute-{key}={value}")
}

fn env_ref(name: &str) -> String {
    format!("$({name})")
}

// Values the bootstrapper writes into every container's config; the pod-level ones that aren't
// known at admission time are expanded by the kubelet from the install container's env
pub fn pod_attribute_args(req: &MutationRequest) -> Vec<String> {
    let status = req.dk.status.clone().unwrap_or_default();
    let cluster_uid = status.kube_system_uuid.unwrap_or_default();

    vec![
        attribute_arg("clusterUID", &cluster_uid),
        attribute_arg("podName", &env_ref(K8S_POD_NAME_ENV)),
        attribute_arg("podUID", &env_ref(K8S_POD_UID_ENV)),
        attribute_arg("nodeName", &env_ref(K8S_NODE_NAME_ENV)),
        attribute_arg("namespaceName", &req.namespace_name()),
        attribute_arg("clusterName", &status.kubernetes_cluster_name.unwrap_or_default()),
        attribute_arg("dtClusterEntity", &status.kubernetes_cluster_meid.unwrap_or_default()),
        attribute_arg("dt.kubernetes.cluster.id", &cluster_uid),
    ]
}

fn container_attribute_arg(req: &MutationRequest, container: &corev1::Container) -> anyhow::Result<String> {
    let attr = ContainerAttribute {
        container_name: &container.name,
        image: ImageRef::parse(container.image.as_deref().unwrap_or_default())?,
        capabilities: req.capabilities.names(),
    };
    Ok(format!("{CONTAINER_ATTRIBUTE_ARG}={}", serde_json::to_string(&attr)?))
}

// One container-attribute arg per new container, which also gets its config mounts; the caller
// appends the returned args to the install container
pub fn add_container_attributes(req: &mut MutationRequest, names: &[String]) -> anyhow::Result<Vec<String>> {
    let mut args = vec![];
    for container in req.pod.spec()?.containers.iter().filter(|c| names.contains(&c.name)) {
        args.push(container_attribute_arg(req, container)?);
    }

    let (split_mounts, caps) = (req.split_mounts, req.capabilities);
    for container in req.containers_named_mut(names)? {
        add_config_mounts(container, split_mounts, caps);
    }
    Ok(args)
}
