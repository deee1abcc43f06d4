use k8s_openapi::api::apps::v1 as appsv1;
use k8s_openapi::api::batch::v1 as batchv1;
use kube::Resource;
use tracing::*;

use super::*;
use crate::prelude::*;

const POD_KIND: &str = "Pod";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkloadInfo {
    pub kind: String,
    pub name: String,
}

impl From<&metav1::OwnerReference> for WorkloadInfo {
    fn from(owner: &metav1::OwnerReference) -> WorkloadInfo {
        WorkloadInfo { kind: owner.kind.to_lowercase(), name: owner.name.clone() }
    }
}

fn controller_of(obj: &impl Resource) -> Option<WorkloadInfo> {
    obj.owner_references()
        .iter()
        .find(|owner| owner.controller == Some(true))
        .map(WorkloadInfo::from)
}

// ReplicaSets and Jobs are usually generated by a Deployment or CronJob, so we follow the owner
// chain one more hop for those; anything else is reported as-is.  A pod without a controller is
// its own workload.
#[instrument(skip_all, fields(pod.namespaced_name = pod.namespaced_name()))]
pub async fn find_root_workload(client: kube::Client, pod: &corev1::Pod, namespace: &str) -> anyhow::Result<WorkloadInfo> {
    let Some(owner) = pod.controller_owner() else {
        return Ok(WorkloadInfo { kind: POD_KIND.to_lowercase(), name: pod.name_any() });
    };

    let parent = match owner.kind.as_str() {
        REPLICASET_KIND => {
            let api: kube::Api<appsv1::ReplicaSet> = kube::Api::namespaced(client, namespace);
            api.get_opt(&owner.name).await?.and_then(|obj| controller_of(&obj))
        },
        JOB_KIND => {
            let api: kube::Api<batchv1::Job> = kube::Api::namespaced(client, namespace);
            api.get_opt(&owner.name).await?.and_then(|obj| controller_of(&obj))
        },
        _ => None,
    };

    let workload = parent.unwrap_or_else(|| WorkloadInfo::from(owner));
    debug!("resolved workload {}/{}", workload.kind, workload.name);
    Ok(workload)
}
