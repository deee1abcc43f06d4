use std::collections::BTreeMap;

use dk_core::dynakube::FailurePolicy;
use dk_core::prelude::*;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::request::{
    INSTALL_CONTAINER_NAME,
    MutationRequest,
};
use super::volumes::{
    INIT_CONFIG_MOUNT_PATH,
    INPUT_MOUNT_PATH,
    init_volume_mounts,
};
use crate::context::WebhookContext;

pub const BOOTSTRAP_COMMAND: &str = "bootstrap";
pub const SUPPRESS_ERRORS_ARG: &str = "--suppress-errors";

pub const K8S_POD_NAME_ENV: &str = "K8S_POD_NAME";
pub const K8S_POD_UID_ENV: &str = "K8S_POD_UID";
pub const K8S_NODE_NAME_ENV: &str = "K8S_NODE_NAME";

const DEFAULT_USER: i64 = 1001;
const DEFAULT_GROUP: i64 = 1001;
const ROOT_ID: i64 = 0;
const SECCOMP_RUNTIME_DEFAULT: &str = "RuntimeDefault";

const CPU_REQUEST: &str = "30m";
const MEMORY_REQUEST: &str = "30Mi";
const CPU_LIMIT: &str = "100m";
const MEMORY_LIMIT: &str = "60Mi";

pub fn build_install_container(ctx: &WebhookContext, req: &MutationRequest) -> anyhow::Result<corev1::Container> {
    let mut args = vec![
        BOOTSTRAP_COMMAND.to_string(),
        format!("--config-directory={INIT_CONFIG_MOUNT_PATH}"),
        format!("--input-directory={INPUT_MOUNT_PATH}"),
    ];
    if req.failure_policy() != FailurePolicy::Fail {
        args.push(SUPPRESS_ERRORS_ARG.into());
    }

    Ok(corev1::Container {
        name: INSTALL_CONTAINER_NAME.into(),
        image: Some(ctx.bootstrapper_image.clone()),
        image_pull_policy: Some("IfNotPresent".into()),
        args: Some(args),
        env: Some(downward_api_env()),
        resources: Some(default_resources()),
        security_context: Some(security_context(ctx, req)?),
        volume_mounts: Some(init_volume_mounts()),
        ..Default::default()
    })
}

fn field_ref_env(name: &str, field_path: &str) -> corev1::EnvVar {
    corev1::EnvVar {
        name: name.into(),
        value_from: Some(corev1::EnvVarSource {
            field_ref: Some(corev1::ObjectFieldSelector { field_path: field_path.into(), ..Default::default() }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn downward_api_env() -> Vec<corev1::EnvVar> {
    vec![
        field_ref_env(K8S_POD_NAME_ENV, "metadata.name"),
        field_ref_env(K8S_POD_UID_ENV, "metadata.uid"),
        field_ref_env(K8S_NODE_NAME_ENV, "spec.nodeName"),
    ]
}

pub fn default_resources() -> corev1::ResourceRequirements {
    let quantities = |cpu: &str, memory: &str| {
        BTreeMap::from([("cpu".to_string(), Quantity(cpu.into())), ("memory".to_string(), Quantity(memory.into()))])
    };
    corev1::ResourceRequirements {
        requests: Some(quantities(CPU_REQUEST, MEMORY_REQUEST)),
        limits: Some(quantities(CPU_LIMIT, MEMORY_LIMIT)),
        ..Default::default()
    }
}

// User and group resolve as first app container > pod > default; OpenShift assigns its own user
fn security_context(ctx: &WebhookContext, req: &MutationRequest) -> anyhow::Result<corev1::SecurityContext> {
    let spec = req.pod.spec()?;
    let mut user = if ctx.openshift { None } else { Some(DEFAULT_USER) };
    let mut group = Some(DEFAULT_GROUP);

    if let Some(psc) = &spec.security_context {
        user = psc.run_as_user.or(user);
        group = psc.run_as_group.or(group);
    }
    if let Some(csc) = spec.containers.first().and_then(|c| c.security_context.as_ref()) {
        user = csc.run_as_user.or(user);
        group = csc.run_as_group.or(group);
    }

    let run_as_non_root = match user {
        Some(uid) => uid != ROOT_ID,
        None => group != Some(ROOT_ID),
    };

    let seccomp_profile = req.dk.feature_flags().init_seccomp().then(|| corev1::SeccompProfile {
        type_: SECCOMP_RUNTIME_DEFAULT.into(),
        ..Default::default()
    });

    Ok(corev1::SecurityContext {
        read_only_root_filesystem: Some(true),
        allow_privilege_escalation: Some(false),
        privileged: Some(false),
        capabilities: Some(corev1::Capabilities { drop: Some(vec!["ALL".into()]), ..Default::default() }),
        run_as_user: user,
        run_as_group: group,
        run_as_non_root: Some(run_as_non_root),
        seccomp_profile,
        ..Default::default()
    })
}
