use async_trait::async_trait;
use dk_core::dynakube::OneAgentMode;
use dk_core::prelude::*;

use super::request::MutationRequest;
use super::volumes::{
    CONFIG_MOUNT_PATH,
    ONEAGENT_SUBDIR,
};
use super::PodMutator;
use crate::context::WebhookContext;

pub const ONEAGENT_ARG: &str = "--oneagent";
const TECHNOLOGY_ARG: &str = "--technology";

pub const PRELOAD_ENV: &str = "LD_PRELOAD";
pub const DEPLOYMENT_METADATA_ENV: &str = "DT_DEPLOYMENT_METADATA";
pub const NETWORK_ZONE_ENV: &str = "DT_NETWORK_ZONE";
pub const RELEASE_VERSION_ENV: &str = "DT_RELEASE_VERSION";
pub const RELEASE_PRODUCT_ENV: &str = "DT_RELEASE_PRODUCT";

const PRELOAD_LIB: &str = "agent/lib64/liboneagentproc.so";

pub struct OneAgentMutator;

fn value_env(name: &str, value: String) -> corev1::EnvVar {
    corev1::EnvVar { name: name.into(), value: Some(value), ..Default::default() }
}

fn label_env(name: &str, label: &str) -> corev1::EnvVar {
    corev1::EnvVar {
        name: name.into(),
        value_from: Some(corev1::EnvVarSource {
            field_ref: Some(corev1::ObjectFieldSelector {
                field_path: format!("metadata.labels['{label}']"),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn deployment_metadata(dk: &DynaKube) -> String {
    let tech = match dk.mode() {
        OneAgentMode::CloudNativeFullStack => "cloud_native_fullstack",
        _ => "application_monitoring",
    };
    let orchestrator_id = dk.status.as_ref().and_then(|s| s.kube_system_uuid.clone()).unwrap_or_default();
    format!(
        "orchestration_tech=Operator-{tech};script_version={};orchestrator_id={orchestrator_id}",
        env!("CARGO_PKG_VERSION")
    )
}

// The env every injected container needs so the code module gets loaded and reports correctly
pub fn container_env(dk: &DynaKube) -> Vec<corev1::EnvVar> {
    let mut env = vec![
        value_env(PRELOAD_ENV, format!("{CONFIG_MOUNT_PATH}/{ONEAGENT_SUBDIR}/{PRELOAD_LIB}")),
        value_env(DEPLOYMENT_METADATA_ENV, deployment_metadata(dk)),
    ];
    if let Some(zone) = dk.spec.network_zone.as_ref().filter(|z| !z.is_empty()) {
        env.push(value_env(NETWORK_ZONE_ENV, zone.clone()));
    }
    if dk.feature_flags().label_version_detection() {
        env.push(label_env(RELEASE_VERSION_ENV, APP_KUBERNETES_IO_VERSION_KEY));
        env.push(label_env(RELEASE_PRODUCT_ENV, APP_KUBERNETES_IO_NAME_KEY));
    }
    env
}

fn add_container_env(req: &mut MutationRequest, names: &[String]) -> anyhow::Result<bool> {
    let env = container_env(&req.dk);
    let mut changed = false;
    for container in req.containers_named_mut(names)? {
        for var in &env {
            changed |= container.add_env(var.clone());
        }
    }
    Ok(changed)
}

#[async_trait]
impl PodMutator for OneAgentMutator {
    fn enabled(&self, req: &MutationRequest) -> bool {
        req.capabilities.oneagent
    }

    async fn mutate(
        &self,
        _ctx: &WebhookContext,
        req: &mut MutationRequest,
        install: &mut corev1::Container,
        new_containers: &[String],
    ) -> EmptyResult {
        let args = install.args.get_or_insert_default();
        args.push(ONEAGENT_ARG.into());
        if let Some(tech) = req.pod.annotation(TECHNOLOGIES_ANNOTATION_KEY).filter(|t| !t.is_empty()) {
            args.push(format!("{TECHNOLOGY_ARG}={tech}"));
        }
        if let Some(resources) = req.dk.init_resources() {
            install.resources = Some(resources.clone());
        }

        add_container_env(req, new_containers)?;
        Ok(())
    }

    // Every injectable container gets the env, so sidecars that were added after the first
    // injection pick up the preload as well
    fn reinvoke(&self, req: &mut MutationRequest, _new_containers: &[String]) -> anyhow::Result<bool> {
        let names: Vec<_> = req.injectable_containers()?.into_iter().map(|c| c.name.clone()).collect();
        add_container_env(req, &names)
    }
}
