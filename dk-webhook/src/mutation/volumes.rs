use dk_core::prelude::*;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::request::Capabilities;

pub const INPUT_VOLUME_NAME: &str = "dynatrace-input";
pub const INPUT_MOUNT_PATH: &str = "/mnt/input";
pub const CONFIG_VOLUME_NAME: &str = "dynatrace-config";
pub const INIT_CONFIG_MOUNT_PATH: &str = "/mnt/config";
pub const CONFIG_MOUNT_PATH: &str = "/var/lib/dynatrace";

pub const ONEAGENT_SUBDIR: &str = "oneagent";
pub const ENRICHMENT_SUBDIR: &str = "enrichment";
pub const ENRICHMENT_FILES: [&str; 3] = ["dt_metadata.json", "dt_metadata.properties", "endpoint"];

fn secret_projection(name: &str, optional: bool) -> corev1::VolumeProjection {
    corev1::VolumeProjection {
        secret: Some(corev1::SecretProjection {
            name: name.into(),
            optional: Some(optional),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// The replicated bootstrapper secrets, as one read-only tree for the init container
pub fn input_volume() -> corev1::Volume {
    corev1::Volume {
        name: INPUT_VOLUME_NAME.into(),
        projected: Some(corev1::ProjectedVolumeSource {
            sources: Some(vec![
                secret_projection(BOOTSTRAPPER_CONFIG_SECRET_NAME, false),
                secret_projection(BOOTSTRAPPER_CERTS_SECRET_NAME, true),
            ]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn config_volume(pod: &corev1::Pod) -> corev1::Volume {
    let size_limit = pod
        .annotation(CONFIG_VOLUME_SIZE_ANNOTATION_KEY)
        .filter(|s| !s.is_empty())
        .map(|s| Quantity(s.into()));

    corev1::Volume {
        name: CONFIG_VOLUME_NAME.into(),
        empty_dir: Some(corev1::EmptyDirVolumeSource { size_limit, ..Default::default() }),
        ..Default::default()
    }
}

pub fn add_pod_volumes(pod: &mut corev1::Pod) -> EmptyResult {
    let config = config_volume(pod);
    let volumes = pod.spec_mut()?.volumes.get_or_insert_default();
    for vol in [input_volume(), config] {
        if !volumes.iter().any(|v| v.name == vol.name) {
            volumes.push(vol);
        }
    }
    Ok(())
}

pub fn init_volume_mounts() -> Vec<corev1::VolumeMount> {
    vec![
        corev1::VolumeMount {
            name: INPUT_VOLUME_NAME.into(),
            mount_path: INPUT_MOUNT_PATH.into(),
            read_only: Some(true),
            ..Default::default()
        },
        corev1::VolumeMount {
            name: CONFIG_VOLUME_NAME.into(),
            mount_path: INIT_CONFIG_MOUNT_PATH.into(),
            ..Default::default()
        },
    ]
}

fn config_mount(mount_path: String, sub_path: String) -> corev1::VolumeMount {
    corev1::VolumeMount {
        name: CONFIG_VOLUME_NAME.into(),
        mount_path,
        sub_path: Some(sub_path),
        ..Default::default()
    }
}

// Without split mounts every container gets its whole config directory at one path, whatever
// capabilities are enabled
pub fn config_mounts(container_name: &str, split_mounts: bool, caps: Capabilities) -> Vec<corev1::VolumeMount> {
    if !split_mounts {
        return vec![config_mount(CONFIG_MOUNT_PATH.into(), container_name.into())];
    }

    let mut mounts = vec![];
    if caps.oneagent {
        mounts.push(config_mount(
            format!("{CONFIG_MOUNT_PATH}/{ONEAGENT_SUBDIR}"),
            format!("{container_name}/{ONEAGENT_SUBDIR}"),
        ));
    }
    if caps.enrichment {
        for file in ENRICHMENT_FILES {
            mounts.push(config_mount(
                format!("{CONFIG_MOUNT_PATH}/{ENRICHMENT_SUBDIR}/{file}"),
                format!("{container_name}/{ENRICHMENT_SUBDIR}/{file}"),
            ));
        }
    }
    mounts
}

pub fn has_config_mounts(container: &corev1::Container, split_mounts: bool, caps: Capabilities) -> bool {
    config_mounts(&container.name, split_mounts, caps)
        .iter()
        .all(|m| container.has_volume_mount(&m.name, &m.mount_path))
}

pub fn add_config_mounts(container: &mut corev1::Container, split_mounts: bool, caps: Capabilities) -> bool {
    let mut changed = false;
    for mount in config_mounts(&container.name, split_mounts, caps) {
        changed |= container.add_volume_mount(mount);
    }
    changed
}
