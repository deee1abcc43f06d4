mod container_ext;
mod owners;
mod pod_ext;
mod util;

pub use owners::*;
pub use util::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {KubernetesError,
    #[error("field not found in struct: {0}")]
    FieldNotFound(String),

    #[error("malformed label selector: {0:?}")]
    MalformedLabelSelector(metav1::LabelSelectorRequirement),
}

pub trait KubeResourceExt {
    fn namespaced_name(&self) -> String;
    fn matches(&self, sel: &metav1::LabelSelector) -> anyhow::Result<bool>;
}

pub trait PodExt {
    fn spec(&self) -> anyhow::Result<&corev1::PodSpec>;
    fn spec_mut(&mut self) -> anyhow::Result<&mut corev1::PodSpec>;
    fn annotation(&self, key: &str) -> Option<&str>;
    fn set_annotation(&mut self, key: &str, value: &str);
    fn remove_annotation(&mut self, key: &str);
    fn controller_owner(&self) -> Option<&metav1::OwnerReference>;
}

pub trait ContainerExt {
    fn has_volume_mount(&self, volume_name: &str, mount_path: &str) -> bool;
    fn add_volume_mount(&mut self, mount: corev1::VolumeMount) -> bool;
    fn has_env(&self, name: &str) -> bool;
    fn add_env(&mut self, env: corev1::EnvVar) -> bool;
}

#[cfg(test)]
pub mod tests;
