use super::*;
use crate::prelude::*;

impl PodExt for corev1::Pod {
    fn spec(&self) -> anyhow::Result<&corev1::PodSpec> {
        match self.spec.as_ref() {
            None => bail!(KubernetesError::field_not_found("pod spec")),
            Some(ps) => Ok(ps),
        }
    }

    fn spec_mut(&mut self) -> anyhow::Result<&mut corev1::PodSpec> {
        match self.spec.as_mut() {
            None => bail!(KubernetesError::field_not_found("pod spec")),
            Some(ps) => Ok(ps),
        }
    }

    fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.annotations.as_ref()?.get(key).map(String::as_str)
    }

    fn set_annotation(&mut self, key: &str, value: &str) {
        self.annotations_mut().insert(key.into(), value.into());
    }

    fn remove_annotation(&mut self, key: &str) {
        if let Some(annotations) = self.metadata.annotations.as_mut() {
            annotations.remove(key);
        }
    }

    fn controller_owner(&self) -> Option<&metav1::OwnerReference> {
        self.metadata
            .owner_references
            .as_ref()?
            .iter()
            .find(|owner| owner.controller == Some(true))
    }
}
