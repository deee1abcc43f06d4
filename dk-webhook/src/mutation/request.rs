use dk_core::dynakube::FailurePolicy;
use dk_core::namespace_mapper::{
    InjectionCapability,
    selects,
};
use dk_core::prelude::*;

use super::volumes::has_config_mounts;

pub const INSTALL_CONTAINER_NAME: &str = "install-oneagent";

const TRUE: &str = "true";
const FALSE: &str = "false";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Capabilities {
    pub oneagent: bool,
    pub enrichment: bool,
}

impl Capabilities {
    pub fn any(&self) -> bool {
        self.oneagent || self.enrichment
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec![];
        if self.oneagent {
            names.push("oneAgent");
        }
        if self.enrichment {
            names.push("enrichment");
        }
        names
    }
}

// Everything the sub-mutators need to know about one admitted pod.  The pod is a working copy; the
// patch is computed against the original at the end.
pub struct MutationRequest {
    pub pod: corev1::Pod,
    pub namespace: corev1::Namespace,
    pub dk: DynaKube,
    pub split_mounts: bool,
    pub capabilities: Capabilities,
}

impl MutationRequest {
    pub fn new(pod: corev1::Pod, namespace: corev1::Namespace, dk: DynaKube) -> anyhow::Result<MutationRequest> {
        let capabilities = Capabilities {
            oneagent: capability_enabled(&pod, &namespace, &dk, InjectionCapability::OneAgent)?,
            enrichment: capability_enabled(&pod, &namespace, &dk, InjectionCapability::Enrichment)?,
        };
        let split_mounts = pod.annotation(SPLIT_MOUNTS_ANNOTATION_KEY) == Some(TRUE);

        Ok(MutationRequest { pod, namespace, dk, split_mounts, capabilities })
    }

    pub fn namespace_name(&self) -> String {
        self.namespace.name_any()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        failure_policy_for(&self.pod, Some(&self.dk))
    }

    pub fn is_container_excluded(&self, name: &str) -> bool {
        self.pod.annotation(&format!("{CONTAINER_INJECT_ANNOTATION_PREFIX}{name}")) == Some(FALSE)
    }

    // Application containers that are allowed to be injected; the install container lives in
    // initContainers and is never one of them
    pub fn injectable_containers(&self) -> anyhow::Result<Vec<&corev1::Container>> {
        Ok(self.pod.spec()?.containers.iter().filter(|c| !self.is_container_excluded(&c.name)).collect())
    }

    // Injectable containers that don't yet carry the config mounts for the enabled capabilities
    pub fn new_container_names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self
            .injectable_containers()?
            .into_iter()
            .filter(|c| !has_config_mounts(c, self.split_mounts, self.capabilities))
            .map(|c| c.name.clone())
            .collect())
    }

    pub fn containers_named_mut<'a>(
        &'a mut self,
        names: &'a [String],
    ) -> anyhow::Result<impl Iterator<Item = &'a mut corev1::Container>> {
        Ok(self.pod.spec_mut()?.containers.iter_mut().filter(move |c| names.contains(&c.name)))
    }

    pub fn install_container_mut(&mut self) -> anyhow::Result<Option<&mut corev1::Container>> {
        Ok(self
            .pod
            .spec_mut()?
            .init_containers
            .iter_mut()
            .flatten()
            .find(|c| c.name == INSTALL_CONTAINER_NAME))
    }
}

pub fn is_injected(pod: &corev1::Pod) -> bool {
    pod.spec
        .as_ref()
        .and_then(|s| s.init_containers.as_ref())
        .is_some_and(|ics| ics.iter().any(|c| c.name == INSTALL_CONTAINER_NAME))
}

// The pod's own annotation wins over the DynaKube's feature flag
pub fn failure_policy_for(pod: &corev1::Pod, dk: Option<&DynaKube>) -> FailurePolicy {
    match (pod.annotation(FAILURE_POLICY_ANNOTATION_KEY), dk) {
        (Some(policy), _) => FailurePolicy::parse(policy),
        (None, Some(dk)) => dk.feature_flags().injection_failure_policy(),
        (None, None) => FailurePolicy::default(),
    }
}

// Capability-specific annotation > "dynatrace.com/inject" > the automatic-injection feature flag
fn capability_enabled(
    pod: &corev1::Pod,
    ns: &corev1::Namespace,
    dk: &DynaKube,
    capability: InjectionCapability,
) -> anyhow::Result<bool> {
    let global = pod.annotation(INJECT_ANNOTATION_KEY);
    if global == Some(FALSE) || !selects(dk, ns, capability)? {
        return Ok(false);
    }

    let key = match capability {
        InjectionCapability::OneAgent => ONEAGENT_INJECT_ANNOTATION_KEY,
        InjectionCapability::Enrichment => ENRICHMENT_INJECT_ANNOTATION_KEY,
    };
    Ok(match pod.annotation(key).or(global) {
        Some(value) => value == TRUE,
        None => dk.feature_flags().automatic_injection(),
    })
}
