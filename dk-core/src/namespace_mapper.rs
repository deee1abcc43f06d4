use dk_api::latest::DynaKube;
use tracing::*;

use crate::dynakube::DynaKubeExt;
use crate::errors::*;
use crate::prelude::*;

const KUBE_NAMESPACE_PREFIX: &str = "kube-";
const OPENSHIFT_NAMESPACE_PREFIX: &str = "openshift";

err_impl! {NamespaceMapperError,
    #[error("namespace {0} is selected by more than one DynaKube")]
    ConflictingDynakubes(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InjectionCapability {
    OneAgent,
    Enrichment,
}

impl InjectionCapability {
    pub const ALL: [InjectionCapability; 2] = [InjectionCapability::OneAgent, InjectionCapability::Enrichment];
}

// The operator's own namespace and the platform namespaces are never injected into
pub fn is_namespace_ignored(namespace: &str, operator_namespace: &str) -> bool {
    namespace == operator_namespace
        || namespace.starts_with(KUBE_NAMESPACE_PREFIX)
        || namespace.starts_with(OPENSHIFT_NAMESPACE_PREFIX)
}

// An unset selector selects every namespace
pub fn selects(dk: &DynaKube, ns: &corev1::Namespace, capability: InjectionCapability) -> anyhow::Result<bool> {
    let selector = match capability {
        InjectionCapability::OneAgent if dk.is_app_injection_needed() => dk.one_agent_namespace_selector(),
        InjectionCapability::Enrichment if dk.metadata_enrichment_enabled() => dk.metadata_enrichment_namespace_selector(),
        _ => return Ok(false),
    };

    match selector {
        Some(sel) => ns.matches(sel),
        None => Ok(true),
    }
}

fn selects_any(dk: &DynaKube, ns: &corev1::Namespace) -> anyhow::Result<bool> {
    for cap in InjectionCapability::ALL {
        if selects(dk, ns, cap)? {
            return Ok(true);
        }
    }
    Ok(false)
}

// Finds the DynaKube responsible for a namespace.  A namespace belongs to at most one DynaKube,
// whatever capabilities each of them would inject, so two claimants are a conflict.
#[instrument(skip_all, fields(namespace = ns.name_any()))]
pub fn find_dynakube_for_namespace<'a>(
    ns: &corev1::Namespace,
    dks: &'a [DynaKube],
) -> anyhow::Result<Option<&'a DynaKube>> {
    let mut found: Option<&DynaKube> = None;
    for dk in dks {
        if !selects_any(dk, ns)? {
            continue;
        }
        if let Some(other) = found {
            warn!("namespace selected by both {} and {}", other.name_any(), dk.name_any());
            bail!(NamespaceMapperError::conflicting_dynakubes(&ns.name_any()));
        }
        found = Some(dk);
    }
    Ok(found)
}

// Names of the other DynaKubes that would also claim one of `namespaces`
pub fn find_conflicting_dynakubes(
    dk: &DynaKube,
    others: &[DynaKube],
    namespaces: &[corev1::Namespace],
) -> anyhow::Result<Vec<String>> {
    let mut claimed = vec![];
    for ns in namespaces {
        if selects_any(dk, ns)? {
            claimed.push(ns);
        }
    }

    let mut conflicts = vec![];
    for other in others.iter().filter(|o| o.name_any() != dk.name_any()) {
        for ns in &claimed {
            if selects_any(other, ns)? {
                conflicts.push(other.name_any());
                break;
            }
        }
    }
    Ok(conflicts)
}

#[cfg(test)]
mod tests;
