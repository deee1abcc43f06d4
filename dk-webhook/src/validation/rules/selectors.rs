use std::collections::BTreeMap;

use dk_core::k8s::is_valid_label_value;
use dk_core::namespace_mapper::find_conflicting_dynakubes;
use dk_core::prelude::*;
use futures::FutureExt;
use futures::future::BoxFuture;
use kube::api::{
    Api,
    ListParams,
};

use crate::validation::ValidationContext;
use crate::validation::validator::{
    Check,
    Validator,
    error,
};

async fn sibling_dynakubes(ctx: &ValidationContext, dk: &DynaKube) -> anyhow::Result<Vec<DynaKube>> {
    let ns = dk.namespace().unwrap_or_default();
    let api: Api<DynaKube> = Api::namespaced(ctx.client.clone(), &ns);
    let others = api.list(&ListParams::default()).await?;
    Ok(others.items.into_iter().filter(|o| o.name_any() != dk.name_any()).collect())
}

fn namespace_selector_conflict<'a>(ctx: &'a ValidationContext, dk: &'a DynaKube) -> BoxFuture<'a, String> {
    async move {
        if !dk.is_app_injection_needed() && !dk.metadata_enrichment_enabled() {
            return String::new();
        }

        let res = async {
            let others = sibling_dynakubes(ctx, dk).await?;
            let ns_api: Api<corev1::Namespace> = Api::all(ctx.client.clone());
            let namespaces = ns_api.list(&ListParams::default()).await?;
            find_conflicting_dynakubes(dk, &others, &namespaces.items)
        }
        .await;

        match res {
            Ok(conflicts) if conflicts.is_empty() => String::new(),
            Ok(conflicts) => format!(
                "the namespace selector matches namespaces that are already injected by other DynaKubes: {}",
                conflicts.join(", ")
            ),
            Err(err) => format!("could not check namespace selectors for conflicts: {err}"),
        }
    }
    .boxed()
}

pub fn namespace_selector_conflict_validator() -> Validator {
    error("namespace_selector_conflict", Check::Async(namespace_selector_conflict))
}

fn selector_values(sel: &metav1::LabelSelector) -> Vec<&str> {
    let from_labels = sel.match_labels.iter().flatten().map(|(_, v)| v.as_str());
    let from_exprs = sel
        .match_expressions
        .iter()
        .flatten()
        .flat_map(|e| e.values.iter().flatten())
        .map(String::as_str);
    from_labels.chain(from_exprs).collect()
}

fn namespace_selector_labels(_: &ValidationContext, dk: &DynaKube) -> String {
    let invalid: Vec<_> = [dk.one_agent_namespace_selector(), dk.metadata_enrichment_namespace_selector()]
        .into_iter()
        .flatten()
        .flat_map(selector_values)
        .filter(|v| !is_valid_label_value(v))
        .collect();

    if invalid.is_empty() {
        return String::new();
    }
    format!("the namespace selector contains invalid label values: {}", invalid.join(", "))
}

pub fn namespace_selector_labels_validator() -> Validator {
    error("namespace_selector_labels", Check::Sync(namespace_selector_labels))
}

// The node selector of whatever node-level workload the DynaKube deploys; an empty selector
// schedules onto every node, None means no node-level workload at all
fn node_workload_selector(dk: &DynaKube) -> Option<BTreeMap<String, String>> {
    if dk.is_daemonset_required() {
        return Some(dk.host_inject_spec().and_then(|his| his.node_selector.clone()).unwrap_or_default());
    }
    if dk.log_monitoring_enabled() {
        let template = dk.spec.templates.log_monitoring.as_ref();
        return Some(template.and_then(|t| t.node_selector.clone()).unwrap_or_default());
    }
    None
}

// Two selectors can pick the same node unless they require different values for a shared key
fn selectors_overlap(a: &BTreeMap<String, String>, b: &BTreeMap<String, String>) -> bool {
    a.iter().all(|(k, v)| b.get(k).is_none_or(|other| other == v))
}

fn node_selector_conflict<'a>(ctx: &'a ValidationContext, dk: &'a DynaKube) -> BoxFuture<'a, String> {
    async move {
        let Some(selector) = node_workload_selector(dk) else {
            return String::new();
        };
        let Ok(tenant) = dk.tenant_uuid() else {
            return String::new();
        };

        let others = match sibling_dynakubes(ctx, dk).await {
            Ok(others) => others,
            Err(err) => return format!("could not check node selectors for conflicts: {err}"),
        };

        let conflicts: Vec<_> = others
            .iter()
            .filter(|o| o.tenant_uuid().is_ok_and(|t| t == tenant))
            .filter(|o| node_workload_selector(o).is_some_and(|other| selectors_overlap(&selector, &other)))
            .map(|o| o.name_any())
            .collect();

        if conflicts.is_empty() {
            return String::new();
        }
        format!(
            "the node selector overlaps with other DynaKubes for the same tenant: {}",
            conflicts.join(", ")
        )
    }
    .boxed()
}

pub fn node_selector_conflict_validator() -> Validator {
    error("node_selector_conflict", Check::Async(node_selector_conflict))
}
