use async_trait::async_trait;
use dk_api::latest::EnrichmentRule;
use dk_core::k8s::find_root_workload;
use dk_core::prelude::*;
use tracing::*;

use super::attributes::attribute_arg;
use super::request::MutationRequest;
use super::PodMutator;
use crate::context::WebhookContext;

pub const METADATA_ENRICHMENT_ARG: &str = "--metadata-enrichment";

const LABEL_RULE: &str = "LABEL";
const ANNOTATION_RULE: &str = "ANNOTATION";

pub struct EnrichmentMutator;

fn rule_target(rule: &EnrichmentRule) -> String {
    match rule.target.as_ref().filter(|t| !t.is_empty()) {
        Some(target) => target.clone(),
        None => format!("k8s.namespace.{}.{}", rule.type_.to_lowercase(), rule.source),
    }
}

fn set_if_absent(pod: &mut corev1::Pod, key: &str, value: &str) {
    if pod.annotation(key).is_none() {
        pod.set_annotation(key, value);
    }
}

// Namespace metadata the DynaKube status says to carry over, plus anything the namespace already
// annotated with the enrichment prefix.  Annotations the pod sets itself always win.
fn propagate_namespace_metadata(req: &mut MutationRequest) {
    let mut copied = vec![];
    for (key, value) in req.namespace.annotations() {
        if key.starts_with(ENRICHMENT_ANNOTATION_PREFIX) {
            copied.push((key.clone(), value.clone()));
        }
    }

    let rules = req.dk.status.as_ref().map(|s| s.metadata_enrichment.rules.clone()).unwrap_or_default();
    for rule in &rules {
        let source = match rule.type_.as_str() {
            LABEL_RULE => req.namespace.labels().get(&rule.source),
            ANNOTATION_RULE => req.namespace.annotations().get(&rule.source),
            other => {
                debug!("unknown enrichment rule type {other}");
                None
            },
        };
        if let Some(value) = source {
            copied.push((format!("{ENRICHMENT_ANNOTATION_PREFIX}{}", rule_target(rule)), value.clone()));
        }
    }

    for (key, value) in copied {
        set_if_absent(&mut req.pod, &key, &value);
    }
}

#[async_trait]
impl PodMutator for EnrichmentMutator {
    fn enabled(&self, req: &MutationRequest) -> bool {
        req.capabilities.enrichment
    }

    async fn mutate(
        &self,
        ctx: &WebhookContext,
        req: &mut MutationRequest,
        install: &mut corev1::Container,
        _new_containers: &[String],
    ) -> EmptyResult {
        propagate_namespace_metadata(req);

        let workload = find_root_workload(ctx.client.clone(), &req.pod, &req.namespace_name()).await?;
        req.pod.set_annotation(WORKLOAD_KIND_ANNOTATION_KEY, &workload.kind);
        req.pod.set_annotation(WORKLOAD_NAME_ANNOTATION_KEY, &workload.name);

        install.args.get_or_insert_default().extend([
            METADATA_ENRICHMENT_ARG.to_string(),
            attribute_arg("k8s.workload.kind", &workload.kind),
            attribute_arg("k8s.workload.name", &workload.name),
        ]);
        Ok(())
    }

    // The per-container part of enrichment is the config mount, which the pipeline handles
    fn reinvoke(&self, _req: &mut MutationRequest, _new_containers: &[String]) -> anyhow::Result<bool> {
        Ok(false)
    }
}
